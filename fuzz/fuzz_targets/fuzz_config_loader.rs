#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Neither the config nor the model artifact parser may panic; errors are fine.
    if let Ok(cfg) = aqi_config::load_toml(data) {
        let _ = cfg.validate();
    }
    if let Ok(model) = aqi_config::parse_model_artifact(data) {
        let _ = model.validate();
        let _ = model.lag_depth();
    }
});
