#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Accepted rows must come back sorted with finite AQI values.
    if let Ok(rows) = aqi_config::read_history(data) {
        assert!(rows.iter().all(|r| r.aqi.is_finite()));
        assert!(rows.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }
});
