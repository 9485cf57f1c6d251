use aqi_config::{Scheme, load_toml};
use rstest::rstest;

const BASE: &str = r#"
[history]
csv = "data/cleaned_aqi_dataset.csv"

[model]
path = "data/aq_model.toml"
"#;

#[test]
fn minimal_config_uses_defaults() {
    let cfg = load_toml(BASE).expect("parse TOML");
    cfg.validate().expect("defaults should validate");
    assert_eq!(cfg.forecast.horizon, 6);
    assert_eq!(cfg.forecast.scheme, Scheme::Simple);
    assert_eq!(cfg.forecast.stale_after_h, 3);
    assert!(!cfg.live.enabled);
    assert_eq!(cfg.live.api_key_env, "GOOGLE_AQI_API_KEY");
}

#[test]
fn extended_scheme_parses() {
    let toml = format!("{BASE}\n[forecast]\nhorizon = 3\nscheme = \"extended\"\n");
    let cfg = load_toml(&toml).expect("parse TOML");
    cfg.validate().expect("valid");
    assert_eq!(cfg.forecast.scheme, Scheme::Extended);
    assert_eq!(cfg.forecast.horizon, 3);
}

#[test]
fn unknown_scheme_is_a_parse_error() {
    let toml = format!("{BASE}\n[forecast]\nscheme = \"rainbow\"\n");
    assert!(load_toml(&toml).is_err());
}

#[test]
fn missing_model_section_is_a_parse_error() {
    let toml = "[history]\ncsv = \"a.csv\"\n";
    assert!(load_toml(toml).is_err());
}

#[rstest]
#[case("[forecast]\nhorizon = 0", "forecast.horizon must be >= 1")]
#[case("[forecast]\nhorizon = 49", "forecast.horizon must be <= 48")]
#[case("[forecast]\npredict_budget_ms = 0", "predict_budget_ms must be >= 1")]
#[case("[forecast]\nstale_after_h = 0", "stale_after_h must be >= 1")]
#[case("[live]\ntimeout_ms = 0", "live.timeout_ms must be in")]
#[case("[live]\nlatitude = 91.0", "live.latitude")]
#[case("[live]\nlongitude = -181.0", "live.longitude")]
#[case("[live]\nenabled = true\nendpoint = \" \"", "live.endpoint must be set")]
#[case("[station]\nutc_offset_minutes = 900", "utc_offset_minutes")]
#[case("[logging]\nrotation = \"weekly\"", "logging.rotation")]
#[case("[logging]\nlevel = \"loud\"", "logging.level")]
fn rejects_out_of_range_values(#[case] section: &str, #[case] needle: &str) {
    let toml = format!("{BASE}\n{section}\n");
    let cfg = load_toml(&toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should be rejected");
    assert!(
        format!("{err}").contains(needle),
        "expected {needle:?} in {err}"
    );
}

#[test]
fn accepts_ist_station_offset() {
    let toml = format!("{BASE}\n[station]\nutc_offset_minutes = 330\n");
    let cfg = load_toml(&toml).expect("parse TOML");
    cfg.validate().expect("valid");
    assert_eq!(cfg.station.utc_offset_minutes, Some(330));
}
