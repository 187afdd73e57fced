// ==========================================
// SamplerConfig 集成测试
// ==========================================
// 测试目标: 验证 JSON 配置加载与校验
// ==========================================

use even_sampling::config::ConfigError;
use even_sampling::{PlateSelectionRule, SamplerConfig};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

const REFERENCE_JSON: &str = r#"{
    "seconds_per_cherrypick": 10,
    "seconds_per_box_load": 1200,
    "total_time_available": 1200000000000,
    "area_loss_weighting": 2,
    "maximise_samples_weighting": 1,
    "priority_sample_weighting": 10,
    "max_samples": 10,
    "max_boxes": 2,
    "max_plates": 10,
    "max_search_time": 10
}"#;

#[test]
fn test_load_reference_config_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", REFERENCE_JSON).unwrap();

    let config = SamplerConfig::from_json_file(temp_file.path()).unwrap();

    assert_eq!(config.seconds_per_box_load, 1200);
    assert_eq!(config.area_loss_weighting, 2.0);
    assert_eq!(config.max_boxes, 2);
    assert_eq!(config.history_window_days, 6);
    assert_eq!(config.target_window_days, 7);
    assert_eq!(config.plate_selection, PlateSelectionRule::WholePlate);
    assert_eq!(config.time_limit(), Duration::from_secs(10));
}

#[test]
fn test_window_and_plate_rule_overrides() {
    let raw = REFERENCE_JSON.replace(
        "\"max_search_time\": 10",
        "\"max_search_time\": 0.5, \"history_window_days\": 7, \"target_window_days\": 14, \"plate_selection\": \"optional\"",
    );
    let config = SamplerConfig::from_json_str(&raw).unwrap();

    assert_eq!(config.history_window_days, 7);
    assert_eq!(config.target_window_days, 14);
    assert_eq!(config.plate_selection, PlateSelectionRule::Optional);
    assert_eq!(config.time_limit(), Duration::from_millis(500));
}

#[test]
fn test_missing_required_option_rejected() {
    // max_plates 无默认值
    let raw = REFERENCE_JSON.replace("\"max_plates\": 10,", "");
    let err = SamplerConfig::from_json_str(&raw).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_unknown_option_rejected() {
    let raw = REFERENCE_JSON.replace("\"max_boxes\": 2,", "\"max_boxes\": 2, \"max_box\": 3,");
    assert!(matches!(
        SamplerConfig::from_json_str(&raw),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn test_negative_values_rejected() {
    let raw = REFERENCE_JSON.replace("\"total_time_available\": 1200000000000", "\"total_time_available\": -5");
    let err = SamplerConfig::from_json_str(&raw).unwrap_err();
    assert!(matches!(err, ConfigError::Negative { ref key, .. } if key == "total_time_available"));

    let raw = REFERENCE_JSON.replace("\"area_loss_weighting\": 2", "\"area_loss_weighting\": -2");
    let err = SamplerConfig::from_json_str(&raw).unwrap_err();
    assert!(matches!(err, ConfigError::Negative { ref key, .. } if key == "area_loss_weighting"));

    let raw = REFERENCE_JSON.replace("\"max_search_time\": 10", "\"max_search_time\": -1");
    assert!(SamplerConfig::from_json_str(&raw).is_err());
}

#[test]
fn test_missing_file_reported_as_io() {
    let err = SamplerConfig::from_json_file("does/not/exist.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
