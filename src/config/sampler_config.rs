// ==========================================
// 每日标本挑选系统 - 挑选参数
// ==========================================
// 职责: 不可变参数值 (时间、权重、容量上限、求解时限)
// 红线: 模型构建前必须通过 validate()
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::PlateSelectionRule;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

// ==========================================
// SamplerConfig - 挑选参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplerConfig {
    // ===== 时间参数 (秒) =====
    pub seconds_per_cherrypick: i64,
    pub seconds_per_box_load: i64,
    pub total_time_available: i64,

    // ===== 目标函数权重 =====
    pub area_loss_weighting: f64,
    pub maximise_samples_weighting: f64,
    pub priority_sample_weighting: f64,

    // ===== 容量上限 =====
    pub max_samples: i64,
    pub max_boxes: i64,
    pub max_plates: i64,

    // ===== 求解时限 (秒) =====
    pub max_search_time: f64,

    // ===== 统计窗口 =====
    // 历史窗口外推到目标窗口: desired = target/history × 历史总数 × 占比
    #[serde(default = "default_history_window_days")]
    pub history_window_days: u32,
    #[serde(default = "default_target_window_days")]
    pub target_window_days: u32,

    // ===== 平板规则 =====
    #[serde(default)]
    pub plate_selection: PlateSelectionRule,
}

fn default_history_window_days() -> u32 {
    6
}

fn default_target_window_days() -> u32 {
    7
}

impl SamplerConfig {
    /// 从 JSON 字符串加载并校验
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: SamplerConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载并校验
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// 从扁平 key-value 映射加载并校验
    ///
    /// # 参数
    /// - `values`: 配置键 → 字符串值 (键见 `config_keys`)
    ///
    /// # 说明
    /// 必填项缺失返回 `MissingKey`;窗口天数与平板规则缺失时取默认值
    pub fn from_key_values(values: &HashMap<String, String>) -> ConfigResult<Self> {
        let config = SamplerConfig {
            seconds_per_cherrypick: required(values, config_keys::SECONDS_PER_CHERRYPICK)?,
            seconds_per_box_load: required(values, config_keys::SECONDS_PER_BOX_LOAD)?,
            total_time_available: required(values, config_keys::TOTAL_TIME_AVAILABLE)?,
            area_loss_weighting: required(values, config_keys::AREA_LOSS_WEIGHTING)?,
            maximise_samples_weighting: required(values, config_keys::MAXIMISE_SAMPLES_WEIGHTING)?,
            priority_sample_weighting: required(values, config_keys::PRIORITY_SAMPLE_WEIGHTING)?,
            max_samples: required(values, config_keys::MAX_SAMPLES)?,
            max_boxes: required(values, config_keys::MAX_BOXES)?,
            max_plates: required(values, config_keys::MAX_PLATES)?,
            max_search_time: required(values, config_keys::MAX_SEARCH_TIME)?,
            history_window_days: optional(values, config_keys::HISTORY_WINDOW_DAYS)?
                .unwrap_or_else(default_history_window_days),
            target_window_days: optional(values, config_keys::TARGET_WINDOW_DAYS)?
                .unwrap_or_else(default_target_window_days),
            plate_selection: match values.get(config_keys::PLATE_SELECTION) {
                Some(raw) => parse_plate_rule(raw)?,
                None => PlateSelectionRule::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// 校验全部参数
    ///
    /// 规则:
    /// 1) 时间、容量上限不得为负
    /// 2) 权重、求解时限必须为有限非负数
    /// 3) 统计窗口天数必须大于 0
    pub fn validate(&self) -> ConfigResult<()> {
        let integers = [
            (config_keys::SECONDS_PER_CHERRYPICK, self.seconds_per_cherrypick),
            (config_keys::SECONDS_PER_BOX_LOAD, self.seconds_per_box_load),
            (config_keys::TOTAL_TIME_AVAILABLE, self.total_time_available),
            (config_keys::MAX_SAMPLES, self.max_samples),
            (config_keys::MAX_BOXES, self.max_boxes),
            (config_keys::MAX_PLATES, self.max_plates),
        ];
        for (key, value) in integers {
            if value < 0 {
                return Err(ConfigError::Negative {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }

        let reals = [
            (config_keys::AREA_LOSS_WEIGHTING, self.area_loss_weighting),
            (
                config_keys::MAXIMISE_SAMPLES_WEIGHTING,
                self.maximise_samples_weighting,
            ),
            (
                config_keys::PRIORITY_SAMPLE_WEIGHTING,
                self.priority_sample_weighting,
            ),
            (config_keys::MAX_SEARCH_TIME, self.max_search_time),
        ];
        for (key, value) in reals {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite {
                    key: key.to_string(),
                });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }

        if self.history_window_days == 0 || self.target_window_days == 0 {
            return Err(ConfigError::InvalidWindow {
                history_days: self.history_window_days,
                target_days: self.target_window_days,
            });
        }

        Ok(())
    }

    /// 求解时间预算
    pub fn time_limit(&self) -> Duration {
        Duration::try_from_secs_f64(self.max_search_time).unwrap_or(Duration::MAX)
    }
}

fn required<T>(values: &HashMap<String, String>, key: &str) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional(values, key)?.ok_or_else(|| ConfigError::MissingKey(key.to_string()))
}

fn optional<T>(values: &HashMap<String, String>, key: &str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match values.get(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.clone(),
                message: e.to_string(),
            }),
    }
}

fn parse_plate_rule(raw: &str) -> ConfigResult<PlateSelectionRule> {
    match raw.trim().to_lowercase().as_str() {
        "whole_plate" => Ok(PlateSelectionRule::WholePlate),
        "optional" => Ok(PlateSelectionRule::Optional),
        other => Err(ConfigError::InvalidValue {
            key: config_keys::PLATE_SELECTION.to_string(),
            value: other.to_string(),
            message: "期望 whole_plate 或 optional".to_string(),
        }),
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 时间
    pub const SECONDS_PER_CHERRYPICK: &str = "seconds_per_cherrypick";
    pub const SECONDS_PER_BOX_LOAD: &str = "seconds_per_box_load";
    pub const TOTAL_TIME_AVAILABLE: &str = "total_time_available";

    // 权重
    pub const AREA_LOSS_WEIGHTING: &str = "area_loss_weighting";
    pub const MAXIMISE_SAMPLES_WEIGHTING: &str = "maximise_samples_weighting";
    pub const PRIORITY_SAMPLE_WEIGHTING: &str = "priority_sample_weighting";

    // 容量
    pub const MAX_SAMPLES: &str = "max_samples";
    pub const MAX_BOXES: &str = "max_boxes";
    pub const MAX_PLATES: &str = "max_plates";

    // 求解
    pub const MAX_SEARCH_TIME: &str = "max_search_time";

    // 统计窗口
    pub const HISTORY_WINDOW_DAYS: &str = "history_window_days";
    pub const TARGET_WINDOW_DAYS: &str = "target_window_days";

    // 平板规则
    pub const PLATE_SELECTION: &str = "plate_selection";
}
