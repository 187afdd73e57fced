// ==========================================
// 每日标本挑选系统 - 配置错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置项缺失: {0}")]
    MissingKey(String),

    #[error("配置值为负数 (key: {key}): {value}")]
    Negative { key: String, value: String },

    #[error("配置值不是有限数值 (key: {key})")]
    NotFinite { key: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("统计窗口天数必须大于 0: history_window_days={history_days}, target_window_days={target_days}")]
    InvalidWindow { history_days: u32, target_days: u32 },

    #[error("配置 JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("配置文件读取失败: {0}")]
    Io(#[from] std::io::Error),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
