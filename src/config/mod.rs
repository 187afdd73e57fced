// ==========================================
// 每日标本挑选系统 - 配置层
// ==========================================
// 职责: 挑选参数的加载与校验
// 来源: JSON 文件 / 扁平 key-value 映射
// ==========================================

pub mod error;
pub mod sampler_config;

// 重导出核心类型
pub use error::{ConfigError, ConfigResult};
pub use sampler_config::{config_keys, SamplerConfig};
