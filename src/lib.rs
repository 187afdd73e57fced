// ==========================================
// 每日标本挑选系统 - 核心库
// ==========================================
// 技术栈: Rust + good_lp (microlp)
// 系统定位: 决策支持 (每日从库存中挑选待测序标本)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 挑选参数
pub mod config;

// 求解层 - 线性模型与求解后端
pub mod solver;

// 引擎层 - 优化模型
pub mod engine;

// 导入层 - 外部表格
pub mod importer;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域
pub use domain::{
    Area, AreaCases, AreaHistory, CandidateTable, Plate, PlateSelectionRule, SolveStatus, Specimen,
    StorageBox,
};

// 配置
pub use config::{ConfigError, SamplerConfig};

// 求解
pub use solver::{GoodLpBackend, SolverBackend, SolverError};

// 引擎
pub use engine::{
    AreaEquity, CapacityConstraintSet, GeographicEquityEstimator, ModelBuilder, ObjectiveComposer,
    PickOutcome, PickResult, PickingError, ResultExtractor, SpecimenPicker,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "每日标本挑选系统";
