// ==========================================
// 每日标本挑选系统 - 引擎层
// ==========================================
// 职责: 优化模型的构建、求解编排与结果提取
// 红线: 单线程批处理,每次调用独立建模
// ==========================================

pub mod capacity;
pub mod equity;
pub mod error;
pub mod model_builder;
pub mod objective;
pub mod orchestrator;
pub mod result_extractor;

// 重导出核心引擎
pub use capacity::{CapacityConstraintSet, CapacityUsage};
pub use equity::{AreaProjection, EquityEstimate, GeographicEquityEstimator};
pub use error::{PickingError, PickingResult};
pub use model_builder::{ModelBuilder, SelectionVariables};
pub use objective::{Objective, ObjectiveComposer, ShortfallVariable};
pub use orchestrator::{PickOutcome, SpecimenPicker};
pub use result_extractor::{AreaEquity, GroupSelection, PickResult, PickedSpecimen, ResultExtractor};
