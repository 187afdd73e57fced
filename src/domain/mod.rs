// ==========================================
// 每日标本挑选系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含求解逻辑,不含文件读写
// ==========================================

pub mod area;
pub mod specimen;
pub mod types;

// 重导出核心类型
pub use area::{Area, AreaCases, AreaHistory};
pub use specimen::{CandidateTable, Inventory, Plate, Specimen, StorageBox};
pub use types::{PlateSelectionRule, SolveStatus};
