// ==========================================
// 每日标本挑选系统 - 求解层
// ==========================================
// 职责: 与求解器无关的线性模型 + 可替换的求解后端
// ==========================================

pub mod backend;
pub mod error;
pub mod good_lp_backend;
pub mod model;

// 重导出核心类型
pub use backend::SolverBackend;
pub use error::{SolverError, SolverResult};
pub use good_lp_backend::GoodLpBackend;
pub use model::{
    Assignment, Comparison, LinearConstraint, LinearExpr, LinearModel, SolveOutcome, VarDef,
    VarDomain, VarId,
};
