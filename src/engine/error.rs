// ==========================================
// 每日标本挑选系统 - 挑选引擎错误类型
// ==========================================
// 红线: 数据完整性错误立即失败,不以 0 权重静默兜底
// ==========================================

use crate::config::ConfigError;
use crate::solver::SolverError;
use thiserror::Error;

/// 挑选引擎错误类型
#[derive(Error, Debug)]
pub enum PickingError {
    // ===== 数据完整性错误 =====
    #[error("地域缺少病例数据 (行 {row_id}): area={area}")]
    MissingArea { area: String, row_id: usize },

    #[error("{table} 表中地域重复: {area}")]
    DuplicateArea { table: &'static str, area: String },

    #[error("候选标本行标识重复: {0}")]
    DuplicateSpecimen(usize),

    #[error("病例表为空或病例总数为 0,无法计算地域占比")]
    NoCaseCounts,

    // ===== 求解终态 =====
    #[error("约束无解: 不存在同时满足全部容量约束的挑选方案")]
    Infeasible,

    #[error("求解超时: {seconds} 秒内未获得可行解")]
    NoSolutionWithinTimeLimit { seconds: f64 },

    // ===== 下层错误 =====
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Result 类型别名
pub type PickingResult<T> = Result<T, PickingError>;
