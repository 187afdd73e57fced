// ==========================================
// 每日标本挑选系统 - 求解层错误类型
// ==========================================

use thiserror::Error;

/// 求解层错误类型
///
/// 无解 (INFEASIBLE) 与超时 (UNKNOWN) 属于求解状态,不在此列
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("求解器内部错误: {0}")]
    Backend(String),

    #[error("模型无界: 目标函数可无限下降")]
    Unbounded,

    #[error("求解工作线程异常退出")]
    WorkerDisconnected,
}

/// Result 类型别名
pub type SolverResult<T> = Result<T, SolverError>;
