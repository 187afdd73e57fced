// ==========================================
// 每日标本挑选系统 - 求解后端接口
// ==========================================
// 职责: 接收完整模型与时间预算,返回状态与变量取值
// 实现者: GoodLpBackend
// ==========================================

use crate::solver::error::SolverResult;
use crate::solver::model::{LinearModel, SolveOutcome};
use std::time::Duration;

// ==========================================
// SolverBackend Trait
// ==========================================
pub trait SolverBackend {
    /// 后端名称 (用于日志)
    fn name(&self) -> &'static str;

    /// 阻塞求解
    ///
    /// # 参数
    /// - `model`: 已组装的模型 (变量、约束、最小化目标)
    /// - `time_limit`: 墙钟时间预算
    ///
    /// # 返回
    /// - OPTIMAL/FEASIBLE: 附带每个变量的取值
    /// - INFEASIBLE: 约束无解
    /// - UNKNOWN: 预算耗尽仍未得到解
    fn solve(&self, model: &LinearModel, time_limit: Duration) -> SolverResult<SolveOutcome>;
}

impl<T: SolverBackend + ?Sized> SolverBackend for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, model: &LinearModel, time_limit: Duration) -> SolverResult<SolveOutcome> {
        (**self).solve(model, time_limit)
    }
}
