// ==========================================
// 每日标本挑选系统 - good_lp 求解后端
// ==========================================
// 求解器: microlp (纯 Rust, 支持整数变量, 求解至最优)
// 时限: 求解在工作线程中进行,调用方最多等待 time_limit
// ==========================================

use crate::domain::types::SolveStatus;
use crate::solver::backend::SolverBackend;
use crate::solver::error::{SolverError, SolverResult};
use crate::solver::model::{Assignment, Comparison, LinearExpr, LinearModel, SolveOutcome, VarDomain};
use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

// ==========================================
// GoodLpBackend
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpBackend;

impl GoodLpBackend {
    pub fn new() -> Self {
        Self
    }
}

impl SolverBackend for GoodLpBackend {
    fn name(&self) -> &'static str {
        "good_lp/microlp"
    }

    fn solve(&self, model: &LinearModel, time_limit: Duration) -> SolverResult<SolveOutcome> {
        if model.is_trivially_infeasible() {
            warn!(
                constraints = ?model.violated_constraints(),
                "常量约束不成立,模型无解"
            );
            return Ok(SolveOutcome::infeasible());
        }

        debug!(
            variables = model.variables().len(),
            constraints = model.constraints().len(),
            time_limit_secs = time_limit.as_secs_f64(),
            "提交模型至 microlp"
        );

        let owned = model.clone();
        let (tx, rx) = mpsc::channel();
        let started = Instant::now();

        // 超时后工作线程自行跑完,结果被丢弃
        thread::Builder::new()
            .name("even-sampling-solver".to_string())
            .spawn(move || {
                let _ = tx.send(solve_with_microlp(&owned));
            })
            .map_err(|e| SolverError::Backend(format!("无法启动求解线程: {}", e)))?;

        match rx.recv_timeout(time_limit) {
            Ok(result) => {
                debug!(elapsed_ms = started.elapsed().as_millis() as u64, "microlp 求解结束");
                result
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    time_limit_secs = time_limit.as_secs_f64(),
                    "求解时间预算耗尽,未获得解"
                );
                Ok(SolveOutcome::unknown())
            }
            Err(RecvTimeoutError::Disconnected) => Err(SolverError::WorkerDisconnected),
        }
    }
}

/// 将 LinearModel 翻译为 good_lp 问题并求解
fn solve_with_microlp(model: &LinearModel) -> SolverResult<SolveOutcome> {
    let mut problem_vars = ProblemVariables::new();
    let vars: Vec<Variable> = model
        .variables()
        .iter()
        .map(|def| {
            let definition = match def.domain {
                VarDomain::Binary => variable().binary(),
                VarDomain::Integer { lower, upper } => {
                    variable().integer().min(lower as f64).max(upper as f64)
                }
            };
            problem_vars.add(definition.name(def.name.clone()))
        })
        .collect();

    let objective = to_expression(model.objective(), &vars);
    let mut problem = problem_vars.minimise(objective).using(microlp);

    for c in model.constraints() {
        let lhs = to_expression(&c.expr, &vars);
        let rhs = Expression::from(c.rhs);
        problem = problem.with(match c.comparison {
            Comparison::LessOrEqual => constraint!(lhs <= rhs),
            Comparison::GreaterOrEqual => constraint!(lhs >= rhs),
            Comparison::Equal => constraint!(lhs == rhs),
        });
    }

    match problem.solve() {
        Ok(solution) => {
            let values: Vec<f64> = vars.iter().map(|v| solution.value(*v)).collect();
            let assignment = Assignment::new(values);
            let objective_value = model.objective().evaluate(&assignment);
            Ok(SolveOutcome::solved(
                SolveStatus::Optimal,
                assignment,
                objective_value,
            ))
        }
        Err(ResolutionError::Infeasible) => Ok(SolveOutcome::infeasible()),
        Err(ResolutionError::Unbounded) => Err(SolverError::Unbounded),
        Err(e) => Err(SolverError::Backend(e.to_string())),
    }
}

fn to_expression(expr: &LinearExpr, vars: &[Variable]) -> Expression {
    let mut out = Expression::from(expr.constant_part());
    for &(var, coef) in expr.terms() {
        out += coef * vars[var.index()];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solves_small_knapsack() {
        // max x + 2y  s.t. x + y <= 1  => y = 1
        let mut model = LinearModel::new();
        let x = model.add_binary("x");
        let y = model.add_binary("y");
        model.add_constraint(
            "cap",
            LinearExpr::sum([x, y]),
            Comparison::LessOrEqual,
            1.0,
        );
        model.minimise(LinearExpr::term(x, -1.0) + LinearExpr::term(y, -2.0));

        let outcome = GoodLpBackend::new()
            .solve(&model, Duration::from_secs(10))
            .unwrap();

        assert_eq!(outcome.status, SolveStatus::Optimal);
        let assignment = outcome.assignment.unwrap();
        assert!(!assignment.is_set(x));
        assert!(assignment.is_set(y));
        assert!((outcome.objective_value.unwrap() + 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_reports_infeasible() {
        let mut model = LinearModel::new();
        let x = model.add_binary("x");
        model.add_constraint("low", LinearExpr::term(x, 1.0), Comparison::LessOrEqual, -1.0);

        let outcome = GoodLpBackend::new()
            .solve(&model, Duration::from_secs(10))
            .unwrap();
        assert_eq!(outcome.status, SolveStatus::Infeasible);
        assert!(outcome.assignment.is_none());
    }

    #[test]
    fn test_trivially_infeasible_short_circuits() {
        let mut model = LinearModel::new();
        model.add_constraint("t", LinearExpr::constant(0.0), Comparison::LessOrEqual, -1.0);

        let outcome = GoodLpBackend::new()
            .solve(&model, Duration::from_secs(10))
            .unwrap();
        assert_eq!(outcome.status, SolveStatus::Infeasible);
    }

    #[test]
    fn test_integer_bounds_respected() {
        let mut model = LinearModel::new();
        let z = model.add_integer("z", 0, 7);
        model.minimise(LinearExpr::term(z, -1.0));

        let outcome = GoodLpBackend::new()
            .solve(&model, Duration::from_secs(10))
            .unwrap();
        assert_eq!(outcome.assignment.unwrap().int_value(z), 7);
    }
}
