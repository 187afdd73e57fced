// ==========================================
// 每日标本挑选系统 - 挑选编排器
// ==========================================
// 职责: 一次构建 → 一次阻塞求解 → 一次结果提取
// 流程: ModelBuilder → GeographicEquityEstimator
//       → ObjectiveComposer + CapacityConstraintSet
//       → SolverBackend → ResultExtractor
// 红线: 每次调用构建独立模型,不共享可变状态
// ==========================================

use crate::config::SamplerConfig;
use crate::domain::area::{AreaCases, AreaHistory};
use crate::domain::specimen::Specimen;
use crate::domain::types::SolveStatus;
use crate::engine::capacity::CapacityConstraintSet;
use crate::engine::equity::GeographicEquityEstimator;
use crate::engine::error::{PickingError, PickingResult};
use crate::engine::model_builder::ModelBuilder;
use crate::engine::objective::ObjectiveComposer;
use crate::engine::result_extractor::{PickResult, ResultExtractor, SolvedModel};
use crate::solver::backend::SolverBackend;
use crate::solver::good_lp_backend::GoodLpBackend;
use crate::solver::model::LinearModel;
use std::time::Duration;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

// ==========================================
// PickOutcome - 挑选终态
// ==========================================
#[derive(Debug, Clone)]
pub enum PickOutcome {
    /// OPTIMAL / FEASIBLE
    Picked(PickResult),
    /// 约束无解
    Infeasible,
    /// 时间预算内未获得解
    TimedOut { time_limit: Duration },
}

impl PickOutcome {
    pub fn status(&self) -> SolveStatus {
        match self {
            PickOutcome::Picked(result) => result.status,
            PickOutcome::Infeasible => SolveStatus::Infeasible,
            PickOutcome::TimedOut { .. } => SolveStatus::Unknown,
        }
    }

    pub fn picked(&self) -> Option<&PickResult> {
        match self {
            PickOutcome::Picked(result) => Some(result),
            _ => None,
        }
    }

    /// 无解/超时转换为错误
    pub fn into_result(self) -> PickingResult<PickResult> {
        match self {
            PickOutcome::Picked(result) => Ok(result),
            PickOutcome::Infeasible => Err(PickingError::Infeasible),
            PickOutcome::TimedOut { time_limit } => Err(PickingError::NoSolutionWithinTimeLimit {
                seconds: time_limit.as_secs_f64(),
            }),
        }
    }
}

// ==========================================
// SpecimenPicker - 挑选编排器
// ==========================================
pub struct SpecimenPicker<B: SolverBackend = GoodLpBackend> {
    history: Vec<AreaHistory>,
    cases: Vec<AreaCases>,
    config: SamplerConfig,
    backend: B,
}

impl SpecimenPicker<GoodLpBackend> {
    /// 使用默认 good_lp 后端创建挑选器
    ///
    /// # 参数
    /// - `history`: 上一统计窗口的地域计数
    /// - `cases`: 地域病例数
    /// - `config`: 挑选参数 (此处校验)
    pub fn new(
        history: Vec<AreaHistory>,
        cases: Vec<AreaCases>,
        config: SamplerConfig,
    ) -> PickingResult<Self> {
        Self::with_backend(history, cases, config, GoodLpBackend::new())
    }
}

impl<B: SolverBackend> SpecimenPicker<B> {
    pub fn with_backend(
        history: Vec<AreaHistory>,
        cases: Vec<AreaCases>,
        config: SamplerConfig,
        backend: B,
    ) -> PickingResult<Self> {
        config.validate()?;
        Ok(Self {
            history,
            cases,
            config,
            backend,
        })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// 为候选标本求解今日挑选方案
    ///
    /// # 参数
    /// - `specimens`: 候选标本池
    ///
    /// # 返回
    /// - Ok(Picked): 附带 to_pick 与均衡诊断
    /// - Ok(Infeasible) / Ok(TimedOut): 求解终态,互不混淆
    /// - Err: 数据完整性错误或求解器内部错误
    pub fn make_picks(&self, specimens: &[Specimen]) -> PickingResult<PickOutcome> {
        let run_id = Uuid::new_v4();
        let span = info_span!(
            "make_picks",
            run_id = %run_id,
            candidates = specimens.len(),
            areas = self.cases.len()
        );
        let _guard = span.enter();

        info!(backend = self.backend.name(), "开始构建挑选模型");

        // 步骤1: 决策变量与传导约束
        let mut model = LinearModel::new();
        let selection = ModelBuilder::new(self.config.plate_selection).build(
            &mut model,
            specimens,
            &self.cases,
        )?;

        // 步骤2: 地域均衡估计
        let estimate = GeographicEquityEstimator::from_config(&self.config).estimate(
            &self.history,
            &self.cases,
            &selection.total_by_area(),
        )?;

        // 步骤3: 目标函数
        let objective =
            ObjectiveComposer::from_config(&self.config).compose(&mut model, &estimate, &selection);

        // 步骤4: 容量硬约束
        let capacity = CapacityConstraintSet::from_config(&self.config);
        capacity.apply(&mut model, &selection);

        debug!(
            variables = model.variables().len(),
            constraints = model.constraints().len(),
            "模型组装完成"
        );

        // 步骤5: 求解
        let time_limit = self.config.time_limit();
        let outcome = self.backend.solve(&model, time_limit)?;
        info!(status = %outcome.status, "求解结束");

        // 步骤6: 结果提取
        match (outcome.status, outcome.assignment) {
            (status, Some(assignment)) if status.has_solution() => {
                let result = ResultExtractor::new().extract(
                    run_id,
                    status,
                    &assignment,
                    SolvedModel {
                        specimens,
                        selection: &selection,
                        estimate: &estimate,
                        objective: &objective,
                        capacity: &capacity,
                    },
                );
                Ok(PickOutcome::Picked(result))
            }
            (SolveStatus::Infeasible, _) => {
                warn!("不存在满足全部约束的挑选方案");
                Ok(PickOutcome::Infeasible)
            }
            (status, _) => {
                warn!(status = %status, "时间预算内未获得解");
                Ok(PickOutcome::TimedOut { time_limit })
            }
        }
    }
}
