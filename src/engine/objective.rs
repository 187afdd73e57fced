// ==========================================
// 每日标本挑选系统 - 目标函数组装引擎
// ==========================================
// 职责: 地域缺口 (hinge) + 挑选数量 + 优先标本 → 单一最小化目标
// ==========================================
// objective = 均衡损失 × area_loss_weighting
//           - 选中标本数 × maximise_samples_weighting
//           - 选中优先标本数 × priority_sample_weighting
// 缺口变量 shortfall[a] ∈ [0, max(desired[a] - 历史[a], 0)]
//   约束 shortfall[a] >= desired[a] - projected[a]
//   projected >= 历史计数,上界即最坏缺口,不会误伤可行性
// ==========================================

use crate::config::SamplerConfig;
use crate::engine::equity::{AreaProjection, EquityEstimate};
use crate::engine::model_builder::SelectionVariables;
use crate::solver::model::{Comparison, LinearExpr, LinearModel, VarId};
use tracing::debug;

// ==========================================
// ShortfallVariable - 单地域缺口变量
// ==========================================
#[derive(Debug, Clone)]
pub struct ShortfallVariable {
    pub area: String,
    pub var: VarId,
    pub upper_bound: i64,
}

// ==========================================
// Objective - 组装结果
// ==========================================
#[derive(Debug, Clone)]
pub struct Objective {
    /// 最小化目标
    pub expression: LinearExpr,
    /// Σ shortfall (未加权)
    pub equity_loss: LinearExpr,
    pub shortfalls: Vec<ShortfallVariable>,
}

// ==========================================
// ObjectiveComposer
// ==========================================
pub struct ObjectiveComposer {
    area_loss_weighting: f64,
    maximise_samples_weighting: f64,
    priority_sample_weighting: f64,
}

impl ObjectiveComposer {
    pub fn new(
        area_loss_weighting: f64,
        maximise_samples_weighting: f64,
        priority_sample_weighting: f64,
    ) -> Self {
        Self {
            area_loss_weighting,
            maximise_samples_weighting,
            priority_sample_weighting,
        }
    }

    pub fn from_config(config: &SamplerConfig) -> Self {
        Self::new(
            config.area_loss_weighting,
            config.maximise_samples_weighting,
            config.priority_sample_weighting,
        )
    }

    /// 缺口变量上界
    ///
    /// projected 不会低于历史计数,缺口最大为 desired - 历史
    pub fn shortfall_upper_bound(projection: &AreaProjection) -> i64 {
        (projection.desired() - projection.historical()).max(0)
    }

    /// 创建缺口变量并设置最小化目标
    pub fn compose(
        &self,
        model: &mut LinearModel,
        estimate: &EquityEstimate,
        selection: &SelectionVariables,
    ) -> Objective {
        let mut shortfalls = Vec::with_capacity(estimate.areas.len());

        for projection in &estimate.areas {
            let area = &projection.area.area;
            let upper_bound = Self::shortfall_upper_bound(projection);
            let var = model.add_integer(format!("positive_loss_for_{}", area), 0, upper_bound);

            // shortfall + projected >= desired
            model.add_constraint(
                format!("shortfall_covers_{}", area),
                LinearExpr::term(var, 1.0) + projection.projected.clone(),
                Comparison::GreaterOrEqual,
                projection.desired() as f64,
            );

            shortfalls.push(ShortfallVariable {
                area: area.clone(),
                var,
                upper_bound,
            });
        }

        let equity_loss = LinearExpr::sum(shortfalls.iter().map(|s| s.var));
        let expression = equity_loss.clone() * self.area_loss_weighting
            - selection.total_specimens() * self.maximise_samples_weighting
            - selection.total_priority() * self.priority_sample_weighting;

        debug!(
            areas = shortfalls.len(),
            area_loss_weighting = self.area_loss_weighting,
            maximise_samples_weighting = self.maximise_samples_weighting,
            priority_sample_weighting = self.priority_sample_weighting,
            "目标函数组装完成"
        );

        model.minimise(expression.clone());

        Objective {
            expression,
            equity_loss,
            shortfalls,
        }
    }
}
