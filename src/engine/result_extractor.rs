// ==========================================
// 每日标本挑选系统 - 结果提取引擎
// ==========================================
// 职责: 将求解取值映射回候选标本 (to_pick 列) 并生成均衡诊断
// 输入: 求解取值 + 决策变量 + 均衡估计 + 目标函数
// 输出: PickResult
// ==========================================

use crate::domain::specimen::Specimen;
use crate::domain::types::SolveStatus;
use crate::engine::capacity::{CapacityConstraintSet, CapacityUsage};
use crate::engine::equity::EquityEstimate;
use crate::engine::model_builder::SelectionVariables;
use crate::engine::objective::Objective;
use crate::solver::model::Assignment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

// ==========================================
// PickedSpecimen - 标本 + 挑选标记
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickedSpecimen {
    pub specimen: Specimen,
    pub to_pick: u8, // 0/1
}

/// 盒/板的求解指示值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSelection {
    pub id: String,
    pub picked: bool,
}

// ==========================================
// AreaEquity - 单地域均衡诊断
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaEquity {
    pub area: String,
    pub desired: i64,
    pub projected: i64,
    pub difference: i64, // projected - desired
    pub shortfall: i64,  // 缺口变量取值
}

// ==========================================
// PickResult - 挑选结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickResult {
    pub run_id: Uuid,
    pub solved_at: DateTime<Utc>,
    pub status: SolveStatus,
    pub specimens: Vec<PickedSpecimen>,
    pub boxes: Vec<GroupSelection>,
    pub plates: Vec<GroupSelection>,
    pub area_equity: Vec<AreaEquity>,
    /// Σ 缺口变量
    pub equity_loss: i64,
    pub objective_value: f64,
    pub usage: CapacityUsage,
}

impl PickResult {
    /// to_pick 列 (与候选顺序一致)
    pub fn to_pick_column(&self) -> Vec<u8> {
        self.specimens.iter().map(|s| s.to_pick).collect()
    }

    pub fn picked_specimens(&self) -> impl Iterator<Item = &Specimen> {
        self.specimens
            .iter()
            .filter(|s| s.to_pick == 1)
            .map(|s| &s.specimen)
    }

    pub fn is_box_picked(&self, box_id: &str) -> bool {
        self.boxes.iter().any(|b| b.id == box_id && b.picked)
    }

    pub fn is_plate_picked(&self, plate_id: &str) -> bool {
        self.plates.iter().any(|p| p.id == plate_id && p.picked)
    }

    pub fn total_projected(&self) -> i64 {
        self.area_equity.iter().map(|a| a.projected).sum()
    }

    pub fn total_desired(&self) -> i64 {
        self.area_equity.iter().map(|a| a.desired).sum()
    }
}

/// 提取所需的全部模型部件
pub struct SolvedModel<'a> {
    pub specimens: &'a [Specimen],
    pub selection: &'a SelectionVariables,
    pub estimate: &'a EquityEstimate,
    pub objective: &'a Objective,
    pub capacity: &'a CapacityConstraintSet,
}

// ==========================================
// ResultExtractor
// ==========================================
pub struct ResultExtractor {
    // 无状态引擎
}

impl ResultExtractor {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成挑选结果并输出均衡诊断日志
    ///
    /// # 参数
    /// - `run_id`: 本次挑选的标识
    /// - `status`: OPTIMAL 或 FEASIBLE
    /// - `assignment`: 求解取值
    /// - `parts`: 模型部件
    pub fn extract(
        &self,
        run_id: Uuid,
        status: SolveStatus,
        assignment: &Assignment,
        parts: SolvedModel<'_>,
    ) -> PickResult {
        let specimens = parts
            .specimens
            .iter()
            .zip(&parts.selection.specimen_picked)
            .map(|(specimen, var)| PickedSpecimen {
                specimen: specimen.clone(),
                to_pick: u8::from(assignment.is_set(*var)),
            })
            .collect();

        let boxes = parts
            .selection
            .box_picked
            .iter()
            .map(|(b, var)| GroupSelection {
                id: b.box_id.clone(),
                picked: assignment.is_set(*var),
            })
            .collect();

        let plates = parts
            .selection
            .plate_picked
            .iter()
            .map(|(p, var)| GroupSelection {
                id: p.plate_id.clone(),
                picked: assignment.is_set(*var),
            })
            .collect();

        let area_equity: Vec<AreaEquity> = parts
            .estimate
            .areas
            .iter()
            .zip(&parts.objective.shortfalls)
            .map(|(projection, shortfall)| {
                let desired = projection.desired();
                let projected = projection.projected.evaluate(assignment).round() as i64;
                AreaEquity {
                    area: projection.area.area.clone(),
                    desired,
                    projected,
                    difference: projected - desired,
                    shortfall: assignment.int_value(shortfall.var),
                }
            })
            .collect();

        for equity in &area_equity {
            info!(
                area = %equity.area,
                desired = equity.desired,
                projected = equity.projected,
                diff = equity.difference,
                "地域均衡"
            );
        }

        let equity_loss = area_equity.iter().map(|a| a.shortfall).sum();
        let objective_value = parts.objective.expression.evaluate(assignment);
        let usage = parts.capacity.usage(parts.selection, assignment);

        let result = PickResult {
            run_id,
            solved_at: Utc::now(),
            status,
            specimens,
            boxes,
            plates,
            area_equity,
            equity_loss,
            objective_value,
            usage,
        };

        info!(
            total_projected = result.total_projected(),
            total_desired = result.total_desired(),
            "目标窗口合计"
        );
        info!(
            loss = result.objective_value,
            equity_loss = result.equity_loss,
            picked = usage.specimens,
            boxes = usage.boxes,
            plates = usage.plates,
            total_time_seconds = usage.total_time_seconds,
            "求解目标值"
        );

        result
    }
}

impl Default for ResultExtractor {
    fn default() -> Self {
        Self::new()
    }
}
