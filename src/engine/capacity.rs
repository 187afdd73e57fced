// ==========================================
// 每日标本挑选系统 - 容量硬约束
// ==========================================
// 红线: 容量约束无条件生效,无解即终态,不做近似放宽
// ==========================================
// 盒数 <= max_boxes
// 板数 <= max_plates
// 标本数 <= max_samples
// 盒数 × seconds_per_box_load + 标本数 × seconds_per_cherrypick < total_time_available
//   (表达式取整数值,严格小于写作 <= total_time_available - 1)
// ==========================================

use crate::config::SamplerConfig;
use crate::engine::model_builder::SelectionVariables;
use crate::solver::model::{Assignment, Comparison, LinearExpr, LinearModel};
use serde::{Deserialize, Serialize};

// ==========================================
// CapacityUsage - 某一解的实际占用
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityUsage {
    pub specimens: i64,
    pub priority_specimens: i64,
    pub boxes: i64,
    pub plates: i64,
    pub total_time_seconds: i64,
}

// ==========================================
// CapacityConstraintSet
// ==========================================
#[derive(Debug, Clone)]
pub struct CapacityConstraintSet {
    seconds_per_cherrypick: i64,
    seconds_per_box_load: i64,
    total_time_available: i64,
    max_samples: i64,
    max_boxes: i64,
    max_plates: i64,
}

impl CapacityConstraintSet {
    pub fn from_config(config: &SamplerConfig) -> Self {
        Self {
            seconds_per_cherrypick: config.seconds_per_cherrypick,
            seconds_per_box_load: config.seconds_per_box_load,
            total_time_available: config.total_time_available,
            max_samples: config.max_samples,
            max_boxes: config.max_boxes,
            max_plates: config.max_plates,
        }
    }

    /// 总耗时表达式 (秒)
    pub fn total_time(&self, selection: &SelectionVariables) -> LinearExpr {
        selection.total_boxes() * self.seconds_per_box_load as f64
            + selection.total_specimens() * self.seconds_per_cherrypick as f64
    }

    /// 向模型添加全部容量约束
    pub fn apply(&self, model: &mut LinearModel, selection: &SelectionVariables) {
        model.add_constraint(
            "total_time_below_available",
            self.total_time(selection),
            Comparison::LessOrEqual,
            (self.total_time_available - 1) as f64,
        );
        model.add_constraint(
            "max_boxes",
            selection.total_boxes(),
            Comparison::LessOrEqual,
            self.max_boxes as f64,
        );
        model.add_constraint(
            "max_plates",
            selection.total_plates(),
            Comparison::LessOrEqual,
            self.max_plates as f64,
        );
        model.add_constraint(
            "max_samples",
            selection.total_specimens(),
            Comparison::LessOrEqual,
            self.max_samples as f64,
        );
    }

    /// 统计某一解的容量占用
    pub fn usage(&self, selection: &SelectionVariables, assignment: &Assignment) -> CapacityUsage {
        let count = |expr: LinearExpr| expr.evaluate(assignment).round() as i64;
        CapacityUsage {
            specimens: count(selection.total_specimens()),
            priority_specimens: count(selection.total_priority()),
            boxes: count(selection.total_boxes()),
            plates: count(selection.total_plates()),
            total_time_seconds: count(self.total_time(selection)),
        }
    }

    /// 占用是否满足全部容量约束
    pub fn admits(&self, usage: &CapacityUsage) -> bool {
        usage.boxes <= self.max_boxes
            && usage.plates <= self.max_plates
            && usage.specimens <= self.max_samples
            && usage.total_time_seconds < self.total_time_available
    }
}
