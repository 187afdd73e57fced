// ==========================================
// 每日标本挑选系统 - 领域类型定义
// ==========================================
// 职责: 求解状态、平板选择规则等枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 求解状态 (Solve Status)
// ==========================================
// INFEASIBLE 与 UNKNOWN 必须区分,不能与"未选中任何标本"混淆
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    Optimal,    // 已证明最优
    Feasible,   // 找到可行解,未证明最优
    Infeasible, // 约束无解
    Unknown,    // 时间预算耗尽,未找到解
}

impl SolveStatus {
    /// 是否带有可用的变量取值
    pub fn has_solution(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "OPTIMAL"),
            SolveStatus::Feasible => write!(f, "FEASIBLE"),
            SolveStatus::Infeasible => write!(f, "INFEASIBLE"),
            SolveStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ==========================================
// 平板选择规则 (Plate Selection Rule)
// ==========================================
// WholePlate: 平板整板挑选,选中任一标本即选中整板 (双向约束)
// Optional:   平板指示变量只向下强制 (plate => 板上全部标本)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlateSelectionRule {
    #[default]
    WholePlate,
    Optional,
}

impl fmt::Display for PlateSelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlateSelectionRule::WholePlate => write!(f, "whole_plate"),
            PlateSelectionRule::Optional => write!(f, "optional"),
        }
    }
}
