// ==========================================
// 每日标本挑选系统 - 地域领域模型
// ==========================================
// 职责: 历史计数、病例数、地域汇总
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// AreaHistory - 上一统计窗口内的地域计数
// ==========================================
// 对应历史表列: area, n
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaHistory {
    pub area: String,
    pub n: u64,
}

impl AreaHistory {
    pub fn new(area: impl Into<String>, n: u64) -> Self {
        Self {
            area: area.into(),
            n,
        }
    }
}

// ==========================================
// AreaCases - 地域流行病学病例数
// ==========================================
// 对应病例表列: area, cases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaCases {
    pub area: String,
    pub cases: u64,
}

impl AreaCases {
    pub fn new(area: impl Into<String>, cases: u64) -> Self {
        Self {
            area: area.into(),
            cases,
        }
    }
}

// ==========================================
// Area - 参与均衡核算的地域
// ==========================================
// 病例表中出现的每个地域各一条;占比之和为 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub area: String,
    pub historical_count: u64, // 历史表缺失时为 0
    pub case_count: u64,
    pub proportion: f64, // case_count / 病例总数
    pub desired: i64,    // 目标窗口期末期望计数
}
