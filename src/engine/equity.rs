// ==========================================
// 每日标本挑选系统 - 地域均衡估计引擎
// ==========================================
// 职责: 计算各地域期望目标 (desired) 与期末预测计数 (projected)
// 输入: 历史计数 + 病例数 + 各地域新增选择表达式
// 输出: EquityEstimate
// ==========================================
// desired[a]   = floor(target/history × 历史总数 × cases[a]/病例总数)
// projected[a] = 历史计数[a] + 今日新增选择[a]
// 病例表中的每个地域都参与核算,即使今日无候选标本
// ==========================================

use crate::config::SamplerConfig;
use crate::domain::area::{Area, AreaCases, AreaHistory};
use crate::engine::error::{PickingError, PickingResult};
use crate::solver::model::LinearExpr;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

// ==========================================
// AreaProjection - 单地域估计
// ==========================================
#[derive(Debug, Clone)]
pub struct AreaProjection {
    pub area: Area,
    /// 历史计数 + 今日新增选择
    pub projected: LinearExpr,
}

impl AreaProjection {
    pub fn desired(&self) -> i64 {
        self.area.desired
    }

    pub fn historical(&self) -> i64 {
        self.area.historical_count as i64
    }
}

// ==========================================
// EquityEstimate - 全部地域估计
// ==========================================
#[derive(Debug, Clone)]
pub struct EquityEstimate {
    pub total_historical: u64,
    pub total_cases: u64,
    /// 按病例表顺序
    pub areas: Vec<AreaProjection>,
}

impl EquityEstimate {
    pub fn total_desired(&self) -> i64 {
        self.areas.iter().map(|a| a.desired()).sum()
    }
}

// ==========================================
// GeographicEquityEstimator
// ==========================================
pub struct GeographicEquityEstimator {
    history_window_days: u32,
    target_window_days: u32,
}

impl GeographicEquityEstimator {
    pub fn new(history_window_days: u32, target_window_days: u32) -> Self {
        Self {
            history_window_days,
            target_window_days,
        }
    }

    pub fn from_config(config: &SamplerConfig) -> Self {
        Self::new(config.history_window_days, config.target_window_days)
    }

    /// 计算单地域期望目标
    ///
    /// 整数运算,避免浮点取整误差
    pub fn desired_target(&self, total_historical: u64, area_cases: u64, total_cases: u64) -> i64 {
        if total_cases == 0 || self.history_window_days == 0 {
            return 0;
        }
        let numerator =
            self.target_window_days as u128 * total_historical as u128 * area_cases as u128;
        let denominator = self.history_window_days as u128 * total_cases as u128;
        (numerator / denominator).min(i64::MAX as u128) as i64
    }

    /// 估计各地域目标与预测值
    ///
    /// # 参数
    /// - `history`: 历史表 (area, n)
    /// - `cases`: 病例表 (area, cases)
    /// - `picked_by_area`: 各地域今日新增选择表达式
    ///
    /// # 返回
    /// - Err(DuplicateArea): 任一表中地域重复
    /// - Err(NoCaseCounts): 病例总数为 0
    pub fn estimate(
        &self,
        history: &[AreaHistory],
        cases: &[AreaCases],
        picked_by_area: &HashMap<String, LinearExpr>,
    ) -> PickingResult<EquityEstimate> {
        let mut historical_by_area: HashMap<&str, u64> = HashMap::new();
        for row in history {
            if historical_by_area.insert(row.area.as_str(), row.n).is_some() {
                return Err(PickingError::DuplicateArea {
                    table: "history",
                    area: row.area.clone(),
                });
            }
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for row in cases {
            if !seen.insert(row.area.as_str()) {
                return Err(PickingError::DuplicateArea {
                    table: "cases",
                    area: row.area.clone(),
                });
            }
        }

        let total_cases: u64 = cases.iter().map(|c| c.cases).sum();
        if total_cases == 0 {
            return Err(PickingError::NoCaseCounts);
        }

        let total_historical: u64 = history.iter().map(|h| h.n).sum();
        info!(total_historical, "历史窗口内总计数");

        for row in history {
            if !seen.contains(row.area.as_str()) {
                warn!(area = %row.area, n = row.n, "历史表地域不在病例表中,仅计入历史总数");
            }
        }

        let areas = cases
            .iter()
            .map(|row| {
                let proportion = row.cases as f64 / total_cases as f64;
                let historical_count = historical_by_area
                    .get(row.area.as_str())
                    .copied()
                    .unwrap_or(0);
                let desired = self.desired_target(total_historical, row.cases, total_cases);
                debug!(area = %row.area, proportion, desired, "地域占比");

                let mut projected = LinearExpr::constant(historical_count as f64);
                if let Some(picked) = picked_by_area.get(&row.area) {
                    projected = projected + picked.clone();
                }

                AreaProjection {
                    area: Area {
                        area: row.area.clone(),
                        historical_count,
                        case_count: row.cases,
                        proportion,
                        desired,
                    },
                    projected,
                }
            })
            .collect();

        Ok(EquityEstimate {
            total_historical,
            total_cases,
            areas,
        })
    }
}
