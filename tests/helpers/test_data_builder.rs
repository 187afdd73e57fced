// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use even_sampling::{AreaCases, AreaHistory, PlateSelectionRule, SamplerConfig, Specimen};

// ==========================================
// SamplerConfig 构建器
// ==========================================
// 默认值取自参考场景
pub struct ConfigBuilder {
    config: SamplerConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SamplerConfig {
                seconds_per_cherrypick: 10,
                seconds_per_box_load: 60 * 20,
                total_time_available: 60 * 20 * 1_000_000_000,
                area_loss_weighting: 2.0,
                maximise_samples_weighting: 1.0,
                priority_sample_weighting: 10.0,
                max_samples: 10,
                max_boxes: 2,
                max_plates: 10,
                max_search_time: 10.0,
                history_window_days: 6,
                target_window_days: 7,
                plate_selection: PlateSelectionRule::WholePlate,
            },
        }
    }

    pub fn max_boxes(mut self, value: i64) -> Self {
        self.config.max_boxes = value;
        self
    }

    pub fn max_plates(mut self, value: i64) -> Self {
        self.config.max_plates = value;
        self
    }

    pub fn max_samples(mut self, value: i64) -> Self {
        self.config.max_samples = value;
        self
    }

    pub fn total_time_available(mut self, value: i64) -> Self {
        self.config.total_time_available = value;
        self
    }

    pub fn seconds_per_box_load(mut self, value: i64) -> Self {
        self.config.seconds_per_box_load = value;
        self
    }

    pub fn seconds_per_cherrypick(mut self, value: i64) -> Self {
        self.config.seconds_per_cherrypick = value;
        self
    }

    pub fn area_loss_weighting(mut self, value: f64) -> Self {
        self.config.area_loss_weighting = value;
        self
    }

    pub fn maximise_samples_weighting(mut self, value: f64) -> Self {
        self.config.maximise_samples_weighting = value;
        self
    }

    pub fn priority_sample_weighting(mut self, value: f64) -> Self {
        self.config.priority_sample_weighting = value;
        self
    }

    pub fn plate_selection(mut self, rule: PlateSelectionRule) -> Self {
        self.config.plate_selection = rule;
        self
    }

    pub fn build(self) -> SamplerConfig {
        self.config
    }
}

// ==========================================
// 参考场景
// ==========================================
// 4 个地域,历史 {25, 25, 25, 0},病例 {25, 5, 25, 25}

pub fn reference_history() -> Vec<AreaHistory> {
    vec![
        AreaHistory::new("London", 25),
        AreaHistory::new("Birmingham", 25),
        AreaHistory::new("Cardiff", 25),
        AreaHistory::new("Kent", 0),
    ]
}

pub fn reference_cases() -> Vec<AreaCases> {
    vec![
        AreaCases::new("London", 25),
        AreaCases::new("Birmingham", 5),
        AreaCases::new("Cardiff", 25),
        AreaCases::new("Kent", 25),
    ]
}

/// 9 个候选标本,6 个盒
pub fn reference_candidates() -> Vec<Specimen> {
    vec![
        Specimen::new(0, "boxC5", "plate33B", "Cardiff", false),
        Specimen::new(1, "boxC2", "plate123A", "Cardiff", false),
        Specimen::new(2, "box1", "plate123A", "London", false),
        Specimen::new(3, "box1", "plate1413A", "London", false),
        Specimen::new(4, "box1", "plate15B", "Kent", false),
        Specimen::new(5, "box2", "plate26A", "London", false),
        Specimen::new(6, "box2b", "plate25B", "London", false),
        Specimen::new(7, "box3", "plate23C", "Kent", false),
        Specimen::new(8, "box3", "plate22D", "Birmingham", true),
    ]
}

pub const REFERENCE_HISTORY_CSV: &str = "area,n\nLondon,25\nBirmingham,25\nCardiff,25\nKent,0\n";

pub const REFERENCE_CASES_CSV: &str = "area,cases\nLondon,25\nBirmingham,5\nCardiff,25\nKent,25\n";

pub const REFERENCE_CANDIDATES_CSV: &str = "box,plate,coord,area,priority
boxC5,plate33B,A5,Cardiff,0
boxC2,plate123A,A1,Cardiff,0
box1,plate123A,A2,London,0
box1,plate1413A,A3,London,0
box1,plate15B,A4,Kent,0
box2,plate26A,A1,London,0
box2b,plate25B,A1,London,0
box3,plate23C,A1,Kent,0
box3,plate22D,A1,Birmingham,1
";
