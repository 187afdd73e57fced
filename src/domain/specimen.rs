// ==========================================
// 每日标本挑选系统 - 标本/存储盒/平板领域模型
// ==========================================
// 职责: 候选标本池及其物理分组 (盒、板)
// 红线: 所有实体每次求解重新构建,不跨调用共享
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// Specimen - 候选标本
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specimen {
    pub row_id: usize,    // 行标识 (候选表中的行号)
    pub box_id: String,   // 存储盒
    pub plate_id: String, // 平板
    pub area: String,     // 地域
    pub priority: bool,   // 优先标本
}

impl Specimen {
    pub fn new(
        row_id: usize,
        box_id: impl Into<String>,
        plate_id: impl Into<String>,
        area: impl Into<String>,
        priority: bool,
    ) -> Self {
        Self {
            row_id,
            box_id: box_id.into(),
            plate_id: plate_id.into(),
            area: area.into(),
            priority,
        }
    }
}

// ==========================================
// StorageBox - 存储盒
// ==========================================
// 打开一个盒子有固定的装载时间
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageBox {
    pub box_id: String,
    pub specimen_rows: Vec<usize>, // 盒内标本在候选列表中的位置
}

// ==========================================
// Plate - 平板
// ==========================================
// 整板挑选的单位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plate {
    pub plate_id: String,
    pub specimen_rows: Vec<usize>,
}

// ==========================================
// Inventory - 候选池的盒/板分组
// ==========================================
// 盒、板按首次出现的顺序排列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    pub boxes: Vec<StorageBox>,
    pub plates: Vec<Plate>,
}

impl Inventory {
    /// 按盒、板分组候选标本
    ///
    /// # 参数
    /// - `specimens`: 候选标本列表
    ///
    /// # 返回
    /// 分组结果,`specimen_rows` 为标本在 `specimens` 中的下标
    pub fn from_specimens(specimens: &[Specimen]) -> Self {
        let mut boxes: Vec<StorageBox> = Vec::new();
        let mut plates: Vec<Plate> = Vec::new();
        let mut box_index: HashMap<&str, usize> = HashMap::new();
        let mut plate_index: HashMap<&str, usize> = HashMap::new();

        for (pos, specimen) in specimens.iter().enumerate() {
            let b = *box_index.entry(specimen.box_id.as_str()).or_insert_with(|| {
                boxes.push(StorageBox {
                    box_id: specimen.box_id.clone(),
                    specimen_rows: Vec::new(),
                });
                boxes.len() - 1
            });
            boxes[b].specimen_rows.push(pos);

            let p = *plate_index
                .entry(specimen.plate_id.as_str())
                .or_insert_with(|| {
                    plates.push(Plate {
                        plate_id: specimen.plate_id.clone(),
                        specimen_rows: Vec::new(),
                    });
                    plates.len() - 1
                });
            plates[p].specimen_rows.push(pos);
        }

        Self { boxes, plates }
    }

    /// 盒ID -> 分组下标
    pub fn box_positions(&self) -> HashMap<&str, usize> {
        self.boxes
            .iter()
            .enumerate()
            .map(|(i, b)| (b.box_id.as_str(), i))
            .collect()
    }

    /// 板ID -> 分组下标
    pub fn plate_positions(&self) -> HashMap<&str, usize> {
        self.plates
            .iter()
            .enumerate()
            .map(|(i, p)| (p.plate_id.as_str(), i))
            .collect()
    }
}

// ==========================================
// CandidateTable - 候选表 (含原始列)
// ==========================================
// 输出时保留全部原始列,并追加 to_pick 列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateTable {
    pub headers: Vec<String>,
    pub raw_rows: Vec<Vec<String>>,
    pub specimens: Vec<Specimen>,
}
