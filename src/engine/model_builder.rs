// ==========================================
// 每日标本挑选系统 - 决策变量构建引擎
// ==========================================
// 职责: 每个标本/盒/板一个布尔变量 + 层级传导约束
// 输入: 候选标本 + 病例表 (用于地域完整性校验)
// 输出: SelectionVariables (供均衡估计、目标、容量约束复用)
// ==========================================
// 传导规则:
// - 盒 >= 标本: 盒内任一标本被选,盒即被打开
// - 标本 >= 板: 板被选中时板上全部标本强制选中
// - 板 >= 标本: 仅 WholePlate 规则,选中任一标本即整板选中
// ==========================================

use crate::domain::area::AreaCases;
use crate::domain::specimen::{Inventory, Plate, Specimen, StorageBox};
use crate::domain::types::PlateSelectionRule;
use crate::engine::error::{PickingError, PickingResult};
use crate::solver::model::{Comparison, LinearExpr, LinearModel, VarId};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

// ==========================================
// SelectionVariables - 选择决策变量
// ==========================================
#[derive(Debug, Clone)]
pub struct SelectionVariables {
    /// 与候选标本一一对应 (按输入顺序)
    pub specimen_picked: Vec<VarId>,
    pub box_picked: Vec<(StorageBox, VarId)>,
    pub plate_picked: Vec<(Plate, VarId)>,
    pub priority_picked: Vec<VarId>,
    /// 地域 -> 该地域标本的选择变量
    pub picked_by_area: HashMap<String, Vec<VarId>>,
}

impl SelectionVariables {
    pub fn total_specimens(&self) -> LinearExpr {
        LinearExpr::sum(self.specimen_picked.iter().copied())
    }

    pub fn total_priority(&self) -> LinearExpr {
        LinearExpr::sum(self.priority_picked.iter().copied())
    }

    pub fn total_boxes(&self) -> LinearExpr {
        LinearExpr::sum(self.box_picked.iter().map(|(_, v)| *v))
    }

    pub fn total_plates(&self) -> LinearExpr {
        LinearExpr::sum(self.plate_picked.iter().map(|(_, v)| *v))
    }

    /// 各地域今日新增选择数 (表达式)
    pub fn total_by_area(&self) -> HashMap<String, LinearExpr> {
        self.picked_by_area
            .iter()
            .map(|(area, vars)| (area.clone(), LinearExpr::sum(vars.iter().copied())))
            .collect()
    }
}

// ==========================================
// ModelBuilder - 决策变量构建引擎
// ==========================================
pub struct ModelBuilder {
    plate_rule: PlateSelectionRule,
}

impl ModelBuilder {
    /// 构造函数
    ///
    /// # 参数
    /// - `plate_rule`: 平板传导规则
    pub fn new(plate_rule: PlateSelectionRule) -> Self {
        Self { plate_rule }
    }

    /// 声明决策变量并添加传导约束
    ///
    /// # 参数
    /// - `model`: 待填充的模型
    /// - `specimens`: 候选标本
    /// - `cases`: 病例表,标本引用的地域必须出现在其中
    ///
    /// # 返回
    /// - Ok(SelectionVariables)
    /// - Err(MissingArea): 标本地域不在病例表
    /// - Err(DuplicateSpecimen): 行标识重复
    #[instrument(skip_all, fields(specimens = specimens.len(), plate_rule = %self.plate_rule))]
    pub fn build(
        &self,
        model: &mut LinearModel,
        specimens: &[Specimen],
        cases: &[AreaCases],
    ) -> PickingResult<SelectionVariables> {
        let known_areas: HashSet<&str> = cases.iter().map(|c| c.area.as_str()).collect();
        let mut seen_rows: HashSet<usize> = HashSet::with_capacity(specimens.len());
        for specimen in specimens {
            if !seen_rows.insert(specimen.row_id) {
                return Err(PickingError::DuplicateSpecimen(specimen.row_id));
            }
            if !known_areas.contains(specimen.area.as_str()) {
                return Err(PickingError::MissingArea {
                    area: specimen.area.clone(),
                    row_id: specimen.row_id,
                });
            }
        }

        let inventory = Inventory::from_specimens(specimens);
        let box_positions = inventory.box_positions();
        let plate_positions = inventory.plate_positions();

        let box_vars: Vec<VarId> = inventory
            .boxes
            .iter()
            .map(|b| model.add_binary(format!("box_{}_is_picked", b.box_id)))
            .collect();
        let plate_vars: Vec<VarId> = inventory
            .plates
            .iter()
            .map(|p| model.add_binary(format!("plate_{}_is_picked", p.plate_id)))
            .collect();

        let mut specimen_picked = Vec::with_capacity(specimens.len());
        let mut priority_picked = Vec::new();
        let mut picked_by_area: HashMap<String, Vec<VarId>> = HashMap::new();

        for specimen in specimens {
            let row = specimen.row_id;
            let picked = model.add_binary(format!("sample_{}_is_picked", row));
            let box_var = box_vars[box_positions[specimen.box_id.as_str()]];
            let plate_var = plate_vars[plate_positions[specimen.plate_id.as_str()]];

            // 盒 >= 标本
            model.add_constraint(
                format!("box_{}_opened_by_sample_{}", specimen.box_id, row),
                LinearExpr::term(box_var, 1.0) - LinearExpr::term(picked, 1.0),
                Comparison::GreaterOrEqual,
                0.0,
            );

            // 标本 >= 板
            model.add_constraint(
                format!("plate_{}_forces_sample_{}", specimen.plate_id, row),
                LinearExpr::term(picked, 1.0) - LinearExpr::term(plate_var, 1.0),
                Comparison::GreaterOrEqual,
                0.0,
            );

            // 板 >= 标本 (整板挑选)
            if self.plate_rule == PlateSelectionRule::WholePlate {
                model.add_constraint(
                    format!("sample_{}_pulls_plate_{}", row, specimen.plate_id),
                    LinearExpr::term(plate_var, 1.0) - LinearExpr::term(picked, 1.0),
                    Comparison::GreaterOrEqual,
                    0.0,
                );
            }

            if specimen.priority {
                priority_picked.push(picked);
            }
            picked_by_area
                .entry(specimen.area.clone())
                .or_default()
                .push(picked);
            specimen_picked.push(picked);
        }

        debug!(
            boxes = inventory.boxes.len(),
            plates = inventory.plates.len(),
            priority = priority_picked.len(),
            areas = picked_by_area.len(),
            "决策变量构建完成"
        );

        Ok(SelectionVariables {
            specimen_picked,
            box_picked: inventory.boxes.into_iter().zip(box_vars).collect(),
            plate_picked: inventory.plates.into_iter().zip(plate_vars).collect(),
            priority_picked,
            picked_by_area,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cases() -> Vec<AreaCases> {
        vec![AreaCases::new("London", 10), AreaCases::new("Kent", 5)]
    }

    #[test]
    fn test_variables_per_entity() {
        let specimens = vec![
            Specimen::new(0, "box1", "plateA", "London", false),
            Specimen::new(1, "box1", "plateB", "Kent", true),
            Specimen::new(2, "box2", "plateB", "Kent", false),
        ];
        let mut model = LinearModel::new();
        let vars = ModelBuilder::new(PlateSelectionRule::WholePlate)
            .build(&mut model, &specimens, &cases())
            .unwrap();

        assert_eq!(vars.specimen_picked.len(), 3);
        assert_eq!(vars.box_picked.len(), 2);
        assert_eq!(vars.plate_picked.len(), 2);
        assert_eq!(vars.priority_picked, vec![vars.specimen_picked[1]]);
        assert_eq!(vars.picked_by_area["Kent"].len(), 2);
        // 2 盒 + 2 板 + 3 标本
        assert_eq!(model.variables().len(), 7);
        // 每个标本 3 条约束
        assert_eq!(model.constraints().len(), 9);
    }

    #[test]
    fn test_optional_plate_rule_omits_upward_constraint() {
        let specimens = vec![Specimen::new(0, "box1", "plateA", "London", false)];
        let mut model = LinearModel::new();
        ModelBuilder::new(PlateSelectionRule::Optional)
            .build(&mut model, &specimens, &cases())
            .unwrap();
        assert_eq!(model.constraints().len(), 2);
    }

    #[test]
    fn test_missing_area_fails_fast() {
        let specimens = vec![Specimen::new(4, "box1", "plateA", "Cardiff", false)];
        let mut model = LinearModel::new();
        let err = ModelBuilder::new(PlateSelectionRule::WholePlate)
            .build(&mut model, &specimens, &cases())
            .unwrap_err();
        assert!(matches!(
            err,
            PickingError::MissingArea { ref area, row_id: 4 } if area == "Cardiff"
        ));
    }

    #[test]
    fn test_duplicate_row_id_rejected() {
        let specimens = vec![
            Specimen::new(1, "box1", "plateA", "London", false),
            Specimen::new(1, "box2", "plateB", "Kent", false),
        ];
        let mut model = LinearModel::new();
        let err = ModelBuilder::new(PlateSelectionRule::WholePlate)
            .build(&mut model, &specimens, &cases())
            .unwrap_err();
        assert!(matches!(err, PickingError::DuplicateSpecimen(1)));
    }
}
