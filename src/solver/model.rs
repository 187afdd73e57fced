// ==========================================
// 每日标本挑选系统 - 线性模型 (与求解器无关)
// ==========================================
// 职责: 声明布尔/整数变量、线性约束、最小化目标
// 说明: 具体求解后端通过 SolverBackend 接入,可替换
// ==========================================

use crate::domain::types::SolveStatus;
use std::ops::{Add, Mul, Sub};

/// 常量约束比较容差 (模型系数均为整数)
const EPS: f64 = 1e-9;

// ==========================================
// VarId - 变量句柄
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// 变量取值域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarDomain {
    Binary,
    Integer { lower: i64, upper: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDef {
    pub name: String,
    pub domain: VarDomain,
}

// ==========================================
// LinearExpr - 稀疏线性表达式
// ==========================================
// Σ coef·var + constant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constant(value: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    pub fn term(var: VarId, coef: f64) -> Self {
        let mut expr = Self::new();
        expr.add_term(var, coef);
        expr
    }

    /// 变量求和 (系数均为 1)
    pub fn sum<I: IntoIterator<Item = VarId>>(vars: I) -> Self {
        let mut expr = Self::new();
        for var in vars {
            expr.add_term(var, 1.0);
        }
        expr
    }

    pub fn add_term(&mut self, var: VarId, coef: f64) {
        if coef != 0.0 {
            self.terms.push((var, coef));
        }
    }

    pub fn add_constant(&mut self, value: f64) {
        self.constant += value;
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn constant_part(&self) -> f64 {
        self.constant
    }

    /// 是否不含变量
    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// 在给定取值下求值
    pub fn evaluate(&self, assignment: &Assignment) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coef)| coef * assignment.value(var))
            .sum::<f64>()
            + self.constant
    }
}

impl Add for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: LinearExpr) -> LinearExpr {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl Sub for LinearExpr {
    type Output = LinearExpr;

    fn sub(self, rhs: LinearExpr) -> LinearExpr {
        self + rhs * -1.0
    }
}

impl Mul<f64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(self, k: f64) -> LinearExpr {
        if k == 0.0 {
            return LinearExpr::new();
        }
        LinearExpr {
            terms: self.terms.into_iter().map(|(v, c)| (v, c * k)).collect(),
            constant: self.constant * k,
        }
    }
}

// ==========================================
// LinearConstraint - 线性约束
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    LessOrEqual,
    GreaterOrEqual,
    Equal,
}

impl Comparison {
    fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::LessOrEqual => lhs <= rhs + EPS,
            Comparison::GreaterOrEqual => lhs + EPS >= rhs,
            Comparison::Equal => (lhs - rhs).abs() <= EPS,
        }
    }
}

/// 规范形式: Σ coef·var (cmp) rhs,表达式常数项已移到右侧
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub expr: LinearExpr,
    pub comparison: Comparison,
    pub rhs: f64,
}

impl LinearConstraint {
    /// 在给定取值下是否满足
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.comparison
            .holds(self.expr.evaluate(assignment), self.rhs)
    }
}

// ==========================================
// LinearModel - 线性整数规划模型
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct LinearModel {
    variables: Vec<VarDef>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
    violated_constants: Vec<String>, // 不含变量且不成立的约束
}

impl LinearModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// 声明布尔变量
    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.push_variable(name.into(), VarDomain::Binary)
    }

    /// 声明有界整数变量
    pub fn add_integer(&mut self, name: impl Into<String>, lower: i64, upper: i64) -> VarId {
        self.push_variable(name.into(), VarDomain::Integer { lower, upper })
    }

    fn push_variable(&mut self, name: String, domain: VarDomain) -> VarId {
        self.variables.push(VarDef { name, domain });
        VarId(self.variables.len() - 1)
    }

    /// 添加约束 `expr (cmp) rhs`
    ///
    /// 不含变量的约束在此处直接判定,不成立时模型标记为无解
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        expr: LinearExpr,
        comparison: Comparison,
        rhs: f64,
    ) {
        let name = name.into();
        let rhs = rhs - expr.constant_part();
        let expr = LinearExpr {
            terms: expr.terms,
            constant: 0.0,
        };

        if expr.is_constant() {
            if !comparison.holds(0.0, rhs) {
                self.violated_constants.push(name);
            }
            return;
        }

        self.constraints.push(LinearConstraint {
            name,
            expr,
            comparison,
            rhs,
        });
    }

    /// 设置最小化目标
    pub fn minimise(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    pub fn variables(&self) -> &[VarDef] {
        &self.variables
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn is_trivially_infeasible(&self) -> bool {
        !self.violated_constants.is_empty()
    }

    pub fn violated_constraints(&self) -> &[String] {
        &self.violated_constants
    }
}

// ==========================================
// Assignment - 变量取值
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    values: Vec<f64>,
}

impl Assignment {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// 原始取值;越界句柄视为 0
    pub fn value(&self, var: VarId) -> f64 {
        self.values.get(var.index()).copied().unwrap_or(0.0)
    }

    /// 取整后的整数值
    pub fn int_value(&self, var: VarId) -> i64 {
        self.value(var).round() as i64
    }

    /// 布尔变量是否为 1
    pub fn is_set(&self, var: VarId) -> bool {
        self.value(var) >= 0.5
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ==========================================
// SolveOutcome - 求解结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub assignment: Option<Assignment>,
    pub objective_value: Option<f64>,
}

impl SolveOutcome {
    pub fn solved(status: SolveStatus, assignment: Assignment, objective_value: f64) -> Self {
        Self {
            status,
            assignment: Some(assignment),
            objective_value: Some(objective_value),
        }
    }

    pub fn infeasible() -> Self {
        Self {
            status: SolveStatus::Infeasible,
            assignment: None,
            objective_value: None,
        }
    }

    pub fn unknown() -> Self {
        Self {
            status: SolveStatus::Unknown,
            assignment: None,
            objective_value: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_part_moves_to_rhs() {
        let mut model = LinearModel::new();
        let x = model.add_binary("x");
        let mut expr = LinearExpr::term(x, 2.0);
        expr.add_constant(3.0);
        model.add_constraint("c", expr, Comparison::LessOrEqual, 4.0);

        let c = &model.constraints()[0];
        assert_eq!(c.rhs, 1.0);
        assert_eq!(c.expr.constant_part(), 0.0);
        assert!(c.is_satisfied(&Assignment::new(vec![0.0])));
        assert!(!c.is_satisfied(&Assignment::new(vec![1.0])));
    }

    #[test]
    fn test_constant_constraint_is_checked_eagerly() {
        let mut model = LinearModel::new();
        model.add_constraint("ok", LinearExpr::constant(0.0), Comparison::LessOrEqual, 5.0);
        assert!(!model.is_trivially_infeasible());
        assert!(model.constraints().is_empty());

        model.add_constraint("bad", LinearExpr::constant(0.0), Comparison::LessOrEqual, -1.0);
        assert!(model.is_trivially_infeasible());
        assert_eq!(model.violated_constraints(), &["bad".to_string()]);
    }

    #[test]
    fn test_expression_arithmetic() {
        let mut model = LinearModel::new();
        let x = model.add_binary("x");
        let y = model.add_integer("y", 0, 10);

        let expr = LinearExpr::sum([x, y]) * 2.0 - LinearExpr::constant(1.0);
        let assignment = Assignment::new(vec![1.0, 4.0]);
        assert_eq!(expr.evaluate(&assignment), 9.0);
        assert_eq!(assignment.int_value(y), 4);
        assert!(assignment.is_set(x));

        let zeroed = LinearExpr::term(x, 5.0) * 0.0;
        assert!(zeroed.is_constant());
    }
}
