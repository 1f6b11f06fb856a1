//! Linear Programming (LP) solver abstraction layer
//!
//! This module provides a small modelling layer over the MIP backends used by
//! the planner, so the formulation does not depend on a specific solver
//! implementation like coin_cbc or Gurobi.
//!
//! # Type Safety with Branded Types
//!
//! `VariableId`, `LinearExpression`, `Constraint` and `LPModelBuilder` carry
//! a `Brand` type parameter, so variables from one builder cannot be used
//! with another. The brand is a zero-sized phantom type.
//!
//! ```rust,no_run
//! use prodplan::lp_solver::{Constraint, LPModelBuilder, OptimizationSense, VariableType};
//!
//! struct Workshop;
//!
//! let mut builder = LPModelBuilder::<Workshop>::new();
//! let x = builder.add_variable("x", VariableType::Integer, 0.0, f64::INFINITY);
//! let y = builder.add_variable("y", VariableType::Integer, 0.0, f64::INFINITY);
//!
//! builder.add_constraint(Constraint::le("labour", 2.0 * x + 1.0 * y, 100.0));
//! builder.set_objective("profit", 40.0 * x + 30.0 * y, OptimizationSense::Maximize);
//! let _solution = builder.solve();
//! ```
//!
//! # Solver Selection
//!
//! The solver backend can be selected via the `PRODPLAN_LP_SOLVER` environment variable:
//! - `"gurobi"` - Use Gurobi (requires `gurobi` feature)
//! - `"coin_cbc"` or `"cbc"` - Use COIN-OR CBC (requires `coin_cbc` feature)
//!
//! If not set, the solver defaults to Gurobi if available, otherwise CBC.

use anyhow::Result;
use itertools::Itertools;
use std::env;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Environment variable naming the solver backend.
pub const SOLVER_ENV_VAR: &str = "PRODPLAN_LP_SOLVER";

/// Variable types supported by LP solvers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    /// Continuous variable (can take any real value)
    Continuous,
    /// Integer variable (can only take integer values)
    Integer,
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableType::Continuous => write!(f, "Continuous"),
            VariableType::Integer => write!(f, "Integer"),
        }
    }
}

/// Optimization direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationSense {
    /// Minimize the objective function
    Minimize,
    /// Maximize the objective function
    Maximize,
}

/// Status of the optimization process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationStatus {
    /// Optimal solution found
    Optimal,
    /// Feasible solution found, but not necessarily optimal
    Feasible,
    /// Problem is infeasible (no solution exists)
    Infeasible,
    /// Problem is unbounded
    Unbounded,
    /// Problem is infeasible or unbounded
    InfeasibleOrUnbounded,
    /// Other status (solver-specific)
    Other(&'static str),
}

impl OptimizationStatus {
    pub fn is_optimal(&self) -> bool {
        *self == OptimizationStatus::Optimal
    }
}

impl fmt::Display for OptimizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationStatus::Optimal => write!(f, "Optimal"),
            OptimizationStatus::Feasible => write!(f, "Feasible"),
            OptimizationStatus::Infeasible => write!(f, "Infeasible"),
            OptimizationStatus::Unbounded => write!(f, "Unbounded"),
            OptimizationStatus::InfeasibleOrUnbounded => write!(f, "Infeasible or Unbounded"),
            OptimizationStatus::Other(reason) => write!(f, "Undefined ({})", reason),
        }
    }
}

/// Available LP solver backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SolverBackend {
    #[cfg(feature = "gurobi")]
    /// Gurobi commercial solver
    Gurobi,
    #[cfg(feature = "coin_cbc")]
    /// Coin CBC open-source solver
    CoinCbc,
}

impl SolverBackend {
    /// Get the solver backend from environment variable or use fallback logic
    fn from_env_or_default() -> Result<Self> {
        match env::var(SOLVER_ENV_VAR) {
            Ok(solver_name) => Self::from_name(&solver_name),
            Err(_) => Self::default_backend(),
        }
    }

    fn from_name(solver_name: &str) -> Result<Self> {
        match solver_name.to_lowercase().as_str() {
            "gurobi" => {
                #[cfg(feature = "gurobi")]
                return Ok(SolverBackend::Gurobi);
                #[cfg(not(feature = "gurobi"))]
                return Err(anyhow::anyhow!(
                    "Gurobi solver requested via {} but gurobi feature not enabled",
                    SOLVER_ENV_VAR
                ));
            }
            "coin_cbc" | "coin-cbc" | "cbc" => {
                #[cfg(feature = "coin_cbc")]
                return Ok(SolverBackend::CoinCbc);
                #[cfg(not(feature = "coin_cbc"))]
                return Err(anyhow::anyhow!(
                    "Coin CBC solver requested via {} but coin_cbc feature not enabled",
                    SOLVER_ENV_VAR
                ));
            }
            _ => Err(anyhow::anyhow!(
                "Invalid solver '{}' in {}. Valid options: gurobi, coin_cbc",
                solver_name,
                SOLVER_ENV_VAR
            )),
        }
    }

    fn default_backend() -> Result<Self> {
        // Prefer gurobi if available, then coin_cbc
        #[cfg(feature = "gurobi")]
        return Ok(SolverBackend::Gurobi);

        #[allow(unreachable_code)]
        #[cfg(feature = "coin_cbc")]
        return Ok(SolverBackend::CoinCbc);

        #[cfg(not(any(feature = "gurobi", feature = "coin_cbc")))]
        Err(anyhow::anyhow!(
            "No LP solver backend available. Please enable a solver feature (e.g., 'gurobi' or 'coin_cbc')"
        ))
    }
}

/// A linear expression term: coefficient * variable
#[derive(Debug, Clone)]
pub struct LinearTerm<Brand> {
    pub coefficient: f64,
    pub variable: VariableId<Brand>,
}

/// A linear expression: sum of weighted variables
#[derive(Debug, Clone)]
pub struct LinearExpression<Brand> {
    pub terms: Vec<LinearTerm<Brand>>,
}

impl<Brand> LinearExpression<Brand> {
    /// Create an empty expression
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }
}

impl<Brand> Default for LinearExpression<Brand> {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a variable in the LP model
///
/// The `Brand` type parameter ensures that variables can only be used with the
/// builder that created them. This is enforced at compile time.
pub struct VariableId<Brand> {
    id: usize,
    _brand: PhantomData<fn() -> Brand>,
}

// Manual trait implementations that don't require Brand to implement anything
impl<Brand> fmt::Debug for VariableId<Brand> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableId").field("id", &self.id).finish()
    }
}

impl<Brand> Clone for VariableId<Brand> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Brand> Copy for VariableId<Brand> {}

impl<Brand> PartialEq for VariableId<Brand> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<Brand> Eq for VariableId<Brand> {}

/// A named capacity constraint: `expression <= rhs`
#[derive(Debug, Clone)]
pub struct Constraint<Brand> {
    pub name: Arc<str>,
    pub expression: LinearExpression<Brand>,
    pub rhs: f64,
}

impl<Brand> Constraint<Brand> {
    /// Create a less-than-or-equal constraint: expression <= rhs
    pub fn le(name: impl Into<Arc<str>>, expression: LinearExpression<Brand>, rhs: f64) -> Self {
        Self {
            name: name.into(),
            expression,
            rhs,
        }
    }
}

/// Variable information stored in the model
#[derive(Debug, Clone)]
pub struct VariableInfo {
    pub name: Arc<str>,
    pub var_type: VariableType,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Objective function information
#[derive(Debug, Clone)]
pub struct ObjectiveInfo<Brand> {
    pub name: Arc<str>,
    pub expression: LinearExpression<Brand>,
    pub sense: OptimizationSense,
}

/// Result of solving an LP model
#[derive(Debug, Clone)]
pub struct LPSolution<Brand> {
    pub status: OptimizationStatus,
    pub objective_value: f64,
    variable_values: Vec<f64>,
    _brand: PhantomData<fn() -> Brand>,
}

impl<Brand> LPSolution<Brand> {
    pub(crate) fn new(
        status: OptimizationStatus,
        objective_value: f64,
        variable_values: Vec<f64>,
    ) -> Self {
        Self {
            status,
            objective_value,
            variable_values,
            _brand: PhantomData,
        }
    }

    /// Get the value of a variable from the solution
    pub fn get_value(&self, var_id: VariableId<Brand>) -> Option<f64> {
        self.variable_values.get(var_id.id).copied()
    }
}

/// Builder for LP models that can work with different backends
///
/// The `Brand` type parameter ensures type safety - variables from one builder
/// cannot be accidentally used with another builder.
pub struct LPModelBuilder<Brand> {
    variables: Vec<VariableInfo>,
    constraints: Vec<Constraint<Brand>>,
    objective: Option<ObjectiveInfo<Brand>>,
    _brand: PhantomData<fn() -> Brand>,
}

impl<Brand> LPModelBuilder<Brand> {
    /// Create a new LP model builder
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: None,
            _brand: PhantomData,
        }
    }

    /// Add a variable to the model
    pub fn add_variable(
        &mut self,
        name: impl Into<Arc<str>>,
        var_type: VariableType,
        lower_bound: f64,
        upper_bound: f64,
    ) -> VariableId<Brand> {
        let var_id = VariableId {
            id: self.variables.len(),
            _brand: PhantomData,
        };
        self.variables.push(VariableInfo {
            name: name.into(),
            var_type,
            lower_bound,
            upper_bound,
        });
        var_id
    }

    /// Add a constraint to the model
    pub fn add_constraint(&mut self, constraint: Constraint<Brand>) {
        self.constraints.push(constraint);
    }

    /// Set the objective function
    pub fn set_objective(
        &mut self,
        name: impl Into<Arc<str>>,
        expression: LinearExpression<Brand>,
        sense: OptimizationSense,
    ) {
        self.objective = Some(ObjectiveInfo {
            name: name.into(),
            expression,
            sense,
        });
    }

    pub fn variables(&self) -> &[VariableInfo] {
        &self.variables
    }

    pub fn variable(&self, var_id: VariableId<Brand>) -> &VariableInfo {
        &self.variables[var_id.id]
    }

    pub fn constraints(&self) -> &[Constraint<Brand>] {
        &self.constraints
    }

    pub fn objective(&self) -> Option<&ObjectiveInfo<Brand>> {
        self.objective.as_ref()
    }

    /// Render an expression using the model's variable names,
    /// e.g. `2*Chair_A_Quantity + Chair_B_Quantity`.
    pub fn render_expression(&self, expression: &LinearExpression<Brand>) -> String {
        if expression.terms.is_empty() {
            return "0".into();
        }

        expression
            .terms
            .iter()
            .enumerate()
            .map(|(i, term)| {
                let name = &self.variables[term.variable.id].name;
                let magnitude = term.coefficient.abs();
                let sign = match (i, term.coefficient < 0.0) {
                    (0, false) => "",
                    (0, true) => "-",
                    (_, false) => "+ ",
                    (_, true) => "- ",
                };
                if magnitude == 1.0 {
                    format!("{}{}", sign, name)
                } else {
                    format!("{}{}*{}", sign, magnitude, name)
                }
            })
            .join(" ")
    }

    /// Render a constraint as `<expression> <= <rhs>`.
    pub fn render_constraint(&self, constraint: &Constraint<Brand>) -> String {
        format!(
            "{} <= {}",
            self.render_expression(&constraint.expression),
            constraint.rhs
        )
    }

    /// Solve the model using the backend selected by the environment
    pub fn solve(&self) -> Result<LPSolution<Brand>> {
        let solver = SolverBackend::from_env_or_default()?;
        tracing::debug!(
            ?solver,
            variables = self.variables.len(),
            constraints = self.constraints.len(),
            "solving LP model"
        );

        match solver {
            #[cfg(feature = "gurobi")]
            SolverBackend::Gurobi => crate::lp_solver::gurobi::solve_gurobi(self),

            #[cfg(feature = "coin_cbc")]
            SolverBackend::CoinCbc => crate::lp_solver::coin_cbc::solve_coin_cbc(self),
        }
    }
}

impl<Brand> Default for LPModelBuilder<Brand> {
    fn default() -> Self {
        Self::new()
    }
}

// Operator overloading for linear expressions
pub mod ops;

pub mod output_suppression;

#[cfg(feature = "gurobi")]
pub mod gurobi;

#[cfg(feature = "coin_cbc")]
pub mod coin_cbc;

#[cfg(test)]
mod tests {
    use super::*;

    struct TestModel;

    #[test]
    fn test_scaled_variables_build_expression() {
        let mut builder = LPModelBuilder::<TestModel>::new();
        let x = builder.add_variable("x", VariableType::Continuous, 0.0, 10.0);
        let y = builder.add_variable("y", VariableType::Continuous, 0.0, 10.0);

        let expr = 2.0 * x + 1.0 * y;
        assert_eq!(expr.terms.len(), 2);
        assert_eq!(expr.terms[0].coefficient, 2.0);
        assert_eq!(expr.terms[0].variable, x);
        assert_eq!(expr.terms[1].coefficient, 1.0);
        assert_eq!(expr.terms[1].variable, y);

        let c = Constraint::le("cap", expr, 10.0);
        assert_eq!(&*c.name, "cap");
        assert_eq!(c.rhs, 10.0);
    }

    #[test]
    fn test_render_expression_uses_variable_names() {
        let mut builder = LPModelBuilder::<TestModel>::new();
        let x = builder.add_variable("Chair_A_Quantity", VariableType::Integer, 0.0, 10.0);
        let y = builder.add_variable("Chair_B_Quantity", VariableType::Integer, 0.0, 10.0);

        assert_eq!(
            builder.render_expression(&(2.0 * x + 1.0 * y)),
            "2*Chair_A_Quantity + Chair_B_Quantity"
        );
        assert_eq!(
            builder.render_expression(&(0.5 * x + -1.5 * y)),
            "0.5*Chair_A_Quantity - 1.5*Chair_B_Quantity"
        );
        assert_eq!(builder.render_expression(&LinearExpression::new()), "0");

        let c = Constraint::le("wood", 0.5 * x + 1.0 * y, 50.0);
        assert_eq!(
            builder.render_constraint(&c),
            "0.5*Chair_A_Quantity + Chair_B_Quantity <= 50"
        );
    }

    #[test]
    fn test_builder_accessors() {
        let mut builder = LPModelBuilder::<TestModel>::new();
        let x = builder.add_variable("x", VariableType::Integer, 0.0, f64::INFINITY);
        builder.add_constraint(Constraint::le("cap", 1.0 * x, 3.0));
        builder.set_objective("obj", 2.0 * x, OptimizationSense::Maximize);

        assert_eq!(&*builder.variable(x).name, "x");
        assert_eq!(builder.variable(x).var_type, VariableType::Integer);
        assert_eq!(builder.constraints().len(), 1);
        assert_eq!(&*builder.constraints()[0].name, "cap");
        let objective = builder.objective().expect("objective was set");
        assert_eq!(&*objective.name, "obj");
        assert_eq!(objective.sense, OptimizationSense::Maximize);
    }

    #[test]
    fn test_solution_values_by_variable() {
        let mut builder = LPModelBuilder::<TestModel>::new();
        let x = builder.add_variable("x", VariableType::Continuous, 0.0, 10.0);
        let y = builder.add_variable("y", VariableType::Continuous, 0.0, 10.0);

        let solution = LPSolution::new(OptimizationStatus::Optimal, 0.0, vec![3.0]);
        assert_eq!(solution.get_value(x), Some(3.0));
        assert_eq!(solution.get_value(y), None);
    }

    #[test]
    fn test_solver_backend_from_name() {
        assert!(SolverBackend::from_name("simplex-of-my-own").is_err());

        #[cfg(feature = "coin_cbc")]
        {
            assert_eq!(
                SolverBackend::from_name("CBC").unwrap(),
                SolverBackend::CoinCbc
            );
            assert_eq!(
                SolverBackend::from_name("coin-cbc").unwrap(),
                SolverBackend::CoinCbc
            );
        }

        #[cfg(not(feature = "gurobi"))]
        assert!(SolverBackend::from_name("gurobi").is_err());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(OptimizationStatus::Optimal.to_string(), "Optimal");
        assert_eq!(
            OptimizationStatus::InfeasibleOrUnbounded.to_string(),
            "Infeasible or Unbounded"
        );
        assert_eq!(
            OptimizationStatus::Other("abandoned").to_string(),
            "Undefined (abandoned)"
        );
        assert!(OptimizationStatus::Optimal.is_optimal());
        assert!(!OptimizationStatus::Infeasible.is_optimal());
    }
}
