//! Furniture production planning with a small integer program
//!
//! A workshop builds two chairs that compete for carpentry hours, finishing
//! hours and wood. This crate formulates the profit-maximising production
//! plan as an integer program, hands it to a MIP solver (COIN-OR CBC by
//! default, Gurobi behind the `gurobi` feature) and reports the result.
//!
//! # Usage Example
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use prodplan::lp_solver::VariableType;
//! use prodplan::plan::formulate;
//! use prodplan::production::ProductionProblem;
//!
//! let problem = ProductionProblem::default();
//! let outcome = formulate(&problem, VariableType::Integer).solve()?;
//!
//! if let Some(plan) = outcome.plan() {
//!     println!("Chair A: {}, Chair B: {}", plan.quantities[0], plan.quantities[1]);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - **[`production`]**: Products, resources and capacity limits
//! - **[`plan`]**: Formulation, solving and the planning report
//! - **[`lp_solver`]**: Linear programming solver abstraction layer
//! - **[`logging`]**: Diagnostic logging setup

use std::{error::Error, fmt};

pub mod logging;
pub mod lp_solver;
pub mod plan;
pub mod production;

pub use plan::{PlanArgs, plan_main};

/// Application-level errors that can occur while planning.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    /// The solver reported an optimum but left a decision variable without a value.
    MissingValue { variable: String },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingValue { variable } => {
                write!(f, "Solver returned no value for variable {}", variable)
            }
        }
    }
}

impl Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::MissingValue {
            variable: "Chair_A_Quantity".into(),
        };
        assert_eq!(
            err.to_string(),
            "Solver returned no value for variable Chair_A_Quantity"
        );

        let err: anyhow::Error = err.into();
        assert!(err.downcast_ref::<AppError>().is_some());
    }
}
