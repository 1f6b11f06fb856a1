//! Integer program for the production plan.
//!
//! The model has one non-negative decision variable per product (the quantity
//! to produce), one `<=` capacity constraint per [`Resource`], and maximises
//! total profit.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::AppError;
use crate::lp_solver::*;
use crate::production::{ProductionProblem, Resource};

/// Brand of the production-planning LP model.
pub struct ProductionModel;

pub type QuantityVariable = VariableId<ProductionModel>;

/// Name of the objective in the formulation.
pub const OBJECTIVE_NAME: &str = "Total_Profit";

/// Slack allowed when checking utilisation against a limit.
const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// The formulated model, ready to be printed or solved.
pub struct Formulation<'a> {
    pub problem: &'a ProductionProblem,
    pub builder: LPModelBuilder<ProductionModel>,
    pub quantities: [QuantityVariable; 2],
}

/// Build the objective and the three capacity constraints of `problem`.
///
/// `variable_type` is [`VariableType::Integer`] for the production plan
/// proper; [`VariableType::Continuous`] gives its LP relaxation.
pub fn formulate(problem: &ProductionProblem, variable_type: VariableType) -> Formulation<'_> {
    let mut builder = LPModelBuilder::<ProductionModel>::new();

    let quantities = problem.products.each_ref().map(|product| {
        builder.add_variable(
            product.quantity_variable_name(),
            variable_type,
            0.0,
            f64::INFINITY,
        )
    });

    for resource in Resource::ALL {
        let used: LinearExpression<_> = problem
            .products
            .iter()
            .zip(quantities)
            .map(|(product, quantity)| product.usage(resource) * quantity)
            .sum();
        let constraint = Constraint::le(
            resource.constraint_name(),
            used,
            problem.limits.limit(resource),
        );
        debug!(
            constraint = %builder.render_constraint(&constraint),
            "adding {} capacity",
            resource
        );
        builder.add_constraint(constraint);
    }

    let profit: LinearExpression<_> = problem
        .products
        .iter()
        .zip(quantities)
        .map(|(product, quantity)| product.profit * quantity)
        .sum();
    builder.set_objective(OBJECTIVE_NAME, profit, OptimizationSense::Maximize);

    Formulation {
        problem,
        builder,
        quantities,
    }
}

/// Quantities and profit of an optimal plan.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionPlan {
    /// Units to produce, in product order.
    pub quantities: [f64; 2],
    pub profit: f64,
}

/// Consumption of one resource by a plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceUsage {
    pub resource: Resource,
    pub used: f64,
    pub limit: f64,
}

impl ResourceUsage {
    pub fn slack(&self) -> f64 {
        self.limit - self.used
    }

    pub fn is_within_limit(&self) -> bool {
        self.used <= self.limit + FEASIBILITY_TOLERANCE
    }
}

impl ProductionPlan {
    /// Usage of every resource, in [`Resource::ALL`] order.
    pub fn utilization(&self, problem: &ProductionProblem) -> [ResourceUsage; 3] {
        Resource::ALL.map(|resource| ResourceUsage {
            resource,
            used: problem.usage(resource, &self.quantities),
            limit: problem.limits.limit(resource),
        })
    }
}

/// What the solver made of the model.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Optimal(ProductionPlan),
    NotOptimal(OptimizationStatus),
}

impl PlanOutcome {
    pub fn status(&self) -> OptimizationStatus {
        match self {
            PlanOutcome::Optimal(_) => OptimizationStatus::Optimal,
            PlanOutcome::NotOptimal(status) => *status,
        }
    }

    pub fn plan(&self) -> Option<&ProductionPlan> {
        match self {
            PlanOutcome::Optimal(plan) => Some(plan),
            PlanOutcome::NotOptimal(_) => None,
        }
    }
}

impl Formulation<'_> {
    /// Solve the model with the configured backend.
    ///
    /// Infeasible, unbounded and undefined models are not errors; they come
    /// back as [`PlanOutcome::NotOptimal`].
    pub fn solve(&self) -> Result<PlanOutcome> {
        let solution = self.builder.solve()?;
        self.outcome(&solution)
    }

    /// Map a backend solution back onto the products.
    ///
    /// An optimal status without a value for every quantity is an
    /// [`AppError::MissingValue`].
    pub fn outcome(&self, solution: &LPSolution<ProductionModel>) -> Result<PlanOutcome> {
        info!(
            problem = %self.problem.name,
            status = %solution.status,
            objective = solution.objective_value,
            "model solved"
        );

        if !solution.status.is_optimal() {
            return Ok(PlanOutcome::NotOptimal(solution.status));
        }

        let mut quantities = [0.0; 2];
        for (value, variable) in quantities.iter_mut().zip(self.quantities) {
            *value = solution
                .get_value(variable)
                .ok_or_else(|| AppError::MissingValue {
                    variable: self.builder.variable(variable).name.to_string(),
                })?;
        }

        let plan = ProductionPlan {
            quantities,
            profit: solution.objective_value,
        };
        for usage in plan.utilization(self.problem) {
            if !usage.is_within_limit() {
                warn!(
                    resource = %usage.resource,
                    used = usage.used,
                    limit = usage.limit,
                    "optimal plan exceeds a resource limit"
                );
            }
        }

        Ok(PlanOutcome::Optimal(plan))
    }
}
