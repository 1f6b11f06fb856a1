use ::gurobi::{ConstrSense, Env, LinExpr, Model, ModelSense, Status, Var, VarType, attr};

use crate::lp_solver::output_suppression::GagHandle;
use crate::lp_solver::*;

fn linear_expression<Brand>(
    vars: &[Var],
    expression: &LinearExpression<Brand>,
) -> Result<LinExpr> {
    let mut gurobi_expr = LinExpr::new();
    for term in &expression.terms {
        let var = vars
            .get(term.variable.id)
            .ok_or_else(|| anyhow::anyhow!("Variable {:?} not found in model", term.variable))?;
        gurobi_expr = gurobi_expr.add_term(term.coefficient, var.clone());
    }
    Ok(gurobi_expr)
}

/// Solve an LP model using Gurobi
pub fn solve_gurobi<Brand>(builder: &LPModelBuilder<Brand>) -> Result<LPSolution<Brand>> {
    // Gurobi prints its licence banner and optimize log to stdout; keep both
    // out of the report
    let _gag_handle = GagHandle::stdout()?;

    let env = Env::new("")?;
    let mut model = Model::new("production_plan", &env)?;

    let mut vars = Vec::with_capacity(builder.variables.len());
    for var_info in &builder.variables {
        let vtype = match var_info.var_type {
            VariableType::Continuous => VarType::Continuous,
            VariableType::Integer => VarType::Integer,
        };

        vars.push(model.add_var(
            &var_info.name,
            vtype,
            0.0,
            var_info.lower_bound,
            var_info.upper_bound,
            &[],
            &[],
        )?);
    }

    for constraint in &builder.constraints {
        model.add_constr(
            &constraint.name,
            linear_expression(&vars, &constraint.expression)?,
            ConstrSense::Less,
            constraint.rhs,
        )?;
    }

    // Update the model before setting objective
    model.update()?;

    if let Some(obj_info) = &builder.objective {
        let sense = match obj_info.sense {
            OptimizationSense::Minimize => ModelSense::Minimize,
            OptimizationSense::Maximize => ModelSense::Maximize,
        };

        model.set_objective(linear_expression(&vars, &obj_info.expression)?, sense)?;
    }

    model.optimize()?;

    let status = match model.status()? {
        Status::Optimal => OptimizationStatus::Optimal,
        Status::SubOptimal => OptimizationStatus::Feasible,
        Status::Infeasible => OptimizationStatus::Infeasible,
        Status::Unbounded => OptimizationStatus::Unbounded,
        Status::InfOrUnbd => OptimizationStatus::InfeasibleOrUnbounded,
        _ => OptimizationStatus::Other("unknown status"),
    };
    tracing::debug!(%status, "Gurobi finished");

    let mut variable_values = vec![0.0; vars.len()];
    let objective_value = match status {
        OptimizationStatus::Optimal | OptimizationStatus::Feasible => {
            for (value, var) in variable_values.iter_mut().zip(&vars) {
                *value = var.get(&model, attr::X)?;
            }
            model.get(attr::ObjVal)?
        }
        _ => 0.0,
    };

    Ok(LPSolution::new(status, objective_value, variable_values))
}
