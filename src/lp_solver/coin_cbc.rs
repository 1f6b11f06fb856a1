use crate::lp_solver::output_suppression::GagHandle;
use crate::lp_solver::*;
use ::coin_cbc::{Col, Model, Sense, Solution};

/// Round a floating-point number to a specified number of significant digits
/// This is an workaround to mask floating point errors in CBC.
fn round_to_sig_digits(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }

    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(digits as i32 - magnitude - 1);
    (value * scale).round() / scale
}

fn cbc_status(solution: &Solution) -> OptimizationStatus {
    let raw = solution.raw();
    if raw.is_proven_optimal() {
        OptimizationStatus::Optimal
    } else if raw.is_proven_infeasible() || raw.is_initial_solve_proven_primal_infeasible() {
        OptimizationStatus::Infeasible
    } else if raw.is_continuous_unbounded() {
        OptimizationStatus::Unbounded
    } else if raw.is_abandoned() {
        OptimizationStatus::Other("solve abandoned")
    } else {
        OptimizationStatus::Other("unknown status")
    }
}

/// Solve an LP model using Coin CBC
pub fn solve_coin_cbc<Brand>(builder: &LPModelBuilder<Brand>) -> Result<LPSolution<Brand>> {
    let mut model = Model::default();

    let cols: Vec<Col> = builder
        .variables
        .iter()
        .map(|var_info| {
            let col = match var_info.var_type {
                VariableType::Continuous => model.add_col(),
                VariableType::Integer => model.add_integer(),
            };
            model.set_col_lower(col, var_info.lower_bound);
            model.set_col_upper(col, var_info.upper_bound);
            col
        })
        .collect();

    let column = |variable: VariableId<Brand>| {
        cols.get(variable.id)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Variable {:?} not found in model", variable))
    };

    for constraint in &builder.constraints {
        let row = model.add_row();

        for term in &constraint.expression.terms {
            model.set_weight(row, column(term.variable)?, term.coefficient);
        }

        model.set_row_upper(row, constraint.rhs);
    }

    if let Some(obj_info) = &builder.objective {
        for term in &obj_info.expression.terms {
            model.set_obj_coeff(column(term.variable)?, term.coefficient);
        }

        model.set_obj_sense(match obj_info.sense {
            OptimizationSense::Minimize => Sense::Minimize,
            OptimizationSense::Maximize => Sense::Maximize,
        });
    }

    // CBC logs straight to stdout; keep it out of the report
    let solution = {
        let _gag_handle = GagHandle::stdout()?;
        model.solve()
    };

    let status = cbc_status(&solution);
    tracing::debug!(%status, "CBC finished");

    let variable_values: Vec<f64> = cols
        .iter()
        .map(|col| round_to_sig_digits(solution.col(*col), 8))
        .collect();

    // Objective is recomputed from the rounded values
    let objective_value = builder
        .objective
        .as_ref()
        .map(|obj_info| {
            let value: f64 = obj_info
                .expression
                .terms
                .iter()
                .map(|term| term.coefficient * variable_values[term.variable.id])
                .sum();
            round_to_sig_digits(value, 8)
        })
        .unwrap_or(0.0);

    Ok(LPSolution::new(status, objective_value, variable_values))
}
