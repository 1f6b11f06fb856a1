//! Human-readable planning report.
//!
//! Each section is written by its own function so callers can interleave
//! them with the solve (the formulation is printed before the solver runs).

use std::io::Write;

use anyhow::Result;
use itertools::Itertools;
use prettytable::*;

use super::model::{Formulation, PlanOutcome, ProductionPlan};
use crate::production::{ProductionProblem, Resource};

const RULE: &str = "------------------------------";

pub fn write_setup<W: Write + ?Sized>(out: &mut W, problem: &ProductionProblem) -> Result<()> {
    writeln!(out, "--- Business Problem Setup ---")?;
    for product in &problem.products {
        writeln!(
            out,
            "{}: Carpentry={}h, Finishing={}h, Wood={} units, Profit=${}",
            product.name,
            product.carpentry_hours,
            product.finishing_hours,
            product.wood_units,
            product.profit
        )?;
    }
    writeln!(
        out,
        "Resource Limits: {}",
        Resource::ALL
            .iter()
            .map(|resource| format!(
                "{}={}{}",
                resource,
                problem.limits.limit(*resource),
                resource.suffix()
            ))
            .join(", ")
    )?;
    writeln!(out, "{}", RULE)?;
    Ok(())
}

pub fn write_formulation<W: Write + ?Sized>(
    out: &mut W,
    formulation: &Formulation<'_>,
) -> Result<()> {
    let builder = &formulation.builder;

    writeln!(out, "\n--- Optimization Problem Formulation ---")?;
    if let Some(objective) = builder.objective() {
        writeln!(
            out,
            "Objective: {:?} {} = {}",
            objective.sense,
            objective.name,
            builder.render_expression(&objective.expression)
        )?;
    }
    writeln!(
        out,
        "Variables: {}",
        builder
            .variables()
            .iter()
            .map(|var| format!("{} ({} >= {})", var.name, var.var_type, var.lower_bound))
            .join(", ")
    )?;
    writeln!(out, "Constraints:")?;
    for constraint in builder.constraints() {
        writeln!(
            out,
            "- {}: {}",
            constraint.name,
            builder.render_constraint(constraint)
        )?;
    }
    writeln!(out, "{}", RULE)?;
    Ok(())
}

pub fn write_solving_header<W: Write + ?Sized>(out: &mut W) -> Result<()> {
    writeln!(out, "\n--- Solving the Optimization Problem ---")?;
    Ok(())
}

pub fn write_outcome<W: Write + ?Sized>(
    out: &mut W,
    problem: &ProductionProblem,
    outcome: &PlanOutcome,
) -> Result<()> {
    writeln!(out, "Status: {}", outcome.status())?;

    match outcome {
        PlanOutcome::Optimal(plan) => write_plan(out, problem, plan),
        PlanOutcome::NotOptimal(_) => {
            writeln!(out, "\nNo optimal solution found.")?;
            writeln!(
                out,
                "Possible reasons: Infeasible problem (constraints cannot be satisfied) or unbounded problem."
            )?;
            Ok(())
        }
    }
}

fn write_plan<W: Write + ?Sized>(
    out: &mut W,
    problem: &ProductionProblem,
    plan: &ProductionPlan,
) -> Result<()> {
    writeln!(out, "\n--- Optimal Production Plan ---")?;
    for (product, quantity) in problem.products.iter().zip(plan.quantities) {
        writeln!(out, "Produce {} units of {}", quantity, product.name)?;
    }
    writeln!(out, "Maximum Total Profit: ${:.2}", plan.profit)?;

    writeln!(out, "\n--- Resource Utilization ---")?;
    let mut table = Table::new();
    table.set_titles(row!["Resource", "Used", "Limit", "Slack", "Unit"]);
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    for usage in plan.utilization(problem) {
        table.add_row(row![
            usage.resource,
            format!("{:.2}", usage.used),
            usage.limit,
            format!("{:.2}", usage.slack()),
            usage.resource.unit(),
        ]);
    }
    table.print(out)?;
    Ok(())
}
