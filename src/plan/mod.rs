//! Production planning for the furniture workshop.
//!
//! This module ties together the data in [`crate::production`], the model in
//! [`model`] and the report in [`report`]:
//!
//! 1. Print the business problem setup
//! 2. Formulate the integer program and print it
//! 3. Solve it with the configured LP backend
//! 4. Print the status and, when optimal, the plan and resource utilisation
//!
//! # Usage Example
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use prodplan::plan::{PlanArgs, plan_main};
//!
//! let args = PlanArgs {
//!     carpentry_hours: 100.0,
//!     finishing_hours: 80.0,
//!     wood_units: 50.0,
//!     relax: false,
//!     report: Some("plan.rpt".into()),
//! };
//!
//! plan_main(args)?;
//! # Ok(())
//! # }
//! ```

use std::{
    fs,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::lp_solver::VariableType;
use crate::production::{ProductionProblem, ResourceLimits};

pub mod model;
pub mod report;

pub use model::{Formulation, PlanOutcome, ProductionPlan, ResourceUsage, formulate};

/// Command-line arguments of the planner.
///
/// Every option has a default; running without arguments plans the standard
/// workshop scenario.
#[derive(Parser, Debug)]
#[clap(
    name = "prodplan",
    about = "Plan furniture production by solving a small integer program"
)]
pub struct PlanArgs {
    /// Available carpentry hours
    #[clap(
        long,
        default_value_t = ResourceLimits::DEFAULT.carpentry_hours,
        allow_negative_numbers = true
    )]
    pub carpentry_hours: f64,

    /// Available finishing hours
    #[clap(
        long,
        default_value_t = ResourceLimits::DEFAULT.finishing_hours,
        allow_negative_numbers = true
    )]
    pub finishing_hours: f64,

    /// Available units of wood
    #[clap(
        long,
        default_value_t = ResourceLimits::DEFAULT.wood_units,
        allow_negative_numbers = true
    )]
    pub wood_units: f64,

    /// Solve the continuous relaxation instead of the integer program
    #[clap(long)]
    pub relax: bool,

    /// Report file (default: stdout)
    #[clap(long, short)]
    pub report: Option<PathBuf>,
}

impl PlanArgs {
    pub fn limits(&self) -> ResourceLimits {
        ResourceLimits {
            carpentry_hours: self.carpentry_hours,
            finishing_hours: self.finishing_hours,
            wood_units: self.wood_units,
        }
    }
}

/// Plan production and write the report.
///
/// Non-optimal outcomes are reported, not returned as errors; an `Err` means
/// the report could not be written or no solver backend could be used.
pub fn plan_main(args: PlanArgs) -> Result<()> {
    let limits = args.limits();
    let PlanArgs { relax, report, .. } = args;

    let mut writer: Box<dyn Write> = match report {
        Some(path) => Box::new(BufWriter::new(fs::File::create(path)?)),
        None => Box::new(io::stdout()),
    };

    let problem = ProductionProblem::new(limits);
    let variable_type = if relax {
        VariableType::Continuous
    } else {
        VariableType::Integer
    };

    let outcome = plan(&problem, variable_type, &mut writer)?;
    info!(status = %outcome.status(), "planning finished");

    writer.flush()?;
    Ok(())
}

/// Run the whole pipeline for `problem`, writing every report section to `out`.
pub fn plan<W: Write + ?Sized>(
    problem: &ProductionProblem,
    variable_type: VariableType,
    out: &mut W,
) -> Result<PlanOutcome> {
    info!(problem = %problem.name, ?variable_type, limits = ?problem.limits, "planning production");

    report::write_setup(out, problem)?;

    let formulation = formulate(problem, variable_type);
    report::write_formulation(out, &formulation)?;

    report::write_solving_header(out)?;
    // Solver output is gagged at the file-descriptor level; flush first
    out.flush()?;
    let outcome = formulation.solve()?;

    report::write_outcome(out, problem, &outcome)?;
    Ok(outcome)
}
