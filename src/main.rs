use anyhow::Result;
use clap::Parser;
use prodplan::{PlanArgs, logging, plan_main};

fn main() -> Result<()> {
    logging::init();
    let args = PlanArgs::parse();

    plan_main(args)
}
