use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

// Helper function to run the planner binary
fn run_prodplan(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_prodplan"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("PRODPLAN_LP_SOLVER")
        .output()
        .expect("Failed to run prodplan")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "Command should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    /// Running without arguments plans the standard scenario
    #[test]
    fn test_default_run() {
        let stdout = stdout_of(&run_prodplan(&[]));

        assert!(stdout.starts_with("--- Business Problem Setup ---"));
        assert!(stdout.contains("Resource Limits: Carpentry=100h, Finishing=80h, Wood=50 units"));
        assert!(stdout.contains(
            "- Wood_Units_Constraint: 0.5*Chair_A_Quantity + Chair_B_Quantity <= 50"
        ));
        assert!(stdout.contains("Status: Optimal"));
        assert!(stdout.contains("Produce 35 units of Chair A"));
        assert!(stdout.contains("Produce 30 units of Chair B"));
        assert!(stdout.contains("Maximum Total Profit: $1150.00"));
    }

    /// Solver chatter must not leak into the report
    #[test]
    fn test_solver_log_is_suppressed() {
        let stdout = stdout_of(&run_prodplan(&[]));

        assert!(!stdout.contains("Coin"), "CBC banner leaked: {}", stdout);
        assert!(!stdout.contains("Cbc0"), "CBC log leaked: {}", stdout);
        assert!(!stdout.contains("Gurobi"), "Gurobi banner leaked: {}", stdout);
        assert!(!stdout.contains("Optimize a model"), "Gurobi log leaked: {}", stdout);

        let solving = stdout
            .split("--- Solving the Optimization Problem ---\n")
            .nth(1)
            .expect("Solving section should be present");
        assert!(solving.starts_with("Status: "), "Unexpected output: {}", solving);
    }

    /// Zero capacity means nothing can be built
    #[test]
    fn test_zero_limits() {
        let stdout = stdout_of(&run_prodplan(&[
            "--carpentry-hours",
            "0",
            "--finishing-hours",
            "0",
            "--wood-units",
            "0",
        ]));

        assert!(stdout.contains("Status: Optimal"));
        assert!(stdout.contains("Produce 0 units of Chair A"));
        assert!(stdout.contains("Produce 0 units of Chair B"));
        assert!(stdout.contains("Maximum Total Profit: $0.00"));
    }

    /// A negative limit is infeasible, but still a normal exit
    #[test]
    fn test_negative_limit_reports_no_solution() {
        let stdout = stdout_of(&run_prodplan(&["--wood-units", "-5"]));

        assert!(stdout.contains("Wood=-5 units"));
        assert!(!stdout.contains("Status: Optimal"));
        assert!(stdout.contains("No optimal solution found."));
        assert!(!stdout.contains("Produce "));
    }

    /// The relaxation is printed with continuous variables
    #[test]
    fn test_relaxation() {
        let stdout = stdout_of(&run_prodplan(&["--relax"]));

        assert!(stdout.contains("Chair_A_Quantity (Continuous >= 0)"));
        assert!(stdout.contains("Status: Optimal"));
        assert!(stdout.contains("Maximum Total Profit: $1150.00"));
    }

    /// The report can be redirected to a file
    #[test]
    fn test_report_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let report_path = temp_dir.path().join("plan.rpt");

        let output = run_prodplan(&["--report", report_path.to_str().unwrap()]);
        let stdout = stdout_of(&output);

        assert!(Path::new(&report_path).exists(), "Report file should be generated");
        assert!(!stdout.contains("Business Problem Setup"));

        let report = fs::read_to_string(&report_path).expect("Failed to read report file");
        assert!(report.contains("--- Optimal Production Plan ---"));
        assert!(report.contains("--- Resource Utilization ---"));
        assert!(report.contains("47.50"));
    }

    /// An unwritable report path fails before anything is printed
    #[test]
    fn test_report_in_missing_directory_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let report_path = temp_dir.path().join("missing").join("plan.rpt");

        let output = run_prodplan(&["--report", report_path.to_str().unwrap()]);

        assert!(!output.status.success(), "Command should fail");
        assert!(output.stdout.is_empty(), "Nothing should reach stdout");
        assert!(!report_path.exists());
        assert!(!output.stderr.is_empty(), "The I/O error should be reported");
    }

    /// An unknown solver backend is an environment error
    #[test]
    fn test_unknown_solver_backend() {
        let output = Command::new(env!("CARGO_BIN_EXE_prodplan"))
            .env("PRODPLAN_LP_SOLVER", "abacus")
            .output()
            .expect("Failed to run prodplan");

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid solver 'abacus'"));
    }
}
