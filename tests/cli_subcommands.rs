use predicates::prelude::*;
use predicates::str::contains;

fn run_json(args: &[&str]) -> serde_json::Value {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args(args);
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout should be json")
}

#[test]
fn monte_carlo_json_has_rows_and_statistics() {
    let value = run_json(&[
        "monte-carlo",
        "--distribution",
        "exponential",
        "--lambda",
        "2",
        "--variables",
        "3",
        "--observations",
        "50",
        "--seed",
        "42",
        "--format",
        "json",
    ]);

    let data = value["data"].as_array().expect("data array");
    assert_eq!(data.len(), 50);
    assert_eq!(data[0]["observationIndex"], 1);
    assert_eq!(data[0]["randomValues"].as_array().unwrap().len(), 3);
    assert_eq!(value["statistics"]["stdDev"].as_array().unwrap().len(), 3);
    assert_eq!(value["params"]["distribution"], "EXPONENTIAL");
}

#[test]
fn seeded_monte_carlo_runs_repeat() {
    let args = [
        "monte-carlo",
        "--distribution",
        "poisson",
        "--lambda",
        "4",
        "--variables",
        "2",
        "--observations",
        "20",
        "--seed",
        "9",
        "--format",
        "json",
    ];
    assert_eq!(run_json(&args), run_json(&args));
}

#[test]
fn monte_carlo_summary_skips_rows() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args([
        "monte-carlo",
        "--distribution",
        "poisson",
        "--lambda",
        "3",
        "--variables",
        "1",
        "--observations",
        "10",
        "--seed",
        "1",
        "--format",
        "summary",
    ]);
    cmd.assert()
        .success()
        .stdout(contains("Distribution: poisson (lambda = 3)\n"))
        .stdout(contains("Statistics:\n"))
        .stdout(contains("U1").not());
}

#[test]
fn restaurant_run_reports_final_state() {
    let value = run_json(&[
        "restaurant",
        "--tables",
        "6",
        "--arrival-rate",
        "30",
        "--service-rate",
        "5",
        "--speed",
        "100",
        "--ticks",
        "2000",
        "--seed",
        "5",
        "--format",
        "json",
    ]);

    let state = &value["state"];
    assert_eq!(state["isRunning"], false);
    assert_eq!(state["tables"].as_array().unwrap().len(), 6);
    let stats = &state["stats"];
    let total = stats["totalCustomers"].as_u64().unwrap();
    let served = stats["customersServed"].as_u64().unwrap();
    let lost = stats["customersLost"].as_u64().unwrap();
    assert!(total > 0);
    assert!(served + lost <= total);
    assert!(value["clock"].as_str().unwrap().starts_with("Day 1 - "));
    assert_eq!(value["config"]["tableCount"], 6);
}

#[test]
fn restaurant_human_output_lists_tables() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args(["restaurant", "--ticks", "50", "--seed", "3"]);
    cmd.assert()
        .success()
        .stdout(contains("Clock: Day 1 - 08:0"))
        .stdout(contains("Tables: 8 ("))
        .stdout(contains("Table states:\n"))
        .stdout(contains("- table 1: "));
}
