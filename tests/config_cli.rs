use predicates::str::{contains, diff};
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

fn write_temp_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be available")
        .as_nanos();
    path.push(format!("queue-lab-config-{}.{}", nanos, extension));
    fs::write(&path, contents).expect("config write should succeed");
    path
}

#[test]
fn config_file_toml_summary_runs() {
    let config = r#"
model = "mm1"
lambda = 4.0
mu = 6.0
query = "<=2"
"#;
    let path = write_temp_config(config, "toml");

    let expected = concat!(
        "Model: M/M/1\n",
        "Parameters: lambda=4, mu=6\n",
        "Metrics:\n",
        "rho: 0.6667\n",
        "P0: 0.3333\n",
        "Ls: 2.0000\n",
        "Lq: 1.3333\n",
        "Ws: 0.5000\n",
        "Wq: 0.3333\n",
        "Idle servers: 0.3333\n",
        "P(n <= 2) = 0.7037\n",
    );
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args(["queue", "--config", path.to_str().unwrap(), "--format", "summary"]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn flags_override_json_config() {
    let path = write_temp_config(
        r#"{ "model": "mmcn", "lambda": 2.0, "mu": 3.0, "c": 1, "N": 4 }"#,
        "json",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args([
        "queue",
        "--config",
        path.to_str().unwrap(),
        "-c",
        "2",
        "--format",
        "summary",
    ]);
    cmd.assert()
        .success()
        .stdout(contains("Parameters: lambda=2, mu=3, c=2, N=4\n"));
}

#[test]
fn restaurant_config_file_runs() {
    let config = r#"
tableCount = 5
queueLimit = 0
arrivalLambda = 40.0
serviceMu = 2.0
simulationSpeed = 60.0
seed = 11
ticks = 500
"#;
    let path = write_temp_config(config, "toml");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args([
        "restaurant",
        "--config",
        path.to_str().unwrap(),
        "--format",
        "summary",
    ]);
    cmd.assert()
        .success()
        .stdout(contains("Tables: 5 ("))
        .stdout(contains("Waiting: 0\n"));
}

#[test]
fn restaurant_config_can_request_unbounded_queue() {
    let path = write_temp_config(
        r#"{ "tableCount": 4, "unboundedQueue": true, "seed": 2, "ticks": 20 }"#,
        "json",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args([
        "restaurant",
        "--config",
        path.to_str().unwrap(),
        "--format",
        "json",
    ]);
    cmd.assert()
        .success()
        .stdout(contains("\"queueLimit\": null"));
}

#[test]
fn unsupported_extension_fails() {
    let path = write_temp_config("model: mm1", "yaml");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args(["queue", "--config", path.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: unsupported config format 'yaml'"));
}
