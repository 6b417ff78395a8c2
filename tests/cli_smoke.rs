use predicates::str::{contains, diff};

#[test]
fn list_models_prints_every_tag() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.arg("list-models");
    cmd.assert()
        .success()
        .stdout(diff("mm1\nmm1n\nmmc\nmmcn\n"));
}

#[test]
fn summary_mm1_is_stable() {
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
    cmd.args([
        "queue", "--model", "mm1", "--lambda", "4", "--mu", "6", "--query", "<=2", "--format",
        "summary",
    ]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn summary_mmc_reports_idle_servers() {
    let expected = concat!(
        "Model: M/M/c\n",
        "Parameters: lambda=2, mu=1.5, c=2\n",
        "Metrics:\n",
        "rho: 0.6667\n",
        "P0: 0.2000\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args([
        "queue", "--model", "mmc", "--lambda", "2", "--mu", "1.5", "-c", "2", "--format",
        "summary",
    ]);
    cmd.assert()
        .success()
        .stdout(contains(expected))
        .stdout(contains("Idle servers: 0.6667\n"));
}

#[test]
fn human_mm1n_prints_distribution_table() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args(["queue", "--model", "mm1n", "--lambda", "3", "--mu", "3", "-n", "2"]);
    cmd.assert()
        .success()
        .stdout(contains("Distribution:\n"))
        .stdout(contains("   2    0.333333    1.000000\n"))
        .stdout(contains("Lost lambda: 1.0000\n"));
}
