use serde::Serialize;
use std::fmt::Write;

use crate::models::{ProbabilityQuery, RestaurantConfig};
use crate::restaurant::format_clock;
use crate::state::{MonteCarloResults, QueueModelResults, RestaurantState, TableStatus};

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Queue(QueueReport),
    MonteCarlo(MonteCarloResults),
    Restaurant(RestaurantReport),
}

#[derive(Clone, Debug, Serialize)]
pub struct QueueReport {
    #[serde(flatten)]
    pub results: QueueModelResults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryAnswer>,
}

impl QueueReport {
    pub fn new(results: QueueModelResults, query: Option<ProbabilityQuery>) -> Self {
        let query = query.map(|query| QueryAnswer {
            expression: query.to_string(),
            value: results.evaluate(&query),
        });
        Self { results, query }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct QueryAnswer {
    pub expression: String,
    pub value: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct RestaurantReport {
    pub config: RestaurantConfig,
    pub clock: String,
    pub state: RestaurantState,
}

impl RestaurantReport {
    pub fn new(config: RestaurantConfig, state: RestaurantState) -> Self {
        Self {
            clock: format_clock(state.current_time),
            config,
            state,
        }
    }
}

pub trait Formatter {
    fn write(&self, report: &Report) -> String;
}

/// Metrics plus full tables.
pub struct HumanFormatter;
/// Metrics only.
pub struct SummaryFormatter;
pub struct JsonFormatter;

impl Formatter for HumanFormatter {
    fn write(&self, report: &Report) -> String {
        let mut out = String::new();
        match report {
            Report::Queue(queue) => {
                write_queue_metrics(&mut out, queue);
                write_distribution(&mut out, &queue.results);
            }
            Report::MonteCarlo(results) => {
                write_monte_carlo_header(&mut out, results);
                write_observations(&mut out, results);
                write_monte_carlo_stats(&mut out, results);
            }
            Report::Restaurant(restaurant) => {
                write_restaurant_summary(&mut out, restaurant);
                write_tables(&mut out, &restaurant.state);
            }
        }
        out
    }
}

impl Formatter for SummaryFormatter {
    fn write(&self, report: &Report) -> String {
        let mut out = String::new();
        match report {
            Report::Queue(queue) => write_queue_metrics(&mut out, queue),
            Report::MonteCarlo(results) => {
                write_monte_carlo_header(&mut out, results);
                write_monte_carlo_stats(&mut out, results);
            }
            Report::Restaurant(restaurant) => write_restaurant_summary(&mut out, restaurant),
        }
        out
    }
}

impl Formatter for JsonFormatter {
    fn write(&self, report: &Report) -> String {
        match serde_json::to_string_pretty(report) {
            Ok(json) => format!("{}\n", json),
            Err(err) => format!("{{\"error\": \"{}\"}}\n", err),
        }
    }
}

fn write_queue_metrics(out: &mut String, queue: &QueueReport) {
    let results = &queue.results;
    let params = &results.params;
    let _ = writeln!(out, "Model: {}", results.model_type.label());
    let mut line = format!("Parameters: lambda={}, mu={}", params.lambda, params.mu);
    if let Some(servers) = params.servers {
        let _ = write!(line, ", c={}", servers);
    }
    if let Some(capacity) = params.capacity {
        let _ = write!(line, ", N={}", capacity);
    }
    let _ = writeln!(out, "{}", line);
    let _ = writeln!(out, "Metrics:");
    let _ = writeln!(out, "rho: {:.4}", results.rho);
    let _ = writeln!(out, "P0: {:.4}", results.p0);
    let _ = writeln!(out, "Ls: {:.4}", results.ls);
    let _ = writeln!(out, "Lq: {:.4}", results.lq);
    let _ = writeln!(out, "Ws: {:.4}", results.ws);
    let _ = writeln!(out, "Wq: {:.4}", results.wq);
    if let Some(idle) = results.c_barra {
        let _ = writeln!(out, "Idle servers: {:.4}", idle);
    }
    if let Some(lambda_eff) = results.lambda_eff {
        let _ = writeln!(out, "Effective lambda: {:.4}", lambda_eff);
    }
    if let Some(lost) = results.lambda_perdida {
        let _ = writeln!(out, "Lost lambda: {:.4}", lost);
    }
    if let Some(answer) = &queue.query {
        let _ = writeln!(out, "{} = {:.4}", answer.expression, answer.value);
    }
}

fn write_distribution(out: &mut String, results: &QueueModelResults) {
    let _ = writeln!(out, "Distribution:");
    let _ = writeln!(out, "{:>4}  {:>10}  {:>10}", "n", "Pn", "cumulative");
    for entry in &results.probabilities {
        let _ = writeln!(
            out,
            "{:>4}  {:>10.6}  {:>10.6}",
            entry.n, entry.pn, entry.cumulative_pn
        );
    }
}

fn write_monte_carlo_header(out: &mut String, results: &MonteCarloResults) {
    let params = &results.params;
    let _ = writeln!(
        out,
        "Distribution: {} (lambda = {})",
        params.distribution, params.lambda
    );
    let _ = writeln!(
        out,
        "Observations: {}, variables: {}",
        params.n_observations, params.n_variables
    );
}

fn write_observations(out: &mut String, results: &MonteCarloResults) {
    let mut header = format!("{:>6}", "obs");
    for idx in 1..=results.params.n_variables {
        let _ = write!(header, "  {:>8}  {:>10}", format!("U{}", idx), format!("X{}", idx));
    }
    let _ = writeln!(out, "{}", header);
    for row in &results.data {
        let mut line = format!("{:>6}", row.observation_index);
        for (u, x) in row.random_values.iter().zip(&row.simulated_values) {
            let _ = write!(line, "  {:>8.4}  {:>10.4}", u, x);
        }
        let _ = writeln!(out, "{}", line);
    }
}

fn write_monte_carlo_stats(out: &mut String, results: &MonteCarloResults) {
    let stats = &results.statistics;
    let _ = writeln!(out, "Statistics:");
    let _ = writeln!(
        out,
        "{:>4}  {:>10}  {:>10}  {:>10}  {:>10}",
        "var", "mean", "std_dev", "min", "max"
    );
    for idx in 0..stats.mean.len() {
        let _ = writeln!(
            out,
            "{:>4}  {:>10.4}  {:>10.4}  {:>10.4}  {:>10.4}",
            format!("X{}", idx + 1),
            stats.mean[idx],
            stats.std_dev[idx],
            stats.min[idx],
            stats.max[idx]
        );
    }
}

fn write_restaurant_summary(out: &mut String, report: &RestaurantReport) {
    let state = &report.state;
    let stats = &state.stats;
    let count = |status: TableStatus| {
        state
            .tables
            .iter()
            .filter(|table| table.status == status)
            .count()
    };
    let _ = writeln!(out, "Clock: {}", report.clock);
    let _ = writeln!(out, "Simulated time: {:.2} min", state.current_time);
    let _ = writeln!(
        out,
        "Tables: {} (occupied {}, dirty {}, free {})",
        state.tables.len(),
        count(TableStatus::Occupied),
        count(TableStatus::Dirty),
        count(TableStatus::Free)
    );
    let _ = writeln!(out, "Waiting: {}", state.queue.len());
    let _ = writeln!(
        out,
        "Customers: {} total, {} served, {} lost",
        stats.total_customers, stats.customers_served, stats.customers_lost
    );
    let _ = writeln!(out, "Avg wait: {:.2} min", stats.avg_wait_time);
    let _ = writeln!(out, "Avg time in system: {:.2} min", stats.avg_system_time);
    let _ = writeln!(out, "Avg active tables: {:.2}", stats.active_tables_avg);
    let _ = writeln!(out, "Utilization: {:.2}%", stats.utilization * 100.0);
}

fn write_tables(out: &mut String, state: &RestaurantState) {
    let _ = writeln!(out, "Table states:");
    for table in &state.tables {
        let status = match table.status {
            TableStatus::Free => "free",
            TableStatus::Occupied => "occupied",
            TableStatus::Dirty => "dirty",
        };
        match table.current_customer_id {
            Some(customer) => {
                let _ = writeln!(
                    out,
                    "- table {}: {} by customer {} ({:.2} min left)",
                    table.id, status, customer, table.remaining_time
                );
            }
            None if table.status == TableStatus::Dirty => {
                let _ = writeln!(
                    out,
                    "- table {}: {} ({:.2} min left)",
                    table.id, status, table.remaining_time
                );
            }
            None => {
                let _ = writeln!(out, "- table {}: {}", table.id, status);
            }
        }
    }
}
