use serde::Serialize;
use std::collections::VecDeque;

use crate::models::{ModelType, MonteCarloParams, QueueModelParams};

/// One row of the steady-state population distribution.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProbabilityEntry {
    pub n: u32,
    pub pn: f64,
    pub cumulative_pn: f64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueueModelResults {
    pub rho: f64,
    pub p0: f64,
    pub ls: f64,
    pub lq: f64,
    pub ws: f64,
    pub wq: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c_barra: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lambda_eff: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lambda_perdida: Option<f64>,
    pub probabilities: Vec<ProbabilityEntry>,
    pub model_type: ModelType,
    pub params: QueueModelParams,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRow {
    pub observation_index: usize,
    pub random_values: Vec<f64>,
    pub simulated_values: Vec<f64>,
}

/// Per-variable summary statistics, indexed by variable column.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloStats {
    pub mean: Vec<f64>,
    pub std_dev: Vec<f64>,
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MonteCarloResults {
    pub params: MonteCarloParams,
    pub data: Vec<SimulationRow>,
    pub statistics: MonteCarloStats,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Free,
    Occupied,
    Dirty,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableEntity {
    pub id: usize,
    pub status: TableStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_customer_id: Option<u64>,
    pub remaining_time: f64,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerStatus {
    Waiting,
    Eating,
    Leaving,
    Lost,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerEntity {
    pub id: u64,
    pub status: CustomerStatus,
    pub arrival_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leave_time: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStats {
    pub total_customers: u64,
    pub customers_served: u64,
    pub customers_lost: u64,
    pub avg_wait_time: f64,
    pub avg_system_time: f64,
    pub utilization: f64,
    pub active_tables_avg: f64,
}

/// Committed snapshot of the restaurant simulation. Times are in simulated
/// minutes.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantState {
    pub current_time: f64,
    pub tables: Vec<TableEntity>,
    pub queue: VecDeque<CustomerEntity>,
    pub active_customers: Vec<CustomerEntity>,
    pub stats: SimulationStats,
    pub is_running: bool,
    pub is_paused: bool,
}

impl RestaurantState {
    pub fn occupied_tables(&self) -> usize {
        self.tables
            .iter()
            .filter(|table| table.status == TableStatus::Occupied)
            .count()
    }

    /// Customers currently inside: waiting plus seated.
    pub fn population(&self) -> usize {
        self.queue.len() + self.active_customers.len()
    }
}
