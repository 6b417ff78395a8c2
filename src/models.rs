use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ModelType {
    Mm1,
    Mm1n,
    Mmc,
    Mmcn,
}

impl ModelType {
    pub const ALL: [ModelType; 4] = [
        ModelType::Mm1,
        ModelType::Mm1n,
        ModelType::Mmc,
        ModelType::Mmcn,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ModelType::Mm1 => "M/M/1",
            ModelType::Mm1n => "M/M/1/N",
            ModelType::Mmc => "M/M/c",
            ModelType::Mmcn => "M/M/c/N",
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, ModelType::Mm1n | ModelType::Mmcn)
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ModelType::Mm1 => "mm1",
            ModelType::Mm1n => "mm1n",
            ModelType::Mmc => "mmc",
            ModelType::Mmcn => "mmcn",
        };
        write!(f, "{}", tag)
    }
}

/// Inputs for one of the M/M family solvers.
///
/// `servers` and `capacity` serialize as `c` and `N`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct QueueModelParams {
    pub lambda: f64,
    pub mu: f64,
    #[serde(default, rename = "c", skip_serializing_if = "Option::is_none")]
    pub servers: Option<u32>,
    #[serde(default, rename = "N", skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl QueueModelParams {
    pub fn new(lambda: f64, mu: f64) -> Self {
        Self {
            lambda,
            mu,
            servers: None,
            capacity: None,
        }
    }

    pub fn with_servers(mut self, servers: u32) -> Self {
        self.servers = Some(servers);
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Distribution {
    Poisson,
    Exponential,
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Poisson => write!(f, "poisson"),
            Distribution::Exponential => write!(f, "exponential"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloParams {
    pub distribution: Distribution,
    pub lambda: f64,
    pub n_variables: usize,
    pub n_observations: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

pub const MIN_TABLES: usize = 4;
pub const MAX_TABLES: usize = 20;
pub const MIN_SPEED: f64 = 1.0;
pub const MAX_SPEED: f64 = 100.0;

/// Restaurant simulator configuration. Rates are per hour.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantConfig {
    pub table_count: usize,
    #[serde(default)]
    pub queue_limit: Option<usize>,
    pub arrival_lambda: f64,
    pub service_mu: f64,
    #[serde(default = "default_speed")]
    pub simulation_speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            table_count: 8,
            queue_limit: Some(10),
            arrival_lambda: 15.0,
            service_mu: 4.0,
            simulation_speed: default_speed(),
            seed: None,
        }
    }
}

impl RestaurantConfig {
    /// Checks the user-facing ranges: 4 to 20 tables, speed 1 to 100,
    /// positive rates.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_TABLES..=MAX_TABLES).contains(&self.table_count) {
            return Err(Error::InvalidTableCount {
                min: MIN_TABLES,
                max: MAX_TABLES,
                got: self.table_count,
            });
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.simulation_speed) {
            return Err(Error::InvalidSpeed {
                min: MIN_SPEED,
                max: MAX_SPEED,
                got: self.simulation_speed,
            });
        }
        if !self.arrival_lambda.is_finite() || self.arrival_lambda <= 0.0 {
            return Err(Error::InvalidRate {
                name: "arrival rate",
                value: self.arrival_lambda,
            });
        }
        if !self.service_mu.is_finite() || self.service_mu <= 0.0 {
            return Err(Error::InvalidRate {
                name: "service rate",
                value: self.service_mu,
            });
        }
        Ok(())
    }

    /// Most customers allowed in the restaurant at once, seated plus waiting.
    pub fn capacity_limit(&self) -> Option<usize> {
        self.queue_limit.map(|limit| self.table_count + limit)
    }
}

fn default_speed() -> f64 {
    10.0
}

/// Relational operator for point and tail probability queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Comparison {
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
        }
    }
}

impl FromStr for Comparison {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim() {
            "=" | "==" | "eq" => Ok(Comparison::Eq),
            "<" | "lt" => Ok(Comparison::Lt),
            "<=" | "lte" => Ok(Comparison::Lte),
            ">" | "gt" => Ok(Comparison::Gt),
            ">=" | "gte" => Ok(Comparison::Gte),
            other => Err(Error::InvalidQuery(other.to_string())),
        }
    }
}

/// A parsed `P(n <op> k)` query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbabilityQuery {
    pub comparison: Comparison,
    pub k: i64,
}

impl FromStr for ProbabilityQuery {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let split = trimmed
            .find(|ch: char| ch.is_ascii_digit() || ch == '-')
            .ok_or_else(|| Error::InvalidQuery(trimmed.to_string()))?;
        let (op, k) = trimmed.split_at(split);
        let comparison = op
            .parse::<Comparison>()
            .map_err(|_| Error::InvalidQuery(trimmed.to_string()))?;
        let k = k
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::InvalidQuery(trimmed.to_string()))?;
        Ok(Self { comparison, k })
    }
}

impl fmt::Display for ProbabilityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P(n {} {})", self.comparison.symbol(), self.k)
    }
}
