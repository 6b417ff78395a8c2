use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::cli::{MonteCarloArgs, QueueArgs, RestaurantArgs};
use crate::error::{Error, Result};
use crate::models::{
    Distribution, ModelType, MonteCarloParams, ProbabilityQuery, QueueModelParams,
    RestaurantConfig,
};

/// Reads a TOML or JSON file, picked by extension.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}

/// Queue-model file: every field optional so flags can fill the gaps.
#[derive(Debug, Default, Deserialize)]
struct QueueFile {
    model: Option<ModelType>,
    lambda: Option<f64>,
    mu: Option<f64>,
    c: Option<u32>,
    #[serde(rename = "N")]
    capacity: Option<u32>,
    query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonteCarloFile {
    distribution: Option<Distribution>,
    lambda: Option<f64>,
    n_variables: Option<usize>,
    n_observations: Option<usize>,
    seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RestaurantFile {
    table_count: Option<usize>,
    queue_limit: Option<usize>,
    unbounded_queue: Option<bool>,
    arrival_lambda: Option<f64>,
    service_mu: Option<f64>,
    simulation_speed: Option<f64>,
    seed: Option<u64>,
    ticks: Option<usize>,
}

pub struct QueueRequest {
    pub model: ModelType,
    pub params: QueueModelParams,
    pub query: Option<ProbabilityQuery>,
}

pub struct RestaurantRequest {
    pub config: RestaurantConfig,
    pub ticks: usize,
}

pub fn build_queue_request(args: &QueueArgs) -> Result<QueueRequest> {
    let file: QueueFile = match &args.config {
        Some(path) => load_config(path)?,
        None => QueueFile::default(),
    };

    let model = args
        .model
        .clone()
        .map(ModelType::from)
        .or(file.model)
        .ok_or_else(|| missing("--model", "model"))?;
    let lambda = args.lambda.or(file.lambda).ok_or_else(|| missing("--lambda", "lambda"))?;
    let mu = args.mu.or(file.mu).ok_or_else(|| missing("--mu", "mu"))?;
    let query = match args.query.as_deref().or(file.query.as_deref()) {
        Some(raw) => Some(raw.parse::<ProbabilityQuery>()?),
        None => None,
    };

    Ok(QueueRequest {
        model,
        params: QueueModelParams {
            lambda,
            mu,
            servers: args.servers.or(file.c),
            capacity: args.capacity.or(file.capacity),
        },
        query,
    })
}

pub fn build_monte_carlo_params(args: &MonteCarloArgs) -> Result<MonteCarloParams> {
    let file: MonteCarloFile = match &args.config {
        Some(path) => load_config(path)?,
        None => MonteCarloFile::default(),
    };

    Ok(MonteCarloParams {
        distribution: args
            .distribution
            .clone()
            .map(Distribution::from)
            .or(file.distribution)
            .ok_or_else(|| missing("--distribution", "distribution"))?,
        lambda: args
            .lambda
            .or(file.lambda)
            .ok_or_else(|| missing("--lambda", "lambda"))?,
        n_variables: args
            .variables
            .or(file.n_variables)
            .ok_or_else(|| missing("--variables", "nVariables"))?,
        n_observations: args
            .observations
            .or(file.n_observations)
            .ok_or_else(|| missing("--observations", "nObservations"))?,
        seed: args.seed.or(file.seed),
    })
}

pub fn build_restaurant_request(args: &RestaurantArgs) -> Result<RestaurantRequest> {
    let file: RestaurantFile = match &args.config {
        Some(path) => load_config(path)?,
        None => RestaurantFile::default(),
    };
    let defaults = RestaurantConfig::default();

    let config = RestaurantConfig {
        table_count: args
            .tables
            .or(file.table_count)
            .unwrap_or(defaults.table_count),
        queue_limit: resolve_queue_limit(args, &file, defaults.queue_limit)?,
        arrival_lambda: args
            .arrival_rate
            .or(file.arrival_lambda)
            .unwrap_or(defaults.arrival_lambda),
        service_mu: args
            .service_rate
            .or(file.service_mu)
            .unwrap_or(defaults.service_mu),
        simulation_speed: args
            .speed
            .or(file.simulation_speed)
            .unwrap_or(defaults.simulation_speed),
        seed: args.seed.or(file.seed),
    };
    config.validate()?;

    let ticks = args
        .ticks
        .or(file.ticks)
        .ok_or_else(|| missing("--ticks", "ticks"))?;
    if ticks == 0 {
        return Err(Error::Cli("ticks must be greater than 0".to_string()));
    }

    Ok(RestaurantRequest { config, ticks })
}

/// `None` is an unbounded line. Flags beat the file, and the file beats the
/// default limit.
fn resolve_queue_limit(
    args: &RestaurantArgs,
    file: &RestaurantFile,
    default: Option<usize>,
) -> Result<Option<usize>> {
    if let Some(limit) = args.queue_limit {
        return Ok(Some(limit));
    }
    if args.unbounded_queue {
        return Ok(None);
    }
    match (file.queue_limit, file.unbounded_queue.unwrap_or(false)) {
        (Some(_), true) => Err(Error::ConfigParse(
            "config sets both `queueLimit` and `unboundedQueue`".to_string(),
        )),
        (Some(limit), false) => Ok(Some(limit)),
        (None, true) => Ok(None),
        (None, false) => Ok(default),
    }
}

fn missing(flag: &str, key: &str) -> Error {
    Error::Cli(format!("missing {} (or `{}` in the config file)", flag, key))
}
