use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{name} must be > 0 (got {value})")]
    InvalidRate { name: &'static str, value: f64 },
    #[error("{name} must not be negative (got {value})")]
    NegativeRate { name: &'static str, value: f64 },
    #[error("server count (c) is required for the {0} model")]
    MissingServers(&'static str),
    #[error("server count (c) must be an integer >= {min} (got {got})")]
    InvalidServers { min: u32, got: u32 },
    #[error("system capacity (N) is required for the {0} model")]
    MissingCapacity(&'static str),
    #[error("system capacity (N) must be a positive integer (got {0})")]
    InvalidCapacity(u32),
    #[error("system capacity (N = {capacity}) must be >= server count (c = {servers})")]
    CapacityBelowServers { capacity: u32, servers: u32 },
    #[error("system is unstable: lambda ({lambda}) must be less than total service rate ({capacity})")]
    Unstable { lambda: f64, capacity: f64 },
    #[error("variable count must be at least 1")]
    InvalidVariables,
    #[error("observation count must be at least 1")]
    InvalidObservations,
    #[error("table count must be between {min} and {max} (got {got})")]
    InvalidTableCount { min: usize, max: usize, got: usize },
    #[error("simulation speed must be between {min} and {max} (got {got})")]
    InvalidSpeed { min: f64, max: f64, got: f64 },
    #[error("invalid probability query '{0}': expected <op><k>, e.g. '<=3'")]
    InvalidQuery(String),
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Cli(String),
}

impl Error {
    /// True for arrival rates that meet or exceed total service capacity.
    pub fn is_instability(&self) -> bool {
        matches!(self, Error::Unstable { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instability_is_distinct_from_input_errors() {
        let unstable = Error::Unstable {
            lambda: 6.0,
            capacity: 6.0,
        };
        assert!(unstable.is_instability());
        assert!(!Error::MissingServers("M/M/c").is_instability());
        assert!(!Error::InvalidRate {
            name: "lambda",
            value: 0.0
        }
        .is_instability());
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = Error::CapacityBelowServers {
            capacity: 2,
            servers: 3,
        };
        assert_eq!(
            err.to_string(),
            "system capacity (N = 2) must be >= server count (c = 3)"
        );
    }
}
