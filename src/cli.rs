use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::models::{Distribution, ModelType};

#[derive(Parser, Debug)]
#[command(name = "queue-lab", version, about = "Queueing-theory and simulation workbench")]
pub struct Cli {
    /// Log solver and simulator events to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve an M/M/1, M/M/1/N, M/M/c or M/M/c/N model.
    Queue(QueueArgs),
    /// Generate Poisson or exponential variates and summarize them.
    MonteCarlo(MonteCarloArgs),
    /// Run the restaurant discrete-event simulation.
    Restaurant(RestaurantArgs),
    /// Print the supported queueing model tags.
    ListModels,
}

#[derive(Args, Debug)]
pub struct QueueArgs {
    #[arg(long, value_enum)]
    pub model: Option<ModelArg>,
    #[arg(long)]
    pub lambda: Option<f64>,
    #[arg(long)]
    pub mu: Option<f64>,
    #[arg(short = 'c', long, help = "Number of parallel servers (c)")]
    pub servers: Option<u32>,
    #[arg(short = 'n', long, help = "System capacity, queue plus service (N)")]
    pub capacity: Option<u32>,
    #[arg(long, help = "Probability query such as '<=3', '>2' or '=0'")]
    pub query: Option<String>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct MonteCarloArgs {
    #[arg(long, value_enum)]
    pub distribution: Option<DistributionArg>,
    #[arg(long)]
    pub lambda: Option<f64>,
    #[arg(long)]
    pub variables: Option<usize>,
    #[arg(long)]
    pub observations: Option<usize>,
    #[arg(long, help = "Seed the generator; omit for a fresh random run")]
    pub seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RestaurantArgs {
    #[arg(long)]
    pub tables: Option<usize>,
    #[arg(long, conflicts_with = "unbounded_queue")]
    pub queue_limit: Option<usize>,
    #[arg(long, help = "Let the waiting line grow without limit")]
    pub unbounded_queue: bool,
    #[arg(long, help = "Customer arrivals per hour")]
    pub arrival_rate: Option<f64>,
    #[arg(long, help = "Services completed per hour at each table")]
    pub service_rate: Option<f64>,
    #[arg(long, help = "Simulated seconds per real second")]
    pub speed: Option<f64>,
    #[arg(long, help = "Number of 100 ms ticks to run")]
    pub ticks: Option<usize>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, help = "Pace ticks on the wall clock instead of running flat out")]
    pub realtime: bool,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum ModelArg {
    Mm1,
    Mm1n,
    Mmc,
    Mmcn,
}

impl From<ModelArg> for ModelType {
    fn from(value: ModelArg) -> Self {
        match value {
            ModelArg::Mm1 => ModelType::Mm1,
            ModelArg::Mm1n => ModelType::Mm1n,
            ModelArg::Mmc => ModelType::Mmc,
            ModelArg::Mmcn => ModelType::Mmcn,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
pub enum DistributionArg {
    Poisson,
    Exponential,
}

impl From<DistributionArg> for Distribution {
    fn from(value: DistributionArg) -> Self {
        match value {
            DistributionArg::Poisson => Distribution::Poisson,
            DistributionArg::Exponential => Distribution::Exponential,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    #[default]
    Human,
    Summary,
    Json,
}

pub fn parse_args() -> Result<Cli> {
    Cli::try_parse().map_err(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => Error::Cli(err.to_string()),
    })
}
