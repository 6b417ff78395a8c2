use log::info;
use queue_lab::cli::{self, Command, FormatArg};
use queue_lab::config;
use queue_lab::error::Result;
use queue_lab::models::ModelType;
use queue_lab::monte_carlo::run_monte_carlo;
use queue_lab::output::{
    Formatter, HumanFormatter, JsonFormatter, QueueReport, Report, RestaurantReport,
    SummaryFormatter,
};
use queue_lab::queueing;
use queue_lab::restaurant::{RestaurantSim, TICK_PERIOD};
use queue_lab::ticker::{self, Ticker};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::parse_args()?;
    init_logging(cli.verbose);

    let (report, format) = match cli.command {
        Command::Queue(args) => {
            let request = config::build_queue_request(&args)?;
            let results = queueing::solve(request.model, &request.params)?;
            (Report::Queue(QueueReport::new(results, request.query)), args.format)
        }
        Command::MonteCarlo(args) => {
            let params = config::build_monte_carlo_params(&args)?;
            (Report::MonteCarlo(run_monte_carlo(&params)?), args.format)
        }
        Command::Restaurant(args) => {
            let request = config::build_restaurant_request(&args)?;
            let mut sim = RestaurantSim::new(request.config)?;
            sim.start();
            if args.realtime {
                let ticker = Ticker::spawn(TICK_PERIOD);
                ticker::drive(&mut sim, &ticker, request.ticks, |_| {});
            } else {
                sim.run_ticks(request.ticks);
            }
            let events = sim.drain_events();
            info!("{} events recorded over {} ticks", events.len(), request.ticks);
            let config = sim.config().clone();
            let state = sim.stop();
            (Report::Restaurant(RestaurantReport::new(config, state)), args.format)
        }
        Command::ListModels => {
            for model in ModelType::ALL {
                println!("{}", model);
            }
            return Ok(());
        }
    };

    print!("{}", formatter_for(format).write(&report));
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn formatter_for(format: FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}
