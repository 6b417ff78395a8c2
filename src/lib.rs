pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod monte_carlo;
pub mod numeric;
pub mod output;
pub mod queueing;
pub mod restaurant;
pub mod state;
pub mod ticker;
