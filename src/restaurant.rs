//! Stepped discrete-event simulation of a restaurant: one FIFO queue feeding
//! `tableCount` tables, each of which is cleaned after every service.
//!
//! A tick advances simulated time by `real_seconds * speed / 60` minutes and
//! then, in order: records table occupancy, admits at most one arrival,
//! advances every busy table, prunes departed customers, seats waiting
//! customers and refreshes the running statistics.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::events::{Event, TimedEvent};
use crate::models::{RestaurantConfig, MAX_TABLES};
use crate::monte_carlo::exponential_time;
use crate::state::{
    CustomerEntity, CustomerStatus, RestaurantState, SimulationStats, TableEntity, TableStatus,
};

/// Simulated minutes a table spends being cleaned.
pub const CLEANING_TIME: f64 = 2.0;
/// Wall-clock period between ticks.
pub const TICK_PERIOD: Duration = Duration::from_millis(100);

#[derive(Clone, Debug, Default)]
struct Accumulators {
    total_wait: f64,
    total_system: f64,
    occupied_area: f64,
}

pub struct RestaurantSim {
    config: RestaurantConfig,
    state: RestaurantState,
    rng: StdRng,
    next_arrival: f64,
    totals: Accumulators,
    events: Vec<TimedEvent>,
}

impl RestaurantSim {
    pub fn new(config: RestaurantConfig) -> Result<Self> {
        validate_core(&config)?;
        let rng = seeded_rng(config.seed);
        let state = zero_state(&config);
        let mut sim = Self {
            config,
            state,
            rng,
            next_arrival: 0.0,
            totals: Accumulators::default(),
            events: Vec::new(),
        };
        sim.next_arrival = sim.draw_interarrival();
        Ok(sim)
    }

    pub fn config(&self) -> &RestaurantConfig {
        &self.config
    }

    pub fn state(&self) -> &RestaurantState {
        &self.state
    }

    pub fn snapshot(&self) -> RestaurantState {
        self.state.clone()
    }

    /// Simulated minute at which the next customer arrives.
    pub fn next_arrival(&self) -> f64 {
        self.next_arrival
    }

    pub fn start(&mut self) {
        if !self.state.is_running {
            if self.state.current_time == 0.0 {
                self.reset();
            }
            self.state.is_running = true;
            self.state.is_paused = false;
            info!("restaurant simulation started");
        } else if self.state.is_paused {
            self.state.is_paused = false;
            info!(
                "restaurant simulation resumed at {:.2} min",
                self.state.current_time
            );
        }
    }

    pub fn pause(&mut self) {
        if self.state.is_running && !self.state.is_paused {
            self.state.is_paused = true;
            info!(
                "restaurant simulation paused at {:.2} min",
                self.state.current_time
            );
        }
    }

    /// Halts the run and returns its final snapshot; the simulator is left in
    /// its zero state, ready for a fresh start.
    pub fn stop(&mut self) -> RestaurantState {
        let mut final_state = self.snapshot();
        final_state.is_running = false;
        final_state.is_paused = false;
        info!(
            "restaurant simulation stopped at {:.2} min: {} served, {} lost",
            final_state.current_time,
            final_state.stats.customers_served,
            final_state.stats.customers_lost
        );
        self.reset();
        final_state
    }

    /// Rebuilds the zero state from the configuration. Seeded configurations
    /// replay the same arrivals after every reset.
    pub fn reset(&mut self) {
        if self.config.seed.is_some() {
            self.rng = seeded_rng(self.config.seed);
        }
        self.state = zero_state(&self.config);
        self.totals = Accumulators::default();
        self.events.clear();
        self.next_arrival = self.draw_interarrival();
        debug!(
            "restaurant reset: {} tables, first arrival at {:.3} min",
            self.config.table_count, self.next_arrival
        );
    }

    /// Takes effect from the next tick; the run is not reset.
    pub fn set_simulation_speed(&mut self, speed: f64) -> Result<()> {
        validate_speed(speed)?;
        self.config.simulation_speed = speed;
        Ok(())
    }

    /// Advances the simulation by one tick covering `real_seconds` of wall
    /// clock. Does nothing unless the simulation is running and unpaused.
    pub fn tick(&mut self, real_seconds: f64) -> &RestaurantState {
        if self.state.is_running && !self.state.is_paused {
            let dt_sim = real_seconds * self.config.simulation_speed / 60.0;
            self.advance(dt_sim);
        }
        &self.state
    }

    /// Runs `ticks` back-to-back ticks of [`TICK_PERIOD`] without waiting.
    pub fn run_ticks(&mut self, ticks: usize) -> &RestaurantState {
        let real_seconds = TICK_PERIOD.as_secs_f64();
        for _ in 0..ticks {
            self.tick(real_seconds);
        }
        &self.state
    }

    /// Events recorded since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<TimedEvent> {
        std::mem::take(&mut self.events)
    }

    fn advance(&mut self, dt_sim: f64) {
        let state = &mut self.state;
        state.current_time += dt_sim;
        let now = state.current_time;

        let occupied = state
            .tables
            .iter()
            .filter(|table| table.status == TableStatus::Occupied)
            .count();
        self.totals.occupied_area += occupied as f64 * dt_sim;

        if now >= self.next_arrival {
            state.stats.total_customers += 1;
            let mut customer = CustomerEntity {
                id: state.stats.total_customers,
                status: CustomerStatus::Waiting,
                arrival_time: now,
                seat_time: None,
                leave_time: None,
            };
            record(&mut self.events, now, Event::Arrival {
                customer_id: customer.id,
            });

            let population = state.queue.len() + state.active_customers.len();
            let full = self
                .config
                .capacity_limit()
                .map_or(false, |limit| population >= limit);
            if full {
                customer.status = CustomerStatus::Lost;
                state.stats.customers_lost += 1;
                record(&mut self.events, now, Event::Lost {
                    customer_id: customer.id,
                });
            } else {
                state.queue.push_back(customer);
            }

            let arrival_rate = self.config.arrival_lambda / 60.0;
            self.next_arrival = now + exponential_time(&mut self.rng, arrival_rate);
        }

        for table in state.tables.iter_mut() {
            if table.status == TableStatus::Free {
                continue;
            }
            table.remaining_time -= dt_sim;
            if table.remaining_time > 0.0 {
                continue;
            }
            match table.status {
                TableStatus::Occupied => {
                    table.status = TableStatus::Dirty;
                    table.remaining_time = CLEANING_TIME;
                    let customer_id = table.current_customer_id.take();
                    let departing = customer_id.and_then(|id| {
                        state
                            .active_customers
                            .iter_mut()
                            .find(|customer| customer.id == id)
                    });
                    if let Some(customer) = departing {
                        customer.status = CustomerStatus::Leaving;
                        customer.leave_time = Some(now);
                        self.totals.total_system += now - customer.arrival_time;
                        state.stats.customers_served += 1;
                        record(&mut self.events, now, Event::ServiceComplete {
                            customer_id: customer.id,
                            table_id: table.id,
                        });
                    }
                }
                TableStatus::Dirty => {
                    table.status = TableStatus::Free;
                    table.remaining_time = 0.0;
                    record(&mut self.events, now, Event::TableCleaned { table_id: table.id });
                }
                TableStatus::Free => {}
            }
        }

        state
            .active_customers
            .retain(|customer| customer.status != CustomerStatus::Leaving);

        let service_rate = self.config.service_mu / 60.0;
        for table in state
            .tables
            .iter_mut()
            .filter(|table| table.status == TableStatus::Free)
        {
            let mut customer = match state.queue.pop_front() {
                Some(customer) => customer,
                None => break,
            };
            customer.status = CustomerStatus::Eating;
            customer.seat_time = Some(now);
            self.totals.total_wait += now - customer.arrival_time;

            table.status = TableStatus::Occupied;
            table.current_customer_id = Some(customer.id);
            table.remaining_time = exponential_time(&mut self.rng, service_rate);
            record(&mut self.events, now, Event::Seated {
                customer_id: customer.id,
                table_id: table.id,
            });
            state.active_customers.push(customer);
        }

        let stats = &mut state.stats;
        if stats.customers_served > 0 {
            let served = stats.customers_served as f64;
            stats.avg_system_time = self.totals.total_system / served;
            stats.avg_wait_time = self.totals.total_wait / served;
        }
        if now > 0.0 {
            stats.active_tables_avg = self.totals.occupied_area / now;
            stats.utilization = stats.active_tables_avg / self.config.table_count as f64;
        }
    }

    fn draw_interarrival(&mut self) -> f64 {
        exponential_time(&mut self.rng, self.config.arrival_lambda / 60.0)
    }
}

fn record(events: &mut Vec<TimedEvent>, time: f64, event: Event) {
    debug!("[{:.3} min] {}", time, event);
    events.push(TimedEvent::new(time, event));
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn zero_state(config: &RestaurantConfig) -> RestaurantState {
    RestaurantState {
        current_time: 0.0,
        tables: (1..=config.table_count)
            .map(|id| TableEntity {
                id,
                status: TableStatus::Free,
                current_customer_id: None,
                remaining_time: 0.0,
            })
            .collect(),
        queue: VecDeque::new(),
        active_customers: Vec::new(),
        stats: SimulationStats::default(),
        is_running: false,
        is_paused: false,
    }
}

/// Looser than [`RestaurantConfig::validate`]: a single table and zero rates
/// are accepted so degenerate scenarios can still be stepped.
fn validate_core(config: &RestaurantConfig) -> Result<()> {
    if !(1..=MAX_TABLES).contains(&config.table_count) {
        return Err(Error::InvalidTableCount {
            min: 1,
            max: MAX_TABLES,
            got: config.table_count,
        });
    }
    validate_speed(config.simulation_speed)?;
    for (name, value) in [
        ("arrival rate", config.arrival_lambda),
        ("service rate", config.service_mu),
    ] {
        if value.is_nan() || value < 0.0 {
            return Err(Error::NegativeRate { name, value });
        }
    }
    Ok(())
}

/// Any finite positive multiplier; the 1..=100 slider range is checked by
/// [`RestaurantConfig::validate`].
fn validate_speed(speed: f64) -> Result<()> {
    if !speed.is_finite() || speed <= 0.0 {
        return Err(Error::InvalidRate {
            name: "simulation speed",
            value: speed,
        });
    }
    Ok(())
}

/// Renders simulated minutes as a wall clock that opens at 08:00 on day 1.
///
/// The day counter advances every 24 h of elapsed time, not at midnight, so
/// 16 h in reads "Day 1 - 00:00". This matches the display clock it replaces.
pub fn format_clock(total_minutes: f64) -> String {
    let total = total_minutes.max(0.0).floor() as u64;
    let days = total / (24 * 60);
    let hours = (total % (24 * 60)) / 60;
    let minutes = total % 60;
    let hour_of_day = (hours + 8) % 24;
    format!("Day {} - {:02}:{:02}", days + 1, hour_of_day, minutes)
}
