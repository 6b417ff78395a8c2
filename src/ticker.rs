//! Wall-clock timer that paces a [`RestaurantSim`].
//!
//! The timer thread only signals; the simulator stays owned by the thread that
//! receives the signals, so every tick runs to completion before the next one
//! is taken. Ticks that fire while the consumer is busy are coalesced.

use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TrySendError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::restaurant::RestaurantSim;
use crate::state::RestaurantState;

pub struct Ticker {
    period: Duration,
    rx: Receiver<()>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn(period: Duration) -> Self {
        let (tx, rx) = mpsc::sync_channel(1);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                thread::sleep(period);
                match tx.try_send(()) {
                    Ok(()) | Err(TrySendError::Full(())) => {}
                    Err(TrySendError::Disconnected(())) => break,
                }
            }
        });
        debug!("ticker started with period {:?}", period);
        Self {
            period,
            rx,
            stop,
            handle: Some(handle),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Blocks until the next tick. Returns false once the timer has shut down.
    pub fn wait(&self) -> bool {
        self.rx.recv().is_ok()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        debug!("ticker stopped");
    }
}

/// Ticks `sim` once per timer period, `ticks` times, handing each committed
/// snapshot to `on_tick`.
pub fn drive<F>(sim: &mut RestaurantSim, ticker: &Ticker, ticks: usize, mut on_tick: F)
where
    F: FnMut(&RestaurantState),
{
    let real_seconds = ticker.period().as_secs_f64();
    for _ in 0..ticks {
        if !ticker.wait() {
            break;
        }
        on_tick(sim.tick(real_seconds));
    }
}
