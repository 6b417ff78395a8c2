use serde::Serialize;
use std::fmt;

/// Discrete events processed by a restaurant tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Event {
    Arrival { customer_id: u64 },
    Lost { customer_id: u64 },
    Seated { customer_id: u64, table_id: usize },
    ServiceComplete { customer_id: u64, table_id: usize },
    TableCleaned { table_id: usize },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Arrival { customer_id } => write!(f, "customer {} arrives", customer_id),
            Event::Lost { customer_id } => {
                write!(f, "customer {} turned away (restaurant full)", customer_id)
            }
            Event::Seated {
                customer_id,
                table_id,
            } => write!(f, "customer {} seated at table {}", customer_id, table_id),
            Event::ServiceComplete {
                customer_id,
                table_id,
            } => write!(f, "customer {} leaves table {}", customer_id, table_id),
            Event::TableCleaned { table_id } => write!(f, "table {} cleaned", table_id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimedEvent {
    pub time: f64,
    pub event: Event,
}

impl TimedEvent {
    pub fn new(time: f64, event: Event) -> Self {
        Self { time, event }
    }
}

impl fmt::Display for TimedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>9.3} min] {}", self.time, self.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_events_render_with_simulated_minutes() {
        let event = TimedEvent::new(
            12.5,
            Event::Seated {
                customer_id: 3,
                table_id: 2,
            },
        );
        assert_eq!(event.to_string(), "[   12.500 min] customer 3 seated at table 2");
    }

    #[test]
    fn events_serialize_with_a_kind_tag() {
        let json = serde_json::to_string(&Event::TableCleaned { table_id: 4 })
            .expect("event should serialize");
        assert_eq!(json, r#"{"kind":"table-cleaned","table_id":4}"#);
    }
}
