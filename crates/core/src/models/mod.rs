//! Domain models for weather and market observation series.

mod event;
mod stock;
mod strength;
mod weather;

pub use event::EventType;
pub use stock::{percentage_change, StockObservation};
pub use strength::CorrelationStrength;
pub use weather::{WeatherCondition, WeatherObservation};
