pub mod config;
pub mod config_loader;
pub mod models;
pub mod timeframe;

pub use config::{AnalysisConfig, AppConfig, EventThresholds, OutputConfig};
pub use config_loader::ConfigLoader;
pub use models::{
    percentage_change, CorrelationStrength, EventType, StockObservation, WeatherCondition,
    WeatherObservation,
};
pub use timeframe::{parse_date, validate_date_range, Timeframe, MAX_RANGE_DAYS};
