//! Business-case assumptions: capital, operating volumes, prices and rates

mod parameters;
pub mod loader;

pub use parameters::{
    ProjectParameters, SessionVolume, DAYS_PER_YEAR, MAX_DAILY_SESSIONS_PER_CHARGER,
};
pub use loader::{load_parameters, ConfigError};
