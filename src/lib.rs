//! Analytics core of a personal-finance dashboard: bounded month arithmetic,
//! rolling-window balance aggregation, and alignment of independently dated
//! series onto one chart grid with seeded colors and optional inflation
//! adjustment.

pub mod balance;
pub mod color;
pub mod error;
pub mod fmt;
pub mod inflation;
pub mod loader;
pub mod models;
pub mod month;
pub mod series;
pub mod settings;
pub mod timescale;
pub mod window;

pub use error::{MoneygraphError, Result};
pub use month::{BoundedMonth, MonthChangeAction, MonthRange, YearMonth};
pub use timescale::Timescale;
