pub mod log_collector;

pub use log_collector::{InputError, LogCollector};
