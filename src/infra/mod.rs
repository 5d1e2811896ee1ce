pub mod config;
pub mod utils;
pub mod workers_ai;
