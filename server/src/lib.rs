pub mod cli;
pub mod cli_error;
pub mod data_store;
pub mod reservation_overview;
mod setup;
pub mod slot_engine;
