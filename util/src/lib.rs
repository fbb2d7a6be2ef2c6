pub mod config;
pub mod dates;
pub mod state;
pub mod validation;
