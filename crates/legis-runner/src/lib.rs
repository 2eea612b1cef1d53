pub mod config;
pub mod doctor;
pub mod runner;

pub use config::*;
pub use doctor::*;
pub use runner::*;
