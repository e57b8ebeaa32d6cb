pub mod cli;
pub mod models;
pub mod services;
pub mod utils;
