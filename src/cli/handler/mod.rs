// src/cli/handler/mod.rs

pub mod audit;
pub mod compare;
pub mod history;
pub mod hosted;
pub mod init;
