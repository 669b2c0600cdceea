pub mod config;
pub mod memory;
pub mod replacement;
pub mod simulation;
