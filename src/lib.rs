pub mod config;
pub mod physics;
