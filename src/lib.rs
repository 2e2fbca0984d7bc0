pub mod cli;
pub mod config;
#[cfg(feature = "gui")]
pub mod gui;
pub mod logging;
pub mod motion;
pub mod registry;
pub mod render;
pub mod scheduler;
pub mod simulation;
pub mod types;
