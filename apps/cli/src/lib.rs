//! Command-line front end for the vardiff engine.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dto;
pub mod progress;
