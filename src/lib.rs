//! Training data pipeline for Swedish parliamentary motion title generation.

pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod text;
