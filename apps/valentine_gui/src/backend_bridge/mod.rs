//! Background worker: owns the tokio runtime for network calls the UI never awaits.

pub mod commands;
pub mod runtime;
