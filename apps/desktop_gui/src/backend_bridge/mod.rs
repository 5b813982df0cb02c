//! Bridge between the UI thread and the storage worker.

pub mod commands;
pub mod runtime;
