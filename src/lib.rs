//! Discrete-time CPU scheduling simulator.
//!
//! Four single-processor policies share the [`scheduler::Scheduler`] contract:
//! at every tick the driver hands the current time and the process list to the
//! policy and gets back the index of the process to run, or `None` to idle.

pub mod config;
pub mod logger;
pub mod report;
pub mod scheduler;
pub mod workload;
