//! # Pipeline Module
//!
//! High-level orchestration: load the Roary inputs, run the engine stages,
//! and write the staged artifacts.

pub mod reconcile;

pub use reconcile::{reconcile, run_reconcile, ReconcileOptions, ReconcileOutputs, ReconcilePipeline};
