pub mod config;
pub mod reconcile;
