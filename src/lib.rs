#![doc(test(attr(deny(warnings))))]

//! Staffing Core offers foundational scheduling, allocation, and utilization
//! primitives that power higher level staffing dashboards and CLIs.

pub mod config;
pub mod domain;
pub mod errors;
pub mod schedule;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Staffing Core tracing initialized.");
    });
}
