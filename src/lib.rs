pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod guard;
pub mod handles;
pub mod logging;
pub mod script;
pub mod viewport;

use std::ffi::OsString;

pub use error::{AppError, AppResult};

/// Entrypoint used by the `cropme` binary.
pub fn run(args: Vec<OsString>) -> AppResult<()> {
    logging::init();
    tracing::info!("starting cropme");
    app::run(args)
}
