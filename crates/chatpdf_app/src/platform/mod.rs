mod app;
mod cli;
mod effects;
mod logging;
mod persistence;
mod ui;

pub use app::run_app;
pub use cli::Args;
