pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod service;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use state::{AppState, CounterBackend};
