pub mod app;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod models;
pub mod quality;
pub mod session;
pub mod ui;
pub mod upstream;
pub mod validation;
pub mod state;

pub use app::router;
pub use config::Config;
pub use state::AppState;
