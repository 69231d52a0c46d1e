pub mod auth;
pub mod config_manager;
pub mod error;
pub mod handlers;
pub mod image_decoder;
pub mod language;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod translate;

pub use config_manager::Config;
pub use routes::build_app;
pub use state::AppState;
