pub mod config;
pub mod employees;
pub mod flash;
pub mod http;
pub mod seed;
pub mod views;

pub use config::AppConfig;
pub use http::{AppState, ServeConfig, build_router, serve};
