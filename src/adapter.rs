pub mod app_config;
pub mod driven;
pub mod driver;
pub mod store_bootstrap;
pub mod store_error;

pub use app_config::AppConfig;
pub use store_bootstrap::StoreBootstrap;
