mod app_config;
mod config;
pub mod export;
pub mod report;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_USER_AGENT};
pub use export::{flatten_report, render_csv, Column, CsvRow, ExportError};
pub use report::{
    CatalogProduct, ContactInfo, FaqEntry, FaqSection, HeroProduct, ImportantLinks, LabeledLink,
    PageText, ScrapeReport, SocialLinks,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
