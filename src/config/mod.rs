//! Configuration module for PicLearn.
//!
//! Provides `AppConfig` (top-level settings), the learning-service and
//! topic-enrichment sub-configs, `AppPaths` for cross-platform directories,
//! and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, ServiceConfig, TopicConfig};
