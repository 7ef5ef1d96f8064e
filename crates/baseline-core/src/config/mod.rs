//! Configuration system for the Baseline checker.
//! TOML-based, 5-layer resolution: CLI > env > project > user > defaults.

pub mod baseline_config;
pub mod dataset_config;
pub mod policy_config;
pub mod scan_config;
pub mod style_config;

pub use baseline_config::{BaselineConfig, CliOverrides};
pub use dataset_config::DatasetConfig;
pub use policy_config::{PolicyConfig, TargetSetting};
pub use scan_config::ScanConfig;
pub use style_config::StyleConfig;
