//! # Configuration Implementation
//!
//! 配置管理的具体实现，提供各种配置源和分层合并功能。
//!
//! ## 主要组件
//!
//! - [`ConfigManager`] - 按优先级合并配置源，生成环境快照
//! - [`MapConfigProvider`] - 内存配置提供者（默认值、命令行属性）
//! - [`SystemPropertiesProvider`] - 系统属性配置提供者
//! - [`EnvironmentConfigProviderImpl`] - 环境变量配置提供者
//! - [`TomlConfigProvider`] - TOML 配置提供者
//! - [`JsonConfigProvider`] - JSON 配置提供者

pub mod manager;
pub mod providers;

pub use manager::*;
pub use providers::*;
