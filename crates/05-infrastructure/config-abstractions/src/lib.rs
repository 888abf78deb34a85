//! # Configuration Abstractions
//!
//! 配置管理抽象层，定义配置源的统一接口。
//!
//! ## 核心接口
//!
//! - [`ConfigProvider`] - 配置提供者接口
//! - [`FileConfigProvider`] - 文件配置提供者接口
//! - [`EnvironmentConfigProvider`] - 环境变量配置提供者接口

pub mod provider;

pub use provider::*;
