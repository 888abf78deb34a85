//! # Infrastructure Common
//!
//! 这个 crate 提供了条件组件容器基础设施层的公共类型和工具。
//!
//! ## 核心类型
//!
//! - [`TypeInfo`] - 组件类型标识
//! - [`Environment`] - 扁平化的配置快照
//! - [`DependencyError`] / [`ConfigError`] / [`InfrastructureError`] - 错误分类
//!
//! ## 系统属性
//!
//! 进程级的系统属性表，通过 [`set_system_property`] 写入，
//! 由配置层的系统属性提供者读取。

pub mod configuration;
pub mod errors;
pub mod metadata;

pub use configuration::*;
pub use errors::*;
pub use metadata::*;

use std::collections::BTreeMap;

/// 全局系统属性表
static SYSTEM_PROPERTIES: once_cell::sync::Lazy<parking_lot::RwLock<BTreeMap<String, String>>> =
    once_cell::sync::Lazy::new(|| parking_lot::RwLock::new(BTreeMap::new()));

/// 设置系统属性，返回被覆盖的旧值
pub fn set_system_property(key: impl Into<String>, value: impl Into<String>) -> Option<String> {
    let key = key.into();
    let value = value.into();
    tracing::debug!("设置系统属性: {} = {}", key, value);
    SYSTEM_PROPERTIES.write().insert(key, value)
}

/// 获取系统属性
pub fn get_system_property(key: &str) -> Option<String> {
    SYSTEM_PROPERTIES.read().get(key).cloned()
}

/// 移除系统属性
pub fn clear_system_property(key: &str) -> Option<String> {
    SYSTEM_PROPERTIES.write().remove(key)
}

/// 获取全部系统属性的快照
pub fn system_properties() -> BTreeMap<String, String> {
    SYSTEM_PROPERTIES.read().clone()
}
