//! 配置快照定义

use crate::errors::ConfigError;
use std::collections::BTreeMap;

/// 环境配置快照
///
/// 启动时由各配置源合并而成的扁平化键值表，条件求值期间只读。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// 配置数据
    properties: BTreeMap<String, String>,
}

impl Environment {
    /// 创建空的环境
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加配置项
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// 插入配置项，返回被覆盖的旧值
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.properties.insert(key.into(), value.into())
    }

    /// 获取配置项
    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// 配置键存在且值等于期望值
    pub fn property_equals(&self, key: &str, expected: &str) -> bool {
        self.get_property(key) == Some(expected)
    }

    /// 获取配置节（去掉前缀后的子键）
    pub fn section(&self, prefix: &str) -> BTreeMap<String, String> {
        let section_prefix = format!("{}.", prefix);
        self.properties
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(&section_prefix)
                    .map(|sub_key| (sub_key.to_string(), value.clone()))
            })
            .collect()
    }

    /// 所有配置键
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// 配置项数量
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// 用另一组配置覆盖当前配置
    pub fn merge(&mut self, overrides: impl IntoIterator<Item = (String, String)>) {
        self.properties.extend(overrides);
    }

    /// 解析 `key=value` 形式的属性
    pub fn parse_property(input: &str) -> Result<(String, String), ConfigError> {
        match input.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(ConfigError::InvalidProperty {
                input: input.to_string(),
            }),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            properties: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
