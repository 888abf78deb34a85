//! 配置提供者抽象接口

use async_trait::async_trait;
use infrastructure_common::ConfigError;
use std::collections::BTreeMap;
use std::path::Path;

/// 配置提供者 trait
///
/// 定义从不同数据源获取配置的统一接口。所有值都以扁平化的点分键和字符串值表示。
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    /// 获取配置值
    async fn get_property(&self, key: &str) -> Result<String, ConfigError>;

    /// 检查配置键是否存在
    async fn contains_key(&self, key: &str) -> Result<bool, ConfigError>;

    /// 获取所有配置项
    async fn get_all_properties(&self) -> Result<BTreeMap<String, String>, ConfigError>;

    /// 重新加载配置
    async fn reload(&mut self) -> Result<(), ConfigError>;

    /// 获取提供者名称
    fn name(&self) -> &str;

    /// 获取提供者优先级，数值越高越优先
    fn priority(&self) -> i32 {
        0
    }
}

/// 文件配置提供者 trait
#[async_trait]
pub trait FileConfigProvider: ConfigProvider {
    /// 获取文件路径
    fn file_path(&self) -> &Path;

    /// 检查文件是否存在
    async fn file_exists(&self) -> bool;
}

/// 环境变量配置提供者 trait
pub trait EnvironmentConfigProvider: ConfigProvider {
    /// 获取环境变量前缀
    fn prefix(&self) -> &str;

    /// 获取分隔符
    fn separator(&self) -> &str;
}
