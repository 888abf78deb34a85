//! 配置管理器实现

use config_abstractions::ConfigProvider;
use infrastructure_common::{ConfigError, Environment};
use tracing::{debug, error, info, warn};

/// 配置管理器
///
/// 协调多个配置源，按优先级提供统一的配置访问，并生成条件求值使用的环境快照
pub struct ConfigManager {
    /// 配置提供者列表（按优先级排序，高优先级在前）
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl std::fmt::Debug for ConfigManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigManager")
            .field(
                "providers",
                &self
                    .providers
                    .iter()
                    .map(|p| (p.name(), p.priority()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ConfigManager {
    /// 创建新的配置管理器
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// 注册配置提供者
    pub fn register_provider(&mut self, provider: Box<dyn ConfigProvider>) {
        info!(
            "注册配置提供者: {} (优先级 {})",
            provider.name(),
            provider.priority()
        );

        self.providers.push(provider);

        // 按优先级排序（优先级高的在前），同优先级保持注册顺序
        self.providers.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// 移除配置提供者
    pub fn unregister_provider(&mut self, provider_name: &str) -> Result<(), ConfigError> {
        let initial_count = self.providers.len();
        self.providers.retain(|p| p.name() != provider_name);

        if self.providers.len() < initial_count {
            info!("移除配置提供者: {}", provider_name);
            Ok(())
        } else {
            warn!("配置提供者不存在: {}", provider_name);
            Err(ConfigError::KeyNotFound {
                key: provider_name.to_string(),
            })
        }
    }

    /// 获取配置提供者数量
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// 按优先级顺序列出提供者名称
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// 获取配置值
    pub async fn get_property(&self, key: &str) -> Result<String, ConfigError> {
        debug!("获取配置: {}", key);

        // 按优先级顺序尝试各个提供者
        for provider in &self.providers {
            match provider.get_property(key).await {
                Ok(value) => {
                    debug!("从提供者 {} 获取配置: {}", provider.name(), key);
                    return Ok(value);
                }
                Err(ConfigError::KeyNotFound { .. }) => continue,
                Err(e) => {
                    error!("提供者 {} 获取配置失败: {}", provider.name(), e);
                    continue;
                }
            }
        }

        Err(ConfigError::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// 重新加载所有提供者
    pub async fn reload_all(&mut self) -> Result<(), ConfigError> {
        for provider in &mut self.providers {
            debug!("重新加载配置提供者: {}", provider.name());
            provider.reload().await?;
        }
        info!("全部配置提供者已重新加载");
        Ok(())
    }

    /// 生成环境快照
    ///
    /// 从低优先级到高优先级依次合并，高优先级的值覆盖低优先级的值
    pub async fn build_environment(&self) -> Result<Environment, ConfigError> {
        let mut environment = Environment::new();

        for provider in self.providers.iter().rev() {
            let properties = provider.get_all_properties().await?;
            debug!(
                "合并配置提供者 {} 的 {} 个配置项",
                provider.name(),
                properties.len()
            );
            environment.merge(properties);
        }

        info!("环境快照构建完成，共 {} 个配置项", environment.len());
        Ok(environment)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
