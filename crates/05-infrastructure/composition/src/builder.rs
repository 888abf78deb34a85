//! 应用上下文构建器

use crate::context::ApplicationContext;
use config_abstractions::ConfigProvider;
use config_impl::{
    ConfigManager, EnvironmentConfigProviderImpl, JsonConfigProvider, MapConfigProvider,
    SystemPropertiesProvider, TomlConfigProvider,
};
use di_abstractions::{ClassPath, ComponentDescriptor, ConditionalRegistry};
use di_impl::ConditionalRegistryImpl;
use infrastructure_common::InfrastructureError;
use std::path::Path;
use tracing::{debug, info};

/// 应用上下文构建器
///
/// 使用建造者模式组装配置源、类路径和组件描述符，`build` 时一次性完成条件解析
pub struct ApplicationBuilder {
    /// 配置管理器
    config_manager: ConfigManager,
    /// 类路径
    class_path: ClassPath,
    /// 组件描述符（声明顺序）
    descriptors: Vec<ComponentDescriptor>,
    /// 是否启用日志初始化
    logging_enabled: bool,
    /// 日志配置
    logging_config: LoggingConfig,
}

impl std::fmt::Debug for ApplicationBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationBuilder")
            .field("config_manager", &self.config_manager)
            .field("class_path", &self.class_path)
            .field(
                "descriptors",
                &self.descriptors.iter().map(|d| d.name()).collect::<Vec<_>>(),
            )
            .field("logging_enabled", &self.logging_enabled)
            .finish()
    }
}

impl ApplicationBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            config_manager: ConfigManager::new(),
            class_path: ClassPath::new(),
            descriptors: Vec::new(),
            logging_enabled: false, // 默认不启用日志初始化
            logging_config: LoggingConfig::default(),
        }
    }

    /// 添加 TOML 配置文件
    pub async fn add_config_toml<P: AsRef<Path>>(
        mut self,
        path: P,
    ) -> Result<Self, InfrastructureError> {
        let path = ensure_exists(path.as_ref())?;
        info!("添加 TOML 配置文件: {}", path.display());
        let provider = TomlConfigProvider::load(path).await?;
        self.config_manager.register_provider(Box::new(provider));
        Ok(self)
    }

    /// 添加 JSON 配置文件
    pub async fn add_config_json<P: AsRef<Path>>(
        mut self,
        path: P,
    ) -> Result<Self, InfrastructureError> {
        let path = ensure_exists(path.as_ref())?;
        info!("添加 JSON 配置文件: {}", path.display());
        let provider = JsonConfigProvider::load(path).await?;
        self.config_manager.register_provider(Box::new(provider));
        Ok(self)
    }

    /// 按扩展名添加配置文件
    pub async fn add_config_file<P: AsRef<Path>>(
        self,
        path: P,
    ) -> Result<Self, InfrastructureError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => self.add_config_toml(path).await,
            Some("json") => self.add_config_json(path).await,
            _ => Err(InfrastructureError::BootstrapFailed {
                message: format!("不支持的配置文件格式: {}", path.display()),
            }),
        }
    }

    /// 添加环境变量配置源
    pub fn add_config_env_vars<S: Into<String>>(mut self, prefix: S) -> Self {
        let prefix = prefix.into();
        info!("添加环境变量配置源，前缀: {}", prefix);
        self.config_manager
            .register_provider(Box::new(EnvironmentConfigProviderImpl::new(prefix)));
        self
    }

    /// 添加系统属性配置源
    pub fn add_system_properties(mut self) -> Self {
        info!("添加系统属性配置源");
        self.config_manager
            .register_provider(Box::new(SystemPropertiesProvider::new()));
        self
    }

    /// 添加命令行属性（最高优先级）
    pub fn add_properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let provider = MapConfigProvider::command_line(properties);
        debug!("添加命令行属性配置源");
        self.config_manager.register_provider(Box::new(provider));
        self
    }

    /// 添加自定义配置提供者
    pub fn add_config_provider<T: ConfigProvider + 'static>(mut self, provider: T) -> Self {
        info!("添加自定义配置提供者: {}", provider.name());
        self.config_manager.register_provider(Box::new(provider));
        self
    }

    /// 设置类路径
    pub fn with_class_path(mut self, class_path: ClassPath) -> Self {
        self.class_path = class_path;
        self
    }

    /// 从类路径中排除类型 `T`
    pub fn exclude_class<T: ?Sized + 'static>(mut self) -> Self {
        self.class_path.exclude::<T>();
        self
    }

    /// 声明组件
    pub fn register(mut self, descriptor: ComponentDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// 批量声明组件
    pub fn register_all<I>(mut self, descriptors: I) -> Self
    where
        I: IntoIterator<Item = ComponentDescriptor>,
    {
        self.descriptors.extend(descriptors);
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = config;
        self.logging_enabled = true; // 启用日志初始化
        self
    }

    /// 构建应用上下文
    pub async fn build(self) -> Result<ApplicationContext, InfrastructureError> {
        // 只有在明确配置了日志时才初始化日志
        // 避免在测试环境中重复初始化
        if self.logging_enabled {
            self.initialize_logging()?;
        }

        info!("开始构建应用上下文");

        let environment = self.config_manager.build_environment().await?;

        let mut registry = ConditionalRegistryImpl::with_class_path(environment, self.class_path);
        registry.register_all(self.descriptors)?;
        registry.resolve_all()?;

        info!("应用上下文构建完成");
        Ok(ApplicationContext::new(registry))
    }

    /// 初始化日志系统
    fn initialize_logging(&self) -> Result<(), InfrastructureError> {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.logging_config.level)
            .with_target(self.logging_config.show_target)
            .with_thread_ids(self.logging_config.show_thread_ids)
            .with_file(self.logging_config.show_file)
            .with_line_number(self.logging_config.show_line_number)
            .with_writer(std::io::stderr);

        if self.logging_config.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| InfrastructureError::BootstrapFailed {
            message: format!("日志初始化失败: {}", e),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_exists(path: &Path) -> Result<&Path, InfrastructureError> {
    if path.exists() {
        Ok(path)
    } else {
        Err(InfrastructureError::BootstrapFailed {
            message: format!("配置文件不存在: {}", path.display()),
        })
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 设置日志级别
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }
}
