//! 配置提供者实现

use async_trait::async_trait;
use config_abstractions::{
    ConfigProvider, EnvironmentConfigProvider as EnvironmentConfigProviderTrait,
    FileConfigProvider,
};
use infrastructure_common::ConfigError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 命令行属性默认优先级
pub const COMMAND_LINE_PRIORITY: i32 = 400;
/// 系统属性默认优先级
pub const SYSTEM_PROPERTIES_PRIORITY: i32 = 300;
/// 环境变量默认优先级
pub const ENVIRONMENT_PRIORITY: i32 = 200;
/// TOML 文件默认优先级
pub const TOML_PRIORITY: i32 = 100;
/// JSON 文件默认优先级
pub const JSON_PRIORITY: i32 = 90;

/// 内存配置提供者
///
/// 用于默认值和命令行 `-D key=value` 属性
#[derive(Debug, Clone, Default)]
pub struct MapConfigProvider {
    name: String,
    properties: BTreeMap<String, String>,
    priority: i32,
}

impl MapConfigProvider {
    /// 创建新的内存配置提供者
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
            priority: 0,
        }
    }

    /// 创建命令行属性提供者
    pub fn command_line<I, K, V>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new("CommandLineConfigProvider")
            .with_properties(properties)
            .with_priority(COMMAND_LINE_PRIORITY)
    }

    /// 添加配置项
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// 批量添加配置项
    pub fn with_properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.properties.extend(
            properties
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        self
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

#[async_trait]
impl ConfigProvider for MapConfigProvider {
    async fn get_property(&self, key: &str) -> Result<String, ConfigError> {
        lookup(&self.properties, key)
    }

    async fn contains_key(&self, key: &str) -> Result<bool, ConfigError> {
        Ok(self.properties.contains_key(key))
    }

    async fn get_all_properties(&self) -> Result<BTreeMap<String, String>, ConfigError> {
        Ok(self.properties.clone())
    }

    async fn reload(&mut self) -> Result<(), ConfigError> {
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

/// 系统属性配置提供者
///
/// 读取进程级系统属性表的快照，`reload` 时重新读取
#[derive(Debug, Clone)]
pub struct SystemPropertiesProvider {
    properties: BTreeMap<String, String>,
    priority: i32,
}

impl SystemPropertiesProvider {
    /// 创建新的系统属性提供者
    pub fn new() -> Self {
        let properties = infrastructure_common::system_properties();
        debug!("加载了 {} 个系统属性", properties.len());
        Self {
            properties,
            priority: SYSTEM_PROPERTIES_PRIORITY,
        }
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl Default for SystemPropertiesProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigProvider for SystemPropertiesProvider {
    async fn get_property(&self, key: &str) -> Result<String, ConfigError> {
        lookup(&self.properties, key)
    }

    async fn contains_key(&self, key: &str) -> Result<bool, ConfigError> {
        Ok(self.properties.contains_key(key))
    }

    async fn get_all_properties(&self) -> Result<BTreeMap<String, String>, ConfigError> {
        Ok(self.properties.clone())
    }

    async fn reload(&mut self) -> Result<(), ConfigError> {
        self.properties = infrastructure_common::system_properties();
        Ok(())
    }

    fn name(&self) -> &str {
        "SystemPropertiesProvider"
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

/// 环境变量配置提供者
#[derive(Debug)]
pub struct EnvironmentConfigProviderImpl {
    prefix: String,
    separator: String,
    priority: i32,
    /// 固定的变量来源，`None` 表示读取进程环境变量
    fixed_vars: Option<Vec<(String, String)>>,
    env_vars: BTreeMap<String, String>,
}

impl EnvironmentConfigProviderImpl {
    /// 创建新的环境变量配置提供者，读取当前进程的环境变量
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_source(prefix, None)
    }

    /// 从给定的变量集合创建提供者
    pub fn from_vars<I>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self::with_source(prefix, Some(vars.into_iter().collect()))
    }

    fn with_source(prefix: impl Into<String>, fixed_vars: Option<Vec<(String, String)>>) -> Self {
        let mut provider = Self {
            prefix: prefix.into(),
            separator: "_".to_string(),
            priority: ENVIRONMENT_PRIORITY,
            fixed_vars,
            env_vars: BTreeMap::new(),
        };
        provider.load_env_vars();
        provider
    }

    /// 设置分隔符，并按新的分隔符重新加载
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self.load_env_vars();
        self
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// 加载环境变量
    fn load_env_vars(&mut self) {
        debug!("加载环境变量，前缀: {}", self.prefix);

        let vars = match &self.fixed_vars {
            Some(vars) => vars.clone(),
            None => utf8_vars(std::env::vars_os()),
        };

        self.env_vars.clear();

        let full_prefix = format!("{}{}", self.prefix, self.separator);
        for (key, value) in vars {
            if key.starts_with(&full_prefix) {
                let config_key = self.env_key_to_config_key(&key);
                self.env_vars.insert(config_key, value);
            }
        }

        debug!("加载了 {} 个环境变量", self.env_vars.len());
    }

    /// 将环境变量键转换为配置键
    fn env_key_to_config_key(&self, env_key: &str) -> String {
        let key = env_key
            .strip_prefix(&self.prefix)
            .unwrap_or(env_key)
            .trim_start_matches(self.separator.as_str());

        // 将分隔符转换为点分隔符，并转换为小写
        key.replace(self.separator.as_str(), ".").to_lowercase()
    }
}

#[async_trait]
impl ConfigProvider for EnvironmentConfigProviderImpl {
    async fn get_property(&self, key: &str) -> Result<String, ConfigError> {
        lookup(&self.env_vars, key)
    }

    async fn contains_key(&self, key: &str) -> Result<bool, ConfigError> {
        Ok(self.env_vars.contains_key(key))
    }

    async fn get_all_properties(&self) -> Result<BTreeMap<String, String>, ConfigError> {
        Ok(self.env_vars.clone())
    }

    async fn reload(&mut self) -> Result<(), ConfigError> {
        self.load_env_vars();
        Ok(())
    }

    fn name(&self) -> &str {
        "EnvironmentConfigProvider"
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

impl EnvironmentConfigProviderTrait for EnvironmentConfigProviderImpl {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn separator(&self) -> &str {
        &self.separator
    }
}

/// TOML 配置提供者
#[derive(Debug)]
pub struct TomlConfigProvider {
    file_path: PathBuf,
    properties: BTreeMap<String, String>,
    priority: i32,
}

impl TomlConfigProvider {
    /// 加载 TOML 配置文件
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut provider = Self {
            file_path: path.as_ref().to_path_buf(),
            properties: BTreeMap::new(),
            priority: TOML_PRIORITY,
        };

        provider.load_config().await?;
        Ok(provider)
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// 加载配置文件
    async fn load_config(&mut self) -> Result<(), ConfigError> {
        debug!("加载 TOML 配置文件: {}", self.file_path.display());

        let content = read_config_file(&self.file_path).await?;
        let table: toml::Table = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })?;

        let mut properties = BTreeMap::new();
        flatten_value(
            &toml_to_json(&toml::Value::Table(table)),
            String::new(),
            &mut properties,
        );
        self.properties = properties;

        debug!("TOML 配置文件加载完成，共 {} 项", self.properties.len());
        Ok(())
    }
}

#[async_trait]
impl ConfigProvider for TomlConfigProvider {
    async fn get_property(&self, key: &str) -> Result<String, ConfigError> {
        lookup(&self.properties, key)
    }

    async fn contains_key(&self, key: &str) -> Result<bool, ConfigError> {
        Ok(self.properties.contains_key(key))
    }

    async fn get_all_properties(&self) -> Result<BTreeMap<String, String>, ConfigError> {
        Ok(self.properties.clone())
    }

    async fn reload(&mut self) -> Result<(), ConfigError> {
        self.load_config().await
    }

    fn name(&self) -> &str {
        "TomlConfigProvider"
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

#[async_trait]
impl FileConfigProvider for TomlConfigProvider {
    fn file_path(&self) -> &Path {
        &self.file_path
    }

    async fn file_exists(&self) -> bool {
        tokio::fs::try_exists(&self.file_path).await.unwrap_or(false)
    }
}

/// JSON 配置提供者
#[derive(Debug)]
pub struct JsonConfigProvider {
    file_path: PathBuf,
    properties: BTreeMap<String, String>,
    priority: i32,
}

impl JsonConfigProvider {
    /// 加载 JSON 配置文件
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut provider = Self {
            file_path: path.as_ref().to_path_buf(),
            properties: BTreeMap::new(),
            priority: JSON_PRIORITY,
        };

        provider.load_config().await?;
        Ok(provider)
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// 加载配置文件
    async fn load_config(&mut self) -> Result<(), ConfigError> {
        debug!("加载 JSON 配置文件: {}", self.file_path.display());

        let content = read_config_file(&self.file_path).await?;
        let value: Value = serde_json::from_str(&content)?;
        if !value.is_object() {
            return Err(ConfigError::TypeConversionError {
                message: format!("JSON 配置文件根节点必须是对象: {}", self.file_path.display()),
            });
        }

        let mut properties = BTreeMap::new();
        flatten_value(&value, String::new(), &mut properties);
        self.properties = properties;

        debug!("JSON 配置文件加载完成，共 {} 项", self.properties.len());
        Ok(())
    }
}

#[async_trait]
impl ConfigProvider for JsonConfigProvider {
    async fn get_property(&self, key: &str) -> Result<String, ConfigError> {
        lookup(&self.properties, key)
    }

    async fn contains_key(&self, key: &str) -> Result<bool, ConfigError> {
        Ok(self.properties.contains_key(key))
    }

    async fn get_all_properties(&self) -> Result<BTreeMap<String, String>, ConfigError> {
        Ok(self.properties.clone())
    }

    async fn reload(&mut self) -> Result<(), ConfigError> {
        self.load_config().await
    }

    fn name(&self) -> &str {
        "JsonConfigProvider"
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

#[async_trait]
impl FileConfigProvider for JsonConfigProvider {
    fn file_path(&self) -> &Path {
        &self.file_path
    }

    async fn file_exists(&self) -> bool {
        tokio::fs::try_exists(&self.file_path).await.unwrap_or(false)
    }
}

/// 只保留键和值都是合法 UTF-8 的环境变量
fn utf8_vars<I>(vars: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (key, _) => {
                debug!("跳过非 UTF-8 环境变量: {:?}", key);
                None
            }
        })
        .collect()
}

fn lookup(properties: &BTreeMap<String, String>, key: &str) -> Result<String, ConfigError> {
    properties
        .get(key)
        .cloned()
        .ok_or_else(|| ConfigError::KeyNotFound {
            key: key.to_string(),
        })
}

async fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::FileNotFound {
            path: path.display().to_string(),
        }),
        Err(e) => Err(ConfigError::FileReadError { source: e }),
    }
}

/// 将 TOML 值转换为 JSON 值
fn toml_to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Number(serde_json::Number::from(*i)),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Array(arr) => Value::Array(arr.iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect(),
        ),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
    }
}

/// 递归展开为点分键，数组元素使用 `key[i]`
fn flatten_value(value: &Value, prefix: String, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(obj) => {
            for (key, nested) in obj {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_value(nested, full_key, out);
            }
        }
        Value::Array(arr) => {
            for (index, nested) in arr.iter().enumerate() {
                flatten_value(nested, format!("{}[{}]", prefix, index), out);
            }
        }
        Value::String(s) => {
            out.insert(prefix, s.clone());
        }
        Value::Null => {
            out.insert(prefix, String::new());
        }
        other => {
            out.insert(prefix, other.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_toml_provider_flattens_tables_and_arrays() {
        let file = write_temp(
            ".toml",
            r#"
lang = "zh_CN"

[server]
port = 8080
debug = true

[[school.classes]]
name = "一班"
"#,
        );

        let provider = TomlConfigProvider::load(file.path()).await.unwrap();
        assert_eq!(provider.get_property("lang").await.unwrap(), "zh_CN");
        assert_eq!(provider.get_property("server.port").await.unwrap(), "8080");
        assert_eq!(provider.get_property("server.debug").await.unwrap(), "true");
        assert_eq!(
            provider.get_property("school.classes[0].name").await.unwrap(),
            "一班"
        );
        assert!(provider.file_exists().await);
        assert_eq!(provider.priority(), TOML_PRIORITY);
    }

    #[tokio::test]
    async fn test_json_provider_reload_picks_up_changes() {
        let file = write_temp(".json", r#"{"lang": "en_US", "computer": {"count": 1}}"#);

        let mut provider = JsonConfigProvider::load(file.path()).await.unwrap();
        assert_eq!(provider.get_property("lang").await.unwrap(), "en_US");
        assert_eq!(provider.get_property("computer.count").await.unwrap(), "1");

        std::fs::write(file.path(), r#"{"lang": "zh_CN"}"#).unwrap();
        provider.reload().await.unwrap();
        assert_eq!(provider.get_property("lang").await.unwrap(), "zh_CN");
        assert!(!provider.contains_key("computer.count").await.unwrap());
    }

    #[tokio::test]
    async fn test_json_provider_rejects_non_object_root() {
        let file = write_temp(".json", "[1, 2, 3]");
        let result = JsonConfigProvider::load(file.path()).await;
        assert!(matches!(result, Err(ConfigError::TypeConversionError { .. })));
    }

    #[tokio::test]
    async fn test_missing_file_is_reported() {
        let result = TomlConfigProvider::load("/definitely/not/here/app.toml").await;
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[tokio::test]
    async fn test_environment_provider_maps_keys() {
        let provider = EnvironmentConfigProviderImpl::from_vars(
            "APP",
            vec![
                ("APP_LANG".to_string(), "zh_CN".to_string()),
                ("APP_SERVER_PORT".to_string(), "9090".to_string()),
                ("APPLICATION".to_string(), "ignored".to_string()),
                ("OTHER_LANG".to_string(), "en_US".to_string()),
            ],
        );

        let all = provider.get_all_properties().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(provider.get_property("lang").await.unwrap(), "zh_CN");
        assert_eq!(provider.get_property("server.port").await.unwrap(), "9090");
        assert_eq!(provider.prefix(), "APP");
        assert_eq!(provider.separator(), "_");
    }

    #[tokio::test]
    async fn test_environment_provider_custom_separator() {
        let provider = EnvironmentConfigProviderImpl::from_vars(
            "APP",
            vec![
                ("APP.SERVER.PORT".to_string(), "9090".to_string()),
                ("APP_LANG".to_string(), "zh_CN".to_string()),
            ],
        )
        .with_separator(".");

        assert_eq!(provider.separator(), ".");
        assert_eq!(provider.get_property("server.port").await.unwrap(), "9090");
        assert!(!provider.contains_key("lang").await.unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_variables_are_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let vars = utf8_vars(vec![
            (OsString::from("JUNK"), OsString::from_vec(vec![0xff, 0xfe])),
            (OsString::from_vec(vec![0xff]), OsString::from("x")),
            (OsString::from("APP_LANG"), OsString::from("zh_CN")),
        ]);
        assert_eq!(vars, vec![("APP_LANG".to_string(), "zh_CN".to_string())]);
    }

    #[tokio::test]
    async fn test_map_provider_key_not_found() {
        let provider = MapConfigProvider::command_line([("lang", "zh_CN")]);
        assert_eq!(provider.priority(), COMMAND_LINE_PRIORITY);
        assert!(matches!(
            provider.get_property("region").await,
            Err(ConfigError::KeyNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_system_properties_provider_reload() {
        let key = "config_impl.tests.system_reload";
        infrastructure_common::clear_system_property(key);

        let mut provider = SystemPropertiesProvider::new();
        assert!(!provider.contains_key(key).await.unwrap());

        infrastructure_common::set_system_property(key, "on");
        provider.reload().await.unwrap();
        assert_eq!(provider.get_property(key).await.unwrap(), "on");

        infrastructure_common::clear_system_property(key);
    }
}
