//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置序列化失败: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("配置键不存在: {key}")]
    KeyNotFound { key: String },

    #[error("配置类型转换失败: {message}")]
    TypeConversionError { message: String },

    #[error("配置属性格式无效: {input}, 期望格式: key=value")]
    InvalidProperty { input: String },
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件名称重复: {name}")]
    DuplicateName { name: String },

    #[error("组件创建失败: {name}, 原因: {source}")]
    ComponentCreationFailed {
        name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl DependencyError {
    /// 出错的组件名称
    pub fn component_name(&self) -> &str {
        match self {
            Self::DuplicateName { name } | Self::ComponentCreationFailed { name, .. } => name,
        }
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_error_carries_component_name() {
        let duplicate = DependencyError::DuplicateName {
            name: "desktopPC".to_string(),
        };
        assert_eq!(duplicate.component_name(), "desktopPC");

        let failed = DependencyError::ComponentCreationFailed {
            name: "notebookPC".to_string(),
            source: "电池缺失".into(),
        };
        assert_eq!(failed.component_name(), "notebookPC");
        assert!(failed.to_string().contains("电池缺失"));
    }

    #[test]
    fn test_infrastructure_error_from_dependency_error() {
        let error: InfrastructureError = DependencyError::DuplicateName {
            name: "school".to_string(),
        }
        .into();
        assert!(matches!(error, InfrastructureError::DependencyError { .. }));
        assert!(error.to_string().contains("school"));
    }
}
