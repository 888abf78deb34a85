//! # 基础设施组合层
//!
//! 这个 crate 负责把配置源、类路径和组件描述符组合成一个完成条件解析的应用上下文。
//!
//! ## 主要功能
//!
//! - **应用构建器**: 使用构建者模式组装配置源和组件描述符
//! - **配置分层**: 命令行 > 系统属性 > 环境变量 > TOML > JSON > 默认值
//! - **日志初始化**: 按 [`LoggingConfig`] 初始化 `tracing-subscriber`
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use di_abstractions::{ComponentDescriptor, Predicate};
//! use infrastructure_composition::ApplicationContext;
//!
//! struct School;
//! struct Student;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let context = ApplicationContext::builder()
//!         .add_properties([("lang", "zh_CN")])
//!         .register(ComponentDescriptor::new("school", || School))
//!         .register(
//!             ComponentDescriptor::new("zhangsan", || Student)
//!                 .with_predicate(Predicate::on_bean_present::<School>()),
//!         )
//!         .build()
//!         .await?;
//!
//!     for name in context.bean_definition_names() {
//!         println!("{}", name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;

// 重新导出主要类型
pub use builder::{ApplicationBuilder, LoggingConfig};
pub use context::ApplicationContext;

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;

#[cfg(test)]
mod tests {
    mod integration_tests;
}
