//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义条件注册的核心类型和接口。
//!
//! ## 核心类型
//!
//! - [`ComponentDescriptor`] - 组件描述符（名称、工厂、注册条件）
//! - [`Predicate`] - 注册谓词
//! - [`Condition`] - 自定义条件接口
//! - [`ConditionalRegistry`] - 条件注册表接口
//! - [`Beans`] - 已注册组件存储

pub mod beans;
pub mod class_path;
pub mod condition;
pub mod descriptor;
pub mod registry;
pub mod report;

pub use beans::*;
pub use class_path::*;
pub use condition::*;
pub use descriptor::*;
pub use registry::*;
pub use report::*;
