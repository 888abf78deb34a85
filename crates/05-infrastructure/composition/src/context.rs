//! 应用上下文

use crate::builder::ApplicationBuilder;
use di_abstractions::{Beans, ConditionEvaluationReport, ConditionalRegistry};
use di_impl::ConditionalRegistryImpl;
use infrastructure_common::{Environment, TypeInfo};
use std::sync::Arc;

/// 应用上下文
///
/// 条件解析完成后的容器，只读
#[derive(Debug)]
pub struct ApplicationContext {
    registry: ConditionalRegistryImpl,
}

impl ApplicationContext {
    /// 创建构建器
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    pub(crate) fn new(registry: ConditionalRegistryImpl) -> Self {
        Self { registry }
    }

    /// 已注册组件的名称（按注册顺序）
    pub fn bean_definition_names(&self) -> Vec<String> {
        self.beans().names().map(str::to_string).collect()
    }

    /// 按名称获取类型化的组件
    pub fn get_bean<T: Send + Sync + 'static>(&self, name: &str) -> Option<Arc<T>> {
        self.beans().get::<T>(name)
    }

    /// 是否已注册指定名称的组件
    pub fn contains_bean(&self, name: &str) -> bool {
        self.beans().registration(name).is_some()
    }

    /// 以类型 `T` 注册（含额外暴露类型）的组件名称
    pub fn bean_names_for_type<T: ?Sized + 'static>(&self) -> Vec<String> {
        self.beans().names_for_type(&TypeInfo::of::<T>()).to_vec()
    }

    /// 已注册的组件
    pub fn beans(&self) -> &Beans {
        self.registry.beans()
    }

    /// 条件求值使用的环境
    pub fn environment(&self) -> &Environment {
        self.registry.environment()
    }

    /// 条件求值报告
    pub fn report(&self) -> &ConditionEvaluationReport {
        self.registry.report()
    }
}
