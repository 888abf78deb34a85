//! 组件描述符
//!
//! 将组件名称、工厂函数和注册条件绑定在一起

use crate::condition::Predicate;
use infrastructure_common::TypeInfo;
use std::any::Any;
use std::sync::Arc;

/// 装箱错误类型
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 组件实例
pub type ComponentInstance = Arc<dyn Any + Send + Sync>;

/// 组件工厂函数类型
pub type ComponentFactoryFn = Arc<dyn Fn() -> Result<ComponentInstance, BoxError> + Send + Sync>;

/// 组件描述符
#[derive(Clone)]
pub struct ComponentDescriptor {
    /// 组件名称
    name: String,
    /// 工厂产出的实际类型
    type_info: TypeInfo,
    /// 额外暴露的类型
    exposed_types: Vec<TypeInfo>,
    /// 注册条件，全部满足时才注册
    predicates: Vec<Predicate>,
    /// 组件工厂
    factory: ComponentFactoryFn,
    /// 组件描述
    description: Option<String>,
}

impl std::fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("name", &self.name)
            .field("type_info", &self.type_info)
            .field("exposed_types", &self.exposed_types)
            .field("predicates", &self.predicates)
            .field("description", &self.description)
            .field("factory", &"<function>")
            .finish()
    }
}

impl ComponentDescriptor {
    /// 使用不会失败的工厂创建描述符
    pub fn new<T, F>(name: impl Into<String>, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::try_new(name, move || Ok::<T, BoxError>(factory()))
    }

    /// 使用可能失败的工厂创建描述符
    pub fn try_new<T, E, F>(name: impl Into<String>, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        E: Into<BoxError>,
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        let factory: ComponentFactoryFn = Arc::new(move || {
            factory()
                .map(|instance| Arc::new(instance) as ComponentInstance)
                .map_err(Into::into)
        });

        Self {
            name: name.into(),
            type_info: TypeInfo::of::<T>(),
            exposed_types: Vec::new(),
            predicates: Vec::new(),
            factory,
            description: None,
        }
    }

    /// 添加注册条件
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// 额外以类型 `U` 暴露该组件
    pub fn exposed_as<U: ?Sized + 'static>(self) -> Self {
        self.exposed_as_type(TypeInfo::of::<U>())
    }

    /// 额外以指定类型暴露该组件
    pub fn exposed_as_type(mut self, type_info: TypeInfo) -> Self {
        if type_info != self.type_info && !self.exposed_types.contains(&type_info) {
            self.exposed_types.push(type_info);
        }
        self
    }

    /// 容器中没有与本组件同类型的组件时才注册
    pub fn conditional_on_missing_self(self) -> Self {
        let own_type = self.type_info.clone();
        self.with_predicate(Predicate::OnMissingBean(own_type))
    }

    /// 设置描述
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 组件名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 工厂产出的实际类型
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 组件被索引的全部类型（实际类型在前）
    pub fn declared_types(&self) -> impl Iterator<Item = &TypeInfo> {
        std::iter::once(&self.type_info).chain(self.exposed_types.iter())
    }

    /// 注册条件
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// 组件描述
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// 调用工厂创建实例
    pub fn create(&self) -> Result<ComponentInstance, BoxError> {
        (self.factory)()
    }
}
