//! 已注册组件存储

use crate::condition::BeanLookup;
use crate::descriptor::ComponentInstance;
use indexmap::IndexMap;
use infrastructure_common::TypeInfo;
use std::collections::HashMap;
use std::sync::Arc;

/// 已注册的组件
#[derive(Clone)]
pub struct RegisteredBean {
    /// 组件名称
    pub name: String,
    /// 实际类型
    pub type_info: TypeInfo,
    /// 组件被索引的全部类型
    pub declared_types: Vec<TypeInfo>,
    /// 组件实例
    pub instance: ComponentInstance,
}

impl std::fmt::Debug for RegisteredBean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredBean")
            .field("name", &self.name)
            .field("type_info", &self.type_info)
            .field("declared_types", &self.declared_types)
            .field("instance", &"<instance>")
            .finish()
    }
}

/// 组件存储
///
/// 名称到实例的映射保持注册顺序，另有类型到名称的索引
#[derive(Debug, Clone, Default)]
pub struct Beans {
    instances: IndexMap<String, RegisteredBean>,
    by_type: HashMap<TypeInfo, Vec<String>>,
}

impl Beans {
    /// 创建空的组件存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 存入组件并按其全部类型建立索引，名称已存在时返回 `false`
    pub fn insert(&mut self, bean: RegisteredBean) -> bool {
        if self.instances.contains_key(&bean.name) {
            return false;
        }
        for type_info in &bean.declared_types {
            self.by_type
                .entry(type_info.clone())
                .or_default()
                .push(bean.name.clone());
        }
        self.instances.insert(bean.name.clone(), bean);
        true
    }

    /// 按名称获取类型化的组件
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Option<Arc<T>> {
        self.get_raw(name)?.downcast::<T>().ok()
    }

    /// 按名称获取组件实例
    pub fn get_raw(&self, name: &str) -> Option<ComponentInstance> {
        self.instances.get(name).map(|bean| bean.instance.clone())
    }

    /// 按名称获取注册信息
    pub fn registration(&self, name: &str) -> Option<&RegisteredBean> {
        self.instances.get(name)
    }

    /// 以指定类型注册的组件名称
    pub fn names_for_type(&self, type_info: &TypeInfo) -> &[String] {
        self.by_type
            .get(type_info)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// 获取实际类型为 `T` 的全部组件
    pub fn of_type<T: Send + Sync + 'static>(&self) -> Vec<(&str, Arc<T>)> {
        self.instances
            .iter()
            .filter_map(|(name, bean)| {
                bean.instance
                    .clone()
                    .downcast::<T>()
                    .ok()
                    .map(|instance| (name.as_str(), instance))
            })
            .collect()
    }

    /// 全部组件名称（按注册顺序）
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    /// 按注册顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredBean> {
        self.instances.values()
    }

    /// 组件数量
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl BeanLookup for Beans {
    fn count_of_type(&self, type_info: &TypeInfo) -> usize {
        self.names_for_type(type_info).len()
    }

    fn contains_bean(&self, name: &str) -> bool {
        self.instances.contains_key(name)
    }

    fn bean_names(&self) -> Vec<String> {
        self.instances.keys().cloned().collect()
    }
}
