//! 元数据定义
//!
//! 提供组件类型的标识信息

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型信息
///
/// 以完整类型路径作为标识。通过 [`TypeInfo::of`] 创建的类型信息携带 `TypeId`，
/// 表示该类型已编译进当前程序；通过 [`TypeInfo::from_name`] 创建的只是一个按名称的引用，
/// 运行时未必存在对应的类型。
#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// 类型简称
    pub name: String,
    /// 完整类型路径
    pub type_name: String,
    /// 类型ID（仅编译期已知的类型才有）
    pub id: Option<TypeId>,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        let type_name = std::any::type_name::<T>();
        Self {
            name: short_name_of(type_name).to_string(),
            type_name: type_name.to_string(),
            id: Some(TypeId::of::<T>()),
        }
    }

    /// 从类型名称创建类型信息（用于配置或按名称引用）
    pub fn from_name(name: &str) -> Self {
        Self {
            name: short_name_of(name).to_string(),
            type_name: name.to_string(),
            id: None,
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        &self.name
    }

    /// 是否为编译期已知的类型
    pub fn is_compiled(&self) -> bool {
        self.id.is_some()
    }
}

/// 去掉模块路径，保留泛型参数
fn short_name_of(type_name: &str) -> &str {
    let head = type_name.split('<').next().unwrap_or(type_name);
    match head.rfind("::") {
        Some(index) => &type_name[index + 2..],
        None => type_name,
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_name.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
