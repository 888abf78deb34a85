//! 类路径抽象
//!
//! 决定 `OnClassPresent` 条件中的类型是否“可用”

use infrastructure_common::TypeInfo;
use std::collections::HashSet;

/// 类路径
///
/// 编译期已知的类型默认可用，除非被显式排除；按名称引用的类型只有在登记过之后才可用。
#[derive(Debug, Clone, Default)]
pub struct ClassPath {
    /// 已登记的类型名称
    known: HashSet<String>,
    /// 被排除的类型名称
    excluded: HashSet<String>,
}

impl ClassPath {
    /// 创建空的类路径
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记类型
    pub fn register(&mut self, type_info: &TypeInfo) {
        self.known.insert(type_info.type_name.clone());
    }

    /// 按名称登记类型
    pub fn register_name(&mut self, type_name: impl Into<String>) {
        self.known.insert(type_name.into());
    }

    /// 排除类型
    pub fn exclude<T: ?Sized + 'static>(&mut self) {
        self.exclude_name(TypeInfo::of::<T>().type_name);
    }

    /// 按名称排除类型
    pub fn exclude_name(&mut self, type_name: impl Into<String>) {
        self.excluded.insert(type_name.into());
    }

    /// 构建器形式的排除
    pub fn without<T: ?Sized + 'static>(mut self) -> Self {
        self.exclude::<T>();
        self
    }

    /// 构建器形式的按名称登记
    pub fn with_name(mut self, type_name: impl Into<String>) -> Self {
        self.register_name(type_name);
        self
    }

    /// 类型是否可用
    pub fn is_present(&self, type_info: &TypeInfo) -> bool {
        if self.excluded.contains(&type_info.type_name) {
            return false;
        }
        type_info.is_compiled() || self.known.contains(&type_info.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct School;

    #[test]
    fn test_compiled_types_are_present_by_default() {
        let class_path = ClassPath::new();
        assert!(class_path.is_present(&TypeInfo::of::<School>()));
    }

    #[test]
    fn test_excluded_types_are_absent() {
        let class_path = ClassPath::new().without::<School>();
        assert!(!class_path.is_present(&TypeInfo::of::<School>()));
        assert!(!class_path.is_present(&TypeInfo::from_name(
            std::any::type_name::<School>()
        )));
    }

    #[test]
    fn test_named_types_need_registration() {
        let reference = TypeInfo::from_name("com.pwx.model.School");
        assert!(!ClassPath::new().is_present(&reference));
        assert!(ClassPath::new()
            .with_name("com.pwx.model.School")
            .is_present(&reference));
    }
}
