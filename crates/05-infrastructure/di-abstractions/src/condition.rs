//! 注册条件抽象
//!
//! 提供条件注册所需的谓词模型和求值上下文

use crate::class_path::ClassPath;
use infrastructure_common::{Environment, TypeInfo};
use std::fmt;
use std::sync::Arc;

/// 已注册组件的只读视图
pub trait BeanLookup {
    /// 当前以指定类型注册的组件数量
    fn count_of_type(&self, type_info: &TypeInfo) -> usize;

    /// 是否已注册指定名称的组件
    fn contains_bean(&self, name: &str) -> bool;

    /// 已注册组件的名称（按注册顺序）
    fn bean_names(&self) -> Vec<String>;
}

/// 条件求值上下文
///
/// 反映某个描述符轮到求值时的容器状态
#[derive(Clone, Copy)]
pub struct ConditionContext<'a> {
    environment: &'a Environment,
    beans: &'a dyn BeanLookup,
    class_path: &'a ClassPath,
}

impl<'a> ConditionContext<'a> {
    /// 创建新的求值上下文
    pub fn new(
        environment: &'a Environment,
        beans: &'a dyn BeanLookup,
        class_path: &'a ClassPath,
    ) -> Self {
        Self {
            environment,
            beans,
            class_path,
        }
    }

    /// 环境配置
    pub fn environment(&self) -> &'a Environment {
        self.environment
    }

    /// 已注册组件视图
    pub fn beans(&self) -> &'a dyn BeanLookup {
        self.beans
    }

    /// 类路径
    pub fn class_path(&self) -> &'a ClassPath {
        self.class_path
    }
}

impl fmt::Debug for ConditionContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionContext")
            .field("environment", self.environment)
            .field("beans", &self.beans.bean_names())
            .field("class_path", self.class_path)
            .finish()
    }
}

/// 自定义条件 trait
pub trait Condition: Send + Sync {
    /// 条件是否满足
    fn matches(&self, context: &ConditionContext<'_>) -> bool;

    /// 条件名称，用于日志和报告
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Condition for F
where
    F: Fn(&ConditionContext<'_>) -> bool + Send + Sync,
{
    fn matches(&self, context: &ConditionContext<'_>) -> bool {
        self(context)
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// 注册谓词
#[derive(Clone)]
pub enum Predicate {
    /// 容器中没有该类型的组件
    OnMissingBean(TypeInfo),
    /// 容器中至少有一个该类型的组件
    OnBeanPresent(TypeInfo),
    /// 容器中恰好有一个该类型的组件
    OnSingleCandidate(TypeInfo),
    /// 该类型在类路径上可用
    OnClassPresent(TypeInfo),
    /// 配置项存在且等于期望值
    OnProperty {
        /// 配置键
        key: String,
        /// 期望值
        expected: String,
    },
    /// 自定义条件
    Custom(Arc<dyn Condition>),
}

impl Predicate {
    /// 容器中没有类型 `T` 的组件
    pub fn on_missing_bean<T: ?Sized + 'static>() -> Self {
        Self::OnMissingBean(TypeInfo::of::<T>())
    }

    /// 容器中至少有一个类型 `T` 的组件
    pub fn on_bean_present<T: ?Sized + 'static>() -> Self {
        Self::OnBeanPresent(TypeInfo::of::<T>())
    }

    /// 容器中恰好有一个类型 `T` 的组件
    pub fn on_single_candidate<T: ?Sized + 'static>() -> Self {
        Self::OnSingleCandidate(TypeInfo::of::<T>())
    }

    /// 类型 `T` 在类路径上可用
    pub fn on_class_present<T: ?Sized + 'static>() -> Self {
        Self::OnClassPresent(TypeInfo::of::<T>())
    }

    /// 按名称引用的类型在类路径上可用
    pub fn on_class_named(type_name: &str) -> Self {
        Self::OnClassPresent(TypeInfo::from_name(type_name))
    }

    /// 配置项等于期望值
    pub fn on_property(key: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::OnProperty {
            key: key.into(),
            expected: expected.into(),
        }
    }

    /// 自定义条件
    pub fn custom<C: Condition + 'static>(condition: C) -> Self {
        Self::Custom(Arc::new(condition))
    }

    /// 以闭包作为自定义条件
    pub fn custom_fn<F>(condition: F) -> Self
    where
        F: Fn(&ConditionContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(condition))
    }

    /// 在给定上下文中求值，求值本身从不失败
    pub fn matches(&self, context: &ConditionContext<'_>) -> bool {
        match self {
            Self::OnMissingBean(type_info) => context.beans().count_of_type(type_info) == 0,
            Self::OnBeanPresent(type_info) => context.beans().count_of_type(type_info) > 0,
            Self::OnSingleCandidate(type_info) => context.beans().count_of_type(type_info) == 1,
            Self::OnClassPresent(type_info) => context.class_path().is_present(type_info),
            Self::OnProperty { key, expected } => {
                context.environment().property_equals(key, expected)
            }
            Self::Custom(condition) => condition.matches(context),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnMissingBean(t) => write!(f, "OnMissingBean({})", t),
            Self::OnBeanPresent(t) => write!(f, "OnBeanPresent({})", t),
            Self::OnSingleCandidate(t) => write!(f, "OnSingleCandidate({})", t),
            Self::OnClassPresent(t) => write!(f, "OnClassPresent({})", t),
            Self::OnProperty { key, expected } => write!(f, "OnProperty({}={})", key, expected),
            Self::Custom(condition) => write!(f, "Custom({})", condition.name()),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Computer;
    struct School;

    /// 按类型计数的假视图
    #[derive(Default)]
    struct Counts(HashMap<TypeInfo, usize>);

    impl Counts {
        fn with<T: 'static>(mut self, count: usize) -> Self {
            self.0.insert(TypeInfo::of::<T>(), count);
            self
        }
    }

    impl BeanLookup for Counts {
        fn count_of_type(&self, type_info: &TypeInfo) -> usize {
            self.0.get(type_info).copied().unwrap_or(0)
        }

        fn contains_bean(&self, _name: &str) -> bool {
            false
        }

        fn bean_names(&self) -> Vec<String> {
            Vec::new()
        }
    }

    fn eval(predicate: &Predicate, beans: &Counts, environment: &Environment) -> bool {
        let class_path = ClassPath::new();
        predicate.matches(&ConditionContext::new(environment, beans, &class_path))
    }

    #[test]
    fn test_missing_and_present_are_complementary() {
        let environment = Environment::new();
        let unknown = TypeInfo::from_name("com.pwx.model.Unknown");
        for count in 0..4 {
            let beans = Counts::default().with::<Computer>(count);
            for type_info in [TypeInfo::of::<Computer>(), TypeInfo::of::<School>(), unknown.clone()] {
                let missing = eval(&Predicate::OnMissingBean(type_info.clone()), &beans, &environment);
                let present = eval(&Predicate::OnBeanPresent(type_info), &beans, &environment);
                assert_ne!(missing, present);
            }
        }
    }

    #[test]
    fn test_single_candidate_requires_exactly_one() {
        let environment = Environment::new();
        let predicate = Predicate::on_single_candidate::<Computer>();
        let outcomes: Vec<bool> = (0..4)
            .map(|count| eval(&predicate, &Counts::default().with::<Computer>(count), &environment))
            .collect();
        assert_eq!(outcomes, vec![false, true, false, false]);
    }

    #[test]
    fn test_on_property() {
        let beans = Counts::default();
        let environment = Environment::new().with_property("lang", "zh_CN");
        assert!(eval(&Predicate::on_property("lang", "zh_CN"), &beans, &environment));
        assert!(!eval(&Predicate::on_property("lang", "en_US"), &beans, &environment));
        assert!(!eval(&Predicate::on_property("region", "zh_CN"), &beans, &Environment::new()));
    }

    #[test]
    fn test_on_class_present_for_unknown_name_is_false() {
        let beans = Counts::default();
        let environment = Environment::new();
        assert!(eval(&Predicate::on_class_present::<School>(), &beans, &environment));
        assert!(!eval(&Predicate::on_class_named("com.pwx.model.School"), &beans, &environment));
    }

    #[test]
    fn test_custom_closure_condition() {
        let beans = Counts::default().with::<School>(1);
        let environment = Environment::new().with_property("lang", "zh_CN");
        let predicate = Predicate::custom_fn(|context| {
            context.environment().property_equals("lang", "zh_CN")
                && context.beans().count_of_type(&TypeInfo::of::<School>()) > 0
        });
        assert!(eval(&predicate, &beans, &environment));
        assert_eq!(predicate.to_string(), "Custom(closure)");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Predicate::on_missing_bean::<Computer>().to_string(),
            "OnMissingBean(Computer)"
        );
        assert_eq!(
            Predicate::on_property("lang", "zh_CN").to_string(),
            "OnProperty(lang=zh_CN)"
        );
    }
}
