//! # 依赖注入具体实现
//!
//! 提供条件注册表的具体实现：按声明顺序求值注册条件，满足时调用工厂创建实例

use di_abstractions::{
    Beans, ClassPath, ComponentDescriptor, ConditionContext, ConditionEvaluationReport,
    ConditionalRegistry, Predicate, RegisteredBean,
};
use infrastructure_common::{DependencyError, Environment};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, error, info, warn};

/// 条件注册表实现
///
/// 单线程、同步地解析描述符。后面的描述符能看到前面描述符的注册结果，反之不行。
#[derive(Debug)]
pub struct ConditionalRegistryImpl {
    /// 条件求值使用的环境
    environment: Environment,
    /// 类路径
    class_path: ClassPath,
    /// 待解析的描述符（声明顺序）
    pending: VecDeque<ComponentDescriptor>,
    /// 待解析描述符的名称
    pending_names: HashSet<String>,
    /// 已注册的组件
    beans: Beans,
    /// 条件求值报告
    report: ConditionEvaluationReport,
}

impl ConditionalRegistryImpl {
    /// 使用给定环境创建注册表
    pub fn new(environment: Environment) -> Self {
        Self::with_class_path(environment, ClassPath::new())
    }

    /// 使用给定环境和类路径创建注册表
    pub fn with_class_path(environment: Environment, class_path: ClassPath) -> Self {
        Self {
            environment,
            class_path,
            pending: VecDeque::new(),
            pending_names: HashSet::new(),
            beans: Beans::new(),
            report: ConditionEvaluationReport::new(),
        }
    }

    /// 条件求值使用的环境
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// 类路径
    pub fn class_path(&self) -> &ClassPath {
        &self.class_path
    }

    /// 返回第一个未满足的谓词
    fn first_failing<'p>(&self, descriptor: &'p ComponentDescriptor) -> Option<&'p Predicate> {
        let context = ConditionContext::new(&self.environment, &self.beans, &self.class_path);
        descriptor.predicates().iter().find(|predicate| {
            let matched = predicate.matches(&context);
            debug!(
                "条件求值: {} {} -> {}",
                descriptor.name(),
                predicate,
                matched
            );
            !matched
        })
    }

    /// 解析单个描述符
    fn resolve_one(&mut self, descriptor: ComponentDescriptor) -> Result<(), DependencyError> {
        if let Some(predicate) = self.first_failing(&descriptor) {
            warn!("跳过组件: {}, 未满足条件: {}", descriptor.name(), predicate);
            self.report.record_skipped(
                descriptor.name(),
                descriptor.description(),
                predicate.to_string(),
            );
            return Ok(());
        }

        let instance = descriptor.create().map_err(|source| {
            error!("组件创建失败: {}, 原因: {}", descriptor.name(), source);
            DependencyError::ComponentCreationFailed {
                name: descriptor.name().to_string(),
                source,
            }
        })?;

        let bean = RegisteredBean {
            name: descriptor.name().to_string(),
            type_info: descriptor.type_info().clone(),
            declared_types: descriptor.declared_types().cloned().collect(),
            instance,
        };
        info!(
            "注册组件: {} ({})",
            descriptor.name(),
            descriptor.type_info().type_name
        );
        let inserted = self.beans.insert(bean);
        debug_assert!(inserted, "组件名称应在登记时去重: {}", descriptor.name());
        self.report
            .record_registered(descriptor.name(), descriptor.description());
        Ok(())
    }
}

impl ConditionalRegistry for ConditionalRegistryImpl {
    fn register(&mut self, descriptor: ComponentDescriptor) -> Result<(), DependencyError> {
        let name = descriptor.name();
        if self.pending_names.contains(name) || self.beans.registration(name).is_some() {
            error!("组件名称重复: {}", name);
            return Err(DependencyError::DuplicateName {
                name: name.to_string(),
            });
        }

        debug!(
            "登记组件描述符: {} ({} 个条件)",
            name,
            descriptor.predicates().len()
        );
        for type_info in descriptor.declared_types() {
            self.class_path.register(type_info);
        }
        self.pending_names.insert(name.to_string());
        self.pending.push_back(descriptor);
        Ok(())
    }

    fn resolve_all(&mut self) -> Result<&Beans, DependencyError> {
        info!("开始解析 {} 个组件描述符", self.pending.len());

        while let Some(descriptor) = self.pending.pop_front() {
            self.pending_names.remove(descriptor.name());
            self.resolve_one(descriptor)?;
        }

        info!("组件解析完成，共注册 {} 个组件", self.beans.len());
        Ok(&self.beans)
    }

    fn beans(&self) -> &Beans {
        &self.beans
    }

    fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn report(&self) -> &ConditionEvaluationReport {
        &self.report
    }
}
