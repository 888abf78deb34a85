//! 条件注册表抽象接口

use crate::beans::Beans;
use crate::descriptor::ComponentDescriptor;
use crate::report::ConditionEvaluationReport;
use infrastructure_common::DependencyError;

/// 条件注册表 trait
///
/// 登记组件描述符，并按声明顺序求值条件、创建实例
pub trait ConditionalRegistry {
    /// 登记描述符，此时不求值
    fn register(&mut self, descriptor: ComponentDescriptor) -> Result<(), DependencyError>;

    /// 批量登记描述符
    fn register_all<I>(&mut self, descriptors: I) -> Result<(), DependencyError>
    where
        I: IntoIterator<Item = ComponentDescriptor>,
        Self: Sized,
    {
        for descriptor in descriptors {
            self.register(descriptor)?;
        }
        Ok(())
    }

    /// 按声明顺序解析全部待处理的描述符
    fn resolve_all(&mut self) -> Result<&Beans, DependencyError>;

    /// 已注册的组件
    fn beans(&self) -> &Beans;

    /// 待解析的描述符数量
    fn pending_count(&self) -> usize;

    /// 条件求值报告
    fn report(&self) -> &ConditionEvaluationReport;
}
