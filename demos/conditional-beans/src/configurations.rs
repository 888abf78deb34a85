//! 演示场景的组件声明
//!
//! 每个函数对应一组按声明顺序排列的组件描述符

use crate::model::{Computer, DesktopPC, Language, School, Student};
use di_abstractions::{ComponentDescriptor, Condition, ConditionContext, Predicate};

/// 语言配置键
pub const LANG_KEY: &str = "lang";

/// 已有电脑时不再声明笔记本电脑
pub fn bean_config() -> Vec<ComponentDescriptor> {
    vec![
        ComponentDescriptor::new("desktopPC", || DesktopPC::new("台式电脑", "华硕全家桶"))
            .exposed_as::<Computer>()
            .with_description("台式电脑, 同时作为电脑"),
        ComponentDescriptor::new("notebookPC", || Computer::new("笔记本电脑"))
            .with_description("没有电脑时才需要的笔记本电脑")
            .conditional_on_missing_self(),
    ]
}

/// 有学校才有学生
pub fn bean_configuration() -> Vec<ComponentDescriptor> {
    vec![
        ComponentDescriptor::new("school", || School::new("清华大学")),
        ComponentDescriptor::new("zhangsan", || Student::new("张三"))
            .with_predicate(Predicate::on_bean_present::<School>()),
    ]
}

/// 学校类型可用时才有学生
pub fn conditional_on_class_config() -> Vec<ComponentDescriptor> {
    vec![
        ComponentDescriptor::new("school", || School::new("清华大学")),
        ComponentDescriptor::new("zhangsan", || Student::new("张三"))
            .with_predicate(Predicate::on_class_present::<School>()),
    ]
}

/// 一个学生只能有一台电脑
pub fn bean_single_candidate_config(with_notebook: bool) -> Vec<ComponentDescriptor> {
    let mut descriptors = vec![ComponentDescriptor::new("desktopPC", || {
        Computer::new("台式电脑")
    })];
    if with_notebook {
        descriptors.push(ComponentDescriptor::new("computer", || {
            Computer::new("笔记本电脑")
        }));
    }
    descriptors.push(
        ComponentDescriptor::new("小明", || Student::new("小明"))
            .with_predicate(Predicate::on_single_candidate::<Computer>()),
    );
    descriptors
}

/// 按语言配置选择语言组件
pub fn language_config() -> Vec<ComponentDescriptor> {
    vec![
        ComponentDescriptor::new("chinese", || Language {
            id: 1,
            content: "华流才是最屌的".to_string(),
        })
        .with_predicate(Predicate::custom(ChineseCondition)),
        ComponentDescriptor::new("english", || Language {
            id: 2,
            content: "english is good".to_string(),
        })
        .with_predicate(Predicate::custom(EnglishCondition)),
    ]
}

/// `lang` 为 `zh_CN`
#[derive(Debug, Clone, Copy, Default)]
pub struct ChineseCondition;

impl Condition for ChineseCondition {
    fn matches(&self, context: &ConditionContext<'_>) -> bool {
        context.environment().property_equals(LANG_KEY, "zh_CN")
    }

    fn name(&self) -> &str {
        "ChineseCondition"
    }
}

/// `lang` 为 `en_US`
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishCondition;

impl Condition for EnglishCondition {
    fn matches(&self, context: &ConditionContext<'_>) -> bool {
        context.environment().property_equals(LANG_KEY, "en_US")
    }

    fn name(&self) -> &str {
        "EnglishCondition"
    }
}
