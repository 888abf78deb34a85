//! 条件注册表的场景级集成测试

use di_abstractions::{
    ComponentDescriptor, Condition, ConditionContext, ConditionOutcome, ConditionalRegistry,
    Predicate,
};
use di_impl::ConditionalRegistryImpl;
use infrastructure_common::{DependencyError, Environment};

#[derive(Debug)]
struct Computer {
    name: &'static str,
}

#[derive(Debug)]
struct School;

#[derive(Debug)]
struct Student;

#[derive(Debug)]
struct Language {
    content: &'static str,
}

fn resolved_names(registry: &mut ConditionalRegistryImpl) -> Vec<String> {
    registry
        .resolve_all()
        .unwrap()
        .names()
        .map(str::to_string)
        .collect()
}

/// 测试已有电脑时跳过笔记本电脑
#[test]
fn test_missing_bean_scenario() {
    let mut registry = ConditionalRegistryImpl::new(Environment::new());
    registry
        .register_all([
            ComponentDescriptor::new("desktopPC", || Computer { name: "台式电脑" }),
            ComponentDescriptor::new("notebookPC", || Computer { name: "笔记本电脑" })
                .with_predicate(Predicate::on_missing_bean::<Computer>()),
        ])
        .unwrap();

    assert_eq!(resolved_names(&mut registry), vec!["desktopPC"]);
    let desktop = registry.beans().get::<Computer>("desktopPC").unwrap();
    assert_eq!(desktop.name, "台式电脑");
    assert_eq!(registry.report().skipped().collect::<Vec<_>>(), vec!["notebookPC"]);
}

/// 测试有学校才有学生
#[test]
fn test_on_bean_present_scenario() {
    let mut registry = ConditionalRegistryImpl::new(Environment::new());
    registry
        .register_all([
            ComponentDescriptor::new("school", || School),
            ComponentDescriptor::new("zhangsan", || Student)
                .with_predicate(Predicate::on_bean_present::<School>()),
        ])
        .unwrap();

    assert_eq!(resolved_names(&mut registry), vec!["school", "zhangsan"]);
}

/// 测试按属性选择语言
#[test]
fn test_on_property_scenario() {
    let environment: Environment = [("lang".to_string(), "zh_CN".to_string())]
        .into_iter()
        .collect();
    let mut registry = ConditionalRegistryImpl::new(environment);
    registry
        .register_all([
            ComponentDescriptor::new("chinese", || Language {
                content: "华流才是最屌的",
            })
            .with_predicate(Predicate::on_property("lang", "zh_CN")),
            ComponentDescriptor::new("english", || Language {
                content: "english is good",
            })
            .with_predicate(Predicate::on_property("lang", "en_US")),
        ])
        .unwrap();

    assert_eq!(resolved_names(&mut registry), vec!["chinese"]);
    let chinese = registry.beans().get::<Language>("chinese").unwrap();
    assert_eq!(chinese.content, "华流才是最屌的");
}

/// 测试唯一候选条件
#[test]
fn test_single_candidate_depends_on_count() {
    let student = || {
        ComponentDescriptor::new("小明", || Student)
            .with_predicate(Predicate::on_single_candidate::<Computer>())
    };

    let mut registry = ConditionalRegistryImpl::new(Environment::new());
    registry
        .register_all([
            ComponentDescriptor::new("desktopPC", || Computer { name: "台式电脑" }),
            student(),
        ])
        .unwrap();
    assert_eq!(resolved_names(&mut registry), vec!["desktopPC", "小明"]);

    let mut registry = ConditionalRegistryImpl::new(Environment::new());
    registry
        .register_all([
            ComponentDescriptor::new("desktopPC", || Computer { name: "台式电脑" }),
            ComponentDescriptor::new("notebookPC", || Computer { name: "笔记本电脑" }),
            student(),
        ])
        .unwrap();
    assert_eq!(resolved_names(&mut registry), vec!["desktopPC", "notebookPC"]);
    assert_eq!(
        registry.report().outcome_of("小明"),
        Some(&ConditionOutcome::Skipped {
            predicate: "OnSingleCandidate(Computer)".to_string()
        })
    );
}

/// 测试组件被注册当且仅当其所有条件在求值时成立
#[test]
fn test_registered_iff_all_predicates_hold() {
    let languages = [None, Some("zh_CN"), Some("en_US")];
    for with_school in [false, true] {
        for lang in languages {
            let mut environment = Environment::new();
            if let Some(lang) = lang {
                environment.insert("lang", lang);
            }

            let mut registry = ConditionalRegistryImpl::new(environment);
            if with_school {
                registry
                    .register(ComponentDescriptor::new("school", || School))
                    .unwrap();
            }
            registry
                .register(
                    ComponentDescriptor::new("student", || Student)
                        .with_predicate(Predicate::on_bean_present::<School>())
                        .with_predicate(Predicate::on_property("lang", "zh_CN")),
                )
                .unwrap();

            let names = resolved_names(&mut registry);
            let expected = with_school && lang == Some("zh_CN");
            assert_eq!(
                names.iter().any(|name| name == "student"),
                expected,
                "with_school={} lang={:?}",
                with_school,
                lang
            );
        }
    }
}

struct ChineseCondition;

impl Condition for ChineseCondition {
    fn matches(&self, context: &ConditionContext<'_>) -> bool {
        context.environment().property_equals("lang", "zh_CN")
    }

    fn name(&self) -> &str {
        "ChineseCondition"
    }
}

/// 测试自定义条件
#[test]
fn test_custom_condition() {
    let environment = Environment::new().with_property("lang", "en_US");
    let mut registry = ConditionalRegistryImpl::new(environment);
    registry
        .register_all([
            ComponentDescriptor::new("chinese", || Language {
                content: "华流才是最屌的",
            })
            .with_predicate(Predicate::custom(ChineseCondition)),
            ComponentDescriptor::new("english", || Language {
                content: "english is good",
            })
            .with_predicate(Predicate::custom_fn(|context: &ConditionContext<'_>| {
                context.environment().property_equals("lang", "en_US")
            })),
        ])
        .unwrap();

    assert_eq!(resolved_names(&mut registry), vec!["english"]);
    assert_eq!(
        registry.report().outcome_of("chinese"),
        Some(&ConditionOutcome::Skipped {
            predicate: "Custom(ChineseCondition)".to_string()
        })
    );
}

/// 测试工厂失败
#[test]
fn test_factory_error_is_reported() {
    let mut registry = ConditionalRegistryImpl::new(Environment::new());
    registry
        .register_all([
            ComponentDescriptor::new("school", || School),
            ComponentDescriptor::try_new("zhangsan", || Err::<Student, _>("学籍缺失")),
        ])
        .unwrap();

    match registry.resolve_all() {
        Err(DependencyError::ComponentCreationFailed { name, source }) => {
            assert_eq!(name, "zhangsan");
            assert_eq!(source.to_string(), "学籍缺失");
        }
        other => panic!("期望组件创建失败, 实际: {:?}", other.map(|beans| beans.len())),
    }
    assert!(registry.beans().registration("school").is_some());
    assert!(registry.beans().registration("zhangsan").is_none());
}

/// 测试重复名称
#[test]
fn test_duplicate_name_is_rejected() {
    let mut registry = ConditionalRegistryImpl::new(Environment::new());
    let result = registry.register_all([
        ComponentDescriptor::new("school", || School),
        ComponentDescriptor::new("school", || Student),
    ]);

    assert!(matches!(
        result,
        Err(DependencyError::DuplicateName { ref name }) if name == "school"
    ));
    assert_eq!(resolved_names(&mut registry), vec!["school"]);
}
