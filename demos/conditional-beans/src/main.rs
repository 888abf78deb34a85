//! 条件注册演示程序
//!
//! 每个场景声明一组组件，打印解析后注册的组件名称

mod configurations;
mod model;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use infrastructure_common::{set_system_property, Environment};
use infrastructure_composition::{ApplicationBuilder, ApplicationContext, LoggingConfig};
use model::{Computer, DesktopPC, Language, School, Student};
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config/application.toml");

/// 演示场景
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// 已有电脑时跳过笔记本电脑
    MissingBean,
    /// 有学校才有学生
    OnBean,
    /// 学校类型可用时才有学生
    OnClass,
    /// 唯一电脑时才有学生
    SingleCandidate,
    /// 按 `lang` 属性选择语言
    Language,
}

#[derive(Debug, Parser)]
#[command(name = "conditional-beans", about = "条件注册演示")]
struct Args {
    /// 演示场景
    #[arg(value_enum)]
    scenario: Scenario,

    /// 命令行属性，格式 key=value，可重复
    #[arg(short = 'D', long = "property", value_parser = Environment::parse_property)]
    properties: Vec<(String, String)>,

    /// 配置文件（TOML 或 JSON）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 环境变量前缀
    #[arg(long, default_value = "APP")]
    env_prefix: String,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 输出条件求值报告
    #[arg(long)]
    report: bool,

    /// single-candidate 场景额外声明一台笔记本电脑
    #[arg(long)]
    with_notebook: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.scenario == Scenario::Language {
        set_system_property(configurations::LANG_KEY, "zh_CN");
    }

    let descriptors = match args.scenario {
        Scenario::MissingBean => configurations::bean_config(),
        Scenario::OnBean => configurations::bean_configuration(),
        Scenario::OnClass => configurations::conditional_on_class_config(),
        Scenario::SingleCandidate => {
            configurations::bean_single_candidate_config(args.with_notebook)
        }
        Scenario::Language => configurations::language_config(),
    };

    let mut builder = ApplicationBuilder::new()
        .with_logging(LoggingConfig::default().with_level(parse_log_level(&args.log_level)));

    match &args.config {
        Some(path) => builder = builder.add_config_file(path).await?,
        None if Path::new(DEFAULT_CONFIG).exists() => {
            builder = builder.add_config_file(DEFAULT_CONFIG).await?
        }
        None => {}
    }

    let context = builder
        .add_config_env_vars(args.env_prefix.as_str())
        .add_system_properties()
        .add_properties(args.properties.iter().cloned())
        .register_all(descriptors)
        .build()
        .await?;

    info!("场景 {:?} 解析完成", args.scenario);
    print_beans(&context);

    if args.report {
        eprintln!("{}", context.report());
    }

    Ok(())
}

/// 每行输出一个组件名称，实例内容写入日志
fn print_beans(context: &ApplicationContext) {
    for name in context.bean_definition_names() {
        println!("{}", name);
        if let Some(desktop) = context.get_bean::<DesktopPC>(&name) {
            info!("{} -> {} ({})", name, desktop.computer.name, desktop.brand);
        } else if let Some(computer) = context.get_bean::<Computer>(&name) {
            info!("{} -> {}", name, computer.name);
        } else if let Some(student) = context.get_bean::<Student>(&name) {
            info!("{} -> {}", name, student.name);
        } else if let Some(school) = context.get_bean::<School>(&name) {
            info!("{} -> {}", name, school.name);
        } else if let Some(language) = context.get_bean::<Language>(&name) {
            info!("{} -> {} {}", name, language.id, language.content);
        }
    }
}

fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
