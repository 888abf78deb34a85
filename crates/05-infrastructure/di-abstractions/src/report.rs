//! 条件求值报告

use std::fmt;

/// 单个描述符的求值结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionOutcome {
    /// 条件全部满足，组件已注册
    Registered,
    /// 条件未满足，组件被跳过
    Skipped {
        /// 第一个未满足的谓词
        predicate: String,
    },
}

/// 报告条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// 组件名称
    pub name: String,
    /// 组件描述
    pub description: Option<String>,
    /// 求值结果
    pub outcome: ConditionOutcome,
}

/// 条件求值报告
///
/// 按声明顺序记录每个描述符的求值结果
#[derive(Debug, Clone, Default)]
pub struct ConditionEvaluationReport {
    entries: Vec<ReportEntry>,
}

impl ConditionEvaluationReport {
    /// 创建空报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录已注册的组件
    pub fn record_registered(&mut self, name: impl Into<String>, description: Option<&str>) {
        self.entries.push(ReportEntry {
            name: name.into(),
            description: description.map(str::to_string),
            outcome: ConditionOutcome::Registered,
        });
    }

    /// 记录被跳过的组件
    pub fn record_skipped(
        &mut self,
        name: impl Into<String>,
        description: Option<&str>,
        predicate: impl Into<String>,
    ) {
        self.entries.push(ReportEntry {
            name: name.into(),
            description: description.map(str::to_string),
            outcome: ConditionOutcome::Skipped {
                predicate: predicate.into(),
            },
        });
    }

    /// 全部条目
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// 查找指定组件的结果
    pub fn outcome_of(&self, name: &str) -> Option<&ConditionOutcome> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.outcome)
    }

    /// 被跳过的组件名称
    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.outcome, ConditionOutcome::Skipped { .. }))
            .map(|entry| entry.name.as_str())
    }
}

impl fmt::Display for ConditionEvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "条件求值报告:")?;
        for entry in &self.entries {
            let label = match &entry.description {
                Some(description) => format!("{} ({})", entry.name, description),
                None => entry.name.clone(),
            };
            match &entry.outcome {
                ConditionOutcome::Registered => writeln!(f, "  + {} 已注册", label)?,
                ConditionOutcome::Skipped { predicate } => {
                    writeln!(f, "  - {} 已跳过, 未满足: {}", label, predicate)?
                }
            }
        }
        Ok(())
    }
}
