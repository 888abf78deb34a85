//! 演示用的领域对象

/// 电脑
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Computer {
    pub name: String,
}

impl Computer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// 台式电脑，同时以 [`Computer`] 暴露
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopPC {
    pub computer: Computer,
    pub brand: String,
}

impl DesktopPC {
    pub fn new(name: impl Into<String>, brand: impl Into<String>) -> Self {
        Self {
            computer: Computer::new(name),
            brand: brand.into(),
        }
    }
}

/// 学生
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub name: String,
}

impl Student {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// 学校
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct School {
    pub name: String,
}

impl School {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// 语言
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub id: i64,
    pub content: String,
}
