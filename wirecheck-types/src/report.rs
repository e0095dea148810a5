use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule family a finding belongs to. Declaration order is checker run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Mechanical,
    Electrical,
    Standards,
    Labeling,
    Consistency,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::Mechanical,
        Domain::Electrical,
        Domain::Standards,
        Domain::Labeling,
        Domain::Consistency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Mechanical => "mechanical",
            Domain::Electrical => "electrical",
            Domain::Standards => "standards",
            Domain::Labeling => "labeling",
            Domain::Consistency => "consistency",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How invasive applying a fix is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixEffect {
    /// Adds or fills in data without changing any chosen part.
    NonDestructive,
    /// Swaps a part or a part attribute for another.
    Substitution,
    /// The design has to go back through synthesis.
    ReSynthesisRequired,
}

impl FixEffect {
    pub fn as_str(self) -> &'static str {
        match self {
            FixEffect::NonDestructive => "non_destructive",
            FixEffect::Substitution => "substitution",
            FixEffect::ReSynthesisRequired => "re_synthesis_required",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub severity: Severity,
    pub domain: Domain,
    pub code: String,
    pub message: String,

    /// Path into the assembly the finding is about.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_: Option<String>,

    #[serde(default)]
    pub refs: Vec<String>,
}

impl Finding {
    pub fn new(
        id: impl Into<String>,
        severity: Severity,
        domain: Domain,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            domain,
            code: code.into(),
            message: message.into(),
            where_: None,
            refs: vec![],
        }
    }

    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.where_ = Some(path.into());
        self
    }

    pub fn with_ref(mut self, reference: impl Into<String>) -> Self {
        self.refs.push(reference.into());
        self
    }

    /// Identity used for deduplication.
    pub fn dedup_key(&self) -> (&str, Option<&str>) {
        (self.id.as_str(), self.where_.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub id: String,
    pub label: String,
    pub description: String,

    #[serde(default)]
    pub applies_to: Vec<String>,

    pub effect: FixEffect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub assembly_id: String,
    pub ruleset_id: String,
    pub version: String,
    pub passed: bool,
    pub errors: u64,
    pub warnings: u64,

    #[serde(default)]
    pub findings: Vec<Finding>,

    #[serde(default)]
    pub fixes: Vec<Fix>,

    /// RFC 3339 UTC timestamp, second precision.
    pub generated_at: String,
}

impl Report {
    pub fn findings_with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings.iter().filter(move |f| f.code == code)
    }

    pub fn fix(&self, id: &str) -> Option<&Fix> {
        self.fixes.iter().find(|f| f.id == id)
    }

    pub fn fix_ids(&self) -> Vec<String> {
        self.fixes.iter().map(|f| f.id.clone()).collect()
    }
}
