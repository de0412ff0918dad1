//! Review pipeline
//!
//! [`review`] replays the batch first. A walk-through violation is the only
//! advice returned; otherwise every enabled rule runs against the final
//! catalog and their findings are accumulated and sorted.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlreview_types::Dialect;

use crate::error::{Code, WalkThroughError};
use crate::state::DatabaseState;
use crate::statements::{Statement, StatementKind};

// =============================================================================
// Advice
// =============================================================================

/// Severity of one finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Success,
    Warn,
    Error,
}

impl Status {
    const fn priority(self) -> u8 {
        match self {
            Self::Error => 2,
            Self::Warn => 1,
            Self::Success => 0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One review finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub status: Status,
    pub code: Code,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Advice {
    pub fn ok() -> Self {
        Self {
            status: Status::Success,
            code: Code::Ok,
            title: "OK".to_string(),
            content: String::new(),
            line: None,
        }
    }
}

impl From<WalkThroughError> for Advice {
    fn from(err: WalkThroughError) -> Self {
        match err.code {
            Code::Unsupported => Self {
                status: Status::Error,
                code: err.code,
                title: err.content,
                content: String::new(),
                line: err.line,
            },
            code => Self {
                status: Status::Error,
                code,
                title: code.title().to_string(),
                content: err.content,
                line: err.line,
            },
        }
    }
}

// =============================================================================
// Rules
// =============================================================================

/// How a configured rule reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    #[default]
    Error,
    Warning,
    Disabled,
}

impl RuleLevel {
    /// Status of advice produced at this level
    pub const fn status(self) -> Option<Status> {
        match self {
            Self::Error => Some(Status::Error),
            Self::Warning => Some(Status::Warn),
            Self::Disabled => None,
        }
    }
}

/// Identifier of an accumulating rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleType {
    #[serde(rename = "table.require-pk")]
    TableRequirePk,
}

impl RuleType {
    pub const ALL: &'static [RuleType] = &[RuleType::TableRequirePk];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TableRequirePk => "table.require-pk",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| format!("unknown rule `{s}`"))
    }
}

/// A rule enabled at a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub rule_type: RuleType,
    pub level: RuleLevel,
}

/// What an advisor sees: the final catalog and the replayed batch
pub struct Context<'a> {
    pub state: &'a DatabaseState,
    pub statements: &'a [Statement],
    pub status: Status,
}

/// An accumulating check
pub trait Advisor {
    fn check(&self, ctx: &Context<'_>) -> Vec<Advice>;
}

/// Advisors keyed by dialect and rule
#[derive(Default)]
pub struct Registry {
    advisors: HashMap<(Dialect, RuleType), Box<dyn Advisor>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in advisor for the MySQL family
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for dialect in Dialect::ALL.iter().copied().filter(|d| d.is_mysql_family()) {
            registry.register(dialect, RuleType::TableRequirePk, TableRequirePk);
        }
        registry
    }

    pub fn register(&mut self, dialect: Dialect, rule: RuleType, advisor: impl Advisor + 'static) {
        self.advisors.insert((dialect, rule), Box::new(advisor));
    }

    pub fn get(&self, dialect: Dialect, rule: RuleType) -> Option<&dyn Advisor> {
        self.advisors.get(&(dialect, rule)).map(|a| a.as_ref())
    }
}

/// Review a batch: walk-through first, then each enabled rule
pub fn review(
    state: &mut DatabaseState,
    statements: &[Statement],
    rules: &[Rule],
    registry: &Registry,
) -> Vec<Advice> {
    let dialect = state.dialect();
    if dialect.is_mysql_family()
        && let Err(err) = state.walk_through(statements)
    {
        return vec![Advice::from(err)];
    }

    let mut advice = Vec::new();
    for rule in rules {
        let Some(status) = rule.level.status() else {
            continue;
        };
        let Some(advisor) = registry.get(dialect, rule.rule_type) else {
            continue;
        };
        let ctx = Context {
            state,
            statements,
            status,
        };
        advice.extend(advisor.check(&ctx));
    }

    if advice.is_empty() {
        return vec![Advice::ok()];
    }
    advice.sort_by(|a, b| {
        b.status
            .priority()
            .cmp(&a.status.priority())
            .then_with(|| a.line.cmp(&b.line))
            .then_with(|| a.title.cmp(&b.title))
    });
    advice
}

// =============================================================================
// Built-in Advisors
// =============================================================================

/// Every table created or altered in the batch must end with a primary key
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRequirePk;

impl Advisor for TableRequirePk {
    fn check(&self, ctx: &Context<'_>) -> Vec<Advice> {
        // last statement line per table name, in first-seen order
        let mut touched: Vec<(String, usize)> = Vec::new();
        for statement in ctx.statements {
            let name = match &statement.kind {
                StatementKind::CreateTable(create) => &create.table.name,
                StatementKind::AlterTable(alter) => &alter.table.name,
                _ => continue,
            };
            match touched
                .iter_mut()
                .find(|(seen, _)| ctx.state.case().equals(seen, name))
            {
                Some(entry) => entry.1 = statement.line,
                None => touched.push((name.clone(), statement.line)),
            }
        }

        touched
            .into_iter()
            .filter_map(|(name, line)| {
                let table = ctx.state.table(&name)?;
                if table.primary_key().is_some() || !table.is_complete() {
                    return None;
                }
                Some(Advice {
                    status: ctx.status,
                    code: Code::TableNoPk,
                    title: RuleType::TableRequirePk.to_string(),
                    content: format!("Table `{}` requires PRIMARY KEY", table.name()),
                    line: Some(line),
                })
            })
            .collect()
    }
}
