//! Raw linter output and per-line normalization.

/// Severity of a reported violation. Only `Error` participates in suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// Map eslint's numeric severity (1 = warn, 2 = error).
    pub fn from_eslint(level: u8) -> Self {
        if level >= 2 {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

}

/// One rule/line pair reported by the external linter. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub line: usize,
    pub rule_id: String,
    pub severity: Severity,
}

impl Violation {
    pub fn error(line: usize, rule_id: impl Into<String>) -> Self {
        Self {
            line,
            rule_id: rule_id.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(line: usize, rule_id: impl Into<String>) -> Self {
        Self {
            line,
            rule_id: rule_id.into(),
            severity: Severity::Warning,
        }
    }
}

/// All qualifying rule ids for one source line, first-seen order, deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineGroup {
    pub line: usize,
    pub rule_ids: Vec<String>,
}

/// Normalize raw linter output into ordered per-line groups.
///
/// Warnings are dropped: suppression only freezes violations that would block
/// enabling the rule as an error. A non-empty `whitelist` restricts the run to
/// those rule ids.
pub fn group_by_line(violations: &[Violation], whitelist: &[String]) -> Vec<LineGroup> {
    let mut groups: Vec<LineGroup> = Vec::new();

    for violation in violations {
        if violation.severity != Severity::Error {
            continue;
        }
        if !whitelist.is_empty() && !whitelist.contains(&violation.rule_id) {
            continue;
        }

        match groups.iter_mut().find(|g| g.line == violation.line) {
            Some(group) => {
                if !group.rule_ids.contains(&violation.rule_id) {
                    group.rule_ids.push(violation.rule_id.clone());
                }
            }
            None => groups.push(LineGroup {
                line: violation.line,
                rule_ids: vec![violation.rule_id.clone()],
            }),
        }
    }

    groups
}
