//! External linter invocation and report decoding.
//!
//! The engine never re-implements lint rules. It shells out to an `eslint`
//! binary, feeds it the file over stdin, and decodes the JSON report into the
//! violation model. The trait seam exists so the engine and the integration
//! tests can run against a canned report instead of a subprocess.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use serde::Deserialize;
use tempfile::NamedTempFile;

use crate::error::{SuppressError, SuppressResult};
use crate::violation::{Severity, Violation};

/// What the linter said about one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintOutcome {
    /// Violations for the file, possibly empty.
    Report(Vec<Violation>),
    /// The linter could not parse the file at all.
    ParseFailed,
}

/// Source of violation reports for a single file.
pub trait Linter {
    fn lint(&self, path: &Path, source: &str) -> SuppressResult<LintOutcome>;
}

/// Runs an `eslint` binary with JSON output over stdin.
pub struct EslintCommand {
    program: String,
    base_config: Option<serde_json::Value>,
}

impl EslintCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            base_config: None,
        }
    }

    /// Replace project resolution with an inline ESLint config, validated as
    /// JSON up front so a typo fails before the first file is linted.
    pub fn with_base_config(mut self, config: &str) -> SuppressResult<Self> {
        let value: serde_json::Value = serde_json::from_str(config)
            .map_err(|err| SuppressError::config(format!("invalid base config JSON: {err}")))?;
        self.base_config = Some(value);
        Ok(self)
    }

    /// Write the inline config to a uniquely named temp file. The file is
    /// removed when the returned handle drops, on every exit path.
    fn write_base_config(&self) -> SuppressResult<Option<NamedTempFile>> {
        let Some(config) = &self.base_config else {
            return Ok(None);
        };
        let mut file = tempfile::Builder::new()
            .prefix("eslint-suppress-config-")
            .suffix(".json")
            .tempfile()?;
        file.write_all(&serde_json::to_vec(config).map_err(|err| {
            SuppressError::config(format!("failed to serialize base config: {err}"))
        })?)?;
        Ok(Some(file))
    }
}

impl Linter for EslintCommand {
    fn lint(&self, path: &Path, source: &str) -> SuppressResult<LintOutcome> {
        let config_file = self.write_base_config()?;

        let mut command = Command::new(&self.program);
        command
            .arg("--format")
            .arg("json")
            .arg("--stdin")
            .arg("--stdin-filename")
            .arg(path);
        if let Some(config) = &config_file {
            command.arg("--no-eslintrc").arg("--config").arg(config.path());
        }

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                SuppressError::linter(format!("failed to start `{}`: {err}", self.program))
            })?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(source.as_bytes())?;
        }
        let output = child.wait_with_output()?;
        drop(config_file);

        // Exit code 1 means "violations found", which is the expected case.
        let code = output.status.code();
        if !matches!(code, Some(0) | Some(1)) {
            return Err(SuppressError::linter(format!(
                "`{}` exited with status {:?}: {}",
                self.program,
                code,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        decode_report(&output.stdout)
    }
}

#[derive(Debug, Deserialize)]
struct FileReport {
    messages: Vec<ReportMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportMessage {
    rule_id: Option<String>,
    severity: u8,
    line: Option<usize>,
    #[serde(default)]
    fatal: bool,
}

/// Decode an ESLint JSON report for a single-file run.
///
/// A fatal message means the linter's own parser rejected the file, so the
/// whole file is reported as unparseable. Messages with no rule id or no line
/// carry nothing a directive could name and are ignored.
pub fn decode_report(stdout: &[u8]) -> SuppressResult<LintOutcome> {
    let reports: Vec<FileReport> = serde_json::from_slice(stdout)
        .map_err(|err| SuppressError::linter(format!("unreadable linter report: {err}")))?;

    let mut violations = Vec::new();
    for report in reports {
        for message in report.messages {
            if message.fatal {
                return Ok(LintOutcome::ParseFailed);
            }
            let (Some(rule_id), Some(line)) = (message.rule_id, message.line) else {
                continue;
            };
            violations.push(Violation {
                line,
                rule_id,
                severity: Severity::from_eslint(message.severity),
            });
        }
    }
    Ok(LintOutcome::Report(violations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_errors_and_warnings() {
        let stdout = br#"[{"filePath":"a.js","messages":[
            {"ruleId":"eqeqeq","severity":2,"line":3,"column":10,"message":"Expected '==='."},
            {"ruleId":"no-console","severity":1,"line":5,"column":1,"message":"Unexpected console."}
        ]}]"#;
        let LintOutcome::Report(violations) = decode_report(stdout).unwrap() else {
            panic!("expected a report");
        };
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0], Violation::error(3, "eqeqeq"));
        assert_eq!(violations[1], Violation::warning(5, "no-console"));
    }

    #[test]
    fn fatal_message_means_parse_failure() {
        let stdout = br#"[{"filePath":"a.js","messages":[
            {"ruleId":null,"fatal":true,"severity":2,"line":1,"message":"Parsing error: Unexpected token"}
        ]}]"#;
        assert_eq!(decode_report(stdout).unwrap(), LintOutcome::ParseFailed);
    }

    #[test]
    fn messages_without_rule_or_line_are_ignored() {
        let stdout = br#"[{"filePath":"a.js","messages":[
            {"ruleId":null,"severity":2,"line":2,"message":"orphan"},
            {"ruleId":"semi","severity":2,"message":"no line"}
        ]}]"#;
        let LintOutcome::Report(violations) = decode_report(stdout).unwrap() else {
            panic!("expected a report");
        };
        assert!(violations.is_empty());
    }

    #[test]
    fn empty_report_is_an_empty_list() {
        assert_eq!(
            decode_report(b"[]").unwrap(),
            LintOutcome::Report(Vec::new())
        );
    }

    #[test]
    fn rejects_garbage_output() {
        assert!(decode_report(b"not json").is_err());
    }

    #[test]
    fn base_config_temp_files_are_unique_and_removed_on_drop() {
        let first = EslintCommand::new("eslint")
            .with_base_config(r#"{"rules":{"eqeqeq":"error"}}"#)
            .unwrap();
        let second = EslintCommand::new("eslint")
            .with_base_config(r#"{"rules":{"eqeqeq":"error"}}"#)
            .unwrap();

        let file_a = first.write_base_config().unwrap().unwrap();
        let file_b = second.write_base_config().unwrap().unwrap();
        assert_ne!(file_a.path(), file_b.path());

        let path = file_a.path().to_path_buf();
        assert!(path.exists());
        drop(file_a);
        assert!(!path.exists());
    }

    #[test]
    fn base_config_must_be_valid_json() {
        assert!(EslintCommand::new("eslint").with_base_config("{oops").is_err());
        assert!(
            EslintCommand::new("eslint")
                .with_base_config(r#"{"rules":{"eqeqeq":"error"}}"#)
                .is_ok()
        );
    }
}
