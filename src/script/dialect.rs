//! Script dialect abstraction

use std::fmt;

use clap::ValueEnum;

use super::bash::BashDialect;
use super::powershell::PowerShellDialect;
use super::{InstallerScript, ScriptData, Statement};

/// Base name of generated installer files
pub const INSTALLER_FILE_STEM: &str = "armory-loadout-installer";

/// A target syntax for generated installers
///
/// Implementations supply quoting, comments and the syntax of each [`Statement`];
/// the statement order and data come from the shared planner.
pub trait ScriptDialect {
    fn kind(&self) -> DialectKind;

    /// Encode `value` as a single string literal of this dialect
    fn quote(&self, value: &str) -> String;

    /// A one-line comment; line breaks in `text` are flattened
    fn comment(&self, text: &str) -> String {
        format!("# {}", flatten_line(text))
    }

    fn render_statement(&self, statement: Statement, data: &ScriptData) -> String;

    /// Render the whole script, statements separated by a blank line
    fn render(&self, script: &InstallerScript) -> String {
        let blocks: Vec<String> = script
            .statements
            .iter()
            .map(|statement| {
                self.render_statement(*statement, &script.data)
                    .trim_end()
                    .to_string()
            })
            .collect();
        let mut text = blocks.join("\n\n");
        text.push('\n');
        text
    }
}

/// Collapse line breaks so text cannot escape a single-line comment
pub fn flatten_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum DialectKind {
    #[value(name = "powershell", aliases = ["ps1", "pwsh"])]
    PowerShell,
    #[value(name = "bash", aliases = ["sh"])]
    Bash,
}

impl DialectKind {
    /// PowerShell on Windows, Bash elsewhere
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            DialectKind::PowerShell
        } else {
            DialectKind::Bash
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DialectKind::PowerShell => "powershell",
            DialectKind::Bash => "bash",
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            DialectKind::PowerShell => "ps1",
            DialectKind::Bash => "sh",
        }
    }

    /// `armory-loadout-installer.{ps1,sh}`
    pub fn default_file_name(self) -> String {
        format!("{INSTALLER_FILE_STEM}.{}", self.file_extension())
    }

    pub fn backend(self) -> &'static dyn ScriptDialect {
        match self {
            DialectKind::PowerShell => &PowerShellDialect,
            DialectKind::Bash => &BashDialect,
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_line() {
        assert_eq!(flatten_line("one\ntwo\r\nthree"), "one two three");
        assert_eq!(flatten_line("plain"), "plain");
    }

    #[test]
    fn test_comment_cannot_break_out() {
        for kind in [DialectKind::Bash, DialectKind::PowerShell] {
            let comment = kind.backend().comment("manifest\nrm -rf /");
            assert_eq!(comment.lines().count(), 1);
            assert!(comment.starts_with("# "));
        }
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            DialectKind::PowerShell.default_file_name(),
            "armory-loadout-installer.ps1"
        );
        assert_eq!(
            DialectKind::Bash.default_file_name(),
            "armory-loadout-installer.sh"
        );
    }

    #[test]
    fn test_backend_kind_matches() {
        for kind in [DialectKind::Bash, DialectKind::PowerShell] {
            assert_eq!(kind.backend().kind(), kind);
        }
    }

    #[test]
    fn test_value_enum_aliases() {
        assert_eq!(
            DialectKind::from_str("pwsh", true).unwrap(),
            DialectKind::PowerShell
        );
        assert_eq!(DialectKind::from_str("sh", true).unwrap(), DialectKind::Bash);
    }

    #[test]
    fn test_platform_default() {
        let expected = if cfg!(windows) {
            DialectKind::PowerShell
        } else {
            DialectKind::Bash
        };
        assert_eq!(DialectKind::platform_default(), expected);
    }
}
