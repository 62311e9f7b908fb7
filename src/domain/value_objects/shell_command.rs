//! Structured shell command construction
//!
//! Settings values end up on remote command lines, so every argument is
//! quoted unless it only contains characters the shell treats literally.

use std::fmt;

/// Quote a string for safe use as a single POSIX shell word
pub fn shell_quote(value: &str) -> String {
    if !value.is_empty() && value.chars().all(is_shell_safe) {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', "'\\''"))
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '@' | '=' | ',' | '+')
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Word {
    /// Quoted on render
    Arg(String),
    /// Emitted verbatim (program names, operators, configured command lines)
    Literal(String),
}

/// A shell command assembled from literal tokens and quoted arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    words: Vec<Word>,
}

impl ShellCommand {
    /// Start a command with a trusted program name
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            words: vec![Word::Literal(program.into())],
        }
    }

    /// A complete command line taken verbatim from settings
    pub fn raw(line: impl Into<String>) -> Self {
        Self::new(line)
    }

    /// Append a quoted argument
    pub fn arg(mut self, value: impl AsRef<str>) -> Self {
        self.words.push(Word::Arg(value.as_ref().to_string()));
        self
    }

    /// Append several quoted arguments
    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            self = self.arg(value);
        }
        self
    }

    /// Append an unquoted token such as `||`, `>>` or a flag
    pub fn literal(mut self, token: impl Into<String>) -> Self {
        self.words.push(Word::Literal(token.into()));
        self
    }

    /// Chain another command after `op` (`&&`, `||`, `|`)
    pub fn chain(mut self, op: &str, next: ShellCommand) -> Self {
        self.words.push(Word::Literal(op.to_string()));
        self.words.extend(next.words);
        self
    }

    pub fn render(&self) -> String {
        self.words
            .iter()
            .map(|word| match word {
                Word::Arg(value) => shell_quote(value),
                Word::Literal(token) => token.clone(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Join POSIX paths the way `posixpath.join` does: an absolute tail wins
pub fn join_remote_path(base: &str, tail: &str) -> String {
    if tail.starts_with('/') || base.is_empty() {
        return tail.to_string();
    }
    if base.ends_with('/') {
        format!("{}{}", base, tail)
    } else {
        format!("{}/{}", base, tail)
    }
}

/// Rewrite a leading `~` against `home`; quoting would keep it literal
pub fn expand_remote_home(path: &str, home: &str) -> String {
    if path == "~" {
        return home.to_string();
    }
    match path.strip_prefix("~/") {
        Some(rest) => join_remote_path(home, rest),
        None => path.to_string(),
    }
}
