//! Property tests for shell quoting.

use proptest::prelude::*;

use stagehand::domain::value_objects::{shell_quote, ShellCommand};

/// Undo POSIX single-word quoting the way `sh` would
fn unquote(word: &str) -> Option<String> {
    let mut out = String::new();
    let mut chars = word.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => loop {
                match chars.next()? {
                    '\'' => break,
                    inner => out.push(inner),
                }
            },
            '\\' => out.push(chars.next()?),
            c if c.is_whitespace() || ";&|<>$`\"(){}*?[]#~".contains(c) => return None,
            c => out.push(c),
        }
    }
    Some(out)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a quoted value is one shell word that reads back unchanged.
    #[test]
    fn property_quote_is_single_word(value in "(?s).{0,64}") {
        let quoted = shell_quote(&value);
        prop_assert_eq!(unquote(&quoted), Some(value));
    }

    /// PROPERTY: plain values are left alone.
    #[test]
    fn property_plain_values_unquoted(value in "[A-Za-z0-9/._-]{1,32}") {
        prop_assert_eq!(shell_quote(&value), value);
    }

    /// PROPERTY: arguments appear quoted after the program name.
    #[test]
    fn property_arguments_render_quoted(value in "(?s).{0,32}") {
        let rendered = ShellCommand::new("echo").arg(&value).render();
        prop_assert_eq!(rendered, format!("echo {}", shell_quote(&value)));
    }
}
