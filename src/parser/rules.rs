//! Naming-convention rules that turn an identifier into a description.
//!
//! The table is a priority list: the first rule whose pattern matches wins,
//! even when a later rule would also match. Reordering entries changes output.

use regex::Regex;
use std::sync::LazyLock;

/// Placeholder marker inside a rule template.
const PLACEHOLDER: &str = "{}";

/// One entry of the rule table.
pub struct NameRule {
    /// Description template with zero to two `{}` placeholders.
    pub template: &'static str,
    pub pattern: Regex,
    /// Capture group substituted into each placeholder, in template order.
    pub captures: &'static [usize],
}

impl NameRule {
    fn new(pattern: &str, template: &'static str, captures: &'static [usize]) -> Self {
        Self {
            template,
            pattern: Regex::new(pattern).unwrap(),
            captures,
        }
    }

    /// Apply the rule to `name`, or `None` when the pattern does not match.
    pub fn apply(&self, name: &str) -> Option<String> {
        let caps = self.pattern.captures(name)?;
        let mut out = String::with_capacity(self.template.len() + name.len());
        let mut pieces = self.template.split(PLACEHOLDER);
        if let Some(first) = pieces.next() {
            out.push_str(first);
        }
        for (slot, piece) in pieces.enumerate() {
            let value = self
                .captures
                .get(slot)
                .and_then(|&group| caps.get(group))
                .map(|m| m.as_str().to_lowercase())
                .unwrap_or_default();
            out.push_str(&value);
            out.push_str(piece);
        }
        Some(out)
    }
}

pub static NAME_RULES: LazyLock<Vec<NameRule>> = LazyLock::new(|| {
    vec![
        NameRule::new(r"^argc$", "The number of command-line arguments", &[]),
        NameRule::new(r"^argv$", "The command-line argument vector", &[]),
        NameRule::new(r"^(ctx|context)$", "The context", &[]),
        NameRule::new(r"^(user_?data|userData|opaque|priv)$", "Opaque user data", &[]),
        NameRule::new(r"^(is|has|can)_([a-z][a-z0-9]*)$", "Whether it {} {}", &[1, 2]),
        NameRule::new(r"^(is|has|can)([A-Z][A-Za-z0-9]*)$", "Whether it {} {}", &[1, 2]),
        NameRule::new(r"^(p_)?(num|n)_([a-z][a-z0-9]*)$", "The number of {}", &[3]),
        NameRule::new(r"^(p)?(num|n)([A-Z][A-Za-z0-9]*)$", "The number of {}", &[3]),
        NameRule::new(r"^([a-z][a-z0-9]*)_(count|cnt)$", "The number of {}", &[1]),
        NameRule::new(r"^([a-z][a-z0-9]*)(Count|Cnt)$", "The number of {}", &[1]),
        NameRule::new(r"^([a-z][a-z0-9]*)_(size|len|length)$", "The {} of {}", &[2, 1]),
        NameRule::new(r"^([a-z][a-z0-9]*)(Size|Len|Length)$", "The {} of {}", &[2, 1]),
        NameRule::new(r"^([a-z][a-z0-9]*)_(idx|index)$", "The index of {}", &[1]),
        NameRule::new(r"^([a-z][a-z0-9]*)(Idx|Index)$", "The index of {}", &[1]),
        NameRule::new(r"^([a-z][a-z0-9]*)_of_([a-z][a-z0-9]*)$", "The {} of the {}", &[1, 2]),
        NameRule::new(r"^(src|source)_([a-z][a-z0-9]*)$", "The source {}", &[2]),
        NameRule::new(r"^(dst|dest)_([a-z][a-z0-9]*)$", "The destination {}", &[2]),
        NameRule::new(r"^([a-z][a-z0-9]*)_(cb|callback)$", "The {} callback", &[1]),
        NameRule::new(r"^p_([a-z][a-z0-9]*)$", "A pointer to {}", &[1]),
    ]
});

/// Description for `name` from the first matching rule.
pub fn describe_name(name: &str) -> Option<String> {
    NAME_RULES.iter().find_map(|rule| rule.apply(name))
}
