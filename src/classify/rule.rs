//! Street naming rules.
//!
//! # Responsibilities
//! - Pair a compiled name pattern with its display color
//! - Provide the built-in German street naming rules
//!
//! # Design Decisions
//! - Patterns are case-sensitive and unanchored; anchors live in the pattern
//! - Built-in patterns are compiled once per process

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::classify::color::{Color, ParseColorError};

/// Errors that can occur while building a rule.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The pattern is not a valid regular expression.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The color is not a `#rrggbb` value.
    #[error(transparent)]
    InvalidColor(#[from] ParseColorError),
}

/// A name pattern and the color assigned to names it matches.
#[derive(Clone)]
pub struct Rule {
    pattern: Regex,
    color: Color,
}

impl Rule {
    /// Compile a rule from a pattern and a `#rrggbb` color string.
    pub fn new(pattern: &str, color: &str) -> Result<Self, RuleError> {
        let color = color.parse()?;
        Self::with_color(pattern, color)
    }

    /// Compile a rule from a pattern and an already parsed color.
    pub fn with_color(pattern: &str, color: Color) -> Result<Self, RuleError> {
        let pattern = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern, color })
    }

    /// Returns true if the pattern is found anywhere in `name`.
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("pattern", &self.pattern.as_str())
            .field("color", &self.color.to_string())
            .finish()
    }
}

/// Built-in rules, highest priority first.
const BUILTIN: &[(&str, &str)] = &[
    // "...er Straße" / "...er Platz"
    (r"er? Straße$", "#84a883"),
    (r"er Platz$", "#4aa03a"),
    // Single word compounds
    (r"^\S+straße$", "#84acd1"),
    (r"^\S+platz$", "#547bbe"),
    // Hyphenated compounds
    (r"^\S+-Straße$", "#e2b273"),
    (r"^\S+-Platz$", "#b57b17"),
    // Suffix families
    (r"([wW]eg|[pP]fad)$", "#654d29"),
    (r"([aA]llee|[wW]iese|[aA]ue|[fF]lügel|[hH]ain|[pP]ark)$", "#1e7200"),
    (r"([rR]ing|[rR]ingel|[wW]inkel|[lL]eite)$", "#b50042"),
    (r"([bB]rücke|[sS]teig|[hH]öhe|[bB]lick)$", "#b55400"),
    (r"([uU]fer|[gG]raben|[gG]rund|[tT]eich|[hH]afen|[sS]teg|[sS]chlucht)$", "#1e48a4"),
    (r"([gG]asse|[gG]äßchen)$", "#d0c000"),
    (r"([bB]erg|[gG]arten|[hH]of|[mM]arkt)$", "#b55e9a"),
    // Prefix families
    (r"^(Am|An der|An den|Zum|Zur) .+", "#999999"),
    (r"^Alt\S+$", "#555555"),
    (r"^(Alte|Große|Kleine) ", "#623072"),
];

static BUILTIN_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    BUILTIN
        .iter()
        .map(|(pattern, color)| Rule::new(pattern, color).expect("built-in street rule must compile"))
        .collect()
});

/// The built-in German street naming rules, in priority order.
pub fn builtin_rules() -> Vec<Rule> {
    BUILTIN_RULES.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_compile_in_order() {
        let rules = builtin_rules();
        assert_eq!(rules.len(), 16);
        assert_eq!(rules[0].pattern(), "er? Straße$");
        assert_eq!(rules[0].color().to_string(), "#84a883");
        assert_eq!(rules[15].color().to_string(), "#623072");
    }

    #[test]
    fn test_rule_is_unanchored_search() {
        let rule = Rule::new("weg", "#654d29").unwrap();
        assert!(rule.matches("Wegweiser Irgendweg"));
        assert!(rule.matches("Hohlweg"));
        assert!(!rule.matches("Weg")); // Case-sensitive
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Rule::new("([wW]eg", "#654d29").unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { ref pattern, .. } if pattern == "([wW]eg"));
    }

    #[test]
    fn test_invalid_color() {
        let err = Rule::new("weg$", "brown").unwrap_err();
        assert!(matches!(err, RuleError::InvalidColor(_)));
        assert!(err.to_string().contains("brown"));
    }

    #[test]
    fn test_debug_shows_pattern_and_color() {
        let rule = Rule::new("^Alt\\S+$", "#555555").unwrap();
        let debug = format!("{:?}", rule);
        assert!(debug.contains("^Alt\\\\S+$"));
        assert!(debug.contains("#555555"));
    }
}
