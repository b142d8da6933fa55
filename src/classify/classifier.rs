//! Ordered rule lookup.
//!
//! # Responsibilities
//! - Store the compiled rule set
//! - Return the color of the first rule matching a street name
//! - Fall back to the default color when nothing matches
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) rule scan (rule sets are small)
//! - Total: every string maps to exactly one color

use crate::classify::color::Color;
use crate::classify::rule::{builtin_rules, Rule, RuleError};
use crate::config::schema::ClassifierConfig;

/// Maps street names to display colors.
#[derive(Debug, Clone)]
pub struct StreetClassifier {
    rules: Vec<Rule>,
    default_color: Color,
}

impl StreetClassifier {
    /// Create a classifier from caller-supplied rules, highest priority first.
    pub fn new(rules: Vec<Rule>, default_color: Color) -> Self {
        Self { rules, default_color }
    }

    /// Create a classifier from the classifier section of the config.
    /// An empty rule list selects the built-in rules.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, RuleError> {
        let default_color = config.default_color.parse()?;

        if config.rules.is_empty() {
            return Ok(Self::new(builtin_rules(), default_color));
        }

        let rules = config
            .rules
            .iter()
            .map(|r| Rule::new(&r.pattern, &r.color))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(rules, default_color))
    }

    /// Color for `name`: the first matching rule wins.
    pub fn classify(&self, name: &str) -> Color {
        self.matching_rule(name)
            .map(|(_, rule)| rule.color())
            .unwrap_or(self.default_color)
    }

    /// The rule that decides `name`, with its 1-based priority.
    pub fn matching_rule(&self, name: &str) -> Option<(usize, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(name))
            .map(|(i, rule)| (i + 1, rule))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Every color this classifier can return.
    pub fn palette(&self) -> Vec<Color> {
        let mut palette: Vec<Color> = self.rules.iter().map(Rule::color).collect();
        palette.push(self.default_color);
        palette
    }
}

impl Default for StreetClassifier {
    fn default() -> Self {
        Self::new(builtin_rules(), Color::BLACK)
    }
}
