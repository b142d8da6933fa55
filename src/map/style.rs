//! Feature styles.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::classify::{Color, StreetClassifier};

/// Stroke width used when none is configured.
pub const DEFAULT_STROKE_WIDTH: f64 = 4.0;

/// Outline of a line geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// How a single feature is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    /// `None` renders nothing.
    pub stroke: Option<Stroke>,
}

impl Style {
    pub fn hidden() -> Self {
        Self { stroke: None }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            stroke: Some(Stroke { color, width }),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.stroke.is_none()
    }
}

/// Per-feature style callback, given the feature's `name` attribute.
pub type StyleFn = Arc<dyn Fn(Option<&str>) -> Style + Send + Sync>;

/// Style streets by the color their name classifies to.
pub fn street_style(classifier: Arc<StreetClassifier>, width: f64) -> StyleFn {
    Arc::new(move |name| match name {
        Some(name) => Style::stroke(classifier.classify(name), width),
        None => Style::hidden(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_feature_gets_classified_stroke() {
        let style = street_style(Arc::new(StreetClassifier::default()), DEFAULT_STROKE_WIDTH);

        let s = style(Some("Bautzner Straße"));
        let stroke = s.stroke.unwrap();
        assert_eq!(stroke.color.to_string(), "#84a883");
        assert_eq!(stroke.width, 4.0);
    }

    #[test]
    fn test_nameless_feature_hidden() {
        let style = street_style(Arc::new(StreetClassifier::default()), DEFAULT_STROKE_WIDTH);
        assert!(style(None).is_hidden());
    }

    #[test]
    fn test_empty_name_is_still_drawn() {
        // An empty name is present, so it falls through to the default color.
        let style = street_style(Arc::new(StreetClassifier::default()), 2.5);
        assert_eq!(style(Some("")), Style::stroke(Color::BLACK, 2.5));
    }
}
