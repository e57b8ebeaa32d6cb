use log::warn;
use serde::{Deserialize, Serialize};

// pub struct for each category score
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

// pub struct for Lighthouse categories, keyed by the engine's category ids
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Categories {
    #[serde(default)]
    pub performance: Option<Category>,
    #[serde(default)]
    pub accessibility: Option<Category>,
    #[serde(default, rename = "best-practices")]
    pub best_practices: Option<Category>,
    #[serde(default)]
    pub seo: Option<Category>,
}

/// Category scores of a single audit, each in `[0, 1]`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    pub performance: f64,
    pub accessibility: f64,
    pub best_practices: f64,
    pub seo: f64,
}

impl Scores {
    /// Reads the four category scores, clamping into `[0, 1]`.
    /// A category the engine did not score counts as 0.
    pub fn from_categories(categories: &Categories) -> Self {
        let read = |name: &str, category: &Option<Category>| match category
            .as_ref()
            .and_then(|c| c.score)
        {
            Some(score) if score.is_finite() => score.clamp(0.0, 1.0),
            _ => {
                warn!("category {} has no score, recording 0", name);
                0.0
            }
        };

        Scores {
            performance: read("performance", &categories.performance),
            accessibility: read("accessibility", &categories.accessibility),
            best_practices: read("best-practices", &categories.best_practices),
            seo: read("seo", &categories.seo),
        }
    }

    /// Performance score on the 0-100 scale.
    pub fn performance_percent(&self) -> f64 {
        (self.performance * 100.0).round()
    }

    /// Category keys paired with their scores, in report order.
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("performance", self.performance),
            ("accessibility", self.accessibility),
            ("bestPractices", self.best_practices),
            ("seo", self.seo),
        ]
    }
}
