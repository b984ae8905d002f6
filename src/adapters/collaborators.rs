//! Interfaces to external collaborators
//!
//! Image classification, text generation and image hosting live outside this
//! crate. Implementations report failures as
//! [`DomekeeperError::Collaborator`](crate::domain::DomekeeperError::Collaborator).

use crate::domain::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Best label a classifier found for an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
}

impl Classification {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// True when the label names `scientific_name` (case-insensitive) with at
    /// least `min_confidence`
    pub fn confirms(&self, scientific_name: &str, min_confidence: f64) -> bool {
        self.confidence >= min_confidence
            && self.label.trim().to_lowercase() == scientific_name.trim().to_lowercase()
    }
}

#[async_trait]
pub trait ImageClassifier: Send + Sync {
    async fn classify(&self, image: &[u8]) -> Result<Classification>;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Writes a short text about `topic` grounded on `snippets`
    async fn generate(&self, topic: &str, snippets: &[String]) -> Result<String>;
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores `image` at `path` and returns its public URL
    async fn put(&self, image: &[u8], path: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirms_ignores_case_and_threshold_is_inclusive() {
        let classification = Classification::new("nephrolepis EXALTATA", 0.5);
        assert!(classification.confirms("Nephrolepis exaltata", 0.5));
        assert!(!classification.confirms("Nephrolepis exaltata", 0.51));
        assert!(!classification.confirms("Aloe vera", 0.1));
    }
}
