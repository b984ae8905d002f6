//! Plant guide built over the store and external collaborators

use crate::adapters::collaborators::{Classification, ImageClassifier, ImageStore, TextGenerator};
use crate::adapters::database::traits::{PlantFilter, PlantStore};
use crate::config::GuideConfig;
use crate::domain::{DomekeeperError, PersistedPlant, PlantId, Result};
use rand::seq::SliceRandom;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Result of checking a visitor's photo against a plant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SightingVerification {
    pub accepted: bool,
    pub classification: Classification,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant_id: Option<PlantId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

pub struct PlantGuide {
    store: Arc<dyn PlantStore>,
    classifier: Arc<dyn ImageClassifier>,
    generator: Arc<dyn TextGenerator>,
    images: Arc<dyn ImageStore>,
    min_confidence: f64,
}

impl PlantGuide {
    pub fn new(
        store: Arc<dyn PlantStore>,
        classifier: Arc<dyn ImageClassifier>,
        generator: Arc<dyn TextGenerator>,
        images: Arc<dyn ImageStore>,
        config: &GuideConfig,
    ) -> Self {
        Self {
            store,
            classifier,
            generator,
            images,
            min_confidence: config.min_confidence,
        }
    }

    /// Checks that `image` shows `scientific_name` and files it under the plant
    ///
    /// A rejected image is not stored. An accepted image for a plant the store
    /// does not know is a validation error.
    pub async fn verify_sighting(
        &self,
        image: &[u8],
        scientific_name: &str,
        location: Option<&str>,
    ) -> Result<SightingVerification> {
        let classification = self.classifier.classify(image).await?;

        if !classification.confirms(scientific_name, self.min_confidence) {
            tracing::info!(
                expected = %scientific_name,
                label = %classification.label,
                confidence = classification.confidence,
                "Sighting rejected"
            );
            return Ok(SightingVerification {
                accepted: false,
                classification,
                plant_id: None,
                image_url: None,
            });
        }

        let filter = PlantFilter::by_scientific_name(scientific_name.trim(), location.map(str::to_string));
        let plant = self
            .store
            .fetch_plants(&filter)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomekeeperError::Validation(format!("Plant not found: {scientific_name}")))?;

        let path = format!("{}/{}.jpg", plant.id, Uuid::new_v4());
        let image_url = self.images.put(image, &path).await?;

        tracing::info!(
            plant_id = %plant.id,
            confidence = classification.confidence,
            path = %path,
            "Sighting accepted"
        );

        Ok(SightingVerification {
            accepted: true,
            classification,
            plant_id: Some(plant.id),
            image_url: Some(image_url),
        })
    }

    /// Short description of a plant from collected snippets
    pub async fn summarize(&self, name: &str, snippets: &[String]) -> Result<String> {
        if snippets.is_empty() {
            return Err(DomekeeperError::Validation(format!(
                "No information available to summarize {name}"
            )));
        }
        self.generator.generate(name, snippets).await
    }

    /// A stored plant picked uniformly at random
    pub async fn random_plant(&self, location: Option<&str>) -> Result<Option<PersistedPlant>> {
        let filter = match location {
            Some(location) => PlantFilter::by_location(location),
            None => PlantFilter::all(),
        };
        let plants = self.store.fetch_plants(&filter).await?;
        Ok(plants.choose(&mut rand::thread_rng()).cloned())
    }
}
