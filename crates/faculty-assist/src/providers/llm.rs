//! Generative model trait for text and vision inference

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::ChatPrompt;

/// Content categories the model can filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    HarmCategoryHarassment,
    HarmCategoryHateSpeech,
    HarmCategorySexuallyExplicit,
    HarmCategoryDangerousContent,
}

/// Severity at which content gets blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockLowAndAbove,
    BlockMediumAndAbove,
    BlockOnlyHigh,
    BlockNone,
}

/// One safety threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// Per-call options; unset sampling values use the model defaults
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    pub safety_settings: Vec<SafetySetting>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

impl GenerationOptions {
    /// Block only high-severity harassment and hate speech
    pub fn chat() -> Self {
        Self {
            safety_settings: vec![
                SafetySetting {
                    category: HarmCategory::HarmCategoryHarassment,
                    threshold: HarmBlockThreshold::BlockOnlyHigh,
                },
                SafetySetting {
                    category: HarmCategory::HarmCategoryHateSpeech,
                    threshold: HarmBlockThreshold::BlockOnlyHigh,
                },
            ],
            ..Self::default()
        }
    }

    /// Set temperature and nucleus sampling
    pub fn with_sampling(mut self, temperature: f32, top_p: f32) -> Self {
        self.temperature = Some(temperature);
        self.top_p = Some(top_p);
        self
    }
}

/// Trait for generative inference
///
/// Implementations:
/// - `GeminiClient`: Google Generative Language API
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate a reply for a prompt that may include inline images
    async fn generate(&self, prompt: &ChatPrompt, options: &GenerationOptions) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_safety_settings_wire_names() {
        let value = serde_json::to_value(GenerationOptions::chat().safety_settings).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_ONLY_HIGH"},
                {"category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_ONLY_HIGH"}
            ])
        );
    }
}
