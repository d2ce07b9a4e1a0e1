//! Content-safety policy.
//!
//! The policy is fixed: every moderation category blocks content rated
//! medium probability or above. It is attached to every provider call so the
//! provider's own defaults never apply.

use serde::Serialize;

/// Moderation category, serialized with Gemini's names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HarmCategory {
    /// Harassment
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    /// Hate speech
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    /// Sexually explicit content
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    /// Dangerous content
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

/// Probability level at which content is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    /// Block low, medium and high
    BlockLowAndAbove,
    /// Block medium and high
    BlockMediumAndAbove,
    /// Block high only
    BlockOnlyHigh,
}

/// One category/threshold pair as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    /// Category
    pub category: HarmCategory,
    /// Threshold
    pub threshold: HarmBlockThreshold,
}

/// Immutable moderation policy applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyPolicy {
    settings: [SafetySetting; 4],
}

impl SafetyPolicy {
    /// All four categories at medium-and-above.
    #[must_use]
    pub const fn standard() -> Self {
        const THRESHOLD: HarmBlockThreshold = HarmBlockThreshold::BlockMediumAndAbove;
        Self {
            settings: [
                SafetySetting {
                    category: HarmCategory::Harassment,
                    threshold: THRESHOLD,
                },
                SafetySetting {
                    category: HarmCategory::HateSpeech,
                    threshold: THRESHOLD,
                },
                SafetySetting {
                    category: HarmCategory::SexuallyExplicit,
                    threshold: THRESHOLD,
                },
                SafetySetting {
                    category: HarmCategory::DangerousContent,
                    threshold: THRESHOLD,
                },
            ],
        }
    }

    /// Settings in wire order
    #[must_use]
    pub fn settings(&self) -> &[SafetySetting] {
        &self.settings
    }

    /// Threshold configured for `category`
    #[cfg(test)]
    fn threshold_for(&self, category: HarmCategory) -> Option<HarmBlockThreshold> {
        self.settings
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.threshold)
    }
}

impl Default for SafetyPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
