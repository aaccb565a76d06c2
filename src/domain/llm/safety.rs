use serde::{Deserialize, Serialize};

/// Harm categories a provider may filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    HarmCategoryHarassment,
    HarmCategoryHateSpeech,
    HarmCategorySexuallyExplicit,
    HarmCategoryDangerousContent,
}

impl HarmCategory {
    pub const ALL: [HarmCategory; 4] = [
        HarmCategory::HarmCategoryHarassment,
        HarmCategory::HarmCategoryHateSpeech,
        HarmCategory::HarmCategorySexuallyExplicit,
        HarmCategory::HarmCategoryDangerousContent,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// Per-category blocking thresholds sent with a request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SafetySettings(Vec<SafetySetting>);

impl SafetySettings {
    pub fn new(settings: Vec<SafetySetting>) -> Self {
        Self(settings)
    }

    /// Disable blocking for every category. Medical questions otherwise trip
    /// the dangerous-content filter and come back empty.
    pub fn block_none() -> Self {
        Self::uniform(HarmBlockThreshold::BlockNone)
    }

    pub fn uniform(threshold: HarmBlockThreshold) -> Self {
        Self(
            HarmCategory::ALL
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold,
                })
                .collect(),
        )
    }

    pub fn settings(&self) -> &[SafetySetting] {
        &self.0
    }
}
