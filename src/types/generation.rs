//! Generation settings and related enums.

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Settings controlling text generation.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, Default)]
pub struct GenerationSettings {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub stop_sequences: Option<Vec<String>>,
    pub seed: Option<u64>,
}

/// Why generation finished.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
}
