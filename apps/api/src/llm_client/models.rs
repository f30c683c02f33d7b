//! Catalogue of the provider models a caller may select.

use serde::Serialize;

/// Used when a request does not name a model.
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct:free";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AiModel {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const AVAILABLE_MODELS: &[AiModel] = &[
    AiModel {
        value: "mistralai/mistral-7b-instruct:free",
        label: "Mistral",
        description: "Balanced performance, good for general analysis",
    },
    AiModel {
        value: "deepseek/deepseek-r1-0528:free",
        label: "DeepSeek",
        description: "High accuracy, excellent reasoning",
    },
    AiModel {
        value: "qwen/qwen3-235b-a22b:free",
        label: "Qwen",
        description: "Fast processing, good for quick analysis",
    },
    AiModel {
        value: "google/gemini-2.0-flash-exp:free",
        label: "Gemini",
        description: "Google's model, strong in understanding",
    },
    AiModel {
        value: "openai/gpt-oss-20b:free",
        label: "OpenAI GPT",
        description: "Multilingual support, detailed analysis",
    },
];

pub fn is_known_model(value: &str) -> bool {
    AVAILABLE_MODELS.iter().any(|m| m.value == value)
}
