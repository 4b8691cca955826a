//! Well-known model ids shown by `orcx models`.
//!
//! This is a display list, not a whitelist: any `provider/model` id for a
//! supported backend can be used.

/// Information about a known LLM model.
pub struct ModelInfo {
    /// Full `provider/model` id.
    pub id: &'static str,
    /// One-line note shown next to the id.
    pub note: &'static str,
}

/// Common Anthropic models.
pub const ANTHROPIC_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "anthropic/claude-sonnet-4-20250514",
        note: "balanced",
    },
    ModelInfo {
        id: "anthropic/claude-haiku-4-20250514",
        note: "fast",
    },
];

/// Common OpenAI models.
pub const OPENAI_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "openai/gpt-4o",
        note: "general purpose",
    },
    ModelInfo {
        id: "openai/gpt-4o-mini",
        note: "cheap",
    },
];

/// Models served directly by other vendors' own APIs.
pub const VENDOR_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "deepseek/deepseek-chat",
        note: "general purpose",
    },
    ModelInfo {
        id: "deepseek/deepseek-reasoner",
        note: "reasoning",
    },
    ModelInfo {
        id: "google/gemini-2.0-flash",
        note: "fast",
    },
    ModelInfo {
        id: "mistral/mistral-large-latest",
        note: "general purpose",
    },
    ModelInfo {
        id: "groq/llama-3.3-70b-versatile",
        note: "low latency",
    },
    ModelInfo {
        id: "together/meta-llama/Llama-3.3-70B-Instruct-Turbo",
        note: "open weights",
    },
];

/// Models reached through the OpenRouter gateway; provider preferences apply here.
pub const OPENROUTER_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "openrouter/deepseek/deepseek-v3.2",
        note: "open weights, many hosts",
    },
    ModelInfo {
        id: "openrouter/deepseek/deepseek-r1",
        note: "reasoning",
    },
    ModelInfo {
        id: "openrouter/google/gemini-2.0-flash-001",
        note: "fast",
    },
    ModelInfo {
        id: "openrouter/meta-llama/llama-3.3-70b-instruct",
        note: "open weights, many hosts",
    },
];
