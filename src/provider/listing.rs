//! Model listing and discovery.
//!
//! Prints the model id format, well-known ids per backend, and dynamically
//! queried Ollama models.

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::models::{ModelInfo, ANTHROPIC_MODELS, OPENAI_MODELS, OPENROUTER_MODELS, VENDOR_MODELS};
use crate::router::QUANT_BY_BITS;

/// List common models grouped by backend.
pub async fn list_models(config: &Config) -> Result<()> {
    println!("{}", "Model format: provider/model[/submodel]".bold());
    println!("  e.g. openai/gpt-4o, openrouter/deepseek/deepseek-v3.2");
    if let Some(default) = &config.default_model {
        println!("  default_model: {}", default.yellow());
    }

    print_group("anthropic", ANTHROPIC_MODELS);
    print_group("openai", OPENAI_MODELS);
    print_group("deepseek, google, mistral, groq, together", VENDOR_MODELS);
    print_group("openrouter", OPENROUTER_MODELS);

    // Ollama (dynamic)
    println!("\n  {}:", "ollama".cyan());
    match list_ollama_models(config).await {
        Ok(models) if models.is_empty() => {
            println!("    (no models found -- run `ollama pull llama3`)");
        }
        Ok(models) => {
            for model in &models {
                println!("    ollama/{model}");
            }
        }
        Err(err) => {
            tracing::debug!(error = %err, "ollama listing failed");
            println!("    (ollama not running)");
        }
    }

    println!("\n{}", "Quantization tiers (provider_prefs.min_bits):".bold());
    for (bits, tags) in QUANT_BY_BITS {
        println!("  {bits:>2}: {}", tags.join(", "));
    }

    println!();
    println!("Any id under these prefixes works; other vendors are reachable via openrouter/.");
    println!("See: https://openrouter.ai/models");
    Ok(())
}

fn print_group(provider: &str, models: &[ModelInfo]) {
    println!("\n  {}:", provider.cyan());
    for info in models {
        println!("    {:<48} {}", info.id, info.note.dimmed());
    }
}

/// Query Ollama's local API for available models.
async fn list_ollama_models(config: &Config) -> Result<Vec<String>> {
    let base_url = config
        .base_url("ollama")
        .unwrap_or(crate::constants::OLLAMA_DEFAULT_BASE_URL);

    let url = format!("{base_url}/api/tags");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(crate::constants::OLLAMA_LIST_TIMEOUT_SECS))
        .build()?;
    let resp: serde_json::Value = client.get(&url).send().await?.json().await?;

    let models = resp["models"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|m| m["name"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    Ok(models)
}
