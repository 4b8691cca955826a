//! Provider-routing preferences and the agent/global merge.
//!
//! Preferences come from two places: an agent preset and the global config.
//! [`merge`] folds them into one effective [`ProviderPrefs`] by walking
//! [`MERGE_RULES`], a fixed table naming the strategy for every field.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::quant;

/// Provider routing preferences for a preference-aware gateway.
///
/// List fields default to empty and scalars to unset. `quantizations` is the
/// one list where "set but empty" differs from "unset".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderPrefs {
    /// Minimum quantization bit width (4, 6, 8, 16 or 32).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_bits: Option<u8>,
    /// Explicit quantization tags; overrides `min_bits` and `exclude_quants`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantizations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_quants: Vec<String>,
    /// Providers never to route to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
    /// Exclusive allow-list of providers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub only: Vec<String>,
    /// Preferred providers, tried first with fallbacks allowed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefer: Vec<String>,
    /// Explicit provider order; fallback behaviour follows `allow_fallbacks`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<String>,
    /// Sort key such as `"price"`, `"throughput"` or `"latency"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_fallbacks: Option<bool>,
}

impl ProviderPrefs {
    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Concrete quantization tags to request, if any preference exists.
    pub fn resolve_quantizations(&self) -> Option<Vec<String>> {
        quant::resolve(self)
    }

    /// Rejects values the gateway cannot express.
    pub fn validate(&self) -> Result<(), String> {
        match self.min_bits {
            Some(bits) if !quant::is_tier(bits) => {
                let tiers: Vec<String> = quant::QUANT_BY_BITS
                    .iter()
                    .map(|(tier, _)| tier.to_string())
                    .collect();
                Err(format!(
                    "min_bits = {bits} is not a quantization tier (expected one of {})",
                    tiers.join(", ")
                ))
            }
            _ => Ok(()),
        }
    }
}

/// How a single field combines its agent and global values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    /// Keep the larger value; a higher floor is never weakened.
    Max,
    /// Agent value if set, else global.
    Override,
    /// Agent entries first, then global entries not already present.
    Union,
}

/// Fields of [`ProviderPrefs`], addressable by the merge table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefField {
    MinBits,
    Quantizations,
    ExcludeQuants,
    Ignore,
    Only,
    Prefer,
    Order,
    Sort,
    AllowFallbacks,
}

/// Merge strategy for every field. `only`, `order` and `quantizations`
/// express an exhaustive choice and are overridden, never unioned.
pub const MERGE_RULES: &[(PrefField, MergeRule)] = &[
    (PrefField::MinBits, MergeRule::Max),
    (PrefField::Quantizations, MergeRule::Override),
    (PrefField::ExcludeQuants, MergeRule::Union),
    (PrefField::Ignore, MergeRule::Union),
    (PrefField::Only, MergeRule::Override),
    (PrefField::Prefer, MergeRule::Union),
    (PrefField::Order, MergeRule::Override),
    (PrefField::Sort, MergeRule::Override),
    (PrefField::AllowFallbacks, MergeRule::Override),
];

/// Combines agent-level and global preferences into a new effective set.
///
/// With no agent preferences the global set is used as-is. Neither input is
/// modified.
pub fn merge(agent: Option<&ProviderPrefs>, global: Option<&ProviderPrefs>) -> ProviderPrefs {
    let Some(agent) = agent else {
        return global.cloned().unwrap_or_default();
    };
    let empty = ProviderPrefs::default();
    let global = global.unwrap_or(&empty);

    let mut merged = ProviderPrefs::default();
    for &(field, rule) in MERGE_RULES {
        merge_field(field, rule, agent, global, &mut merged);
    }
    debug!(?merged, "merged provider preferences");
    merged
}

fn merge_field(
    field: PrefField,
    rule: MergeRule,
    agent: &ProviderPrefs,
    global: &ProviderPrefs,
    out: &mut ProviderPrefs,
) {
    match field {
        PrefField::MinBits => out.min_bits = merge_scalar(rule, agent.min_bits, global.min_bits),
        PrefField::Sort => out.sort = merge_scalar(rule, agent.sort.clone(), global.sort.clone()),
        PrefField::AllowFallbacks => {
            out.allow_fallbacks = merge_scalar(rule, agent.allow_fallbacks, global.allow_fallbacks)
        }
        PrefField::Quantizations => {
            out.quantizations = merge_scalar(
                rule,
                agent.quantizations.clone(),
                global.quantizations.clone(),
            )
        }
        PrefField::ExcludeQuants => {
            out.exclude_quants = merge_list(rule, &agent.exclude_quants, &global.exclude_quants)
        }
        PrefField::Ignore => out.ignore = merge_list(rule, &agent.ignore, &global.ignore),
        PrefField::Only => out.only = merge_list(rule, &agent.only, &global.only),
        PrefField::Prefer => out.prefer = merge_list(rule, &agent.prefer, &global.prefer),
        PrefField::Order => out.order = merge_list(rule, &agent.order, &global.order),
    }
}

/// `None` orders below every `Some`, so `Max` keeps whichever side is set.
fn merge_scalar<T: Ord>(rule: MergeRule, agent: Option<T>, global: Option<T>) -> Option<T> {
    match rule {
        MergeRule::Max => agent.max(global),
        MergeRule::Override | MergeRule::Union => agent.or(global),
    }
}

fn merge_list(rule: MergeRule, agent: &[String], global: &[String]) -> Vec<String> {
    match rule {
        MergeRule::Union => {
            let mut out: Vec<String> = Vec::with_capacity(agent.len() + global.len());
            for item in agent.iter().chain(global) {
                if !out.contains(item) {
                    out.push(item.clone());
                }
            }
            out
        }
        MergeRule::Override | MergeRule::Max => {
            if agent.is_empty() {
                global.to_vec()
            } else {
                agent.to_vec()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn stricter_min_bits_and_agent_sort_win() {
        let agent = ProviderPrefs {
            min_bits: Some(16),
            sort: Some("latency".into()),
            ..Default::default()
        };
        let global = ProviderPrefs {
            min_bits: Some(8),
            sort: Some("price".into()),
            ..Default::default()
        };
        let merged = merge(Some(&agent), Some(&global));
        assert_eq!(merged.min_bits, Some(16));
        assert_eq!(merged.sort.as_deref(), Some("latency"));
    }

    #[test]
    fn agent_allow_fallbacks_overrides_global() {
        let agent = ProviderPrefs {
            allow_fallbacks: Some(true),
            ..Default::default()
        };
        let global = ProviderPrefs {
            allow_fallbacks: Some(false),
            ..Default::default()
        };
        assert_eq!(merge(Some(&agent), Some(&global)).allow_fallbacks, Some(true));
        assert_eq!(merge(Some(&global), Some(&agent)).allow_fallbacks, Some(false));
    }

    #[test]
    fn global_min_bits_is_not_weakened_by_agent() {
        let agent = ProviderPrefs {
            min_bits: Some(4),
            ..Default::default()
        };
        let global = ProviderPrefs {
            min_bits: Some(16),
            ..Default::default()
        };
        assert_eq!(merge(Some(&agent), Some(&global)).min_bits, Some(16));
    }

    #[test]
    fn unset_scalars_fall_back_to_global() {
        let agent = ProviderPrefs {
            ignore: list(&["A"]),
            ..Default::default()
        };
        let global = ProviderPrefs {
            min_bits: Some(8),
            sort: Some("price".into()),
            allow_fallbacks: Some(false),
            ..Default::default()
        };
        let merged = merge(Some(&agent), Some(&global));
        assert_eq!(merged.min_bits, Some(8));
        assert_eq!(merged.sort.as_deref(), Some("price"));
        assert_eq!(merged.allow_fallbacks, Some(false));
    }

    #[test]
    fn ignore_is_unioned_agent_first() {
        let agent = ProviderPrefs {
            ignore: list(&["A", "B"]),
            ..Default::default()
        };
        let global = ProviderPrefs {
            ignore: list(&["C", "A"]),
            ..Default::default()
        };
        assert_eq!(merge(Some(&agent), Some(&global)).ignore, list(&["A", "B", "C"]));
    }

    #[test]
    fn exclusions_and_prefer_are_unioned() {
        let agent = ProviderPrefs {
            exclude_quants: list(&["fp4"]),
            prefer: list(&["Groq"]),
            ..Default::default()
        };
        let global = ProviderPrefs {
            exclude_quants: list(&["int4", "fp4"]),
            prefer: list(&["Together", "Groq"]),
            ..Default::default()
        };
        let merged = merge(Some(&agent), Some(&global));
        assert_eq!(merged.exclude_quants, list(&["fp4", "int4"]));
        assert_eq!(merged.prefer, list(&["Groq", "Together"]));
    }

    #[test]
    fn only_is_overridden_not_unioned() {
        let agent = ProviderPrefs {
            only: list(&["X"]),
            ..Default::default()
        };
        let global = ProviderPrefs {
            only: list(&["Y", "Z"]),
            ..Default::default()
        };
        assert_eq!(merge(Some(&agent), Some(&global)).only, list(&["X"]));
    }

    #[test]
    fn only_falls_back_to_global() {
        let global = ProviderPrefs {
            only: list(&["Y", "Z"]),
            ..Default::default()
        };
        let merged = merge(Some(&ProviderPrefs::default()), Some(&global));
        assert_eq!(merged.only, list(&["Y", "Z"]));
    }

    #[test]
    fn order_and_quantizations_are_overridden() {
        let agent = ProviderPrefs {
            order: list(&["DeepInfra"]),
            quantizations: Some(list(&["fp8"])),
            ..Default::default()
        };
        let global = ProviderPrefs {
            order: list(&["Fireworks", "DeepInfra"]),
            quantizations: Some(list(&["fp16"])),
            ..Default::default()
        };
        let merged = merge(Some(&agent), Some(&global));
        assert_eq!(merged.order, list(&["DeepInfra"]));
        assert_eq!(merged.quantizations, Some(list(&["fp8"])));
    }

    #[test]
    fn missing_agent_prefs_use_global() {
        let global = ProviderPrefs {
            sort: Some("price".into()),
            ignore: list(&["A"]),
            ..Default::default()
        };
        assert_eq!(merge(None, Some(&global)), global);
        assert!(merge(None, None).is_empty());
    }

    #[test]
    fn missing_global_keeps_agent() {
        let agent = ProviderPrefs {
            min_bits: Some(8),
            only: list(&["X"]),
            ..Default::default()
        };
        assert_eq!(merge(Some(&agent), None), agent);
    }

    #[test]
    fn fields_unset_on_both_sides_stay_unset() {
        let merged = merge(Some(&ProviderPrefs::default()), Some(&ProviderPrefs::default()));
        assert!(merged.is_empty());
    }

    #[test]
    fn inputs_are_not_modified() {
        let agent = ProviderPrefs {
            ignore: list(&["A"]),
            ..Default::default()
        };
        let global = ProviderPrefs {
            ignore: list(&["B"]),
            ..Default::default()
        };
        let (agent_before, global_before) = (agent.clone(), global.clone());
        let _ = merge(Some(&agent), Some(&global));
        assert_eq!(agent, agent_before);
        assert_eq!(global, global_before);
    }

    #[test]
    fn table_covers_every_field_once() {
        let fields = [
            PrefField::MinBits,
            PrefField::Quantizations,
            PrefField::ExcludeQuants,
            PrefField::Ignore,
            PrefField::Only,
            PrefField::Prefer,
            PrefField::Order,
            PrefField::Sort,
            PrefField::AllowFallbacks,
        ];
        for field in fields {
            let hits = MERGE_RULES.iter().filter(|(f, _)| *f == field).count();
            assert_eq!(hits, 1, "{field:?}");
        }
        assert!(MERGE_RULES.contains(&(PrefField::MinBits, MergeRule::Max)));
        assert!(MERGE_RULES.contains(&(PrefField::Only, MergeRule::Override)));
        assert!(MERGE_RULES.contains(&(PrefField::Ignore, MergeRule::Union)));
    }

    #[test]
    fn validate_rejects_unknown_tier() {
        let prefs = ProviderPrefs {
            min_bits: Some(12),
            ..Default::default()
        };
        assert!(prefs.validate().unwrap_err().contains("12"));
        assert!(ProviderPrefs::default().validate().is_ok());
    }
}
