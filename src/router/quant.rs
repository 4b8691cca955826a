//! Quantization tier table and resolution of quantization preferences.

use super::prefs::ProviderPrefs;

/// Quantization tags grouped by bit width, ascending.
pub const QUANT_BY_BITS: &[(u8, &[&str])] = &[
    (4, &["int4", "fp4"]),
    (6, &["fp6"]),
    (8, &["int8", "fp8"]),
    (16, &["fp16", "bf16"]),
    (32, &["fp32"]),
];

/// Returns true if `bits` names one of the tiers in [`QUANT_BY_BITS`].
pub fn is_tier(bits: u8) -> bool {
    QUANT_BY_BITS.iter().any(|(tier, _)| *tier == bits)
}

/// Turns quantization preferences into the concrete tag list to request.
///
/// An explicit `quantizations` list is returned verbatim. Otherwise, with
/// neither `min_bits` nor `exclude_quants` set, there is no preference and
/// `None` is returned. Exclusions that consume every candidate yield
/// `Some(vec![])`, not `None`.
pub fn resolve(prefs: &ProviderPrefs) -> Option<Vec<String>> {
    if let Some(explicit) = &prefs.quantizations {
        return Some(explicit.clone());
    }
    if prefs.min_bits.is_none() && prefs.exclude_quants.is_empty() {
        return None;
    }

    let floor = prefs.min_bits.unwrap_or(0);
    let resolved = QUANT_BY_BITS
        .iter()
        .filter(|(bits, _)| *bits >= floor)
        .flat_map(|(_, tags)| tags.iter())
        .filter(|tag| !prefs.exclude_quants.iter().any(|ex| ex == *tag))
        .map(|tag| tag.to_string())
        .collect();
    Some(resolved)
}
