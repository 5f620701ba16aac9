//! Language utilities for speech language tags
//!
//! Speech backends take tags like `en-US` or `fr-FR`. The tag is passed
//! through untouched apart from case normalization; only the primary
//! subtag is checked against ISO 639.

use anyhow::{Result, anyhow};
use isolang::Language;

/// Languages offered in the drill help text
pub const SUPPORTED_LANGUAGES: [(&str, &str); 8] = [
    ("en-US", "English"),
    ("es-ES", "Spanish"),
    ("fr-FR", "French"),
    ("de-DE", "German"),
    ("it-IT", "Italian"),
    ("ja-JP", "Japanese"),
    ("ko-KR", "Korean"),
    ("zh-CN", "Chinese (Simplified)"),
];

// ISO 639-2/B codes that differ from their 639-2/T form
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    match code {
        "fre" => Some("fra"),
        "ger" => Some("deu"),
        "dut" => Some("nld"),
        "gre" => Some("ell"),
        "chi" => Some("zho"),
        "cze" => Some("ces"),
        "ice" => Some("isl"),
        "per" => Some("fas"),
        "rum" => Some("ron"),
        "slo" => Some("slk"),
        "wel" => Some("cym"),
        _ => None,
    }
}

/// Primary language subtag of a tag (`"pt-BR"` -> `"pt"`)
pub fn primary_subtag(tag: &str) -> &str {
    let tag = tag.trim();
    tag.split(&['-', '_'][..]).next().unwrap_or(tag)
}

/// Look up the ISO language of a tag's primary subtag
fn lookup(tag: &str) -> Option<Language> {
    let primary = primary_subtag(tag).to_lowercase();

    match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => {
            let part2t = match part2b_to_part2t(&primary) {
                Some(code) => code,
                None => primary.as_str(),
            };
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Validate a language tag and return it in canonical case.
///
/// `"en-us"` becomes `"en-US"`, `"FR"` becomes `"fr"`. Script subtags
/// (`zh-Hant`) are title-cased.
pub fn normalize_language_tag(tag: &str) -> Result<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Language tag is empty"));
    }

    if lookup(trimmed).is_none() {
        return Err(anyhow!("Invalid language tag: {}", tag));
    }

    let mut parts = Vec::new();
    for (i, part) in trimmed.split(&['-', '_'][..]).enumerate() {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(anyhow!("Invalid language tag: {}", tag));
        }

        let normalized = if i == 0 {
            part.to_lowercase()
        } else if part.len() == 2 {
            part.to_uppercase()
        } else if part.len() == 4 {
            let mut chars = part.chars();
            let first = chars.next().map(|c| c.to_ascii_uppercase()).unwrap_or_default();
            format!("{}{}", first, chars.as_str().to_lowercase())
        } else {
            part.to_lowercase()
        };
        parts.push(normalized);
    }

    Ok(parts.join("-"))
}

/// Check if two tags name the same language, ignoring region
pub fn language_codes_match(tag1: &str, tag2: &str) -> bool {
    match (lookup(tag1), lookup(tag2)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name for a tag
pub fn get_language_name(tag: &str) -> Result<String> {
    let lang = lookup(tag).ok_or_else(|| anyhow!("Invalid language tag: {}", tag))?;
    Ok(lang.to_name().to_string())
}
