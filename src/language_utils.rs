use anyhow::{Result, anyhow};
use isolang::Language;
use log::warn;

/// Language utilities for ISO language code handling
///
/// Transcripts report their language as an ISO 639-1 or ISO 639-2 code; these
/// helpers validate that code and normalize it for subtitle file naming.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// Tag used when a transcript does not carry a usable language
pub const UNDETERMINED_LANGUAGE: &str = "und";

// ISO 639-2/B codes that differ from their ISO 639-2/T counterparts
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    PART2B_TO_PART2T
        .iter()
        .find(|(part2b, _)| *part2b == code)
        .map(|(_, part2t)| *part2t)
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    match normalized_code.len() {
        2 if Language::from_639_1(&normalized_code).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&normalized_code).is_some() => Ok(LanguageCodeType::Part2T),
        3 if part2b_to_part2t(&normalized_code).is_some() => Ok(LanguageCodeType::Part2B),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Resolve a code to its isolang entry
fn lookup(code: &str) -> Option<Language> {
    let normalized_code = code.trim().to_lowercase();

    match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code),
        3 => {
            let part2t = part2b_to_part2t(&normalized_code).unwrap_or(&normalized_code);
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Normalize a language code to ISO 639-1 (2-letter) format if possible
/// Falls back to ISO 639-2/T if no ISO 639-1 code exists
pub fn normalize_to_part1_or_part2t(code: &str) -> Result<String> {
    let lang = lookup(code)
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;

    Ok(lang
        .to_639_1()
        .map(|part1| part1.to_string())
        .unwrap_or_else(|| lang.to_639_3().to_string()))
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let lang = lookup(code)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/// Language tag for subtitle output; unknown codes become "und"
pub fn output_language_tag(code: &str) -> String {
    if code.trim().is_empty() {
        return UNDETERMINED_LANGUAGE.to_string();
    }

    match normalize_to_part1_or_part2t(code) {
        Ok(tag) => tag,
        Err(e) => {
            warn!("{}, tagging subtitles as '{}'", e, UNDETERMINED_LANGUAGE);
            UNDETERMINED_LANGUAGE.to_string()
        }
    }
}
