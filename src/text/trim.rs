//! Rule-based removal of motion boilerplate.
//!
//! Each function is one step of [`TrimPipeline`](super::pipeline::TrimPipeline).
//! They are exposed separately so every rule can be checked on its own, but
//! several of them assume the output of the previous steps (single-line,
//! whitespace-collapsed text).

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// Legal formulas introducing the proposed decision, as written in cased motions.
/// Each runs lazily up to the first `. ` followed by an uppercase letter.
const CASED_DECISION_PHRASES: &[&str] = &[
    r"Förslag till riksdagsbeslut .+?",
    r"Riksdagen tillkännager för [A-Öa-ö]+ som sin mening .+?",
    r"Riksdagen bemyndigar .+?",
    r"Riksdagen beslutar om .+?",
    r"Härmed hemställs att riksdagen .+?",
    r"Med hänvisning till vad so(?:m|rn) anförts .+?",
    r"Riksdagen ställer sig bakom det som anförs .+?",
];

/// The same formulas in corpora that were lowercased before trimming.
const LOWERCASE_DECISION_PHRASES: &[&str] = &[
    r"förslag till riksdagsbeslut riksdagen [A-ö0-9\s,]+\.\s",
    r"riksdagen tillkännager för regeringen som sin mening [A-ö0-9\s,]+\.\s",
    r"riksdagen ställer sig bakom det som anförs [A-ö0-9\s,]+\.\s",
];

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

static CASED_DECISION: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?:{})\. (?P<next>[A-ZÅÄÖ])",
        CASED_DECISION_PHRASES.join("|")
    );
    Regex::new(&pattern).expect("valid regex")
});

static LOWERCASE_DECISION: Lazy<Regex> =
    Lazy::new(|| Regex::new(&LOWERCASE_DECISION_PHRASES.join("|")).expect("valid regex"));

static LEADING_MOTIVATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Motivering [A-ZÅÄÖ\d]").expect("valid regex"));

static LEADING_SIGNATURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Stockholm den \d+ [a-z]+ \d{4}").expect("valid regex"));

static FOOTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\. Stockholm den \d+ [a-z]+ \d{4} .+").expect("valid regex"));

const MOTIVATION_HEADER: &str = "Motivering";

/// Why a row-level trim could not be applied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrimError {
    #[error("subtitle is missing or empty")]
    SubtitleNotUsable,
}

/// Replace `\n` and `\r` with spaces and strip the ends.
pub fn trim_linebreaks(text: &str) -> String {
    text.replace(['\n', '\r'], " ").trim().to_string()
}

/// Collapse every whitespace run into one space and strip the ends.
pub fn trim_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Keep what follows the first occurrence of `subtitle`.
///
/// A subtitle that does not occur leaves the text as it is; a missing or
/// empty one is an error.
pub fn try_trim_by_subtitle(text: &str, subtitle: Option<&str>) -> Result<String, TrimError> {
    let subtitle = subtitle
        .filter(|s| !s.is_empty())
        .ok_or(TrimError::SubtitleNotUsable)?;
    Ok(match text.split_once(subtitle) {
        Some((_, rest)) => rest.trim().to_string(),
        None => text.to_string(),
    })
}

/// Fail-soft variant of [`try_trim_by_subtitle`]: errors keep the original text.
pub fn trim_by_subtitle(text: &str, subtitle: Option<&str>) -> String {
    try_trim_by_subtitle(text, subtitle).unwrap_or_else(|err| {
        debug!(%err, "subtitle trim skipped");
        text.to_string()
    })
}

/// Drop one leading occurrence of `title`.
pub fn trim_by_leading_title(text: &str, title: Option<&str>) -> String {
    match title.filter(|t| !t.is_empty()).and_then(|t| text.strip_prefix(t)) {
        Some(rest) => rest.trim().to_string(),
        None => text.to_string(),
    }
}

/// Keep the text after the last proposed-decision formula.
///
/// Matches never overlap. The uppercase letter that closes a cased formula is
/// not consumed, so the next formula may start on it. The lowercase formulas
/// only apply to text without any uppercase letter.
pub fn trim_by_proposed_decision(text: &str) -> String {
    let formulas: &Regex = if text.chars().any(char::is_uppercase) {
        &*CASED_DECISION
    } else {
        &*LOWERCASE_DECISION
    };
    let mut tail_start = 0;
    let mut pos = 0;
    while let Some(caps) = formulas.captures_at(text, pos) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        let end = caps.name("next").map_or(whole.end(), |next| next.start());
        tail_start = end;
        pos = end;
    }
    text[tail_start..].trim().to_string()
}

/// Drop a leading `Motivering` header followed by a capitalised word or a digit.
pub fn trim_leading_motivation(text: &str) -> String {
    if LEADING_MOTIVATION.is_match(text) {
        text[MOTIVATION_HEADER.len()..].trim().to_string()
    } else {
        text.to_string()
    }
}

/// Empty the text when all that is left starts with the place and date signature.
pub fn blank_leading_signature(text: &str) -> String {
    if LEADING_SIGNATURE.is_match(text) {
        String::new()
    } else {
        text.to_string()
    }
}

/// Cut the trailing `Stockholm den <day> <month> <year> <names>` block,
/// keeping the period that ends the last sentence.
pub fn delete_footer(text: &str) -> String {
    FOOTER.replace(text, ".").into_owned()
}
