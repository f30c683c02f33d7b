//! Recovery of JSON objects from free-text model output.
//!
//! Models wrap JSON in prose and markdown fences, leave trailing commas, and
//! mix in single or typographic quotes. Recovery runs three stages in order
//! and stops at the first candidate that parses AND passes the shape check:
//!
//! 1. the raw text as-is
//! 2. the raw text trimmed to its outermost braces
//! 3. the first brace-balanced `{...}` span
//!
//! Stages 2 and 3 try their candidate unchanged first and normalized second.
//! Normalization is a fixed list of small passes, each testable on its own.
//! The structural passes never touch text inside double-quoted strings.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::analysis::models::{AnalysisResult, ShapeError};

#[derive(Debug, Error)]
pub enum RepairError {
    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("model output is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("model output does not match the analysis schema: {0}")]
    Shape(#[from] ShapeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Direct,
    Cleaned,
    Extracted,
}

const STAGES: [Stage; 3] = [Stage::Direct, Stage::Cleaned, Stage::Extracted];

/// A single normalization pass over candidate JSON text.
type Pass = fn(&str) -> String;

/// Applied in this order by `normalize`.
const NORMALIZATION_PASSES: &[Pass] = &[
    normalize_typographic_quotes,
    remove_trailing_commas,
    quote_bare_keys,
    convert_single_quotes,
];

/// Recovers an `AnalysisResult` from raw model output.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, RepairError> {
    let mut last_error = RepairError::NoJsonObject;

    for stage in STAGES {
        let Some(candidate) = candidate_for(stage, raw) else {
            continue;
        };
        let normalized = (stage != Stage::Direct)
            .then(|| normalize(candidate))
            .filter(|n| n != candidate);

        for (text, repaired) in [(Some(candidate), false), (normalized.as_deref(), true)] {
            let Some(text) = text else {
                continue;
            };
            match parse_candidate(text) {
                Ok(result) => {
                    if stage != Stage::Direct {
                        tracing::debug!(?stage, repaired, "recovered analysis JSON");
                    }
                    return Ok(result);
                }
                // A schema mismatch says more about the output than a later syntax error.
                Err(e) => {
                    let keep_shape = matches!(last_error, RepairError::Shape(_))
                        && !matches!(e, RepairError::Shape(_));
                    if !keep_shape {
                        last_error = e;
                    }
                }
            }
        }
    }

    Err(last_error)
}

fn candidate_for(stage: Stage, raw: &str) -> Option<&str> {
    match stage {
        Stage::Direct => Some(raw.trim()),
        Stage::Cleaned => Some(truncate_after_last_brace(strip_leading_prose(raw)))
            .filter(|t| t.starts_with('{')),
        Stage::Extracted => first_balanced_object(raw),
    }
}

fn parse_candidate(candidate: &str) -> Result<AnalysisResult, RepairError> {
    let value: Value = serde_json::from_str(candidate)?;
    Ok(AnalysisResult::from_value(value)?)
}

/// Runs every normalization pass in order.
pub fn normalize(text: &str) -> String {
    NORMALIZATION_PASSES
        .iter()
        .fold(text.to_string(), |acc, pass| pass(&acc))
}

/// Drops everything before the first `{`.
pub fn strip_leading_prose(text: &str) -> &str {
    match text.find('{') {
        Some(start) => &text[start..],
        None => text,
    }
}

/// Drops everything after the last `}`.
pub fn truncate_after_last_brace(text: &str) -> &str {
    match text.rfind('}') {
        Some(end) => &text[..=end],
        None => text,
    }
}

/// Replaces curly double and single quotes with their ASCII forms.
pub fn normalize_typographic_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => '"',
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => '\'',
            other => other,
        })
        .collect()
}

/// `[1, 2,]` → `[1, 2]`, `{"a": 1,}` → `{"a": 1}`.
pub fn remove_trailing_commas(text: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r",(\s*[}\]])").expect("valid trailing comma regex"));
    map_outside_strings(text, |segment| re.replace_all(segment, "$1").into_owned())
}

/// `{score: 70}` → `{"score": 70}`.
pub fn quote_bare_keys(text: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)(\s*:)").expect("valid bare key regex")
    });
    map_outside_strings(text, |segment| {
        re.replace_all(segment, "$1\"$2\"$3").into_owned()
    })
}

/// `{'a': 'b'}` → `{"a": "b"}`. Only quotes sitting in key or value position
/// outside double-quoted strings are converted.
pub fn convert_single_quotes(text: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"([{\[,:]\s*)'([^'"\\]*)'(\s*[,:}\]])"#).expect("valid single quote regex")
    });

    // Adjacent matches share a delimiter, so one pass only converts every other one.
    let mut current = text.to_string();
    loop {
        let next = map_outside_strings(&current, |segment| {
            re.replace_all(segment, "$1\"$2\"$3").into_owned()
        });
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Applies `f` to every span of `text` outside double-quoted strings. Quoted
/// spans, quotes included, are copied through unchanged, as is an
/// unterminated string at the end.
fn map_outside_strings(text: &str, f: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut segment_start = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => {
                    in_string = false;
                    out.push_str(&text[segment_start..=i]);
                    segment_start = i + 1;
                }
                _ => {}
            }
        } else if c == '"' {
            out.push_str(&f(&text[segment_start..i]));
            segment_start = i;
            in_string = true;
        }
    }

    let rest = &text[segment_start..];
    if in_string {
        out.push_str(rest);
    } else {
        out.push_str(&f(rest));
    }
    out
}

/// Returns the first `{...}` span whose braces balance, ignoring braces inside
/// double-quoted strings.
pub fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}
