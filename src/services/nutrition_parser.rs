use regex::Regex;
use std::sync::OnceLock;

use crate::models::{NutritionRecord, NutritionRecordSet};

/// `<label>: <value>[ (<parenthetical>)]`
fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(.*?):\s*(.*?)(\s*\(.*?\))?$").expect("line pattern is a valid regex")
    })
}

/// A line break followed by one or more blank lines.
fn block_separator() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").expect("block separator is a valid regex")
    })
}

/// Leading list markers such as `1.`, `2)`, `-`, `*` or `•`.
fn enumeration_marker() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(?:(?:\d+[.)]|[-*•·◦‣])\s*)*").expect("enumeration pattern is a valid regex")
    })
}

/// Turns loosely formatted "Key: Value" model output into one record per
/// blank-line separated block. Never fails; unparseable lines are skipped
/// and blocks without any fields are dropped.
pub fn parse_nutrition_text(text: &str) -> NutritionRecordSet {
    block_separator()
        .split(text)
        .map(parse_block)
        .filter(|record| !record.is_empty())
        .collect()
}

fn parse_block(block: &str) -> NutritionRecord {
    let mut record = NutritionRecord::new();

    for line in block.lines().filter(|line| !line.trim().is_empty()) {
        if let Some((key, value)) = parse_line(line) {
            // Repeated labels: last one wins.
            record.insert(key, value);
        }
    }

    record
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let captures = line_pattern().captures(line)?;

    let label = captures.get(1).map_or("", |m| m.as_str());
    let key = enumeration_marker().replace(label, "").trim().to_string();

    let value = captures.get(2).map_or("", |m| m.as_str()).trim();
    let value = match captures.get(3).map(|m| m.as_str().trim()) {
        Some(annotation) if value.is_empty() => annotation.to_string(),
        Some(annotation) => format!("{} {}", value, annotation),
        None => value.to_string(),
    };

    Some((key, value))
}
