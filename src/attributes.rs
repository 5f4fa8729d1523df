//! Attribute tag inventory for the monster dump
//!
//! Loads an array of monster records and collects the distinct values found under
//! each record's `attributes` field. Records without the field contribute nothing.

use std::collections::BTreeSet;
use std::fmt::Write;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{IoContext, JsonContext, ScanResult};

/// The part of a monster record the scanner cares about. Other fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MonsterRecord {
    #[serde(default)]
    pub attributes: Vec<String>,
}

/// Distinct attribute tags, kept sorted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    tags: BTreeSet<String>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union in every tag of one record
    pub fn add_record(&mut self, record: &MonsterRecord) {
        self.tags.extend(record.attributes.iter().cloned());
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a MonsterRecord>) -> Self {
        let mut set = Self::new();
        for record in records {
            set.add_record(record);
        }
        set
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tags in ascending order
    pub fn sorted(&self) -> Vec<&str> {
        self.tags.iter().map(String::as_str).collect()
    }

    /// Render as a list literal, e.g. `['fire', 'poison']`
    pub fn to_list_literal(&self) -> String {
        let items: Vec<String> = self.tags.iter().map(|tag| quote_tag(tag)).collect();
        format!("[{}]", items.join(", "))
    }
}

/// Parse monster records from JSON text
pub fn parse_records(json: &str, source: &Path) -> ScanResult<Vec<MonsterRecord>> {
    serde_json::from_str(json).with_json_context(source, "expected an array of monster records")
}

/// Load every monster record from a JSON file
pub fn load_records(path: &Path) -> ScanResult<Vec<MonsterRecord>> {
    let content = fs::read_to_string(path).with_io_context(path, "Failed to read monster data")?;
    parse_records(&content, path)
}

/// Load the file at `path` and collect its attribute tags
pub fn scan_file(path: &Path) -> ScanResult<AttributeSet> {
    let records = load_records(path)?;
    log::debug!("Loaded {} monster records from {}", records.len(), path.display());
    Ok(AttributeSet::from_records(&records))
}

/// Quote a tag with single quotes, or double quotes when it holds a single quote
/// and no double quote
fn quote_tag(tag: &str) -> String {
    let quote = if tag.contains('\'') && !tag.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(tag.len() + 2);
    out.push(quote);
    for ch in tag.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
#[path = "attributes_tests.rs"]
mod attributes_tests;
