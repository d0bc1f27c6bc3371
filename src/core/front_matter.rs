//! Tolerant front matter parsing and rendering
//!
//! The front matter block is the region between the first two lines of a
//! document that consist of `---` alone. Inside it only two shapes are
//! understood: `key: value` scalars and `key:` followed by `- item` lines.
//! Anything else is skipped, so hand-edited or partially broken blocks
//! degrade to a partial map instead of an error.

use log::debug;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::mem;
use std::ops::Range;

const DELIMITER: &str = "---";

/// A front matter value: a single string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(s) => serializer.serialize_str(s),
            Self::List(items) => items.serialize(serializer),
        }
    }
}

/// Insertion-ordered front matter keys and their values
///
/// Keys are unique. Re-inserting an existing key replaces its value without
/// moving it, so untouched keys keep their relative order across a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatterMap {
    entries: Vec<(String, FieldValue)>,
}

impl FrontMatterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set `key` to `value`, returning the previous value if the key existed
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render the entries as block lines, without delimiters
    ///
    /// A scalar starting with `-` is double quoted. Written bare after a list
    /// it would read back as one more item of that list.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match value {
                FieldValue::Scalar(s) if s.starts_with('-') => {
                    lines.push(format!("{key}: {}", quote(s)))
                }
                FieldValue::Scalar(s) => lines.push(format!("{key}: {s}")),
                FieldValue::List(items) => {
                    lines.push(format!("{key}:"));
                    lines.extend(items.iter().map(|item| format!("  - {item}")));
                }
            }
        }
        lines.join("\n")
    }

    /// Render the entries wrapped in `---` delimiters, without a trailing newline
    pub fn to_block(&self) -> String {
        format!("{DELIMITER}\n{}\n{DELIMITER}", self.render())
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for FrontMatterMap {
    fn from_iter<T: IntoIterator<Item = (K, FieldValue)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for FrontMatterMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// The location of a front matter block inside a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRegion<'a> {
    /// Byte range from the start of the opening `---` line to the end of the
    /// closing `---` line, its line terminator excluded
    pub span: Range<usize>,
    /// The lines strictly between the delimiters, terminators stripped
    pub lines: Vec<&'a str>,
}

/// Find the first front matter block in `content`
pub fn locate_block(content: &str) -> Option<BlockRegion<'_>> {
    let mut start = None;
    let mut lines = Vec::new();
    let mut offset = 0;

    for raw in content.split_inclusive('\n') {
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.trim() == DELIMITER {
            if let Some(start) = start {
                return Some(BlockRegion {
                    span: start..offset + line.len(),
                    lines,
                });
            }
            start = Some(offset);
        } else if start.is_some() {
            lines.push(line);
        }
        offset += raw.len();
    }
    None
}

/// Parser state while walking the block lines
enum ParseState {
    Scalar,
    Array { key: String, items: Vec<String> },
}

impl ParseState {
    fn feed(self, line: &str, map: &mut FrontMatterMap) -> Self {
        match self {
            Self::Scalar => {
                if list_item(line).is_some() {
                    return Self::Scalar;
                }
                match key_value(line) {
                    Some((key, value)) => Self::start_entry(key, value, map),
                    None => Self::Scalar,
                }
            }
            Self::Array { key, mut items } => {
                if let Some(item) = list_item(line) {
                    items.push(item.to_string());
                    return Self::Array { key, items };
                }
                let Some((next_key, value)) = key_value(line) else {
                    return Self::Array { key, items };
                };
                // `key: -value` continues the open list on one line
                if let Some(rest) = value.strip_prefix('-') {
                    items.push(rest.trim().to_string());
                    return Self::Array { key, items };
                }
                map.insert(key, FieldValue::List(items));
                Self::start_entry(next_key, value, map)
            }
        }
    }

    fn start_entry(key: &str, value: &str, map: &mut FrontMatterMap) -> Self {
        if value.is_empty() {
            Self::Array {
                key: key.to_string(),
                items: Vec::new(),
            }
        } else {
            map.insert(key, FieldValue::scalar(value));
            Self::Scalar
        }
    }

    fn finish(self, map: &mut FrontMatterMap) {
        if let Self::Array { key, items } = self {
            map.insert(key, FieldValue::List(items));
        }
    }
}

fn list_item(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix('-').map(str::trim)
}

fn key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    (!key.is_empty()).then(|| (key, value.trim()))
}

/// Parse the front matter of `content`
///
/// Returns an empty map when the document has no complete block.
pub fn parse(content: &str) -> FrontMatterMap {
    let Some(block) = locate_block(content) else {
        debug!("no front matter block");
        return FrontMatterMap::new();
    };

    let mut map = FrontMatterMap::new();
    let mut state = ParseState::Scalar;
    for line in block.lines {
        state = state.feed(line, &mut map);
    }
    state.finish(&mut map);

    debug!("parsed front matter keys: {:?}", map.keys().collect::<Vec<_>>());
    map
}
