use std::collections::HashMap;
use std::str::Lines;

use crate::process::utils::clean_str;

/// One data line of the feed, with fields keyed by header name. Carries no
/// guarantees yet — validation happens downstream in `record::validate`.
#[derive(Debug, Clone)]
pub struct RawRow {
    fields: HashMap<String, String>,
    malformed: bool,
}

impl RawRow {
    fn malformed() -> Self {
        RawRow {
            fields: HashMap::new(),
            malformed: true,
        }
    }

    /// Raw (cleaned, unvalidated) value of a column, if the header named it
    /// and the line carried it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// True if the line had the wrong field count for the header.
    pub fn is_malformed(&self) -> bool {
        self.malformed
    }
}

/// Lazy iterator over the data lines of a fetched CSV body. Reads the header
/// line once on construction, then yields one `RawRow` per non-empty line.
/// Single forward traversal; not restartable once consumed.
///
/// If the body has no header line, every subsequent line comes out malformed
/// (documented limitation — the feed always ships a header).
pub struct FeedRows<'a> {
    header: Vec<String>,
    lines: Lines<'a>,
}

impl<'a> FeedRows<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut lines = text.lines();
        let header = lines
            .next()
            .map(|line| {
                split_line(line)
                    .into_iter()
                    .map(|name| name.to_lowercase())
                    .collect()
            })
            .unwrap_or_default();
        FeedRows { header, lines }
    }

    /// Column names as declared by the feed's header line.
    pub fn header(&self) -> &[String] {
        &self.header
    }
}

impl Iterator for FeedRows<'_> {
    type Item = RawRow;

    fn next(&mut self) -> Option<RawRow> {
        loop {
            let line = self.lines.next()?;
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_line(line);
            if self.header.is_empty() || fields.len() != self.header.len() {
                return Some(RawRow::malformed());
            }
            let fields = self
                .header
                .iter()
                .cloned()
                .zip(fields)
                .collect::<HashMap<_, _>>();
            return Some(RawRow {
                fields,
                malformed: false,
            });
        }
    }
}

/// Split one CSV line on commas, honoring double-quoted fields (a comma
/// inside quotes is data, `""` inside quotes is an escaped quote). Each field
/// comes back trimmed with outer quotes stripped.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => {
                in_quotes = !in_quotes;
                current.push('"');
            }
            ',' if !in_quotes => {
                fields.push(clean_str(&current));
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(clean_str(&current));
    fields
}
