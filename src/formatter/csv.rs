//! Delimited-text serializer.

use crate::models::Record;
use crate::variables::value_to_string;
use serde_json::Value;

/// Serializes records into delimited text.
///
/// A cell containing the delimiter, a double quote or a newline is wrapped in
/// double quotes with embedded quotes doubled. Other cells are written bare.
/// Rows are separated by `\n` and there is no trailing newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabularSerializer {
    delimiter: char,
}

impl Default for TabularSerializer {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl TabularSerializer {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Renders `records`; no records yields an empty string.
    pub fn serialize(&self, records: &[Record]) -> String {
        if records.is_empty() {
            return String::new();
        }

        let header = header_union(records);
        let separator = self.delimiter.to_string();

        let mut lines = Vec::with_capacity(records.len() + 1);
        lines.push(
            header
                .iter()
                .map(|name| self.escape(name))
                .collect::<Vec<_>>()
                .join(&separator),
        );

        for record in records {
            let row = header
                .iter()
                .map(|name| self.cell(record.get(name)))
                .collect::<Vec<_>>()
                .join(&separator);
            lines.push(row);
        }

        lines.join("\n")
    }

    fn cell(&self, value: Option<&Value>) -> String {
        match value {
            None | Some(Value::Null) => String::new(),
            Some(value) => self.escape(&value_to_string(value)),
        }
    }

    fn escape(&self, text: &str) -> String {
        if text.contains(self.delimiter) || text.contains('"') || text.contains('\n') {
            format!("\"{}\"", text.replace('"', "\"\""))
        } else {
            text.to_string()
        }
    }
}

/// Field names across all records, in first-seen order.
fn header_union(records: &[Record]) -> Vec<&str> {
    let mut header: Vec<&str> = Vec::new();
    for record in records {
        for name in record.keys() {
            if !header.contains(&name) {
                header.push(name);
            }
        }
    }
    header
}

/// Renders `records` as comma-separated text.
///
/// ```
/// use api_harvest::formatter::to_csv;
/// use api_harvest::models::Record;
/// use serde_json::json;
///
/// let record: Record = [("a", Some(json!(1))), ("b", Some(json!("x,y")))]
///     .into_iter()
///     .collect();
/// assert_eq!(to_csv(&[record]), "a,b\n1,\"x,y\"");
/// ```
pub fn to_csv(records: &[Record]) -> String {
    TabularSerializer::default().serialize(records)
}
