//! Spreadsheet export
//!
//! Two steps: [`flatten`] turns a typed record into display strings, then
//! [`to_delimited_text`] lays rows out as comma-separated text.

use chrono::{DateTime, Utc};

/// Date layout used in exported cells (pt-BR)
const DATE_FORMAT: &str = "%d/%m/%Y";

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// One cell before formatting
#[derive(Debug, Clone, PartialEq)]
pub enum ExportValue {
    Text(String),
    Number(i64),
    Date(DateTime<Utc>),
    /// Associated records, shown by name
    Related(Vec<RelatedName>),
    Empty,
}

impl ExportValue {
    pub fn text(value: impl Into<String>) -> Self {
        ExportValue::Text(value.into())
    }

    pub fn optional_text(value: Option<&str>) -> Self {
        value.map_or(ExportValue::Empty, ExportValue::text)
    }

    pub fn optional_date(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(ExportValue::Empty, ExportValue::Date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedName {
    pub id: String,
    pub name: String,
}

impl RelatedName {
    pub fn new(id: impl ToString, name: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            name: name.into(),
        }
    }

    fn display(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Typed record: column header and value, in column order
pub type ExportRecord = Vec<(&'static str, ExportValue)>;

/// Formatted record: column header and cell text
pub type Row = Vec<(String, String)>;

pub fn flatten(record: &[(&'static str, ExportValue)]) -> Row {
    record
        .iter()
        .map(|(key, value)| ((*key).to_string(), format_value(value)))
        .collect()
}

fn format_value(value: &ExportValue) -> String {
    match value {
        ExportValue::Text(s) => s.clone(),
        ExportValue::Number(n) => n.to_string(),
        ExportValue::Date(d) => d.format(DATE_FORMAT).to_string(),
        ExportValue::Related(items) => items
            .iter()
            .map(RelatedName::display)
            .collect::<Vec<_>>()
            .join(", "),
        ExportValue::Empty => String::new(),
    }
}

/// Header line plus one line per row, joined by `\n`
///
/// Columns are the union of keys across all rows in order of first
/// appearance; a row lacking a column gets an empty cell.
pub fn to_delimited_text(rows: &[Row]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut headers: Vec<&str> = Vec::new();
    for row in rows {
        for (key, _) in row {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(join_fields(headers.iter().copied()));

    for row in rows {
        let cells = headers.iter().map(|header| {
            row.iter()
                .find(|(key, _)| key == header)
                .map_or("", |(_, value)| value.as_str())
        });
        lines.push(join_fields(cells));
    }

    lines.join("\n")
}

fn join_fields<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields
        .map(escape_field)
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

fn escape_field(field: &str) -> String {
    if field.contains([DELIMITER, QUOTE, '\n']) {
        format!("{QUOTE}{}{QUOTE}", field.replace(QUOTE, "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Minimal reader for the quoting rule above
    fn parse_line(line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut quoted = false;
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            match (c, quoted) {
                ('"', true) if chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                ('"', _) => quoted = !quoted,
                (',', false) => fields.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
        fields.push(current);
        fields
    }

    #[test]
    fn test_quote_and_comma_survive_a_round_trip() {
        let record: ExportRecord = vec![
            ("Nome", ExportValue::text("Jira")),
            ("Descrição", ExportValue::text(r#"He said, "hi""#)),
        ];
        let text = to_delimited_text(&[flatten(&record)]);

        let mut lines = text.lines();
        assert_eq!(parse_line(lines.next().unwrap()), ["Nome", "Descrição"]);
        assert_eq!(
            parse_line(lines.next().unwrap()),
            ["Jira", r#"He said, "hi""#]
        );
        assert!(text.contains(r#""He said, ""hi""""#));
    }

    #[test]
    fn test_related_names_fall_back_to_id() {
        let value = ExportValue::Related(vec![
            RelatedName::new("s-1", "Finance"),
            RelatedName::new("s-2", ""),
        ]);
        assert_eq!(format_value(&value), "Finance, s-2");
    }

    #[test]
    fn test_dates_use_day_month_year() {
        let date = Utc.with_ymd_and_hms(2026, 3, 7, 15, 30, 0).unwrap();
        assert_eq!(format_value(&ExportValue::Date(date)), "07/03/2026");
        assert_eq!(format_value(&ExportValue::optional_date(None)), "");
    }

    #[test]
    fn test_columns_are_union_in_first_seen_order() {
        let rows = vec![
            vec![("a".to_string(), "1".to_string())],
            vec![
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "3".to_string()),
            ],
        ];
        assert_eq!(to_delimited_text(&rows), "a,b\n1,\n3,2");
    }

    #[test]
    fn test_no_rows_is_empty_text() {
        assert_eq!(to_delimited_text(&[]), "");
    }

    #[test]
    fn test_newline_forces_quotes() {
        assert_eq!(escape_field("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(escape_field("plain"), "plain");
    }
}
