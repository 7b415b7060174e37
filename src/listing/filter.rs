//! Listing filters
//!
//! A filter is a `{column, operator, value}` triple. The value is coerced to
//! the column's type when the filter is built, and a filter that cannot be
//! interpreted is kept but marked invalid.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::cmp::Ordering;
use std::fmt;

use crate::error::FilterError;
use crate::listing::results::PathItem;

/// Columns of a [`PathItem`] that can be filtered and sorted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Directory,
    Url,
    IsDirectory,
    ContentLength,
    LastModified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Flag,
    Instant,
}

impl Field {
    /// Parses a column name, ignoring case and `_` separators
    pub fn parse(column: &str) -> Option<Field> {
        let key: String = column
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "name" => Some(Field::Name),
            "directory" => Some(Field::Directory),
            "url" => Some(Field::Url),
            "isdirectory" => Some(Field::IsDirectory),
            "contentlength" => Some(Field::ContentLength),
            "lastmodified" => Some(Field::LastModified),
            _ => None,
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Name | Field::Directory | Field::Url => FieldKind::Text,
            Field::IsDirectory => FieldKind::Flag,
            Field::ContentLength => FieldKind::Number,
            Field::LastModified => FieldKind::Instant,
        }
    }

    /// Orders two items by this field, ascending
    pub fn compare(self, a: &PathItem, b: &PathItem) -> Ordering {
        match self {
            Field::Name => a.name.cmp(&b.name),
            Field::Directory => a.directory.cmp(&b.directory),
            Field::Url => a.url.cmp(&b.url),
            Field::IsDirectory => a.is_directory.cmp(&b.is_directory),
            Field::ContentLength => a.content_length.cmp(&b.content_length),
            Field::LastModified => a.last_modified.cmp(&b.last_modified),
        }
    }

    fn text(self, item: &PathItem) -> &str {
        match self {
            Field::Directory => &item.directory,
            Field::Url => &item.url,
            _ => &item.name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Contains,
    StartsWith,
    EndsWith,
}

impl Operator {
    pub fn parse(operator: &str) -> Option<Operator> {
        match operator.trim().to_lowercase().as_str() {
            "eq" | "=" | "==" => Some(Operator::Eq),
            "ne" | "!=" | "<>" => Some(Operator::Ne),
            "gt" | ">" => Some(Operator::Gt),
            "ge" | ">=" => Some(Operator::Ge),
            "lt" | "<" => Some(Operator::Lt),
            "le" | "<=" => Some(Operator::Le),
            "contains" | "like" => Some(Operator::Contains),
            "startswith" => Some(Operator::StartsWith),
            "endswith" => Some(Operator::EndsWith),
            _ => None,
        }
    }

    fn applies_to(self, kind: FieldKind) -> bool {
        match self {
            Operator::Eq | Operator::Ne => true,
            Operator::Gt | Operator::Ge | Operator::Lt | Operator::Le => kind != FieldKind::Flag,
            Operator::Contains | Operator::StartsWith | Operator::EndsWith => {
                kind == FieldKind::Text
            }
        }
    }

    fn test_ordering(self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ne => ordering != Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Ge => ordering != Ordering::Less,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Le => ordering != Ordering::Greater,
            Operator::Contains | Operator::StartsWith | Operator::EndsWith => false,
        }
    }
}

/// A filter value coerced to its column's type
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Lowercased; text columns compare ignoring case
    Text(String),
    Number(u64),
    Flag(bool),
    Instant(DateTime<Utc>),
}

impl Operand {
    fn parse(kind: FieldKind, value: &str) -> Option<Operand> {
        match kind {
            FieldKind::Text => Some(Operand::Text(value.to_lowercase())),
            FieldKind::Number => value.trim().parse().ok().map(Operand::Number),
            FieldKind::Flag => match value.trim().to_lowercase().as_str() {
                "true" => Some(Operand::Flag(true)),
                "false" => Some(Operand::Flag(false)),
                _ => None,
            },
            FieldKind::Instant => parse_instant(value).map(Operand::Instant),
        }
    }
}

/// Accepts RFC 3339, or a naive date/date-time taken as UTC
fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// A validated filter
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: Field,
    pub operator: Operator,
    pub operand: Operand,
}

impl Predicate {
    pub fn matches(&self, item: &PathItem) -> bool {
        match &self.operand {
            Operand::Text(operand) => {
                let text = self.field.text(item).to_lowercase();
                match self.operator {
                    Operator::Contains => text.contains(operand.as_str()),
                    Operator::StartsWith => text.starts_with(operand.as_str()),
                    Operator::EndsWith => text.ends_with(operand.as_str()),
                    op => op.test_ordering(text.as_str().cmp(operand.as_str())),
                }
            }
            Operand::Number(operand) => self
                .operator
                .test_ordering(item.content_length.cmp(operand)),
            Operand::Flag(operand) => self
                .operator
                .test_ordering(item.is_directory.cmp(operand)),
            Operand::Instant(operand) => self
                .operator
                .test_ordering(item.last_modified.cmp(operand)),
        }
    }
}

/// One entry of a filter chain, as supplied by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    column: String,
    operator: String,
    value: String,
    predicate: Result<Predicate, FilterError>,
}

impl FilterSpec {
    pub fn new(column: &str, operator: &str, value: &str) -> Self {
        Self {
            column: column.to_string(),
            operator: operator.to_string(),
            value: value.to_string(),
            predicate: build_predicate(column, operator, value),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_valid(&self) -> bool {
        self.predicate.is_ok()
    }

    /// Why the filter was rejected, if it was
    pub fn error(&self) -> Option<&FilterError> {
        self.predicate.as_ref().err()
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref().ok()
    }

    /// Invalid filters match nothing
    pub fn matches(&self, item: &PathItem) -> bool {
        self.predicate().is_some_and(|p| p.matches(item))
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} '{}'", self.column, self.operator, self.value)
    }
}

fn build_predicate(column: &str, operator: &str, value: &str) -> Result<Predicate, FilterError> {
    let field = Field::parse(column).ok_or_else(|| FilterError::UnknownColumn(column.into()))?;
    let op = Operator::parse(operator).ok_or_else(|| FilterError::UnknownOperator(operator.into()))?;

    if !op.applies_to(field.kind()) {
        return Err(FilterError::UnsupportedOperator {
            column: column.into(),
            operator: operator.into(),
        });
    }

    let operand = Operand::parse(field.kind(), value).ok_or_else(|| FilterError::InvalidValue {
        column: column.into(),
        value: value.into(),
    })?;

    Ok(Predicate {
        field,
        operator: op,
        operand,
    })
}
