//! DAL naming conventions.
//!
//! SQL identifiers are snake_case; the DAL uses PascalCase type names and
//! camelCase variables built from fixed prefixes:
//!
//! | SQL          | DAL                       |
//! |--------------|---------------------------|
//! | `carton_dtl` | `CartonDtl` (name)        |
//! | table        | `DbCartonDtl` (API id)    |
//! | table        | `tableCartonDtl` (handle) |
//! | column       | `st`/`hv`/`v`/`c` + name  |
//!
//! Unique names that cannot be derived from the statement text alone come
//! from a [`NameAllocator`], which callers thread through parsing and
//! generation.

use crate::error::{DalError, DalResult};

/// Translate a snake_case identifier into its DAL form.
///
/// `None` passes through unchanged.
pub fn to_dal_name(name: Option<&str>) -> Option<String> {
    name.map(pascal)
}

/// `carton_dtl` → `CartonDtl`, `foo_boo_moo` → `FooBooMoo`.
pub fn pascal(name: &str) -> String {
    name.split('_').map(capitalize).collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Table handle variable: `tableCartonDtl`.
pub fn table_var(table: &str) -> String {
    format!("table{}", pascal(table))
}

/// Table API identifier: `DbCartonDtl`.
pub fn dal_table(table: &str) -> String {
    format!("Db{}", pascal(table))
}

/// Output buffer for a selected column: `stCartonDtlInvnType`.
pub fn output_var(table_column: &str) -> String {
    format!("st{}", table_column)
}

/// Host variable bound to an output buffer: `hvCartonDtlInvnType`.
pub fn host_var(table_column: &str) -> String {
    format!("hv{}", table_column)
}

/// Input host variable for an inserted value: `vInvnType3`.
pub fn value_var(column: &str, ordinal: usize) -> String {
    format!("v{}{}", pascal(column), ordinal)
}

/// DAL column variable for an inserted column: `cInvnType3`.
pub fn column_var(column: &str, ordinal: usize) -> String {
    format!("c{}{}", pascal(column), ordinal)
}

/// Literal holder for insert values and update assignments: `replace2`.
pub fn literal_holder(ordinal: usize) -> String {
    format!("replace{}", ordinal)
}

/// Strip exactly one pair of surrounding single quotes.
///
/// Values that are not wrapped in a pair come back unchanged.
pub fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .unwrap_or(value)
}

/// Keep only characters that may appear in a C++ identifier.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Source of unique ids for literal and subquery names.
///
/// Ids only ever increase. A single allocator may be reused across any
/// number of statements; two runs over the same statement from the same
/// starting point produce identical names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameAllocator {
    next_literal: u64,
    next_subquery: u64,
}

impl Default for NameAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl NameAllocator {
    /// Literal ids start at 1, subquery ids at 0.
    pub fn new() -> Self {
        Self::seeded(1, 0)
    }

    pub fn seeded(literal: u64, subquery: u64) -> Self {
        Self {
            next_literal: literal,
            next_subquery: subquery,
        }
    }

    /// Take the next literal id. Fails instead of wrapping, so ids never repeat.
    pub fn literal_id(&mut self) -> DalResult<u64> {
        take(&mut self.next_literal, "literal")
    }

    pub fn subquery_id(&mut self) -> DalResult<u64> {
        take(&mut self.next_subquery, "subquery")
    }

    /// The id the next literal will receive.
    pub fn peek_literal(&self) -> u64 {
        self.next_literal
    }

    /// The id the next subquery will receive.
    pub fn peek_subquery(&self) -> u64 {
        self.next_subquery
    }
}

fn take(counter: &mut u64, kind: &'static str) -> DalResult<u64> {
    let id = *counter;
    *counter = id.checked_add(1).ok_or(DalError::Exhausted(kind))?;
    Ok(id)
}
