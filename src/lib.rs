//! # sqltodal
//!
//! Translates a restricted SQL dialect into DAL statement code.
//!
//! ## Quick Example
//!
//! ```rust
//! let code = sqltodal::translate("select foo.bar from foo").unwrap();
//! assert!(code.starts_with("DALSelect select("));
//! assert!(code.contains("select.addSelect(tableFoo[DbFoo::Bar], hvFooBar);"));
//! ```
//!
//! ## Pipeline
//!
//! | Stage        | Module                | Output                  |
//! |--------------|-----------------------|-------------------------|
//! | Scan         | [`tokens`]            | `Vec<Token>`            |
//! | Parse        | [`parser`]            | [`ast::Statement`]      |
//! | Generate     | [`transpiler`]        | DAL code as a `String`  |
//!
//! Unique names come from a [`naming::NameAllocator`] passed by the
//! caller: the same statement translated from the same allocator state
//! always yields the same text.
//!
//! ## Restrictions
//!
//! - Every column must be qualified: `table.column`.
//! - No HAVING, JOIN, arithmetic, or trailing `;`.
//! - SELECT, INSERT, UPDATE and DELETE only.

pub mod ast;
pub mod config;
pub mod error;
pub mod naming;
pub mod parser;
pub mod tokens;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::DalConfig;
    pub use crate::error::*;
    pub use crate::naming::NameAllocator;
    pub use crate::parser::{parse, parse_with};
    pub use crate::transpiler::{ToDal, wrap_function};
}

use config::DalConfig;
use error::DalResult;
use naming::NameAllocator;
use transpiler::ToDal;

/// Parse a SQL statement into its AST.
///
/// # Example
///
/// ```
/// use sqltodal::ast::Statement;
///
/// let stmt = sqltodal::parse("delete from boo where boo.boo = foo.foo").unwrap();
/// assert!(matches!(stmt, Statement::Delete(_)));
/// ```
pub fn parse(sql: &str) -> DalResult<ast::Statement> {
    parser::parse(sql)
}

/// Translate one SQL statement into DAL code with default settings and a
/// fresh name allocator.
pub fn translate(sql: &str) -> DalResult<String> {
    translate_with(sql, &mut NameAllocator::new(), &DalConfig::default())
}

/// Translate one SQL statement, drawing unique names from `names`.
pub fn translate_with(sql: &str, names: &mut NameAllocator, config: &DalConfig) -> DalResult<String> {
    let statement = parser::parse_with(sql, names)?;
    statement.to_dal_with_config(names, config)
}
