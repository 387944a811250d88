//! DAL code generator.
//!
//! Walks a parsed [`Statement`] and emits the DAL calls that perform it.
//! Every statement follows the same skeleton: object and table
//! declarations, a body specific to the statement kind, condition code for
//! the WHERE clause, then execution.

pub mod conditions;
pub mod dml;


use crate::ast::*;
use crate::config::DalConfig;
use crate::error::DalResult;
use crate::naming::{NameAllocator, pascal, table_var};

/// Trait for converting statements to DAL code.
pub trait ToDal {
    /// Generate DAL code with the default settings.
    fn to_dal(&self, names: &mut NameAllocator) -> DalResult<String> {
        self.to_dal_with_config(names, &DalConfig::default())
    }

    /// Generate DAL code with explicit settings.
    fn to_dal_with_config(&self, names: &mut NameAllocator, config: &DalConfig) -> DalResult<String>;
}

impl ToDal for Statement {
    fn to_dal_with_config(&self, names: &mut NameAllocator, config: &DalConfig) -> DalResult<String> {
        let mut generator = Generator::new(names, config, self.var_name());
        let code = match self {
            Statement::Select(s) => dml::select::build_select(s, &mut generator)?,
            Statement::Insert(i) => dml::insert::build_insert(i, &mut generator)?,
            Statement::Update(u) => dml::update::build_update(u, &mut generator)?,
            Statement::Delete(d) => dml::delete::build_delete(d, &mut generator)?,
        };
        tracing::debug!(kind = self.var_name(), bytes = code.len(), "generated DAL code");
        Ok(code)
    }
}

/// State threaded through one statement's generation.
pub(crate) struct Generator<'a> {
    pub(crate) names: &'a mut NameAllocator,
    pub(crate) config: &'a DalConfig,
    /// Variable of the top-level statement object; subqueries hang off it
    pub(crate) statement: &'static str,
}

impl<'a> Generator<'a> {
    pub(crate) fn new(names: &'a mut NameAllocator, config: &'a DalConfig, statement: &'static str) -> Self {
        Self {
            names,
            config,
            statement,
        }
    }

    /// `DALSelect select(*(trans->getDALTransaction()));`
    pub(crate) fn statement_decl(&self, class: &str) -> String {
        format!("{} {}({});\n", class, self.statement, self.config.transaction)
    }
}

/// `DALTable tableCartonDtl(DALTables::CartonDtl);`
pub(crate) fn table_decl(prefix: &str, table: &str) -> String {
    format!("DALTable {}{}(DALTables::{});\n", prefix, table_var(table), pascal(table))
}

/// Wrap generated statement code in a function definition.
pub fn wrap_function(code: &str, config: &DalConfig) -> String {
    let mut wrapped = format!("void {}({})\n{{\n", config.wrapper, config.wrapper_params);
    wrapped.push_str(code);
    if !code.ends_with('\n') {
        wrapped.push('\n');
    }
    wrapped.push_str("}\n");
    wrapped
}
