//! SELECT generation.

use std::collections::HashMap;

use crate::ast::*;
use crate::error::{DalError, DalResult};
use crate::naming::{host_var, output_var};
use crate::transpiler::conditions::{Scope, condition_code};
use crate::transpiler::{Generator, table_decl};

/// Generate DAL code for a SELECT.
pub(crate) fn build_select(select: &Select, generator: &mut Generator<'_>) -> DalResult<String> {
    if select.items.is_empty() || select.tables.is_empty() {
        return Err(DalError::Invalid(
            "select needs at least one column and one table".to_string(),
        ));
    }

    let var = generator.statement;
    let mut code = generator.statement_decl("DALSelect");

    // One handle per FROM entry, duplicates included
    for table in &select.tables {
        code.push_str(&table_decl("", table));
    }

    code.push_str(&select_bindings(select, generator));

    if let Some(filter) = &select.filter {
        code.push_str(&condition_code(filter, generator, &Scope::root(&select.tables), "cond")?);
    }

    for key in &select.order_by {
        let direction = match key.direction {
            SortDirection::Asc => "DAL_SORTASCENDING",
            SortDirection::Desc => "DAL_SORTDESCENDING",
        };
        code.push_str(&format!(
            "{}.addOrderBy({}, {});\n",
            var,
            key.column.select_code(""),
            direction
        ));
    }

    if select.filter.is_some() {
        code.push_str(&format!("{}.where(cond);\n", var));
    }
    if select.for_update {
        code.push_str(&format!("{}.withLock(TRUE);\n", var));
    }
    code.push_str(&format!("{}.execute();\n", var));
    code.push_str(&format!("while({}.next())\n{{\n", var));
    for line in &generator.config.iteration_comment {
        code.push_str(&format!("//{}\n", line));
    }
    code.push_str("}\n");

    Ok(code)
}

/// Output buffer, host variable and `addSelect` for each select-list entry.
///
/// A column selected more than once gets an occurrence suffix from its
/// second appearance on: `stFooBar`, `stFooBar_2`.
fn select_bindings(select: &Select, generator: &Generator<'_>) -> String {
    let var = generator.statement;
    let namespace = &generator.config.function_namespace;
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut code = String::new();

    for item in &select.items {
        let stem = item.table_column_name();
        let count = seen.entry(stem.clone()).or_insert(0);
        *count += 1;
        let stem = if *count == 1 {
            stem
        } else {
            format!("{}_{}", stem, count)
        };

        let output = output_var(&stem);
        let host = host_var(&stem);
        code.push_str(&format!("RWTString {};\n", output));
        code.push_str(&format!("DALHostVar {}({});\n", host, output));
        code.push_str(&format!(
            "{}.addSelect({}, {});\n",
            var,
            item.select_code(namespace, ""),
            host
        ));
    }

    code
}
