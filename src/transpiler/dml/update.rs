//! UPDATE generation.

use crate::ast::values::escape_cpp;
use crate::ast::*;
use crate::error::DalResult;
use crate::naming::{literal_holder, table_var};
use crate::transpiler::conditions::{Scope, condition_code};
use crate::transpiler::{Generator, table_decl};

/// Generate DAL code for an UPDATE.
pub(crate) fn build_update(update: &Update, generator: &mut Generator<'_>) -> DalResult<String> {
    let var = generator.statement;
    let mut code = generator.statement_decl("DALUpdate");
    code.push_str(&table_decl("", &update.table));
    code.push('\n');

    // Literal holders are numbered per assignment
    for (i, assign) in update.assignments.iter().enumerate() {
        let holder = literal_holder(i + 1);
        code.push_str(&format!(
            "RWTString {} = \"{}\";\n",
            holder,
            escape_cpp(&assign.value.raw())
        ));
        code.push_str(&format!(
            "{}.addAssignment(DALAssignment({}[{}], DALHostVar({})));\n",
            var,
            table_var(&update.table),
            assign.column.dal_name(),
            holder
        ));
    }

    if let Some(filter) = &update.filter {
        let tables = std::slice::from_ref(&update.table);
        code.push_str(&condition_code(filter, generator, &Scope::root(tables), "cond")?);
        code.push_str(&format!("{}.set_criteria(cond);\n", var));
    }

    code.push_str(&format!("{}.execute();\n", var));
    Ok(code)
}
