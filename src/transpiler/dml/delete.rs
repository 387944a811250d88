//! DELETE generation.

use crate::ast::*;
use crate::error::DalResult;
use crate::naming::table_var;
use crate::transpiler::Generator;
use crate::transpiler::conditions::{Scope, condition_code};
use crate::transpiler::table_decl;

/// Generate DAL code for a DELETE.
pub(crate) fn build_delete(delete: &Delete, generator: &mut Generator<'_>) -> DalResult<String> {
    let var = generator.statement;
    let mut code = generator.statement_decl("DALDelete");
    code.push_str(&table_decl("", &delete.table));
    code.push_str("DALTableList tableList;\n");
    code.push_str(&format!("tableList.insert(&{});\n", table_var(&delete.table)));
    code.push_str(&format!("{}.set_table(tableList);\n\n", var));

    if let Some(filter) = &delete.filter {
        let tables = std::slice::from_ref(&delete.table);
        code.push_str(&condition_code(filter, generator, &Scope::root(tables), "cond")?);
        code.push_str(&format!("{}.set_criteria(cond);\n", var));
    }

    code.push_str(&format!("{}.execute();\n", var));
    Ok(code)
}
