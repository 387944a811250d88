//! INSERT generation.

use crate::ast::values::escape_cpp;
use crate::ast::*;
use crate::error::{DalError, DalResult};
use crate::naming::{column_var, literal_holder, table_var, value_var};
use crate::transpiler::Generator;
use crate::transpiler::table_decl;

/// Generate DAL code for an INSERT.
///
/// Columns and values are walked in lock-step, so a length mismatch is
/// rejected before any code is produced.
pub(crate) fn build_insert(insert: &Insert, generator: &mut Generator<'_>) -> DalResult<String> {
    if insert.columns.len() != insert.values.len() {
        return Err(DalError::LengthMismatch {
            columns: insert.columns.len(),
            values: insert.values.len(),
        });
    }

    let var = generator.statement;
    let mut code = generator.statement_decl("DALInsert");
    code.push_str("DALTableList table;\n");
    code.push_str("DALColumnList columns;\n");
    code.push_str("DALVarList values;\n");
    code.push_str(&table_decl("", &insert.table));
    code.push('\n');

    for (i, (column, value)) in insert.columns.iter().zip(&insert.values).enumerate() {
        let ordinal = i + 1;
        let holder = literal_holder(ordinal);
        let input = value_var(&column.column, ordinal);
        let dal_column = column_var(&column.column, ordinal);

        code.push_str(&format!(
            "RWTString {} = TEXT(\"{}\");\n",
            holder,
            escape_cpp(&value.raw())
        ));
        code.push_str(&format!("DALInputHostVar {}({});\n", input, holder));
        code.push_str(&format!(
            "DALColumn {} = {}[{}];\n",
            dal_column,
            table_var(&insert.table),
            column.dal_name()
        ));
        code.push_str(&format!("columns.append(&{});\n", dal_column));
        code.push_str(&format!("values.append(&{});\n\n", input));
    }

    code.push_str(&format!("{}.set_columns(columns);\n", var));
    code.push_str(&format!("{}.set_values(values);\n", var));
    code.push_str(&format!("{}.execute();\n", var));
    code.push_str(&format!("{}.reset();\n", var));
    Ok(code)
}
