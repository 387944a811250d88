//! Condition tree compiler.
//!
//! A WHERE chain becomes one `DALCondition` whose constructor argument is
//! a nested boolean expression. Anything the expression references is
//! declared before it: first the code of every IN/NOT IN subquery in the
//! chain (groups included), then the host variables of every literal.

use crate::ast::*;
use crate::error::{DalError, DalResult};
use crate::transpiler::{Generator, table_decl};

/// Column name resolution for one level of subquery nesting.
///
/// Columns of tables in this level's FROM list get this level's prefix;
/// other tables resolve through the enclosing levels.
pub(crate) struct Scope<'s> {
    prefix: String,
    tables: &'s [String],
    parent: Option<&'s Scope<'s>>,
}

impl<'s> Scope<'s> {
    /// Top-level statement scope, no prefix.
    pub(crate) fn root(tables: &'s [String]) -> Self {
        Self {
            prefix: String::new(),
            tables,
            parent: None,
        }
    }

    fn nested(prefix: String, tables: &'s [String], parent: &'s Scope<'s>) -> Self {
        Self {
            prefix,
            tables,
            parent: Some(parent),
        }
    }

    pub(crate) fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Prefix for a table handle. Tables unknown to every level stay local.
    fn resolve(&self, table: &str) -> &str {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if current.tables.iter().any(|t| t == table) {
                return &current.prefix;
            }
            scope = current.parent;
        }
        &self.prefix
    }
}

/// Code emitted ahead of the condition expression.
#[derive(Default)]
struct Preamble {
    subqueries: String,
    declarations: String,
}

impl Preamble {
    fn declare(&mut self, operand: &Operand) {
        if let Operand::Literal(var) = operand {
            self.declarations.push_str(&var.declaration());
        }
    }
}

/// Compile a chain into subquery code, literal declarations and
/// `DALCondition <cond_var>(...)`.
pub(crate) fn condition_code(
    chain: &ConditionChain,
    generator: &mut Generator<'_>,
    scope: &Scope<'_>,
    cond_var: &str,
) -> DalResult<String> {
    let mut preamble = Preamble::default();
    let expression = compile_chain(chain, generator, scope, &mut preamble)?;
    Ok(format!(
        "{}{}DALCondition {}(\n{}\n);\n",
        preamble.subqueries, preamble.declarations, cond_var, expression
    ))
}

fn compile_chain(
    chain: &ConditionChain,
    generator: &mut Generator<'_>,
    scope: &Scope<'_>,
    preamble: &mut Preamble,
) -> DalResult<String> {
    let mut expression = String::new();
    for (join, term) in chain.terms() {
        match join {
            Some(JoinType::And) => expression.push_str(" &&\n"),
            Some(JoinType::Or) => expression.push_str(" ||\n"),
            None => {}
        }
        let code = match term {
            ConditionTerm::Condition(cond) => compile_condition(cond, generator, scope, preamble)?,
            ConditionTerm::Group(inner) => {
                format!("(\n{}\n)", compile_chain(inner, generator, scope, preamble)?)
            }
        };
        expression.push_str(&code);
    }
    Ok(expression)
}

fn compile_condition(
    cond: &Condition,
    generator: &mut Generator<'_>,
    scope: &Scope<'_>,
    preamble: &mut Preamble,
) -> DalResult<String> {
    match cond {
        Condition::Compare { left, op, right } => {
            preamble.declare(left);
            preamble.declare(right);
            let left = operand_code(left, scope);
            let right = operand_code(right, scope);
            Ok(match op {
                CompareOp::Like => format!("{}.like({})", left, right),
                CompareOp::Eq => format!("{} == {}", left, right),
                CompareOp::Ne => format!("{} != {}", left, right),
                other => format!("{} {} {}", left, other.sql(), right),
            })
        }
        Condition::Null { operand, is_null } => {
            preamble.declare(operand);
            let method = if *is_null { "isNull" } else { "isNotNull" };
            Ok(format!("{}.{}()", operand_code(operand, scope), method))
        }
        Condition::Membership {
            operand,
            negated,
            subquery,
        } => {
            let (name, code) = subquery_code(subquery, generator, scope)?;
            preamble.subqueries.push_str(&code);
            preamble.declare(operand);
            let method = if *negated { "notIn" } else { "in" };
            Ok(format!("{}.{}({})", operand_code(operand, scope), method, name))
        }
    }
}

/// An operand used as a value.
fn operand_code(operand: &Operand, scope: &Scope<'_>) -> String {
    match operand {
        Operand::Column(col) => col.select_code(scope.resolve(&col.table)),
        Operand::Literal(var) => var.host_var_name(),
    }
}

/// Materialize a nested select as a `DALSubquery`, returning its variable
/// name and declaration code.
pub(crate) fn subquery_code(
    select: &Select,
    generator: &mut Generator<'_>,
    parent: &Scope<'_>,
) -> DalResult<(String, String)> {
    let first = select
        .items
        .first()
        .ok_or_else(|| DalError::Invalid("subquery has an empty select list".to_string()))?;
    if select.tables.is_empty() {
        return Err(DalError::Invalid("subquery has an empty from list".to_string()));
    }
    if select.items.len() > 1 {
        tracing::warn!(
            columns = select.items.len(),
            "subquery selects more than one column, only the first is used"
        );
    }
    if !select.order_by.is_empty() {
        tracing::warn!(
            keys = select.order_by.len(),
            "subquery order by has no DAL equivalent and is dropped"
        );
    }
    if select.for_update {
        tracing::warn!("subquery for update has no DAL equivalent and is dropped");
    }

    let id = generator.names.subquery_id()?;
    let scope = Scope::nested(format!("sq{}", id), &select.tables, parent);
    let name = format!("{}SubQuery{}", scope.prefix(), first.table_column_name());
    tracing::debug!(id, name = %name, "materializing subquery");

    let mut code = String::new();
    for table in &select.tables {
        code.push_str(&table_decl(scope.prefix(), table));
    }
    code.push_str(&format!(
        "DALSubquery {}({}.newSubquery());\n",
        name, generator.statement
    ));
    code.push_str(&format!(
        "{}.add_select({});\n",
        name,
        first.select_code(&generator.config.function_namespace, scope.prefix())
    ));

    if let Some(filter) = &select.filter {
        let cond_var = format!("{}Cond", name);
        code.push_str(&condition_code(filter, generator, &scope, &cond_var)?);
        code.push_str(&format!("{}.where({});\n", name, cond_var));
    }

    Ok((name, code))
}
