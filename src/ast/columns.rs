use serde::{Deserialize, Serialize};

use crate::naming::{dal_table, pascal, table_var};
use crate::tokens::Keyword;

/// A `table.column` reference. The grammar never produces bare columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualColumn {
    pub table: String,
    pub column: String,
}

impl QualColumn {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    /// API-qualified column: `DbCartonDtl::InvnType`.
    pub fn dal_name(&self) -> String {
        format!("{}::{}", dal_table(&self.table), pascal(&self.column))
    }

    /// `CartonDtlInvnType`, the stem for generated per-column variables.
    pub fn table_column_name(&self) -> String {
        pascal(&self.table) + &pascal(&self.column)
    }

    /// Indexed lookup through the table handle: `tableCartonDtl[DbCartonDtl::InvnType]`.
    pub fn select_code(&self, prefix: &str) -> String {
        format!("{}{}[{}]", prefix, table_var(&self.table), self.dal_name())
    }
}

impl std::fmt::Display for QualColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// Functions allowed in a select list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Function {
    Distinct,
    Count,
    Sum,
    Min,
    Max,
    Avg,
    Substr,
    Greatest,
    Decode,
    Concat,
}

impl Function {
    pub fn from_keyword(keyword: Keyword) -> Option<Function> {
        match keyword {
            Keyword::Distinct => Some(Function::Distinct),
            Keyword::Count => Some(Function::Count),
            Keyword::Sum => Some(Function::Sum),
            Keyword::Min => Some(Function::Min),
            Keyword::Max => Some(Function::Max),
            Keyword::Avg => Some(Function::Avg),
            Keyword::Substr => Some(Function::Substr),
            Keyword::Greatest => Some(Function::Greatest),
            Keyword::Decode => Some(Function::Decode),
            Keyword::Concat => Some(Function::Concat),
            _ => None,
        }
    }

    /// Name as emitted in generated code.
    pub fn name(&self) -> &'static str {
        match self {
            Function::Distinct => "DISTINCT",
            Function::Count => "COUNT",
            Function::Sum => "SUM",
            Function::Min => "MIN",
            Function::Max => "MAX",
            Function::Avg => "AVG",
            Function::Substr => "SUBSTR",
            Function::Greatest => "GREATEST",
            Function::Decode => "DECODE",
            Function::Concat => "CONCAT",
        }
    }
}

/// Argument of a select-list function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionArg {
    Column(QualColumn),
    Call(Box<FunctionCall>),
    Number(String),
}

/// A single-argument function call, e.g. `sum(distinct(boo.boo))`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub function: Function,
    pub arg: FunctionArg,
}

impl FunctionCall {
    pub fn new(function: Function, arg: FunctionArg) -> Self {
        Self { function, arg }
    }

    /// Variable stem of the innermost column, or `Count1` style for `count(1)`.
    pub fn table_column_name(&self) -> String {
        match &self.arg {
            FunctionArg::Column(col) => col.table_column_name(),
            FunctionArg::Call(inner) => inner.table_column_name(),
            FunctionArg::Number(n) => {
                format!("{}{}", pascal(&self.function.name().to_ascii_lowercase()), n)
            }
        }
    }

    /// `DAL::SUM(DAL::DISTINCT(tableBoo[DbBoo::Boo]))`.
    pub fn select_code(&self, namespace: &str, prefix: &str) -> String {
        let arg = match &self.arg {
            FunctionArg::Column(col) => col.select_code(prefix),
            FunctionArg::Call(inner) => inner.select_code(namespace, prefix),
            FunctionArg::Number(n) => n.clone(),
        };
        format!("{}::{}({})", namespace, self.function.name(), arg)
    }
}

impl std::fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.function.name().to_ascii_lowercase();
        match &self.arg {
            FunctionArg::Column(col) => write!(f, "{}({})", name, col),
            FunctionArg::Call(inner) => write!(f, "{}({})", name, inner),
            FunctionArg::Number(n) => write!(f, "{}({})", name, n),
        }
    }
}

/// One entry of a select list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectItem {
    Column(QualColumn),
    Call(FunctionCall),
}

impl SelectItem {
    pub fn table_column_name(&self) -> String {
        match self {
            SelectItem::Column(col) => col.table_column_name(),
            SelectItem::Call(call) => call.table_column_name(),
        }
    }

    pub fn select_code(&self, namespace: &str, prefix: &str) -> String {
        match self {
            SelectItem::Column(col) => col.select_code(prefix),
            SelectItem::Call(call) => call.select_code(namespace, prefix),
        }
    }
}

impl std::fmt::Display for SelectItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectItem::Column(col) => write!(f, "{}", col),
            SelectItem::Call(call) => write!(f, "{}", call),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qual_column_names() {
        let col = QualColumn::new("carton_dtl", "invn_type");
        assert_eq!(col.dal_name(), "DbCartonDtl::InvnType");
        assert_eq!(col.table_column_name(), "CartonDtlInvnType");
        assert_eq!(col.select_code(""), "tableCartonDtl[DbCartonDtl::InvnType]");
        assert_eq!(col.select_code("sq0"), "sq0tableCartonDtl[DbCartonDtl::InvnType]");
        assert_eq!(col.to_string(), "carton_dtl.invn_type");
    }

    #[test]
    fn test_nested_function_code() {
        let call = FunctionCall::new(
            Function::Sum,
            FunctionArg::Call(Box::new(FunctionCall::new(
                Function::Distinct,
                FunctionArg::Column(QualColumn::new("boo", "boo")),
            ))),
        );
        assert_eq!(
            call.select_code("DAL", ""),
            "DAL::SUM(DAL::DISTINCT(tableBoo[DbBoo::Boo]))"
        );
        assert_eq!(call.table_column_name(), "BooBoo");
        assert_eq!(call.to_string(), "sum(distinct(boo.boo))");
    }

    #[test]
    fn test_numeric_function_argument() {
        let call = FunctionCall::new(Function::Count, FunctionArg::Number("1".to_string()));
        assert_eq!(call.select_code("DAL", ""), "DAL::COUNT(1)");
        assert_eq!(call.table_column_name(), "Count1");
    }

    #[test]
    fn test_function_whitelist() {
        assert_eq!(Function::from_keyword(Keyword::Greatest), Some(Function::Greatest));
        assert_eq!(Function::from_keyword(Keyword::Select), None);
    }
}
