use serde::{Deserialize, Serialize};

use crate::ast::{ConditionChain, Literal, QualColumn, SelectItem};

/// ORDER BY direction. Defaults to ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderKey {
    pub column: QualColumn,
    pub direction: SortDirection,
}

/// `table.column = literal` in an UPDATE set list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assign {
    pub column: QualColumn,
    pub value: Literal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Select {
    /// Projection, never empty
    pub items: Vec<SelectItem>,
    /// FROM tables in source order, duplicates kept
    pub tables: Vec<String>,
    pub filter: Option<ConditionChain>,
    /// Empty when there is no ORDER BY
    pub order_by: Vec<OrderKey>,
    pub for_update: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insert {
    pub table: String,
    pub columns: Vec<QualColumn>,
    /// Must match `columns` in length; checked at generation time
    pub values: Vec<Literal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub table: String,
    pub assignments: Vec<Assign>,
    pub filter: Option<ConditionChain>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delete {
    pub table: String,
    pub filter: Option<ConditionChain>,
}

/// A parsed statement root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

impl Statement {
    /// Name of the DAL statement object in generated code.
    pub fn var_name(&self) -> &'static str {
        match self {
            Statement::Select(_) => "select",
            Statement::Insert(_) => "insert",
            Statement::Update(_) => "update",
            Statement::Delete(_) => "del",
        }
    }

    /// DAL class of the statement object.
    pub fn dal_class(&self) -> &'static str {
        match self {
            Statement::Select(_) => "DALSelect",
            Statement::Insert(_) => "DALInsert",
            Statement::Update(_) => "DALUpdate",
            Statement::Delete(_) => "DALDelete",
        }
    }

    pub fn filter(&self) -> Option<&ConditionChain> {
        match self {
            Statement::Select(s) => s.filter.as_ref(),
            Statement::Update(u) => u.filter.as_ref(),
            Statement::Delete(d) => d.filter.as_ref(),
            Statement::Insert(_) => None,
        }
    }
}

impl std::fmt::Display for Select {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let items: Vec<String> = self.items.iter().map(|i| i.to_string()).collect();
        write!(f, "select {} from {}", items.join(", "), self.tables.join(", "))?;
        if let Some(filter) = &self.filter {
            write!(f, " where {}", filter)?;
        }
        if !self.order_by.is_empty() {
            let keys: Vec<String> = self
                .order_by
                .iter()
                .map(|k| match k.direction {
                    SortDirection::Asc => k.column.to_string(),
                    SortDirection::Desc => format!("{} desc", k.column),
                })
                .collect();
            write!(f, " order by {}", keys.join(", "))?;
        }
        if self.for_update {
            write!(f, " for update")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Select(s) => write!(f, "{}", s),
            Statement::Insert(i) => {
                let cols: Vec<String> = i.columns.iter().map(|c| c.to_string()).collect();
                let vals: Vec<String> = i.values.iter().map(|v| v.to_string()).collect();
                write!(
                    f,
                    "insert into {} ({}) values ({})",
                    i.table,
                    cols.join(", "),
                    vals.join(", ")
                )
            }
            Statement::Update(u) => {
                let sets: Vec<String> = u
                    .assignments
                    .iter()
                    .map(|a| format!("{} = {}", a.column, a.value))
                    .collect();
                write!(f, "update {} set {}", u.table, sets.join(", "))?;
                if let Some(filter) = &u.filter {
                    write!(f, " where {}", filter)?;
                }
                Ok(())
            }
            Statement::Delete(d) => {
                write!(f, "delete from {}", d.table)?;
                if let Some(filter) = &d.filter {
                    write!(f, " where {}", filter)?;
                }
                Ok(())
            }
        }
    }
}
