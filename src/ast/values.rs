use serde::{Deserialize, Serialize};

use crate::error::DalResult;
use crate::naming::{NameAllocator, sanitize};

/// A constant from the SQL text. Numbers keep their digits verbatim, text
/// is stored without its quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    Number(String),
    Text(String),
}

impl Literal {
    /// The value as it appears inside generated string literals.
    pub fn raw(&self) -> String {
        match self {
            Literal::Number(n) | Literal::Text(n) => n.clone(),
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Text(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Number(n.to_string())
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Text(s.to_string())
    }
}

/// A literal lifted out of a condition into its own host variable.
///
/// The id is taken from the allocator when the node is built, so equal
/// literals in one statement still get distinct names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputVariable {
    pub id: u64,
    pub value: Literal,
}

impl InputVariable {
    pub fn new(value: Literal, names: &mut NameAllocator) -> DalResult<Self> {
        Ok(Self {
            id: names.literal_id()?,
            value,
        })
    }

    /// `replace<value>_<id>`; the trailing id keeps names unique.
    pub fn var_name(&self) -> String {
        format!("replace{}_{}", sanitize(&self.value.raw()), self.id)
    }

    pub fn host_var_name(&self) -> String {
        format!("HV{}", self.var_name())
    }

    /// Literal holder plus its input host variable.
    pub fn declaration(&self) -> String {
        let var = self.var_name();
        let holder = match &self.value {
            Literal::Text(s) => format!("RWTString {} = TEXT(\"{}\");\n", var, escape_cpp(s)),
            Literal::Number(n) => format!("float {} = {};\n", var, n),
        };
        format!(
            "{}DALInputHostVar {}({});\n",
            holder,
            self.host_var_name(),
            var
        )
    }
}

/// Escape text for a C++ double-quoted string literal.
pub fn escape_cpp(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
