pub mod columns;
pub mod conditions;
pub mod statements;
pub mod values;

pub use self::columns::{Function, FunctionArg, FunctionCall, QualColumn, SelectItem};
pub use self::conditions::{CompareOp, Condition, ConditionChain, ConditionTerm, JoinType, Operand};
pub use self::statements::{Assign, Delete, Insert, OrderKey, Select, SortDirection, Statement, Update};
pub use self::values::{InputVariable, Literal};
