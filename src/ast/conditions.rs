use serde::{Deserialize, Serialize};

use crate::ast::{InputVariable, QualColumn, Select};

/// A value side of a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Column(QualColumn),
    Literal(InputVariable),
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Column(col) => write!(f, "{}", col),
            Operand::Literal(var) => write!(f, "{}", var.value),
        }
    }
}

/// Binary comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
    Like,
}

impl CompareOp {
    pub fn sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Gte => ">=",
            CompareOp::Lte => "<=",
            CompareOp::Like => "like",
        }
    }
}

/// A single predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// `left op right`
    Compare {
        left: Operand,
        op: CompareOp,
        right: Operand,
    },
    /// `operand IS [NOT] NULL`
    Null { operand: Operand, is_null: bool },
    /// `operand [NOT] IN (select ...)`
    Membership {
        operand: Operand,
        negated: bool,
        subquery: Box<Select>,
    },
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Compare { left, op, right } => write!(f, "{} {} {}", left, op.sql(), right),
            Condition::Null { operand, is_null } => {
                let not = if *is_null { "" } else { "not " };
                write!(f, "{} is {}null", operand, not)
            }
            Condition::Membership {
                operand,
                negated,
                subquery,
            } => {
                let not = if *negated { "not " } else { "" };
                write!(f, "{} {}in ({})", operand, not, subquery)
            }
        }
    }
}

/// How a condition is joined to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
    And,
    Or,
}

impl JoinType {
    pub fn sql(&self) -> &'static str {
        match self {
            JoinType::And => "and",
            JoinType::Or => "or",
        }
    }
}

/// A chain member: a predicate or a parenthesised sub-chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionTerm {
    Condition(Condition),
    Group(ConditionChain),
}

impl std::fmt::Display for ConditionTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionTerm::Condition(cond) => write!(f, "{}", cond),
            ConditionTerm::Group(chain) => write!(f, "({})", chain),
        }
    }
}

/// A flat AND/OR chain in source order.
///
/// `tail[i].0` is the join between term `i` and term `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionChain {
    pub head: Box<ConditionTerm>,
    pub tail: Vec<(JoinType, ConditionTerm)>,
}

impl ConditionChain {
    pub fn new(head: ConditionTerm) -> Self {
        Self {
            head: Box::new(head),
            tail: Vec::new(),
        }
    }

    /// Thread the next term onto the end of the chain.
    pub fn push(&mut self, join: JoinType, term: ConditionTerm) {
        self.tail.push((join, term));
    }

    /// Terms in source order, each with the join that precedes it.
    pub fn terms(&self) -> impl Iterator<Item = (Option<JoinType>, &ConditionTerm)> {
        std::iter::once((None, self.head.as_ref()))
            .chain(self.tail.iter().map(|(join, term)| (Some(*join), term)))
    }

    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl From<Condition> for ConditionChain {
    fn from(cond: Condition) -> Self {
        ConditionChain::new(ConditionTerm::Condition(cond))
    }
}

impl std::fmt::Display for ConditionChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (join, term) in self.terms() {
            if let Some(join) = join {
                write!(f, " {} ", join.sql())?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(table: &str, column: &str, other: &str) -> Condition {
        Condition::Compare {
            left: Operand::Column(QualColumn::new(table, column)),
            op: CompareOp::Eq,
            right: Operand::Column(QualColumn::new(other, column)),
        }
    }

    #[test]
    fn test_chain_preserves_order_and_joins() {
        let mut chain = ConditionChain::from(eq("a", "x", "b"));
        chain.push(JoinType::Or, ConditionTerm::Condition(eq("a", "y", "b")));
        chain.push(JoinType::And, ConditionTerm::Condition(eq("a", "z", "b")));

        let joins: Vec<Option<JoinType>> = chain.terms().map(|(join, _)| join).collect();
        assert_eq!(joins, vec![None, Some(JoinType::Or), Some(JoinType::And)]);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.to_string(), "a.x = b.x or a.y = b.y and a.z = b.z");
    }

    #[test]
    fn test_group_display() {
        let mut inner = ConditionChain::from(eq("a", "x", "b"));
        inner.push(JoinType::Or, ConditionTerm::Condition(eq("a", "y", "b")));
        let mut chain = ConditionChain::new(ConditionTerm::Group(inner));
        chain.push(
            JoinType::And,
            ConditionTerm::Condition(Condition::Null {
                operand: Operand::Column(QualColumn::new("a", "z")),
                is_null: false,
            }),
        );
        assert_eq!(chain.to_string(), "(a.x = b.x or a.y = b.y) and a.z is not null");
    }
}
