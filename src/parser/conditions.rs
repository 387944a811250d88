//! WHERE clause grammar: condition chains, groups and predicates.

use super::Parser;
use crate::ast::*;
use crate::error::DalResult;
use crate::tokens::{Keyword, TokenKind};

impl Parser<'_> {
    /// `WHERE chain`, or nothing.
    pub(crate) fn parse_where(&mut self) -> DalResult<Option<ConditionChain>> {
        if !self.eat_keyword(Keyword::Where) {
            return Ok(None);
        }
        self.parse_chain().map(Some)
    }

    /// `term ((AND | OR) term)*`, accumulated left to right.
    fn parse_chain(&mut self) -> DalResult<ConditionChain> {
        let mut chain = ConditionChain::new(self.parse_term()?);
        loop {
            let join = if self.eat_keyword(Keyword::And) {
                JoinType::And
            } else if self.eat_keyword(Keyword::Or) {
                JoinType::Or
            } else {
                break;
            };
            let term = self.parse_term()?;
            chain.push(join, term);
        }
        Ok(chain)
    }

    /// `( chain ) | condition`
    fn parse_term(&mut self) -> DalResult<ConditionTerm> {
        if self.eat(TokenKind::LParen) {
            let inner = self.parse_chain()?;
            self.expect(TokenKind::RParen, "'and', 'or' or ')'")?;
            return Ok(ConditionTerm::Group(inner));
        }
        self.parse_condition().map(ConditionTerm::Condition)
    }

    fn parse_condition(&mut self) -> DalResult<Condition> {
        let left = self.parse_operand()?;

        let op = match self.peek_kind() {
            Some(TokenKind::Equal) => CompareOp::Eq,
            Some(TokenKind::NotEqual) => CompareOp::Ne,
            Some(TokenKind::Greater) => CompareOp::Gt,
            Some(TokenKind::Less) => CompareOp::Lt,
            Some(TokenKind::GreaterEq) => CompareOp::Gte,
            Some(TokenKind::LessEq) => CompareOp::Lte,
            Some(TokenKind::Keyword(Keyword::Like)) => CompareOp::Like,
            Some(TokenKind::Keyword(Keyword::In)) => {
                self.advance();
                return self.parse_membership(left, false);
            }
            Some(TokenKind::Keyword(Keyword::Not)) => {
                self.advance();
                self.expect_keyword(Keyword::In)?;
                return self.parse_membership(left, true);
            }
            Some(TokenKind::Keyword(Keyword::Is)) => {
                self.advance();
                let is_null = !self.eat_keyword(Keyword::Not);
                self.expect_keyword(Keyword::Null)?;
                return Ok(Condition::Null {
                    operand: left,
                    is_null,
                });
            }
            _ => return Err(self.error("a comparison operator, 'like', 'in', 'not in' or 'is'")),
        };
        self.advance();

        let right = self.parse_operand()?;
        Ok(Condition::Compare { left, op, right })
    }

    /// `( select )` after `IN` / `NOT IN`.
    fn parse_membership(&mut self, operand: Operand, negated: bool) -> DalResult<Condition> {
        self.expect(TokenKind::LParen, "'(' followed by a select")?;
        let subquery = self.parse_select()?;
        self.expect(TokenKind::RParen, "')'")?;
        Ok(Condition::Membership {
            operand,
            negated,
            subquery: Box::new(subquery),
        })
    }

    /// `qualcolumn | NUMBER | SQUOTEDSTR`; literals become input variables.
    fn parse_operand(&mut self) -> DalResult<Operand> {
        match self.peek_kind() {
            Some(TokenKind::Word) => self.parse_qual_column().map(Operand::Column),
            Some(TokenKind::Number) | Some(TokenKind::QuotedString) => {
                let literal = self.parse_literal()?;
                Ok(Operand::Literal(InputVariable::new(literal, self.names)?))
            }
            _ => Err(self.error("a qualified column or a literal")),
        }
    }
}
