//! SQL parser.
//!
//! Builds one [`Statement`] from the token stream produced by
//! [`crate::tokens::tokenize`].
//!
//! # Grammar Overview
//!
//! ```text
//! statement  → insert | delete | update | select
//! insert     → INSERT INTO name ( qualcolumn,+ ) VALUES ( literal,+ )
//! delete     → DELETE FROM name whereclause?
//! update     → UPDATE name SET (qualcolumn = literal),+ whereclause?
//! select     → SELECT selectitem,+ FROM name,+ whereclause? orderby? forupdate?
//! whereclause→ WHERE chain
//! chain      → term ((AND | OR) term)*
//! term       → ( chain ) | condition
//! ```
//!
//! Literal operands in conditions take their unique id from the
//! [`NameAllocator`] as they are parsed.

pub mod conditions;
pub mod statements;

#[cfg(test)]
mod tests;

use crate::ast::*;
use crate::error::{DalError, DalResult};
use crate::naming::NameAllocator;
use crate::tokens::{Keyword, Token, TokenKind, tokenize};

/// Parse a SQL statement with a fresh [`NameAllocator`].
pub fn parse(sql: &str) -> DalResult<Statement> {
    parse_with(sql, &mut NameAllocator::new())
}

/// Parse a SQL statement, drawing literal ids from `names`.
pub fn parse_with(sql: &str, names: &mut NameAllocator) -> DalResult<Statement> {
    let tokens = tokenize(sql)?;
    parse_tokens(&tokens, sql.len(), names)
}

/// Parse an already scanned token stream. `end` is the input length, used
/// as the position of end-of-input errors.
pub fn parse_tokens(tokens: &[Token], end: usize, names: &mut NameAllocator) -> DalResult<Statement> {
    let mut parser = Parser::new(tokens, end, names);
    let statement = parser.parse_statement()?;
    parser.finish()?;
    tracing::debug!(kind = statement.var_name(), "parsed statement");
    Ok(statement)
}

/// Cursor over the token stream.
pub(crate) struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    end: usize,
    names: &'a mut NameAllocator,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a [Token], end: usize, names: &'a mut NameAllocator) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            names,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn at_keyword(&self, keyword: Keyword) -> bool {
        self.peek_kind() == Some(TokenKind::Keyword(keyword))
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        self.eat(TokenKind::Keyword(keyword))
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> DalResult<&'a Token> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.error(expected)),
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> DalResult<()> {
        self.expect(TokenKind::Keyword(keyword), &format!("'{}'", keyword.as_str()))
            .map(|_| ())
    }

    /// Syntax error at the current token.
    fn error(&self, expected: &str) -> DalError {
        match self.peek() {
            Some(token) => DalError::syntax(token.position, format!("'{}'", token.text), expected),
            None => DalError::syntax(self.end, "end of input", expected),
        }
    }

    fn finish(&self) -> DalResult<()> {
        if self.peek().is_some() {
            return Err(self.error("end of input"));
        }
        Ok(())
    }

    /// `WORD`
    fn parse_name(&mut self) -> DalResult<String> {
        self.expect(TokenKind::Word, "a table name").map(|t| t.text.clone())
    }

    /// `WORD . WORD`
    fn parse_qual_column(&mut self) -> DalResult<QualColumn> {
        let table = self.expect(TokenKind::Word, "a qualified column (table.column)")?;
        self.expect(TokenKind::Dot, "'.' (columns must be qualified with their table)")?;
        let column = self.expect(TokenKind::Word, "a column name")?;
        Ok(QualColumn::new(table.text.clone(), column.text.clone()))
    }

    /// `NUMBER`, kept as its digit text so any width survives.
    fn parse_number(&mut self) -> DalResult<String> {
        self.expect(TokenKind::Number, "a number").map(|t| t.text.clone())
    }

    /// `NUMBER | SQUOTEDSTR`
    fn parse_literal(&mut self) -> DalResult<Literal> {
        match self.peek_kind() {
            Some(TokenKind::Number) => self.parse_number().map(Literal::Number),
            Some(TokenKind::QuotedString) => {
                let token = self.expect(TokenKind::QuotedString, "a quoted string")?;
                let text = crate::naming::strip_quotes(&token.text);
                Ok(Literal::Text(text.to_string()))
            }
            _ => Err(self.error("a number or quoted string")),
        }
    }
}
