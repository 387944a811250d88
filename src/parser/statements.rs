//! Statement-level grammar rules.

use super::Parser;
use crate::ast::*;
use crate::error::DalResult;
use crate::tokens::{Keyword, TokenKind};

impl Parser<'_> {
    /// `statement → insert | delete | update | select`
    pub(crate) fn parse_statement(&mut self) -> DalResult<Statement> {
        match self.peek_kind() {
            Some(TokenKind::Keyword(Keyword::Insert)) => self.parse_insert().map(Statement::Insert),
            Some(TokenKind::Keyword(Keyword::Delete)) => self.parse_delete().map(Statement::Delete),
            Some(TokenKind::Keyword(Keyword::Update)) => self.parse_update().map(Statement::Update),
            Some(TokenKind::Keyword(Keyword::Select)) => self.parse_select().map(Statement::Select),
            _ => Err(self.error("'insert', 'delete', 'update' or 'select'")),
        }
    }

    /// `INSERT INTO name ( columnlist ) VALUES ( valuelist )`
    fn parse_insert(&mut self) -> DalResult<Insert> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let table = self.parse_name()?;

        self.expect(TokenKind::LParen, "'('")?;
        let mut columns = vec![self.parse_qual_column()?];
        while self.eat(TokenKind::Comma) {
            columns.push(self.parse_qual_column()?);
        }
        self.expect(TokenKind::RParen, "',' or ')'")?;

        self.expect_keyword(Keyword::Values)?;
        self.expect(TokenKind::LParen, "'('")?;
        let mut values = vec![self.parse_literal()?];
        while self.eat(TokenKind::Comma) {
            values.push(self.parse_literal()?);
        }
        self.expect(TokenKind::RParen, "',' or ')'")?;

        Ok(Insert {
            table,
            columns,
            values,
        })
    }

    /// `DELETE FROM name whereclause?`
    fn parse_delete(&mut self) -> DalResult<Delete> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let table = self.parse_name()?;
        let filter = self.parse_where()?;
        Ok(Delete { table, filter })
    }

    /// `UPDATE name SET assignlist whereclause?`
    fn parse_update(&mut self) -> DalResult<Update> {
        self.expect_keyword(Keyword::Update)?;
        let table = self.parse_name()?;
        self.expect_keyword(Keyword::Set)?;

        let mut assignments = vec![self.parse_assign()?];
        while self.eat(TokenKind::Comma) {
            assignments.push(self.parse_assign()?);
        }

        let filter = self.parse_where()?;
        Ok(Update {
            table,
            assignments,
            filter,
        })
    }

    /// `qualcolumn = literal`
    fn parse_assign(&mut self) -> DalResult<Assign> {
        let column = self.parse_qual_column()?;
        self.expect(TokenKind::Equal, "'='")?;
        let value = self.parse_literal()?;
        Ok(Assign { column, value })
    }

    /// `SELECT selectlist FROM fromlist whereclause? orderby? forupdate?`
    pub(crate) fn parse_select(&mut self) -> DalResult<Select> {
        self.expect_keyword(Keyword::Select)?;

        let mut items = vec![self.parse_select_item()?];
        while self.eat(TokenKind::Comma) {
            items.push(self.parse_select_item()?);
        }

        self.expect_keyword(Keyword::From)?;
        let mut tables = vec![self.parse_name()?];
        while self.eat(TokenKind::Comma) {
            tables.push(self.parse_name()?);
        }

        let filter = self.parse_where()?;
        let order_by = self.parse_order_by()?;

        let for_update = if self.eat_keyword(Keyword::For) {
            self.expect_keyword(Keyword::Update)?;
            true
        } else {
            false
        };

        Ok(Select {
            items,
            tables,
            filter,
            order_by,
            for_update,
        })
    }

    /// `qualcolumn | function`
    fn parse_select_item(&mut self) -> DalResult<SelectItem> {
        match self.function_at_cursor() {
            Some(function) => self.parse_function_call(function).map(SelectItem::Call),
            None => self.parse_qual_column().map(SelectItem::Column),
        }
    }

    fn function_at_cursor(&self) -> Option<Function> {
        match self.peek_kind() {
            Some(TokenKind::Keyword(keyword)) => Function::from_keyword(keyword),
            _ => None,
        }
    }

    /// `functionname ( function | qualcolumn | NUMBER )`
    fn parse_function_call(&mut self, function: Function) -> DalResult<FunctionCall> {
        self.advance();
        self.expect(TokenKind::LParen, "'('")?;

        let arg = if let Some(inner) = self.function_at_cursor() {
            FunctionArg::Call(Box::new(self.parse_function_call(inner)?))
        } else if self.peek_kind() == Some(TokenKind::Number) {
            FunctionArg::Number(self.parse_number()?)
        } else {
            FunctionArg::Column(self.parse_qual_column()?)
        };

        self.expect(TokenKind::RParen, "')'")?;
        Ok(FunctionCall::new(function, arg))
    }

    /// `ORDER BY qualcolumn (ASC | DESC)? (, ...)*`
    fn parse_order_by(&mut self) -> DalResult<Vec<OrderKey>> {
        if !self.eat_keyword(Keyword::Order) {
            return Ok(Vec::new());
        }
        self.expect_keyword(Keyword::By)?;

        let mut keys = Vec::new();
        loop {
            let column = self.parse_qual_column()?;
            let direction = if self.eat_keyword(Keyword::Desc) {
                SortDirection::Desc
            } else {
                self.eat_keyword(Keyword::Asc);
                SortDirection::Asc
            };
            keys.push(OrderKey { column, direction });

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(keys)
    }
}
