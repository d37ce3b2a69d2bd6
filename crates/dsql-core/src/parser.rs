//! Recursive-descent parser from statement text to [`Request`].
//!
//! The first keyword selects the statement form. Every step returns early on
//! the first mismatch; there is no recovery. A statement may end with one
//! `;` and must then reach the end of input.

use dsql_model::input::{
    CreateTableInput, DeleteItemInput, DeleteTableInput, PutItemInput, QueryInput,
    UpdateItemInput,
};
use dsql_model::types::{
    AttributeDefinition, AttributeType, ComparisonOperator, Condition, KeySchemaElement, KeyType,
    ProvisionedThroughput,
};
use dsql_model::{AttributeMap, AttributeValue, Item};
use tracing::debug;

use crate::error::SyntaxError;
use crate::lexer::{Lexer, TokenKind};
use crate::request::{Expression, Request};

/// Parse one statement.
///
/// # Errors
///
/// Returns a [`SyntaxError`] on the first token the grammar does not accept.
/// No partial request is ever returned.
pub fn parse(source: &str) -> Result<Request, SyntaxError> {
    let request = Parser::new(source).statement()?;
    debug!(
        operation = %request.operation(),
        table = request.table_name(),
        "parsed statement"
    );
    Ok(request)
}

/// Strip the surrounding quotes from a string lexeme and resolve escapes.
///
/// `\"`, `\'` and `\\` collapse to the escaped character; other backslash
/// sequences are kept as written.
fn unquote(lexeme: &str) -> String {
    let inner = lexeme
        .get(1..lexeme.len().saturating_sub(1))
        .unwrap_or_default();
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if matches!(next, '"' | '\'' | '\\') {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

struct Parser<'a> {
    source: &'a str,
    lexer: Lexer,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            lexer: Lexer::new(source),
        }
    }

    // -----------------------------------------------------------------------
    // Token helpers
    // -----------------------------------------------------------------------

    /// Error for the current token.
    fn unexpected(&self, kind: TokenKind, expected: impl Into<String>) -> SyntaxError {
        SyntaxError::UnexpectedToken {
            found: self.lexer.text().to_owned(),
            kind,
            expected: expected.into(),
            source_text: self.source.to_owned(),
        }
    }

    /// Consume a token of `kind` and return its lexeme.
    fn expect(&mut self, kind: TokenKind) -> Result<String, SyntaxError> {
        let found = self.lexer.next();
        if found == kind {
            Ok(self.lexer.text().to_owned())
        } else {
            Err(self.unexpected(found, kind.name()))
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), SyntaxError> {
        let found = self.lexer.next();
        if found == TokenKind::Keyword && self.lexer.text().eq_ignore_ascii_case(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(found, format!("'{keyword}'")))
        }
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        self.lexer.peek() == TokenKind::Keyword
            && self.lexer.peek_text().eq_ignore_ascii_case(keyword)
    }

    /// Consume `keyword` if it is next.
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let present = self.peek_keyword(keyword);
        if present {
            self.lexer.next();
        }
        present
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        let present = self.lexer.peek() == kind;
        if present {
            self.lexer.next();
        }
        present
    }

    fn identifier(&mut self) -> Result<String, SyntaxError> {
        self.expect(TokenKind::Identifier)
    }

    /// A string or number literal as an attribute value.
    fn literal(&mut self) -> Result<AttributeValue, SyntaxError> {
        match self.lexer.next() {
            TokenKind::String => Ok(AttributeValue::string(unquote(self.lexer.text()))),
            TokenKind::Number => Ok(AttributeValue::number(self.lexer.text())),
            found => Err(self.unexpected(found, "String or Number")),
        }
    }

    /// Optional `;` followed by the end of input.
    fn finish(&mut self) -> Result<(), SyntaxError> {
        self.eat(TokenKind::Semicolon);
        self.expect(TokenKind::EndOfInput).map(|_| ())
    }

    // -----------------------------------------------------------------------
    // Expressions
    // -----------------------------------------------------------------------

    /// `ident op literal` or `ident between ( literal , literal )`.
    fn expression(&mut self) -> Result<Expression, SyntaxError> {
        let identifier = self.identifier()?;

        let found = self.lexer.next();
        let operator = match found {
            TokenKind::Operator | TokenKind::Keyword => {
                ComparisonOperator::from_symbol(self.lexer.text())
            }
            _ => None,
        }
        .ok_or_else(|| self.unexpected(found, "comparison operator"))?;

        let values = if operator == ComparisonOperator::Between {
            self.expect(TokenKind::LeftParen)?;
            let low = self.literal()?;
            self.expect(TokenKind::Comma)?;
            let high = self.literal()?;
            self.expect(TokenKind::RightParen)?;
            vec![low, high]
        } else {
            vec![self.literal()?]
        };

        Ok(Expression {
            identifier,
            operator,
            values,
        })
    }

    /// An expression that must use `=`.
    fn assignment(&mut self) -> Result<Expression, SyntaxError> {
        let identifier = self.identifier()?;
        let found = self.lexer.next();
        if found != TokenKind::Operator || self.lexer.text() != "=" {
            return Err(self.unexpected(found, "'='"));
        }
        Ok(Expression {
            identifier,
            operator: ComparisonOperator::Eq,
            values: vec![self.literal()?],
        })
    }

    /// Whether a WHERE chain continues: `and`, `or` or an operator token.
    fn eat_conjunction(&mut self) -> bool {
        if self.peek_keyword("and") || self.peek_keyword("or") {
            self.lexer.next();
            return true;
        }
        self.eat(TokenKind::Operator)
    }

    fn key_conditions(
        &mut self,
        conditions: &mut AttributeMap<Condition>,
    ) -> Result<(), SyntaxError> {
        loop {
            self.expression()?.fold_into_conditions(conditions);
            if !self.eat_conjunction() {
                return Ok(());
            }
        }
    }

    fn key(
        &mut self,
        key: &mut Item,
        chain: impl Fn(&mut Self) -> bool,
    ) -> Result<(), SyntaxError> {
        loop {
            self.assignment()?.fold_into_key(key);
            if !chain(self) {
                return Ok(());
            }
        }
    }

    // -----------------------------------------------------------------------
    // Statements
    // -----------------------------------------------------------------------

    fn statement(&mut self) -> Result<Request, SyntaxError> {
        let found = self.lexer.next();
        let keyword = self.lexer.text().to_ascii_lowercase();
        match (found, keyword.as_str()) {
            (TokenKind::Keyword, "select") => self.select(),
            (TokenKind::Keyword, "insert") => self.insert(),
            (TokenKind::Keyword, "update") => self.update(),
            (TokenKind::Keyword, "create") => self.create(),
            (TokenKind::Keyword, "delete") => self.delete(),
            (TokenKind::Keyword, "drop") => self.drop_table(),
            _ => Err(SyntaxError::UnknownStatement {
                found: self.lexer.text().to_owned(),
                source_text: self.source.to_owned(),
            }),
        }
    }

    /// `select (* | ident, ...) from t [limit n] [where ...] [order by ident [asc|desc]] [limit n]`
    fn select(&mut self) -> Result<Request, SyntaxError> {
        let mut query = QueryInput::default();

        if !self.eat(TokenKind::Wildcard) && !self.peek_keyword("from") {
            loop {
                query.attributes_to_get.push(self.identifier()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect_keyword("from")?;
        query.table_name = self.identifier()?;

        self.limit(&mut query)?;
        if self.eat_keyword("where") {
            self.key_conditions(&mut query.key_conditions)?;
        }
        if self.eat_keyword("order") {
            self.expect_keyword("by")?;
            self.identifier()?;
            let descending = self.eat_keyword("desc");
            if !descending {
                self.eat_keyword("asc");
            }
            query.scan_index_forward = Some(!descending);
        }
        self.limit(&mut query)?;

        self.finish()?;
        Ok(Request::Query(query))
    }

    /// Optional `limit n`; accepted once per statement.
    fn limit(&mut self, query: &mut QueryInput) -> Result<(), SyntaxError> {
        if !self.peek_keyword("limit") {
            return Ok(());
        }
        let found = self.lexer.next();
        if query.limit.is_some() {
            return Err(self.unexpected(found, "a single LIMIT clause"));
        }
        let value = self.expect(TokenKind::Number)?;
        let limit = value
            .parse::<i32>()
            .ok()
            .filter(|n| *n >= 0)
            .ok_or_else(|| SyntaxError::InvalidLimit {
                value,
                source_text: self.source.to_owned(),
            })?;
        query.limit = Some(limit);
        Ok(())
    }

    /// `insert into t ( ident, ... ) values ( literal, ... )`
    fn insert(&mut self) -> Result<Request, SyntaxError> {
        self.expect_keyword("into")?;
        let table_name = self.identifier()?;

        self.expect(TokenKind::LeftParen)?;
        let mut columns = vec![self.identifier()?];
        while self.eat(TokenKind::Comma) {
            columns.push(self.identifier()?);
        }
        self.expect(TokenKind::RightParen)?;

        self.expect_keyword("values")?;
        self.expect(TokenKind::LeftParen)?;
        let mut values = vec![self.literal()?];
        while self.eat(TokenKind::Comma) {
            values.push(self.literal()?);
        }
        self.expect(TokenKind::RightParen)?;
        self.finish()?;

        if columns.len() != values.len() {
            return Err(SyntaxError::ColumnCountMismatch {
                columns: columns.len(),
                values: values.len(),
                source_text: self.source.to_owned(),
            });
        }

        let item = columns.into_iter().zip(values).collect();
        Ok(Request::PutItem(PutItemInput { table_name, item }))
    }

    /// `update t set ident = literal, ... where ident = literal ...`
    fn update(&mut self) -> Result<Request, SyntaxError> {
        let mut input = UpdateItemInput {
            table_name: self.identifier()?,
            ..UpdateItemInput::default()
        };

        self.expect_keyword("set")?;
        loop {
            self.assignment()?
                .fold_into_updates(&mut input.attribute_updates);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.expect_keyword("where")?;
        self.key(&mut input.key, Self::eat_conjunction)?;
        self.finish()?;
        Ok(Request::UpdateItem(input))
    }

    /// `delete from t where ident = literal (and ident = literal)*`
    fn delete(&mut self) -> Result<Request, SyntaxError> {
        self.expect_keyword("from")?;
        let mut input = DeleteItemInput {
            table_name: self.identifier()?,
            key: Item::new(),
        };

        self.expect_keyword("where")?;
        self.key(&mut input.key, |p| p.eat_keyword("and"))?;
        self.finish()?;
        Ok(Request::DeleteItem(input))
    }

    /// `drop table t`
    fn drop_table(&mut self) -> Result<Request, SyntaxError> {
        self.expect_keyword("table")?;
        let table_name = self.identifier()?;
        self.finish()?;
        Ok(Request::DeleteTable(DeleteTableInput { table_name }))
    }

    /// `create table t ( definition, ... ) [with ( read = n, write = n )]`
    fn create(&mut self) -> Result<Request, SyntaxError> {
        self.expect_keyword("table")?;
        let mut input = CreateTableInput {
            table_name: self.identifier()?,
            ..CreateTableInput::default()
        };

        self.expect(TokenKind::LeftParen)?;
        loop {
            self.definition(&mut input)?;
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightParen)?;

        if self.eat_keyword("with") {
            input.provisioned_throughput = self.throughput()?;
        }
        self.finish()?;
        Ok(Request::CreateTable(input))
    }

    /// `ident type [hash|range]`
    fn definition(&mut self, input: &mut CreateTableInput) -> Result<(), SyntaxError> {
        let attribute_name = self.identifier()?;

        let found = self.lexer.next();
        let attribute_type = (found == TokenKind::Type)
            .then(|| AttributeType::from_type_name(self.lexer.text()))
            .flatten()
            .ok_or_else(|| self.unexpected(found, TokenKind::Type.name()))?;

        if self.lexer.peek() == TokenKind::Constraint {
            let found = self.lexer.next();
            let key_type = KeyType::from_constraint(self.lexer.text())
                .ok_or_else(|| self.unexpected(found, "'hash' or 'range'"))?;
            input.key_schema.push(KeySchemaElement {
                attribute_name: attribute_name.clone(),
                key_type,
            });
        }

        input.attribute_definitions.push(AttributeDefinition {
            attribute_name,
            attribute_type,
        });
        Ok(())
    }

    /// `( read = n, write = n )`; either entry may be omitted.
    fn throughput(&mut self) -> Result<ProvisionedThroughput, SyntaxError> {
        let mut throughput = ProvisionedThroughput::default();

        self.expect(TokenKind::LeftParen)?;
        loop {
            let name = self.identifier()?;
            let found = self.lexer.next();
            if found != TokenKind::Operator || self.lexer.text() != "=" {
                return Err(self.unexpected(found, "'='"));
            }
            self.lexer.next();
            let value = self.lexer.text().to_owned();

            let invalid = || SyntaxError::InvalidThroughput {
                name: name.clone(),
                value: value.clone(),
                source_text: self.source.to_owned(),
            };
            let units = value.parse::<i64>().map_err(|_| invalid())?;
            match name.to_ascii_lowercase().as_str() {
                "read" => throughput.read_capacity_units = units,
                "write" => throughput.write_capacity_units = units,
                _ => return Err(invalid()),
            }

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightParen)?;
        Ok(throughput)
    }
}
