// ABOUTME: Recursive-descent parser turning a token stream into a Program AST

use crate::ast::*;
use crate::error::{ParseError, ParseErrorKind};
use crate::error_handler::ErrorHandler;
use crate::lexer::Lexer;
use crate::position::Position;
use crate::token::{Token, TokenKind};
use std::collections::{HashMap, HashSet};

pub fn parse(source: &str, handler: &mut ErrorHandler) -> Program {
    let tokens = Lexer::tokenize(source, handler);
    let mut parser = Parser { tokens: &tokens, pos: 0 };
    parser.parse_program(handler)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn position(&self) -> Position {
        self.peek().position
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, expected: &TokenKind) -> bool {
        std::mem::discriminant(self.peek_kind()) == std::mem::discriminant(expected)
    }

    fn matches(&mut self, expected: &TokenKind) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Records an error at the current position for a required token that
    /// carries no payload the caller needs back. Parsing continues as if
    /// the token had been there, without consuming anything real.
    fn expect(&mut self, expected: TokenKind, err: ParseErrorKind, handler: &mut ErrorHandler) {
        if self.check(&expected) {
            self.advance();
        } else {
            handler.add_parser_error(ParseError::new(err, self.position()));
        }
    }

    fn looks_like_expr_start(&self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::String(_)
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::Identifier(_)
                | TokenKind::LParen
                | TokenKind::Minus
                | TokenKind::Not
        )
    }

    /// Consumes a required identifier, or logs `err` and eats one bad
    /// token so the parser always makes forward progress.
    fn expect_identifier(&mut self, err: ParseErrorKind, handler: &mut ErrorHandler) -> String {
        if let TokenKind::Identifier(name) = self.peek_kind().clone() {
            self.advance();
            name
        } else {
            handler.add_parser_error(ParseError::new(err, self.position()));
            if !matches!(self.peek_kind(), TokenKind::Eof) {
                self.advance();
            }
            String::new()
        }
    }

    fn parse_required_expr(&mut self, handler: &mut ErrorHandler, err: ParseErrorKind) -> Expr {
        if self.looks_like_expr_start() {
            self.parse_expr(handler)
        } else {
            handler.add_parser_error(ParseError::new(err, self.position()));
            Expr::Null
        }
    }

    // ---- top level ----

    fn parse_program(&mut self, handler: &mut ErrorHandler) -> Program {
        let mut functions = HashMap::new();
        while !self.check(&TokenKind::Eof) {
            let (name, def) = self.parse_func_def(handler);
            if functions.contains_key(&name) {
                handler.add_parser_error(ParseError::new(
                    ParseErrorKind::FunctionAlreadyExists { name: name.clone() },
                    def.position,
                ));
            } else {
                functions.insert(name, def);
            }
        }
        Program { functions }
    }

    fn parse_func_def(&mut self, handler: &mut ErrorHandler) -> (String, FunctionDef) {
        let position = self.position();
        let name = self.expect_identifier(ParseErrorKind::MissingExpression, handler);
        self.expect(TokenKind::LParen, ParseErrorKind::MissingOpeningBracket, handler);
        let mut parameters = Vec::new();
        if !self.check(&TokenKind::RParen) {
            parameters.push(self.parse_parameter(handler));
            while self.matches(&TokenKind::Comma) {
                parameters.push(self.parse_parameter(handler));
            }
        }
        self.expect(TokenKind::RParen, ParseErrorKind::MissingClosingBracket, handler);

        let mut seen = HashSet::new();
        for param in &parameters {
            if !seen.insert(param.name.clone()) {
                handler.add_parser_error(ParseError::new(
                    ParseErrorKind::ParameterAlreadyExists {
                        name: param.name.clone(),
                    },
                    param.position,
                ));
            }
        }

        let block = self.parse_block(handler);
        (name, FunctionDef { parameters, block, position })
    }

    fn parse_parameter(&mut self, handler: &mut ErrorHandler) -> Parameter {
        let position = self.position();
        let name = self.expect_identifier(ParseErrorKind::MissingParameter, handler);
        let mut is_optional = false;
        let mut default = None;
        if self.matches(&TokenKind::Question) {
            is_optional = true;
            if self.matches(&TokenKind::Assign) {
                default = Some(self.parse_default_value(handler));
            }
        }
        Parameter {
            name,
            is_optional,
            default,
            position,
        }
    }

    fn parse_default_value(&mut self, handler: &mut ErrorHandler) -> Expr {
        match self.peek_kind().clone() {
            TokenKind::Int(n) => {
                self.advance();
                Expr::Int(n)
            }
            TokenKind::Float(n) => {
                self.advance();
                Expr::Float(n)
            }
            TokenKind::String(s) => {
                self.advance();
                Expr::String(s)
            }
            TokenKind::True => {
                self.advance();
                Expr::Bool(true)
            }
            TokenKind::False => {
                self.advance();
                Expr::Bool(false)
            }
            TokenKind::Null => {
                self.advance();
                Expr::Null
            }
            TokenKind::Identifier(_) => self.parse_access_expr(handler),
            _ => {
                handler.add_parser_error(ParseError::new(
                    ParseErrorKind::InvalidParameterValue,
                    self.position(),
                ));
                if !matches!(self.peek_kind(), TokenKind::Eof) {
                    self.advance();
                }
                Expr::Null
            }
        }
    }

    // ---- statements ----

    fn parse_block(&mut self, handler: &mut ErrorHandler) -> Block {
        self.expect(TokenKind::LBrace, ParseErrorKind::MissingBlockStart, handler);
        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.check(&TokenKind::Eof) {
            statements.push(self.parse_statement(handler));
        }
        self.expect(TokenKind::RBrace, ParseErrorKind::MissingBlockEnd, handler);
        Block { statements }
    }

    fn parse_statement(&mut self, handler: &mut ErrorHandler) -> Stmt {
        match self.peek_kind() {
            TokenKind::If => self.parse_if(handler),
            TokenKind::While => self.parse_while(handler),
            TokenKind::For => self.parse_for(handler),
            TokenKind::Return => self.parse_return(handler),
            TokenKind::Try => self.parse_try(handler),
            TokenKind::Throw => self.parse_throw(handler),
            TokenKind::Break => {
                let position = self.position();
                self.advance();
                self.expect(TokenKind::Semicolon, ParseErrorKind::MissingSemicolon, handler);
                Stmt::Break(position)
            }
            TokenKind::Continue => {
                let position = self.position();
                self.advance();
                self.expect(TokenKind::Semicolon, ParseErrorKind::MissingSemicolon, handler);
                Stmt::Continue(position)
            }
            _ => self.parse_expr_or_assign_stmt(handler),
        }
    }

    fn parse_if(&mut self, handler: &mut ErrorHandler) -> Stmt {
        let position = self.position();
        self.advance();
        self.expect(TokenKind::LParen, ParseErrorKind::MissingOpeningBracket, handler);
        let condition = self.parse_required_expr(handler, ParseErrorKind::MissingConditionalExpression);
        self.expect(TokenKind::RParen, ParseErrorKind::MissingClosingBracket, handler);
        let block = self.parse_block(handler);

        let mut elifs = Vec::new();
        while self.check(&TokenKind::Elif) {
            let elif_position = self.position();
            self.advance();
            self.expect(TokenKind::LParen, ParseErrorKind::MissingOpeningBracket, handler);
            let condition =
                self.parse_required_expr(handler, ParseErrorKind::MissingConditionalExpression);
            self.expect(TokenKind::RParen, ParseErrorKind::MissingClosingBracket, handler);
            let elif_block = self.parse_block(handler);
            elifs.push(ElifClause {
                condition,
                block: elif_block,
                position: elif_position,
            });
        }

        let else_block = if self.matches(&TokenKind::Else) {
            Some(self.parse_block(handler))
        } else {
            None
        };

        Stmt::If {
            condition,
            block,
            elifs,
            else_block,
            position,
        }
    }

    fn parse_while(&mut self, handler: &mut ErrorHandler) -> Stmt {
        let position = self.position();
        self.advance();
        self.expect(TokenKind::LParen, ParseErrorKind::MissingOpeningBracket, handler);
        let condition = self.parse_required_expr(handler, ParseErrorKind::MissingConditionalExpression);
        self.expect(TokenKind::RParen, ParseErrorKind::MissingClosingBracket, handler);
        let block = self.parse_block(handler);
        Stmt::While { condition, block, position }
    }

    fn parse_for(&mut self, handler: &mut ErrorHandler) -> Stmt {
        let position = self.position();
        self.advance();
        self.expect(TokenKind::LParen, ParseErrorKind::MissingOpeningBracket, handler);
        let variable = self.expect_identifier(ParseErrorKind::MissingForLoopVariable, handler);
        self.expect(TokenKind::Colon, ParseErrorKind::MissingForLoopColon, handler);
        let iterable = if matches!(self.peek_kind(), TokenKind::Identifier(_)) {
            self.parse_access_expr(handler)
        } else {
            handler.add_parser_error(ParseError::new(
                ParseErrorKind::MissingForLoopIterable,
                self.position(),
            ));
            Expr::Null
        };
        self.expect(TokenKind::RParen, ParseErrorKind::MissingClosingBracket, handler);
        let block = self.parse_block(handler);
        Stmt::For {
            variable,
            iterable,
            block,
            position,
        }
    }

    fn parse_return(&mut self, handler: &mut ErrorHandler) -> Stmt {
        let position = self.position();
        self.advance();
        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr(handler))
        };
        self.expect(TokenKind::Semicolon, ParseErrorKind::MissingSemicolon, handler);
        Stmt::Return { value, position }
    }

    fn parse_try(&mut self, handler: &mut ErrorHandler) -> Stmt {
        let position = self.position();
        self.advance();
        let try_block = self.parse_block(handler);
        let mut catches = Vec::new();
        while self.check(&TokenKind::Catch) {
            catches.push(self.parse_catch_clause(handler));
        }
        if catches.is_empty() {
            handler.add_parser_error(ParseError::new(ParseErrorKind::MissingCatchKeyword, self.position()));
        }
        Stmt::TryCatch {
            try_block,
            catches,
            position,
        }
    }

    fn parse_catch_clause(&mut self, handler: &mut ErrorHandler) -> CatchClause {
        self.advance(); // 'catch'
        let mut error_types = Vec::new();
        let mut error_var = None;
        if self.matches(&TokenKind::LParen) {
            error_types.push(self.expect_identifier(ParseErrorKind::MissingErrorType, handler));
            while self.matches(&TokenKind::Or) {
                error_types.push(self.expect_identifier(ParseErrorKind::MissingErrorType, handler));
            }
            if let TokenKind::Identifier(name) = self.peek_kind().clone() {
                self.advance();
                error_var = Some(name);
            } else {
                handler.add_parser_error(ParseError::new(
                    ParseErrorKind::MissingErrorVariable,
                    self.position(),
                ));
            }
            self.expect(TokenKind::RParen, ParseErrorKind::MissingClosingBracket, handler);
        }
        let block = self.parse_block(handler);
        CatchClause {
            error_types,
            error_var,
            block,
        }
    }

    fn parse_throw(&mut self, handler: &mut ErrorHandler) -> Stmt {
        let position = self.position();
        self.advance();
        let value = self.parse_ident_or_call(handler);
        self.expect(TokenKind::Semicolon, ParseErrorKind::MissingSemicolon, handler);
        Stmt::Throw { value, position }
    }

    fn parse_expr_or_assign_stmt(&mut self, handler: &mut ErrorHandler) -> Stmt {
        let target = self.parse_access_expr(handler);
        let position = target.position();
        let op = match self.peek_kind() {
            TokenKind::Assign => Some(AssignOp::Assign),
            TokenKind::PlusAssign => Some(AssignOp::AddAssign),
            TokenKind::MinusAssign => Some(AssignOp::SubAssign),
            TokenKind::StarAssign => Some(AssignOp::MulAssign),
            TokenKind::SlashAssign => Some(AssignOp::DivAssign),
            TokenKind::PercentAssign => Some(AssignOp::ModAssign),
            _ => None,
        };
        let stmt = if let Some(op) = op {
            self.advance();
            let value = self.parse_expr(handler);
            Stmt::Assign {
                target,
                op,
                value,
                position,
            }
        } else {
            Stmt::Expr(target)
        };
        self.expect(TokenKind::Semicolon, ParseErrorKind::MissingSemicolon, handler);
        stmt
    }

    // ---- expressions, low to high precedence ----

    fn parse_expr(&mut self, handler: &mut ErrorHandler) -> Expr {
        self.parse_or(handler)
    }

    fn parse_or(&mut self, handler: &mut ErrorHandler) -> Expr {
        let mut left = self.parse_and(handler);
        while self.check(&TokenKind::Or) {
            let position = self.position();
            self.advance();
            let right = self.parse_and(handler);
            left = Expr::Binary {
                op: BinOp::Or,
                left: Box::new(left),
                right: Box::new(right),
                position,
            };
        }
        left
    }

    fn parse_and(&mut self, handler: &mut ErrorHandler) -> Expr {
        let mut left = self.parse_comparison(handler);
        while self.check(&TokenKind::And) {
            let position = self.position();
            self.advance();
            let right = self.parse_comparison(handler);
            left = Expr::Binary {
                op: BinOp::And,
                left: Box::new(left),
                right: Box::new(right),
                position,
            };
        }
        left
    }

    fn parse_comparison(&mut self, handler: &mut ErrorHandler) -> Expr {
        let mut left = self.parse_addition(handler);
        loop {
            let op = match self.peek_kind() {
                TokenKind::Equal => BinOp::Eq,
                TokenKind::NotEqual => BinOp::NotEq,
                TokenKind::Greater => BinOp::Gt,
                TokenKind::GreaterEqual => BinOp::GtEq,
                TokenKind::Less => BinOp::Lt,
                TokenKind::LessEqual => BinOp::LtEq,
                _ => break,
            };
            let position = self.position();
            self.advance();
            let right = self.parse_addition(handler);
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position,
            };
        }
        left
    }

    fn parse_addition(&mut self, handler: &mut ErrorHandler) -> Expr {
        let mut left = self.parse_multiplication(handler);
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let position = self.position();
            self.advance();
            let right = self.parse_multiplication(handler);
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position,
            };
        }
        left
    }

    fn parse_multiplication(&mut self, handler: &mut ErrorHandler) -> Expr {
        let mut left = self.parse_unary(handler);
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            let position = self.position();
            self.advance();
            let right = self.parse_unary(handler);
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position,
            };
        }
        left
    }

    /// `unary := ("!"|"-") expr | typeCheck` -- a unary operator wraps a
    /// full expression, not just another unary, matching the source
    /// grammar exactly.
    fn parse_unary(&mut self, handler: &mut ErrorHandler) -> Expr {
        if self.check(&TokenKind::Not) {
            let position = self.position();
            self.advance();
            let expr = self.parse_expr(handler);
            Expr::BitwiseNegation {
                expr: Box::new(expr),
                position,
            }
        } else if self.check(&TokenKind::Minus) {
            let position = self.position();
            self.advance();
            let expr = self.parse_expr(handler);
            Expr::NumericNegation {
                expr: Box::new(expr),
                position,
            }
        } else {
            self.parse_type_check(handler)
        }
    }

    fn parse_type_check(&mut self, handler: &mut ErrorHandler) -> Expr {
        let expr = self.parse_primary(handler);
        if self.check(&TokenKind::Is) {
            let position = self.position();
            self.advance();
            let type_name = self.expect_identifier(ParseErrorKind::MissingTypeName, handler);
            Expr::TypeCheck {
                expr: Box::new(expr),
                type_name,
                position,
            }
        } else {
            expr
        }
    }

    fn parse_primary(&mut self, handler: &mut ErrorHandler) -> Expr {
        match self.peek_kind().clone() {
            TokenKind::Int(n) => {
                self.advance();
                Expr::Int(n)
            }
            TokenKind::Float(n) => {
                self.advance();
                Expr::Float(n)
            }
            TokenKind::String(s) => {
                self.advance();
                Expr::String(s)
            }
            TokenKind::True => {
                self.advance();
                Expr::Bool(true)
            }
            TokenKind::False => {
                self.advance();
                Expr::Bool(false)
            }
            TokenKind::Null => {
                self.advance();
                Expr::Null
            }
            TokenKind::Identifier(_) => self.parse_access_expr(handler),
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr(handler);
                self.expect(TokenKind::RParen, ParseErrorKind::MissingClosingBracket, handler);
                expr
            }
            _ => {
                handler.add_parser_error(ParseError::new(ParseErrorKind::MissingExpression, self.position()));
                if !matches!(self.peek_kind(), TokenKind::Eof) {
                    self.advance();
                }
                Expr::Null
            }
        }
    }

    fn parse_access_expr(&mut self, handler: &mut ErrorHandler) -> Expr {
        let mut expr = self.parse_ident_or_call(handler);
        loop {
            let optional = match self.peek_kind() {
                TokenKind::Dot => false,
                TokenKind::OptionalDot => true,
                _ => break,
            };
            let position = self.position();
            self.advance();
            let property = self.parse_ident_or_call(handler);
            expr = Expr::PropertyAccess {
                target: Box::new(expr),
                property: Box::new(property),
                optional,
                position,
            };
        }
        expr
    }

    fn parse_ident_or_call(&mut self, handler: &mut ErrorHandler) -> Expr {
        let position = self.position();
        let name = self.expect_identifier(ParseErrorKind::MissingExpression, handler);
        if self.matches(&TokenKind::LParen) {
            let mut args = Vec::new();
            if !self.check(&TokenKind::RParen) {
                args.push(self.parse_argument(handler));
                while self.matches(&TokenKind::Comma) {
                    args.push(self.parse_argument(handler));
                }
            }
            self.expect(TokenKind::RParen, ParseErrorKind::MissingClosingBracket, handler);
            Expr::FunctionCall { name, args, position }
        } else {
            Expr::Identifier { name, position }
        }
    }

    fn parse_argument(&mut self, handler: &mut ErrorHandler) -> Argument {
        let is_reference = self.matches(&TokenKind::At);
        if !self.looks_like_expr_start() {
            handler.add_parser_error(ParseError::new(ParseErrorKind::MissingArgument, self.position()));
            return Argument {
                value: Expr::Null,
                is_reference,
            };
        }
        let value = self.parse_expr(handler);
        Argument { value, is_reference }
    }
}
