//! Builds the node tree from tokens.

use serde_json::{Number, Value};

use crate::funcs::Func;
use crate::lex::{lex, SyntaxError, Token, TokenKind};

/// A node of a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Text(String),
    /// `{{ expr }}`
    Action { line: usize, expr: Expr },
    /// `{{if a}} .. {{else if b}} .. {{else}} otherwise {{end}}`, with one
    /// branch per `if` and `else if`.
    If {
        branches: Vec<Branch>,
        otherwise: Vec<Node>,
    },
}

/// One guarded body of an [`Node::If`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Branch {
    pub(crate) line: usize,
    pub(crate) cond: Expr,
    pub(crate) body: Vec<Node>,
}

/// How deeply `if` blocks and parenthesized pipelines may nest.
pub(crate) const MAX_DEPTH: usize = 100;

/// An evaluable expression.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    /// `.`
    Dot,
    /// `.A.B` from the current data, or `$.A.B` / `$` from the root.
    Field { from_root: bool, path: Vec<String> },
    Literal(Value),
    Call { func: Func, args: Vec<Expr> },
}

/// Parses template source into a node list.
pub(crate) fn parse(source: &str) -> Result<Vec<Node>, SyntaxError> {
    let tokens = lex(source)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let (nodes, end) = parser.parse_list()?;
    match end {
        ListEnd::Eof => Ok(nodes),
        ListEnd::Else(line) => Err(SyntaxError::new(line, "unexpected {{else}}")),
        ListEnd::End(line) => Err(SyntaxError::new(line, "unexpected {{end}}")),
    }
}

/// What stopped [`Parser::parse_list`].
enum ListEnd {
    Eof,
    /// `{{else`, the rest of the action is left unread.
    Else(usize),
    /// `{{end}}`
    End(usize),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Keyword {
    If,
    Else,
    End,
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn enter(&mut self, line: usize) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(SyntaxError::new(
                line,
                format!("exceeded maximum template depth ({MAX_DEPTH})"),
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the next token. [`TokenKind::Eof`] is returned forever at the end.
    fn next(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn peek_keyword(&self) -> Option<Keyword> {
        match &self.peek().kind {
            TokenKind::Ident(word) => match word.as_str() {
                "if" => Some(Keyword::If),
                "else" => Some(Keyword::Else),
                "end" => Some(Keyword::End),
                _ => None,
            },
            _ => None,
        }
    }

    fn expect_right_delim(&mut self, context: &str) -> Result<(), SyntaxError> {
        let token = self.next();
        match token.kind {
            TokenKind::RightDelim => Ok(()),
            other => Err(SyntaxError::new(
                token.line,
                format!("unexpected {other} in {context}"),
            )),
        }
    }

    fn parse_list(&mut self) -> Result<(Vec<Node>, ListEnd), SyntaxError> {
        let mut nodes = Vec::new();
        loop {
            let token = self.next();
            match token.kind {
                TokenKind::Text(text) => nodes.push(Node::Text(text)),
                TokenKind::LeftDelim => match self.peek_keyword() {
                    Some(Keyword::If) => {
                        self.next();
                        nodes.push(self.parse_if(token.line)?);
                    }
                    Some(Keyword::Else) => {
                        self.next();
                        return Ok((nodes, ListEnd::Else(token.line)));
                    }
                    Some(Keyword::End) => {
                        self.next();
                        self.expect_right_delim("end")?;
                        return Ok((nodes, ListEnd::End(token.line)));
                    }
                    None => {
                        let expr = self.parse_command("command")?;
                        self.expect_right_delim("command")?;
                        nodes.push(Node::Action {
                            line: token.line,
                            expr,
                        });
                    }
                },
                TokenKind::Eof => return Ok((nodes, ListEnd::Eof)),
                other => {
                    return Err(SyntaxError::new(
                        token.line,
                        format!("unexpected {other} outside action"),
                    ))
                }
            }
        }
    }

    /// Parses the rest of an `if` after the keyword, up to and including the
    /// matching `{{end}}`. `else if` arms extend the same node.
    fn parse_if(&mut self, line: usize) -> Result<Node, SyntaxError> {
        self.enter(line)?;
        let mut branches = Vec::new();
        let mut branch_line = line;
        let otherwise = loop {
            let cond = self.parse_command("if")?;
            self.expect_right_delim("if")?;
            let (body, end) = self.parse_list()?;
            branches.push(Branch {
                line: branch_line,
                cond,
                body,
            });
            match end {
                ListEnd::End(_) => break Vec::new(),
                ListEnd::Else(else_line) if self.peek_keyword() == Some(Keyword::If) => {
                    self.next();
                    branch_line = else_line;
                }
                ListEnd::Else(_) => {
                    self.expect_right_delim("else")?;
                    let (otherwise, end) = self.parse_list()?;
                    match end {
                        ListEnd::End(_) => break otherwise,
                        ListEnd::Else(line) => {
                            return Err(SyntaxError::new(line, "expected {{end}}; found {{else}}"))
                        }
                        ListEnd::Eof => return Err(unclosed_if(line)),
                    }
                }
                ListEnd::Eof => return Err(unclosed_if(line)),
            }
        };
        self.leave();
        Ok(Node::If {
            branches,
            otherwise,
        })
    }

    /// Parses one command: a single operand, or a function name followed by
    /// its arguments. Stops before `}}` or `)`.
    fn parse_command(&mut self, context: &str) -> Result<Expr, SyntaxError> {
        let line = self.peek().line;
        let func = if let TokenKind::Ident(name) = &self.peek().kind {
            let func = Func::lookup(name).ok_or_else(|| {
                SyntaxError::new(line, format!("function {name:?} not defined"))
            })?;
            Some(func)
        } else {
            None
        };
        if func.is_some() {
            self.next();
        }

        let mut operands = Vec::new();
        while !matches!(
            self.peek().kind,
            TokenKind::RightDelim | TokenKind::RParen | TokenKind::Eof
        ) {
            operands.push(self.parse_operand()?);
        }

        if let Some(func) = func {
            func.check_arity(operands.len())
                .map_err(|message| SyntaxError::new(line, message))?;
            return Ok(Expr::Call {
                func,
                args: operands,
            });
        }

        let mut operands = operands.into_iter();
        match (operands.next(), operands.next()) {
            (Some(expr), None) => Ok(expr),
            (None, _) => Err(SyntaxError::new(
                line,
                format!("missing value for {context}"),
            )),
            (Some(_), Some(_)) => Err(SyntaxError::new(
                line,
                "can't give argument to non-function",
            )),
        }
    }

    fn parse_operand(&mut self) -> Result<Expr, SyntaxError> {
        let token = self.next();
        let line = token.line;
        match token.kind {
            TokenKind::Dot => Ok(Expr::Dot),
            TokenKind::Field(path) => Ok(Expr::Field {
                from_root: false,
                path,
            }),
            TokenKind::Variable { name, fields } if name == "$" => Ok(Expr::Field {
                from_root: true,
                path: fields,
            }),
            TokenKind::Variable { name, .. } => Err(SyntaxError::new(
                line,
                format!("undefined variable {name:?}"),
            )),
            TokenKind::Str(s) => Ok(Expr::Literal(Value::String(s))),
            TokenKind::Int(i) => Ok(Expr::Literal(Value::from(i))),
            TokenKind::Float(f) => Number::from_f64(f)
                .map(|n| Expr::Literal(Value::Number(n)))
                .ok_or_else(|| SyntaxError::new(line, format!("number out of range: {f}"))),
            TokenKind::Bool(b) => Ok(Expr::Literal(Value::Bool(b))),
            TokenKind::Nil => Ok(Expr::Literal(Value::Null)),
            TokenKind::LParen => {
                self.enter(line)?;
                let expr = self.parse_command("parenthesized pipeline")?;
                let close = self.next();
                match close.kind {
                    TokenKind::RParen => {
                        self.leave();
                        Ok(expr)
                    }
                    _ => Err(SyntaxError::new(close.line, "unclosed left paren")),
                }
            }
            TokenKind::Ident(name) => Err(SyntaxError::new(
                line,
                format!("function {name:?} must start a command; wrap the call in parentheses"),
            )),
            other => Err(SyntaxError::new(line, format!("unexpected {other} in operand"))),
        }
    }
}

fn unclosed_if(line: usize) -> SyntaxError {
    SyntaxError::new(line, "unexpected EOF: {{if}} is never closed with {{end}}")
}
