//! Evaluates a parsed node tree against data.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use crate::error::TemplateError;
use crate::funcs::{is_true, type_name};
use crate::parse::{Expr, Node};

static NULL: Value = Value::Null;

/// Writes the output of `nodes` evaluated against `data` into `out`.
pub(crate) fn execute<W: fmt::Write>(
    name: &str,
    nodes: &[Node],
    out: &mut W,
    data: &Value,
) -> Result<(), TemplateError> {
    let mut state = State {
        name,
        out,
        root: data,
    };
    state.walk(data, nodes)
}

struct State<'a, W> {
    name: &'a str,
    out: &'a mut W,
    root: &'a Value,
}

impl<W: fmt::Write> State<'_, W> {
    fn error(&self, line: usize, message: impl Into<String>) -> TemplateError {
        TemplateError::Exec {
            name: self.name.to_string(),
            line,
            message: message.into(),
        }
    }

    fn walk(&mut self, dot: &Value, nodes: &[Node]) -> Result<(), TemplateError> {
        for node in nodes {
            match node {
                Node::Text(text) => self.write(0, text)?,
                Node::Action { line, expr } => {
                    let value = self.eval(*line, dot, expr)?;
                    let printed = print_value(&value);
                    self.write(*line, &escape_html(&printed))?;
                }
                Node::If {
                    branches,
                    otherwise,
                } => {
                    let mut chosen = otherwise;
                    for branch in branches {
                        if is_true(&self.eval(branch.line, dot, &branch.cond)?) {
                            chosen = &branch.body;
                            break;
                        }
                    }
                    self.walk(dot, chosen)?;
                }
            }
        }
        Ok(())
    }

    fn write(&mut self, line: usize, s: &str) -> Result<(), TemplateError> {
        self.out
            .write_str(s)
            .map_err(|_| self.error(line, "failed to write output"))
    }

    fn eval(&self, line: usize, dot: &Value, expr: &Expr) -> Result<Value, TemplateError> {
        match expr {
            Expr::Dot => Ok(dot.clone()),
            Expr::Field { from_root, path } => {
                let base = if *from_root { self.root } else { dot };
                lookup(base, path)
                    .cloned()
                    .map_err(|message| self.error(line, message))
            }
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Call { func, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.eval(line, dot, arg))
                    .collect::<Result<Vec<_>, _>>()?;
                func.call(&args)
                    .map_err(|message| self.error(line, format!("error calling {}: {message}", func.name())))
            }
        }
    }
}

/// Follows a field path. A missing map key yields null; going further
/// through null, or into a non-map value, is an error.
fn lookup<'v>(base: &'v Value, path: &[String]) -> Result<&'v Value, String> {
    let mut current = base;
    for (i, field) in path.iter().enumerate() {
        current = match current {
            Value::Object(map) => map.get(field).unwrap_or(&NULL),
            Value::Null => {
                return Err(format!(
                    "nil pointer evaluating .{}",
                    path[..=i].join(".")
                ))
            }
            other => {
                return Err(format!(
                    "can't evaluate field {field} in type {}",
                    type_name(other)
                ))
            }
        };
    }
    Ok(current)
}

/// Formats a value for output. Null prints nothing at the top level.
fn print_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(print_nested).collect();
            format!("[{}]", items.join(" "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{k}:{}", print_nested(v)))
                .collect();
            format!("map[{}]", entries.join(" "))
        }
    }
}

fn print_nested(value: &Value) -> String {
    match value {
        Value::Null => "<nil>".to_string(),
        other => print_value(other),
    }
}

/// Escapes text for HTML element content and quoted attributes.
pub(crate) fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'', '+', '\0']) {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            '+' => escaped.push_str("&#43;"),
            '\0' => escaped.push('\u{FFFD}'),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
