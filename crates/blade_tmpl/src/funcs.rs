//! Built-in functions callable from actions.

use std::cmp::Ordering;

use serde_json::Value;

/// A built-in function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Func {
    Not,
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Len,
}

impl Func {
    pub(crate) fn lookup(name: &str) -> Option<Self> {
        let func = match name {
            "not" => Func::Not,
            "and" => Func::And,
            "or" => Func::Or,
            "eq" => Func::Eq,
            "ne" => Func::Ne,
            "lt" => Func::Lt,
            "le" => Func::Le,
            "gt" => Func::Gt,
            "ge" => Func::Ge,
            "len" => Func::Len,
            _ => return None,
        };
        Some(func)
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Func::Not => "not",
            Func::And => "and",
            Func::Or => "or",
            Func::Eq => "eq",
            Func::Ne => "ne",
            Func::Lt => "lt",
            Func::Le => "le",
            Func::Gt => "gt",
            Func::Ge => "ge",
            Func::Len => "len",
        }
    }

    /// Checks the argument count at parse time.
    pub(crate) fn check_arity(self, count: usize) -> Result<(), String> {
        let ok = match self {
            Func::Not | Func::Len => count == 1,
            Func::And | Func::Or => count >= 1,
            Func::Eq => count >= 2,
            Func::Ne | Func::Lt | Func::Le | Func::Gt | Func::Ge => count == 2,
        };
        if ok {
            Ok(())
        } else {
            Err(format!(
                "wrong number of args for {}: got {count}",
                self.name()
            ))
        }
    }

    /// Applies the function to already evaluated arguments.
    pub(crate) fn call(self, args: &[Value]) -> Result<Value, String> {
        self.check_arity(args.len())?;
        let result = match self {
            Func::Not => Value::Bool(!is_true(&args[0])),
            Func::And => args
                .iter()
                .find(|a| !is_true(a))
                .unwrap_or(&args[args.len() - 1])
                .clone(),
            Func::Or => args
                .iter()
                .find(|a| is_true(a))
                .unwrap_or(&args[args.len() - 1])
                .clone(),
            Func::Eq => {
                let mut any = false;
                for other in &args[1..] {
                    if equal(&args[0], other)? {
                        any = true;
                        break;
                    }
                }
                Value::Bool(any)
            }
            Func::Ne => Value::Bool(!equal(&args[0], &args[1])?),
            Func::Lt => Value::Bool(order(&args[0], &args[1])? == Ordering::Less),
            Func::Le => Value::Bool(order(&args[0], &args[1])? != Ordering::Greater),
            Func::Gt => Value::Bool(order(&args[0], &args[1])? == Ordering::Greater),
            Func::Ge => Value::Bool(order(&args[0], &args[1])? != Ordering::Less),
            Func::Len => Value::from(length(&args[0])?),
        };
        Ok(result)
    }
}

/// Truthiness: empty and zero values are false.
pub(crate) fn is_true(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Short type name used in error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "nil",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "slice",
        Value::Object(_) => "map",
    }
}

fn equal(a: &Value, b: &Value) -> Result<bool, String> {
    match (a, b) {
        (Value::Null, Value::Null) => Ok(true),
        (Value::Bool(x), Value::Bool(y)) => Ok(x == y),
        (Value::String(x), Value::String(y)) => Ok(x == y),
        (Value::Number(_), Value::Number(_)) => Ok(compare_numbers(a, b)? == Ordering::Equal),
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => {
            Err(format!(
                "non-comparable types: {} and {}",
                type_name(a),
                type_name(b)
            ))
        }
        _ => Err(format!(
            "incompatible types for comparison: {} and {}",
            type_name(a),
            type_name(b)
        )),
    }
}

fn order(a: &Value, b: &Value) -> Result<Ordering, String> {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => compare_numbers(a, b),
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        _ => Err(format!(
            "invalid types for ordering: {} and {}",
            type_name(a),
            type_name(b)
        )),
    }
}

fn compare_numbers(a: &Value, b: &Value) -> Result<Ordering, String> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return Ok(x.cmp(&y));
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return Ok(x.cmp(&y));
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x
            .partial_cmp(&y)
            .ok_or_else(|| "numbers are not comparable".to_string()),
        _ => Err("numbers are not comparable".to_string()),
    }
}

fn length(value: &Value) -> Result<usize, String> {
    match value {
        Value::String(s) => Ok(s.len()),
        Value::Array(items) => Ok(items.len()),
        Value::Object(map) => Ok(map.len()),
        other => Err(format!("len of type {}", type_name(other))),
    }
}
