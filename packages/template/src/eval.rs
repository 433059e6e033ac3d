//! Expression evaluation over the parameter map.
//!
//! Evaluation follows the permissive semantics of the builder canvas: a
//! missing bare key is null (renders as empty), condition errors coerce to
//! false, and `||` is a fallback chain returning the first non-empty
//! operand. Only genuinely unresolvable operations (a broken dotted path,
//! a non-numeric operand in arithmetic) surface as errors, and the caller
//! turns those into literal text, never a panic.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{TemplateError, TemplateResult};
use sitewright_model::{ParamValue, ParameterMap};
use tracing::debug;

pub fn evaluate(expr: &Expr, parameters: &ParameterMap) -> TemplateResult<ParamValue> {
    match expr {
        Expr::String { value } => Ok(ParamValue::String(value.clone())),
        Expr::Number { value } => Ok(ParamValue::Number(*value)),
        Expr::Bool { value } => Ok(ParamValue::Bool(*value)),
        Expr::KeyRef { path } => evaluate_key_ref(path, parameters),
        Expr::Unary { op, operand } => evaluate_unary(*op, operand, parameters),
        Expr::Binary { left, op, right } => evaluate_binary(left, *op, right, parameters),
        Expr::Ternary {
            condition,
            then_branch,
            else_branch,
        } => {
            let picked = if evaluate_condition(condition, parameters) {
                then_branch
            } else {
                else_branch
            };
            evaluate(picked, parameters)
        }
    }
}

/// Condition position: errors coerce to false instead of propagating, so a
/// half-filled parameter map picks the else branch rather than breaking the
/// render.
pub fn evaluate_condition(expr: &Expr, parameters: &ParameterMap) -> bool {
    match evaluate(expr, parameters) {
        Ok(value) => value.is_truthy(),
        Err(e) => {
            debug!(error = %e, "condition failed to evaluate - treating as false");
            false
        }
    }
}

fn evaluate_key_ref(path: &[String], parameters: &ParameterMap) -> TemplateResult<ParamValue> {
    let (first, rest) = match path.split_first() {
        Some(parts) => parts,
        None => return Ok(ParamValue::Null),
    };
    match parameters.get(first) {
        // A missing bare key is null: renders empty, feeds `||` fallback
        // chains.
        None if rest.is_empty() => Ok(ParamValue::Null),
        None => Err(TemplateError::KeyNotFound {
            path: path.join("."),
        }),
        Some(root) => {
            if rest.is_empty() {
                return Ok(root.clone());
            }
            let segments: Vec<&str> = rest.iter().map(String::as_str).collect();
            root.get_path(&segments)
                .cloned()
                .ok_or_else(|| TemplateError::KeyNotFound {
                    path: path.join("."),
                })
        }
    }
}

fn evaluate_unary(op: UnaryOp, operand: &Expr, parameters: &ParameterMap) -> TemplateResult<ParamValue> {
    match op {
        UnaryOp::Not => Ok(ParamValue::Bool(!evaluate_condition(operand, parameters))),
    }
}

fn evaluate_binary(
    left: &Expr,
    op: BinaryOp,
    right: &Expr,
    parameters: &ParameterMap,
) -> TemplateResult<ParamValue> {
    match op {
        BinaryOp::Or => {
            // Fallback chain: first non-empty/non-null operand wins; a
            // failed left operand just moves the chain along.
            match evaluate(left, parameters) {
                Ok(value) if !value.is_empty_like() => return Ok(value),
                Ok(_) => {}
                Err(e) => debug!(error = %e, "left operand of || failed - falling through"),
            }
            evaluate(right, parameters)
        }
        BinaryOp::And => {
            let lhs = evaluate(left, parameters)?;
            if lhs.is_truthy() {
                evaluate(right, parameters)
            } else {
                Ok(lhs)
            }
        }
        BinaryOp::StrictEq => {
            let (lhs, rhs) = (evaluate(left, parameters)?, evaluate(right, parameters)?);
            Ok(ParamValue::Bool(lhs == rhs))
        }
        BinaryOp::StrictNotEq => {
            let (lhs, rhs) = (evaluate(left, parameters)?, evaluate(right, parameters)?);
            Ok(ParamValue::Bool(lhs != rhs))
        }
        BinaryOp::LooseEq => {
            let (lhs, rhs) = (evaluate(left, parameters)?, evaluate(right, parameters)?);
            Ok(ParamValue::Bool(loose_eq(&lhs, &rhs)))
        }
        BinaryOp::LooseNotEq => {
            let (lhs, rhs) = (evaluate(left, parameters)?, evaluate(right, parameters)?);
            Ok(ParamValue::Bool(!loose_eq(&lhs, &rhs)))
        }
        BinaryOp::GreaterThan
        | BinaryOp::GreaterThanOrEqual
        | BinaryOp::LessThan
        | BinaryOp::LessThanOrEqual => {
            let (lhs, rhs) = (evaluate(left, parameters)?, evaluate(right, parameters)?);
            Ok(ParamValue::Bool(compare(&lhs, op, &rhs)))
        }
        BinaryOp::Add => {
            let (lhs, rhs) = (evaluate(left, parameters)?, evaluate(right, parameters)?);
            match (lhs.as_number(), rhs.as_number()) {
                (Some(a), Some(b)) => Ok(ParamValue::Number(a + b)),
                // Either side non-numeric: concatenate, as the canvas's
                // authors expect from `{{first + ' ' + last}}`.
                _ => Ok(ParamValue::String(format!("{}{}", lhs, rhs))),
            }
        }
        BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide => {
            let (lhs, rhs) = (evaluate(left, parameters)?, evaluate(right, parameters)?);
            let (a, b) = match (lhs.as_number(), rhs.as_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => {
                    return Err(TemplateError::NonNumericOperand {
                        operator: op.symbol().to_string(),
                    })
                }
            };
            // Division by zero follows IEEE float semantics (inf/NaN).
            let result = match op {
                BinaryOp::Subtract => a - b,
                BinaryOp::Multiply => a * b,
                _ => a / b,
            };
            Ok(ParamValue::Number(result))
        }
    }
}

fn loose_eq(lhs: &ParamValue, rhs: &ParamValue) -> bool {
    if let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) {
        return a == b;
    }
    lhs.to_string() == rhs.to_string()
}

fn compare(lhs: &ParamValue, op: BinaryOp, rhs: &ParamValue) -> bool {
    if let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) {
        return match op {
            BinaryOp::GreaterThan => a > b,
            BinaryOp::GreaterThanOrEqual => a >= b,
            BinaryOp::LessThan => a < b,
            BinaryOp::LessThanOrEqual => a <= b,
            _ => false,
        };
    }
    let (a, b) = (lhs.to_string(), rhs.to_string());
    match op {
        BinaryOp::GreaterThan => a > b,
        BinaryOp::GreaterThanOrEqual => a >= b,
        BinaryOp::LessThan => a < b,
        BinaryOp::LessThanOrEqual => a <= b,
        _ => false,
    }
}
