use serde::{Deserialize, Serialize};

/// Parsed expression tree for one `{{…}}` occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    /// Quoted string literal
    String { value: String },

    /// Numeric literal
    Number { value: f64 },

    /// Boolean literal
    Bool { value: bool },

    /// Parameter reference, possibly dotted (`user.address.city`)
    KeyRef { path: Vec<String> },

    /// Unary operation
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Binary operation
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// `cond ? then : else`
    Ternary {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
}

impl Expr {
    pub fn string(value: impl Into<String>) -> Self {
        Expr::String {
            value: value.into(),
        }
    }

    pub fn number(value: f64) -> Self {
        Expr::Number { value }
    }

    pub fn key(name: impl Into<String>) -> Self {
        Expr::KeyRef {
            path: vec![name.into()],
        }
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    StrictEq,
    StrictNotEq,
    LooseEq,
    LooseNotEq,
    GreaterThanOrEqual,
    LessThanOrEqual,
    GreaterThan,
    LessThan,
    Or,
    And,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNotEq => "!==",
            BinaryOp::LooseEq => "==",
            BinaryOp::LooseNotEq => "!=",
            BinaryOp::GreaterThanOrEqual => ">=",
            BinaryOp::LessThanOrEqual => "<=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::LessThan => "<",
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
}
