use std::fmt;

/// The single runtime representation for both code and data.
///
/// A parsed program is a tree of `Expr` values, and evaluation maps that
/// tree to another `Expr`. Failures are ordinary `Error` values rather than
/// a separate error channel, so they flow through enclosing expressions the
/// same way any other value does.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer(i64),
    Boolean(bool),
    /// An identifier, resolved by environment lookup at evaluation time.
    Symbol(String),
    /// An unevaluated form, or the result of evaluating a data list.
    List(Vec<Expr>),
    Lambda(Lambda),
    /// The result of a definition; dropped from data-list results.
    Void,
    /// The "no value" result of looking up an unbound symbol outside call
    /// position. Distinct from `Void` and from `Error`.
    Null,
    Error(String),
}

/// A function value: parameter names and an unevaluated body.
///
/// The defining environment is deliberately NOT captured; a call sees a
/// clone of the caller's environment instead. These are not closures.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub params: Vec<String>,
    /// The items of the single list expression forming the body.
    pub body: Vec<Expr>,
}

impl Expr {
    pub fn error(message: impl Into<String>) -> Expr {
        Expr::Error(message.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Expr::Integer(_) => "integer",
            Expr::Boolean(_) => "boolean",
            Expr::Symbol(_) => "symbol",
            Expr::List(_) => "list",
            Expr::Lambda(_) => "lambda",
            Expr::Void => "void",
            Expr::Null => "null",
            Expr::Error(_) => "error",
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Integer(n) => write!(f, "{}", n),
            Expr::Boolean(b) => write!(f, "{}", b),
            Expr::Symbol(s) => write!(f, "{}", s),
            Expr::List(items) => {
                write!(f, "(")?;
                let mut first = true;
                for item in items {
                    if !first {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                    first = false;
                }
                write!(f, ")")
            }
            Expr::Lambda(lambda) => write!(f, "{}", lambda),
            Expr::Void => write!(f, "#<void>"),
            Expr::Null => write!(f, "#<null>"),
            Expr::Error(message) => write!(f, "error: {}", message),
        }
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<lambda ({})>", self.params.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_atoms() {
        assert_eq!(Expr::Integer(42).to_string(), "42");
        assert_eq!(Expr::Integer(-7).to_string(), "-7");
        assert_eq!(Expr::Boolean(true).to_string(), "true");
        assert_eq!(Expr::Symbol("foo".to_string()).to_string(), "foo");
        assert_eq!(Expr::Void.to_string(), "#<void>");
        assert_eq!(Expr::Null.to_string(), "#<null>");
        assert_eq!(Expr::error("oops").to_string(), "error: oops");
    }

    #[test]
    fn test_display_lists() {
        assert_eq!(Expr::List(vec![]).to_string(), "()");
        let nested = Expr::List(vec![
            Expr::Symbol("+".to_string()),
            Expr::Integer(1),
            Expr::List(vec![Expr::Symbol("*".to_string()), Expr::Integer(2)]),
        ]);
        assert_eq!(nested.to_string(), "(+ 1 (* 2))");
    }

    #[test]
    fn test_display_lambda() {
        let lambda = Expr::Lambda(Lambda {
            params: vec!["x".to_string(), "y".to_string()],
            body: vec![Expr::Symbol("x".to_string())],
        });
        assert_eq!(lambda.to_string(), "#<lambda (x y)>");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Expr::Integer(1).type_name(), "integer");
        assert_eq!(Expr::Boolean(false).type_name(), "boolean");
        assert_eq!(Expr::List(vec![]).type_name(), "list");
        assert_eq!(Expr::Null.type_name(), "null");
        assert_eq!(Expr::error("x").type_name(), "error");
    }
}
