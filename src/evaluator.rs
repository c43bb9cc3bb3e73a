use std::collections::HashSet;

use crate::environment::Environment;
use crate::types::{Expr, Lambda};

/// Evaluates an expression tree against an environment.
///
/// This is a total function over `Expr`: every failure path returns an
/// `Expr::Error` value instead of panicking or returning `Err`. An error
/// produced by a subexpression is just a value in its parent context; a
/// surrounding operator will fail its own type check on it and report a
/// fresh (possibly more generic) error.
pub fn evaluate(expr: &Expr, env: &mut Environment) -> Expr {
    match expr {
        Expr::Integer(_)
        | Expr::Boolean(_)
        | Expr::Lambda(_)
        | Expr::Void
        | Expr::Null
        | Expr::Error(_) => expr.clone(),
        // An unbound symbol outside call position is a null result, not an
        // error. Only call position turns absence into an Error.
        Expr::Symbol(name) => env.get(name).cloned().unwrap_or(Expr::Null),
        Expr::List(items) => evaluate_list(items, env),
    }
}

fn evaluate_list(items: &[Expr], env: &mut Environment) -> Expr {
    if let Some(Expr::Symbol(head)) = items.first() {
        return match head.as_str() {
            "+" | "-" | "*" | "/" | "<" | ">" | "=" | "!=" => {
                evaluate_operator(head, items, env)
            }
            "define" => evaluate_define(items, env),
            "if" => evaluate_if(items, env),
            "lambda" => evaluate_lambda(items),
            _ => evaluate_call(head, items, env),
        };
    }

    // Data list: evaluate every item in order, dropping definition results.
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        match evaluate(item, env) {
            Expr::Void => continue,
            value => result.push(value),
        }
    }
    Expr::List(result)
}

// Evaluates the next operand or returns an Error naming the operator.
macro_rules! expect_integer {
    ($operator:expr, $operand:expr, $env:expr) => {
        match evaluate($operand, $env) {
            Expr::Integer(n) => n,
            other => {
                return Expr::error(format!(
                    "'{}' expects integer operands, got {}",
                    $operator,
                    other.type_name()
                ));
            }
        }
    };
}

fn evaluate_operator(operator: &str, items: &[Expr], env: &mut Environment) -> Expr {
    if items.len() < 3 {
        return Expr::error(format!(
            "'{}' expects at least 2 operands, got {}",
            operator,
            items.len() - 1
        ));
    }
    match operator {
        "+" => {
            let mut sum = 0i64;
            for item in &items[1..] {
                sum = sum.wrapping_add(expect_integer!(operator, item, env));
            }
            Expr::Integer(sum)
        }
        "*" => {
            let mut product = 1i64;
            for item in &items[1..] {
                product = product.wrapping_mul(expect_integer!(operator, item, env));
            }
            Expr::Integer(product)
        }
        "-" => {
            let mut acc = expect_integer!(operator, &items[1], env);
            for item in &items[2..] {
                acc = acc.wrapping_sub(expect_integer!(operator, item, env));
            }
            Expr::Integer(acc)
        }
        "/" => {
            let mut acc = expect_integer!(operator, &items[1], env);
            for item in &items[2..] {
                let divisor = expect_integer!(operator, item, env);
                // checked_div also catches the i64::MIN / -1 overflow fault
                acc = match acc.checked_div(divisor) {
                    Some(quotient) => quotient,
                    None if divisor == 0 => return Expr::error("division by zero"),
                    None => return Expr::error("integer overflow in division"),
                };
            }
            Expr::Integer(acc)
        }
        _ => {
            // Comparisons are strictly binary: exactly the first two
            // operands are evaluated and any extras are ignored.
            let left = expect_integer!(operator, &items[1], env);
            let right = expect_integer!(operator, &items[2], env);
            let result = match operator {
                "<" => left < right,
                ">" => left > right,
                "=" => left == right,
                "!=" => left != right,
                _ => unreachable!("form dispatch only routes known operators here"),
            };
            Expr::Boolean(result)
        }
    }
}

/// `(define name value)` — evaluates the value in the current environment
/// and binds it there. The only form that mutates an environment.
fn evaluate_define(items: &[Expr], env: &mut Environment) -> Expr {
    let [_, target, value] = items else {
        return Expr::error(format!(
            "'define' expects a symbol and a value, got {} arguments",
            items.len() - 1
        ));
    };
    // A non-symbol target binds nothing; the value is not even evaluated.
    let Expr::Symbol(name) = target else {
        return Expr::Void;
    };
    let value = evaluate(value, env);
    env.define(name.clone(), value);
    Expr::Void
}

/// `(if condition consequent alternate)` — exactly one branch is evaluated.
fn evaluate_if(items: &[Expr], env: &mut Environment) -> Expr {
    let [_, condition, consequent, alternate] = items else {
        return Expr::error(format!(
            "'if' expects a condition and two branches, got {} arguments",
            items.len() - 1
        ));
    };
    match evaluate(condition, env) {
        Expr::Boolean(true) => evaluate(consequent, env),
        Expr::Boolean(false) => evaluate(alternate, env),
        other => Expr::error(format!(
            "'if' condition must be a boolean, got {}",
            other.type_name()
        )),
    }
}

/// `(lambda (params...) body)` — captures parameter names and the
/// unevaluated body. Does NOT capture the defining environment.
fn evaluate_lambda(items: &[Expr]) -> Expr {
    let [_, params, body] = items else {
        return Expr::error(format!(
            "'lambda' expects a parameter list and a body, got {} arguments",
            items.len() - 1
        ));
    };
    let Expr::List(params) = params else {
        return Expr::error(format!(
            "'lambda' parameters must be a list, got {}",
            params.type_name()
        ));
    };
    let mut names = Vec::with_capacity(params.len());
    for param in params {
        match param {
            Expr::Symbol(name) => names.push(name.clone()),
            other => {
                return Expr::error(format!(
                    "'lambda' parameters must all be symbols, got {}",
                    other.type_name()
                ));
            }
        }
    }
    let Expr::List(body) = body else {
        return Expr::error(format!(
            "'lambda' body must be a list, got {}",
            body.type_name()
        ));
    };
    Expr::Lambda(Lambda {
        params: names,
        body: body.clone(),
    })
}

fn evaluate_call(name: &str, items: &[Expr], env: &mut Environment) -> Expr {
    let lambda = match env.get(name) {
        Some(Expr::Lambda(lambda)) => lambda.clone(),
        Some(other) => {
            return Expr::error(format!(
                "'{}' is not callable, it is bound to a {}",
                name,
                other.type_name()
            ));
        }
        None => return Expr::error(format!("undefined function '{}'", name)),
    };
    let arguments = &items[1..];
    if arguments.len() < lambda.params.len() {
        return Expr::error(format!(
            "'{}' expects {} arguments, got {}",
            name,
            lambda.params.len(),
            arguments.len()
        ));
    }
    // The call scope is one clone of the caller's bindings; arguments are
    // evaluated against the caller's own environment and bound into the
    // clone. Excess arguments are ignored.
    let mut scope = env.clone();
    for (param, argument) in lambda.params.iter().zip(arguments) {
        let value = evaluate(argument, env);
        scope.define(param.clone(), value);
    }
    evaluate_list(&lambda.body, &mut scope)
}

/// Names handled by form dispatch, for completion in the REPL.
pub fn special_form_identifiers() -> HashSet<String> {
    ["define", "if", "lambda", "+", "-", "*", "/", "<", ">", "=", "!="]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
