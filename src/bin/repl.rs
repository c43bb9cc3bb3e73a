use std::cell::RefCell;
use std::rc::Rc;

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Cmd, Context, Editor, EventHandler, KeyCode, KeyEvent, Modifiers};
use rustyline::{Completer, Helper, Highlighter, Hinter, Validator};

use emmer::evaluator::special_form_identifiers;
use emmer::{Environment, Expr, TokenKind, evaluate, parse_str, tokenize};

struct SymbolCompleter {
    env: Rc<RefCell<Environment>>,
}

impl rustyline::completion::Completer for SymbolCompleter {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        let tokens = tokenize(&line[..pos]);
        let candidates =
            if let Some(TokenKind::Symbol(prefix)) = tokens.last().map(|t| t.kind.clone()) {
                self.env
                    .borrow()
                    .identifiers()
                    .union(&special_form_identifiers())
                    .filter_map(|id| {
                        if id.starts_with(&prefix) {
                            Some(id[prefix.len()..].to_string())
                        } else {
                            None
                        }
                    })
                    .collect()
            } else {
                vec![]
            };
        Ok((pos, candidates))
    }
}

/// Holds the input open until every '(' has a matching ')', so whole
/// top-level forms are fed to the parser one at a time.
struct FormValidator;

impl Validator for FormValidator {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        let mut depth = 0usize;
        for (i, c) in ctx.input().chars().enumerate() {
            match c {
                '(' => depth += 1,
                ')' => {
                    if depth == 0 {
                        return Ok(ValidationResult::Invalid(Some(format!(
                            "  - Unmatched ')' at position {}",
                            i
                        ))));
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
        if depth > 0 {
            Ok(ValidationResult::Incomplete)
        } else {
            Ok(ValidationResult::Valid(None))
        }
    }
}

#[derive(Completer, Helper, Highlighter, Hinter, Validator)]
struct ReplHelper {
    #[rustyline(Validator)]
    validator: FormValidator,
    #[rustyline(Completer)]
    completer: SymbolCompleter,
}

fn main() -> rustyline::Result<()> {
    println!("emmer REPL v0.1.0");
    println!("Type 'exit' or press Ctrl-D to quit.");

    let env = Rc::new(RefCell::new(Environment::new()));
    let helper = ReplHelper {
        validator: FormValidator,
        completer: SymbolCompleter { env: env.clone() },
    };
    let mut rl = Editor::<ReplHelper, DefaultHistory>::new()?;
    rl.set_helper(Some(helper));
    rl.bind_sequence(
        KeyEvent(KeyCode::Char('s'), Modifiers::CTRL),
        EventHandler::Simple(Cmd::Newline),
    );
    if rl.load_history("emmer_history.txt").is_err() {
        println!("No previous history.");
    }

    loop {
        let readline = rl.readline("emmer> ");
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                let trimmed_input = line.trim();
                if trimmed_input.is_empty() {
                    continue;
                }
                if trimmed_input.eq_ignore_ascii_case("exit") {
                    break;
                }

                match parse_str(trimmed_input) {
                    Ok(expr) => match evaluate(&expr, &mut env.borrow_mut()) {
                        Expr::Void => {}
                        Expr::Error(message) => eprintln!("Error: {}", message),
                        result => println!("{}", result),
                    },
                    Err(parse_err) => parse_err.pretty_print(trimmed_input),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C
                println!("Interrupted. Type 'exit' or Ctrl-D to quit.");
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D
                println!("\nExiting.");
                break;
            }
            Err(err) => {
                eprintln!("Readline Error: {:?}", err);
                break;
            }
        }
    }
    rl.save_history("emmer_history.txt")
}
