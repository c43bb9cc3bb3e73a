use crate::parser::ParseError;
use ariadne::{Label, Report, ReportKind, Source};

impl ParseError {
    /// Renders the error as a source-annotated report on stdout.
    pub fn pretty_print(&self, input: &str) {
        let report = match self {
            ParseError::ExpectedList { found } => {
                Report::build(ReportKind::Error, ("REPL", found.span.to_range()))
                    .with_message(format!("Unexpected token: {}", found.kind))
                    .with_label(
                        Label::new(("REPL", found.span.to_range()))
                            .with_message("Expected '(' to open a form"),
                    )
            }
            ParseError::UnexpectedEof => {
                let idx = input.len();
                Report::build(ReportKind::Error, ("REPL", idx..idx))
                    .with_message("Unexpected end of input")
                    .with_label(
                        Label::new(("REPL", idx..idx))
                            .with_message("Expected '(' to open a form"),
                    )
            }
        };
        report
            .finish()
            .print(("REPL", Source::from(input)))
            .unwrap();
    }
}
