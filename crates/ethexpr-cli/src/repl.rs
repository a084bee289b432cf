//! Interactive session.

use anyhow::Result;
use ethexpr::{Context, Engine, ExpressionGrammar, Grammar};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::parse_value;

const HELP: &str = "\
Enter an expression to evaluate it against the session context.

Commands:
  :vars              list bound variables
  :set NAME VALUE    bind NAME (VALUE is JSON, or a plain string)
  :help              show this message
  :quit              leave the session";

/// What the loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Print(String),
    Silent,
    Quit,
}

struct Session {
    engine: Engine,
    grammar: ExpressionGrammar,
    ctx: Context,
}

impl Session {
    fn new(engine: Engine, ctx: Context) -> Self {
        let grammar = ExpressionGrammar::new(engine.config());
        Self {
            engine,
            grammar,
            ctx,
        }
    }

    fn handle(&mut self, line: &str) -> Outcome {
        let line = line.trim();
        if line.is_empty() {
            return Outcome::Silent;
        }
        match line.strip_prefix(':') {
            Some(command) => self.command(command),
            None => self.evaluate(line),
        }
    }

    fn command(&mut self, command: &str) -> Outcome {
        let (name, rest) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(n, r)| (n, r.trim()));

        match name {
            "q" | "quit" | "exit" => Outcome::Quit,
            "h" | "help" => Outcome::Print(HELP.to_string()),
            "vars" => {
                if self.ctx.is_empty() {
                    return Outcome::Print("(no variables)".to_string());
                }
                let lines: Vec<String> = self
                    .ctx
                    .iter()
                    .map(|(name, value)| format!("{} = {:?}", name, value))
                    .collect();
                Outcome::Print(lines.join("\n"))
            }
            "set" => match rest.split_once(char::is_whitespace) {
                Some((var, value)) => {
                    self.ctx.define(var, parse_value(value.trim()));
                    Outcome::Silent
                }
                None => Outcome::Print("usage: :set NAME VALUE".to_string()),
            },
            other => Outcome::Print(format!("unknown command `:{}` (try :help)", other)),
        }
    }

    fn evaluate(&mut self, source: &str) -> Outcome {
        let result = self
            .engine
            .parse_cached(source)
            .and_then(|evaluator| evaluator.evaluate(&self.ctx));

        match result {
            Ok(value) => Outcome::Print(self.grammar.format_value(&value)),
            Err(err) => Outcome::Print(self.grammar.format_error(&err, source)),
        }
    }
}

/// Run the read-eval-print loop until `:quit` or end of input.
pub fn run(engine: Engine, ctx: Context) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut session = Session::new(engine, ctx);
    debug!(vars = session.ctx.len(), "starting repl");

    loop {
        match editor.readline("ethexpr> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                match session.handle(&line) {
                    Outcome::Print(text) => println!("{}", text),
                    Outcome::Silent => {}
                    Outcome::Quit => break,
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    debug!(cached = session.engine.cache_len(), "leaving repl");
    Ok(())
}
