//! `ethexpr`: evaluate expressions from the command line or a REPL.

mod repl;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context as _, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use ethexpr::{Context, Engine, EvalConfig, ExpressionGrammar, Grammar, UnboundPolicy, Value};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Evaluate expressions with big-integer arithmetic and Ethereum units.
#[derive(Parser, Debug)]
#[command(name = "ethexpr", version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a single expression and print the result
    Eval {
        /// The expression to evaluate
        expr: String,

        #[command(flatten)]
        options: EngineOptions,
    },

    /// Start an interactive session
    Repl {
        #[command(flatten)]
        options: EngineOptions,
    },
}

#[derive(Args, Debug, Default)]
struct EngineOptions {
    /// JSON file whose top-level object becomes the context
    #[arg(short, long, value_name = "FILE")]
    context: Option<PathBuf>,

    /// Bind a variable; VALUE is read as JSON, falling back to a string
    #[arg(long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,

    /// Fail on unbound variables and missing properties
    #[arg(long)]
    strict: bool,

    /// Largest exponent accepted in scientific notation
    #[arg(long, value_name = "N")]
    max_exponent: Option<u32>,

    /// JSON file with evaluation settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl EngineOptions {
    fn eval_config(&self) -> Result<EvalConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = read(path)?;
                serde_json::from_str(&text)
                    .with_context(|| format!("invalid config file {}", path.display()))?
            }
            None => EvalConfig::default(),
        };

        if self.strict {
            config = config.with_unbound(UnboundPolicy::Error);
        }
        if let Some(max) = self.max_exponent {
            config = config.with_max_exponent(max);
        }
        Ok(config)
    }

    fn context(&self) -> Result<Context> {
        let mut ctx = match &self.context {
            Some(path) => {
                let text = read(path)?;
                let json: serde_json::Value = serde_json::from_str(&text)
                    .with_context(|| format!("invalid JSON in {}", path.display()))?;
                Context::from_json(json)
                    .with_context(|| format!("cannot use {} as a context", path.display()))?
            }
            None => Context::new(),
        };

        for var in &self.vars {
            let (name, value) = parse_var(var)?;
            ctx.define(name, value);
        }
        Ok(ctx)
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Split `NAME=VALUE`.
fn parse_var(raw: &str) -> Result<(String, Value)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected NAME=VALUE, got `{}`", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("missing variable name in `{}`", raw));
    }
    Ok((name.to_string(), parse_value(value)))
}

/// Read a value as JSON, or take it as a plain string.
pub(crate) fn parse_value(raw: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => Value::from(json),
        Err(_) => Value::string(raw),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run_eval(expr: &str, options: &EngineOptions) -> Result<ExitCode> {
    let engine = Engine::with_config(options.eval_config()?);
    let ctx = options.context()?;
    let grammar = ExpressionGrammar::new(engine.config());
    debug!(vars = ctx.len(), "evaluating from command line");

    match engine.evaluate(expr, &ctx) {
        Ok(value) => {
            println!("{}", grammar.format_value(&value));
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", grammar.format_error(&err, expr));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_repl(options: &EngineOptions) -> Result<ExitCode> {
    let engine = Engine::with_config(options.eval_config()?);
    let ctx = options.context()?;
    repl::run(engine, ctx)?;
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Command::Eval { expr, options } => run_eval(expr, options),
        Command::Repl { options } => run_repl(options),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
