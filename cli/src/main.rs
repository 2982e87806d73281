//! binsteps CLI - binary entry point and presentation layer.
//!
//! # Architecture
//!
//! The CLI bridges [`binsteps_engine`] (pure arithmetic + step traces) and
//! the terminal:
//!
//! ```text
//! main() -> parse_args() -> engine::{add,subtract,multiply} -> render steps
//!                                        |
//!                                        v (--explain, optional)
//!                          flatten_steps() -> GeminiClient::explain()
//! ```
//!
//! Input validation lives here: the engine assumes well-formed binary
//! numerals, so malformed operands are rejected before it ever runs. The
//! explanation request happens strictly after the derivation has been
//! printed; its failure never affects the arithmetic output.

use std::env;
use std::process::ExitCode;

use binsteps_config::{API_KEY_ENV_VAR, Config};
use binsteps_engine::{add, multiply, subtract};
use binsteps_providers::{ExplainRequest, GeminiClient, gemini};
use binsteps_types::{
    Binary, Operation, OperationResult, Outcome, Step, SubtractMethod, flatten_steps,
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: binsteps <add|sub|mul> <binary> <binary> [options]

Options:
  --method <ones|twos>  Subtraction method (default: twos; only valid for sub)
  --explain             Ask Gemini for a conceptual explanation of the steps

Examples:
  binsteps add 1010 0110
  binsteps sub 1010 0011 --method ones
  binsteps mul 110 101 --explain";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    // Logs go to stderr so stdout stays clean for the derivation output.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    operation: Operation,
    a: String,
    b: String,
    method: SubtractMethod,
    explain: bool,
}

impl CliArgs {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut positional: Vec<&str> = Vec::new();
        let mut method: Option<SubtractMethod> = None;
        let mut explain = false;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--method" => {
                    let raw = iter
                        .next()
                        .ok_or_else(|| "--method requires a value (ones or twos)".to_string())?;
                    method = Some(
                        SubtractMethod::parse(raw)
                            .ok_or_else(|| format!("unknown subtraction method: {raw}"))?,
                    );
                }
                "--explain" => explain = true,
                flag if flag.starts_with("--") => {
                    return Err(format!("unknown option: {flag}"));
                }
                value => positional.push(value),
            }
        }

        let [operation, a, b] = positional.as_slice() else {
            return Err("expected an operation and two binary numbers".to_string());
        };
        let operation = Operation::parse(operation)
            .ok_or_else(|| format!("unknown operation: {operation}"))?;

        if method.is_some() && operation != Operation::Subtract {
            return Err("--method only applies to sub".to_string());
        }

        Ok(Self {
            operation,
            a: (*a).to_string(),
            b: (*b).to_string(),
            method: method.unwrap_or_default(),
            explain,
        })
    }
}

fn parse_operand(label: &str, raw: &str) -> Result<Binary, String> {
    Binary::new(raw).map_err(|e| format!("{label}: {e}"))
}

fn compute(args: &CliArgs, a: &Binary, b: &Binary) -> OperationResult {
    match args.operation {
        Operation::Add => add(a, b),
        Operation::Subtract => subtract(a, b, args.method),
        Operation::Multiply => multiply(a, b),
    }
}

fn render(args: &CliArgs, result: &OperationResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {} {}\n",
        args.a,
        args.operation.symbol(),
        args.b
    ));
    match &result.outcome {
        Outcome::Value(value) => out.push_str(&format!("Result: {value}\n")),
        Outcome::Failed(error) => out.push_str(&format!("Error: {error}\n")),
    }

    for step in &result.steps {
        out.push('\n');
        out.push_str(&render_step(step));
    }

    out
}

fn render_step(step: &Step) -> String {
    let mut out = format!("{}\n  {}\n", step.title, step.description);
    if let Some(calculation) = &step.calculation {
        for line in calculation.lines() {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

async fn print_explanation(args: &CliArgs, result: &OperationResult) {
    let Outcome::Value(value) = &result.outcome else {
        // Nothing to explain for an error marker.
        return;
    };

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load configuration: {e}");
            Config::default()
        }
    };

    let Some(api_key) = config.api_key() else {
        println!(
            "\nAI explanation is disabled: no API key configured. Set {API_KEY_ENV_VAR} or \
             add one to {}.",
            binsteps_config::config_path()
                .map_or_else(|| "~/.binsteps/config.toml".to_string(), |p| p
                    .display()
                    .to_string())
        );
        return;
    };

    let model = config.model().unwrap_or(gemini::DEFAULT_MODEL);
    let client = GeminiClient::new(api_key, model);
    let request = ExplainRequest {
        operation: args.operation,
        a: args.a.clone(),
        b: args.b.clone(),
        steps_text: flatten_steps(&result.steps),
        result: value.as_str().to_string(),
    };

    println!("\nConsulting the AI assistant...");
    match client.explain(&request).await {
        Ok(text) => println!("\nAI explanation:\n{text}"),
        Err(e) => {
            tracing::warn!("Explanation request failed: {e:#}");
            println!("\nAn error occurred while contacting the AI. Please try again later.");
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let raw_args: Vec<String> = env::args().skip(1).collect();
    let args = match CliArgs::parse(&raw_args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("binsteps: {message}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let operands = parse_operand("first number", &args.a)
        .and_then(|a| parse_operand("second number", &args.b).map(|b| (a, b)));
    let (a, b) = match operands {
        Ok(pair) => pair,
        Err(message) => {
            eprintln!("binsteps: {message}");
            return ExitCode::FAILURE;
        }
    };

    let result = compute(&args, &a, &b);
    print!("{}", render(&args, &result));

    if args.explain {
        print_explanation(&args, &result).await;
    }

    if result.outcome.is_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
