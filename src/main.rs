use std::fs::OpenOptions;
use std::io;
use std::io::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use rpncalc::config::Config;
use rpncalc::history::{self, History, Session};
use rpncalc::output::{render, OutputOptions};
use rpncalc::{evaluate_postfix, to_postfix, tokenize, EvalError, Postfix};

/// Evaluates arithmetic expressions with + - * / ^ and parentheses.
///
/// Without an expression an interactive prompt is started.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Also print the result as a hexadecimal integer.
    #[arg(short = 'x', long)]
    hex: bool,

    /// Print the result in fixed decimal notation.
    #[arg(short, long)]
    decimal: bool,

    /// Also print the result in scientific notation.
    #[arg(short, long)]
    scientific: bool,

    /// Leave out labels such as "Result: ".
    #[arg(short, long)]
    no_message: bool,

    /// Digits after the decimal point.
    #[arg(short, long, value_name = "DIGITS")]
    precision: Option<usize>,

    /// Read the expression as postfix words, e.g. "3 4 2 * +".
    #[arg(long)]
    rpn: bool,

    /// Evaluate the expression stored at this index in the history.
    #[arg(long, value_name = "INDEX", conflicts_with = "expression")]
    session: Option<usize>,

    /// Configuration file to use instead of searching for config.yaml.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not record results in the history file.
    #[arg(long)]
    no_history: bool,

    /// Log more; repeat for trace output.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// The expression. Words are joined without separators; put it after
    /// `--` when it starts with an operator.
    #[arg(allow_negative_numbers = true)]
    expression: Vec<String>,
}

struct Calculator {
    options: OutputOptions,
    rpn: bool,
    history: Option<PathBuf>,
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;

            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }

    Ok(())
}

fn print_eval_error(line: &str, err: &EvalError) {
    if let Some(pos) = err.position() {
        eprintln!("{}", line.trim_end());

        let mut msg = String::new();
        (0..pos).for_each(|_| msg.push(' '));
        msg.push('^');
        eprintln!("{}", msg);
    }

    eprintln!("error: {}", err);
}

impl Calculator {
    fn new(args: &Args, config: &Config) -> Self {
        let mut options = OutputOptions::from(config);

        if args.hex {
            options.hex = true;
        }
        if args.decimal {
            options.decimal = true;
        }
        if args.scientific {
            options.scientific = true;
        }
        if args.no_message {
            options.prompt = false;
        }
        if let Some(precision) = args.precision {
            options.precision = precision;
        }

        let history = if config.history.enabled && !args.no_history {
            Some(config.history.file.clone())
        } else {
            None
        };

        Calculator {
            options,
            rpn: args.rpn,
            history,
        }
    }

    /// Re-runs `session` in the notation it was entered in.
    fn for_session(self, session: &Session) -> Calculator {
        Calculator {
            rpn: session.rpn,
            ..self
        }
    }

    fn compute(&self, line: &str) -> Result<f64, EvalError> {
        let postfix = if self.rpn {
            line.parse::<Postfix>()?
        } else {
            let tokens = tokenize(line)?;
            debug!(?tokens, "tokenized");
            to_postfix(tokens)?
        };

        debug!(%postfix, "postfix");
        evaluate_postfix(postfix)
    }

    /// Evaluates and prints one expression. Returns whether it succeeded.
    fn execute_line(&self, line: &str) -> bool {
        let expression = line.trim();

        let val = match self.compute(expression) {
            Ok(x) => x,
            Err(err) => {
                debug!(expression, %err, "evaluation failed");
                print_eval_error(expression, &err);
                return false;
            }
        };

        for out in render(val, &self.options) {
            println!("{}", out);
        }

        if let Some(path) = &self.history {
            if let Err(e) = history::append(path, expression, val, self.rpn) {
                warn!("failed to save to history: {:#}", e);
            }
        }

        true
    }

    fn repl(&self) -> Result<()> {
        let exit_cmds = ["exit", "quit", ""];
        let input = io::stdin();
        let mut output = io::stdout();

        loop {
            output.write_all(b">>> ")?;
            output.flush()?;

            let mut line = String::new();
            input.read_line(&mut line)?;

            if exit_cmds.contains(&line.trim()) {
                break;
            }

            self.execute_line(&line);
        }

        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::discover(),
    }
}

fn run(args: Args) -> Result<bool> {
    let config = load_config(args.config.as_deref())?;
    init_logging(args.verbose, config.log_file.as_deref())?;
    debug!(?config, "loaded configuration");

    let calc = Calculator::new(&args, &config);

    if let Some(index) = args.session {
        let history = History::load(&config.history.file);
        let session = history.session(index).ok_or_else(|| {
            anyhow!(
                "no session {} in {} ({} recorded)",
                index,
                config.history.file.display(),
                history.len()
            )
        })?;

        return Ok(calc.for_session(session).execute_line(&session.expression));
    }

    if args.expression.is_empty() {
        calc.repl()?;
        return Ok(true);
    }

    let expression = if args.rpn {
        args.expression.join(" ")
    } else {
        args.expression.concat()
    };

    Ok(calc.execute_line(&expression))
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Args, Calculator};
    use clap::Parser;
    use rpncalc::config::Config;
    use rpncalc::history::{self, History};
    use rpncalc::EvalError;
    use std::env;
    use std::fs;

    fn calculator(argv: &[&str]) -> (Args, Calculator) {
        let args = Args::try_parse_from(argv).unwrap();
        let calc = Calculator::new(&args, &Config::default());
        (args, calc)
    }

    #[test]
    fn test_flags_override_config() {
        let (_, calc) = calculator(&["rpncalc", "-x", "-n", "-p", "5", "1+1"]);
        assert!(calc.options.hex);
        assert!(calc.options.decimal);
        assert!(!calc.options.prompt);
        assert_eq!(calc.options.precision, 5);
        assert!(calc.history.is_some());

        let (_, calc) = calculator(&["rpncalc", "--no-history", "1"]);
        assert!(calc.history.is_none());
        assert_eq!(calc.options.precision, 2);
    }

    #[test]
    fn test_expression_words() {
        let (args, _) = calculator(&["rpncalc", "2", "(3", "+", "4)"]);
        assert_eq!(args.expression.concat(), "2(3+4)");

        let (args, _) = calculator(&["rpncalc", "-p", "3", "-", "1"]);
        assert_eq!(args.precision, Some(3));
        assert_eq!(args.expression, vec!["-", "1"]);
    }

    #[test]
    fn test_flags_after_expression() {
        let (args, calc) = calculator(&["rpncalc", "1+1", "--hex"]);
        assert!(calc.options.hex);
        assert_eq!(args.expression, vec!["1+1"]);

        let (args, calc) = calculator(&["rpncalc", "2", "-p", "4", "*3"]);
        assert_eq!(calc.options.precision, 4);
        assert_eq!(args.expression, vec!["2", "*3"]);

        let (args, calc) = calculator(&["rpncalc", "--rpn", "-2", "3", "^", "-n"]);
        assert!(!calc.options.prompt);
        assert_eq!(args.expression, vec!["-2", "3", "^"]);

        let (args, _) = calculator(&["rpncalc", "-x", "--", "-1+2"]);
        assert_eq!(args.expression, vec!["-1+2"]);
    }

    #[test]
    fn test_compute() {
        let (_, calc) = calculator(&["rpncalc", "--no-history"]);
        assert_eq!(calc.compute("2(3+4)"), Ok(14.0));
        assert_eq!(calc.compute("5/0"), Err(EvalError::DivisionByZero));

        let (_, calc) = calculator(&["rpncalc", "--rpn", "--no-history"]);
        assert_eq!(calc.compute("3 4 2 * +"), Ok(11.0));
    }

    #[test]
    fn test_session_replays_notation() {
        let dir = env::temp_dir().join(format!("rpncalc-main-session-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("history.yaml");

        history::append(&path, "3 4 - 2 ^", 1.0, true).unwrap();
        history::append(&path, "2(3)", 6.0, false).unwrap();
        let history = History::load(&path);

        let session = history.session(0).unwrap();
        let (_, calc) = calculator(&["rpncalc", "--no-history"]);
        let calc = calc.for_session(session);
        assert!(calc.rpn);
        assert_eq!(calc.compute(&session.expression), Ok(1.0));

        let session = history.session(1).unwrap();
        let (_, calc) = calculator(&["rpncalc", "--rpn", "--no-history"]);
        let calc = calc.for_session(session);
        assert!(!calc.rpn);
        assert_eq!(calc.compute(&session.expression), Ok(6.0));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_session_conflicts_with_expression() {
        assert!(Args::try_parse_from(["rpncalc", "--session", "0", "1+1"]).is_err());
        let args = Args::try_parse_from(["rpncalc", "--session", "2"]).unwrap();
        assert_eq!(args.session, Some(2));
    }
}
