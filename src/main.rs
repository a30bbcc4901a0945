use std::process::ExitCode;

use calcbox::{
    Evaluator,
    evaluate_line,
    i18n::Language,
    session::{DEFAULT_HISTORY, Reply, Session},
    util::num::format_number,
};
use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};

/// calcbox is a sandboxed terminal calculator. Pass an expression to evaluate
/// it once, or nothing to start an interactive session.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Language of messages and commands.
    #[arg(short, long, value_enum, default_value_t = Language::En)]
    lang: Language,

    /// Number of successful lines the `hist` command shows.
    #[arg(long, default_value_t = DEFAULT_HISTORY)]
    history: usize,

    /// Expression to evaluate. Several words are joined with spaces.
    expression: Vec<String>,
}

/// Installs a log subscriber, but only when `RUST_LOG` asks for one.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    if args.expression.is_empty() {
        return repl(Session::with_capacity(args.lang, args.history));
    }

    let line = args.expression.join(" ");
    match evaluate_line(&line, &mut Evaluator::new()) {
        Ok(evaluation) => {
            println!("{}", format_number(evaluation.value));
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{}{}", args.lang.messages().error_prefix, args.lang.render(&e));
            ExitCode::FAILURE
        },
    }
}

/// Reads lines until an exit command, end of input or an interrupt.
fn repl(mut session: Session) -> ExitCode {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Failed to open the line editor: {e}");
            return ExitCode::FAILURE;
        },
    };

    println!("{}", session.welcome());
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                if !line.trim().is_empty()
                   && let Err(err) = editor.add_history_entry(line.as_str())
                {
                    tracing::debug!(%err, "line not added to editor history");
                }
                match session.handle(&line) {
                    Reply::Output(text) => println!("{text}"),
                    Reply::Silent => {},
                    Reply::Exit(text) => {
                        println!("{text}");
                        break;
                    },
                }
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("\n{}", session.goodbye());
                break;
            },
            Err(e) => {
                eprintln!("Failed to read input: {e}");
                return ExitCode::FAILURE;
            },
        }
    }

    ExitCode::SUCCESS
}
