use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
    time,
};

use calc::{syntax::DEFAULT_MAX_DEPTH, LiteralWidth, Options};
use clap::Parser;

/// Evaluates the arithmetic expression stored in a file and writes the result
/// next to it, in `<INPUT>_result.txt`.
#[derive(Debug, Parser)]
#[command(name = "calc", version)]
struct Args {
    /// The file holding the expression.
    input: PathBuf,

    /// Convert numeric literals at full length instead of cutting them at 63 characters.
    #[arg(long)]
    wide_literals: bool,

    /// How many parentheses may be open at once.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, conflicts_with = "unlimited_depth")]
    max_depth: usize,

    /// Accept any parenthesis nesting depth.
    #[arg(long)]
    unlimited_depth: bool,
}

impl Args {
    fn options(&self) -> Options {
        Options {
            literal_width: if self.wide_literals {
                LiteralWidth::Unbounded
            } else {
                LiteralWidth::Compatible
            },
            max_depth: (!self.unlimited_depth).then_some(self.max_depth),
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("Cannot open file: {}", .0.display())]
    Open(PathBuf, #[source] io::Error),

    #[error("Cannot create output file!")]
    Create(#[source] io::Error),
}

fn main() -> ExitCode {
    calc::init_tracing();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(?error, "run failed");
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), RunError> {
    let source = fs::read(&args.input).map_err(|e| RunError::Open(args.input.clone(), e))?;

    let start = time::Instant::now();
    let outcome = calc::evaluate_with(&source, args.options());
    tracing::debug!(elapsed = ?start.elapsed(), "evaluation finished");

    let rendered = calc::render(&outcome);
    fs::write(result_path(&args.input), &rendered).map_err(RunError::Create)?;
    print!("{rendered}");

    Ok(())
}

/// The input path with `_result.txt` appended, so `in.txt` becomes `in.txt_result.txt`.
fn result_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push("_result.txt");
    PathBuf::from(name)
}
