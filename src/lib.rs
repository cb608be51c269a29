pub mod lex;
pub mod output;
pub mod syntax;

use std::sync::Once;

pub use lex::LiteralWidth;
pub use output::{format_number, render};
pub use syntax::{Evaluation, Options, SyntaxError};

/// The representation used by every literal and every computed value.
pub type CalcNumber = f64;

/// Evaluates `source` with the default [`Options`].
pub fn evaluate(source: &str) -> Evaluation {
    evaluate_with(source.as_bytes(), Options::default())
}

/// Evaluates raw bytes with the default [`Options`]. Bytes that are not part
/// of the grammar are reported as syntax errors, so any buffer is accepted.
pub fn evaluate_bytes(source: &[u8]) -> Evaluation {
    evaluate_with(source, Options::default())
}

#[tracing::instrument(level = "trace", skip_all, fields(len = source.len()))]
pub fn evaluate_with(source: &[u8], options: Options) -> Evaluation {
    syntax::Evaluator::new(source, options).evaluate()
}

static TRACING_INIT: Once = Once::new();

/// Installs a log subscriber for the binaries.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=calc=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
