use crate::{
    lex::{Cursor, LexError, LiteralWidth},
    CalcNumber,
};

/// The deepest parenthesis nesting accepted by [`Options::default`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Knobs for a single evaluation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Options {
    pub literal_width: LiteralWidth,

    /// How many parentheses may be open at once. `None` removes the limit,
    /// leaving the call stack as the only bound.
    pub max_depth: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            literal_width: LiteralWidth::default(),
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

/// Parses and evaluates one expression in a single left-to-right pass.
///
/// Each grammar rule returns its fully reduced value, so no tree is ever built:
///
/// ```text
/// expr   = term { ('+' | '-') term }
/// term   = factor { '*' factor }
/// factor = NUMBER | '(' expr ')'
/// ```
///
/// The first error aborts the whole pass; its offset is never overwritten.
#[derive(Debug, Clone)]
pub struct Evaluator<'src> {
    cursor: Cursor<'src>,
    options: Options,
    depth: usize,
}

impl<'src> Evaluator<'src> {
    pub fn new(source: &'src [u8], options: Options) -> Self {
        Evaluator {
            cursor: Cursor::new(source),
            options,
            depth: 0,
        }
    }

    pub fn evaluate(mut self) -> Evaluation {
        let outcome = self.evaluate_program();

        match &outcome {
            Ok(value) => tracing::trace!(value, "evaluated"),
            Err(error) => tracing::debug!(offset = error.offset(), %error, "syntax error"),
        }

        outcome
    }

    fn evaluate_program(&mut self) -> Evaluation {
        let value = self.evaluate_expr()?;

        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            Some(found) => Err(SyntaxError::TrailingInput {
                found,
                offset: self.offset(),
            }),
            None => Ok(value),
        }
    }

    fn evaluate_expr(&mut self) -> Evaluation {
        let mut value = self.evaluate_term()?;

        loop {
            self.cursor.skip_whitespace();
            if self.cursor.chase(b'+') {
                value += self.evaluate_term()?;
            } else if self.cursor.chase(b'-') {
                value -= self.evaluate_term()?;
            } else {
                break;
            }
        }

        Ok(value)
    }

    fn evaluate_term(&mut self) -> Evaluation {
        let mut value = self.evaluate_factor()?;

        loop {
            self.cursor.skip_whitespace();
            if self.cursor.chase(b'*') {
                value *= self.evaluate_factor()?;
            } else {
                break;
            }
        }

        Ok(value)
    }

    fn evaluate_factor(&mut self) -> Evaluation {
        self.cursor.skip_whitespace();

        match self.cursor.peek() {
            Some(b'(') => self.evaluate_group(),
            Some(b'0'..=b'9' | b'.') => Ok(self.cursor.number(self.options.literal_width)?),
            // Signs are not operators at this level, so `-5` fails here
            Some(found) => Err(SyntaxError::UnexpectedCharacter {
                found,
                offset: self.offset(),
            }),
            None => Err(SyntaxError::UnexpectedEnd {
                offset: self.offset(),
            }),
        }
    }

    fn evaluate_group(&mut self) -> Evaluation {
        let open = self.offset();

        if let Some(limit) = self.options.max_depth {
            if self.depth >= limit {
                return Err(SyntaxError::NestingTooDeep {
                    limit,
                    offset: open,
                });
            }
        }

        self.cursor.chase(b'(');
        self.depth += 1;
        let value = self.evaluate_expr()?;
        self.depth -= 1;

        self.cursor.skip_whitespace();
        if self.cursor.chase(b')') {
            Ok(value)
        } else {
            Err(SyntaxError::UnclosedParen {
                open,
                offset: self.offset(),
            })
        }
    }

    /// The 1-based offset of the next unconsumed byte.
    fn offset(&self) -> usize {
        self.cursor.position() + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("Unexpected character \"{}\" at offset {offset}.", .found.escape_ascii())]
    UnexpectedCharacter { found: u8, offset: usize },

    #[error("Unexpected end of input at offset {offset}.")]
    UnexpectedEnd { offset: usize },

    #[error("Expected closing parenthesis at offset {offset} for the one opened at offset {open}.")]
    UnclosedParen { open: usize, offset: usize },

    #[error("Unexpected \"{}\" after the end of the expression at offset {offset}.", .found.escape_ascii())]
    TrailingInput { found: u8, offset: usize },

    #[error("Parentheses nested deeper than {limit} levels at offset {offset}.")]
    NestingTooDeep { limit: usize, offset: usize },
}

impl SyntaxError {
    /// The 1-based offset of the first point of failure.
    pub fn offset(&self) -> usize {
        match self {
            SyntaxError::Lex(error) => error.offset(),
            SyntaxError::UnexpectedCharacter { offset, .. }
            | SyntaxError::UnexpectedEnd { offset }
            | SyntaxError::UnclosedParen { offset, .. }
            | SyntaxError::TrailingInput { offset, .. }
            | SyntaxError::NestingTooDeep { offset, .. } => *offset,
        }
    }
}

pub type Evaluation = Result<CalcNumber, SyntaxError>;
