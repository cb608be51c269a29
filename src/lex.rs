use crate::CalcNumber;

/// How many bytes of a numeric literal the compatible policy hands to the number parser.
pub const COMPATIBLE_LITERAL_WIDTH: usize = 63;

/// How much of a numeric literal's text is converted into a value.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum LiteralWidth {
    /// Runs longer than [`COMPATIBLE_LITERAL_WIDTH`] bytes are cut before conversion.
    /// The cursor still moves past the whole run.
    #[default]
    Compatible,

    /// The whole run is converted, whatever its length.
    Unbounded,
}

/// A forward-only read position over a source buffer.
///
/// There is no way to move the cursor backwards, so every position observed
/// during one evaluation is at least as large as the ones observed before it.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src [u8],
    position: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src [u8]) -> Self {
        Cursor {
            source,
            position: 0,
        }
    }

    /// The 0-based offset of the next unconsumed byte.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the next unconsumed byte, or `None` at the end of input.
    pub fn peek(&self) -> Option<u8> {
        self.source.get(self.position).copied()
    }

    /// Consumes the next byte if it is `expected`.
    pub fn chase(&mut self, expected: u8) -> bool {
        let found = self.peek() == Some(expected);
        if found {
            self.position += 1;
        }
        found
    }

    pub fn skip_whitespace(&mut self) {
        self.consume_while(is_blank);
    }

    /// Lexes a numeric literal starting at the cursor.
    ///
    /// Consumes the longest run of digits containing at most one decimal point.
    /// A second point ends the literal and is left in place for the caller.
    pub fn number(&mut self, width: LiteralWidth) -> Result<CalcNumber, LexError> {
        let start = self.position;

        let mut seen_dot = false;
        self.consume_while(|c| match c {
            b'0'..=b'9' => true,
            b'.' if !seen_dot => {
                seen_dot = true;
                true
            }
            _ => false,
        });

        let run = &self.source[start..self.position];
        let text = match width {
            LiteralWidth::Compatible => &run[..run.len().min(COMPATIBLE_LITERAL_WIDTH)],
            LiteralWidth::Unbounded => run,
        };

        // Only ASCII digits and dots were consumed, so the text is valid UTF-8
        std::str::from_utf8(text)
            .ok()
            .and_then(|text| text.parse::<CalcNumber>().ok())
            .ok_or_else(|| LexError::InvalidNumber {
                literal: String::from_utf8_lossy(run).into_owned(),
                offset: start + 1,
            })
    }

    fn consume_while(&mut self, mut f: impl FnMut(u8) -> bool) {
        while let Some(c) = self.peek() {
            if !f(c) {
                break;
            }
            self.position += 1;
        }
    }
}

/// Whitespace allowed between tokens: the C locale's `isspace` set.
pub fn is_blank(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("Number literal \"{literal}\" failed to parse (offset {offset}).")]
    InvalidNumber { literal: String, offset: usize },
}

impl LexError {
    /// The 1-based offset of the first byte of the offending literal.
    pub fn offset(&self) -> usize {
        match self {
            LexError::InvalidNumber { offset, .. } => *offset,
        }
    }
}
