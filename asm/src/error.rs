use arch::mnemonic::Mnemonic;
use arch::mode::Mode;
use color_print::cprintln;
use thiserror::Error;

use crate::line::Line;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Duplicate `{0}` directive")]
    DuplicateDirective(&'static str),

    #[error("Re-defined symbol: `{0}`")]
    DuplicateLabel(String),

    #[error("Undefined symbol: `{0}`")]
    UndefinedSymbol(String),

    #[error("Unknown mnemonic: `{0}`")]
    UnknownMnemonic(String),

    #[error("`{0}` does not support {1} addressing")]
    InvalidAddressing(Mnemonic, Mode),

    #[error("Operand out of range: {0}")]
    OperandOutOfRange(String),

    #[error("Image exceeds the 64K address space (origin 0x{origin:04X}, {len} bytes)")]
    ImageOverflow { origin: u16, len: usize },
}

/// An error pinned to the source line that caused it.
#[derive(Debug, Clone)]
pub struct Diag {
    pub err: Error,
    pub loc: Option<(usize, String)>,
}

impl Diag {
    pub fn at(err: Error, line: &Line) -> Self {
        Diag {
            err,
            loc: Some((line.no(), line.raw().to_string())),
        }
    }

    pub fn bare(err: Error) -> Self {
        Diag { err, loc: None }
    }

    /// Print error with diagnostic information showing file location and
    /// line content.
    pub fn print(&self, file: &str) {
        cprintln!("<red,bold>error</>: {}", self.err);
        if let Some((no, raw)) = &self.loc {
            cprintln!("     <blue>--></> <underline>{}:{}</>", file, no);
            cprintln!("      <blue>|</>");
            cprintln!(" <blue>{:>4} |</> {}", no, raw);
            cprintln!("      <blue>|</>");
        }
    }
}

impl std::fmt::Display for Diag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.loc {
            Some((no, _)) => write!(f, "line {}: {}", no, self.err),
            None => write!(f, "{}", self.err),
        }
    }
}

impl std::error::Error for Diag {}
