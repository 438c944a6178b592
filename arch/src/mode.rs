use std::fmt;

/// Operand encoding forms of the 6502.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

impl Mode {
    /// Operand bytes following the opcode byte.
    pub fn operand_len(self) -> u16 {
        match self {
            Mode::Implied | Mode::Accumulator => 0,
            Mode::Immediate
            | Mode::ZeroPage
            | Mode::ZeroPageX
            | Mode::ZeroPageY
            | Mode::IndirectX
            | Mode::IndirectY
            | Mode::Relative => 1,
            Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY | Mode::Indirect => 2,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Implied => "implied",
            Mode::Accumulator => "accumulator",
            Mode::Immediate => "immediate",
            Mode::ZeroPage => "zero page",
            Mode::ZeroPageX => "zero page,X",
            Mode::ZeroPageY => "zero page,Y",
            Mode::Absolute => "absolute",
            Mode::AbsoluteX => "absolute,X",
            Mode::AbsoluteY => "absolute,Y",
            Mode::Indirect => "indirect",
            Mode::IndirectX => "(indirect,X)",
            Mode::IndirectY => "(indirect),Y",
            Mode::Relative => "relative",
        };
        write!(f, "{}", s)
    }
}
