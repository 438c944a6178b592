use strum::{Display, EnumString};

/// The 56 documented MOS 6502 mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
pub enum Mnemonic {
    ADC,
    AND,
    ASL,
    BCC,
    BCS,
    BEQ,
    BIT,
    BMI,
    BNE,
    BPL,
    BRK,
    BVC,
    BVS,
    CLC,
    CLD,
    CLI,
    CLV,
    CMP,
    CPX,
    CPY,
    DEC,
    DEX,
    DEY,
    EOR,
    INC,
    INX,
    INY,
    JMP,
    JSR,
    LDA,
    LDX,
    LDY,
    LSR,
    NOP,
    ORA,
    PHA,
    PHP,
    PLA,
    PLP,
    ROL,
    ROR,
    RTI,
    RTS,
    SBC,
    SEC,
    SED,
    SEI,
    STA,
    STX,
    STY,
    TAX,
    TAY,
    TSX,
    TXA,
    TXS,
    TYA,
}

impl Mnemonic {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_uppercase().parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Unknown mnemonic: {s}")),
        }
    }

    /// Branches take a relative displacement and nothing else.
    pub fn is_branch(&self) -> bool {
        use Mnemonic::*;
        matches!(self, BCC | BCS | BEQ | BMI | BNE | BPL | BVC | BVS)
    }
}

#[test]
fn test() {
    assert_eq!(Mnemonic::parse("lda"), Ok(Mnemonic::LDA));
    assert_eq!(Mnemonic::parse("Jmp"), Ok(Mnemonic::JMP));
    assert!(Mnemonic::parse("hoge").is_err());
    assert!(Mnemonic::BNE.is_branch());
    assert!(!Mnemonic::JMP.is_branch());
    assert_eq!(Mnemonic::LDA.to_string(), "LDA");
}
