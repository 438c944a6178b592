use arch::mode::Mode;
use arch::table;

use crate::error::Error;
use crate::parser::Inst;
use crate::symbol::{is_ident, parse_number, Symbols};

/// An instruction together with its emitted bytes.
#[derive(Debug)]
pub struct Encoded {
    pub inst: Inst,
    pub bytes: Vec<u8>,
}

/// Encode one instruction: substitute symbols, look up the opcode and emit
/// opcode + little-endian operand bytes.
pub fn encode(inst: &Inst, symbols: &Symbols) -> Result<Vec<u8>, Error> {
    let entry = table::lookup(inst.mnemonic, inst.mode)
        .ok_or(Error::InvalidAddressing(inst.mnemonic, inst.mode))?;

    let mut bytes = Vec::with_capacity(1 + entry.bytes as usize);
    bytes.push(entry.code);

    let expr = match &inst.expr {
        None => return Ok(bytes),
        Some(expr) => expr,
    };
    let value = resolve_expr(expr, symbols)?;

    match entry.bytes {
        1 if inst.mode == Mode::Relative => {
            // Displacement from the address right after the instruction.
            let disp = value as i32 - (inst.pc as i32 + 2);
            if !(-128..=127).contains(&disp) {
                return Err(Error::OperandOutOfRange(format!(
                    "branch displacement {disp} exceeds -128..=127"
                )));
            }
            bytes.push(disp as u8);
        }
        1 => {
            if value > 0xFF {
                return Err(Error::OperandOutOfRange(format!(
                    "`{expr}` = 0x{value:04X} does not fit in one byte"
                )));
            }
            bytes.push(value as u8);
        }
        2 => bytes.extend_from_slice(&value.to_le_bytes()),
        _ => {}
    }
    Ok(bytes)
}

/// A literal number or a symbol-table entry; nothing else.
pub fn resolve_expr(expr: &str, symbols: &Symbols) -> Result<u16, Error> {
    if expr.starts_with('$') || expr.starts_with(|c: char| c.is_ascii_digit()) {
        return parse_number(expr);
    }
    if is_ident(expr) {
        return symbols.resolve(expr);
    }
    Err(Error::MalformedInput(format!(
        "cannot parse `{expr}` as an operand"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Line;
    use crate::parser::statements;

    fn encode_one(src: &str, origin: u16) -> Result<Vec<u8>, Error> {
        let mut symbols = Symbols::new();
        let (_, lines) = crate::directive::extract(Line::clean(src), &mut symbols).unwrap();
        let insts = statements(&lines, origin, &mut symbols).unwrap();
        encode(insts.last().unwrap(), &symbols)
    }

    #[test]
    fn emits_declared_length() {
        assert_eq!(encode_one("NOP", 0).unwrap(), vec![0xEA]);
        assert_eq!(encode_one("LDA #$10", 0).unwrap(), vec![0xA9, 0x10]);
        assert_eq!(encode_one("LDA $1234", 0).unwrap(), vec![0xAD, 0x34, 0x12]);
        assert_eq!(encode_one("STA ($40),Y", 0).unwrap(), vec![0x91, 0x40]);
    }

    #[test]
    fn relative_is_a_signed_displacement() {
        // Branch at 0x8000, target the branch itself: -2.
        assert_eq!(
            encode_one("here: BNE here", 0x8000).unwrap(),
            vec![0xD0, 0xFE]
        );
        // Target immediately after the branch: 0.
        let mut symbols = Symbols::new();
        let (_, lines) =
            crate::directive::extract(Line::clean("BEQ next\nnext: NOP"), &mut symbols).unwrap();
        let insts = statements(&lines, 0x8000, &mut symbols).unwrap();
        assert_eq!(encode(&insts[0], &symbols).unwrap(), vec![0xF0, 0x00]);
    }

    #[test]
    fn relative_range_check() {
        // 0x9000 is far beyond +127 from 0x8002.
        let err = encode_one("FAR = $9000\nBNE FAR", 0x8000).unwrap_err();
        assert!(matches!(err, Error::OperandOutOfRange(_)));
    }

    #[test]
    fn byte_operand_range_check() {
        let err = encode_one("LDA #$100", 0).unwrap_err();
        assert!(matches!(err, Error::OperandOutOfRange(_)));
        let err = encode_one("LDA <$1234", 0).unwrap_err();
        assert!(matches!(err, Error::OperandOutOfRange(_)));
    }

    #[test]
    fn unsupported_mode_is_rejected() {
        let err = encode_one("STA #$10", 0).unwrap_err();
        assert!(matches!(err, Error::InvalidAddressing(..)));
    }

    #[test]
    fn undefined_symbol_never_encodes_garbage() {
        let err = encode_one("JMP nowhere", 0).unwrap_err();
        assert_eq!(err, Error::UndefinedSymbol("nowhere".to_string()));
    }
}
