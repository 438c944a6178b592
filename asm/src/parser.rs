use arch::mnemonic::Mnemonic;
use arch::mode::Mode;
use arch::table;

use crate::error::{Diag, Error};
use crate::line::Line;
use crate::symbol::{is_ident, Symbol, Symbols};

// ----------------------------------------------------------------------------
// Statement

/// One parsed instruction. The addressing mode is fixed here, from operand
/// syntax alone, and reused verbatim by the encoder: the size pre-pass and
/// the encoding pass can never disagree on instruction length.
#[derive(Debug, Clone)]
pub struct Inst {
    pub line: Line,
    pub pc: u16,
    pub mnemonic: Mnemonic,
    pub mode: Mode,
    pub expr: Option<String>,
}

impl Inst {
    pub fn len(&self) -> u16 {
        1 + self.mode.operand_len()
    }
}

#[derive(Debug)]
struct Parsed {
    label: Option<String>,
    inst: Option<(Mnemonic, Mode, Option<String>)>,
}

/// The label-resolution pass. Walks the remaining lines in source order,
/// binds each `name:` to the running offset, and accumulates instruction
/// lengths so every address is known before any operand is substituted.
pub fn statements(lines: &[Line], origin: u16, symbols: &mut Symbols) -> Result<Vec<Inst>, Diag> {
    let mut insts = Vec::with_capacity(lines.len());
    let mut pc = origin as u32;

    for line in lines {
        let parsed = parse_line(line.code()).map_err(|err| Diag::at(err, line))?;

        if let Some(label) = parsed.label {
            if pc > 0xFFFF {
                return Err(overflow(origin, pc, line));
            }
            symbols
                .define(&label, Symbol::Label(pc as u16), line.no())
                .map_err(|err| Diag::at(err, line))?;
        }

        if let Some((mnemonic, mode, expr)) = parsed.inst {
            let inst = Inst {
                line: line.clone(),
                pc: pc as u16,
                mnemonic,
                mode,
                expr,
            };
            let end = pc + inst.len() as u32;
            if pc > 0xFFFF || end > 0x1_0000 {
                return Err(overflow(origin, end, line));
            }
            insts.push(inst);
            pc = end;
        }
    }
    Ok(insts)
}

fn overflow(origin: u16, end: u32, line: &Line) -> Diag {
    let err = Error::ImageOverflow {
        origin,
        len: (end - origin as u32) as usize,
    };
    Diag::at(err, line)
}

fn parse_line(code: &str) -> Result<Parsed, Error> {
    let (label, rest) = match code.split_once(':') {
        Some((head, rest)) => {
            let head = head.trim();
            if !is_ident(head) {
                return Err(Error::MalformedInput(format!(
                    "`{head}` is not a valid label name"
                )));
            }
            (Some(head.to_string()), rest.trim())
        }
        None => (None, code),
    };

    if rest.is_empty() {
        return Ok(Parsed { label, inst: None });
    }

    let (word, operand) = match rest.split_once(char::is_whitespace) {
        Some((word, operand)) => (word, Some(operand)),
        None => (rest, None),
    };
    let mnemonic =
        Mnemonic::parse(word).map_err(|_| Error::UnknownMnemonic(word.to_string()))?;

    // Operand spacing is not significant.
    let operand = operand
        .map(|op| op.split_whitespace().collect::<String>())
        .filter(|op| !op.is_empty());

    let (mode, expr) = operand_mode(mnemonic, operand.as_deref())?;
    Ok(Parsed {
        label,
        inst: Some((mnemonic, mode, expr)),
    })
}

/// Addressing mode from operand syntax. Zero page is taken only on an
/// explicit `<` prefix, never inferred from the value; branches take the
/// relative form by static knowledge of the mnemonic.
fn operand_mode(
    mnemonic: Mnemonic,
    operand: Option<&str>,
) -> Result<(Mode, Option<String>), Error> {
    let op = match operand {
        None => {
            // Bare shift mnemonics operate on the accumulator.
            let mode = if !table::supports(mnemonic, Mode::Implied)
                && table::supports(mnemonic, Mode::Accumulator)
            {
                Mode::Accumulator
            } else {
                Mode::Implied
            };
            return Ok((mode, None));
        }
        Some(op) => op,
    };

    if op.eq_ignore_ascii_case("A") && table::supports(mnemonic, Mode::Accumulator) {
        return Ok((Mode::Accumulator, None));
    }

    if let Some(expr) = op.strip_prefix('#') {
        return done(Mode::Immediate, expr);
    }

    if op.starts_with('(') {
        let lower = op.to_ascii_lowercase();
        if lower.ends_with(",x)") {
            return done(Mode::IndirectX, &op[1..op.len() - 3]);
        }
        if lower.ends_with("),y") {
            return done(Mode::IndirectY, &op[1..op.len() - 3]);
        }
        if op.ends_with(')') {
            return done(Mode::Indirect, &op[1..op.len() - 1]);
        }
        return Err(Error::MalformedInput(format!(
            "unbalanced parentheses in operand `{op}`"
        )));
    }

    let lower = op.to_ascii_lowercase();
    if lower.ends_with(",x") || lower.ends_with(",y") {
        let base = &op[..op.len() - 2];
        let x = lower.ends_with(",x");
        return match base.strip_prefix('<') {
            Some(zp) => done(if x { Mode::ZeroPageX } else { Mode::ZeroPageY }, zp),
            None => done(if x { Mode::AbsoluteX } else { Mode::AbsoluteY }, base),
        };
    }

    if mnemonic.is_branch() {
        return done(Mode::Relative, op);
    }
    match op.strip_prefix('<') {
        Some(zp) => done(Mode::ZeroPage, zp),
        None => done(Mode::Absolute, op),
    }
}

fn done(mode: Mode, expr: &str) -> Result<(Mode, Option<String>), Error> {
    if expr.is_empty() {
        return Err(Error::MalformedInput(format!(
            "missing operand value for {mode} addressing"
        )));
    }
    Ok((mode, Some(expr.to_string())))
}
