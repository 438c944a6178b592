use crate::error::{Diag, Error};
use crate::line::Line;
use crate::symbol::{is_ident, parse_number, Symbol, Symbols};

/// Pseudo-directives pulled out of the instruction stream.
#[derive(Debug)]
pub struct Directives {
    pub origin: u16,
    /// Export expression (literal address or label name), resolved after
    /// label resolution.
    pub export: Option<(String, Line)>,
}

/// Default load address when no origin directive is given.
pub const DEFAULT_ORIGIN: u16 = 0;

/// One scan over the normalized lines: record `name = value` constants
/// and the origin/export directives, and drop those lines so they never
/// reach the encoder.
pub fn extract(lines: Vec<Line>, symbols: &mut Symbols) -> Result<(Directives, Vec<Line>), Diag> {
    let mut origin: Option<u16> = None;
    let mut export: Option<(String, Line)> = None;
    let mut rest = Vec::with_capacity(lines.len());

    for line in lines {
        let code = line.code();

        // Constant binding: exactly one `=`.
        if code.contains('=') {
            let mut parts = code.splitn(3, '=');
            let name = parts.next().unwrap_or_default().trim();
            let value = parts.next().unwrap_or_default().trim();
            if parts.next().is_some() {
                let err = Error::MalformedInput("more than one `=` on a line".to_string());
                return Err(Diag::at(err, &line));
            }
            if !is_ident(name) {
                let err = Error::MalformedInput(format!("`{name}` is not a valid constant name"));
                return Err(Diag::at(err, &line));
            }
            if value.is_empty() {
                let err = Error::MalformedInput(format!("constant `{name}` has no value"));
                return Err(Diag::at(err, &line));
            }
            symbols
                .define(name, Symbol::Const(value.to_string()), line.no())
                .map_err(|err| Diag::at(err, &line))?;
            continue;
        }

        let (head, tail) = match code.split_once(char::is_whitespace) {
            Some((head, tail)) => (head, tail.trim()),
            None => (code, ""),
        };

        match head.to_ascii_lowercase().trim_start_matches('.') {
            "org" => {
                if origin.is_some() {
                    return Err(Diag::at(Error::DuplicateDirective(".org"), &line));
                }
                let addr = parse_number(tail).map_err(|err| Diag::at(err, &line))?;
                origin = Some(addr);
            }
            "export" => {
                if export.is_some() {
                    return Err(Diag::at(Error::DuplicateDirective(".export"), &line));
                }
                if tail.is_empty() {
                    let err = Error::MalformedInput("`.export` needs an address or label".into());
                    return Err(Diag::at(err, &line));
                }
                export = Some((tail.to_string(), line.clone()));
            }
            _ => rest.push(line),
        }
    }

    let directives = Directives {
        origin: origin.unwrap_or(DEFAULT_ORIGIN),
        export,
    };
    Ok((directives, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(src: &str) -> Result<(Directives, Vec<Line>, Symbols), Diag> {
        let mut symbols = Symbols::new();
        let (directives, rest) = extract(Line::clean(src), &mut symbols)?;
        Ok((directives, rest, symbols))
    }

    #[test]
    fn constants_leave_the_stream() {
        let (_, rest, symbols) = run("START = $10\nLDA #START").unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].code(), "LDA #START");
        assert_eq!(symbols.resolve("START"), Ok(0x10));
    }

    #[test]
    fn origin_and_export() {
        let (d, rest, _) = run(".org $8000\n.export LOOP\nNOP").unwrap();
        assert_eq!(d.origin, 0x8000);
        assert_eq!(d.export.as_ref().unwrap().0, "LOOP");
        assert_eq!(rest.len(), 1);
    }

    #[test]
    fn directives_without_dot_and_any_case() {
        let (d, _, _) = run("ORG $8000\nEXPORT $8000").unwrap();
        assert_eq!(d.origin, 0x8000);
        assert!(d.export.is_some());
    }

    #[test]
    fn origin_defaults_to_zero() {
        let (d, _, _) = run("NOP").unwrap();
        assert_eq!(d.origin, DEFAULT_ORIGIN);
        assert!(d.export.is_none());
    }

    #[test]
    fn duplicate_origin_is_rejected() {
        let err = run(".org $8000\n.org $9000").unwrap_err();
        assert_eq!(err.err, Error::DuplicateDirective(".org"));
        assert_eq!(err.loc.as_ref().unwrap().0, 2);
    }

    #[test]
    fn double_equals_is_malformed() {
        assert!(run("A = B = C").is_err());
    }

    #[test]
    fn duplicate_constant() {
        let err = run("A = 1\nA = 2").unwrap_err();
        assert_eq!(err.err, Error::DuplicateLabel("A".to_string()));
    }
}
