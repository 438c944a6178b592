use indexmap::IndexMap;

use crate::error::Error;

#[derive(Debug, Clone)]
pub enum Symbol {
    /// `name = value` constant, kept as raw text and coerced at use.
    Const(String),
    /// `name:` label bound to an address.
    Label(u16),
}

/// Per-run symbol table, case-sensitive, insertion order preserved.
/// Owned by one assembly run; never shared across runs.
#[derive(Debug, Default)]
pub struct Symbols {
    map: IndexMap<String, (usize, Symbol)>,
}

impl Symbols {
    pub fn new() -> Self {
        Symbols {
            map: IndexMap::new(),
        }
    }

    pub fn define(&mut self, name: &str, sym: Symbol, line_no: usize) -> Result<(), Error> {
        if self.map.contains_key(name) {
            return Err(Error::DuplicateLabel(name.to_string()));
        }
        self.map.insert(name.to_string(), (line_no, sym));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.map.get(name).map(|(_, sym)| sym)
    }

    /// Value of a symbol: label address as-is, constant text coerced to a
    /// number here (not at definition time).
    pub fn resolve(&self, name: &str) -> Result<u16, Error> {
        match self.get(name) {
            Some(Symbol::Label(addr)) => Ok(*addr),
            Some(Symbol::Const(text)) => parse_number(text),
            None => Err(Error::UndefinedSymbol(name.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// `$FF` / `0xFF` hex or bare decimal, 16-bit.
pub fn parse_number(s: &str) -> Result<u16, Error> {
    let parsed = if let Some(hex) = s.strip_prefix('$') {
        u16::from_str_radix(hex, 16)
    } else if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16)
    } else {
        s.parse::<u16>()
    };
    parsed.map_err(|_| Error::MalformedInput(format!("cannot parse `{s}` as a number")))
}

pub fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_forms() {
        assert_eq!(parse_number("$8000"), Ok(0x8000));
        assert_eq!(parse_number("0x10"), Ok(0x10));
        assert_eq!(parse_number("255"), Ok(255));
        assert!(parse_number("$GG").is_err());
        assert!(parse_number("65536").is_err());
    }

    #[test]
    fn resolve_coerces_const_at_use() {
        let mut syms = Symbols::new();
        syms.define("START", Symbol::Const("$10".to_string()), 1).unwrap();
        syms.define("LOOP", Symbol::Label(0x8002), 4).unwrap();
        assert_eq!(syms.resolve("START"), Ok(0x10));
        assert_eq!(syms.resolve("LOOP"), Ok(0x8002));
        assert_eq!(
            syms.resolve("missing"),
            Err(Error::UndefinedSymbol("missing".to_string()))
        );
    }

    #[test]
    fn no_redefinition() {
        let mut syms = Symbols::new();
        syms.define("A", Symbol::Label(0), 1).unwrap();
        assert_eq!(
            syms.define("A", Symbol::Label(1), 2),
            Err(Error::DuplicateLabel("A".to_string()))
        );
        // A constant and a label share one namespace.
        assert!(syms.define("A", Symbol::Const("1".into()), 3).is_err());
    }

    #[test]
    fn idents() {
        assert!(is_ident("LOOP"));
        assert!(is_ident("_tmp2"));
        assert!(!is_ident("2nd"));
        assert!(!is_ident("a b"));
        assert!(!is_ident(""));
    }
}
