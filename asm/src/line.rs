// ----------------------------------------------------------------------------
// Line

/// One logical source line, comment stripped, with the original line
/// number kept for diagnostics.
#[derive(Debug, Clone)]
pub struct Line {
    no: usize,
    raw: String,
    code: String,
    comment: Option<String>,
}

impl Line {
    fn new(idx: usize, raw: &str) -> Self {
        let (code, comment) = match raw.split_once(';') {
            Some((code, comment)) => (code, Some(comment.to_string())),
            None => (raw, None),
        };
        Self {
            no: idx + 1,
            raw: raw.to_string(),
            code: code.trim().to_string(),
            comment,
        }
    }

    /// Normalize raw source: strip comments and whitespace, drop lines
    /// that end up empty.
    pub fn clean(source: &str) -> Vec<Line> {
        source
            .lines()
            .enumerate()
            .map(|(idx, raw)| Line::new(idx, raw))
            .filter(|line| !line.code.is_empty())
            .collect()
    }

    pub fn no(&self) -> usize {
        self.no
    }
    pub fn raw(&self) -> &str {
        &self.raw
    }
    pub fn code(&self) -> &str {
        &self.code
    }
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_and_blanks() {
        let src = "  LDA #$10 ; load\n\n; full comment line\n\tNOP  \n";
        let lines = Line::clean(src);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].code(), "LDA #$10");
        assert_eq!(lines[0].no(), 1);
        assert_eq!(lines[0].comment(), Some(" load"));
        assert_eq!(lines[1].code(), "NOP");
        assert_eq!(lines[1].no(), 4);
    }

    #[test]
    fn keeps_raw_text() {
        let lines = Line::clean("  NOP ; x");
        assert_eq!(lines[0].raw(), "  NOP ; x");
    }
}
