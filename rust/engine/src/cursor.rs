/// Sequential read-ahead view over one transcript.
///
/// A fresh cursor sits before the first line; call [`LineCursor::next`] to
/// reach it. Past the last line the cursor holds no line and every predicate
/// answers `false`.
#[derive(Debug, Clone)]
pub struct LineCursor {
    lines: Vec<String>,
    /// Index of the current line, `None` before the first `next()`.
    pos: Option<usize>,
}

impl LineCursor {
    pub fn new(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self {
            lines: text.lines().map(str::to_owned).collect(),
            pos: None,
        }
    }

    /// Moves to the next line. Returns `false` once input is exhausted.
    pub fn next(&mut self) -> bool {
        let next = self.pos.map_or(0, |p| p + 1);
        self.pos = Some(next.min(self.lines.len()));
        next < self.lines.len()
    }

    /// The current line, or `None` before the start and after the end.
    pub fn line(&self) -> Option<&str> {
        self.pos
            .and_then(|p| self.lines.get(p))
            .map(String::as_str)
    }

    pub fn has_line(&self) -> bool {
        self.line().is_some()
    }

    /// 1-based number of the current line; 0 when there is none.
    pub fn line_number(&self) -> usize {
        match self.pos {
            Some(p) if p < self.lines.len() => p + 1,
            _ => 0,
        }
    }

    pub fn find(&self, needle: &str) -> Option<usize> {
        self.line().and_then(|l| l.find(needle))
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.line().is_some_and(|l| l.starts_with(prefix))
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        self.line().is_some_and(|l| l.ends_with(suffix))
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.find(needle).is_some()
    }

    pub fn is_blank(&self) -> bool {
        self.line().is_some_and(|l| l.trim().is_empty())
    }

    /// Like [`LineCursor::contains`], but `token` must not run into a
    /// following letter or digit: `" calls"` matches `"Bob calls 2"` and not
    /// `"Bob callsign"`. A token ending in a space always matches exactly.
    pub fn contains_exact(&self, token: &str) -> bool {
        let Some(line) = self.line() else {
            return false;
        };
        if token.is_empty() {
            return true;
        }
        line.match_indices(token).any(|(pos, _)| {
            if token.ends_with(' ') {
                return true;
            }
            line[pos + token.len()..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_alphanumeric())
        })
    }

    pub fn contains_one_of(&self, tokens: &[&str]) -> bool {
        tokens.iter().any(|t| self.contains_exact(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_before_first_line_and_stops_after_last() {
        let mut c = LineCursor::new("a\nb");
        assert_eq!(c.line(), None);
        assert!(c.next());
        assert_eq!(c.line(), Some("a"));
        assert_eq!(c.line_number(), 1);
        assert!(c.next());
        assert_eq!(c.line(), Some("b"));
        assert!(!c.next());
        assert_eq!(c.line(), None);
        assert_eq!(c.line_number(), 0);
        assert!(!c.next());
        assert!(!c.contains("a"));
    }

    #[test]
    fn handles_crlf_and_bom() {
        let mut c = LineCursor::new("\u{feff}Winamax Poker - x UTC\r\nTable: 'a'\r\n");
        c.next();
        assert!(c.starts_with("Winamax Poker"));
        assert!(c.ends_with("UTC"));
        c.next();
        assert_eq!(c.line(), Some("Table: 'a'"));
    }

    #[test]
    fn contains_exact_respects_word_boundary() {
        let mut c = LineCursor::new("Bob recalls nothing\nBob calls 2\nBob callsign\nBob calls");
        c.next();
        assert!(!c.contains_exact(" calls"));
        c.next();
        assert!(c.contains_exact(" calls"));
        c.next();
        assert!(!c.contains_exact(" calls"));
        c.next();
        assert!(c.contains_exact(" calls"));
    }

    #[test]
    fn contains_one_of_any_token() {
        let mut c = LineCursor::new("Hero folds");
        c.next();
        assert!(c.contains_one_of(&[" checks", " folds"]));
        assert!(!c.contains_one_of(&[" checks", " bets "]));
    }

    #[test]
    fn empty_text_has_no_line() {
        let mut c = LineCursor::new("");
        assert!(!c.next());
        assert!(!c.has_line());
        assert_eq!(c.find("x"), None);
    }
}
