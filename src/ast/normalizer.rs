use crate::error::CalcError;

/// Canonical text handed to the parser, together with the position in the
/// raw input that every normalized character came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    text: String,
    origins: Vec<usize>,
}

impl Normalized {
    /// Lower-cases, removes whitespace and rewrites every `^` to `**` so that
    /// a caret always means exponentiation.
    pub fn new(raw: &str) -> Result<Self, CalcError> {
        let mut text = String::with_capacity(raw.len());
        let mut origins = Vec::with_capacity(raw.len());

        for (index, c) in raw.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let position = index + 1;
            if c == '^' {
                text.push_str("**");
                origins.extend([position, position]);
                continue;
            }
            for lower in c.to_lowercase() {
                text.push(lower);
                origins.push(position);
            }
        }

        if text.is_empty() {
            return Err(CalcError::EmptyExpression);
        }
        Ok(Normalized { text, origins })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Maps a 1-based character position in the normalized text back to the
    /// raw input. Positions past the end map to just after the last character.
    pub fn original_position(&self, position: usize) -> usize {
        match position.checked_sub(1).and_then(|i| self.origins.get(i)) {
            Some(origin) => *origin,
            None => self.origins.last().map_or(1, |last| last + 1),
        }
    }
}

pub fn normalize(raw: &str) -> Result<String, CalcError> {
    Normalized::new(raw).map(|normalized| normalized.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_whitespace() {
        assert_eq!(normalize(" SQRT( 16 ) + PI ").unwrap(), "sqrt(16)+pi");
        assert_eq!(normalize("1\t+\n2").unwrap(), "1+2");
    }

    #[test]
    fn test_caret_becomes_power() {
        assert_eq!(normalize("2^10").unwrap(), "2**10");
        assert_eq!(normalize("2 ^ 3 ^ 2").unwrap(), "2**3**2");
    }

    #[test]
    fn test_rewrite_ignores_token_boundaries() {
        assert_eq!(normalize("(^)").unwrap(), "(**)");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), Err(CalcError::EmptyExpression));
        assert_eq!(normalize("   \t\n"), Err(CalcError::EmptyExpression));
    }

    #[test]
    fn test_positions_point_into_raw_input() {
        let normalized = Normalized::new("1 + * 2").unwrap();
        assert_eq!(normalized.as_str(), "1+*2");
        assert_eq!(normalized.original_position(1), 1);
        assert_eq!(normalized.original_position(3), 5);
        assert_eq!(normalized.original_position(4), 7);
        assert_eq!(normalized.original_position(5), 8);
    }

    #[test]
    fn test_caret_expansion_keeps_positions() {
        let normalized = Normalized::new("2 ^ ^ 3").unwrap();
        assert_eq!(normalized.as_str(), "2****3");
        assert_eq!(normalized.original_position(2), 3);
        assert_eq!(normalized.original_position(3), 3);
        assert_eq!(normalized.original_position(4), 5);
        assert_eq!(normalized.original_position(6), 7);
    }
}
