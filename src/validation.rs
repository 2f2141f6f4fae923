//! Validation for words and translations entering the vocabulary and flashcard stores.

/// Term validation errors with helpful messages
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TermError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} is too long (maximum {max} characters)")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} contains control characters: {chars}")]
    ControlCharacters { field: &'static str, chars: String },
}

/// Limits applied to stored terms
#[derive(Debug, Clone)]
pub struct TermRules {
    pub max_chars: usize,
}

impl Default for TermRules {
    fn default() -> Self {
        TermRules { max_chars: 100 }
    }
}

/// Validate a single term, returning it trimmed.
///
/// Any script is accepted (Han, Greek, Devanagari, runes ...); only emptiness, length
/// and control characters are rejected.
pub fn validate_term(raw: &str, field: &'static str, rules: &TermRules) -> Result<String, TermError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TermError::Empty { field });
    }
    if trimmed.chars().count() > rules.max_chars {
        return Err(TermError::TooLong {
            field,
            max: rules.max_chars,
        });
    }
    if trimmed.chars().any(|c| c.is_control()) {
        let chars = trimmed
            .chars()
            .filter(|c| c.is_control())
            .map(|c| format!("\\u{{{:04x}}}", c as u32))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(TermError::ControlCharacters { field, chars });
    }
    Ok(trimmed.to_string())
}

/// Validate a (word, translation) pair.
pub fn validate_pair(word: &str, translation: &str, rules: &TermRules) -> Result<(String, String), TermError> {
    let w = validate_term(word, "Word", rules)?;
    let t = validate_term(translation, "Translation", rules)?;
    Ok((w, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_latin_scripts() {
        let rules = TermRules::default();
        assert_eq!(validate_term(" 你好 ", "Word", &rules).unwrap(), "你好");
        assert!(validate_term("ᚠ", "Word", &rules).is_ok());
    }

    #[test]
    fn rejects_empty_long_and_control() {
        let rules = TermRules { max_chars: 5 };
        assert_eq!(
            validate_term("   ", "Word", &rules),
            Err(TermError::Empty { field: "Word" })
        );
        assert!(matches!(
            validate_term("abcdefg", "Word", &rules),
            Err(TermError::TooLong { max: 5, .. })
        ));
        assert!(matches!(
            validate_pair("ok", "a\u{7}b", &rules),
            Err(TermError::ControlCharacters { field: "Translation", .. })
        ));
    }
}
