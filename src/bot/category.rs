//! The closed set of language categories that partition the vocabulary store.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Chinese,
    Greek,
    Latin,
    Sanskrit,
    Norse,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Category::Chinese,
        Category::Greek,
        Category::Latin,
        Category::Sanskrit,
        Category::Norse,
    ];

    /// Lowercase tag used in commands and as the JSON key.
    pub fn tag(self) -> &'static str {
        match self {
            Category::Chinese => "chinese",
            Category::Greek => "greek",
            Category::Latin => "latin",
            Category::Sanskrit => "sanskrit",
            Category::Norse => "norse",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Chinese => "Chinese",
            Category::Greek => "Greek",
            Category::Latin => "Latin",
            Category::Sanskrit => "Sanskrit",
            Category::Norse => "Norse",
        }
    }

    /// Case-insensitive lookup by tag.
    pub fn from_tag(tag: &str) -> Option<Category> {
        let t = tag.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.tag().eq_ignore_ascii_case(t))
    }

    /// "Chinese, Greek, Latin, Sanskrit, or Norse"
    pub fn choice_list() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|c| c.display_name()).collect();
        match names.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{}, or {}", rest.join(", "), last),
            Some((last, _)) => last.to_string(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_tag(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_case_insensitively() {
        assert_eq!("LATIN".parse::<Category>(), Ok(Category::Latin));
        assert_eq!(Category::from_tag(" norse "), Some(Category::Norse));
        assert!("klingon".parse::<Category>().is_err());
    }

    #[test]
    fn choice_list_reads_naturally() {
        assert_eq!(
            Category::choice_list(),
            "Chinese, Greek, Latin, Sanskrit, or Norse"
        );
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        let s = serde_json::to_string(&Category::Sanskrit).unwrap();
        assert_eq!(s, "\"sanskrit\"");
    }
}
