use serde::{Deserialize, Serialize};

/// Modifier flags of a text filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterFlag {
    MatchCase,
    MatchWord,
    UseRegex,
}

/// A user-entered text filter: the raw string plus modifier flags.
///
/// Compilation into a predicate happens in the engine; this type only
/// carries the user's input so renderers can echo it back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFilter {
    pub text: String,
    pub flags: Vec<FilterFlag>,
}

impl TextFilter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            flags: Vec::new(),
        }
    }

    pub fn with_flags(mut self, flags: Vec<FilterFlag>) -> Self {
        self.flags = flags;
        self
    }

    pub fn has_flag(&self, flag: FilterFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_lookup() {
        let f = TextFilter::new("x").with_flags(vec![FilterFlag::MatchCase]);
        assert!(f.has_flag(FilterFlag::MatchCase));
        assert!(!f.has_flag(FilterFlag::UseRegex));
    }

    #[test]
    fn empty_means_no_text() {
        assert!(TextFilter::default().is_empty());
        assert!(!TextFilter::new("a").is_empty());
    }
}
