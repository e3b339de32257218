use regex::{Regex, RegexBuilder};
use treescope_protocol::{FilterFlag, TextFilter};

/// Compiles a user-entered text filter into a string predicate.
///
/// An empty filter matches everything. An invalid regex (only possible with
/// `UseRegex`, since literal text is escaped) matches nothing until the user
/// fixes it, and is logged once per compilation.
#[derive(Debug, Clone)]
pub enum CompiledFilter {
    MatchAll,
    MatchNone,
    Pattern(Regex),
}

impl CompiledFilter {
    pub fn new(filter: &TextFilter) -> Self {
        if filter.is_empty() {
            return Self::MatchAll;
        }
        let mut pattern = if filter.has_flag(FilterFlag::UseRegex) {
            filter.text.clone()
        } else {
            regex::escape(&filter.text)
        };
        if filter.has_flag(FilterFlag::MatchWord) {
            pattern = format!(r"\b(?:{pattern})\b");
        }
        match RegexBuilder::new(&pattern)
            .case_insensitive(!filter.has_flag(FilterFlag::MatchCase))
            .build()
        {
            Ok(regex) => Self::Pattern(regex),
            Err(err) => {
                log::warn!("unusable filter pattern {pattern:?}: {err}");
                Self::MatchNone
            }
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::MatchAll => true,
            Self::MatchNone => false,
            Self::Pattern(regex) => regex.is_match(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(text: &str, flags: Vec<FilterFlag>) -> CompiledFilter {
        CompiledFilter::new(&TextFilter::new(text).with_flags(flags))
    }

    #[test]
    fn empty_filter_matches_everything() {
        let f = compiled("", vec![]);
        assert!(f.matches("anything"));
        assert!(f.matches(""));
    }

    #[test]
    fn plain_text_is_case_insensitive_substring() {
        let f = compiled("status", vec![]);
        assert!(f.matches("StatusBar"));
        assert!(f.matches("the status bar"));
        assert!(!f.matches("statubar"));
    }

    #[test]
    fn match_case_flag_restores_sensitivity() {
        let f = compiled("Status", vec![FilterFlag::MatchCase]);
        assert!(f.matches("StatusBar"));
        assert!(!f.matches("statusbar"));
    }

    #[test]
    fn plain_text_escapes_regex_metacharacters() {
        let f = compiled("a.b(1)", vec![]);
        assert!(f.matches("a.b(1)"));
        assert!(!f.matches("aXb(1)"));
    }

    #[test]
    fn match_word_requires_boundaries() {
        let f = compiled("bar", vec![FilterFlag::MatchWord]);
        assert!(f.matches("status bar"));
        assert!(f.matches("bar"));
        assert!(!f.matches("statusbar"));
    }

    #[test]
    fn regex_flag_enables_patterns() {
        let f = compiled("bar|nav", vec![FilterFlag::UseRegex]);
        assert!(f.matches("StatusBar"));
        assert!(f.matches("NavBar"));
        assert!(!f.matches("ime"));
    }

    #[test]
    fn invalid_regex_matches_nothing() {
        let f = compiled("(unclosed", vec![FilterFlag::UseRegex]);
        assert!(!f.matches("(unclosed"));
        assert!(!f.matches("anything"));
    }
}
