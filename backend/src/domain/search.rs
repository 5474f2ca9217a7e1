//! Prefix search windows.
//!
//! Both team and user search return fixed-size pages addressed by a raw
//! offset. The offset arrives untrusted, so it is parsed and capped here
//! before any adapter sees it.

use std::fmt;

/// Rows returned per search page.
pub const PAGE_SIZE: i64 = 10;

/// Largest offset a caller may request.
pub const MAX_OFFSET: i64 = 10_000;

/// Validation errors for a search offset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchValidationError {
    #[error("offset must be a non-negative integer")]
    InvalidOffset,
    #[error("offset must be at most {max}")]
    OffsetTooLarge { max: i64 },
}

/// Validated prefix and offset for a paged search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    prefix: String,
    offset: i64,
}

impl SearchPage {
    /// Parse an untrusted offset and pair it with the search prefix.
    ///
    /// # Examples
    /// ```
    /// use team_roster::domain::SearchPage;
    ///
    /// let page = SearchPage::parse("Al", "20").expect("valid page");
    /// assert_eq!(page.offset(), 20);
    /// assert!(SearchPage::parse("Al", "-1").is_err());
    /// ```
    pub fn parse(prefix: impl Into<String>, raw_offset: &str) -> Result<Self, SearchValidationError> {
        let offset = raw_offset
            .trim()
            .parse::<i64>()
            .map_err(|_| SearchValidationError::InvalidOffset)?;
        Self::new(prefix, offset)
    }

    /// Build a page from an already numeric offset.
    pub fn new(prefix: impl Into<String>, offset: i64) -> Result<Self, SearchValidationError> {
        if offset < 0 {
            return Err(SearchValidationError::InvalidOffset);
        }
        if offset > MAX_OFFSET {
            return Err(SearchValidationError::OffsetTooLarge { max: MAX_OFFSET });
        }
        Ok(Self {
            prefix: prefix.into(),
            offset,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }

    /// The prefix as a `LIKE` pattern with `%`, `_` and `\` escaped so the
    /// prefix matches literally.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.prefix.len() + 1);
        for ch in self.prefix.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }

    /// Whether `candidate` begins with the prefix (case-sensitive).
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.starts_with(&self.prefix)
    }
}

impl fmt::Display for SearchPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.prefix, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", 0)]
    #[case("10", 10)]
    #[case(" 10000 ", MAX_OFFSET)]
    fn accepts_offsets_in_range(#[case] raw: &str, #[case] expected: i64) {
        let page = SearchPage::parse("a", raw).expect("valid offset");
        assert_eq!(page.offset(), expected);
        assert_eq!(page.limit(), PAGE_SIZE);
    }

    #[rstest]
    #[case("-1", SearchValidationError::InvalidOffset)]
    #[case("ten", SearchValidationError::InvalidOffset)]
    #[case("", SearchValidationError::InvalidOffset)]
    #[case("1.5", SearchValidationError::InvalidOffset)]
    #[case("10001", SearchValidationError::OffsetTooLarge { max: MAX_OFFSET })]
    fn rejects_bad_offsets(#[case] raw: &str, #[case] expected: SearchValidationError) {
        assert_eq!(SearchPage::parse("a", raw), Err(expected));
    }

    #[rstest]
    #[case("Al", "Al%")]
    #[case("", "%")]
    #[case("100%", "100\\%%")]
    #[case("a_b", "a\\_b%")]
    #[case("x\\y", "x\\\\y%")]
    fn escapes_like_wildcards(#[case] prefix: &str, #[case] expected: &str) {
        let page = SearchPage::new(prefix, 0).expect("valid page");
        assert_eq!(page.like_pattern(), expected);
    }

    #[test]
    fn literal_prefix_match_is_case_sensitive() {
        let page = SearchPage::new("Al", 0).expect("valid page");
        assert!(page.matches("Alpha"));
        assert!(!page.matches("alpha"));
        assert!(!page.matches("Beta"));
    }
}
