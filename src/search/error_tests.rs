//! Unit tests for search error types

#[cfg(test)]
mod tests {
    use crate::cache::CacheError;
    use crate::search::error::SearchError;
    use std::path::PathBuf;

    #[test]
    fn test_invalid_pattern_display() {
        let error = SearchError::InvalidPattern {
            pattern: "(".to_string(),
            reason: "unclosed group".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("Invalid regex pattern '('"));
        assert!(display.contains("unclosed group"));
    }

    #[test]
    fn test_empty_tag_display() {
        let error = SearchError::EmptyTag("@".to_string());
        assert_eq!(error.to_string(), "Empty tag term '@'");
    }

    #[test]
    fn test_cache_error_is_transparent() {
        let cache_error = CacheError::RootNotIndexed(PathBuf::from("/media"));
        let search_error: SearchError = cache_error.into();
        assert_eq!(search_error.to_string(), "/media has not been indexed yet");
    }
}
