/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_outer_quotes_and_whitespace() {
        assert_eq!(clean_str("  hello "), "hello");
        assert_eq!(clean_str("\"quoted\""), "quoted");
        assert_eq!(clean_str(" \"quoted\" "), "quoted");
        assert_eq!(clean_str("\"\""), "");
    }

    #[test]
    fn leaves_inner_quotes_alone() {
        assert_eq!(clean_str("a\"b"), "a\"b");
        assert_eq!(clean_str("\"a\"b\""), "a\"b");
    }
}
