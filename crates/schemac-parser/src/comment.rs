//! Comment normalization

/// Strip leading and trailing `#` markers from every line and collapse
/// whitespace to single spaces
pub fn normalize(comment: &str) -> String {
    comment
        .lines()
        .map(|line| line.trim().trim_matches('#'))
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First comment that is non-empty after normalization
pub fn first_comment<'a, I>(comments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    comments
        .into_iter()
        .map(normalize)
        .find(|comment| !comment.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("# the   name "), "the name");
        assert_eq!(normalize("## heading"), "heading");
        assert_eq!(normalize("# first\n# second"), "first second");
        assert_eq!(normalize("#"), "");
        assert_eq!(normalize("# foo #"), "foo");
        assert_eq!(normalize("## banner ##"), "banner");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_keeps_inner_markers() {
        assert_eq!(normalize("# issue #42"), "issue #42");
    }

    #[test]
    fn test_first_comment() {
        assert_eq!(first_comment(["", "#  ", "# male", "# other"]), "male");
        assert_eq!(first_comment(["", "#"]), "");
        assert_eq!(first_comment(Vec::<&str>::new()), "");
    }
}
