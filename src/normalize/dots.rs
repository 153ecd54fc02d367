// src/normalize/dots.rs
// =============================================================================
// Dot-segment resolution for URL paths.
//
//   /path/to/./resolve  -> /path/to/resolve
//   /path/to/../resolve -> /path/resolve
//
// A leading slash survives only if the input had one; a trailing slash
// never survives (/asdf/ -> /asdf).
// =============================================================================

// Resolves '.' and '..' segments in a path
//
// Rules, applied left to right:
// - ".." drops the last kept segment (nothing happens if none is kept yet)
// - "." and empty segments are dropped
// - anything else is kept
pub fn resolve_dot_segments(path: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            ".." => {
                kept.pop();
            }
            "." | "" => {}
            other => kept.push(other),
        }
    }

    let joined = kept.join("/");
    if path.starts_with('/') {
        format!("/{}", joined)
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_segment() {
        assert_eq!(resolve_dot_segments("/path/to/../resolve"), "/path/resolve");
    }

    #[test]
    fn test_current_segment() {
        assert_eq!(resolve_dot_segments("/path/to/./resolve"), "/path/to/resolve");
    }

    #[test]
    fn test_parent_past_root_is_ignored() {
        assert_eq!(resolve_dot_segments("/../../a/b"), "/a/b");
        assert_eq!(resolve_dot_segments(".."), "");
    }

    #[test]
    fn test_empty_segments_collapse() {
        assert_eq!(resolve_dot_segments("//a///b/"), "/a/b");
        assert_eq!(resolve_dot_segments("/"), "/");
        assert_eq!(resolve_dot_segments(""), "");
    }

    #[test]
    fn test_relative_input_stays_relative() {
        assert_eq!(resolve_dot_segments("a/./b/../c/"), "a/c");
    }

    #[test]
    fn test_dots_inside_names_are_kept() {
        assert_eq!(resolve_dot_segments("/a/..b/c./.d"), "/a/..b/c./.d");
    }
}
