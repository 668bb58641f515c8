//! Link tag parsing

const TAG_OPEN: &str = "[rlc ";

/// One `target/surface` pair from a link tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpec {
    /// Name of the block to mirror onto
    pub target_name: String,
    /// Material on the target that receives the texture
    pub surface: String,
}

/// Extract link pairs from a panel name
///
/// The tag starts at the first `[RLC ` (any case) and ends at the next `]`.
/// Its body is split on spaces; each part must contain exactly one `/`.
/// Malformed parts are skipped. Returns `None` when the label has no tag or
/// the tag is unterminated, and an empty list when the tag holds no valid part.
#[must_use]
pub fn parse_link_tag(label: &str) -> Option<Vec<LinkSpec>> {
    // ASCII lowering keeps byte offsets aligned with `label`
    let start = label.to_ascii_lowercase().find(TAG_OPEN)?;
    let body_start = start + TAG_OPEN.len();
    let body_len = label[body_start..].find(']')?;

    let links: Vec<LinkSpec> = label[body_start..body_start + body_len]
        .split(' ')
        .filter_map(|part| {
            let mut pieces = part.split('/');
            match (pieces.next(), pieces.next(), pieces.next()) {
                (Some(target), Some(surface), None) => Some(LinkSpec {
                    target_name: target.trim().to_string(),
                    surface: surface.trim().to_string(),
                }),
                _ => None,
            }
        })
        .collect();
    Some(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(target: &str, surface: &str) -> LinkSpec {
        LinkSpec {
            target_name: target.to_string(),
            surface: surface.to_string(),
        }
    }

    #[test]
    fn test_parses_multiple_links() {
        let links = parse_link_tag("Status LCD [RLC Door/Screen Sign/ScreenArea] extra");
        assert_eq!(links, Some(vec![spec("Door", "Screen"), spec("Sign", "ScreenArea")]));
    }

    #[test]
    fn test_tag_is_case_insensitive() {
        assert_eq!(parse_link_tag("[rlc a/b]"), Some(vec![spec("a", "b")]));
    }

    #[test]
    fn test_malformed_parts_are_skipped() {
        let links = parse_link_tag("[RLC nope a/b/c  x/y]");
        assert_eq!(links, Some(vec![spec("x", "y")]));
    }

    #[test]
    fn test_missing_or_unterminated_tag() {
        assert_eq!(parse_link_tag("Plain LCD"), None);
        assert_eq!(parse_link_tag("LCD [RLC a/b"), None);
        assert_eq!(parse_link_tag("[RLC]"), None);
    }

    #[test]
    fn test_tag_without_valid_parts_is_empty() {
        assert_eq!(parse_link_tag("[RLC nothing here]"), Some(Vec::new()));
    }

    #[test]
    fn test_non_ascii_prefix_keeps_offsets() {
        assert_eq!(
            parse_link_tag("Écran [RLC Tür/Fläche]"),
            Some(vec![spec("Tür", "Fläche")])
        );
    }
}
