//! Facet display colors: a small fixed palette for content types and a
//! string-hash-derived color for domains, stable across loads.

const TYPE_PALETTE: &[(&str, &str)] = &[
    ("page", "#22A75E"),
    ("pdf", "#14B8A6"),
    ("red", "#EF4444"),
    ("orange", "#F59E0B"),
];

const NEUTRAL_GRAY: &str = "#DDDDDD";

pub fn type_color(name: &str) -> &'static str {
    TYPE_PALETTE
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| *value)
        .unwrap_or(NEUTRAL_GRAY)
}

// Shift-based accumulation folded into 32 bits; distribution matters,
// not cryptographic quality.
fn hash_string(text: &str) -> i32 {
    let mut hash: i32 = 0;
    for ch in text.chars() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(ch as i32);
    }
    hash
}

pub fn string_color(text: &str) -> String {
    let hash = hash_string(text);
    let r = (hash >> 24) & 0xff;
    let g = (hash >> 16) & 0xff;
    let b = (hash >> 8) & 0xff;
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colors_by_name() {
        assert_eq!(type_color("page"), "#22A75E");
        assert_eq!(type_color("pdf"), "#14B8A6");
        assert_eq!(type_color("unknown-kind"), NEUTRAL_GRAY);
    }

    #[test]
    fn domain_color_is_deterministic() {
        let first = string_color("example.com");
        let second = string_color("example.com");
        assert_eq!(first, second);
        assert_eq!(first.len(), 7);
        assert!(first.starts_with('#'));
    }

    #[test]
    fn distinct_domains_usually_differ() {
        assert_ne!(string_color("example.com"), string_color("example.org"));
    }
}
