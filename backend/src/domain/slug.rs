//! Slug derivation and validation for blog posts.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens. [`slugify`] derives one from an arbitrary
//! title; [`is_valid_slug`] checks a value that arrived from outside.

/// Return `true` when `value` is a valid post slug.
pub fn is_valid_slug(value: &str) -> bool {
    is_trimmed_non_empty(value) && has_allowed_slug_chars(value)
}

/// Derive a slug from a post title.
///
/// Lowercases the title, collapses every run of non-alphanumeric characters
/// into a single hyphen, and trims leading or trailing hyphens. Titles with
/// no alphanumeric content yield an empty string, which [`is_valid_slug`]
/// rejects.
///
/// # Examples
/// ```
/// use blog_backend::domain::slug::slugify;
///
/// assert_eq!(slugify("Hello World!"), "hello-world");
/// assert_eq!(slugify("  Rust:  2024 edition  "), "rust-2024-edition");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

fn is_trimmed_non_empty(value: &str) -> bool {
    !value.is_empty() && value.trim() == value
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Hello World!", "hello-world")]
    #[case("Ut Interdum Praesent", "ut-interdum-praesent")]
    #[case("--- already -- hyphenated ---", "already-hyphenated")]
    #[case("UPPER case 42", "upper-case-42")]
    #[case("¡pünctuation!", "p-nctuation")]
    fn slugify_produces_expected_slugs(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(slugify(title), expected);
    }

    #[rstest]
    fn slugify_output_is_always_a_valid_slug_or_empty(
        #[values("A Title", "with  gaps", "!!!", "42")] title: &str,
    ) {
        let slug = slugify(title);
        assert!(slug.is_empty() || is_valid_slug(&slug));
    }

    #[rstest]
    #[case("hello-world", true)]
    #[case("", false)]
    #[case(" padded ", false)]
    #[case("Upper", false)]
    #[case("under_score", false)]
    fn slug_validation(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(value), expected);
    }
}
