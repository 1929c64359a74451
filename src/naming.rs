//! Constant name and delimiter derivation
//!
//! The rules here are a compatibility surface: firmware code references the
//! generated constants by name, so derivation must stay stable across
//! releases of this tool.

use std::collections::HashMap;

use crate::error::{BundleError, BundleResult};

/// Name used when a filename stem sanitizes to nothing (e.g. `...html`)
const FALLBACK_NAME: &str = "HTML";

/// Suffix appended to every derived constant name
const NAME_SUFFIX: &str = "_HTML";

/// Suffix appended to every raw-literal delimiter
const DELIMITER_SUFFIX: &str = "DL";

/// Maximum length of the delimiter body before the suffix
const DELIMITER_MAX: usize = 12;

/// Derive the constant name for an asset filename.
///
/// Drops the final extension segment, collapses every run of characters
/// outside `[0-9a-zA-Z]` to a single underscore, strips leading and
/// trailing underscores, uppercases, and appends `_HTML`:
/// `index.html` becomes `INDEX_HTML`, `my-page v2.html` becomes
/// `MY_PAGE_V2_HTML`.
pub fn const_name(file_name: &str) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);

    let mut name = String::with_capacity(stem.len());
    let mut in_run = false;
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() {
            name.push(c.to_ascii_uppercase());
            in_run = false;
        } else if !in_run {
            name.push('_');
            in_run = true;
        }
    }
    let name = name.trim_matches('_');

    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        format!("{name}{NAME_SUFFIX}")
    }
}

/// Derive the raw-literal delimiter for a constant name.
///
/// Keeps only `[A-Z0-9]`, truncates to 12 characters, and appends `DL`:
/// `INDEX_HTML` becomes `INDEXHTMLDL`. The token must never equal a line of
/// the embedded content, which the generator checks separately.
pub fn delimiter_for(name: &str) -> String {
    let body: String = name
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .take(DELIMITER_MAX)
        .collect();

    if body.is_empty() {
        format!("{FALLBACK_NAME}{DELIMITER_SUFFIX}")
    } else {
        format!("{body}{DELIMITER_SUFFIX}")
    }
}

/// Tracks constant names already assigned during a generation pass.
///
/// Distinct filenames can sanitize to the same constant (`a-b.html` and
/// `a b.html` both yield `A_B_HTML`); emitting both would produce a source
/// file that fails to compile, so assignment fails fast instead.
#[derive(Debug, Default)]
pub struct NameRegistry {
    assigned: HashMap<String, String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive and claim the constant name for `file_name`.
    pub fn claim(&mut self, file_name: &str) -> BundleResult<String> {
        let identifier = const_name(file_name);
        if let Some(first) = self.assigned.get(&identifier) {
            return Err(BundleError::DuplicateIdentifier {
                identifier,
                first: first.clone(),
                second: file_name.to_string(),
            });
        }
        self.assigned
            .insert(identifier.clone(), file_name.to_string());
        Ok(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_const_name_simple() {
        assert_eq!(const_name("index.html"), "INDEX_HTML");
    }

    #[test]
    fn test_const_name_collapses_separator_runs() {
        assert_eq!(const_name("my-page v2.html"), "MY_PAGE_V2_HTML");
        assert_eq!(const_name("a--b__c.html"), "A_B_C_HTML");
    }

    #[test]
    fn test_const_name_strips_edge_underscores() {
        assert_eq!(const_name("-admin-.html"), "ADMIN_HTML");
        assert_eq!(const_name("__setup.html"), "SETUP_HTML");
    }

    #[test]
    fn test_const_name_empty_stem_falls_back() {
        assert_eq!(const_name("...html"), "HTML");
        assert_eq!(const_name(".html"), "HTML");
        assert_eq!(const_name("---.html"), "HTML");
    }

    #[test]
    fn test_const_name_without_extension() {
        assert_eq!(const_name("page"), "PAGE_HTML");
    }

    #[test]
    fn test_const_name_keeps_only_last_extension() {
        assert_eq!(const_name("index.min.html"), "INDEX_MIN_HTML");
    }

    #[test]
    fn test_delimiter_simple() {
        assert_eq!(delimiter_for("INDEX_HTML"), "INDEXHTMLDL");
    }

    #[test]
    fn test_delimiter_keeps_digits() {
        assert_eq!(delimiter_for("MY_PAGE_V2_HTML"), "MYPAGEV2HTMLDL");
    }

    #[test]
    fn test_delimiter_truncates_to_twelve() {
        assert_eq!(
            delimiter_for("SOME_VERY_LONG_PAGE_NAME_HTML"),
            "SOMEVERYLONGDL"
        );
    }

    #[test]
    fn test_delimiter_fallback() {
        assert_eq!(delimiter_for("___"), "HTMLDL");
        assert_eq!(delimiter_for(""), "HTMLDL");
    }

    #[test]
    fn test_registry_accepts_distinct_names() {
        let mut names = NameRegistry::new();
        assert_eq!(names.claim("index.html").unwrap(), "INDEX_HTML");
        assert_eq!(names.claim("about.html").unwrap(), "ABOUT_HTML");
    }

    #[test]
    fn test_registry_rejects_colliding_names() {
        let mut names = NameRegistry::new();
        names.claim("a-b.html").unwrap();

        let err = names.claim("a b.html").unwrap_err();
        match err {
            BundleError::DuplicateIdentifier {
                identifier,
                first,
                second,
            } => {
                assert_eq!(identifier, "A_B_HTML");
                assert_eq!(first, "a-b.html");
                assert_eq!(second, "a b.html");
            }
            other => panic!("expected DuplicateIdentifier, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn const_name_is_always_sanitized(name in ".*") {
            let ident = const_name(&name);
            prop_assert!(!ident.is_empty());
            prop_assert!(ident
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'));
            prop_assert!(!ident.starts_with('_'));
            prop_assert!(!ident.ends_with('_'));
        }

        #[test]
        fn delimiter_is_short_and_alphanumeric(name in ".*") {
            let delim = delimiter_for(&const_name(&name));
            prop_assert!(delim.ends_with(DELIMITER_SUFFIX));
            prop_assert!(delim.len() <= DELIMITER_MAX + DELIMITER_SUFFIX.len());
            prop_assert!(delim
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }
}
