//! Display-name override table (`ui-<name>` → label).

use std::collections::HashMap;

const PREFIX: &str = "ui-";

/// Read-only relabelling table consulted by every widget at construction.
///
/// Entries come from an injected table and from the page query string,
/// applied in that order so the query string wins. Keys that do not start
/// with `ui-` are kept but never match a label lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameOverrides {
    table: HashMap<String, String>,
}

impl NameOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut overrides = Self::new();
        overrides.extend(pairs);
        overrides
    }

    /// Later pairs replace earlier ones with the same key.
    pub fn extend<K, V, I>(&mut self, pairs: I)
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.table
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    /// Label for `name`, or `name` itself when no override exists or the
    /// override is empty.
    pub fn label<'a>(&'a self, name: &'a str) -> &'a str {
        self.table
            .get(&format!("{PREFIX}{name}"))
            .map(String::as_str)
            .filter(|label| !label.is_empty())
            .unwrap_or(name)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.table.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Splits `?a=1&b=2` into undecoded `(key, value)` pairs. The value is the
/// text between the first and second `=`; a pair without `=` yields an
/// empty value. Empty segments are skipped.
pub fn query_pairs(search: &str) -> impl Iterator<Item = (&str, &str)> {
    search
        .strip_prefix('?')
        .unwrap_or(search)
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let mut parts = pair.split('=');
            let key = parts.next().unwrap_or(pair);
            (key, parts.next().unwrap_or(""))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_literal_name() {
        let overrides = NameOverrides::new();
        assert_eq!(overrides.label("scaleX"), "scaleX");
    }

    #[test]
    fn later_source_wins() {
        let mut overrides = NameOverrides::from_pairs([("ui-x", "Across")]);
        overrides.extend([("ui-x", "Horizontal"), ("lang", "fr")]);
        assert_eq!(overrides.label("x"), "Horizontal");
        assert_eq!(overrides.label("lang"), "lang");
        assert_eq!(overrides.get("lang"), Some("fr"));
    }

    #[test]
    fn empty_override_keeps_name() {
        let overrides = NameOverrides::from_pairs(query_pairs("?ui-x&ui-y=&ui-z=Depth"));
        assert_eq!(overrides.label("x"), "x");
        assert_eq!(overrides.label("y"), "y");
        assert_eq!(overrides.label("z"), "Depth");
    }

    #[test]
    fn query_pairs_keep_text_up_to_second_equals() {
        let pairs: Vec<_> = query_pairs("?ui-x=Left%20Right&&flag&ui-y=a=b").collect();
        assert_eq!(
            pairs,
            vec![("ui-x", "Left%20Right"), ("flag", ""), ("ui-y", "a")]
        );
        assert_eq!(query_pairs("").count(), 0);
        assert_eq!(query_pairs("?").count(), 0);
    }
}
