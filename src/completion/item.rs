//! Completion candidate model
//!
//! Callbacks may return candidates in several shapes: a bare value, a
//! value/help pair, or an already-built item. Everything downstream consumes
//! the normalized [`CompletionItem`] only.

/// One completion candidate: a value plus optional help text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    pub value: String,
    pub help: Option<String>,
}

impl CompletionItem {
    /// Create a candidate without help text
    pub fn new(value: impl Into<String>) -> Self {
        CompletionItem {
            value: value.into(),
            help: None,
        }
    }

    /// Create a candidate with help text
    pub fn with_help(value: impl Into<String>, help: impl Into<String>) -> Self {
        CompletionItem {
            value: value.into(),
            help: Some(help.into()),
        }
    }
}

/// A raw candidate as produced by a user callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCompletion {
    /// A bare value, no help
    Value(String),

    /// A (value, help) pair
    Pair(String, String),

    /// An already-normalized item
    Item(CompletionItem),
}

impl From<&str> for RawCompletion {
    fn from(value: &str) -> Self {
        RawCompletion::Value(value.to_string())
    }
}

impl From<String> for RawCompletion {
    fn from(value: String) -> Self {
        RawCompletion::Value(value)
    }
}

impl From<(&str, &str)> for RawCompletion {
    fn from((value, help): (&str, &str)) -> Self {
        RawCompletion::Pair(value.to_string(), help.to_string())
    }
}

impl From<(String, String)> for RawCompletion {
    fn from((value, help): (String, String)) -> Self {
        RawCompletion::Pair(value, help)
    }
}

impl From<CompletionItem> for RawCompletion {
    fn from(item: CompletionItem) -> Self {
        RawCompletion::Item(item)
    }
}

impl From<RawCompletion> for CompletionItem {
    fn from(raw: RawCompletion) -> Self {
        match raw {
            RawCompletion::Value(value) => CompletionItem::new(value),
            RawCompletion::Pair(value, help) => CompletionItem::with_help(value, help),
            RawCompletion::Item(item) => item,
        }
    }
}

/// Normalize a raw candidate into the canonical form
pub fn normalize(raw: impl Into<RawCompletion>) -> CompletionItem {
    raw.into().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bare_value() {
        let item = normalize("Camila");
        assert_eq!(item.value, "Camila");
        assert_eq!(item.help, None);
    }

    #[test]
    fn test_normalize_pair() {
        let item = normalize(("Camila", "The reader of books."));
        assert_eq!(item.value, "Camila");
        assert_eq!(item.help.as_deref(), Some("The reader of books."));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(("Carlos", "The writer of scripts."));
        let twice = normalize(once.clone());
        assert_eq!(once, twice);

        let bare = normalize("Sebastian");
        assert_eq!(normalize(bare.clone()), bare);
    }

    #[test]
    fn test_help_absent_unless_provided() {
        assert_eq!(normalize("Camila").help, None);
        assert_eq!(normalize(CompletionItem::new("Camila")).help, None);
    }
}
