//! Aggregated file text used to ground the conversation.

/// Text extracted from the most recent upload batch.
///
/// Replaced wholesale by every successful batch; an empty string means the
/// session has no file context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextStore {
    aggregated_text: String,
    file_names: Vec<String>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store directly from already aggregated text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            aggregated_text: text.into(),
            file_names: Vec::new(),
        }
    }

    /// Swaps in the text of a new batch, discarding the previous one.
    pub fn replace(&mut self, aggregated_text: String, file_names: Vec<String>) {
        self.aggregated_text = aggregated_text;
        self.file_names = file_names;
    }

    pub fn text(&self) -> &str {
        &self.aggregated_text
    }

    /// Names of the files in the current batch, in upload order.
    pub fn file_names(&self) -> &[String] {
        &self.file_names
    }

    pub fn is_empty(&self) -> bool {
        self.aggregated_text.is_empty()
    }

    /// Size of the aggregated text in characters.
    pub fn char_count(&self) -> usize {
        self.aggregated_text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = ContextStore::new();
        assert!(store.is_empty());
        assert!(store.file_names().is_empty());
    }

    #[test]
    fn test_replace_discards_previous_batch() {
        let mut store = ContextStore::new();
        store.replace("=== File: a.txt ===\nA\n".to_string(), vec!["a.txt".to_string()]);
        store.replace("=== File: b.txt ===\nB\n".to_string(), vec!["b.txt".to_string()]);

        assert_eq!(store.text(), "=== File: b.txt ===\nB\n");
        assert_eq!(store.file_names(), ["b.txt".to_string()]);
    }

    #[test]
    fn test_char_count_counts_unicode_scalars() {
        let store = ContextStore::from_text("안녕");
        assert_eq!(store.char_count(), 2);
        assert!(!store.is_empty());
    }
}
