use std::collections::HashMap;

pub const EMPTY_TEXT_KEY: &str = "search.emptyText";

const ENGLISH: &[(&str, &str)] = &[
    (EMPTY_TEXT_KEY, "Type a name or address to search"),
    ("action.cancel", "Cancel"),
];

pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

/// Built-in English strings with optional per-key overrides.
/// Unknown keys translate to themselves.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    overrides: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            overrides: overrides
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        if let Some(s) = self.overrides.get(key) {
            return s.clone();
        }
        ENGLISH
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
            .unwrap_or_else(|| key.to_string())
    }
}
