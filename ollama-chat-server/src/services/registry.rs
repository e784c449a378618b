//! Static mapping from client-facing model keys to backend model names.

use crate::config::Config;

/// Key used when a request names a model key that is not registered.
pub const DEFAULT_MODEL_KEY: &str = "general";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    /// Short alias used by clients, e.g. `"code"`.
    pub key: String,
    /// Backend model identifier, e.g. `"qwen2.5-coder:3b"`.
    pub name: String,
    /// Label shown in the frontend's model picker.
    pub label: String,
}

impl ModelEntry {
    pub fn new(key: impl Into<String>, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            label: label.into(),
        }
    }
}

/// Read-only model table, built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    entries: Vec<ModelEntry>,
}

impl ModelRegistry {
    pub fn new(entries: Vec<ModelEntry>) -> Self {
        Self { entries }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(vec![
            ModelEntry::new(DEFAULT_MODEL_KEY, &cfg.general_model, "💬 General"),
            ModelEntry::new("code", &cfg.code_model, "💻 Code"),
        ])
    }

    /// Backend model for `key`, or the default key's model when `key` is
    /// unknown. An empty registry resolves every key to `""`.
    pub fn resolve(&self, key: &str) -> &str {
        self.entry(key)
            .or_else(|| self.entry(DEFAULT_MODEL_KEY))
            .or_else(|| self.entries.first())
            .map(|e| e.name.as_str())
            .unwrap_or_default()
    }

    /// All entries in registration order.
    pub fn list_models(&self) -> &[ModelEntry] {
        &self.entries
    }

    fn entry(&self, key: &str) -> Option<&ModelEntry> {
        self.entries.iter().find(|e| e.key == key)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn registry() -> ModelRegistry {
        ModelRegistry::from_config(&Config::default())
    }

    #[test]
    fn resolves_registered_keys() {
        let reg = registry();
        assert_eq!(reg.resolve("general"), "qwen2.5:3b");
        assert_eq!(reg.resolve("code"), "qwen2.5-coder:3b");
    }

    #[test]
    fn unknown_key_falls_back_to_general() {
        let reg = registry();
        assert_eq!(reg.resolve("nonexistent-key"), reg.resolve("general"));
        assert_eq!(reg.resolve(""), reg.resolve("general"));
    }

    #[test]
    fn list_keeps_registration_order() {
        let reg = registry();
        let keys: Vec<&str> = reg
            .list_models()
            .iter()
            .map(|e| e.key.as_str())
            .collect();
        assert_eq!(keys, vec!["general", "code"]);
    }

    #[test]
    fn registry_without_default_key_still_resolves() {
        let reg = ModelRegistry::new(vec![ModelEntry::new("only", "llama3", "Only")]);
        assert_eq!(reg.resolve("missing"), "llama3");
    }

    #[test]
    fn empty_registry_resolves_to_empty_name() {
        let reg = ModelRegistry::new(Vec::new());
        assert_eq!(reg.resolve("general"), "");
        assert!(reg.list_models().is_empty());
    }
}
