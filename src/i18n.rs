//! Localized message tables.
//!
//! All user-facing strings come from JSON tables embedded at compile time,
//! one per language. Lookup never fails: an unknown language falls back to
//! the default table and an unknown key is echoed back.

use std::collections::HashMap;

const FR_TABLE: &str = include_str!("../locales/fr.json");
const AR_TABLE: &str = include_str!("../locales/ar.json");

/// Languages with an embedded table.
pub const LANGUAGES: &[&str] = &["fr", "ar"];

/// A loaded message table.
#[derive(Debug, Clone)]
pub struct Messages {
    table: HashMap<String, String>,
}

impl Messages {
    /// Loads the table for a language, falling back to French for an
    /// unknown language tag.
    pub fn load(language: &str) -> Self {
        let raw = match language {
            "ar" => AR_TABLE,
            _ => FR_TABLE,
        };

        let table: HashMap<String, String> =
            serde_json::from_str(raw).expect("embedded locale table is valid JSON");

        Self { table }
    }

    /// Looks up a message by key, echoing the key when missing.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.table.get(key).map_or(key, String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key_resolves() {
        let messages = Messages::load("fr");
        assert_eq!(messages.get("wrongOTP"), "Code incorrect");
    }

    #[test]
    fn test_unknown_language_falls_back_to_french() {
        let messages = Messages::load("de");
        assert_eq!(messages.get("wrongOTP"), "Code incorrect");
    }

    #[test]
    fn test_missing_key_echoes_key() {
        let messages = Messages::load("fr");
        assert_eq!(messages.get("noSuchKey"), "noSuchKey");
    }

    #[test]
    fn test_tables_share_key_sets() {
        let fr: HashMap<String, String> = serde_json::from_str(FR_TABLE).unwrap();
        let ar: HashMap<String, String> = serde_json::from_str(AR_TABLE).unwrap();

        let mut fr_keys: Vec<_> = fr.keys().collect();
        let mut ar_keys: Vec<_> = ar.keys().collect();
        fr_keys.sort();
        ar_keys.sort();
        assert_eq!(fr_keys, ar_keys);
    }
}
