//! Language name to translation code lookup.
//!
//! Names are matched case-insensitively after trimming. The regional tier is
//! consulted before the other tier, so a name present in both resolves to the
//! regional code.

use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Regional,
    Other,
}

/// A supported target language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    pub name: &'static str,
    pub code: &'static str,
    #[serde(skip)]
    pub tier: Tier,
}

const REGIONAL_LANGUAGES: &[(&str, &str)] = &[
    ("English", "en"),
    ("Hindi", "hi"),
    ("Gujarati", "gu"),
    ("Arabic", "ar"),
    ("Assamese", "as"),
    ("Bengali", "bn"),
    ("Kannada", "kn"),
    ("Malayalam", "ml"),
    ("Marathi", "mr"),
    ("Nepali", "ne"),
    ("Punjabi", "pa"),
    ("Tamil", "ta"),
    ("Telugu", "te"),
    ("Thai", "th"),
    ("Urdu", "ur"),
    ("Vietnamese", "vi"),
    ("Odia", "or"),
    ("Sindhi", "sd"),
    ("Sinhala", "si"),
    ("Konkani", "gom"),
    ("Maithili", "mai"),
];

const OTHER_LANGUAGES: &[(&str, &str)] = &[
    ("French", "fr"),
    ("German", "de"),
    ("Italian", "it"),
    ("Japanese", "ja"),
    ("Korean", "ko"),
    ("Portuguese", "pt"),
    ("Russian", "ru"),
    ("Spanish", "es"),
    ("Turkish", "tr"),
    ("Afrikaans", "af"),
    ("Albanian", "sq"),
    ("Bulgarian", "bg"),
    ("Catalan", "ca"),
    ("Chinese (Simplified)", "zh-CN"),
    ("Chinese (Traditional)", "zh-TW"),
    ("Croatian", "hr"),
    ("Czech", "cs"),
    ("Danish", "da"),
    ("Dutch", "nl"),
    ("Estonian", "et"),
    ("Filipino", "tl"),
    ("Finnish", "fi"),
    ("Greek", "el"),
    ("Hebrew", "iw"),
    ("Hungarian", "hu"),
    ("Icelandic", "is"),
    ("Indonesian", "id"),
    ("Irish", "ga"),
    ("Latvian", "lv"),
    ("Lithuanian", "lt"),
    ("Malay", "ms"),
    ("Norwegian", "no"),
    ("Persian", "fa"),
    ("Polish", "pl"),
    ("Romanian", "ro"),
    ("Serbian", "sr"),
    ("Slovak", "sk"),
    ("Slovenian", "sl"),
    ("Swahili", "sw"),
    ("Swedish", "sv"),
    ("Ukrainian", "uk"),
    ("Welsh", "cy"),
];

/// Immutable two-tier language table, built once at startup
#[derive(Debug)]
pub struct LanguageTable {
    regional: HashMap<String, Language>,
    other: HashMap<String, Language>,
    ordered: Vec<Language>,
}

impl LanguageTable {
    pub fn builtin() -> Self {
        let mut regional = HashMap::new();
        let mut other = HashMap::new();
        let mut ordered = Vec::with_capacity(REGIONAL_LANGUAGES.len() + OTHER_LANGUAGES.len());

        for (tier, entries, map) in [
            (Tier::Regional, REGIONAL_LANGUAGES, &mut regional),
            (Tier::Other, OTHER_LANGUAGES, &mut other),
        ] {
            for &(name, code) in entries {
                let language = Language { name, code, tier };
                map.insert(normalize(name), language.clone());
                ordered.push(language);
            }
        }

        Self {
            regional,
            other,
            ordered,
        }
    }

    pub fn resolve(&self, name: &str) -> Option<&Language> {
        let key = normalize(name);
        self.regional.get(&key).or_else(|| self.other.get(&key))
    }

    /// Every supported language, regional tier first
    pub fn languages(&self) -> &[Language] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
