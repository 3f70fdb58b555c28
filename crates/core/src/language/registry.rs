//! Lookup of a ready-to-use [`Strategy`] per `(language, grade)`.
//!
//! The registry is built once and only read afterwards. [`Registry::global`]
//! holds the built-in one for the whole process; hosts that swap correction
//! tables build their own with [`Registry::with_corrections`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::diagnostic::Diagnostic;
use crate::transcribe::Strategy;
use crate::CoreError;

use super::alphabets;
use super::corrections::{self, CorrectionTable};
use super::{Grade, Language};

#[derive(Debug, Clone)]
pub struct Registry {
    strategies: BTreeMap<(Language, Grade), Strategy>,
}

/// Outcome of a by-name lookup.
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    pub strategy: &'a Strategy,
    /// Set when the requested name was not recognized.
    pub fallback: Option<Diagnostic>,
}

impl Registry {
    /// Every language at both grades, with the shipped correction tables.
    pub fn builtin() -> Result<Self, CoreError> {
        let mut strategies = BTreeMap::new();
        for language in Language::ALL {
            let table = builtin_corrections(language)?;
            for grade in [Grade::One, Grade::Two] {
                let dictionary = alphabets::dictionary(language, grade)?;
                strategies.insert((language, grade), Strategy::new(dictionary, table.clone()));
            }
        }
        Ok(Self { strategies })
    }

    /// Process-wide registry built from the embedded data.
    pub fn global() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(|| Registry::builtin().expect("built-in language data is valid"))
    }

    /// Replace (or with `None`, remove) the correction table of `language`
    /// at every grade.
    pub fn with_corrections(mut self, language: Language, table: Option<CorrectionTable>) -> Self {
        for ((lang, _), strategy) in self.strategies.iter_mut() {
            if *lang == language {
                strategy.set_corrections(table.clone());
            }
        }
        self
    }

    pub fn get(&self, language: Language, grade: Grade) -> &Strategy {
        // Every pair is populated by `builtin`.
        &self.strategies[&(language, grade)]
    }

    /// Case-insensitive lookup. Unknown names resolve to
    /// [`Language::DEFAULT`] and carry a [`Diagnostic::LanguageFallback`].
    pub fn resolve(&self, name: &str, grade: Grade) -> Resolved<'_> {
        match Language::from_name(name) {
            Some(language) => Resolved {
                strategy: self.get(language, grade),
                fallback: None,
            },
            None => {
                log::warn!("Unknown language {name:?}, falling back to {}", Language::DEFAULT);
                Resolved {
                    strategy: self.get(Language::DEFAULT, grade),
                    fallback: Some(Diagnostic::LanguageFallback {
                        requested: name.to_string(),
                        resolved: Language::DEFAULT.to_string(),
                    }),
                }
            }
        }
    }

    pub fn strategies(&self) -> impl Iterator<Item = &Strategy> {
        self.strategies.values()
    }
}

fn builtin_corrections(language: Language) -> Result<Option<CorrectionTable>, CoreError> {
    match language {
        Language::Russian => CorrectionTable::from_toml(language, corrections::RUSSIAN).map(Some),
        Language::English | Language::French | Language::Arabic => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcribe::Transcriber;

    #[test]
    fn test_builtin_covers_every_pair() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(registry.strategies().count(), Language::ALL.len() * 2);
        for language in Language::ALL {
            let strategy = registry.get(language, Grade::Two);
            assert_eq!(strategy.language(), language);
            assert_eq!(strategy.grade(), Grade::Two);
        }
    }

    #[test]
    fn test_only_russian_ships_corrections() {
        let registry = Registry::global();
        assert!(registry.get(Language::Russian, Grade::One).corrections().is_some());
        assert!(registry.get(Language::English, Grade::One).corrections().is_none());
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let resolved = Registry::global().resolve("RuSsIaN", Grade::One);
        assert_eq!(resolved.strategy.language(), Language::Russian);
        assert!(resolved.fallback.is_none());
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let resolved = Registry::global().resolve("klingon", Grade::Two);
        assert_eq!(resolved.strategy.language(), Language::English);
        assert_eq!(resolved.strategy.grade(), Grade::Two);
        assert_eq!(
            resolved.fallback,
            Some(Diagnostic::LanguageFallback {
                requested: "klingon".into(),
                resolved: "english".into(),
            })
        );
    }

    #[test]
    fn test_with_corrections_swaps_table() {
        let table = CorrectionTable::from_toml(Language::English, "[words]\nteh = \"the\"").unwrap();
        let registry = Registry::builtin()
            .unwrap()
            .with_corrections(Language::English, Some(table))
            .with_corrections(Language::Russian, None);

        let english = registry.get(Language::English, Grade::One);
        assert_eq!(english.decode("⠞⠑⠓").text, "the");
        assert!(registry.get(Language::Russian, Grade::Two).corrections().is_none());
    }
}
