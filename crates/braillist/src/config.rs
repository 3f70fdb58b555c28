//! Settings resolution: CLI flag, then environment (both through clap), then
//! the TOML config file, then built-in defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use braillist_core::document::PipelineConfig;
use braillist_core::language::{CorrectionTable, Grade, Language, Registry};
use braillist_core::spacing::{DEFAULT_SPACING_FACTOR, SPACING_FACTOR_RANGE};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::prelude::{println, *};

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub language: Option<String>,
    pub grade: Option<Grade>,
    pub space_factor: Option<f32>,
    /// Language name -> correction table path. Relative paths are resolved
    /// against the config file's directory.
    pub corrections: BTreeMap<String, PathBuf>,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub language: Option<String>,
    pub grade: Option<Grade>,
    pub space_factor: Option<f32>,
}

/// Everything a subcommand needs to run the core.
#[derive(Debug, Clone)]
pub struct Settings {
    pub pipeline: PipelineConfig,
    pub registry: Arc<Registry>,
    /// Config file that was read, if any.
    pub source: Option<PathBuf>,
    pub verbose: bool,
}

impl Settings {
    pub fn resolve(global: &crate::Global) -> Result<Self> {
        let overrides = Overrides {
            language: global.language.clone(),
            grade: global.grade.map(Into::into),
            space_factor: global.space_factor,
        };

        let source = match &global.config {
            Some(path) if !path.exists() => {
                return Err(Error::ConfigNotFound(path.display().to_string()).into())
            }
            Some(path) => Some(path.clone()),
            None => default_config_path().filter(|path| path.exists()),
        };

        let file = match &source {
            Some(path) => load_file(path)?,
            None => FileConfig::default(),
        };

        let base = source.as_deref().and_then(Path::parent);
        let registry = load_registry(&file.corrections, base)?;
        let pipeline = merge(file, overrides)?;

        Ok(Self {
            pipeline,
            registry: Arc::new(registry),
            source,
            verbose: global.verbose,
        })
    }

    pub fn print(&self) {
        let source = self
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string());
        println!("{} {}", "Config:".bold(), source);
        println!("{} {}", "Language:".bold(), self.pipeline.language);
        println!("{} {}", "Grade:".bold(), self.pipeline.grade);
        println!("{} {}", "Space factor:".bold(), self.pipeline.space_factor);
        println!();
    }
}

/// `<config_dir>/braillist/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join("braillist").join("config.toml"))
}

pub fn load_file(path: &Path) -> Result<FileConfig> {
    let src = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&src).wrap_err_with(|| format!("Invalid config file {}", path.display()))
}

/// Apply `overrides` on top of `file` and check the spacing factor.
pub fn merge(file: FileConfig, overrides: Overrides) -> Result<PipelineConfig> {
    let space_factor = overrides
        .space_factor
        .or(file.space_factor)
        .unwrap_or(DEFAULT_SPACING_FACTOR);

    if !SPACING_FACTOR_RANGE.contains(&space_factor) {
        return Err(Error::SpaceFactor(space_factor).into());
    }

    Ok(PipelineConfig {
        language: overrides
            .language
            .or(file.language)
            .unwrap_or_else(|| Language::DEFAULT.to_string()),
        grade: overrides.grade.or(file.grade).unwrap_or_default(),
        space_factor,
    })
}

/// Built-in registry with any configured correction tables swapped in.
pub fn load_registry(corrections: &BTreeMap<String, PathBuf>, base: Option<&Path>) -> Result<Registry> {
    let mut registry = Registry::builtin()?;

    for (name, path) in corrections {
        let language =
            Language::from_name(name).ok_or_else(|| Error::UnknownLanguage(name.clone()))?;
        let path = match base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.clone(),
        };
        let src = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read correction table {}", path.display()))?;
        let table = CorrectionTable::from_toml(language, &src)?;
        log::debug!("Loaded {} corrections for {language} from {}", table.len(), path.display());
        registry = registry.with_corrections(language, Some(table));
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use braillist_core::transcribe::Transcriber;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file_or_flags() {
        let config = merge(FileConfig::default(), Overrides::default()).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_flags_beat_file() {
        let file = FileConfig {
            language: Some("russian".into()),
            grade: Some(Grade::Two),
            space_factor: Some(1.5),
            ..FileConfig::default()
        };
        let overrides = Overrides {
            language: Some("french".into()),
            space_factor: Some(1.1),
            ..Overrides::default()
        };
        let config = merge(file, overrides).unwrap();
        assert_eq!(config.language, "french");
        assert_eq!(config.grade, Grade::Two);
        assert_eq!(config.space_factor, 1.1);
    }

    #[test]
    fn test_space_factor_out_of_range_is_rejected() {
        let overrides = Overrides {
            space_factor: Some(2.5),
            ..Overrides::default()
        };
        let err = merge(FileConfig::default(), overrides).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::SpaceFactor(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "language = \"arabic\"\ngrade = 2\nspace_factor = 1.5\n[corrections]\nenglish = \"en.toml\"\n",
        )
        .unwrap();

        let file = load_file(&path).unwrap();
        assert_eq!(file.language.as_deref(), Some("arabic"));
        assert_eq!(file.grade, Some(Grade::Two));
        assert_eq!(file.space_factor, Some(1.5));
        assert_eq!(file.corrections["english"], PathBuf::from("en.toml"));
    }

    #[test]
    fn test_load_file_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "colour = \"blue\"\n").unwrap();
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn test_relative_correction_tables_load() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("en.toml"), "[words]\nteh = \"the\"\n").unwrap();

        let corrections = BTreeMap::from([("English".to_string(), PathBuf::from("en.toml"))]);
        let registry = load_registry(&corrections, Some(dir.path())).unwrap();

        let english = registry.get(Language::English, Grade::One);
        assert_eq!(english.decode("⠞⠑⠓").text, "the");
    }

    #[test]
    fn test_unknown_correction_language_is_an_error() {
        let corrections = BTreeMap::from([("elvish".to_string(), PathBuf::from("x.toml"))]);
        let err = load_registry(&corrections, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::UnknownLanguage(_))
        ));
    }
}
