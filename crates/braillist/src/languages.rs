use braillist_core::language::{Grade, Registry};
use braillist_core::transcribe::Strategy;
use colored::Colorize;
use serde::Serialize;

use crate::config::Settings;
use crate::prelude::{println, *};

#[derive(Debug, clap::Args, Clone)]
pub struct LanguagesOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageInfo {
    pub name: String,
    pub capital: Option<char>,
    pub numeric: char,
    pub ignored: Vec<char>,
    pub letters: usize,
    pub contractions: usize,
    pub corrections: usize,
}

impl LanguageInfo {
    fn new(strategy: &Strategy, contracted: &Strategy) -> Self {
        let dictionary = strategy.dictionary();
        Self {
            name: strategy.language().to_string(),
            capital: dictionary.capital(),
            numeric: dictionary.numeric(),
            ignored: dictionary.ignored().to_vec(),
            letters: dictionary.letter_count(),
            contractions: contracted.dictionary().contractions().len(),
            corrections: strategy.corrections().map_or(0, |table| table.len()),
        }
    }
}

/// One entry per language, grade 2 rule counts included.
pub fn language_infos(registry: &Registry) -> Vec<LanguageInfo> {
    registry
        .strategies()
        .filter(|s| s.grade() == Grade::One)
        .map(|s| LanguageInfo::new(s, registry.get(s.language(), Grade::Two)))
        .collect()
}

pub fn run(options: LanguagesOptions, settings: &Settings) -> Result<()> {
    let infos = language_infos(&settings.registry);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Language".bold(),
        "Capital".bold(),
        "Numeric".bold(),
        "Ignored".bold(),
        "Letters".bold(),
        "Grade 2 rules".bold(),
        "Corrections".bold()
    ]);

    for info in &infos {
        let ignored: String = info.ignored.iter().collect();
        table.add_row(prettytable::row![
            info.name,
            info.capital.map_or_else(|| "-".to_string(), String::from),
            info.numeric,
            if ignored.is_empty() { "-".to_string() } else { ignored },
            info.letters,
            info.contractions,
            info.corrections
        ]);
    }

    table.printstd();
    Ok(())
}
