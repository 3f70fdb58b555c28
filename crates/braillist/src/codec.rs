use std::io::Read;

use braillist_core::language::{Grade, Language, Registry};
use braillist_core::transcribe::Transcriber;
use braillist_core::Diagnostic;
use colored::Colorize;
use serde::Serialize;

use crate::config::Settings;
use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Args, Clone)]
pub struct CodecOptions {
    /// Input string; read from stdin when omitted
    #[arg(value_name = "INPUT")]
    pub input: Option<String>,

    /// Output as JSON, diagnostics included
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodecOutput {
    pub language: Language,
    pub grade: Grade,
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy)]
pub enum Direction {
    Decode,
    Encode,
}

pub fn decode(options: CodecOptions, settings: &Settings) -> Result<()> {
    run(Direction::Decode, options, settings)
}

pub fn encode(options: CodecOptions, settings: &Settings) -> Result<()> {
    run(Direction::Encode, options, settings)
}

fn run(direction: Direction, options: CodecOptions, settings: &Settings) -> Result<()> {
    let input = read_input(options.input)?;
    let output = convert(
        direction,
        &input,
        &settings.registry,
        &settings.pipeline.language,
        settings.pipeline.grade,
    );

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output.output);
        for diagnostic in &output.diagnostics {
            eprintln!("{} {}", "warning:".yellow(), diagnostic);
        }
    }

    Ok(())
}

/// Decode or encode `input` with the strategy `language` resolves to.
pub fn convert(
    direction: Direction,
    input: &str,
    registry: &Registry,
    language: &str,
    grade: Grade,
) -> CodecOutput {
    let resolved = registry.resolve(language, grade);
    let mut diagnostics: Vec<Diagnostic> = resolved.fallback.into_iter().collect();

    let output = match direction {
        Direction::Decode => {
            let transcription = resolved.strategy.decode(input);
            diagnostics.extend(transcription.diagnostics);
            transcription.text
        }
        Direction::Encode => {
            let encoding = resolved.strategy.encode(input);
            diagnostics.extend(encoding.diagnostics);
            encoding.braille.into_string()
        }
    };

    CodecOutput {
        language: resolved.strategy.language(),
        grade: resolved.strategy.grade(),
        output,
        diagnostics,
    }
}

fn read_input(arg: Option<String>) -> Result<String> {
    if let Some(input) = arg {
        return Ok(input);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .wrap_err("Failed to read stdin")?;

    let trimmed = buffer.trim_end_matches(['\n', '\r']);
    if trimmed.is_empty() {
        return Err(Error::MissingInput.into());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let out = convert(
            Direction::Decode,
            "⠠⠓⠑⠇⠇⠕⠂⠀⠺⠕⠗⠇⠙⠖",
            Registry::global(),
            "english",
            Grade::One,
        );
        assert_eq!(out.output, "Hello, world!");
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn test_encode() {
        let out = convert(
            Direction::Encode,
            "Привет",
            Registry::global(),
            "russian",
            Grade::One,
        );
        assert_eq!(out.output, "⠘⠏⠗⠊⠺⠑⠞");
        assert_eq!(out.language, Language::Russian);
    }

    #[test]
    fn test_fallback_is_reported() {
        let out = convert(Direction::Encode, "a", Registry::global(), "latin", Grade::One);
        assert_eq!(out.output, "⠁");
        assert!(matches!(
            out.diagnostics.as_slice(),
            [Diagnostic::LanguageFallback { .. }]
        ));
    }

    #[test]
    fn test_argument_wins_over_stdin() {
        assert_eq!(read_input(Some("⠁".into())).unwrap(), "⠁");
    }
}
