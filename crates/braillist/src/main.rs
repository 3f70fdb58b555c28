use std::path::PathBuf;

use crate::prelude::*;
use clap::Parser;

mod codec;
mod config;
mod error;
mod languages;
mod prelude;
mod transcribe;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Reconstruct reading order for pages of detected braille cells and transcribe them"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Path to a TOML config file
    #[clap(long, env = "BRAILLIST_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Transcription language (english, french, arabic, russian)
    #[clap(short, long, env = "BRAILLIST_LANGUAGE", global = true)]
    language: Option<String>,

    /// Braille grade
    #[clap(short, long, env = "BRAILLIST_GRADE", global = true, value_enum)]
    grade: Option<GradeArg>,

    /// Multiplier on the mean cell width above which a gap is a word space
    #[clap(long, env = "BRAILLIST_SPACE_FACTOR", global = true)]
    space_factor: Option<f32>,

    /// Whether to display additional information.
    #[clap(long, env = "BRAILLIST_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum GradeArg {
    /// Uncontracted
    #[value(name = "1")]
    One,
    /// Contracted
    #[value(name = "2")]
    Two,
}

impl From<GradeArg> for braillist_core::language::Grade {
    fn from(g: GradeArg) -> Self {
        match g {
            GradeArg::One => braillist_core::language::Grade::One,
            GradeArg::Two => braillist_core::language::Grade::Two,
        }
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Order detected cells into lines and transcribe each document
    Transcribe(crate::transcribe::TranscribeOptions),

    /// Decode a braille string to text
    Decode(crate::codec::CodecOptions),

    /// Encode text to braille
    Encode(crate::codec::CodecOptions),

    /// List supported languages and their control symbols
    Languages(crate::languages::LanguagesOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();
    let settings = config::Settings::resolve(&app.global)?;

    if app.global.verbose {
        settings.print();
    }

    match app.command {
        SubCommands::Transcribe(options) => crate::transcribe::run(options, settings).await,
        SubCommands::Decode(options) => crate::codec::decode(options, &settings),
        SubCommands::Encode(options) => crate::codec::encode(options, &settings),
        SubCommands::Languages(options) => crate::languages::run(options, &settings),
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
