use std::path::{Path, PathBuf};
use std::sync::Arc;

use braillist_core::document::{parse_detections, transcribe_document, DocumentResult};
use colored::Colorize;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::config::Settings;
use crate::prelude::{eprintln, println, *};

pub const PREDICTIONS_FILE: &str = "predictions.txt";
pub const LAYOUT_FILE: &str = "layout.json";
pub const BRAILLE_FILE: &str = "assembled_braille.txt";
pub const TEXT_FILE: &str = "translated.txt";

#[derive(Debug, clap::Args, Clone)]
pub struct TranscribeOptions {
    /// Detection documents (JSON)
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write artifacts under this directory, one folder per input
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One transcribed input, named after its file stem.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentOutput {
    pub name: String,
    #[serde(flatten)]
    pub result: DocumentResult,
}

pub async fn run(options: TranscribeOptions, settings: Settings) -> Result<()> {
    let settings = Arc::new(settings);

    let progress = (options.inputs.len() > 1).then(|| {
        let bar = ProgressBar::new(options.inputs.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    });

    let tasks = options.inputs.iter().cloned().map(|path| {
        let settings = settings.clone();
        let progress = progress.clone();
        tokio::task::spawn_blocking(move || {
            let output = transcribe_file(&path, &settings);
            if let Some(bar) = &progress {
                bar.set_message(path.display().to_string());
                bar.inc(1);
            }
            output
        })
    });

    let joined = join_all(tasks).await;

    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }

    // Documents are independent: a bad input is reported and skipped, the
    // rest are still written.
    let mut failed = 0;
    let mut outputs = Vec::with_capacity(joined.len());
    for (path, output) in options.inputs.iter().zip(joined) {
        match output.map_err(|err| eyre!(err)).and_then(|output| output) {
            Ok(output) => outputs.push(output),
            Err(err) => {
                failed += 1;
                eprintln!("{} {}: {err:#}", "error:".red(), path.display());
            }
        }
    }

    if let Some(root) = &options.output {
        for output in &outputs {
            match write_artifacts(root, output) {
                Ok(dir) if settings.verbose => {
                    println!("{} {}", "Wrote".green(), dir.display())
                }
                Ok(_) => {}
                Err(err) => {
                    failed += 1;
                    eprintln!("{} {}: {err:#}", "error:".red(), output.name);
                }
            }
        }
    } else if options.json {
        output_json(&outputs)?;
    } else {
        output_formatted(&outputs);
    }

    if failed > 0 {
        return Err(eyre!("{failed} of {} inputs failed", options.inputs.len()));
    }
    Ok(())
}

/// Read, parse and transcribe one detection document.
pub fn transcribe_file(path: &Path, settings: &Settings) -> Result<DocumentOutput> {
    let src = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let detections =
        parse_detections(&src).wrap_err_with(|| format!("Failed to parse {}", path.display()))?;

    log::debug!("{}: {} detections", path.display(), detections.len());

    let result = transcribe_document(detections, &settings.pipeline, &settings.registry);

    Ok(DocumentOutput {
        name: document_name(path),
        result,
    })
}

fn document_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

/// Write the four artifacts of `output` into `<root>/<name>/`.
pub fn write_artifacts(root: &Path, output: &DocumentOutput) -> Result<PathBuf> {
    let dir = root.join(&output.name);
    std::fs::create_dir_all(&dir)
        .wrap_err_with(|| format!("Failed to create {}", dir.display()))?;

    let layout = serde_json::to_string_pretty(&output.result.records)?;
    let files = [
        (PREDICTIONS_FILE, output.result.predictions()),
        (LAYOUT_FILE, layout),
        (BRAILLE_FILE, output.result.braille.to_string()),
        (TEXT_FILE, output.result.text.clone()),
    ];

    for (file, contents) in files {
        let path = dir.join(file);
        std::fs::write(&path, contents)
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(dir)
}

fn output_json(outputs: &[DocumentOutput]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(outputs)?);
    Ok(())
}

fn output_formatted(outputs: &[DocumentOutput]) {
    for output in outputs {
        let result = &output.result;
        println!(
            "{} {}",
            output.name.bold().cyan(),
            format!("({}, {} cells)", result.language, result.records.len()).dimmed()
        );
        println!("{}", result.braille);
        println!("{}", result.text);

        for diagnostic in &result.diagnostics {
            eprintln!("{} {}", "warning:".yellow(), diagnostic);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use braillist_core::document::PipelineConfig;
    use braillist_core::language::Registry;
    use std::fs;
    use tempfile::TempDir;

    fn settings() -> Settings {
        Settings {
            pipeline: PipelineConfig::default(),
            registry: Arc::new(Registry::builtin().unwrap()),
            source: None,
            verbose: false,
        }
    }

    const PAGE: &str = r#"{"detections":[
        {"label":"6","box":[0,0,10,15]},
        {"label":"125","box":[11,0,21,15]},
        {"label":"15","box":[22,0,32,15]},
        {"label":"2345","box":[0,30,10,45]}
    ]}"#;

    #[test]
    fn test_transcribe_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page_01.json");
        fs::write(&path, PAGE).unwrap();

        let output = transcribe_file(&path, &settings()).unwrap();
        assert_eq!(output.name, "page_01");
        assert_eq!(output.result.braille.as_str(), "⠠⠓⠑ ⠞");
        assert_eq!(output.result.text, "He t");
    }

    #[test]
    fn test_transcribe_file_reports_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{\"detections\": 3}").unwrap();
        assert!(transcribe_file(&path, &settings()).is_err());
    }

    #[test]
    fn test_write_artifacts() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("page.json");
        fs::write(&input, PAGE).unwrap();
        let output = transcribe_file(&input, &settings()).unwrap();

        let out_dir = write_artifacts(&dir.path().join("out"), &output).unwrap();
        assert_eq!(out_dir, dir.path().join("out").join("page"));

        let predictions = fs::read_to_string(out_dir.join(PREDICTIONS_FILE)).unwrap();
        assert_eq!(predictions.lines().collect::<Vec<_>>(), ["6", "125", "15", "2345"]);

        let braille = fs::read_to_string(out_dir.join(BRAILLE_FILE)).unwrap();
        assert_eq!(braille, "⠠⠓⠑ ⠞");

        let text = fs::read_to_string(out_dir.join(TEXT_FILE)).unwrap();
        assert_eq!(text, "He t");

        let layout: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out_dir.join(LAYOUT_FILE)).unwrap()).unwrap();
        assert_eq!(layout[3]["order"], 4);
        assert_eq!(layout[3]["row"], 1);
        assert_eq!(layout[3]["label"], "2345");
    }

    #[tokio::test]
    async fn test_run_writes_every_input() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        fs::write(&a, PAGE).unwrap();
        fs::write(&b, "[]").unwrap();

        let options = TranscribeOptions {
            inputs: vec![a, b],
            output: Some(dir.path().join("out")),
            json: false,
        };
        run(options, settings()).await.unwrap();

        assert!(dir.path().join("out/a").join(TEXT_FILE).exists());
        let empty = fs::read_to_string(dir.path().join("out/b").join(TEXT_FILE)).unwrap();
        assert_eq!(empty, "");
    }

    #[tokio::test]
    async fn test_run_writes_good_inputs_when_one_fails() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        fs::write(&good, PAGE).unwrap();
        fs::write(&bad, "not json").unwrap();

        let options = TranscribeOptions {
            inputs: vec![bad, dir.path().join("missing.json"), good],
            output: Some(dir.path().join("out")),
            json: false,
        };
        let err = run(options, settings()).await.unwrap_err();
        assert!(err.to_string().contains("2 of 3"));

        let text = fs::read_to_string(dir.path().join("out/good").join(TEXT_FILE)).unwrap();
        assert_eq!(text, "He t");
        assert!(!dir.path().join("out/bad").exists());
    }
}
