//! HashBridge CLI - hash a list of files concurrently
//!
//! Prints one line per input path, in input order. Exits with status 1 if
//! any file could not be hashed.

use anyhow::{bail, Context, Result};
use clap::Parser;
use hashbridge::config::{CliArgs, EngineConfig, OutputFormat};
use hashbridge::core::{path_to_bytes, FileOutcome, HashEngine};
use hashbridge::logging::init_logging;
use serde::Serialize;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

fn main() {
    let args = CliArgs::parse();

    // Initialize logging; RUST_LOG overrides -v
    let directive = match std::env::var_os("RUST_LOG") {
        Some(_) => None,
        None => Some(args.log_directive()),
    };
    init_logging(directive, false);

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

/// Returns whether every file was hashed successfully
fn run(args: CliArgs) -> Result<bool> {
    let config = EngineConfig::from_cli(&args)?;
    let engine = HashEngine::new(config)?;

    let mut paths = args.paths.clone();
    if let Some(list) = &args.paths_from {
        paths.extend(read_path_list(list)?);
    }

    if paths.is_empty() {
        bail!("no paths given\nUsage: hashbridge <PATH>... [OPTIONS]\n       hashbridge --help for more information");
    }

    let raw: Vec<Vec<u8>> = paths.iter().map(|p| path_to_bytes(p)).collect();
    let results = engine.hash_many(&raw);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => print_text(&mut out, &paths, &results)?,
        OutputFormat::Json => print_json(&mut out, &paths, &results)?,
    }

    Ok(!results.iter().any(FileOutcome::is_failure))
}

/// Read newline-separated paths from a file, or stdin for `-`
fn read_path_list(list: &Path) -> Result<Vec<PathBuf>> {
    let reader: Box<dyn BufRead> = if list == Path::new("-") {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let file = std::fs::File::open(list)
            .with_context(|| format!("cannot open path list {}", list.display()))?;
        Box::new(BufReader::new(file))
    };

    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line.context("failed to read path list")?;
        if !line.is_empty() {
            paths.push(PathBuf::from(line));
        }
    }
    Ok(paths)
}

fn print_text(out: &mut impl Write, paths: &[PathBuf], results: &[FileOutcome]) -> Result<()> {
    for (path, result) in paths.iter().zip(results) {
        match result.digest() {
            Some(digest) => writeln!(out, "{}  {}", digest, path.display())?,
            None => writeln!(out, "{}", result.to_wire_string())?,
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    input: String,
    #[serde(flatten)]
    outcome: &'a FileOutcome,
}

fn print_json(out: &mut impl Write, paths: &[PathBuf], results: &[FileOutcome]) -> Result<()> {
    let entries: Vec<JsonEntry<'_>> = paths
        .iter()
        .zip(results)
        .map(|(path, outcome)| JsonEntry {
            input: path.display().to_string(),
            outcome,
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &entries)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbridge::core::FileFailure;
    use hashbridge::hash::hash_bytes;
    use hashbridge::HashAlgorithm;

    #[test]
    fn test_json_keys_unique() {
        let paths = vec![PathBuf::from("/tmp/ok.txt"), PathBuf::from("/tmp/missing.txt")];
        let results = vec![
            FileOutcome::Hashed(hash_bytes(b"ok", HashAlgorithm::Sha256)),
            FileOutcome::Failed(FileFailure {
                path: b"/tmp/missing.txt".to_vec(),
                kind: std::io::ErrorKind::NotFound,
                message: "No such file or directory (os error 2)".to_string(),
            }),
        ];

        let mut buf = Vec::new();
        print_json(&mut buf, &paths, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();

        // Exactly one "input" per entry; "path" only from the failure record
        assert_eq!(text.matches("\"input\"").count(), 2);
        assert_eq!(text.matches("\"path\"").count(), 1);

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["input"], "/tmp/ok.txt");
        assert_eq!(parsed[0]["status"], "hashed");
        assert_eq!(parsed[1]["input"], "/tmp/missing.txt");
        assert_eq!(parsed[1]["path"], "/tmp/missing.txt");
        assert_eq!(parsed[1]["status"], "failed");
    }

    #[test]
    fn test_run_without_paths_is_error() {
        let args = CliArgs::parse_from(["hashbridge"]);
        assert!(run(args).is_err());
    }
}
