//! Command-line host for the prose editing core.

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use prose_core::{Document, EditorConfig, EditorMode};
use serde_json::json;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "prose", about = "Inspect and edit text files with the prose core", version)]
struct Cli {
    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Print timing for load and edit steps
    #[arg(long, global = true)]
    timing: bool,

    /// Soft-wrap column (overrides PROSE_WRAP_COL)
    #[arg(short = 'w', long, global = true, env = "PROSE_WRAP_COL")]
    wrap_col: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Character, word and line counts
    Stats { file: PathBuf },
    /// Print the file as soft-wrapped visual rows
    Wrap { file: PathBuf },
    /// Print logical lines with line numbers
    Lines {
        file: PathBuf,
        /// First line to print (1-based)
        #[arg(short, long, default_value = "1")]
        from: usize,
        /// Number of lines to print
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Replace every case-insensitive match and save atomically
    Replace {
        file: PathBuf,
        query: String,
        replacement: String,
        /// Write to this path instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Report matches without writing
        #[arg(long)]
        dry_run: bool,
    },
}

fn log_timing(timing: bool, label: &str, duration: Duration) {
    if timing {
        eprintln!(
            "[timing] {}: {:.1} ms",
            label,
            duration.as_secs_f64() * 1000.0
        );
    }
}

fn load_document(path: &Path, config: &EditorConfig, timing: bool) -> Result<Document> {
    let started = Instant::now();
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut doc = Document::from_bytes(&bytes, config)
        .with_context(|| format!("failed to load {}", path.display()))?;
    doc.set_mode(EditorMode::for_path(path));
    log_timing(timing, "load", started.elapsed());
    Ok(doc)
}

/// Replaces `path` with `bytes` through a temp file in the same directory.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

fn format_stats(doc: &mut Document, json: bool) -> Result<String> {
    let stats = doc.stats();
    if json {
        return Ok(serde_json::to_string_pretty(&stats)?);
    }
    Ok(format!(
        "chars: {}\nwords: {}\nlines: {}",
        stats.chars, stats.words, stats.lines
    ))
}

fn visual_rows(doc: &mut Document) -> Vec<String> {
    let rows = doc.visual_row_count();
    (0..rows)
        .map(|row| {
            let start = doc.visual_row_start(row);
            let end = doc.visual_row_end(row);
            doc.extract_text(start, end - start)
        })
        .collect()
}

fn format_lines(doc: &Document, from: usize, count: Option<usize>, json: bool) -> Result<String> {
    let first = from.max(1) - 1;
    let last = count
        .map(|count| first.saturating_add(count))
        .unwrap_or(usize::MAX)
        .min(doc.line_count());
    let lines: Vec<(usize, String)> = (first..last)
        .map(|line| {
            let start = doc.line_start(line);
            (line + 1, doc.extract_text(start, doc.line_end(line) - start))
        })
        .collect();
    if json {
        let items: Vec<_> = lines
            .iter()
            .map(|(number, text)| json!({ "line": number, "text": text }))
            .collect();
        return Ok(serde_json::to_string_pretty(&items)?);
    }
    let width = last.to_string().len();
    Ok(lines
        .iter()
        .map(|(number, text)| format!("{:>width$} | {}", number, text, width = width))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn run(cli: Cli) -> Result<()> {
    let mut config = EditorConfig::from_env();
    if let Some(cols) = cli.wrap_col {
        config.wrap_col = cols;
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
        Commands::Stats { file } => {
            let mut doc = load_document(&file, &config, cli.timing)?;
            println!("{}", format_stats(&mut doc, cli.json)?);
        }
        Commands::Wrap { file } => {
            let mut doc = load_document(&file, &config, cli.timing)?;
            doc.set_mode(EditorMode::Prose);
            let started = Instant::now();
            let rows = visual_rows(&mut doc);
            log_timing(cli.timing, "wrap", started.elapsed());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in rows {
                    println!("{}", row);
                }
            }
        }
        Commands::Lines { file, from, count } => {
            let doc = load_document(&file, &config, cli.timing)?;
            println!("{}", format_lines(&doc, from, count, cli.json)?);
        }
        Commands::Replace {
            file,
            query,
            replacement,
            output,
            dry_run,
        } => {
            if query.is_empty() {
                bail!("query must not be empty");
            }
            let mut doc = load_document(&file, &config, cli.timing)?;
            let started = Instant::now();
            let replaced = if dry_run {
                doc.find_all(&query).len()
            } else {
                doc.replace_all(&query, &replacement)
            };
            log_timing(cli.timing, "replace", started.elapsed());
            let target = output.unwrap_or_else(|| file.clone());
            if !dry_run && (replaced > 0 || target != file) {
                write_atomic(&target, &doc.to_bytes())?;
                doc.mark_saved();
                info!(path = %target.display(), replaced, "saved");
            }
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "replaced": replaced,
                        "dry_run": dry_run,
                        "path": target.display().to_string(),
                    }))?
                );
            } else if dry_run {
                println!("{} match(es) in {}", replaced, file.display());
            } else {
                println!("Replaced {} match(es) in {}", replaced, target.display());
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prose_cli=info,prose_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    run(Cli::parse())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_from(text: &str) -> Document {
        Document::from_text(text)
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["prose", "stats", "notes.txt", "--json", "-w", "40"])
            .expect("parse");
        assert!(cli.json);
        assert_eq!(cli.wrap_col, Some(40));
        assert!(matches!(cli.command, Commands::Stats { .. }));
    }

    #[test]
    fn cli_verifies() {
        Cli::command().debug_assert();
    }

    #[test]
    fn stats_output_formats() {
        let mut doc = doc_from("two words\nthree");
        assert_eq!(
            format_stats(&mut doc, false).expect("text"),
            "chars: 15\nwords: 3\nlines: 2"
        );
        let json: serde_json::Value =
            serde_json::from_str(&format_stats(&mut doc, true).expect("json")).expect("parse");
        assert_eq!(json["words"], 3);
    }

    #[test]
    fn lines_output_is_numbered_and_windowed() {
        let doc = doc_from("a\nb\nc\nd");
        assert_eq!(
            format_lines(&doc, 2, Some(2), false).expect("lines"),
            "2 | b\n3 | c"
        );
        assert_eq!(format_lines(&doc, 0, None, false).expect("lines").lines().count(), 4);
    }

    #[test]
    fn visual_rows_follow_wrap_col() {
        let mut doc = doc_from("hello world wrapped text");
        doc.set_wrap_col(10);
        assert_eq!(
            visual_rows(&mut doc),
            vec!["hello ", "world ", "wrapped ", "text"]
        );
    }

    #[test]
    fn atomic_write_replaces_file_and_keeps_line_endings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"cat\r\ncat\r\n").expect("seed");
        let config = EditorConfig::default();
        let mut doc = load_document(&path, &config, false).expect("load");
        assert_eq!(doc.replace_all("CAT", "dog"), 2);
        write_atomic(&path, &doc.to_bytes()).expect("write");
        assert_eq!(fs::read(&path).expect("read"), b"dog\r\ndog\r\n");
    }

    #[test]
    fn load_reports_missing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_document(&dir.path().join("missing.txt"), &EditorConfig::default(), false)
            .expect_err("missing");
        assert!(err.to_string().contains("failed to read"));
    }
}
