//! pubreport - Faculty publication report
//!
//! Converts a JSON export of publication records into an XLSX report,
//! optionally limited to one faculty.
//!
//! ## Usage
//!
//! ```bash
//! pubreport export.json report.xlsx --faculty 9
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use pubreport::{faculty, model, report, transform};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Simplify publications list processing
#[derive(Parser)]
#[command(name = "pubreport")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input file path
    input_file: PathBuf,

    /// Output file path
    output_file: PathBuf,

    /// Faculty ID (all faculties when omitted)
    #[arg(short, long, value_name = "ID", long_help = faculty::selector_help())]
    faculty: Option<faculty::FacultyId>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let filter = faculty::expand_selector(cli.faculty);
    match cli.faculty {
        Some(code) => info!(
            selector = code,
            faculty = faculty::faculty_name(code).unwrap_or("unknown"),
            ids = ?filter.ids().collect::<Vec<_>>(),
            "Filtering by faculty"
        ),
        None => info!("Processing all faculties"),
    }

    let records = model::load_publications(&cli.input_file)
        .with_context(|| format!("Failed to load {}", cli.input_file.display()))?;

    let (rows, stats) = transform::transform_with_stats(&records, &filter);
    info!(
        total = stats.total,
        included = stats.included,
        excluded = stats.excluded,
        "Publications processed"
    );

    report::write_report(&rows, &cli.output_file)
        .with_context(|| format!("Failed to write {}", cli.output_file.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsString;
    use std::io::{Cursor, Read};
    use std::path::Path;

    fn cli_for(input: &Path, output: &Path, extra: &[&str]) -> Cli {
        let mut args: Vec<OsString> = vec!["pubreport".into(), input.into(), output.into()];
        args.extend(extra.iter().map(OsString::from));
        Cli::parse_from(args)
    }

    fn read_part(path: &Path, name: &str) -> Result<String> {
        let bytes = std::fs::read(path)?;
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut xml = String::new();
        archive.by_name(name)?.read_to_string(&mut xml)?;
        Ok(xml)
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::parse_from(["pubreport", "in.json", "out.xlsx", "-f", "9"]);
        assert_eq!(cli.input_file, PathBuf::from("in.json"));
        assert_eq!(cli.output_file, PathBuf::from("out.xlsx"));
        assert_eq!(cli.faculty, Some(9));
        assert!(!cli.debug);

        let cli = Cli::parse_from(["pubreport", "in.json", "out.xlsx"]);
        assert_eq!(cli.faculty, None);
    }

    #[test]
    fn test_rejects_non_numeric_faculty() {
        let parsed =
            Cli::try_parse_from(["pubreport", "in.json", "out.xlsx", "--faculty", "elit"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_run_writes_filtered_report() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("export.json");
        let output = dir.path().join("report.xlsx");

        let export = serde_json::json!([
            {
                "job_title": "Konotop paper",
                "types": "Стаття",
                "indexing": "так",
                "wos": "ні",
                "country": "Україна",
                "pubyear": 2024,
                "author": [{
                    "pib": "Коваль",
                    "fac": { "faculty": "Конотопський інститут", "id": 209 },
                    "dep": { "department": "КІ" }
                }]
            },
            {
                "job_title": "Elit paper",
                "types": "Стаття",
                "indexing": "так",
                "wos": "так",
                "country": "Україна",
                "pubyear": 2024,
                "author": [{
                    "pib": "Петренко",
                    "fac": { "faculty": "ЕЛІТ", "id": 2 },
                    "dep": { "department": "ЕКТ" }
                }]
            }
        ]);
        std::fs::write(&input, export.to_string())?;

        run(&cli_for(&input, &output, &["-f", "9"]))?;

        let sheet = read_part(&output, "xl/worksheets/sheet1.xml")?;
        assert!(sheet.contains(r#"<autoFilter ref="B1:I2"/>"#));
        let strings = read_part(&output, "xl/sharedStrings.xml")?;
        assert!(strings.contains("Konotop paper"));
        assert!(!strings.contains("Elit paper"));
        Ok(())
    }

    #[test]
    fn test_run_fails_on_missing_input() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("report.xlsx");

        let err = run(&cli_for(&dir.path().join("absent.json"), &output, &[]))
            .err()
            .map(|e| e.to_string());
        assert!(err.is_some_and(|msg| msg.starts_with("Failed to load")));
        assert!(!output.exists());
        Ok(())
    }
}
