//! Extract totals from one or more PDF invoices.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use console::style;
use glob::glob;
use rust_decimal::Decimal;
use tracing::warn;

use cotejo_core::{
    format_amount, ExtractionMethod, ExtractionResult, ExtractorConfig, PdfExtractor,
    TotalExtractor,
};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Smallest amount accepted as a plausible total
    #[arg(long)]
    min_total: Option<Decimal>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub async fn run(args: ExtractArgs) -> anyhow::Result<()> {
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("no matching PDF files for pattern: {}", args.input);
    }

    let mut config = ExtractorConfig::default();
    if let Some(min_total) = args.min_total {
        config.min_total = min_total;
    }
    let extractor = TotalExtractor::with_config(config);

    let mut failures = 0usize;
    for path in &files {
        match extract_one(path, &extractor) {
            Ok(result) => print_result(path, &result, args.format)?,
            Err(e) => {
                warn!("failed to process {}: {}", path.display(), e);
                println!("{} {}: {}", style("✗").red(), path.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        println!();
        println!(
            "{} {} of {} files failed",
            style("!").yellow(),
            failures,
            files.len()
        );
    }
    Ok(())
}

fn extract_one(path: &Path, extractor: &TotalExtractor) -> anyhow::Result<ExtractionResult> {
    let pdf = PdfExtractor::open(path)?;
    let doc = pdf.extract_lines()?;
    Ok(extractor.extract(&doc))
}

fn print_result(path: &Path, result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let line = serde_json::json!({
                "file": path.display().to_string(),
                "total": result.total,
                "method": result.method,
                "evidence": result.evidence,
            });
            println!("{line}");
        }
        OutputFormat::Text => {
            if result.method == ExtractionMethod::Failed {
                println!("{} {}: no plausible total", style("✗").red(), path.display());
                return Ok(());
            }
            println!("{} {}", style("✓").green(), path.display());
            println!("   total:    {}", format_amount(result.total));
            println!("   method:   {}", result.method);
            if !result.evidence.is_empty() {
                println!("   evidence: {}", result.evidence);
            }
        }
    }
    Ok(())
}
