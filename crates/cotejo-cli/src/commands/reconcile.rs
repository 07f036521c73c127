//! Reconcile a CSV table of invoices against a directory of PDF documents.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::info;

use cotejo_core::{
    read_table, ColumnMap, ExtractorConfig, JsonFileStore, PdfSource, ReconRow, ReconSummary,
    Reconciler, ResultStore, RowStatus, TableFingerprint, TotalExtractor,
};

/// Arguments for the reconcile command.
#[derive(Args)]
pub struct ReconcileArgs {
    /// CSV table with invoice and total columns
    table: PathBuf,

    /// Directory of `{invoice}.pdf` documents
    #[arg(short, long)]
    pdfs: PathBuf,

    /// Invoice-id column name (default: auto-detect)
    #[arg(long)]
    col_factura: Option<String>,

    /// Total column name (default: auto-detect)
    #[arg(long)]
    col_total: Option<String>,

    /// Only process the first N rows
    #[arg(long)]
    limit: Option<usize>,

    /// Write per-row results to a CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Cache directory for reusing results of unmodified tables
    #[arg(long, default_value = ".cotejo-cache")]
    cache_dir: PathBuf,

    /// Disable the result cache
    #[arg(long)]
    no_cache: bool,

    /// Smallest amount accepted as a plausible total
    #[arg(long)]
    min_total: Option<Decimal>,
}

pub async fn run(args: ReconcileArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    let table = read_table(&args.table)?;
    let columns = resolve_columns(&args, &table)?;
    let mut rows = table.select(&columns);
    if let Some(limit) = args.limit {
        rows.truncate(limit);
    }
    if rows.is_empty() {
        anyhow::bail!("table contains no data rows");
    }

    // A limited run covers only part of the table, so it neither reads nor
    // populates the cache.
    let cache_usable = !args.no_cache && args.limit.is_none();
    let fingerprint = TableFingerprint::for_file(&args.table)?;
    let mut store = if cache_usable {
        Some(JsonFileStore::new(&args.cache_dir)?)
    } else {
        None
    };

    if let Some(store) = &store {
        if let Some(cached) = store.get(&fingerprint) {
            info!("table unchanged, reusing cached results");
            println!(
                "{} Reusing cached results for unmodified table",
                style("ℹ").blue()
            );
            report(&cached, args.output.as_deref())?;
            return Ok(());
        }
    }

    let mut config = ExtractorConfig::default();
    if let Some(min_total) = args.min_total {
        config.min_total = min_total;
    }
    let reconciler =
        Reconciler::with_source(&args.pdfs, PdfSource, TotalExtractor::with_config(config));

    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows")
            .unwrap()
            .progress_chars("=>-"),
    );

    let results = reconciler.reconcile_with_progress(&rows, |_| pb.inc(1));
    pb.finish_and_clear();

    if let Some(store) = store.as_mut() {
        store.put(&fingerprint, &results);
    }

    report(&results, args.output.as_deref())?;
    println!();
    println!(
        "{} Processed {} rows in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    Ok(())
}

fn resolve_columns(
    args: &ReconcileArgs,
    table: &cotejo_core::InputTable,
) -> anyhow::Result<ColumnMap> {
    let columns = match (args.col_factura.clone(), args.col_total.clone()) {
        (Some(invoice), Some(total)) => ColumnMap { invoice, total },
        (forced_invoice, forced_total) => {
            let mut detected = table.detect_columns()?;
            if let Some(invoice) = forced_invoice {
                detected.invoice = invoice;
            }
            if let Some(total) = forced_total {
                detected.total = total;
            }
            detected
        }
    };

    for name in [&columns.invoice, &columns.total] {
        if !table.has_column(name) {
            anyhow::bail!("column {:?} not present in table", name);
        }
    }
    Ok(columns)
}

fn report(rows: &[ReconRow], output: Option<&std::path::Path>) -> anyhow::Result<()> {
    for row in rows {
        let status = match row.status {
            RowStatus::Ok => style(row.status).green(),
            RowStatus::Mismatch | RowStatus::ExtractionError => style(row.status).red(),
            _ => style(row.status).yellow(),
        };
        println!(
            "[{}] {}: table={} | pdf={} | {}",
            status,
            row.invoice_id,
            row.recorded.map(|d| d.to_string()).unwrap_or_default(),
            row.extracted.map(|d| d.to_string()).unwrap_or_default(),
            row.detail,
        );
    }

    println!();
    println!("{}", style("--- summary ---").bold());
    println!("{}", ReconSummary::of(rows));

    if let Some(path) = output {
        write_results_csv(path, rows)?;
        println!(
            "{} Results written to {}",
            style("✓").green(),
            path.display()
        );
    }
    Ok(())
}

fn write_results_csv(path: &std::path::Path, rows: &[ReconRow]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "invoice",
        "status",
        "recorded_total",
        "extracted_total",
        "method",
        "detail",
    ])?;

    for row in rows {
        wtr.write_record([
            row.invoice_id.as_str(),
            &row.status.to_string(),
            &row.recorded.map(|d| d.to_string()).unwrap_or_default(),
            &row.extracted.map(|d| d.to_string()).unwrap_or_default(),
            &row.method.map(|m| m.to_string()).unwrap_or_default(),
            row.detail.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
