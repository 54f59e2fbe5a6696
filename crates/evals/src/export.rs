//! JSON and CSV export of evaluation results

use crate::evaluator::EvaluationRun;
use crate::metrics::{compute_metrics, AggregateMetrics};
use chrono::Utc;
use intenteval_core::error::{Error, Result, ResultExt};
use intenteval_core::{Difficulty, EvalResult, IntentLabel};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Output format, chosen from the destination's suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// Case-insensitive `.json` / `.csv`; anything else is `UnsupportedFormat`
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            Some(other) => Err(Error::unsupported_format(format!(".{other}"))),
            None => Err(Error::unsupported_format("")),
        }
    }
}

#[derive(Debug, Serialize)]
struct ExportMetadata<'a> {
    total_cases: usize,
    model: &'a str,
    timestamp: String,
    skipped_cases: usize,
    interrupted: bool,
}

#[derive(Debug, Serialize)]
struct JsonExport<'a> {
    metadata: ExportMetadata<'a>,
    metrics: AggregateMetrics,
    results: &'a [EvalResult],
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    query: &'a str,
    expected: IntentLabel,
    predicted: IntentLabel,
    confidence: f64,
    correct: bool,
    category: &'a str,
    difficulty: Difficulty,
    reasoning: &'a str,
    notes: &'a str,
}

impl<'a> From<&'a EvalResult> for CsvRow<'a> {
    fn from(r: &'a EvalResult) -> Self {
        Self {
            query: &r.query,
            expected: r.expected,
            predicted: r.predicted,
            confidence: r.confidence,
            correct: r.correct,
            category: &r.category,
            difficulty: r.difficulty,
            reasoning: &r.reasoning,
            notes: &r.notes,
        }
    }
}

fn write_json(path: &Path, run: &EvaluationRun, model: &str) -> Result<()> {
    let export = JsonExport {
        metadata: ExportMetadata {
            total_cases: run.results.len(),
            model,
            timestamp: Utc::now().to_rfc3339(),
            skipped_cases: run.skipped.len(),
            interrupted: run.interrupted,
        },
        metrics: compute_metrics(&run.results),
        results: &run.results,
    };

    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(path, json).context(format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn write_csv(path: &Path, results: &[EvalResult]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| Error::serialization(format!("Failed to open {}: {e}", path.display())))?;

    // Header comes from the row struct's field names
    for result in results {
        writer
            .serialize(CsvRow::from(result))
            .map_err(|e| Error::serialization(format!("Failed to write CSV row: {e}")))?;
    }

    if results.is_empty() {
        writer
            .write_record([
                "query",
                "expected",
                "predicted",
                "confidence",
                "correct",
                "category",
                "difficulty",
                "reasoning",
                "notes",
            ])
            .map_err(|e| Error::serialization(format!("Failed to write CSV header: {e}")))?;
    }

    writer
        .flush()
        .context(format!("Failed to flush {}", path.display()))?;
    Ok(())
}

/// Write `run` to `path` in the format its suffix names
///
/// An unsupported suffix fails before anything touches the filesystem.
pub fn export_results(path: &Path, run: &EvaluationRun, model: &str) -> Result<ExportFormat> {
    let format = ExportFormat::from_path(path)?;

    match format {
        ExportFormat::Json => write_json(path, run, model)?,
        ExportFormat::Csv => write_csv(path, &run.results)?,
    }

    info!(
        "Exported {} results to {}",
        run.results.len(),
        path.display()
    );
    Ok(format)
}
