//! `logflux suggest` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use logflux_core::config::LogfluxConfig;
use logflux_core::types::{ExclusionCandidate, RemoveType};
use logflux_waf_feedback::{ScannerConfig, SuggestionScanner, build_candidate_key};

use crate::cli::SuggestArgs;
use crate::commands::read_input;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `suggest` command.
pub async fn execute(
    args: SuggestArgs,
    config: &LogfluxConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut scanner_config = ScannerConfig::from_core(&config.feedback);
    if args.no_fallback {
        scanner_config.fallback_numeric_scan = false;
    }

    let limit = Some(scanner_config.max_suggestion_bytes);
    let suggestion = if !args.text.is_empty() {
        args.text.join(" ")
    } else if let Some(path) = &args.file {
        read_input(path, limit).await?
    } else {
        read_input(Path::new("-"), limit).await?
    };
    scanner_config.check_size(&suggestion)?;

    let scanner = SuggestionScanner::new(&scanner_config)?;
    let candidates = scanner.collect(&suggestion);
    info!(
        bytes = suggestion.len(),
        candidates = candidates.len(),
        fallback = scanner.fallback_enabled(),
        "scanned suggestion"
    );

    if args.first {
        let candidate = candidates
            .into_iter()
            .next()
            .unwrap_or_else(ExclusionCandidate::empty);
        debug!(candidate = %candidate, "first candidate");
        writer.render(&FirstCandidateReport::new(candidate))?;
    } else {
        writer.render(&SuggestReport::new(candidates))?;
    }

    Ok(())
}

/// A single candidate as shown to the operator.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRow {
    pub remove_type: RemoveType,
    pub remove_value: String,
    /// Checkbox key used by the console table.
    pub key: String,
}

impl From<ExclusionCandidate> for CandidateRow {
    fn from(candidate: ExclusionCandidate) -> Self {
        let key = build_candidate_key(candidate.remove_type, &candidate.remove_value);
        Self {
            remove_type: candidate.remove_type,
            remove_value: candidate.remove_value,
            key,
        }
    }
}

/// All candidates extracted from a suggestion.
#[derive(Serialize)]
pub struct SuggestReport {
    pub total: usize,
    pub candidates: Vec<CandidateRow>,
}

impl SuggestReport {
    pub fn new(candidates: Vec<ExclusionCandidate>) -> Self {
        Self {
            total: candidates.len(),
            candidates: candidates.into_iter().map(CandidateRow::from).collect(),
        }
    }
}

impl Render for SuggestReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Exclusion Candidates: {}", self.total.to_string().bold())?;
        if self.candidates.is_empty() {
            writeln!(w, "  {}", "no candidate found".yellow())?;
            return Ok(());
        }

        writeln!(w, "{:<6} {:<40}", "TYPE", "VALUE")?;
        writeln!(w, "{}", "-".repeat(47))?;
        for row in &self.candidates {
            let kind = match row.remove_type {
                RemoveType::Id => "id".cyan(),
                RemoveType::Tag => "tag".green(),
            };
            writeln!(w, "{:<6} {:<40}", kind, row.remove_value)?;
        }
        Ok(())
    }
}

/// The first candidate, or the empty sentinel.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstCandidateReport {
    pub found: bool,
    pub remove_type: RemoveType,
    pub remove_value: String,
}

impl FirstCandidateReport {
    pub fn new(candidate: ExclusionCandidate) -> Self {
        Self {
            found: !candidate.is_empty(),
            remove_type: candidate.remove_type,
            remove_value: candidate.remove_value,
        }
    }
}

impl Render for FirstCandidateReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if self.found {
            writeln!(w, "{}:{}", self.remove_type, self.remove_value.bold())?;
        } else {
            writeln!(w, "{}", "no candidate found".yellow())?;
        }
        Ok(())
    }
}
