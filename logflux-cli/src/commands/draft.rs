//! `logflux draft` command handler

use std::io::Write;

use serde::Serialize;
use tracing::{info, warn};

use logflux_core::config::LogfluxConfig;
use logflux_waf_feedback::{
    DirectiveBuilder, DraftOptions, ExclusionDraft, FalsePositiveFeedback, FeedbackStatus,
    ScannerConfig, SuggestionScanner, draft_exclusions,
};

use crate::cli::DraftArgs;
use crate::commands::read_input;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `draft` command.
pub async fn execute(
    args: DraftArgs,
    config: &LogfluxConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let payload = read_input(&args.input, None).await?;
    let feedbacks = FalsePositiveFeedback::parse_batch(&payload)?;

    let report = build_report(&feedbacks, config, args.directives)?;
    info!(
        feedbacks = report.feedbacks.len(),
        drafts = report.total_drafts,
        "built exclusion drafts"
    );

    writer.render(&report)
}

/// Build drafts for every feedback record and optionally render directives.
pub fn build_report(
    feedbacks: &[FalsePositiveFeedback],
    config: &LogfluxConfig,
    with_directives: bool,
) -> Result<DraftReport, CliError> {
    let scanner_config = ScannerConfig::from_core(&config.feedback);
    let scanner = SuggestionScanner::new(&scanner_config)?;
    let options = DraftOptions::from_core(&config.exclusion);

    let mut entries = Vec::with_capacity(feedbacks.len());
    for feedback in feedbacks {
        scanner_config.check_size(&feedback.suggestion)?;
        if feedback.feedback_status == FeedbackStatus::Resolved {
            warn!(feedback_id = feedback.id, "drafting exclusions for resolved feedback");
        }

        let drafts = draft_exclusions(feedback, &scanner, &options)?;
        entries.push(FeedbackDrafts {
            feedback_id: feedback.id,
            feedback_status: feedback.feedback_status,
            drafts,
        });
    }

    let all_drafts: Vec<ExclusionDraft> = entries
        .iter()
        .flat_map(|entry| entry.drafts.iter().cloned())
        .collect();

    let directives = if with_directives {
        Some(DirectiveBuilder::from_core(&config.exclusion).build_drafts(&all_drafts)?)
    } else {
        None
    };

    Ok(DraftReport {
        total_drafts: all_drafts.len(),
        feedbacks: entries,
        directives,
    })
}

/// Drafts produced for a single feedback record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDrafts {
    pub feedback_id: u64,
    pub feedback_status: FeedbackStatus,
    pub drafts: Vec<ExclusionDraft>,
}

/// Result of the `draft` command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftReport {
    pub total_drafts: usize,
    pub feedbacks: Vec<FeedbackDrafts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directives: Option<String>,
}

impl Render for DraftReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Exclusion Drafts: {} (from {} feedback)",
            self.total_drafts.to_string().bold(),
            self.feedbacks.len()
        )?;

        for entry in &self.feedbacks {
            writeln!(w)?;
            writeln!(w, "Feedback #{} [{:?}]", entry.feedback_id, entry.feedback_status)?;
            if entry.drafts.is_empty() {
                writeln!(w, "  {}", "no candidate found in suggestion".yellow())?;
                continue;
            }
            for draft in &entry.drafts {
                let scope = match draft.scope.scope_type.as_str() {
                    "global" => "global".to_owned(),
                    "site" => format!("site {}", draft.scope.host),
                    _ => format!(
                        "route {}{} {}",
                        draft.scope.host, draft.scope.path, draft.scope.method
                    ),
                };
                writeln!(
                    w,
                    "  {} {}:{}  {}",
                    draft.name.bold(),
                    draft.remove_type,
                    draft.remove_value.green(),
                    scope.trim_end()
                )?;
            }
        }

        if let Some(directives) = &self.directives {
            writeln!(w)?;
            writeln!(w, "{}", "Directives:".bold())?;
            if directives.is_empty() {
                writeln!(w, "  (none)")?;
            } else {
                writeln!(w, "{directives}")?;
            }
        }

        Ok(())
    }
}
