// src/checker/mod.rs
// =============================================================================
// The lint core, wired together by the batch coordinator.
//
// Submodules:
// - extract:  finds URI occurrences in the document
// - classify: local / remote / ignored predicates
// - resolve:  relative reference resolution against a base
// - probe:    method selection and the actual liveness checks
// - report:   probe result -> diagnostic mapping
//
// Traversal only accumulates occurrences; all probes run concurrently at
// end of document and the lint finishes once every one has settled.
// =============================================================================

mod classify;
mod extract;
mod probe;
mod report;
mod resolve;

pub use extract::UriOccurrence;
pub use probe::ProbeResult;

use anyhow::Result;
use futures::future::join_all;

use crate::config::Config;
use crate::document::{Diagnostic, Document, ReportSink};

/// Lints one document: extracts every URI occurrence, probes them all
/// concurrently, and emits the resulting diagnostics to `sink` in document
/// order. Returns the number of diagnostics emitted.
///
/// No individual probe failure aborts the rest; a dead link is a diagnostic,
/// never an error.
pub async fn lint_document(
    document: &Document,
    config: &Config,
    sink: &mut dyn ReportSink,
) -> Result<usize> {
    let occurrences = extract::extract_occurrences(document);
    if occurrences.is_empty() {
        return Ok(0);
    }

    let prober = probe::Prober::new(config)?;

    // One independent future per occurrence, joined as a batch: the document
    // is not done until every check has settled.
    let checks = occurrences
        .iter()
        .map(|occurrence| check_occurrence(occurrence, document, config, &prober));
    let verdicts = join_all(checks).await;

    let mut emitted = 0;
    for diagnostic in verdicts.into_iter().flatten() {
        emitted += 1;
        sink.report(diagnostic);
    }
    Ok(emitted)
}

/// Runs one occurrence through the full pipeline:
/// ignore filter -> relative resolution -> local/remote probe -> verdict.
async fn check_occurrence(
    occurrence: &UriOccurrence,
    document: &Document,
    config: &Config,
    prober: &probe::Prober,
) -> Option<Diagnostic> {
    if classify::is_ignored(&occurrence.uri, &config.ignore) {
        return None;
    }

    let mut target = occurrence.uri.clone();
    if classify::is_relative(&target) {
        if !config.check_relative {
            return None;
        }
        match resolve::resolve(&target, config.base_uri.as_deref(), document.file_path()) {
            Some(resolved) => target = resolved.to_string(),
            None => {
                return Some(Diagnostic {
                    node: occurrence.node,
                    message: resolve::RESOLVE_ERROR_MESSAGE.to_string(),
                    offset: occurrence.offset,
                    fix: None,
                });
            }
        }
    }

    let result = if classify::is_local(&target) {
        probe::probe_local(&target).await
    } else {
        prober.probe_remote(&target).await
    };

    report::verdict(occurrence, &result)
}
