// src/pipeline/translate.rs

//! Translation phase: machine-translate stored abstracts.

use crate::error::Result;
use crate::pipeline::{PhaseOutcome, RunMode};
use crate::services::Translate;
use crate::storage::{CatalogStorage, FailureKind, ReconciliationStore};

/// Translate the abstract of every stored record, reconciling outcomes into
/// the translation-failure mapping.
///
/// `Fresh` mode walks a snapshot of all success keys; `Resume` walks only
/// the translation-failure mapping. Failures accumulate per pass; a retried
/// key that succeeds leaves the failure mapping. One flush at the end.
pub async fn run_translate(
    translator: &dyn Translate,
    storage: &dyn CatalogStorage,
    mode: RunMode,
) -> Result<PhaseOutcome> {
    let mut store = ReconciliationStore::load(storage, FailureKind::Translation).await?;

    let targets: Vec<(String, String)> = match mode {
        RunMode::Fresh => store
            .records()
            .iter()
            .map(|(key, record)| (key.clone(), record.url.clone()))
            .collect(),
        RunMode::Resume => store.keys_to_retry(),
    };

    let mut outcome = PhaseOutcome {
        total: targets.len(),
        ..PhaseOutcome::default()
    };

    for (key, url) in targets {
        let Some(record) = store.record(&key).cloned() else {
            store.record_failure(&key, "no stored record for key", &url);
            outcome.failed += 1;
            continue;
        };

        log::info!("Translating abstract: {}", record.title);

        // The service chokes on lone backslashes in quoted payloads
        let escaped = escape_backslashes(&record.abstract_text);
        match translator.translate(&escaped).await {
            Ok(translated) => {
                let mut updated = record;
                updated.abstract_translated = Some(translated);
                store.upsert_success(&key, updated);
                outcome.succeeded += 1;
            }
            Err(error) => {
                log::warn!("Translation failed for {}: {error}", record.title);
                store.record_failure(
                    &key,
                    format!("Failed to translate, error: {error}"),
                    &record.url,
                );
                outcome.failed += 1;
            }
        }
    }

    store.flush().await?;
    log::info!(
        "Translation phase done: {}/{} succeeded, {} pending retry",
        outcome.succeeded,
        outcome.total,
        store.failure_count()
    );

    Ok(outcome)
}

fn escape_backslashes(text: &str) -> String {
    text.replace('\\', "\\\\")
}
