use std::fmt;
use std::io;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use kotoba_core::LexiconError;
use kotoba_lang_japanese::{LargeLexiconLoader, LoadStatus};
use kotoba_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::service::VocabService;

/// Background work on the large lexicon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LargeJob {
    Fetch,
    Load,
}

impl fmt::Display for LargeJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LargeJob::Fetch => f.write_str("Large lexicon download"),
            LargeJob::Load => f.write_str("Large lexicon load"),
        }
    }
}

/// Values a worker hands back to the owner loop
#[derive(Debug)]
pub enum WorkerEvent {
    Progress(f32),
    Finished(LargeJob, Result<LoadStatus, LexiconError>),
}

/// App's main loop. Sole owner of `service`; workers only send values back.
pub async fn event_loop(
    mut service: VocabService,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (worker_tx, worker_rx) = kanal::bounded_async::<WorkerEvent>(64);
    let mut running: Option<LargeJob> = None;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Shutdown requested");
                break;
            }
            event = ui_to_app_rx.recv() => {
                let Ok(event) = event else {
                    tracing::info!("[EVENT_LOOP] Presentation channel closed");
                    break;
                };
                tracing::debug!("[EVENT_LOOP] EVENT RECEIVED: {:?}", std::mem::discriminant(&event));
                handle_events(&mut service, &mut running, &worker_tx, &app_to_ui_tx, event).await?;
            }
            Ok(event) = worker_rx.recv() => {
                handle_worker_event(&mut service, &mut running, &app_to_ui_tx, event).await?;
            }
        }
    }

    Ok(())
}

async fn handle_events(
    service: &mut VocabService,
    running: &mut Option<LargeJob>,
    worker_tx: &AsyncSender<WorkerEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Search(query) => {
            let results = service.search(&query);
            tracing::debug!("Search '{}': {} results", query, results.len());
            app_to_ui_tx
                .send(AppEvent::SearchResults { query, results })
                .await?;
        }
        AppEvent::AddEntry(draft) => {
            let reply = match service.add(draft) {
                Ok(outcome) => AppEvent::EntryAdded(outcome),
                Err(e) => {
                    tracing::error!("Failed to add entry: {}", e);
                    AppEvent::Error(format!("Could not save the word: {e}"))
                }
            };
            app_to_ui_tx.send(reply).await?;
        }
        AppEvent::UpdateEntry(entry) => {
            let reply = match service.update(entry) {
                Ok(_) => AppEvent::Entries(service.all_entries()),
                Err(e) => {
                    tracing::error!("Failed to update entry: {}", e);
                    AppEvent::Error(format!("Could not save the change: {e}"))
                }
            };
            app_to_ui_tx.send(reply).await?;
        }
        AppEvent::DeleteEntry(id) => {
            let reply = match service.delete(id) {
                Ok(_) => AppEvent::Entries(service.all_entries()),
                Err(e) => {
                    tracing::error!("Failed to delete entry: {}", e);
                    AppEvent::Error(format!("Could not delete the word: {e}"))
                }
            };
            app_to_ui_tx.send(reply).await?;
        }
        AppEvent::ListEntries => {
            app_to_ui_tx
                .send(AppEvent::Entries(service.all_entries()))
                .await?;
        }
        AppEvent::FetchLargeLexicon => {
            let loader = service.large_loader();
            start_job(loader, running, worker_tx, app_to_ui_tx, LargeJob::Fetch).await?;
        }
        AppEvent::LoadLargeLexicon => {
            let loader = service.large_loader();
            start_job(loader, running, worker_tx, app_to_ui_tx, LargeJob::Load).await?;
        }
        AppEvent::QueryLargeLexiconStatus => {
            app_to_ui_tx
                .send(AppEvent::LargeLexiconStatus(service.large_lexicon_status()))
                .await?;
        }
        AppEvent::SearchResults { .. }
        | AppEvent::EntryAdded(_)
        | AppEvent::Entries(_)
        | AppEvent::FetchProgress(_)
        | AppEvent::LargeLexiconStatus(_)
        | AppEvent::Error(_) => {
            // UI-only event, ignore in backend
        }
    }

    Ok(())
}

async fn start_job(
    loader: Arc<LargeLexiconLoader>,
    running: &mut Option<LargeJob>,
    worker_tx: &AsyncSender<WorkerEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    job: LargeJob,
) -> anyhow::Result<()> {
    if let Some(current) = *running {
        tracing::warn!("{} requested while {} is running", job, current);
        app_to_ui_tx
            .send(AppEvent::Error(format!("{current} is already running")))
            .await?;
        return Ok(());
    }

    *running = Some(job);
    spawn_job(loader, job, worker_tx.clone());
    Ok(())
}

fn spawn_job(loader: Arc<LargeLexiconLoader>, job: LargeJob, worker_tx: AsyncSender<WorkerEvent>) {
    tokio::spawn(async move {
        let result = match job {
            LargeJob::Fetch => {
                let progress_tx = worker_tx.clone();
                let progress = move |fraction: f32| {
                    // Dropped progress ticks are fine; the next one supersedes them
                    let _ = progress_tx.try_send(WorkerEvent::Progress(fraction));
                };
                loader.fetch(&progress).await
            }
            LargeJob::Load => tokio::task::spawn_blocking(move || loader.load())
                .await
                .unwrap_or_else(|e| Err(LexiconError::Io(io::Error::other(e)))),
        };

        if let Err(e) = worker_tx.send(WorkerEvent::Finished(job, result)).await {
            tracing::error!("Failed to report {} result: {}", job, e);
        }
    });
}

async fn handle_worker_event(
    service: &mut VocabService,
    running: &mut Option<LargeJob>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: WorkerEvent,
) -> anyhow::Result<()> {
    match event {
        WorkerEvent::Progress(fraction) => {
            // Never wait on a slow consumer for a progress tick
            if !app_to_ui_tx.try_send(AppEvent::FetchProgress(fraction))? {
                tracing::trace!("Dropped progress tick {:.2}", fraction);
            }
        }
        WorkerEvent::Finished(job, result) => {
            *running = None;
            match result {
                Ok(LoadStatus::Loaded(lexicon)) => {
                    service.install_large_lexicon(lexicon);
                }
                Ok(LoadStatus::NotFound) => {
                    tracing::info!("{}: no payload downloaded yet", job);
                }
                Err(e) => {
                    tracing::error!("{} failed: {}", job, e);
                    app_to_ui_tx
                        .send(AppEvent::Error(format!("{job} failed: {e}")))
                        .await?;
                }
            }
            app_to_ui_tx
                .send(AppEvent::LargeLexiconStatus(service.large_lexicon_status()))
                .await?;
        }
    }

    Ok(())
}
