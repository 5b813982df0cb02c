//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread, time::Duration};

use client_core::EnrollmentService;
use crossbeam_channel::{Receiver, Sender};
use shared::catalog::CourseCatalog;
use storage::Storage;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub database_url: String,
    pub redirect_delay: Duration,
    pub catalog: Arc<CourseCatalog>,
}

/// Spawns the storage worker. Commands are handled one at a time in queue
/// order, so a submitted enrollment is written before any later dashboard
/// load reads the slot.
pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, config: WorkerConfig) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let storage = match Storage::new(&config.database_url).await {
                Ok(storage) => storage,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("{err:#}"),
                    )));
                    tracing::error!(
                        database_url = %config.database_url,
                        "failed to open enrollment storage: {err:#}"
                    );
                    return;
                }
            };
            tracing::info!(database_url = %config.database_url, "enrollment storage ready");

            let service =
                EnrollmentService::new(config.catalog, Arc::new(storage), config.redirect_delay);
            let _ = ui_tx.try_send(UiEvent::BackendReady);

            while let Ok(cmd) = cmd_rx.recv() {
                let event = match cmd {
                    BackendCommand::SubmitEnrollment { draft } => {
                        UiEvent::Submitted(service.submit(&draft).await)
                    }
                    BackendCommand::LoadDashboard => {
                        UiEvent::DashboardLoaded(service.load_dashboard().await)
                    }
                };
                if ui_tx.send(event).is_err() {
                    break;
                }
            }
            tracing::debug!("storage worker stopped");
        });
    });
}
