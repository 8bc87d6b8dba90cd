use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use chrono::Local;
use report_core::{Column, RequestId, UserRecord};
use report_logging::{report_debug, report_info};
use tokio_util::sync::CancellationToken;

use crate::assets::AssetLoader;
use crate::export::{export_report, ExportSettings};
use crate::fetch::Fetcher;
use crate::EngineEvent;

enum EngineCommand {
    Fetch {
        request_id: RequestId,
        url: String,
        cancel: CancellationToken,
    },
    Export {
        records: Vec<UserRecord>,
        columns: Vec<Column>,
    },
}

/// Holds the cancellation token of the fetch currently allowed to write.
///
/// Starting a fetch cancels the previous token before handing out a new one,
/// so at most one fetch result can ever be applied.
#[derive(Debug, Default)]
pub struct FetchSlot {
    current: Option<CancellationToken>,
}

impl FetchSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any in-flight fetch and returns the token for the next one.
    pub fn replace(&mut self) -> CancellationToken {
        self.cancel();
        let token = CancellationToken::new();
        self.current = Some(token.clone());
        token
    }

    pub fn cancel(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }
    }
}

/// IO side of the application: runs fetches and exports on a tokio runtime
/// thread and reports back through [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    fetch_slot: FetchSlot,
}

impl EngineHandle {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        assets: AssetLoader,
        export: ExportSettings,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let context = Arc::new(EngineContext {
            fetcher,
            assets,
            export,
        });

        thread::Builder::new()
            .name("report-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let context = context.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(&context, command, event_tx).await;
                    });
                }
                report_debug!("Engine command channel closed");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx,
            fetch_slot: FetchSlot::new(),
        })
    }

    /// Starts a fetch after cancelling the one in flight, if any.
    pub fn fetch(&mut self, request_id: RequestId, url: impl Into<String>) {
        let cancel = self.fetch_slot.replace();
        let _ = self.cmd_tx.send(EngineCommand::Fetch {
            request_id,
            url: url.into(),
            cancel,
        });
    }

    pub fn export(&self, records: Vec<UserRecord>, columns: Vec<Column>) {
        let _ = self.cmd_tx.send(EngineCommand::Export { records, columns });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.fetch_slot.cancel();
    }
}

struct EngineContext {
    fetcher: Arc<dyn Fetcher>,
    assets: AssetLoader,
    export: ExportSettings,
}

async fn handle_command(
    context: &EngineContext,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Fetch {
            request_id,
            url,
            cancel,
        } => {
            report_info!("Fetch request_id={} url={}", request_id, url);
            let result = context.fetcher.fetch(&url, &cancel).await;
            let _ = event_tx.send(EngineEvent::FetchCompleted { request_id, result });
        }
        EngineCommand::Export { records, columns } => {
            let now = Local::now().naive_local();
            let result =
                export_report(&context.assets, &context.export, records, columns, now).await;
            let _ = event_tx.send(EngineEvent::ExportCompleted { result });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacing_the_slot_cancels_the_previous_token() {
        let mut slot = FetchSlot::new();
        let first = slot.replace();
        assert!(!first.is_cancelled());

        let second = slot.replace();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        slot.cancel();
        assert!(second.is_cancelled());
    }
}
