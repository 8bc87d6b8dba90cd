use std::path::PathBuf;
use std::sync::Arc;

use report_core::{Effect, LoadFailure, Msg};
use report_engine::{AssetBase, AssetLoader, EngineEvent, EngineHandle, ReqwestFetcher};
use report_logging::{report_error, report_info, report_warn};

use super::config::AppConfig;
use super::persistence;

/// Executes core effects against the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    state_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let fetcher = ReqwestFetcher::new(config.fetch_settings())?;
        let assets = AssetLoader::new(AssetBase::parse(&config.asset_base)?);
        let engine = EngineHandle::new(Arc::new(fetcher), assets, config.export_settings())?;
        Ok(Self {
            engine,
            state_dir: config.state_dir.clone(),
        })
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchRecords { request_id, url } => {
                    report_info!("FetchRecords request_id={} url={}", request_id, url);
                    self.engine.fetch(request_id, url);
                }
                Effect::ExportPdf { records, columns } => {
                    report_info!(
                        "ExportPdf rows={} columns={:?}",
                        records.len(),
                        columns
                    );
                    self.engine.export(records, columns);
                }
                Effect::PersistTheme(theme) => {
                    persistence::save_theme(&self.state_dir, theme);
                }
            }
        }
    }

    /// Next finished engine job as a message, if any.
    pub fn poll_engine(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::FetchCompleted { request_id, result } => Msg::RecordsLoaded {
            request_id,
            result: result.map_err(|err| {
                if err.is_cancelled() {
                    LoadFailure::Cancelled
                } else {
                    report_warn!("Fetch {} failed: {}", request_id, err);
                    LoadFailure::Failed(err.kind.to_string())
                }
            }),
        },
        EngineEvent::ExportCompleted { result } => Msg::ExportFinished(match result {
            Ok(summary) => {
                report_info!(
                    "Export wrote {} rows, {} bytes to {:?}",
                    summary.row_count,
                    summary.byte_len,
                    summary.output_path
                );
                Ok(summary.output_path.display().to_string())
            }
            Err(err) => {
                report_error!("Export failed: {}", err);
                Err(err.to_string())
            }
        }),
    }
}
