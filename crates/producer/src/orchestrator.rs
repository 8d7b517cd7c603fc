//! Orchestrator - stage sequencing with guaranteed unwind
//!
//! Stages run in a fixed order:
//!
//! ```text
//! credentials ─► connect ─► open ─► probe source ─► deliver ─► close ─► disconnect
//! ```
//!
//! Session and destination are guards. An early return from any stage drops
//! whatever was acquired, innermost first, so the destination is closed and
//! the session disconnected exactly once on every path.

use courier_core::{Credentials, DeliveryStats, OpenMode, ReasonCode};
use courier_ports::{BrokerGateway, RecordSource, Sleeper};

use crate::config::ProducerConfig;
use crate::credentials;
use crate::delivery::DeliveryEngine;
use crate::destination::DestinationHandle;
use crate::error::ProducerError;
use crate::session::SessionManager;
use crate::source::LineSource;

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub queue_manager: String,
    pub destination: String,
    pub stats: DeliveryStats,
    /// Reason code of a warning reported at connect time
    pub connect_warning: Option<ReasonCode>,
}

impl RunReport {
    /// Final status line
    pub fn summary(&self) -> String {
        let noun = if self.stats.records_sent == 1 {
            "record"
        } else {
            "records"
        };
        format!("{} {} sent", self.stats.records_sent, noun)
    }

    /// Lines worth showing before the summary: a connect warning and any
    /// records that were read but not delivered
    pub fn notices(&self) -> Vec<String> {
        let mut notices = Vec::new();
        if let Some(reason) = self.connect_warning {
            notices.push(format!(
                "connected to {} with warning, reason {}",
                self.queue_manager, reason
            ));
        }
        let undelivered = self.stats.undelivered();
        if undelivered > 0 {
            notices.push(format!(
                "{} of {} records not delivered ({} dropped, {} abandoned)",
                undelivered,
                self.stats.records_read,
                self.stats.records_dropped,
                self.stats.records_abandoned
            ));
        }
        notices
    }
}

/// Runs one producer pass against a gateway
pub struct Orchestrator<'a, G: BrokerGateway + ?Sized, S: Sleeper + ?Sized> {
    gateway: &'a G,
    sleeper: &'a S,
    config: ProducerConfig,
}

impl<'a, G: BrokerGateway + ?Sized, S: Sleeper + ?Sized> Orchestrator<'a, G, S> {
    pub fn new(gateway: &'a G, sleeper: &'a S, config: ProducerConfig) -> Self {
        Self {
            gateway,
            sleeper,
            config,
        }
    }

    pub fn config(&self) -> &ProducerConfig {
        &self.config
    }

    /// Full run from configuration: credential file, then the data file
    pub fn run(&self) -> Result<RunReport, ProducerError> {
        self.config.validate()?;
        let credentials = credentials::load(&self.config.credentials_path)?;
        let data_path = self.config.data_path.clone();
        self.run_with(&credentials, || LineSource::open(&data_path))
    }

    /// Run with explicit credentials and a source opener
    ///
    /// `open_source` is called only after the destination is open.
    pub fn run_with<R, F>(
        &self,
        credentials: &Credentials,
        open_source: F,
    ) -> Result<RunReport, ProducerError>
    where
        R: RecordSource,
        F: FnOnce() -> Result<R, ProducerError>,
    {
        let manager = SessionManager::new(self.gateway, &self.config.queue_manager);
        let session = manager.connect(credentials)?;
        let connect_warning = session.connect_warning();

        let destination =
            DestinationHandle::open(&session, &self.config.destination, OpenMode::Output)?;

        let mut source = open_source()?;

        let mut engine = DeliveryEngine::new(&destination, self.config.retry.policy(), self.sleeper);
        let stats = engine.run(&mut source)?;

        destination.close();
        session.disconnect();

        let report = RunReport {
            queue_manager: self.config.queue_manager.clone(),
            destination: self.config.destination.clone(),
            stats,
            connect_warning,
        };
        tracing::info!(
            queue_manager = %report.queue_manager,
            destination = %report.destination,
            "{}",
            report.summary()
        );
        Ok(report)
    }
}
