//! Runs of the courier-put front end against the in-process broker

use courier_broker::{BrokerConfig, InProcessBroker};
use courier_cli::{AppConfig, CliArgs, execute, execute_with, load_config, run};
use courier_core::{Credentials, ReasonCode};
use courier_ports::BrokerGateway;
use std::path::Path;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new(records: usize) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mqusers"), "app passw0rd\n").unwrap();
        let data: String = (1..=records).map(|i| format!("sensor-{i},{}\n", i * 10)).collect();
        std::fs::write(dir.path().join("data.txt"), data).unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn config(&self, capacity: usize) -> AppConfig {
        let mut config = AppConfig {
            broker: BrokerConfig::single_queue("QM1", "app", "passw0rd", "Q1", capacity),
            ..Default::default()
        };
        let producer = &mut config.producer;
        producer.queue_manager = "QM1".to_string();
        producer.destination = "Q1".to_string();
        producer.credentials_path = self.path().join("mqusers");
        producer.data_path = self.path().join("data.txt");
        producer.retry.poll_interval_ms = 1;
        config
    }
}

#[test]
fn test_drainer_clears_backpressure() {
    let ws = Workspace::new(25);
    let mut config = ws.config(3);
    config.broker = config.broker.with_drain(1, 2);

    let report = execute(&config).unwrap();

    assert_eq!(report.stats.records_sent, 25);
    assert!(report.stats.is_complete());
    assert_eq!(report.summary(), "25 records sent");
}

#[test]
fn test_capped_retry_abandons_when_nothing_drains() {
    let ws = Workspace::new(4);
    let mut config = ws.config(2);
    config.producer.retry.max_attempts = Some(2);
    let broker = InProcessBroker::from_config(&config.broker).unwrap();

    let report = execute_with(&broker, &config).unwrap();

    assert_eq!(report.stats.records_sent, 2);
    assert_eq!(report.stats.records_abandoned, 2);
    assert_eq!(report.stats.retries, 4);
    assert_eq!(broker.depth("QM1", "Q1"), Some(2));
    assert_eq!(broker.connection_count(), 0);
}

#[test]
fn test_messages_arrive_in_file_order() {
    let ws = Workspace::new(3);
    let config = ws.config(10);
    let broker = InProcessBroker::from_config(&config.broker).unwrap();

    execute_with(&broker, &config).unwrap();

    let payloads: Vec<Vec<u8>> = broker
        .receiver("QM1", "Q1")
        .unwrap()
        .drain()
        .into_iter()
        .map(|m| m.payload)
        .collect();
    assert_eq!(
        payloads,
        vec![
            b"sensor-1,10\n".to_vec(),
            b"sensor-2,20\n".to_vec(),
            b"sensor-3,30\n".to_vec(),
        ]
    );
}

#[test]
fn test_exit_code_success() {
    let ws = Workspace::new(5);
    assert_eq!(run(&ws.config(10)), 0);
}

#[test]
fn test_exit_code_bad_password() {
    let ws = Workspace::new(1);
    std::fs::write(ws.path().join("mqusers"), "app wrong\n").unwrap();
    assert_eq!(run(&ws.config(10)), 2035);
}

#[test]
fn test_exit_code_unknown_queue() {
    let ws = Workspace::new(1);
    let mut config = ws.config(10);
    config.producer.destination = "NOPE".to_string();
    assert_eq!(run(&config), 2);
}

#[test]
fn test_exit_code_unknown_queue_manager() {
    let ws = Workspace::new(1);
    let mut config = ws.config(10);
    config.producer.queue_manager = "QM9".to_string();
    assert_eq!(run(&config), 2058);
}

#[test]
fn test_missing_data_file_releases_everything() {
    let ws = Workspace::new(0);
    let mut config = ws.config(10);
    config.producer.data_path = ws.path().join("absent.txt");
    let broker = InProcessBroker::from_config(&config.broker).unwrap();

    let err = execute_with(&broker, &config).unwrap_err();

    assert_eq!(err.exit_code(), 1);
    assert_eq!(broker.connection_count(), 0);
    assert_eq!(broker.open_object_count(), 0);
    assert_eq!(run(&config), 1);
}

#[test]
fn test_config_file_with_overrides() {
    let ws = Workspace::new(2);
    let config_path = ws.path().join("courier.json");
    let json = serde_json::to_string_pretty(&ws.config(10)).unwrap();
    std::fs::write(&config_path, json).unwrap();

    let mut config = load_config(&config_path).unwrap();
    let args = CliArgs::parse(["--queue", "OTHER"]).unwrap();
    args.apply(&mut config);
    config.validate().unwrap();

    assert_eq!(config.producer.destination, "OTHER");
    assert_eq!(run(&config), 2);
}

#[test]
fn test_connect_warning_reaches_report() {
    let ws = Workspace::new(2);
    let config = ws.config(10);
    let broker = InProcessBroker::from_config(&config.broker).unwrap();
    let creds = Credentials::new("app", "passw0rd").unwrap();
    let existing = broker.connect("QM1", &creds);
    assert!(existing.handle.is_some());

    let report = execute_with(&broker, &config).unwrap();

    assert_eq!(report.connect_warning, Some(ReasonCode::ALREADY_CONNECTED));
    assert_eq!(report.stats.records_sent, 2);
    assert!(report.notices()[0].contains("ALREADY_CONNECTED"));
}

#[test]
fn test_abandoned_records_appear_in_notices() {
    let ws = Workspace::new(3);
    let mut config = ws.config(1);
    config.producer.retry.max_attempts = Some(1);
    let broker = InProcessBroker::from_config(&config.broker).unwrap();

    let report = execute_with(&broker, &config).unwrap();

    assert_eq!(report.summary(), "1 record sent");
    assert_eq!(
        report.notices(),
        vec!["2 of 3 records not delivered (0 dropped, 2 abandoned)".to_string()]
    );
}
