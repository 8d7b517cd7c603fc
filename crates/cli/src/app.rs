//! One `courier-put` run: broker, optional drainer, producer

use courier_broker::{Drainer, InProcessBroker};
use courier_producer::{Orchestrator, ProducerError, RunReport, ThreadSleeper};

use crate::config::AppConfig;

/// Run the producer and map the outcome to a process exit status
///
/// On completion prints any notices (connect warning, undelivered records)
/// and then the summary line on stdout.
pub fn run(config: &AppConfig) -> i32 {
    match execute(config) {
        Ok(report) => {
            for notice in report.notices() {
                println!("{}", notice);
            }
            println!("{}", report.summary());
            0
        }
        Err(err) => {
            tracing::error!(
                stage = %err.stage(),
                exit_code = err.exit_code(),
                "{}",
                err
            );
            eprintln!("Error: {} stage failed: {}", err.stage(), err);
            err.exit_code()
        }
    }
}

/// Build the in-process broker from config and run against it
pub fn execute(config: &AppConfig) -> Result<RunReport, ProducerError> {
    let broker = InProcessBroker::from_config(&config.broker)
        .map_err(|err| ProducerError::Config(err.to_string()))?;

    let drainer = config.broker.drain.clone().map(|drain| {
        tracing::info!(
            interval_ms = drain.interval_ms,
            batch = drain.batch,
            "starting background drain"
        );
        Drainer::spawn(broker.receivers(), drain)
    });

    let result = execute_with(&broker, config);

    if let Some(drainer) = drainer {
        let drained = drainer.stop();
        tracing::info!(drained, "background drain stopped");
    }
    result
}

/// Run the producer section of `config` against an existing broker
pub fn execute_with(
    broker: &InProcessBroker,
    config: &AppConfig,
) -> Result<RunReport, ProducerError> {
    let sleeper = ThreadSleeper;
    tracing::info!(
        queue_manager = %config.producer.queue_manager,
        destination = %config.producer.destination,
        data = %config.producer.data_path.display(),
        "starting producer"
    );
    Orchestrator::new(broker, &sleeper, config.producer.clone()).run()
}
