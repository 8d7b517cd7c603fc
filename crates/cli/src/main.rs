use anyhow::Context;
use courier_cli::{CliArgs, load_config, load_default_config, print_help};
use courier_producer::LOCAL_FAILURE_EXIT_CODE;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Logs go to stderr; stdout carries the summary line
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courier=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let code = match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            LOCAL_FAILURE_EXIT_CODE
        }
    };
    std::process::exit(code);
}

fn try_main() -> anyhow::Result<i32> {
    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}", err);
            print_help();
            return Ok(LOCAL_FAILURE_EXIT_CODE);
        }
    };
    if args.help {
        print_help();
        return Ok(0);
    }

    let mut config = match &args.config_path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => {
            tracing::info!("Using default configuration");
            load_default_config().context("loading embedded default configuration")?
        }
    };
    args.apply(&mut config);
    config.validate().context("validating configuration")?;

    Ok(courier_cli::run(&config))
}
