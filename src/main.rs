// src/main.rs

use batchconv::{cli, errors, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("batchconv error: {err}");
        std::process::exit(err.exit_code());
    }
}

async fn run_main() -> errors::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await?;
    Ok(())
}
