use anyhow::Context;
use clap::Parser;
use std::io;
use taskboard::{cli::Cli, repl::Repl, storage::FileStorage, Board};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.init_logging();

    let config = cli.config().context("invalid configuration")?;
    log::debug!("using config {:?}", config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    runtime.block_on(async {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut repl = Repl::new(
            Board::new(config),
            FileStorage::new(),
            stdin.lock(),
            stdout.lock(),
        );

        repl.load_on_startup().await?;
        repl.run().await?;
        Ok::<_, anyhow::Error>(())
    })
}
