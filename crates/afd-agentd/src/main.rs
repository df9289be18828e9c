mod cli;
mod conf;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use afd_core::{Labeler, spawn_signal_listener};
use afd_exec::ArchspecProber;
use afd_observe::{Subscriber, init_local_offset, init_logger};

use crate::{
    cli::{BIN, Cli},
    conf::Conf,
};

fn main() -> anyhow::Result<()> {
    // 1) configuration: flags, then env overrides
    let cli = Cli::parse();
    let conf = Conf::from_cli(cli, |key| std::env::var(key).ok())
        .context("error while loading configuration")?;

    // 2) logger; local offset must be read while single-threaded
    init_local_offset();
    init_logger(&conf.logger).context("failed to initialize logger")?;

    // 3) runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    runtime.block_on(run(conf))
}

async fn run(conf: Conf) -> anyhow::Result<()> {
    info!("running {BIN} in version {}", env!("CARGO_PKG_VERSION"));
    info!(
        label_once = conf.labeler.label_once(),
        sleep_interval = %humantime::format_duration(conf.labeler.sleep_interval()),
        output_path = %conf.labeler.output_path().display(),
        "loaded configuration"
    );

    let cancel = CancellationToken::new();
    let listener =
        spawn_signal_listener(cancel.clone()).context("failed to set up signal handling")?;

    let labeler = Labeler::new(conf.labeler, Arc::new(ArchspecProber::new()))
        .with_observer(Arc::new(Subscriber));

    info!("start running");
    // Per-cycle failures never change the exit status; the observer
    // already logged them.
    if let Err(e) = labeler.run(cancel.clone()).await {
        debug!("labeler finished with error: {e}");
    }

    cancel.cancel();
    if let Err(e) = listener.await {
        error!("signal listener failed: {e}");
    }
    info!("exiting");
    Ok(())
}
