//! # Runtime Wiring
//!
//! Logging setup, ledger selection and the host loop used by the `cc-demo`
//! binary.

use crate::config::DemoConfig;
use crate::service::DemoChaincode;
use anyhow::{Context, Result};
use cc_shim::adapters::{shared_ledger, InMemoryKVStore, SharedLedger};
use cc_shim::host::{self, HostStats};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Logs go to stderr; stdout carries
/// host responses.
pub fn init_tracing(config: &DemoConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid log filter: {}", config.log_level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.json_logs {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))
            .context("failed to install JSON subscriber")?;
    } else {
        builder
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))
            .context("failed to install subscriber")?;
    }
    Ok(())
}

/// Open the ledger named by the configuration.
///
/// A `data_dir` selects RocksDB when built with the `rocksdb` feature;
/// otherwise the ledger lives in memory for the life of the process.
pub fn open_ledger(config: &DemoConfig) -> Result<SharedLedger> {
    match &config.data_dir {
        #[cfg(feature = "rocksdb")]
        Some(dir) => {
            use cc_shim::adapters::{RocksDbConfig, RocksDbStore};

            let store = RocksDbStore::open(RocksDbConfig {
                path: dir.clone(),
                ..RocksDbConfig::default()
            })
            .with_context(|| format!("failed to open ledger at {}", dir.display()))?;
            info!(path = %dir.display(), "Using RocksDB ledger");
            Ok(shared_ledger(store))
        }
        #[cfg(not(feature = "rocksdb"))]
        Some(dir) => {
            tracing::warn!(
                path = %dir.display(),
                "Built without the rocksdb feature, falling back to an in-memory ledger"
            );
            Ok(shared_ledger(InMemoryKVStore::new()))
        }
        None => {
            info!("Using in-memory ledger");
            Ok(shared_ledger(InMemoryKVStore::new()))
        }
    }
}

/// Validate the configuration and serve transactions until end of input.
pub async fn run<R, W>(config: &DemoConfig, reader: R, writer: W) -> Result<HostStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    config.validate().context("invalid configuration")?;

    let ledger = open_ledger(config)?;
    let chaincode = DemoChaincode::new(config);

    host::start(&chaincode, ledger, reader, writer, &config.host_config())
        .await
        .context("chaincode host failed")
}
