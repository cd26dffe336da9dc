//! # cc-demo
//!
//! Runs the demo chaincode against a local ledger. Transactions are read as
//! JSON lines from stdin and answered as JSON lines on stdout; logs go to
//! stderr.
//!
//! ```text
//! $ printf '%s\n' \
//!     '{"type":"init","args":["init","key","1","3"]}' \
//!     '{"type":"invoke","args":["increase","1","3","10"]}' \
//!     '{"type":"invoke","args":["query","2"]}' | cc-demo
//! ```

use anyhow::Result;
use cc_demo::config::DemoConfig;
use cc_demo::runtime::{init_tracing, run};
use tokio::io::BufReader;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = DemoConfig::from_env();
    init_tracing(&config)?;

    info!(
        version = cc_demo::VERSION,
        max_range_span = config.max_range_span,
        "Starting demo chaincode"
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let stats = run(&config, stdin, tokio::io::stdout()).await?;

    info!(
        transactions = stats.transactions,
        committed = stats.committed,
        rejected = stats.rejected,
        "Demo chaincode finished"
    );
    Ok(())
}
