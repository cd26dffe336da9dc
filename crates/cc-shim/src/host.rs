//! # Dev-Mode Host
//!
//! Runs a contract against a local ledger, reading one JSON transaction per
//! line and writing one JSON response per line.
//!
//! ## Wire Format
//!
//! ```text
//! → {"type":"init","args":["init","key","1","10"]}
//! ← {"tx_id":"…","status":200,"message":"","payload":null}
//! → {"type":"invoke","tx_id":"t2","args":["query","5"]}
//! ← {"tx_id":"t2","status":200,"message":"","payload":"5"}
//! ```
//!
//! Transactions run strictly one after another. A malformed line (bad JSON,
//! invalid UTF-8 or longer than `max_line_bytes`) gets an error response and
//! the loop carries on; end of input stops it.

use crate::adapters::ledger_stub::{execute_transaction, SharedLedger};
use crate::domain::{status, Invocation, Response, TransactionKind};
use crate::errors::HostError;
use crate::ports::inbound::Chaincode;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

/// Host loop configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Longest accepted request line in bytes.
    pub max_line_bytes: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: 64 * 1024,
        }
    }
}

/// One request line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Entry point to call.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Caller-chosen transaction id; a UUID is assigned when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    /// Arguments, function name first.
    #[serde(default)]
    pub args: Vec<String>,
}

impl TransactionRequest {
    fn into_invocation(self) -> Invocation {
        match self.tx_id {
            Some(tx_id) => Invocation::with_tx_id(tx_id, self.args),
            None => Invocation::new(self.args),
        }
    }
}

/// One response line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// Transaction id, absent if the request could not be parsed.
    pub tx_id: Option<String>,
    /// Status code.
    pub status: i32,
    /// Error message, empty on success.
    pub message: String,
    /// Payload as text.
    pub payload: Option<String>,
}

impl TransactionResponse {
    fn from_response(tx_id: Option<String>, response: &Response) -> Self {
        Self {
            tx_id,
            status: response.status,
            message: response.message.clone(),
            payload: response.payload_text(),
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            tx_id: None,
            status: status::ERROR,
            message: message.into(),
            payload: None,
        }
    }
}

/// Counters for one host run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HostStats {
    /// Request lines handled (blank lines excluded).
    pub transactions: u64,
    /// Transactions whose write set was committed.
    pub committed: u64,
    /// Malformed requests and failed transactions.
    pub rejected: u64,
}

/// One request line after framing.
enum Line {
    Blank,
    Request(TransactionRequest),
    Rejected(String),
}

fn decode_line(bytes: &[u8], len: usize, limit: usize) -> Line {
    if len > limit {
        warn!(len, limit, "Request line too long");
        return Line::Rejected(format!("Request too large: {} bytes, limit {}", len, limit));
    }

    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text.trim(),
        Err(e) => {
            warn!(error = %e, "Request line is not UTF-8");
            return Line::Rejected(format!("Malformed request: {}", e));
        }
    };
    if text.is_empty() {
        return Line::Blank;
    }

    match serde_json::from_str::<TransactionRequest>(text) {
        Ok(request) => Line::Request(request),
        Err(e) => {
            warn!(error = %e, "Malformed request");
            Line::Rejected(format!("Malformed request: {}", e))
        }
    }
}

/// Consume input up to and including the next newline without buffering it.
/// Returns the number of bytes skipped, newline excluded.
async fn skip_line<R>(reader: &mut R) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut skipped = 0;
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(skipped);
        }
        let (used, done) = match available.iter().position(|&b| b == b'\n') {
            Some(end) => (end + 1, true),
            None => (available.len(), false),
        };
        reader.consume(used);
        if done {
            return Ok(skipped + used - 1);
        }
        skipped += used;
    }
}

/// Serve transactions from `reader` until end of input.
///
/// At most `max_line_bytes + 1` bytes of a line are held in memory; the rest
/// of an oversize line is skipped.
#[instrument(skip_all)]
pub async fn start<C, R, W>(
    chaincode: &C,
    ledger: SharedLedger,
    mut reader: R,
    mut writer: W,
    config: &HostConfig,
) -> Result<HostStats, HostError>
where
    C: Chaincode + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!(max_line_bytes = config.max_line_bytes, "Chaincode host started");

    let limit = config.max_line_bytes;
    let mut stats = HostStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = (&mut reader)
            .take(limit as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await?;
        if read == 0 {
            break;
        }

        let terminated = buf.last() == Some(&b'\n');
        if terminated {
            buf.pop();
        }
        let mut len = buf.len();
        if !terminated && len > limit {
            len += skip_line(&mut reader).await?;
        }

        let reply = match decode_line(&buf, len, limit) {
            Line::Blank => continue,
            Line::Rejected(message) => TransactionResponse::rejected(message),
            Line::Request(request) => {
                let kind = request.kind;
                let invocation = request.into_invocation();
                let tx_id = invocation.tx_id.clone();
                debug!(tx_id = %tx_id, ?kind, "Dispatching transaction");

                let response = execute_transaction(chaincode, &ledger, kind, invocation).await;
                TransactionResponse::from_response(Some(tx_id), &response)
            }
        };

        stats.transactions += 1;
        if reply.status < status::ERROR_THRESHOLD {
            stats.committed += 1;
        } else {
            stats.rejected += 1;
        }

        let mut out = serde_json::to_string(&reply)?;
        out.push('\n');
        writer.write_all(out.as_bytes()).await?;
        writer.flush().await?;
    }

    info!(
        transactions = stats.transactions,
        committed = stats.committed,
        rejected = stats.rejected,
        "Chaincode host stopped"
    );
    Ok(stats)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{shared_ledger, InMemoryKVStore};
    use crate::ports::outbound::ChaincodeStub;
    use async_trait::async_trait;

    /// `invoke set k v` writes, `invoke get k` reads.
    struct Register;

    #[async_trait]
    impl Chaincode for Register {
        async fn init(&self, _stub: &dyn ChaincodeStub) -> Response {
            Response::success(None)
        }

        async fn invoke(&self, stub: &dyn ChaincodeStub) -> Response {
            let (function, params) = stub.function_and_parameters();
            match (function.as_str(), params.as_slice()) {
                ("set", [key, value]) => match stub.put_state(key, value.as_bytes()).await {
                    Ok(()) => Response::success(None),
                    Err(e) => Response::error(e.to_string()),
                },
                ("get", [key]) => match stub.get_state(key).await {
                    Ok(value) => Response::success(value),
                    Err(e) => Response::error(e.to_string()),
                },
                _ => Response::error("unknown"),
            }
        }
    }

    async fn run_with(input: &[u8], config: &HostConfig) -> (HostStats, Vec<TransactionResponse>) {
        let ledger = shared_ledger(InMemoryKVStore::new());
        let mut output = Vec::new();
        let stats = start(&Register, ledger, input, &mut output, config)
            .await
            .unwrap();

        let replies = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (stats, replies)
    }

    async fn run(input: &str) -> (HostStats, Vec<TransactionResponse>) {
        run_with(input.as_bytes(), &HostConfig::default()).await
    }

    #[tokio::test]
    async fn test_host_round_trip() {
        let input = concat!(
            r#"{"type":"init","tx_id":"t0","args":["init"]}"#,
            "\n",
            r#"{"type":"invoke","tx_id":"t1","args":["set","k","v"]}"#,
            "\n\n",
            r#"{"type":"invoke","tx_id":"t2","args":["get","k"]}"#,
            "\n",
        );
        let (stats, replies) = run(input).await;

        assert_eq!(stats.transactions, 3);
        assert_eq!(stats.committed, 3);
        assert_eq!(replies[2].tx_id.as_deref(), Some("t2"));
        assert_eq!(replies[2].payload.as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_malformed_line_does_not_stop_host() {
        let input = concat!(
            "not json\n",
            r#"{"type":"invoke","args":["bogus"]}"#,
            "\n",
            r#"{"type":"invoke","args":["set","k","v"]}"#,
            "\n",
        );
        let (stats, replies) = run(input).await;

        assert_eq!(stats.transactions, 3);
        assert_eq!(stats.rejected, 2);
        assert_eq!(stats.committed, 1);
        assert!(replies[0].tx_id.is_none());
        assert!(replies[0].message.starts_with("Malformed request"));
        assert_eq!(replies[1].message, "unknown");
        assert!(replies[2].tx_id.is_some());
    }

    #[tokio::test]
    async fn test_oversize_line_rejected() {
        let ledger = shared_ledger(InMemoryKVStore::new());
        let mut output = Vec::new();
        let config = HostConfig { max_line_bytes: 8 };
        let input = r#"{"type":"invoke","args":["set","k","v"]}"#;

        let stats = start(&Register, ledger, input.as_bytes(), &mut output, &config)
            .await
            .unwrap();
        assert_eq!(stats.rejected, 1);
        assert!(String::from_utf8(output).unwrap().contains("Request too large"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_stop_host() {
        let mut input = b"\xff\xfe\n".to_vec();
        input.extend_from_slice(br#"{"type":"invoke","tx_id":"t1","args":["set","k","v"]}"#);
        input.push(b'\n');

        let (stats, replies) = run_with(&input, &HostConfig::default()).await;

        assert_eq!(stats.transactions, 2);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.committed, 1);
        assert!(replies[0].tx_id.is_none());
        assert_eq!(replies[0].status, status::ERROR);
        assert!(replies[0].message.starts_with("Malformed request"));
        assert_eq!(replies[1].tx_id.as_deref(), Some("t1"));
        assert_eq!(replies[1].status, status::OK);
    }

    #[tokio::test]
    async fn test_line_limit_is_inclusive_and_counts_padding() {
        let request = r#"{"type":"invoke","tx_id":"t1","args":["set","k","v"]}"#;
        let limit = request.len();
        let config = HostConfig {
            max_line_bytes: limit,
        };
        let input = format!(
            "{}\n{}\n {}\n",
            "x".repeat(limit + 1),
            request,
            request
        );

        let (stats, replies) = run_with(input.as_bytes(), &config).await;

        assert_eq!(stats.transactions, 3);
        assert_eq!(stats.committed, 1);
        assert_eq!(
            replies[0].message,
            format!("Request too large: {} bytes, limit {}", limit + 1, limit)
        );
        assert_eq!(replies[1].tx_id.as_deref(), Some("t1"));
        assert_eq!(replies[1].status, status::OK);
        assert_eq!(
            replies[2].message,
            format!("Request too large: {} bytes, limit {}", limit + 1, limit)
        );
    }

    #[tokio::test]
    async fn test_unterminated_oversize_input_is_skipped() {
        let config = HostConfig { max_line_bytes: 16 };
        let input = "y".repeat(64);

        let (stats, replies) = run_with(input.as_bytes(), &config).await;

        assert_eq!(stats.transactions, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].message, "Request too large: 64 bytes, limit 16");
    }

    #[tokio::test]
    async fn test_skip_line_stops_after_newline() {
        let mut reader: &[u8] = b"abcdef\nrest";
        let skipped = skip_line(&mut reader).await.unwrap();
        assert_eq!(skipped, 6);
        assert_eq!(reader, b"rest");
    }
}
