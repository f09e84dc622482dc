//! # JSON-Lines Host
//!
//! Connects the UI process to the gateway over a pair of byte streams
//! (stdin/stdout in the binary).
//!
//! ## Line Protocol
//! ```text
//! UI ──► bridge (one request per line)
//!   {"id":1,"op":"getProducts"}
//!   {"id":2,"op":"addSale","payload":{"productId":1,"quantity":3,...}}
//!
//! bridge ──► UI (one reply per line, in completion order)
//!   {"id":2,"ok":{"id":4,"productId":1,...}}
//!   {"id":1,"ok":[{"id":1,"name":"Product 1",...}]}
//!   {"id":null,"error":{"code":"INVALID_REQUEST","message":"..."}}
//! ```
//!
//! Every line is dispatched on its own task, so replies may come back in a
//! different order than the requests. `id` is echoed untouched for
//! correlation. A line that is not UTF-8 or not JSON at all is answered with
//! `id: null`. Only a failing input stream ends the loop early.

use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{ApiError, BridgeError, BridgeResult};
use crate::gateway::BridgeHandle;
use crate::protocol::Request;

/// Replies waiting for the writer.
const OUTPUT_BUFFER: usize = 64;

/// One output line.
#[derive(Debug, Serialize)]
struct Reply {
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    ok: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ApiError>,
}

impl Reply {
    fn ok(id: Value, result: Value) -> Self {
        Reply {
            id,
            ok: Some(result),
            error: None,
        }
    }

    fn error(id: Value, error: ApiError) -> Self {
        Reply {
            id,
            ok: None,
            error: Some(error),
        }
    }
}

/// Serves requests from `reader` until end of input, then waits for every
/// in-flight call to reply and returns the writer.
pub async fn serve<R, W>(handle: BridgeHandle, reader: R, writer: W) -> BridgeResult<W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (out_tx, mut out_rx) = mpsc::channel::<String>(OUTPUT_BUFFER);

    let writer_task = tokio::spawn(async move {
        let mut writer = writer;
        while let Some(line) = out_rx.recv().await {
            writer.write_all(line.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
        Ok::<W, std::io::Error>(writer)
    });

    let mut reader = reader;
    let mut buf = Vec::new();
    let mut received = 0u64;

    loop {
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = match String::from_utf8(std::mem::take(&mut buf)) {
            Ok(line) => line,
            Err(e) => {
                received += 1;
                warn!(error = %e, "Request line is not UTF-8");
                let reply = encode(&Reply::error(
                    Value::Null,
                    ApiError::invalid_request(format!("Request line is not UTF-8: {e}")),
                ));
                if out_tx.send(reply).await.is_err() {
                    warn!("Output closed, reply discarded");
                }
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }
        received += 1;

        let handle = handle.clone();
        let out_tx = out_tx.clone();
        tokio::spawn(async move {
            let reply = answer(&handle, line.trim_end()).await;
            if out_tx.send(reply).await.is_err() {
                warn!("Output closed, reply discarded");
            }
        });
    }

    info!(received, "Input closed, waiting for in-flight calls");
    drop(out_tx);

    let writer = writer_task
        .await
        .map_err(|e| BridgeError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))??;
    Ok(writer)
}

/// Produces the reply line for one input line.
async fn answer(handle: &BridgeHandle, line: &str) -> String {
    let reply = match serde_json::from_str::<Value>(line) {
        Ok(envelope) => {
            let id = envelope.get("id").cloned().unwrap_or(Value::Null);
            answer_envelope(handle, id, envelope).await
        }
        Err(e) => {
            warn!(error = %e, "Unreadable request line");
            Reply::error(Value::Null, ApiError::invalid_request(e.to_string()))
        }
    };

    encode(&reply)
}

fn encode(reply: &Reply) -> String {
    serde_json::to_string(reply).unwrap_or_else(|e| {
        warn!(error = %e, "Reply serialization failed");
        r#"{"id":null,"error":{"code":"INTERNAL","message":"Reply serialization failed"}}"#
            .to_string()
    })
}

async fn answer_envelope(handle: &BridgeHandle, id: Value, envelope: Value) -> Reply {
    let request: Request = match serde_json::from_value(envelope) {
        Ok(request) => request,
        Err(e) => {
            warn!(%id, error = %e, "Request rejected at boundary");
            return Reply::error(id, BridgeError::InvalidRequest(e.to_string()).into());
        }
    };

    debug!(%id, op = request.op(), "Request received");

    let result = handle
        .call(request)
        .await
        .and_then(|response| response.into_payload().map_err(BridgeError::from));

    match result {
        Ok(payload) => Reply::ok(id, payload),
        Err(e) => Reply::error(id, e.into()),
    }
}
