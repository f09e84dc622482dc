//! # Gateway
//!
//! Marshals calls from any number of callers to the record store and the
//! results back.
//!
//! ## Call Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Gateway Call Flow                                │
//! │                                                                         │
//! │  BridgeHandle (clone per caller)                                       │
//! │       │  call(Request)                                                 │
//! │       │  ├── oneshot::channel() for the reply                          │
//! │       │  └── mpsc send Envelope { request, reply }                     │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Gateway::run loop                            │   │
//! │  │                                                                 │   │
//! │  │  recv Envelope ──► tokio::spawn ──► commands::dispatch          │   │
//! │  │                    (one task per call, calls overlap freely)    │   │
//! │  │                                        │                        │   │
//! │  │                                        ▼                        │   │
//! │  │                    StoreState read / write guard                │   │
//! │  │                                        │                        │   │
//! │  │                    reply.send(result) ◄┘                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  caller resumes with Response, or TransportRejected when the           │
//! │  gateway is gone or dropped the call                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Shutdown
//! `shutdown()` closes intake. Calls already queued still run and reply;
//! later calls are rejected. Dropping every handle has the same effect.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use stockroom_core::{
    BackupOutcome, DashboardSummary, NewProduct, NewSale, Product, ProductId, ReceiptInput,
    ReceiptView, Sale, Settings,
};
use stockroom_store::BackupAgent;

use crate::commands;
use crate::error::{BridgeError, BridgeResult};
use crate::protocol::{Request, Response};
use crate::state::StoreState;

/// Default bound of the request channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// A request and the slot its result goes to.
struct Envelope {
    request: Request,
    reply: oneshot::Sender<BridgeResult<Response>>,
}

// =============================================================================
// Gateway Service
// =============================================================================

/// The service side. Owns the receiving end of the request channel.
pub struct Gateway {
    state: StoreState,
    backup_agent: Arc<dyn BackupAgent>,
    requests_rx: mpsc::Receiver<Envelope>,
    shutdown_rx: mpsc::Receiver<oneshot::Sender<()>>,
}

impl Gateway {
    /// Creates the service and its first handle. The service does nothing
    /// until [`Gateway::run`] is polled.
    pub fn new(
        state: StoreState,
        backup_agent: Arc<dyn BackupAgent>,
        capacity: usize,
    ) -> (Self, BridgeHandle) {
        let (requests_tx, requests_rx) = mpsc::channel(capacity.max(1));
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let gateway = Gateway {
            state,
            backup_agent,
            requests_rx,
            shutdown_rx,
        };
        let handle = BridgeHandle {
            requests_tx,
            shutdown_tx,
        };

        (gateway, handle)
    }

    /// Spawns the service on the current runtime with the default capacity.
    pub fn spawn(state: StoreState, backup_agent: Arc<dyn BackupAgent>) -> BridgeHandle {
        Self::spawn_with_capacity(state, backup_agent, DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn spawn_with_capacity(
        state: StoreState,
        backup_agent: Arc<dyn BackupAgent>,
        capacity: usize,
    ) -> BridgeHandle {
        let (gateway, handle) = Self::new(state, backup_agent, capacity);
        tokio::spawn(gateway.run());
        handle
    }

    /// Runs the service loop until shutdown or until every handle is dropped.
    pub async fn run(mut self) {
        info!("Gateway started");

        loop {
            tokio::select! {
                biased;

                Some(ack) = self.shutdown_rx.recv() => {
                    self.drain().await;
                    info!("Gateway stopped");
                    // The caller may have given up waiting.
                    let _ = ack.send(());
                    return;
                }

                envelope = self.requests_rx.recv() => match envelope {
                    Some(envelope) => self.serve(envelope),
                    None => break,
                },
            }
        }

        info!("Gateway stopped, all handles dropped");
    }

    /// Closes intake and serves whatever was already queued.
    async fn drain(&mut self) {
        self.requests_rx.close();
        let mut drained = 0usize;
        while let Some(envelope) = self.requests_rx.recv().await {
            self.serve(envelope);
            drained += 1;
        }
        debug!(drained, "Gateway intake closed");
    }

    /// Runs one call on its own task.
    fn serve(&self, envelope: Envelope) {
        let state = self.state.clone();
        let backup_agent = Arc::clone(&self.backup_agent);

        tokio::spawn(async move {
            let Envelope { request, reply } = envelope;
            let op = request.op();
            debug!(op, mutation = request.is_mutation(), "Dispatching call");

            let result = commands::dispatch(&state, backup_agent.as_ref(), request).await;
            match &result {
                Err(e) if e.is_caller_error() => debug!(op, error = %e, "Call rejected"),
                Err(e) => warn!(op, error = %e, "Call failed"),
                Ok(_) => {}
            }

            if reply.send(result).is_err() {
                warn!(op, "Caller went away before the reply was delivered");
            }
        });
    }
}

// =============================================================================
// Handle
// =============================================================================

/// Caller side of the gateway. Cheap to clone; every clone reaches the same
/// store.
#[derive(Debug, Clone)]
pub struct BridgeHandle {
    requests_tx: mpsc::Sender<Envelope>,
    shutdown_tx: mpsc::Sender<oneshot::Sender<()>>,
}

impl BridgeHandle {
    /// Sends a request and waits for its result.
    ///
    /// ## Errors
    /// * `TransportRejected` - the gateway is not running, or it stopped
    ///   before replying. Not retried.
    /// * `Receipt` - `calculateReceipt` could not read the sale date.
    pub async fn call(&self, request: Request) -> BridgeResult<Response> {
        let op = request.op();
        let (reply_tx, reply_rx) = oneshot::channel();

        self.requests_tx
            .send(Envelope {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| {
                warn!(op, "Gateway rejected call, not running");
                BridgeError::TransportRejected(format!("{op}: gateway is not running"))
            })?;

        reply_rx.await.map_err(|_| {
            warn!(op, "Gateway dropped call without replying");
            BridgeError::TransportRejected(format!("{op}: gateway stopped before replying"))
        })?
    }

    /// Parses a JSON request at the boundary and sends it.
    ///
    /// Malformed JSON, an unknown `op` or a payload of the wrong shape is
    /// `InvalidRequest` and never reaches the store.
    pub async fn call_json(&self, json: &str) -> BridgeResult<Response> {
        let request: Request =
            serde_json::from_str(json).map_err(|e| BridgeError::InvalidRequest(e.to_string()))?;
        self.call(request).await
    }

    /// Stops the gateway and waits until queued calls have been dispatched.
    pub async fn shutdown(&self) -> BridgeResult<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.shutdown_tx
            .send(ack_tx)
            .await
            .map_err(|_| BridgeError::TransportRejected("shutdown: gateway is not running".into()))?;
        ack_rx
            .await
            .map_err(|_| BridgeError::TransportRejected("shutdown: gateway already stopped".into()))
    }

    /// Returns true while the gateway accepts calls.
    pub fn is_open(&self) -> bool {
        !self.requests_tx.is_closed()
    }

    // =========================================================================
    // Typed Operations
    // =========================================================================

    pub async fn get_products(&self) -> BridgeResult<Vec<Product>> {
        match self.call(Request::GetProducts).await? {
            Response::GetProducts(products) => Ok(products),
            other => Err(unexpected("getProducts", &other)),
        }
    }

    pub async fn add_product(&self, fields: NewProduct) -> BridgeResult<Product> {
        match self.call(Request::AddProduct(fields)).await? {
            Response::AddProduct(product) => Ok(product),
            other => Err(unexpected("addProduct", &other)),
        }
    }

    pub async fn update_product(&self, product: Product) -> BridgeResult<Option<Product>> {
        match self.call(Request::UpdateProduct(product)).await? {
            Response::UpdateProduct(product) => Ok(product),
            other => Err(unexpected("updateProduct", &other)),
        }
    }

    pub async fn delete_product(&self, id: ProductId) -> BridgeResult<bool> {
        match self.call(Request::DeleteProduct(id)).await? {
            Response::DeleteProduct(removed) => Ok(removed),
            other => Err(unexpected("deleteProduct", &other)),
        }
    }

    pub async fn get_sales(&self) -> BridgeResult<Vec<Sale>> {
        match self.call(Request::GetSales).await? {
            Response::GetSales(sales) => Ok(sales),
            other => Err(unexpected("getSales", &other)),
        }
    }

    pub async fn add_sale(&self, fields: NewSale) -> BridgeResult<Sale> {
        match self.call(Request::AddSale(fields)).await? {
            Response::AddSale(sale) => Ok(sale),
            other => Err(unexpected("addSale", &other)),
        }
    }

    pub async fn get_settings(&self) -> BridgeResult<Settings> {
        match self.call(Request::GetSettings).await? {
            Response::GetSettings(settings) => Ok(settings),
            other => Err(unexpected("getSettings", &other)),
        }
    }

    pub async fn save_settings(&self, settings: Settings) -> BridgeResult<Settings> {
        match self.call(Request::SaveSettings(settings)).await? {
            Response::SaveSettings(settings) => Ok(settings),
            other => Err(unexpected("saveSettings", &other)),
        }
    }

    pub async fn backup_data(&self, location: impl Into<String>) -> BridgeResult<BackupOutcome> {
        match self.call(Request::BackupData(location.into())).await? {
            Response::BackupData(outcome) => Ok(outcome),
            other => Err(unexpected("backupData", &other)),
        }
    }

    pub async fn restore_data(&self, location: impl Into<String>) -> BridgeResult<BackupOutcome> {
        match self.call(Request::RestoreData(location.into())).await? {
            Response::RestoreData(outcome) => Ok(outcome),
            other => Err(unexpected("restoreData", &other)),
        }
    }

    pub async fn calculate_receipt(&self, input: ReceiptInput) -> BridgeResult<ReceiptView> {
        match self.call(Request::CalculateReceipt(input)).await? {
            Response::CalculateReceipt(view) => Ok(view),
            other => Err(unexpected("calculateReceipt", &other)),
        }
    }

    pub async fn get_dashboard(&self) -> BridgeResult<DashboardSummary> {
        match self.call(Request::GetDashboard).await? {
            Response::GetDashboard(summary) => Ok(summary),
            other => Err(unexpected("getDashboard", &other)),
        }
    }
}

fn unexpected(expected: &'static str, actual: &Response) -> BridgeError {
    BridgeError::UnexpectedResponse {
        expected,
        actual: actual.op(),
    }
}

// =============================================================================
// Tests
// =============================================================================
