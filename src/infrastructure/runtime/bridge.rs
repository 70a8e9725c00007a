//! Runtime bridge - connects sync TUI thread with async Tokio runtime
//!
//! This module provides a bridge between the synchronous TUI (ratatui)
//! thread and the asynchronous Tokio runtime that handles RPC
//! operations.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tokio::runtime::Runtime;

use crate::config::Endpoint;
use crate::domain::block::{Header, SearchMode};
use crate::infrastructure::runtime::worker::run_async_worker;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum RuntimeCommand {
    /// Run a block search. `seq` tags the submission so stale results
    /// can be discarded by the session.
    Search {
        seq: u64,
        mode: SearchMode,
        param: String,
    },
    /// Switch to a different endpoint
    SwitchEndpoint { index: usize },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// Successfully connected to a node
    Connected {
        endpoint: String,
        chain: String,
        accounts: Vec<String>,
    },
    /// A new finalized head was observed
    NewHead { chain: String, header: Header },
    /// A search resolved its block; correlation is about to run
    SearchResolved { seq: u64, status: String },
    /// The search report is ready
    SearchCompleted { seq: u64, report: String },
    /// The search failed; `message` is the underlying failure verbatim
    SearchFailed { seq: u64, message: String },
    /// Error outside any search (connection loss, bad endpoint)
    Error { message: String },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Create a new runtime bridge with the given endpoints. With
    /// `mock` set, the worker serves the scripted in-memory chain
    /// instead of connecting anywhere.
    pub fn new(endpoints: Vec<Endpoint>, mock: bool) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        // Spawn the worker thread with its own Tokio runtime
        thread::spawn(move || {
            let rt = Runtime::new().expect("Failed to create Tokio runtime");
            rt.block_on(async {
                if let Err(err) = run_async_worker(endpoints, mock, cmd_rx, evt_tx.clone()).await {
                    let _ = evt_tx.send(RuntimeEvent::Error {
                        message: format!("Worker exited: {:#}", err),
                    });
                }
            });
        });

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        // Try to send shutdown command
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
