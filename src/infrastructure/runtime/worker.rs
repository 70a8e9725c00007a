//! Async worker - runs in Tokio runtime and handles RPC operations

use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use anyhow::Result;
use tokio::time::interval;

use crate::config::Endpoint;
use crate::domain::block::{BlockId, SearchMode};
use crate::infrastructure::chain::{ChainClient, MockChain, RpcChain};
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};
use crate::search;

/// Run the async worker loop
pub async fn run_async_worker(
    endpoints: Vec<Endpoint>,
    mock: bool,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    if endpoints.is_empty() && !mock {
        anyhow::bail!("No endpoints configured");
    }

    let mut endpoint_index = 0usize;
    let mut client: Option<Box<dyn ChainClient>> = None;
    let mut chain_name = String::new();
    let mut last_head: Option<u64> = None;

    // Polling cadence for the finalized-head feed
    let mut poll = interval(Duration::from_millis(500));

    loop {
        // Try to connect if not connected
        if client.is_none() {
            let (candidate, display) = if mock {
                (
                    Box::new(MockChain::development()) as Box<dyn ChainClient>,
                    "mock".to_string(),
                )
            } else {
                let endpoint = &endpoints[endpoint_index];
                match RpcChain::new(endpoint.url.clone()) {
                    Ok(rpc) => (Box::new(rpc) as Box<dyn ChainClient>, endpoint.display()),
                    Err(err) => {
                        let _ = evt_tx.send(RuntimeEvent::Error {
                            message: format!("Bad endpoint ({}): {err}", endpoint.display()),
                        });
                        tokio::time::sleep(Duration::from_millis(900)).await;
                        continue;
                    }
                }
            };

            match connect(candidate.as_ref()).await {
                Ok((chain, accounts)) => {
                    chain_name = chain.clone();
                    last_head = None;
                    let _ = evt_tx.send(RuntimeEvent::Connected {
                        endpoint: display,
                        chain,
                        accounts,
                    });
                    client = Some(candidate);
                }
                Err(err) => {
                    let _ = evt_tx.send(RuntimeEvent::Error {
                        message: format!("Connection failed ({display}): {err}"),
                    });

                    // Try next endpoint if available
                    if endpoints.len() > 1 {
                        endpoint_index = (endpoint_index + 1) % endpoints.len();
                    }

                    tokio::time::sleep(Duration::from_millis(900)).await;
                    continue;
                }
            }
        }

        // Process commands (non-blocking)
        while let Ok(cmd) = cmd_rx.try_recv() {
            match cmd {
                RuntimeCommand::Shutdown => return Ok(()),

                RuntimeCommand::SwitchEndpoint { index } => {
                    if !mock && index >= endpoints.len() {
                        let _ = evt_tx.send(RuntimeEvent::Error {
                            message: format!(
                                "Invalid endpoint index {} ({} total)",
                                index,
                                endpoints.len()
                            ),
                        });
                        continue;
                    }
                    endpoint_index = index;
                    client = None;
                    last_head = None;
                }

                RuntimeCommand::Search { seq, mode, param } => {
                    if let Some(ref c) = client {
                        run_search(c.as_ref(), seq, mode, &param, &evt_tx).await;
                    } else {
                        let _ = evt_tx.send(RuntimeEvent::SearchFailed {
                            seq,
                            message: "not connected".to_string(),
                        });
                    }
                }
            }
        }

        // Poll the finalized head for the live feed
        if let Some(ref c) = client {
            match c.latest_header().await {
                Ok(header) => {
                    if last_head != Some(header.number) {
                        last_head = Some(header.number);
                        let _ = evt_tx.send(RuntimeEvent::NewHead {
                            chain: chain_name.clone(),
                            header,
                        });
                    }
                }
                Err(err) => {
                    let _ = evt_tx.send(RuntimeEvent::Error {
                        message: format!("Head poll failed: {err}"),
                    });
                    // Force a reconnect on the next pass
                    client = None;
                }
            }
        }

        poll.tick().await;
    }
}

async fn connect(client: &dyn ChainClient) -> Result<(String, Vec<String>)> {
    let chain = client.chain_name().await?;
    let accounts = client.accounts().await.unwrap_or_default();
    Ok((chain, accounts))
}

/// One search, staged so the TUI can show the resolving/correlating
/// transition. Every outcome carries the submission's sequence
/// number; the session drops whatever is stale.
async fn run_search(
    client: &dyn ChainClient,
    seq: u64,
    mode: SearchMode,
    param: &str,
    evt_tx: &Sender<RuntimeEvent>,
) {
    let id = match BlockId::parse(mode, param) {
        Ok(id) => id,
        Err(err) => {
            let _ = evt_tx.send(RuntimeEvent::SearchFailed {
                seq,
                message: err.to_string(),
            });
            return;
        }
    };

    let found = match search::resolve(client, &id).await {
        Ok(found) => found,
        Err(err) => {
            let _ = evt_tx.send(RuntimeEvent::SearchFailed {
                seq,
                message: err.to_string(),
            });
            return;
        }
    };
    let _ = evt_tx.send(RuntimeEvent::SearchResolved {
        seq,
        status: found.status_line(),
    });

    match search::build_report(client, &found).await {
        Ok(report) => {
            let _ = evt_tx.send(RuntimeEvent::SearchCompleted { seq, report });
        }
        Err(err) => {
            let _ = evt_tx.send(RuntimeEvent::SearchFailed {
                seq,
                message: err.to_string(),
            });
        }
    }
}
