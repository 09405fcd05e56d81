//! Background service task — single `select!` loop, no shared state.
//!
//! The service owns all async I/O. It receives [`UiEvent`]s from the UI
//! thread, drives the [`ContractGateway`], and sends [`ServiceEvent`]s
//! back. While a transaction id is being watched, a short poll interval
//! queries its status; finality triggers exactly one snapshot refetch.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::contract_client::{ContractClient, TxStatus};
use crate::events::{ActionKind, ServiceEvent, UiEvent};
use crate::gateway::ContractGateway;

/// The transaction currently being watched for finality. Replaced wholesale
/// by a newer submission — last write wins.
struct WatchedTx {
    txid: String,
    kind: ActionKind,
}

/// Run the service loop until the cancellation token fires.
///
/// This is the only `tokio::spawn`ed task in the application.
pub async fn run(
    token: CancellationToken,
    mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
    svc_tx: mpsc::UnboundedSender<ServiceEvent>,
    config: Config,
) {
    let client = ContractClient::new(config.rpc_endpoint.clone(), config.contract_address.clone());
    let mut gateway = ContractGateway::new(client, None);
    let mut watched: Option<WatchedTx> = None;

    // Status poll: only runs while a transaction is being watched.
    let mut status_interval = tokio::time::interval(Duration::from_secs(config.status_poll_secs));
    status_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // Slow snapshot refresh as a fallback for externally-caused changes.
    let mut snapshot_interval =
        tokio::time::interval(Duration::from_secs(config.snapshot_poll_secs));
    snapshot_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    snapshot_interval.tick().await;

    log::info!("service loop started ({})", config.rpc_endpoint);

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                log::info!("service loop shutting down");
                break;
            }

            _ = status_interval.tick(), if watched.is_some() => {
                poll_watched(&mut gateway, &mut watched, &svc_tx).await;
            }

            _ = snapshot_interval.tick(), if gateway.account().is_some() => {
                match gateway.refresh_snapshot().await {
                    Ok(snapshot) => {
                        let _ = svc_tx.send(ServiceEvent::SnapshotUpdated(snapshot));
                    }
                    Err(e) => log::warn!("snapshot poll failed: {}", e),
                }
            }

            Some(event) = ui_rx.recv() => {
                match event {
                    UiEvent::Shutdown => break,

                    UiEvent::ConnectWallet => {
                        match gateway.connect().await {
                            Ok(address) => {
                                log::info!("connected account {}", address);
                                let _ = svc_tx.send(ServiceEvent::AccountConnected { address });
                                refresh_snapshot(&mut gateway, &svc_tx).await;
                            }
                            Err(e) => {
                                let _ = svc_tx.send(ServiceEvent::Error(
                                    format!("Connect failed: {}", e),
                                ));
                            }
                        }
                    }

                    UiEvent::RefreshSnapshot => {
                        refresh_snapshot(&mut gateway, &svc_tx).await;
                    }

                    UiEvent::Deposit { amount } => {
                        submit(&gateway, &mut watched, &svc_tx, ActionKind::Deposit, &amount).await;
                    }

                    UiEvent::Withdraw { amount } => {
                        submit(&gateway, &mut watched, &svc_tx, ActionKind::Withdraw, &amount).await;
                    }
                }
            }
        }
    }

    log::info!("service loop exited");
}

async fn refresh_snapshot(
    gateway: &mut ContractGateway,
    svc_tx: &mpsc::UnboundedSender<ServiceEvent>,
) {
    match gateway.refresh_snapshot().await {
        Ok(snapshot) => {
            let _ = svc_tx.send(ServiceEvent::SnapshotUpdated(snapshot));
        }
        Err(e) => {
            let _ = svc_tx.send(ServiceEvent::Error(e.to_string()));
        }
    }
}

/// Submit one write operation. A success replaces the watched transaction;
/// a failure is surfaced unchanged and nothing is retried.
async fn submit(
    gateway: &ContractGateway,
    watched: &mut Option<WatchedTx>,
    svc_tx: &mpsc::UnboundedSender<ServiceEvent>,
    kind: ActionKind,
    amount: &str,
) {
    let result = match kind {
        ActionKind::Deposit => gateway.deposit(amount).await,
        ActionKind::Withdraw => gateway.withdraw(amount).await,
    };

    match result {
        Ok(txid) => {
            log::info!("{} submitted: {}", kind.label(), txid);
            *watched = Some(WatchedTx {
                txid: txid.clone(),
                kind,
            });
            let _ = svc_tx.send(ServiceEvent::TransactionSubmitted {
                kind,
                txid,
                timestamp: chrono::Utc::now().timestamp(),
            });
        }
        Err(e) => {
            log::error!("{} failed: {}", kind.label(), e);
            let _ = svc_tx.send(ServiceEvent::SubmissionFailed {
                kind,
                error: e.to_string(),
            });
        }
    }
}

/// Poll the watched transaction once. Terminal statuses clear the watch;
/// a confirmation additionally refetches balance and membership, once.
async fn poll_watched(
    gateway: &mut ContractGateway,
    watched: &mut Option<WatchedTx>,
    svc_tx: &mpsc::UnboundedSender<ServiceEvent>,
) {
    let Some(watch) = watched.as_ref() else {
        return;
    };

    match gateway.transaction_status(&watch.txid).await {
        // Still pending; keep polling.
        Ok(None) => {}

        Ok(Some(TxStatus::Confirmed)) => {
            log::info!("{} confirmed: {}", watch.kind.label(), watch.txid);
            let txid = watch.txid.clone();
            *watched = None;
            let _ = svc_tx.send(ServiceEvent::TransactionConfirmed { txid });

            gateway.invalidate();
            refresh_snapshot(gateway, svc_tx).await;
        }

        Ok(Some(TxStatus::Reverted { reason })) => {
            log::warn!("{} reverted: {} ({})", watch.kind.label(), watch.txid, reason);
            let txid = watch.txid.clone();
            *watched = None;
            let _ = svc_tx.send(ServiceEvent::TransactionReverted { txid, reason });
        }

        // Transient RPC failure; the watch stays armed.
        Err(e) => log::warn!("status poll failed: {}", e),
    }
}
