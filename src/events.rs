//! Event types for communication between UI and service task.
//!
//! These two enums are the *only* interface between the synchronous egui
//! render loop and the asynchronous service task. No shared state, no Arc,
//! no Mutex.

use crate::gateway::ContractSnapshot;

// ============================================================================
// UI → Service
// ============================================================================

/// Commands sent from the UI thread to the background service task.
#[derive(Debug)]
pub enum UiEvent {
    /// Ask the provider for its accounts and connect the first one.
    ConnectWallet,

    /// Re-read the contract snapshot.
    RefreshSnapshot,

    /// Submit a value-carrying deposit. Amount is the raw input string;
    /// the gateway validates and converts it.
    Deposit { amount: String },

    /// Submit a withdrawal of the given amount.
    Withdraw { amount: String },

    /// Clean shutdown.
    Shutdown,
}

/// Which write operation a transaction performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Deposit,
    Withdraw,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Deposit => "deposit",
            ActionKind::Withdraw => "withdraw",
        }
    }
}

// ============================================================================
// Service → UI
// ============================================================================

/// Events sent from the service task back to the UI thread.
#[derive(Debug)]
pub enum ServiceEvent {
    /// The provider connected an account.
    AccountConnected { address: String },

    /// Fresh contract read-state, replacing the previous one wholesale.
    SnapshotUpdated(ContractSnapshot),

    /// The provider accepted the submission and returned a transaction id.
    TransactionSubmitted {
        kind: ActionKind,
        txid: String,
        timestamp: i64,
    },

    /// The watched transaction reached finality.
    TransactionConfirmed { txid: String },

    /// The watched transaction was included but failed on-chain.
    TransactionReverted { txid: String, reason: String },

    /// The submission never got a transaction id — amount validation,
    /// a signing rejection, or an RPC failure.
    SubmissionFailed { kind: ActionKind, error: String },

    /// Non-fatal error to display in the UI.
    Error(String),
}
