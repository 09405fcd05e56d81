//! Panel state — plain data, no async, no Arc.
//!
//! `PanelState` holds everything the UI needs to render. The service task
//! sends `ServiceEvent`s which are applied via `PanelState::apply()`. The
//! UI reads fields directly — no locking, no channels.

use crate::amount;
use crate::events::{ActionKind, ServiceEvent};

/// Lifecycle of the tracked transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TxPhase {
    #[default]
    Idle,
    /// Handed to the provider, awaiting signature acceptance.
    Submitting,
    /// Accepted with a transaction id, awaiting finality.
    Confirming,
    Confirmed,
    /// Declined before a transaction id existed.
    Rejected,
    /// Included on-chain but failed there.
    Reverted,
}

impl TxPhase {
    /// A new submission is not permitted while this is true (UI-enforced).
    pub fn is_pending(self) -> bool {
        matches!(self, TxPhase::Submitting | TxPhase::Confirming)
    }
}

/// The single tracked transaction. A new submission overwrites it —
/// last write wins, the superseded one is simply no longer reflected.
#[derive(Debug, Default)]
pub struct TxTracker {
    pub phase: TxPhase,
    pub kind: Option<ActionKind>,
    pub txid: Option<String>,
    pub submitted_at: i64,
    pub error: Option<String>,
}

impl TxTracker {
    /// Start tracking a fresh submission, abandoning whatever came before.
    pub fn begin(&mut self, kind: ActionKind) {
        *self = TxTracker {
            phase: TxPhase::Submitting,
            kind: Some(kind),
            ..Default::default()
        };
    }
}

/// All panel state needed for rendering.
#[derive(Debug)]
pub struct PanelState {
    // -- Connection --
    pub connected: bool,
    pub account: Option<String>,

    // -- Contract snapshot (display form) --
    pub balance: String,
    pub is_member: bool,
    pub owner: Option<String>,

    // -- Ephemeral inputs --
    pub deposit_amount: String,
    pub withdraw_amount: String,

    // -- Transaction tracking --
    pub tx: TxTracker,

    // -- UI transient state --
    pub error: Option<String>,
    pub loading: bool,

    // -- Display preferences --
    pub token_symbol: String,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            connected: false,
            account: None,
            balance: "0".to_string(),
            is_member: false,
            owner: None,
            deposit_amount: String::new(),
            withdraw_amount: String::new(),
            tx: TxTracker::default(),
            error: None,
            loading: false,
            token_symbol: String::new(),
        }
    }
}

/// True when the string parses to a strictly positive amount.
fn amount_valid(s: &str) -> bool {
    amount::parse_units(s).map(|v| v > 0).unwrap_or(false)
}

impl PanelState {
    pub fn can_deposit(&self) -> bool {
        self.connected && amount_valid(&self.deposit_amount) && !self.tx.phase.is_pending()
    }

    pub fn can_withdraw(&self) -> bool {
        self.connected && amount_valid(&self.withdraw_amount) && !self.tx.phase.is_pending()
    }

    /// Apply a service event to update state. Pure state-machine transition.
    pub fn apply(&mut self, event: ServiceEvent) {
        match event {
            ServiceEvent::AccountConnected { address } => {
                self.connected = true;
                self.account = Some(address);
                self.error = None;
            }

            ServiceEvent::SnapshotUpdated(snapshot) => {
                self.balance = amount::format_units(snapshot.balance);
                self.is_member = snapshot.is_member;
                self.owner = snapshot.owner;
                self.loading = false;
            }

            ServiceEvent::TransactionSubmitted {
                kind,
                txid,
                timestamp,
            } => {
                self.tx = TxTracker {
                    phase: TxPhase::Confirming,
                    kind: Some(kind),
                    txid: Some(txid),
                    submitted_at: timestamp,
                    error: None,
                };
                // Only the submitted action's input is cleared.
                match kind {
                    ActionKind::Deposit => self.deposit_amount.clear(),
                    ActionKind::Withdraw => self.withdraw_amount.clear(),
                }
            }

            ServiceEvent::TransactionConfirmed { txid } => {
                // Ignore stale events for a superseded transaction.
                if self.tx.txid.as_deref() == Some(txid.as_str()) {
                    self.tx.phase = TxPhase::Confirmed;
                }
            }

            ServiceEvent::TransactionReverted { txid, reason } => {
                if self.tx.txid.as_deref() == Some(txid.as_str()) {
                    self.tx.phase = TxPhase::Reverted;
                    self.tx.error = Some(reason);
                }
            }

            ServiceEvent::SubmissionFailed { kind, error } => {
                // Inputs stay untouched so the user can retry.
                self.tx.phase = TxPhase::Rejected;
                self.tx.kind = Some(kind);
                self.tx.error = Some(error);
            }

            ServiceEvent::Error(message) => {
                self.error = Some(message);
                self.loading = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ContractSnapshot;

    fn connected_state() -> PanelState {
        let mut state = PanelState::default();
        state.apply(ServiceEvent::AccountConnected {
            address: "0xabc".to_string(),
        });
        state
    }

    #[test]
    fn test_default_state() {
        let state = PanelState::default();
        assert!(!state.connected);
        assert_eq!(state.balance, "0");
        assert!(!state.is_member);
        assert_eq!(state.tx.phase, TxPhase::Idle);
    }

    #[test]
    fn test_apply_snapshot_formats_balance() {
        let mut state = connected_state();
        state.apply(ServiceEvent::SnapshotUpdated(ContractSnapshot {
            balance: 1_500_000_000_000_000_000,
            is_member: true,
            owner: Some("0xdef".to_string()),
        }));
        assert_eq!(state.balance, "1.5");
        assert!(state.is_member);
        assert_eq!(state.owner.as_deref(), Some("0xdef"));
    }

    #[test]
    fn test_gating_requires_positive_amount() {
        let mut state = connected_state();
        for input in ["", "0", "0.000", "abc", "-1", "1.2.3"] {
            state.deposit_amount = input.to_string();
            state.withdraw_amount = input.to_string();
            assert!(!state.can_deposit(), "deposit enabled for {:?}", input);
            assert!(!state.can_withdraw(), "withdraw enabled for {:?}", input);
        }
        state.deposit_amount = "0.5".to_string();
        assert!(state.can_deposit());
    }

    #[test]
    fn test_gating_requires_connection() {
        let mut state = PanelState::default();
        state.deposit_amount = "1".to_string();
        assert!(!state.can_deposit());
    }

    #[test]
    fn test_buttons_disabled_while_pending_regardless_of_input() {
        let mut state = connected_state();
        state.deposit_amount = "1".to_string();
        state.withdraw_amount = "2".to_string();

        state.tx.begin(ActionKind::Deposit);
        assert!(!state.can_deposit());
        assert!(!state.can_withdraw());

        state.apply(ServiceEvent::TransactionSubmitted {
            kind: ActionKind::Deposit,
            txid: "0xtx1".to_string(),
            timestamp: 1_700_000_000,
        });
        assert_eq!(state.tx.phase, TxPhase::Confirming);
        assert!(!state.can_withdraw());
    }

    #[test]
    fn test_submission_clears_only_the_submitted_input() {
        let mut state = connected_state();
        state.deposit_amount = "10.5".to_string();
        state.withdraw_amount = "3".to_string();

        state.apply(ServiceEvent::TransactionSubmitted {
            kind: ActionKind::Deposit,
            txid: "0xtx1".to_string(),
            timestamp: 1_700_000_000,
        });
        assert!(state.deposit_amount.is_empty());
        assert_eq!(state.withdraw_amount, "3");
        assert_eq!(state.tx.txid.as_deref(), Some("0xtx1"));
    }

    #[test]
    fn test_failed_submission_preserves_input_and_sets_error() {
        let mut state = connected_state();
        state.withdraw_amount = "7.25".to_string();
        state.tx.begin(ActionKind::Withdraw);

        state.apply(ServiceEvent::SubmissionFailed {
            kind: ActionKind::Withdraw,
            error: "user rejected the request".to_string(),
        });
        assert_eq!(state.withdraw_amount, "7.25");
        assert_eq!(state.tx.phase, TxPhase::Rejected);
        assert_eq!(state.tx.error.as_deref(), Some("user rejected the request"));
        // Terminal phase: the button is live again.
        assert!(state.can_withdraw());
    }

    #[test]
    fn test_confirmed_and_reverted_transitions() {
        let mut state = connected_state();
        state.apply(ServiceEvent::TransactionSubmitted {
            kind: ActionKind::Deposit,
            txid: "0xtx1".to_string(),
            timestamp: 0,
        });
        state.apply(ServiceEvent::TransactionConfirmed {
            txid: "0xtx1".to_string(),
        });
        assert_eq!(state.tx.phase, TxPhase::Confirmed);

        state.apply(ServiceEvent::TransactionSubmitted {
            kind: ActionKind::Withdraw,
            txid: "0xtx2".to_string(),
            timestamp: 0,
        });
        state.apply(ServiceEvent::TransactionReverted {
            txid: "0xtx2".to_string(),
            reason: "not a member".to_string(),
        });
        assert_eq!(state.tx.phase, TxPhase::Reverted);
        assert_eq!(state.tx.error.as_deref(), Some("not a member"));
    }

    #[test]
    fn test_resubmission_overwrites_and_ignores_stale_events() {
        let mut state = connected_state();
        state.apply(ServiceEvent::TransactionSubmitted {
            kind: ActionKind::Deposit,
            txid: "0xold".to_string(),
            timestamp: 0,
        });
        state.apply(ServiceEvent::TransactionSubmitted {
            kind: ActionKind::Deposit,
            txid: "0xnew".to_string(),
            timestamp: 1,
        });
        assert_eq!(state.tx.txid.as_deref(), Some("0xnew"));

        // The superseded transaction's confirmation must not be reflected.
        state.apply(ServiceEvent::TransactionConfirmed {
            txid: "0xold".to_string(),
        });
        assert_eq!(state.tx.phase, TxPhase::Confirming);
    }

    #[test]
    fn test_apply_error() {
        let mut state = PanelState {
            loading: true,
            ..Default::default()
        };
        state.apply(ServiceEvent::Error("connection failed".to_string()));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("connection failed"));
    }
}
