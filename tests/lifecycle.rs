//! End-to-end panel lifecycle: the event sequences the service produces,
//! driven through the pure state machine the UI renders from.

use group_wallet::amount;
use group_wallet::events::{ActionKind, ServiceEvent};
use group_wallet::gateway::ContractSnapshot;
use group_wallet::state::{PanelState, TxPhase};

fn connected_state() -> PanelState {
    let mut state = PanelState::default();
    state.apply(ServiceEvent::AccountConnected {
        address: "0xabc0000000000000000000000000000000000001".to_string(),
    });
    state.apply(ServiceEvent::SnapshotUpdated(ContractSnapshot {
        balance: 0,
        is_member: true,
        owner: Some("0xdef0000000000000000000000000000000000002".to_string()),
    }));
    state
}

#[test]
fn deposit_lifecycle_clears_input_and_reflects_refetched_balance() {
    let mut state = connected_state();

    // "10.5" is a valid positive amount, so the button is live.
    state.deposit_amount = "10.5".to_string();
    assert!(state.can_deposit());

    // The gateway would receive exactly 10.5 × 10^18 base units.
    assert_eq!(
        amount::parse_units(&state.deposit_amount).unwrap(),
        10_500_000_000_000_000_000
    );

    // Click: the view begins tracking before the service answers.
    state.tx.begin(ActionKind::Deposit);
    assert_eq!(state.tx.phase, TxPhase::Submitting);
    assert!(!state.can_deposit());
    assert!(!state.can_withdraw());

    // Provider accepted: input clears, the watch starts.
    state.apply(ServiceEvent::TransactionSubmitted {
        kind: ActionKind::Deposit,
        txid: "0xtx1".to_string(),
        timestamp: 1_700_000_000,
    });
    assert!(state.deposit_amount.is_empty());
    assert_eq!(state.tx.phase, TxPhase::Confirming);

    // Even a valid withdraw amount stays disabled while confirming.
    state.withdraw_amount = "1".to_string();
    assert!(!state.can_withdraw());

    // Finality, then the refetched snapshot.
    state.apply(ServiceEvent::TransactionConfirmed {
        txid: "0xtx1".to_string(),
    });
    assert_eq!(state.tx.phase, TxPhase::Confirmed);

    state.apply(ServiceEvent::SnapshotUpdated(ContractSnapshot {
        balance: 10_500_000_000_000_000_000,
        is_member: true,
        owner: None,
    }));
    assert_eq!(state.balance, "10.5");

    // Terminal phase: actions are available again.
    assert!(state.can_withdraw());
}

#[test]
fn rejected_submission_preserves_input_for_retry() {
    let mut state = connected_state();
    state.deposit_amount = "2.5".to_string();
    state.tx.begin(ActionKind::Deposit);

    state.apply(ServiceEvent::SubmissionFailed {
        kind: ActionKind::Deposit,
        error: "user rejected the request".to_string(),
    });

    assert_eq!(state.deposit_amount, "2.5");
    assert_eq!(state.tx.phase, TxPhase::Rejected);
    assert!(state.tx.error.is_some());
    assert!(state.can_deposit());
}

#[test]
fn reverted_transaction_surfaces_the_reason_verbatim() {
    let mut state = connected_state();
    state.withdraw_amount = "5".to_string();
    state.tx.begin(ActionKind::Withdraw);
    state.apply(ServiceEvent::TransactionSubmitted {
        kind: ActionKind::Withdraw,
        txid: "0xtx9".to_string(),
        timestamp: 1_700_000_000,
    });

    state.apply(ServiceEvent::TransactionReverted {
        txid: "0xtx9".to_string(),
        reason: "caller is not a member".to_string(),
    });

    assert_eq!(state.tx.phase, TxPhase::Reverted);
    assert_eq!(state.tx.error.as_deref(), Some("caller is not a member"));
}

#[test]
fn empty_and_nonpositive_withdraw_amounts_never_enable_the_button() {
    let mut state = connected_state();
    for input in ["", "0", "0.0"] {
        state.withdraw_amount = input.to_string();
        assert!(!state.can_withdraw(), "withdraw enabled for {:?}", input);
    }
}

#[test]
fn a_new_submission_supersedes_the_watched_transaction() {
    let mut state = connected_state();
    state.apply(ServiceEvent::TransactionSubmitted {
        kind: ActionKind::Deposit,
        txid: "0xfirst".to_string(),
        timestamp: 1,
    });
    state.apply(ServiceEvent::TransactionSubmitted {
        kind: ActionKind::Deposit,
        txid: "0xsecond".to_string(),
        timestamp: 2,
    });

    // The first transaction's confirmation is no longer reflected.
    state.apply(ServiceEvent::TransactionConfirmed {
        txid: "0xfirst".to_string(),
    });
    assert_eq!(state.tx.phase, TxPhase::Confirming);
    assert_eq!(state.tx.txid.as_deref(), Some("0xsecond"));
}
