//! Wallet panel — contract info cards, deposit and withdraw forms, and the
//! status of the last submitted transaction.

use egui::Ui;
use tokio::sync::mpsc;

use crate::events::{ActionKind, UiEvent};
use crate::state::{PanelState, TxPhase};

/// Render the main panel.
pub fn show(ui: &mut Ui, state: &mut PanelState, ui_tx: &mpsc::UnboundedSender<UiEvent>) {
    ui.horizontal(|ui| {
        ui.heading("Group Wallet");
        ui.add_space(10.0);

        if ui
            .add_enabled(
                !state.loading,
                egui::Button::new(if state.loading {
                    "Refreshing..."
                } else {
                    "Refresh"
                }),
            )
            .clicked()
        {
            state.loading = true;
            let _ = ui_tx.send(UiEvent::RefreshSnapshot);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(ref account) = state.account {
                ui.label(
                    egui::RichText::new(shorten(account))
                        .color(egui::Color32::GRAY)
                        .monospace(),
                );
            }
        });
    });

    ui.separator();
    ui.add_space(10.0);

    // Contract info cards
    ui.columns(2, |cols| {
        cols[0].group(|ui| {
            ui.set_min_width(ui.available_width());
            ui.label(
                egui::RichText::new("Contract Balance")
                    .size(12.0)
                    .color(egui::Color32::GRAY),
            );
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(format!("{} {}", state.balance, state.token_symbol))
                    .size(24.0)
                    .strong(),
            );
        });
        cols[1].group(|ui| {
            ui.set_min_width(ui.available_width());
            ui.label(
                egui::RichText::new("Your Membership")
                    .size(12.0)
                    .color(egui::Color32::GRAY),
            );
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(if state.is_member {
                    "Member"
                } else {
                    "Not a member"
                })
                .size(24.0)
                .strong(),
            );
        });
    });

    if let Some(ref owner) = state.owner {
        ui.add_space(4.0);
        ui.label(
            egui::RichText::new(format!("Owner: {}", owner))
                .size(12.0)
                .color(egui::Color32::GRAY)
                .monospace(),
        );
    }

    ui.add_space(15.0);

    action_form(ui, state, ui_tx, ActionKind::Deposit);
    ui.add_space(10.0);
    action_form(ui, state, ui_tx, ActionKind::Withdraw);

    // Transaction status
    if let Some(txid) = state.tx.txid.clone() {
        ui.add_space(15.0);
        ui.group(|ui| {
            ui.set_min_width(ui.available_width());
            ui.label(
                egui::RichText::new("Transaction")
                    .size(12.0)
                    .color(egui::Color32::GRAY),
            );
            ui.label(egui::RichText::new(txid).monospace());
            if let Some(ts) = chrono::DateTime::from_timestamp(state.tx.submitted_at, 0) {
                ui.label(
                    egui::RichText::new(format!("Submitted {}", ts.format("%H:%M:%S UTC")))
                        .size(12.0)
                        .color(egui::Color32::GRAY),
                );
            }

            match state.tx.phase {
                TxPhase::Confirming => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.colored_label(egui::Color32::YELLOW, "Waiting for confirmation...");
                    });
                }
                TxPhase::Confirmed => {
                    ui.colored_label(egui::Color32::GREEN, "Transaction confirmed!");
                }
                TxPhase::Reverted => {
                    let reason = state.tx.error.as_deref().unwrap_or("execution reverted");
                    ui.colored_label(egui::Color32::RED, format!("Reverted: {}", reason));
                }
                _ => {}
            }
        });
    } else if state.tx.phase == TxPhase::Rejected {
        if let Some(ref err) = state.tx.error {
            ui.add_space(15.0);
            ui.colored_label(egui::Color32::RED, format!("Error: {}", err));
        }
    }

    if let Some(ref err) = state.error {
        ui.add_space(10.0);
        ui.colored_label(egui::Color32::RED, format!("Error: {}", err));
    }
}

/// One amount form: input field plus a gated submit button.
fn action_form(
    ui: &mut Ui,
    state: &mut PanelState,
    ui_tx: &mpsc::UnboundedSender<UiEvent>,
    kind: ActionKind,
) {
    let (title, idle_label, busy_label) = match kind {
        ActionKind::Deposit => ("Deposit", "Deposit", "Depositing..."),
        ActionKind::Withdraw => ("Withdraw", "Withdraw", "Withdrawing..."),
    };

    ui.group(|ui| {
        ui.set_min_width(ui.available_width());
        ui.label(format!("{} {}", title, state.token_symbol));

        let input = match kind {
            ActionKind::Deposit => &mut state.deposit_amount,
            ActionKind::Withdraw => &mut state.withdraw_amount,
        };
        ui.add(
            egui::TextEdit::singleline(input)
                .hint_text("0.00")
                .desired_width(ui.available_width()),
        );

        ui.add_space(8.0);

        let enabled = match kind {
            ActionKind::Deposit => state.can_deposit(),
            ActionKind::Withdraw => state.can_withdraw(),
        };
        let busy = state.tx.phase.is_pending() && state.tx.kind == Some(kind);
        let label = if busy { busy_label } else { idle_label };

        if ui
            .add_enabled(
                enabled,
                egui::Button::new(egui::RichText::new(label).size(14.0))
                    .min_size(egui::vec2(ui.available_width(), 32.0)),
            )
            .clicked()
        {
            let amount = match kind {
                ActionKind::Deposit => state.deposit_amount.clone(),
                ActionKind::Withdraw => state.withdraw_amount.clone(),
            };
            state.tx.begin(kind);
            state.error = None;
            let _ = ui_tx.send(match kind {
                ActionKind::Deposit => UiEvent::Deposit { amount },
                ActionKind::Withdraw => UiEvent::Withdraw { amount },
            });
        }
    });
}

/// Shorten an address for the header: `0x1234..cdef`.
fn shorten(address: &str) -> String {
    if address.len() > 12 {
        format!("{}..{}", &address[..6], &address[address.len() - 4..])
    } else {
        address.to_string()
    }
}
