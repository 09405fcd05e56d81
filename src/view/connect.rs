//! Connect screen — shown until a wallet account is available.

use egui::Ui;
use tokio::sync::mpsc;

use crate::events::UiEvent;
use crate::state::PanelState;

/// Render the connect prompt. No actions are available here.
pub fn show(ui: &mut Ui, state: &mut PanelState, ui_tx: &mpsc::UnboundedSender<UiEvent>) {
    ui.add_space(80.0);
    ui.vertical_centered(|ui| {
        ui.heading("Group Wallet");
        ui.add_space(8.0);
        ui.label("Please connect your wallet to interact with the contract.");
        ui.add_space(24.0);

        let button = egui::Button::new(egui::RichText::new("Connect Wallet").size(16.0))
            .min_size(egui::vec2(200.0, 36.0));
        if ui.add_enabled(!state.loading, button).clicked() {
            state.loading = true;
            state.error = None;
            let _ = ui_tx.send(UiEvent::ConnectWallet);
        }

        if state.loading {
            ui.add_space(12.0);
            ui.spinner();
        }

        if let Some(ref err) = state.error {
            ui.add_space(12.0);
            ui.colored_label(egui::Color32::RED, format!("Error: {}", err));
        }
    });
}
