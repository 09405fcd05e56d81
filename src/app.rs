//! Application shell — the eframe::App implementation.
//!
//! Thin wrapper: drains service events, routes to the connect or panel
//! view. No async, no network, no contract logic.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::events::{ServiceEvent, UiEvent};
use crate::state::PanelState;
use crate::view;

/// The wallet application.
pub struct App {
    pub state: PanelState,
    pub ui_tx: mpsc::UnboundedSender<UiEvent>,
    svc_rx: mpsc::UnboundedReceiver<ServiceEvent>,
    shutdown_token: CancellationToken,
}

impl App {
    /// Create a new App, spawning the background service task.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (svc_tx, svc_rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();

        let svc_token = token.clone();
        let svc_config = config.clone();
        tokio::spawn(crate::service::run(svc_token, ui_rx, svc_tx, svc_config));

        let state = PanelState {
            token_symbol: config.token_symbol,
            ..Default::default()
        };

        Self {
            state,
            ui_tx,
            svc_rx,
            shutdown_token: token,
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown_token.cancel();
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Repaint regularly to pick up background service events
        ctx.request_repaint_after(std::time::Duration::from_secs(1));

        // Drain all pending service events (non-blocking)
        while let Ok(event) = self.svc_rx.try_recv() {
            self.state.apply(event);
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.connected {
                view::panel::show(ui, &mut self.state, &self.ui_tx);
            } else {
                view::connect::show(ui, &mut self.state, &self.ui_tx);
            }
        });
    }
}
