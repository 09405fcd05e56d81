use eframe::egui;

use group_wallet::app::App;
use group_wallet::config::Config;

fn main() -> Result<(), eframe::Error> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _guard = rt.enter();

    env_logger::init();

    let config = Config::load().unwrap_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 680.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Group Wallet",
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, config)))),
    );

    drop(_guard);
    rt.shutdown_timeout(std::time::Duration::from_secs(2));

    result
}
