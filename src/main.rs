use anyhow::Result;
use eframe::egui;

use keytone::app::KeytoneApp;

fn main() -> Result<()> {
    env_logger::init();
    println!("[MAIN] Starting Keytone");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1040.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Keytone",
        options,
        Box::new(|_cc| {
            let app = match KeytoneApp::new() {
                Ok(app) => app,
                Err(e) => {
                    eprintln!("[MAIN] Failed to create app: {}", e);
                    std::process::exit(1);
                }
            };
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("[MAIN] Application error: {}", e))
}
