mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::build`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use lathe_explorer_lib::build;
pub use lathe_explorer_lib::cursor;
pub use lathe_explorer_lib::i18n;
pub use lathe_explorer_lib::state;

use app::ExplorerApp;
use state::Route;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lathe_explorer=info,lathe_explorer_lib=info".into()),
        )
        .init();

    let initial_route = parse_route_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Lathe Exploded Diagram")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "lathe-explorer",
        native_options,
        Box::new(move |cc| Ok(Box::new(ExplorerApp::new(cc, initial_route)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

/// `--lathe` opens straight into the explorer
fn parse_route_arg() -> Route {
    if std::env::args().skip(1).any(|a| a == "--lathe") {
        Route::Lathe
    } else {
        Route::Home
    }
}
