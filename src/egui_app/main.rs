/**
 * KinesioPro console - Main Entry Point
 *
 * Native egui front end for the clinic backend. Configuration comes from
 * `KINESIO_CONFIG` / `KINESIO_API_URL` / `KINESIO_TOKEN_FILE`; `RUST_LOG`
 * overrides the configured log filter.
 */
use eframe::egui;
use kinesiopro::egui_app::theme::styles;
use kinesiopro::egui_app::{views, AppState, Config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.app().log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(api = %config.server_url(), "starting console");
    let mut state = AppState::new(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "KinesioPro",
        options,
        Box::new(move |cc| {
            styles::apply_global_theme(&cc.egui_ctx);
            state.attach_context(&cc.egui_ctx);
            Ok(Box::new(ConsoleApp { state }))
        }),
    )?;
    Ok(())
}

struct ConsoleApp {
    state: AppState,
}

impl eframe::App for ConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.attach_context(ctx);
        self.state.poll_events();

        views::render_top_bar(ctx, &mut self.state);
        views::render_sidebar(ctx, &mut self.state);
        views::render_debug_panel(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);

        if self.state.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        }
    }
}
