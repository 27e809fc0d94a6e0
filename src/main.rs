mod app;
mod clock;
mod config;
mod error;
mod pet;
mod platform;
mod render;
mod sprite_sheet;
mod tray;

fn main() {
    env_logger::init();
    log::info!("Neko starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
