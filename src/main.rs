mod app;
mod community;
mod config;
mod coordinator;
mod error;
mod frame_gate;
mod nav;
mod player_bar;
mod showcase;

use app::{App, AppProps};
use config::ShowcaseConfig;

fn main() {
    console_error_panic_hook::set_once();

    let config = ShowcaseConfig::embedded();
    let level = config
        .as_ref()
        .map(ShowcaseConfig::log_level)
        .unwrap_or(log::Level::Info);
    console_log::init_with_level(level).ok();

    let config = config.unwrap_or_else(|e| {
        log::warn!("{e}; using defaults");
        ShowcaseConfig::default()
    });
    log::info!("mounting showcase with {} videos", config.videos.len());

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
