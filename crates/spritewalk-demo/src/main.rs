mod app;
mod config;
mod frame;
mod scene;

use anyhow::Result;
use spritewalk_engine::device::GpuInit;
use spritewalk_engine::logging::{init_logging, LoggingConfig};
use spritewalk_engine::window::{Runtime, RuntimeConfig};

use crate::app::DemoApp;
use crate::config::DemoConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let runtime = RuntimeConfig::default();
    let config = DemoConfig::default();
    log::info!(
        "starting spritewalk: background {}, character {}",
        config.background_path.display(),
        config.character_path.display()
    );

    let app = DemoApp::new(config, runtime.cancel.clone());
    Runtime::run(runtime, GpuInit::default(), app)
}
