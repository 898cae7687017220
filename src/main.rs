mod shader;
mod window;

use std::process::ExitCode;

use driftfield::{FieldConfig, HostEnvironment, ViewerError};
use winit::event_loop::{ControlFlow, EventLoop};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Usage: `driftfield [config.json]`
///
/// Host capabilities come from `DRIFTFIELD_REDUCED_MOTION`,
/// `DRIFTFIELD_COARSE_POINTER` and `DRIFTFIELD_TOUCH`.
fn run() -> Result<(), ViewerError> {
    let env = HostEnvironment::from_env();
    let class = env.device_class();
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading config from {}", path);
            FieldConfig::load(&path)?.fit_to_device(class)
        }
        None => FieldConfig::for_device(class),
    };
    log::info!(
        "host: {:?}, reduced motion {}",
        class,
        env.prefers_reduced_motion()
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = window::App::new(config, env);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
