#![allow(missing_docs, reason = "TODO remove before release")]

mod cli;
mod config;
mod error;

use cli::{CommandLine, USAGE};
use config::DemoConfig;
use engine_teapot::RendererBuilder;
use error::ApplicationResult;
use log::{error, info};
use pico_args::Arguments;
use std::process::ExitCode;
use teapot_framework::logging::init_logger;

fn main() -> ExitCode {
    init_logger();

    match run(Arguments::from_env()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            error.into()
        }
    }
}

fn run(arguments: Arguments) -> ApplicationResult<()> {
    let command_line = CommandLine::parse(arguments)?;
    if command_line.help {
        print_usage();
        return Ok(());
    }

    let mut config = match &command_line.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    if let Some(shader_dir) = command_line.shader_dir {
        config.shader_dir = shader_dir;
    }
    info!("loading shaders from {}", config.shader_dir.display());

    let builder = RendererBuilder::new(config.shader_dir.clone(), config.key_bindings())
        .with_mesh_detail(config.mesh_detail);
    teapot_framework::run(config.window_config(), builder)?;

    info!("shutting down");
    Ok(())
}

#[expect(clippy::print_stdout, reason = "the usage is meant for the terminal")]
fn print_usage() {
    print!("{USAGE}");
}
