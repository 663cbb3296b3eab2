use crate::error::{ApplicationError, ApplicationResult};
use pico_args::Arguments;
use std::{convert::Infallible, ffi::OsStr, path::PathBuf};

pub(crate) const USAGE: &str = "\
Teapot Vision

USAGE:
    application-teapot [OPTIONS]

OPTIONS:
    -h, --help               Print this help and exit
    --config <PATH>          Read settings from a JSON file
    --shader-dir <PATH>      Load the shader sources from this directory
";

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct CommandLine {
    pub(crate) help: bool,
    pub(crate) config: Option<PathBuf>,
    /// takes precedence over the configuration file
    pub(crate) shader_dir: Option<PathBuf>,
}

impl CommandLine {
    pub(crate) fn parse(mut arguments: Arguments) -> ApplicationResult<Self> {
        let command_line = Self {
            help: arguments.contains(["-h", "--help"]),
            config: arguments.opt_value_from_os_str("--config", to_path)?,
            shader_dir: arguments.opt_value_from_os_str("--shader-dir", to_path)?,
        };

        let remaining = arguments.finish();
        if !remaining.is_empty() {
            return Err(ApplicationError::UnexpectedArguments(remaining));
        }
        Ok(command_line)
    }
}

fn to_path(value: &OsStr) -> Result<PathBuf, Infallible> {
    Ok(PathBuf::from(value))
}
