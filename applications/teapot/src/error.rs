use std::{
    error::Error,
    ffi::OsString,
    fmt::{self, Display},
    io,
    path::PathBuf,
    process::ExitCode,
};
use teapot_framework::FrameworkError;

pub(crate) type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug)]
pub(crate) enum ApplicationError {
    CommandLine(pico_args::Error),
    UnexpectedArguments(Vec<OsString>),
    ReadConfig {
        path: PathBuf,
        source: io::Error,
    },
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidConfig(String),
    Framework(FrameworkError),
}

impl ApplicationError {
    /// The process exit status reported for this error.
    ///
    /// Configuration problems yield 1, a missing window or graphics context yields 2
    /// and anything that went wrong while setting up the renderer yields 3.
    pub(crate) fn exit_status(&self) -> u8 {
        match self {
            Self::CommandLine(_)
            | Self::UnexpectedArguments(_)
            | Self::ReadConfig { .. }
            | Self::ParseConfig { .. }
            | Self::InvalidConfig(_) => 1,
            Self::Framework(error) if error.is_graphics_context() => 2,
            Self::Framework(_) => 3,
        }
    }
}

impl Display for ApplicationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandLine(error) => write!(formatter, "invalid command line: {error}"),
            Self::UnexpectedArguments(arguments) => {
                write!(formatter, "unexpected arguments: {arguments:?}")
            }
            Self::ReadConfig { path, source } => {
                write!(
                    formatter,
                    "failed to read configuration {}: {source}",
                    path.display()
                )
            }
            Self::ParseConfig { path, source } => {
                write!(
                    formatter,
                    "failed to parse configuration {}: {source}",
                    path.display()
                )
            }
            Self::InvalidConfig(message) => write!(formatter, "invalid configuration: {message}"),
            Self::Framework(error) => write!(formatter, "{error}"),
        }
    }
}

impl Error for ApplicationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CommandLine(error) => Some(error),
            Self::ReadConfig { source, .. } => Some(source),
            Self::ParseConfig { source, .. } => Some(source),
            Self::Framework(error) => Some(error),
            Self::UnexpectedArguments(_) | Self::InvalidConfig(_) => None,
        }
    }
}

impl From<pico_args::Error> for ApplicationError {
    fn from(value: pico_args::Error) -> Self {
        Self::CommandLine(value)
    }
}

impl From<FrameworkError> for ApplicationError {
    fn from(value: FrameworkError) -> Self {
        Self::Framework(value)
    }
}

impl From<ApplicationError> for ExitCode {
    fn from(value: ApplicationError) -> Self {
        ExitCode::from(value.exit_status())
    }
}
