use lib_geometry::CameraError;
use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug)]
pub enum EngineError {
    ReadShader { path: PathBuf, source: io::Error },
    /// Compiling or linking the shaders or drawing a frame was rejected by the graphics backend.
    Validation(wgpu::Error),
    Camera(CameraError),
}

impl Display for EngineError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadShader { path, source } => {
                write!(
                    formatter,
                    "failed to read shader source {}: {source}",
                    path.display()
                )
            }
            Self::Validation(error) => write!(formatter, "graphics validation error: {error}"),
            Self::Camera(error) => write!(formatter, "invalid camera: {error}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadShader { source, .. } => Some(source),
            Self::Validation(error) => Some(error),
            Self::Camera(error) => Some(error),
        }
    }
}

impl From<CameraError> for EngineError {
    fn from(value: CameraError) -> Self {
        Self::Camera(value)
    }
}

impl From<wgpu::Error> for EngineError {
    fn from(value: wgpu::Error) -> Self {
        Self::Validation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_shader_names_the_file() {
        let error = EngineError::ReadShader {
            path: PathBuf::from("shaders/blinn_phong.vert.wgsl"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let message = error.to_string();
        assert!(
            message.contains("shaders/blinn_phong.vert.wgsl"),
            "unexpected message {message}"
        );
        assert!(error.source().is_some(), "io error should be the source");
    }
}
