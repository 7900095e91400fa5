use thiserror::Error;

/// Failure reported while acquiring the next presentable surface image.
///
/// Built from `wgpu::SurfaceError` when the backend is wgpu. Collaborators
/// that only report a message go through [`AcquireError::classify`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AcquireError {
    /// The surface was lost and has to be reconfigured.
    #[error("surface lost")]
    Lost,

    /// The surface no longer matches the window (size or state changed).
    #[error("surface outdated")]
    Outdated,

    /// The next image was not ready in time.
    #[error("timed out waiting for the next surface image")]
    Timeout,

    /// The driver ran out of memory while acquiring.
    #[error("out of memory while acquiring the next surface image")]
    OutOfMemory,

    /// Anything the taxonomy does not know about.
    #[error("surface acquisition failed: {0}")]
    Other(String),
}

impl AcquireError {
    /// Classifies a plain failure message.
    ///
    /// Matching is a case-insensitive substring test, in the order
    /// lost, outdated, timeout. Everything else becomes `Other`.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_ascii_lowercase();

        if lower.contains("lost") {
            Self::Lost
        } else if lower.contains("outdated") {
            Self::Outdated
        } else if lower.contains("timeout") || lower.contains("timed out") {
            Self::Timeout
        } else {
            Self::Other(message.to_string())
        }
    }
}

impl From<wgpu::SurfaceError> for AcquireError {
    fn from(err: wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost => Self::Lost,
            wgpu::SurfaceError::Outdated => Self::Outdated,
            wgpu::SurfaceError::Timeout => Self::Timeout,
            wgpu::SurfaceError::OutOfMemory => Self::OutOfMemory,
            wgpu::SurfaceError::Other => Self::Other("unspecified surface error".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_known_messages() {
        assert_eq!(AcquireError::classify("Surface Lost"), AcquireError::Lost);
        assert_eq!(AcquireError::classify("SurfaceStatus_Outdated"), AcquireError::Outdated);
        assert_eq!(AcquireError::classify("Timeout"), AcquireError::Timeout);
        assert_eq!(AcquireError::classify("acquire timed out"), AcquireError::Timeout);
    }

    #[test]
    fn classify_is_case_insensitive() {
        assert_eq!(AcquireError::classify("surface LOST"), AcquireError::Lost);
        assert_eq!(AcquireError::classify("outdated"), AcquireError::Outdated);
    }

    #[test]
    fn classify_unknown_keeps_message() {
        let err = AcquireError::classify("device hung");
        assert_eq!(err, AcquireError::Other("device hung".to_string()));
        assert_eq!(err.to_string(), "surface acquisition failed: device hung");
    }

    #[test]
    fn from_wgpu_surface_error() {
        assert_eq!(AcquireError::from(wgpu::SurfaceError::Lost), AcquireError::Lost);
        assert_eq!(AcquireError::from(wgpu::SurfaceError::Outdated), AcquireError::Outdated);
        assert_eq!(AcquireError::from(wgpu::SurfaceError::Timeout), AcquireError::Timeout);
        assert_eq!(
            AcquireError::from(wgpu::SurfaceError::OutOfMemory),
            AcquireError::OutOfMemory
        );
        assert!(matches!(
            AcquireError::from(wgpu::SurfaceError::Other),
            AcquireError::Other(_)
        ));
    }
}
