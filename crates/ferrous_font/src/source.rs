use std::path::PathBuf;

use crate::error::FontError;
use crate::synth;

/// Where the raw font bytes come from.
#[derive(Debug, Clone)]
pub enum FontSource {
    /// Bytes already in memory (embedded with `include_bytes!`, downloaded, ...).
    Bytes(Vec<u8>),
    /// A TrueType/OpenType file on disk.
    Path(PathBuf),
    /// The small outline face built into the crate.
    Fallback,
}

impl FontSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Name used for the asset when the caller does not supply one.
    pub fn name(&self) -> String {
        match self {
            Self::Bytes(_) => "memory".to_string(),
            Self::Path(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Self::Fallback => "fallback".to_string(),
        }
    }

    /// Produces the font bytes. Only [`FontSource::Path`] can fail.
    pub fn read(self) -> Result<Vec<u8>, FontError> {
        match self {
            Self::Bytes(data) => Ok(data),
            Self::Path(path) => {
                std::fs::read(&path).map_err(|source| FontError::Unreadable { path, source })
            }
            Self::Fallback => Ok(synth::fallback_face()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_unreadable() {
        let err = FontSource::from_path("/definitely/not/here.ttf")
            .read()
            .unwrap_err();
        assert!(matches!(err, FontError::Unreadable { .. }));
        assert!(err.to_string().contains("here.ttf"));
    }

    #[test]
    fn names() {
        assert_eq!(FontSource::from_path("fonts/Inter-Regular.ttf").name(), "Inter-Regular");
        assert_eq!(FontSource::Bytes(vec![]).name(), "memory");
        assert_eq!(FontSource::Fallback.name(), "fallback");
    }
}
