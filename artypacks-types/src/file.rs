//! User-selected files.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// File extension accepted by the converter.
pub const BRUSHSET_EXTENSION: &str = ".brushset";

/// Returns true if `name` carries the `.brushset` extension.
///
/// The suffix is matched exactly, case included; a bare `.brushset` with
/// no stem is rejected.
#[must_use]
pub fn is_brushset(name: &str) -> bool {
    name.len() > BRUSHSET_EXTENSION.len() && name.ends_with(BRUSHSET_EXTENSION)
}

/// A binary blob picked by the user, with its display name.
///
/// Contents are shared, so cloning a selection is cheap.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    bytes: Arc<[u8]>,
}

impl SelectedFile {
    /// Creates a selection from an in-memory blob.
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk. The display name is the final path component.
    pub async fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| crate::Error::Config(format!("not a file path: {}", path.display())))?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(name, bytes))
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Returns the file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns true if this file passes the `.brushset` filter.
    #[must_use]
    pub fn is_brushset(&self) -> bool {
        is_brushset(&self.name)
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.size())
            .finish()
    }
}
