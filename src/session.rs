use std::path::{Path, PathBuf};

const TOKEN_FILENAME: &str = "token";

pub fn default_token_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("moktashif")
        .join(TOKEN_FILENAME)
}

/// Process-wide credential source, read synchronously before each request.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// A fixed token, for embedding the client or testing it.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        StaticToken(Some(token.into()))
    }

    pub fn none() -> Self {
        StaticToken(None)
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Bearer token persisted as a plain file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileTokenStore { path: path.into() }
    }

    pub fn at_default_path() -> Self {
        Self::new(default_token_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save the token to disk.
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self, token: &str) -> Result<(), TokenError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(TokenError::Io)?;
        }
        std::fs::write(&self.path, token.trim()).map_err(TokenError::Io)?;
        Ok(())
    }

    /// Load the token from disk.
    /// Returns `None` if the file doesn't exist or is blank.
    pub fn load(&self) -> Result<Option<String>, TokenError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path).map_err(TokenError::Io)?;
        let token = raw.trim();
        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(token.to_string()))
        }
    }

    /// Delete the token file (logout).
    pub fn clear(&self) -> Result<(), TokenError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(TokenError::Io)?;
        }
        Ok(())
    }
}

impl TokenSource for FileTokenStore {
    fn token(&self) -> Option<String> {
        match self.load() {
            Ok(token) => token,
            Err(e) => {
                log::warn!("Failed to read token from {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

#[derive(Debug)]
pub enum TokenError {
    Io(std::io::Error),
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for TokenError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileTokenStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join(TOKEN_FILENAME));
        (dir, store)
    }

    #[test]
    fn test_missing_file_is_no_token() {
        let (_dir, store) = temp_store();
        assert!(store.load().unwrap().is_none());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let (_dir, store) = temp_store();
        store.save("  abc.def  \n").unwrap();
        assert_eq!(store.load().unwrap(), Some("abc.def".to_string()));
        assert_eq!(store.token(), Some("abc.def".to_string()));
    }

    #[test]
    fn test_blank_file_is_no_token() {
        let (_dir, store) = temp_store();
        store.save("   ").unwrap();
        assert!(store.token().is_none());
    }

    #[test]
    fn test_clear() {
        let (_dir, store) = temp_store();
        store.save("abc").unwrap();
        store.clear().unwrap();
        assert!(store.token().is_none());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_static_token() {
        assert_eq!(StaticToken::new("t").token(), Some("t".to_string()));
        assert!(StaticToken::none().token().is_none());
    }

    #[test]
    fn test_default_token_path() {
        assert!(default_token_path().ends_with("moktashif/token"));
    }
}
