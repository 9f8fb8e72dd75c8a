/// Error type for editor configuration and palette lookups.
#[derive(Debug)]
pub enum EditorError {
    /// A palette entry names a tile that is not in the registry.
    TileNotFound(String),
    Io(std::io::Error),
    Ron(ron::Error),
    RonSpanned(ron::error::SpannedError),
}

impl From<std::io::Error> for EditorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ron::Error> for EditorError {
    fn from(err: ron::Error) -> Self {
        Self::Ron(err)
    }
}

impl From<ron::error::SpannedError> for EditorError {
    fn from(err: ron::error::SpannedError) -> Self {
        Self::RonSpanned(err)
    }
}

impl std::fmt::Display for EditorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TileNotFound(name) => write!(f, "Tile not found: {}", name),
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Ron(e) => write!(f, "RON serialization error: {}", e),
            Self::RonSpanned(e) => write!(f, "RON parse error: {}", e),
        }
    }
}

impl std::error::Error for EditorError {}
