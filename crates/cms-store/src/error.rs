//! Storage error types.

/// Semantic error categories for storage operations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum StoreErrorKind {
    /// Page does not exist.
    NotFound,
    /// Another page already owns the alias.
    DuplicateAlias,
    /// Persisted data could not be decoded.
    InvalidData,
    /// Underlying I/O failure.
    Io,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StoreError {
    /// Semantic error category.
    pub kind: StoreErrorKind,
    /// Context detail (alias or page id, if applicable).
    pub detail: Option<String>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StoreErrorKind) -> Self {
        Self {
            kind,
            detail: None,
            source: None,
        }
    }

    /// Attach context detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not-found error for a page id.
    #[must_use]
    pub fn not_found(id: i64) -> Self {
        Self::new(StoreErrorKind::NotFound).with_detail(id.to_string())
    }

    /// Create a duplicate-alias error.
    #[must_use]
    pub fn duplicate_alias(alias: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::DuplicateAlias).with_detail(alias)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        Self::new(StoreErrorKind::Io).with_source(err)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind_str = match self.kind {
            StoreErrorKind::NotFound => "Page not found",
            StoreErrorKind::DuplicateAlias => "Duplicate alias",
            StoreErrorKind::InvalidData => "Invalid stored data",
            StoreErrorKind::Io => "I/O error",
            StoreErrorKind::Other => "Storage error",
        };

        write!(f, "{kind_str}")?;

        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }

        if let Some(source) = &self.source {
            write!(f, " ({source})")?;
        }

        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}
