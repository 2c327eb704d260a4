use thiserror::Error;

use crate::persist::PersistError;

/// The page no longer has the structure an extractor relies on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("tag <{tag}> {attrs} not found")]
    TagNotFound { tag: String, attrs: String },
    #[error("no list containing {marker:?} found")]
    MarkerListNotFound { marker: String },
    #[error("field {field:?} not found on {url}")]
    FieldNotFound { field: String, url: String },
    #[error("<{tag}> has no {attr:?} attribute")]
    MissingAttribute { tag: String, attr: String },
    #[error("cannot resolve link {href:?}: {message}")]
    InvalidLink { href: String, message: String },
}

/// Why a mode stopped before producing its result.
#[derive(Debug, Error)]
pub enum ModeError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("failed to save file: {0}")]
    Persist(#[from] PersistError),
}
