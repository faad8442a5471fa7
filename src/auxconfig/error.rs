use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuxConfigError {
    /// A fragment offered for writing carries no namespace. The namespace is
    /// part of the storage key, so this is caller misuse rather than a
    /// storage fault.
    #[error("fragment `{0}` has no namespace")]
    MissingNamespace(String),

    /// A backing document or attribute value failed to parse. `origin` names
    /// the file or attribute key the bytes came from.
    #[error("malformed document in {origin}: {detail}")]
    MalformedDocument { origin: String, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("attribute store error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML write error: {0}")]
    Xml(#[from] xmltree::Error),
}

pub type Result<T> = std::result::Result<T, AuxConfigError>;
