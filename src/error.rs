use thiserror::Error;

/// Why an operation did nothing. Every variant is a precondition that was
/// absent; none of them is surfaced to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Skip {
    #[error("no window object")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("no element matches {0}")]
    MissingElement(String),
    #[error("panel {0} has no trigger")]
    MissingTrigger(usize),
    #[error("panel {0} has no content")]
    MissingContent(usize),
    #[error("panel index {0} is out of range")]
    NoSuchPanel(usize),
    #[error("anchor has no destination")]
    EmptyAnchor,
    #[error("scroll target {0} not found")]
    TargetNotFound(String),
    #[error("invalid site config: {0}")]
    InvalidConfig(String),
}
