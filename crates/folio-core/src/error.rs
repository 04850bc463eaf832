use thiserror::Error;

/// Failures while reading the string forms used in animation definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown ease `{0}`")]
    Ease(String),
    #[error("invalid timeline position `{0}`")]
    Position(String),
    #[error("invalid scroll anchor `{0}`")]
    Anchor(String),
    #[error("invalid toggle actions `{0}`")]
    ToggleActions(String),
    #[error("invalid css color `{0}`")]
    Color(String),
    #[error("invalid numeric value `{0}`")]
    Number(String),
}
