//! Error taxonomy for document generation.
//!
//! Three tiers with distinct propagation rules:
//! - [`ValidationError`] blocks generation entirely and is shown to the user
//!   as a message list.
//! - [`AssetError`] (logo decode, QR encode, image placement) is logged and
//!   discarded at the point of use; the document is produced without the
//!   affected image.
//! - [`RenderError`] is fatal for one render attempt only; session state and
//!   the previously generated document survive it.

use thiserror::Error;

/// User-correctable input problems, collected as an ordered message list.
///
/// Invariant: `messages` is non-empty.
#[derive(Debug, Clone, Error)]
#[error("validation failed: {}", messages.join("; "))]
pub struct ValidationError {
    pub messages: Vec<String>,
}

/// Non-fatal failures around optional images. Callers log these and carry on.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image decode error: {0}")]
    Decode(String),

    #[error("image embed error: {0}")]
    Embed(String),

    #[error("QR encode error: {0}")]
    Qr(String),
}

/// Failures producing the final byte stream.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF serialization failed: {0}")]
    Serialization(String),
}

/// Top-level outcome of a generate request.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
