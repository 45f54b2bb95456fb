//! # declara – residence-declaration PDF generator
//!
//! Builds a fixed-layout Brazilian residence declaration (PDF) from
//! validated identity/address fields, an optional list of auxiliary
//! persons, an optional logo, and an optional QR verification code.
//! The pipeline stages are:
//!
//! 1. **Validate** – required fields and fixed formats ([`validate`])
//! 2. **Normalize/mask** – whitespace, long tokens, blank placeholders ([`text`])
//! 3. **Compose** – ordered styled block list ([`template`])
//! 4. **Layout** – wrapping, cursor, page overflow ([`layout`])
//! 5. **Render** – emit PDF bytes via printpdf ([`render`])
//!
//! Interactive use goes through a [`session::Session`], which owns the
//! auxiliary-person list and the last generated document.

pub mod error;
pub mod fonts;
pub mod layout;
pub mod pipeline;
pub mod profile;
pub mod qr;
pub mod render;
pub mod session;
pub mod strings;
pub mod template;
pub mod text;
pub mod validate;

// Re-exports for convenience
pub use error::{AssetError, GenerateError, RenderError, ValidationError};
pub use pipeline::{generate_document, DocumentConfig};
pub use profile::{AuxiliaryPerson, DeclarantProfile, DocumentKind, GeneratedDocument, RenderOptions};
pub use session::Session;
