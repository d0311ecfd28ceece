//! Font assets.
//!
//! Resource providers for the font file and the shared face cache.

pub mod font;
pub mod source;

pub use font::{FontCache, FontCacheStats, FontFace};
pub use source::{EMBEDDED_FONT, FontProvider, FontSource};
