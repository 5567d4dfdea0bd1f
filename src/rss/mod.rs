//! RSS 2.0 document generation.
//!
//! The second half of the pipeline:
//!
//! - [`escape`] - Entity escaping and CDATA wrapping, exact per field
//! - [`build`] - Item fragments, channel header/footer, final assembly
//!
//! Everything here is pure string transformation; the only inputs are the
//! configuration's channel metadata, the resolved self-link URL, the
//! sorted items, and the run's single processing timestamp.

mod build;
mod escape;

pub use build::{build_document, format_rfc1123, render_item, GENERATOR};
pub use escape::{cdata, escape_text};
