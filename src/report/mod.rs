//! Reporting layer — pure, side-effect-free text rendering.
//!
//! Consumes task collections already fetched by the repositories and
//! produces the digest and listing text returned to callers. No I/O.

pub mod digest;
pub mod render;
