// src/normalize/mod.rs
// =============================================================================
// This module turns raw URLs into their canonical form.
//
// Submodules:
// - dots: collapses '.' and '..' path segments
// - canonical: the full normalization pipeline (decode, parse, clean, sort)
//
// Two URLs that point at the same page should come out of normalize_url()
// as the exact same string, so the crawler can count them under one key.
// =============================================================================

mod canonical;
mod dots;

pub use canonical::{normalize_url, NormalizeError};
pub use dots::resolve_dot_segments;
