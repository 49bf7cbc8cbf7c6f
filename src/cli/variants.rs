//! `stageline variants` - List registered variant names

use stageline::Registry;
use std::fmt::Write;

/// Renders the stage and messenger names known to `registry`
pub fn list_variants(registry: &Registry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "stages: {}", registry.stages().names().join(", "));
    let _ = writeln!(out, "messengers: {}", registry.messengers().names().join(", "));
    out
}
