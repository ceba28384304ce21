//! Fallback Content Tables
//!
//! Static per-location and per-theme content used whenever a provider has no
//! credential or yields no usable data. Location-specific entries always win
//! over generic templates; generic templates are interpolated with the
//! location name.

pub mod climate;
pub mod culture;
pub mod locations;
pub mod narratives;

/// Lookup key for a location name: the part before the first comma,
/// trimmed and lowercased.
pub(crate) fn location_key(name: &str) -> String {
    name.split(',').next().unwrap_or_default().trim().to_lowercase()
}
