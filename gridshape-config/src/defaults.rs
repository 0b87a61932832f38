//! Default values for shaper configuration, referenced from
//! `#[serde(default = "crate::defaults::...")]` attributes.

pub fn font_family() -> String {
    "JetBrains Mono".to_string()
}

pub fn font_size() -> f32 {
    12.0 // Points
}

pub fn dpi() -> f32 {
    96.0
}

pub fn fallback_families() -> Vec<String> {
    Vec::new() // Empty = built-in fallback chain
}

pub fn language() -> Option<String> {
    None // Derived from the locale
}

pub fn features() -> Vec<String> {
    Vec::new()
}
