//! Default font fallback chain.

/// Fallback font families in priority order.
///
/// Used when the configuration does not list its own fallbacks. The order is:
/// 1. Nerd Font icon support (programming symbols, powerline)
/// 2. Standard monospace fonts for ASCII/Latin
/// 3. CJK support (Japanese, Simplified/Traditional Chinese, Korean)
/// 4. Monochrome symbol fonts, then color emoji
/// 5. General Unicode coverage (also where U+FFFD usually lives)
pub const DEFAULT_FALLBACK_FAMILIES: &[&str] = &[
    // Nerd Fonts
    "JetBrainsMono Nerd Font",
    "FiraCode Nerd Font",
    "Hack Nerd Font",
    "MesloLGS NF",
    // Standard monospace fonts
    "JetBrains Mono",
    "Fira Code",
    "DejaVu Sans Mono",
    "Liberation Mono",
    "Consolas",
    "Menlo",
    "Courier New",
    // CJK fonts
    "Noto Sans CJK JP",
    "Noto Sans CJK SC",
    "Noto Sans CJK TC",
    "Noto Sans CJK KR",
    "Microsoft YaHei",
    "MS Gothic",
    // Monochrome symbol fonts (before emoji to prefer outline rendering for dingbats/symbols)
    "Symbols Nerd Font",
    "Apple Symbols",
    "Segoe UI Symbol",
    "Noto Sans Symbols",
    "Noto Sans Symbols 2",
    "DejaVu Sans",
    "Symbola",
    // Color emoji fonts
    "Noto Color Emoji",
    "Apple Color Emoji",
    "Segoe UI Emoji",
    // General fallbacks
    "Arial Unicode MS",
    "Liberation Sans",
];
