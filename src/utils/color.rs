//! Label colors.
//!
//! Labels store a lowercase `#rrggbb` string. Users may also pass one of the
//! palette names below, which resolve to the board palette.

/// Named label colors offered by the board palette
pub const LABEL_PALETTE: &[(&str, &str)] = &[
    ("green", "#61bd4f"),
    ("yellow", "#f2d600"),
    ("orange", "#ff9f1a"),
    ("red", "#eb5a46"),
    ("purple", "#c377e0"),
    ("blue", "#0079bf"),
    ("sky", "#00c2e0"),
    ("lime", "#51e898"),
    ("pink", "#ff78cb"),
    ("black", "#344563"),
    ("grey", "#b3bac5"),
    ("gray", "#b3bac5"),
];

/// Default color for labels created without one
pub const DEFAULT_LABEL_COLOR: &str = "#b3bac5";

/// Normalize a `#rgb` or `#rrggbb` hex string to lowercase `#rrggbb`.
#[must_use]
pub fn normalize_hex(color: &str) -> Option<String> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        6 => Some(format!("#{}", hex.to_ascii_lowercase())),
        3 => {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            Some(format!("#{}", expanded.to_ascii_lowercase()))
        }
        _ => None,
    }
}

/// Resolve a palette name or hex string to a stored label color
#[must_use]
pub fn resolve_label_color(color: &str) -> Option<String> {
    let wanted = color.trim().to_lowercase();
    LABEL_PALETTE
        .iter()
        .find(|(name, _)| *name == wanted)
        .map(|(_, hex)| (*hex).to_string())
        .or_else(|| normalize_hex(&wanted))
}

/// Palette name for a stored color, if it has one
#[must_use]
pub fn palette_name(hex: &str) -> Option<&'static str> {
    LABEL_PALETTE.iter().find(|(_, value)| value.eq_ignore_ascii_case(hex)).map(|(name, _)| *name)
}
