//! CSS-style colour strings

use lattice_core::math::hex_to_linear;

/// Linear white, used when a record carries an unreadable colour.
pub const FALLBACK_COLOR: [f32; 3] = [1.0; 3];

const NAMED: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("white", 0xffffff),
    ("red", 0xff0000),
    ("lime", 0x00ff00),
    ("green", 0x008000),
    ("blue", 0x0000ff),
    ("yellow", 0xffff00),
    ("cyan", 0x00ffff),
    ("aqua", 0x00ffff),
    ("magenta", 0xff00ff),
    ("fuchsia", 0xff00ff),
    ("orange", 0xffa500),
    ("gold", 0xffd700),
    ("silver", 0xc0c0c0),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("purple", 0x800080),
    ("pink", 0xffc0cb),
];

/// Parse `#rgb`, `#rrggbb`, `rgb(r, g, b)` or a basic colour name into an
/// sRGB `0xRRGGBB` value.
pub fn parse_css_hex(input: &str) -> Option<u32> {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_digits(hex);
    }
    if let Some(body) = s
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_triplet(body);
    }
    let lower = s.to_ascii_lowercase();
    NAMED
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|&(_, hex)| hex)
}

/// Parse a colour string into linear RGB.
pub fn parse_css_color(input: &str) -> Option<[f32; 3]> {
    parse_css_hex(input).map(hex_to_linear)
}

fn parse_hex_digits(hex: &str) -> Option<u32> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => u32::from_str_radix(hex, 16).ok(),
        3 => {
            let short = u32::from_str_radix(hex, 16).ok()?;
            let r = (short >> 8) & 0xf;
            let g = (short >> 4) & 0xf;
            let b = short & 0xf;
            Some((r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11)
        }
        _ => None,
    }
}

fn parse_rgb_triplet(body: &str) -> Option<u32> {
    let channels: Vec<u8> = body
        .split(',')
        .map(|part| part.trim().parse::<u8>().ok())
        .collect::<Option<_>>()?;
    match channels.as_slice() {
        [r, g, b] => Some(u32::from(*r) << 16 | u32::from(*g) << 8 | u32::from(*b)),
        _ => None,
    }
}
