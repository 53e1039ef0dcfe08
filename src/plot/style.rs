use plotters::style::RGBColor;

use crate::model::LineStyle;

const DEEP: [RGBColor; 10] = [
    RGBColor(0x4c, 0x72, 0xb0),
    RGBColor(0xdd, 0x84, 0x52),
    RGBColor(0x55, 0xa8, 0x68),
    RGBColor(0xc4, 0x4e, 0x52),
    RGBColor(0x81, 0x72, 0xb3),
    RGBColor(0x93, 0x78, 0x60),
    RGBColor(0xda, 0x8b, 0xc3),
    RGBColor(0x8c, 0x8c, 0x8c),
    RGBColor(0xcc, 0xb9, 0x74),
    RGBColor(0x64, 0xb5, 0xcd),
];

pub const EDGE_GRAY: RGBColor = RGBColor(0x80, 0x80, 0x80);

/// Default categorical palette; indices wrap around.
pub fn palette(idx: usize) -> RGBColor {
    DEEP[idx % DEEP.len()]
}

pub fn palette_range(start: usize, n: usize) -> Vec<RGBColor> {
    (start..start + n).map(palette).collect()
}

pub fn parse_hex_color(raw: &str) -> Result<RGBColor, String> {
    let hex = raw.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid colour {raw:?} (expected #rrggbb)"));
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Colour and line style for each of `n` series. Supplied lists wrap around.
pub fn series_styles(
    n: usize,
    colors: Option<&[RGBColor]>,
    linestyles: Option<&[LineStyle]>,
) -> Vec<(RGBColor, LineStyle)> {
    (0..n)
        .map(|i| {
            let color = match colors {
                Some(c) if !c.is_empty() => c[i % c.len()],
                _ => palette(i),
            };
            let line = match linestyles {
                Some(l) if !l.is_empty() => l[i % l.len()],
                _ => LineStyle::Solid,
            };
            (color, line)
        })
        .collect()
}
