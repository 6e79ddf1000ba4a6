use std::fmt;

/// An sRGB color parsed from paint text.
///
/// `source` keeps the text exactly as written so serialization can pass it
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub rgb: [u8; 3],
    source: String,
}

impl RgbColor {
    /// Parses `#rgb`, `#rrggbb`, `rgb(r, g, b)` (integers or percentages) and
    /// the SVG named colors. Returns `None` for anything else.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let rgb = parse_rgb(text)?;
        Some(Self { rgb, source: text.to_owned() })
    }

    #[inline]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { rgb: [r, g, b], source: format!("#{r:02x}{g:02x}{b:02x}") }
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// The raw `icc-color(...)` companion of an RGB color.
///
/// Profiles are not interpreted; the text is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IccColor {
    text: String,
}

impl IccColor {
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !starts_with_ignore_case(text, ICC_PREFIX) || !text.ends_with(')') {
            return None;
        }
        Some(Self { text: text.to_owned() })
    }

    /// Name of the color profile, the first argument of `icc-color(...)`.
    pub fn profile(&self) -> &str {
        let inner = &self.text[ICC_PREFIX.len()..self.text.len() - 1];
        inner.split(',').next().unwrap_or("").trim()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for IccColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

const ICC_PREFIX: &str = "icc-color(";

/// Splits `<color> [icc-color(...)]` into its two halves.
///
/// Returns `None` when the RGB half does not parse or the ICC half is malformed.
pub(crate) fn parse_color_with_icc(text: &str) -> Option<(RgbColor, Option<IccColor>)> {
    let lower = text.to_ascii_lowercase();
    match lower.find(ICC_PREFIX) {
        Some(at) => {
            let rgb = RgbColor::parse(&text[..at])?;
            let icc = IccColor::parse(&text[at..])?;
            Some((rgb, Some(icc)))
        }
        None => Some((RgbColor::parse(text)?, None)),
    }
}

#[inline]
pub(crate) fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

fn parse_rgb(text: &str) -> Option<[u8; 3]> {
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex);
    }
    if starts_with_ignore_case(text, "rgb(") {
        let inner = text[4..].strip_suffix(')')?;
        return parse_rgb_function(inner);
    }
    named_color(text)
}

fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (slot, digit) in out.iter_mut().zip(hex.chars()) {
                let v = digit.to_digit(16)? as u8;
                *slot = v * 17;
            }
            Some(out)
        }
        6 => Some([
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        ]),
        _ => None,
    }
}

fn parse_rgb_function(inner: &str) -> Option<[u8; 3]> {
    let parts: Vec<&str> = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() != 3 {
        return None;
    }
    let mut out = [0u8; 3];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = match part.strip_suffix('%') {
            Some(pct) => {
                let v = pct.parse::<f32>().ok()?;
                (v.clamp(0.0, 100.0) * 2.55).round() as u8
            }
            None => part.parse::<f32>().ok()?.round().clamp(0.0, 255.0) as u8,
        };
    }
    Some(out)
}

fn named_color(name: &str) -> Option<[u8; 3]> {
    let lower = name.to_ascii_lowercase();
    NAMED_COLORS
        .binary_search_by(|(n, _)| n.cmp(&lower.as_str()))
        .ok()
        .map(|i| NAMED_COLORS[i].1)
}

// Sorted for binary search.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aqua", [0, 255, 255]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]),
    ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cornsilk", [255, 248, 220]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkgrey", [169, 169, 169]),
    ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]),
    ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]),
    ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]),
    ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]),
    ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]),
    ("darkslategrey", [47, 79, 79]),
    ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]),
    ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]),
    ("dimgray", [105, 105, 105]),
    ("dimgrey", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]),
    ("forestgreen", [34, 139, 34]),
    ("fuchsia", [255, 0, 255]),
    ("gainsboro", [220, 220, 220]),
    ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("greenyellow", [173, 255, 47]),
    ("grey", [128, 128, 128]),
    ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lavenderblush", [255, 240, 245]),
    ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightgrey", [211, 211, 211]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightslategray", [119, 136, 153]),
    ("lightslategrey", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("lime", [0, 255, 0]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]),
    ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]),
    ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]),
    ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]),
    ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]),
    ("olive", [128, 128, 0]),
    ("olivedrab", [107, 142, 35]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]),
    ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]),
    ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]),
    ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("powderblue", [176, 224, 230]),
    ("purple", [128, 0, 128]),
    ("red", [255, 0, 0]),
    ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]),
    ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]),
    ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]),
    ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("slategrey", [112, 128, 144]),
    ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("thistle", [216, 191, 216]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(text: &str) -> Option<[u8; 3]> {
        RgbColor::parse(text).map(|c| c.rgb)
    }

    // ── rgb forms ─────────────────────────────────────────────────────────

    #[test]
    fn hex_short_and_long() {
        assert_eq!(rgb("#f00"), Some([255, 0, 0]));
        assert_eq!(rgb("#00FF7f"), Some([0, 255, 127]));
        assert_eq!(rgb("#12345"), None);
        assert_eq!(rgb("#ggg"), None);
    }

    #[test]
    fn rgb_function() {
        assert_eq!(rgb("rgb(10, 20, 30)"), Some([10, 20, 30]));
        assert_eq!(rgb("RGB(100%,0%,50%)"), Some([255, 0, 128]));
        assert_eq!(rgb("rgb(300, -4, 0)"), Some([255, 0, 0]));
        assert_eq!(rgb("rgb(1, 2)"), None);
    }

    #[test]
    fn named_colors_ignore_case() {
        assert_eq!(rgb("CornflowerBlue"), Some([100, 149, 237]));
        assert_eq!(rgb("peru"), Some([205, 133, 63]));
        assert_eq!(rgb("notacolor"), None);
    }

    #[test]
    fn named_table_is_sorted() {
        assert!(NAMED_COLORS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn source_is_kept_verbatim() {
        let c = RgbColor::parse("  #AbC ").unwrap();
        assert_eq!(c.source(), "#AbC");
        assert_eq!(c.to_string(), "#AbC");
    }

    // ── icc ───────────────────────────────────────────────────────────────

    #[test]
    fn splits_icc_companion() {
        let (c, icc) = parse_color_with_icc("#CD853F icc-color(acmecmyk, 0.11, 0.48, 0.83, 0.00)")
            .unwrap();
        assert_eq!(c.rgb, [205, 133, 63]);
        let icc = icc.unwrap();
        assert_eq!(icc.profile(), "acmecmyk");
        assert_eq!(icc.as_str(), "icc-color(acmecmyk, 0.11, 0.48, 0.83, 0.00)");
    }

    #[test]
    fn icc_needs_a_valid_rgb_half() {
        assert!(parse_color_with_icc("icc-color(p, 1)").is_none());
        assert!(parse_color_with_icc("#fff icc-color(p, 1").is_none());
    }
}
