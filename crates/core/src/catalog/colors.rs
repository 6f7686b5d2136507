//! Garment colour names and their swatch hex values.

/// Known colour names (lower-case) and swatch hex codes.
const COLOR_MAP: &[(&str, &str)] = &[
    ("white", "#FFFFFF"),
    ("black", "#000000"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("light gray", "#D3D3D3"),
    ("light grey", "#D3D3D3"),
    ("red", "#FF0000"),
    ("blue", "#0000FF"),
    ("green", "#008000"),
    ("yellow", "#FFFF00"),
    ("orange", "#FFA500"),
    ("pink", "#FFC0CB"),
    ("purple", "#800080"),
    ("navy", "#000080"),
    ("royal blue", "#4169E1"),
    ("sky blue", "#87CEEB"),
    ("forest green", "#228B22"),
    ("mint green", "#98FF98"),
    ("olive", "#808000"),
    ("olive drab", "#6B8E23"),
    ("brown", "#A52A2A"),
    ("tan", "#D2B48C"),
    ("beige", "#F5F5DC"),
    ("beige-gray", "#9F9F9F"),
    ("khaki", "#C3B091"),
    ("maroon", "#800000"),
    ("burgundy", "#800020"),
    ("charcoal", "#36454F"),
    ("heather gray", "#B6B6B4"),
    ("heather grey", "#B6B6B4"),
];

/// Look up the swatch colour for a colour name.
///
/// Matching ignores case and surrounding whitespace, and also accepts the
/// name with its spaces removed (`"RoyalBlue"` finds `royal blue`).
#[must_use]
pub fn color_hex(name: &str) -> Option<&'static str> {
    let wanted = name.trim().to_lowercase();
    let compact: String = wanted.chars().filter(|c| !c.is_whitespace()).collect();

    COLOR_MAP.iter().find_map(|(known, hex)| {
        let known_compact: String = known.chars().filter(|c| !c.is_whitespace()).collect();
        (*known == wanted || known_compact == compact).then_some(*hex)
    })
}
