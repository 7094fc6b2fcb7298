use spiralgen::constants::GLYPHS;

/// Stand-ins for [`GLYPHS`], same order, drawable with Bevy's built-in font.
pub const PLAIN_GLYPHS: [&str; 5] = ["+", "*", "<3", "@", "#"];

/// The plain stand-in for a glyph. Unknown glyphs become a star.
pub fn plain_glyph(glyph: &str) -> &'static str {
    GLYPHS
        .iter()
        .position(|candidate| *candidate == glyph)
        .and_then(|index| PLAIN_GLYPHS.get(index))
        .copied()
        .unwrap_or("*")
}

/// Minimized windows report a zero physical size on some platforms.
pub fn has_drawable_area(width: u32, height: u32) -> bool {
    width > 0 && height > 0
}
