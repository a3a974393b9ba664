//! Packed `0xAARRGGBB` pixel helpers.

#[inline]
pub fn alpha(argb: u32) -> u32 {
    (argb >> 24) & 0xFF
}

#[inline]
pub fn red(argb: u32) -> u32 {
    (argb >> 16) & 0xFF
}

#[inline]
pub fn green(argb: u32) -> u32 {
    (argb >> 8) & 0xFF
}

#[inline]
pub fn blue(argb: u32) -> u32 {
    argb & 0xFF
}

/// Pack channels; anything above 255 is masked, not clamped.
#[inline]
pub fn pack(r: u32, g: u32, b: u32, a: u32) -> u32 {
    ((a & 0xFF) << 24) | ((r & 0xFF) << 16) | ((g & 0xFF) << 8) | (b & 0xFF)
}

/// `[r, g, b, a]` in the 0-255 range.
#[inline]
pub fn channels(argb: u32) -> [u32; 4] {
    [red(argb), green(argb), blue(argb), alpha(argb)]
}

#[inline]
pub fn is_opaque(argb: u32) -> bool {
    alpha(argb) == 0xFF
}

/// Convert an RGBA byte quad (as stored by the `image` crate) to ARGB.
#[inline]
pub fn from_rgba(rgba: [u8; 4]) -> u32 {
    pack(rgba[0] as u32, rgba[1] as u32, rgba[2] as u32, rgba[3] as u32)
}

/// Convert ARGB back to an RGBA byte quad.
#[inline]
pub fn to_rgba(argb: u32) -> [u8; 4] {
    [red(argb) as u8, green(argb) as u8, blue(argb) as u8, alpha(argb) as u8]
}
