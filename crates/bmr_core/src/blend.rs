//! Fixed-function style blending.
//!
//! A [`BlendMode`] picks four [`BlendFactorKind`]s, one each for the source
//! colour, destination colour, source alpha and destination alpha terms of
//!
//! ```text
//! out.rgb = src.rgb * F_src_color + dst.rgb * F_dst_color
//! out.a   = src.a   * F_src_alpha + dst.a   * F_dst_alpha
//! ```
//!
//! Every factor kind is a pure function of the current source and
//! destination pixels, looked up through a static table.

use serde::{Deserialize, Serialize};

use crate::color;
use crate::error::CoreError;

/// Per-channel multipliers in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CompositeFactor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl CompositeFactor {
    pub const ZERO: CompositeFactor = CompositeFactor::new(0.0, 0.0, 0.0, 0.0);
    pub const ONE: CompositeFactor = CompositeFactor::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v, v)
    }

    /// Normalised channels of a packed ARGB pixel.
    fn of_color(argb: u32) -> Self {
        let [r, g, b, a] = color::channels(argb);
        Self::new(
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0,
            a as f64 / 255.0,
        )
    }

    fn of_alpha(argb: u32) -> Self {
        Self::splat(color::alpha(argb) as f64 / 255.0)
    }

    /// `1 - self` on every channel.
    pub fn complement(self) -> Self {
        Self::new(
            1.0 - self.red,
            1.0 - self.green,
            1.0 - self.blue,
            1.0 - self.alpha,
        )
    }
}

/// How a blend term derives its multiplier from the pixels being combined.
///
/// Numeric codes mirror the OpenGL `glBlendFunc` constants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BlendFactorKind {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
}

type FactorFn = fn(u32, u32) -> CompositeFactor;

// Indexed by `BlendFactorKind as usize`; keep in declaration order.
static FACTOR_TABLE: [FactorFn; 10] = [
    |_, _| CompositeFactor::ZERO,
    |_, _| CompositeFactor::ONE,
    |src, _| CompositeFactor::of_color(src),
    |src, _| CompositeFactor::of_color(src).complement(),
    |_, dst| CompositeFactor::of_color(dst),
    |_, dst| CompositeFactor::of_color(dst).complement(),
    |src, _| CompositeFactor::of_alpha(src),
    |src, _| CompositeFactor::of_alpha(src).complement(),
    |_, dst| CompositeFactor::of_alpha(dst),
    |_, dst| CompositeFactor::of_alpha(dst).complement(),
];

impl BlendFactorKind {
    pub const ALL: [BlendFactorKind; 10] = [
        Self::Zero,
        Self::One,
        Self::SrcColor,
        Self::OneMinusSrcColor,
        Self::DstColor,
        Self::OneMinusDstColor,
        Self::SrcAlpha,
        Self::OneMinusSrcAlpha,
        Self::DstAlpha,
        Self::OneMinusDstAlpha,
    ];

    /// Multiplier for this kind given the source and destination pixels.
    #[inline]
    pub fn factor(self, src: u32, dst: u32) -> CompositeFactor {
        FACTOR_TABLE[self as usize](src, dst)
    }

    /// The OpenGL enum value.
    pub const fn code(self) -> u32 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::SrcColor => 0x0300,
            Self::OneMinusSrcColor => 0x0301,
            Self::SrcAlpha => 0x0302,
            Self::OneMinusSrcAlpha => 0x0303,
            Self::DstAlpha => 0x0304,
            Self::OneMinusDstAlpha => 0x0305,
            Self::DstColor => 0x0306,
            Self::OneMinusDstColor => 0x0307,
        }
    }

    /// The OpenGL constant name, e.g. `GL_SRC_ALPHA`.
    pub const fn gl_name(self) -> &'static str {
        match self {
            Self::Zero => "GL_ZERO",
            Self::One => "GL_ONE",
            Self::SrcColor => "GL_SRC_COLOR",
            Self::OneMinusSrcColor => "GL_ONE_MINUS_SRC_COLOR",
            Self::SrcAlpha => "GL_SRC_ALPHA",
            Self::OneMinusSrcAlpha => "GL_ONE_MINUS_SRC_ALPHA",
            Self::DstAlpha => "GL_DST_ALPHA",
            Self::OneMinusDstAlpha => "GL_ONE_MINUS_DST_ALPHA",
            Self::DstColor => "GL_DST_COLOR",
            Self::OneMinusDstColor => "GL_ONE_MINUS_DST_COLOR",
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    pub fn from_gl_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.gl_name() == name)
    }
}

impl From<BlendFactorKind> for u32 {
    fn from(kind: BlendFactorKind) -> Self {
        kind.code()
    }
}

impl TryFrom<u32> for BlendFactorKind {
    type Error = CoreError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_code(code)
            .ok_or_else(|| CoreError::invalid(format!("unknown blend factor code {code:#06x}")))
    }
}

/// Four factor kinds describing one blend equation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlendMode {
    pub src_color: BlendFactorKind,
    pub dst_color: BlendFactorKind,
    pub src_alpha: BlendFactorKind,
    pub dst_alpha: BlendFactorKind,
}

impl BlendMode {
    /// Standard "over" compositing.
    pub const NORMAL: BlendMode = BlendMode::pair(
        BlendFactorKind::SrcAlpha,
        BlendFactorKind::OneMinusSrcAlpha,
    );

    /// Additive highlight: colour is added scaled by itself, destination
    /// alpha is kept.
    pub const GLINT: BlendMode = BlendMode::new(
        BlendFactorKind::SrcColor,
        BlendFactorKind::One,
        BlendFactorKind::Zero,
        BlendFactorKind::One,
    );

    /// Source wins outright.
    pub const REPLACE: BlendMode = BlendMode::pair(BlendFactorKind::One, BlendFactorKind::Zero);

    pub const fn new(
        src_color: BlendFactorKind,
        dst_color: BlendFactorKind,
        src_alpha: BlendFactorKind,
        dst_alpha: BlendFactorKind,
    ) -> Self {
        Self {
            src_color,
            dst_color,
            src_alpha,
            dst_alpha,
        }
    }

    /// Same source and destination kinds for colour and alpha.
    pub const fn pair(src: BlendFactorKind, dst: BlendFactorKind) -> Self {
        Self::new(src, dst, src, dst)
    }

    /// Blend `src` onto `dst`.
    #[inline]
    pub fn composite(self, src: u32, dst: u32) -> u32 {
        composite(src, dst, self)
    }
}

impl Default for BlendMode {
    fn default() -> Self {
        Self::NORMAL
    }
}

#[inline]
fn blend_channel(s: u32, fs: f64, d: u32, fd: f64) -> u32 {
    ((s as f64 * fs + d as f64 * fd) as u32).min(255)
}

/// Combine two packed ARGB pixels. Each channel is truncated and clamped to
/// `0..=255`.
pub fn composite(src: u32, dst: u32, mode: BlendMode) -> u32 {
    let src_color = mode.src_color.factor(src, dst);
    let dst_color = mode.dst_color.factor(src, dst);
    let src_alpha = mode.src_alpha.factor(src, dst);
    let dst_alpha = mode.dst_alpha.factor(src, dst);

    let [sr, sg, sb, sa] = color::channels(src);
    let [dr, dg, db, da] = color::channels(dst);

    color::pack(
        blend_channel(sr, src_color.red, dr, dst_color.red),
        blend_channel(sg, src_color.green, dg, dst_color.green),
        blend_channel(sb, src_color.blue, db, dst_color.blue),
        blend_channel(sa, src_alpha.alpha, da, dst_alpha.alpha),
    )
}
