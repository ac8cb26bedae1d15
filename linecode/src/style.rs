/*!
Colors, strokes and the default waveform palette.
*/

use crate::encoding::Scheme;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color with explicit RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color (alpha = 255).
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create an opaque color from a packed 0xRRGGBB value.
    pub const fn from_hex(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// CSS representation: `#rrggbb` when opaque, `rgba(...)` otherwise.
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }
}

/// Solid line style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Dash pattern for divider lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    pub dash: f32,
    pub gap: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Proportional,
    Monospace,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f32,
    pub family: FontFamily,
}

/// Colors used by the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub high: Color,
    pub zero: Color,
    pub low: Color,
    pub grid: Color,
    pub text: Color,
    /// Waveform colors, in `Scheme::ALL` order
    pub signals: [Color; 6],
}

impl Palette {
    /// Waveform color for a scheme
    pub fn scheme_color(&self, scheme: Scheme) -> Color {
        self.signals[scheme as usize]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_hex(0x0f172a),
            high: Color::from_hex(0x4ade80),
            zero: Color::from_hex(0xfbbf24),
            low: Color::from_hex(0xf87171),
            grid: Color::new(255, 255, 255, 26),
            text: Color::new(255, 255, 255, 153),
            signals: [
                Color::from_hex(0xff6b6b),
                Color::from_hex(0xfeca57),
                Color::from_hex(0x48dbfb),
                Color::from_hex(0xff9ff3),
                Color::from_hex(0x1dd1a1),
                Color::from_hex(0xa55eea),
            ],
        }
    }
}

/// Everything the renderer needs besides the signal and the surface
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub padding: f32,
    pub grid_width: f32,
    pub signal_width: f32,
    pub divider_dash: Dash,
    pub axis_font: Font,
    pub bit_font: Font,
    pub palette: Palette,
}

impl RenderStyle {
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_signal_width(mut self, width: f32) -> Self {
        self.signal_width = width;
        self
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            padding: crate::defaults::PADDING,
            grid_width: 1.0,
            signal_width: 3.0,
            divider_dash: Dash { dash: 5.0, gap: 5.0 },
            axis_font: Font { size: 12.0, family: FontFamily::Proportional },
            bit_font: Font { size: 14.0, family: FontFamily::Monospace },
            palette: Palette::default(),
        }
    }
}
