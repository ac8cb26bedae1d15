/*!
# Line Encoding Library

Digital line-encoding schemes and the deterministic rendering of their
waveforms onto a drawing surface.

## Core Types

- [`BitSequence`] - Validated, non-empty sequence of bits
- [`Scheme`] - NRZ-L, NRZI, AMI, Pseudoternary, Manchester, Differential Manchester
- [`EncodedSignal`] - Segments produced by one encoder run
- [`Surface`] - Drawing target consumed by the renderer

## Modules

- [`bits`] - Bit string parsing, validation and random generation
- [`encoding`] - The six encoders and the [`encode`] entry point
- [`render`] - Plot geometry, stepped waveform construction, drawing
- [`style`] - Colors, strokes and the default palette
- [`svg`] - SVG drawing surface
- [`error`] - Common error types
*/

pub mod bits;
pub mod encoding;
pub mod error;
pub mod render;
pub mod style;
pub mod svg;

// Re-export commonly used types
pub use bits::{Bit, BitError, BitSequence};
pub use encoding::{encode, EncodedSignal, Half, Level, Scheme, Segment};
pub use error::{LineCodeError, Result};
pub use render::{render, render_scheme, render_selector, Geometry, PlotPoint, Rendered, Surface};
pub use style::{Color, Palette, RenderStyle};
pub use svg::SvgSurface;

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default layout values
pub mod defaults {
    /// Margin between the plot area and the surface edge, in pixels
    pub const PADDING: f32 = 50.0;

    /// Fixed surface height, in pixels
    pub const SURFACE_HEIGHT: f32 = 250.0;

    /// Width taken off the container before sizing a surface
    pub const CONTAINER_MARGIN: f32 = 40.0;

    /// Bit string shown before the user has entered anything
    pub const INITIAL_INPUT: &str = "10110010";
}
