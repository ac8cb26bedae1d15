/*!
Waveform rendering.

This module provides:
- [`Surface`] trait for implementing drawing targets (egui painter, SVG, ...)
- [`Geometry`] mapping bit indices and levels to surface coordinates
- [`plot_points`] and [`waveform_path`], the pure halves of the renderer
- [`render`], which draws grid, labels and waveform onto a surface

# Coordinate System

Origin at top-left, x increases rightward, y increases downward. The
`+V` rail sits at `padding`, `0` at mid-height and `-V` at
`height - padding`.

# Transitions

The renderer decides on its own whether two neighbouring plot points are
joined by a vertical jump. NRZ-L and NRZI take the encoder's flag as is;
the ternary and half-bit schemes compare levels, because their encoder
flags only mark bit boundaries.
*/

use crate::bits::BitSequence;
use crate::encoding::{encode, EncodedSignal, Half, Level, Scheme, Segment};
use crate::style::{Color, Dash, Font, RenderStyle, Stroke};
use tracing::debug;

/// Position on a surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Surface dimensions, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Horizontal text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// A drawing target.
///
/// Text anchors use the baseline for `y`. A surface that is not ready
/// (not yet created, or detached) reports `None` from [`Surface::size`] and
/// is left untouched by [`render`].
pub trait Surface {
    /// Current size, or `None` when the surface cannot be drawn on.
    fn size(&self) -> Option<Size>;

    /// Erase everything and fill with the background color.
    fn clear(&mut self, background: Color);

    /// Draw a solid straight line.
    fn line(&mut self, from: Point, to: Point, stroke: &Stroke);

    /// Draw a dashed straight line.
    fn dashed_line(&mut self, from: Point, to: Point, stroke: &Stroke, dash: Dash);

    /// Draw a single line of text.
    fn text(&mut self, at: Point, text: &str, font: Font, anchor: TextAnchor, color: Color);

    /// Draw connected line segments through `points`.
    fn polyline(&mut self, points: &[Point], stroke: &Stroke);
}

/// Pixel layout of one plot, recomputed on every draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub bit_count: usize,
    pub bit_width: f32,
}

impl Geometry {
    /// Layout for `bit_count` bits on a surface of `size`.
    ///
    /// Returns `None` when there is nothing to draw, no room to draw it, or a
    /// dimension is not finite.
    pub fn new(size: Size, padding: f32, bit_count: usize) -> Option<Self> {
        if bit_count == 0
            || !size.width.is_finite()
            || !size.height.is_finite()
            || !padding.is_finite()
            || size.width <= 2.0 * padding
            || size.height <= 2.0 * padding
        {
            return None;
        }

        Some(Self {
            width: size.width,
            height: size.height,
            padding,
            bit_count,
            bit_width: (size.width - 2.0 * padding) / bit_count as f32,
        })
    }

    /// y coordinate of a level rail
    pub fn level_y(&self, level: Level) -> f32 {
        match level {
            Level::High => self.padding,
            Level::Zero => self.height / 2.0,
            Level::Low => self.height - self.padding,
        }
    }

    /// x coordinate of the start of bit `index`
    pub fn bit_x(&self, index: usize) -> f32 {
        // Scale before dividing so `bit_x(bit_count)` lands exactly on `right()`.
        self.padding + (self.width - 2.0 * self.padding) * index as f32 / self.bit_count as f32
    }

    /// x coordinate of the start of a segment
    pub fn segment_x(&self, segment: &Segment) -> f32 {
        let offset = match segment.half {
            Some(Half::Second) => self.bit_width / 2.0,
            Some(Half::First) | None => 0.0,
        };
        self.bit_x(segment.bit_index) + offset
    }

    /// Right end of the plotting area
    pub fn right(&self) -> f32 {
        self.width - self.padding
    }

    /// Bottom end of the plotting area
    pub fn bottom(&self) -> f32 {
        self.height - self.padding
    }
}

/// Resolved waveform vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f32,
    pub level: Level,
    /// Draw a vertical jump from the previous level at `x`
    pub transition: bool,
}

/// How the renderer decides on a visible jump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JumpRule {
    EncoderFlag,
    LevelChange,
}

fn jump_rule(scheme: Scheme) -> JumpRule {
    match scheme {
        Scheme::Nrzl | Scheme::Nrzi => JumpRule::EncoderFlag,
        Scheme::Ami
        | Scheme::Pseudoternary
        | Scheme::Manchester
        | Scheme::DifferentialManchester => JumpRule::LevelChange,
    }
}

/// Turn encoder segments into plot points for the given geometry.
///
/// Full-bit segments yield a start and an end point. Half-bit segments
/// yield their start point, and the second half also yields the end of the
/// bit period. The first half-bit point never carries a transition.
pub fn plot_points(signal: &EncodedSignal, geometry: &Geometry) -> Vec<PlotPoint> {
    let rule = jump_rule(signal.scheme);
    let mut points = Vec::with_capacity(signal.len() * 2);

    // Full-bit ternary schemes compare their first level against the zero rail.
    let mut previous = if signal.scheme.is_half_bit() { None } else { Some(Level::Zero) };

    for segment in &signal.segments {
        let x = geometry.segment_x(segment);
        let transition = match rule {
            JumpRule::EncoderFlag => segment.transition,
            JumpRule::LevelChange => previous.is_some_and(|prev| prev != segment.level),
        };
        points.push(PlotPoint { x, level: segment.level, transition });

        // Bit periods end on the next divider.
        if segment.half != Some(Half::First) {
            points.push(PlotPoint {
                x: geometry.bit_x(segment.bit_index + 1),
                level: segment.level,
                transition: false,
            });
        }

        previous = Some(segment.level);
    }

    points
}

/// Build the stepped polyline through `points`.
///
/// A flagged transition becomes a right-angled corner: the run at the old
/// level reaches `x` before the vertical jump to the new level.
pub fn waveform_path(points: &[PlotPoint], geometry: &Geometry) -> Vec<Point> {
    let mut path: Vec<Point> = Vec::with_capacity(points.len() * 2);
    let mut previous_y = None;

    for point in points {
        let y = geometry.level_y(point.level);
        if let (true, Some(prev_y)) = (point.transition, previous_y) {
            push_distinct(&mut path, Point::new(point.x, prev_y));
        }
        push_distinct(&mut path, Point::new(point.x, y));
        previous_y = Some(y);
    }

    path
}

fn push_distinct(path: &mut Vec<Point>, point: Point) {
    if path.last() != Some(&point) {
        path.push(point);
    }
}

/// Outcome of a render call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendered {
    Drawn,
    /// Nothing was drawn: no surface, an unready surface, or an unknown scheme
    Skipped,
}

/// Draw `signal` onto `surface`.
///
/// A missing or unready surface is not an error: nothing is drawn and
/// [`Rendered::Skipped`] is returned.
pub fn render<S: Surface + ?Sized>(
    surface: Option<&mut S>,
    signal: &EncodedSignal,
    style: &RenderStyle,
) -> Rendered {
    let Some(surface) = surface else {
        debug!(scheme = signal.scheme.selector(), "no surface, skipping render");
        return Rendered::Skipped;
    };
    let Some(size) = surface.size() else {
        debug!(scheme = signal.scheme.selector(), "surface not ready, skipping render");
        return Rendered::Skipped;
    };
    let Some(geometry) = Geometry::new(size, style.padding, signal.bits.len()) else {
        debug!(?size, "surface too small, skipping render");
        return Rendered::Skipped;
    };

    surface.clear(style.palette.background);
    draw_grid(surface, &geometry, style);
    draw_labels(surface, &geometry, &signal.bits, style);

    let points = plot_points(signal, &geometry);
    let path = waveform_path(&points, &geometry);
    let stroke = Stroke::new(style.signal_width, style.palette.scheme_color(signal.scheme));
    surface.polyline(&path, &stroke);

    Rendered::Drawn
}

/// Encode `bits` with `scheme` and draw the result
pub fn render_scheme<S: Surface + ?Sized>(
    surface: Option<&mut S>,
    scheme: Scheme,
    bits: &BitSequence,
    style: &RenderStyle,
) -> Rendered {
    render(surface, &encode(scheme, bits), style)
}

/// Draw by selector string; unknown selectors draw nothing
pub fn render_selector<S: Surface + ?Sized>(
    surface: Option<&mut S>,
    selector: &str,
    bits: &BitSequence,
    style: &RenderStyle,
) -> Rendered {
    match Scheme::from_selector(selector) {
        Some(scheme) => render_scheme(surface, scheme, bits, style),
        None => {
            debug!(selector, "unknown scheme selector, skipping render");
            Rendered::Skipped
        }
    }
}

fn draw_grid<S: Surface + ?Sized>(surface: &mut S, geometry: &Geometry, style: &RenderStyle) {
    let stroke = Stroke::new(style.grid_width, style.palette.grid);

    for level in [Level::High, Level::Zero, Level::Low] {
        let y = geometry.level_y(level);
        surface.line(
            Point::new(geometry.padding, y),
            Point::new(geometry.right(), y),
            &stroke,
        );
    }

    for i in 0..=geometry.bit_count {
        let x = geometry.bit_x(i);
        surface.dashed_line(
            Point::new(x, geometry.padding),
            Point::new(x, geometry.bottom()),
            &stroke,
            style.divider_dash,
        );
    }
}

fn draw_labels<S: Surface + ?Sized>(
    surface: &mut S,
    geometry: &Geometry,
    bits: &BitSequence,
    style: &RenderStyle,
) {
    let palette = &style.palette;
    for (level, color) in [
        (Level::High, palette.high),
        (Level::Zero, palette.zero),
        (Level::Low, palette.low),
    ] {
        surface.text(
            Point::new(geometry.padding - 8.0, geometry.level_y(level) + 4.0),
            level.axis_label(),
            style.axis_font,
            TextAnchor::End,
            color,
        );
    }

    for (i, bit) in bits.iter().enumerate() {
        let x = geometry.bit_x(i) + geometry.bit_width / 2.0;
        surface.text(
            Point::new(x, geometry.padding - 15.0),
            &bit.to_string(),
            style.bit_font,
            TextAnchor::Middle,
            palette.text,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Level::{High as H, Low as L, Zero as Z};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Line(Point, Point),
        Dashed(Point, Point),
        Text(Point, String, TextAnchor),
        Polyline(Vec<Point>, Color),
    }

    struct RecordingSurface {
        size: Option<Size>,
        ops: Vec<Op>,
    }

    impl RecordingSurface {
        fn new(width: f32, height: f32) -> Self {
            Self { size: Some(Size::new(width, height)), ops: Vec::new() }
        }

        fn detached() -> Self {
            Self { size: None, ops: Vec::new() }
        }
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> Option<Size> {
            self.size
        }

        fn clear(&mut self, _background: Color) {
            self.ops.clear();
            self.ops.push(Op::Clear);
        }

        fn line(&mut self, from: Point, to: Point, _stroke: &Stroke) {
            self.ops.push(Op::Line(from, to));
        }

        fn dashed_line(&mut self, from: Point, to: Point, _stroke: &Stroke, _dash: Dash) {
            self.ops.push(Op::Dashed(from, to));
        }

        fn text(&mut self, at: Point, text: &str, _font: Font, anchor: TextAnchor, _color: Color) {
            self.ops.push(Op::Text(at, text.to_string(), anchor));
        }

        fn polyline(&mut self, points: &[Point], stroke: &Stroke) {
            self.ops.push(Op::Polyline(points.to_vec(), stroke.color));
        }
    }

    fn bits(s: &str) -> BitSequence {
        BitSequence::parse(s).unwrap()
    }

    fn geometry(width: f32, height: f32, bit_count: usize) -> Geometry {
        Geometry::new(Size::new(width, height), 50.0, bit_count).unwrap()
    }

    fn summary(points: &[PlotPoint]) -> Vec<(f32, Level, bool)> {
        points.iter().map(|p| (p.x, p.level, p.transition)).collect()
    }

    #[test]
    fn test_geometry_layout() {
        let g = geometry(500.0, 250.0, 4);
        assert_eq!(g.bit_width, 100.0);
        assert_eq!(g.bit_x(0), 50.0);
        assert_eq!(g.bit_x(4), 450.0);
        assert_eq!(g.level_y(H), 50.0);
        assert_eq!(g.level_y(Z), 125.0);
        assert_eq!(g.level_y(L), 200.0);
    }

    #[test]
    fn test_geometry_rejects_degenerate_surfaces() {
        assert!(Geometry::new(Size::new(500.0, 250.0), 50.0, 0).is_none());
        assert!(Geometry::new(Size::new(100.0, 250.0), 50.0, 4).is_none());
        assert!(Geometry::new(Size::new(500.0, 90.0), 50.0, 4).is_none());
    }

    #[test]
    fn test_geometry_rejects_non_finite_sizes() {
        assert!(Geometry::new(Size::new(f32::NAN, 250.0), 50.0, 2).is_none());
        assert!(Geometry::new(Size::new(f32::INFINITY, 250.0), 50.0, 2).is_none());
        assert!(Geometry::new(Size::new(500.0, f32::NAN), 50.0, 2).is_none());
        assert!(Geometry::new(Size::new(500.0, f32::INFINITY), 50.0, 2).is_none());
        assert!(Geometry::new(Size::new(500.0, 250.0), f32::NAN, 2).is_none());
    }

    #[test]
    fn test_non_finite_surface_draws_nothing() {
        let mut surface = RecordingSurface::new(f32::NAN, 250.0);
        let result = render_scheme(Some(&mut surface), Scheme::Nrzl, &bits("10"), &RenderStyle::default());
        assert_eq!(result, Rendered::Skipped);
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_bit_periods_end_on_dividers() {
        let g = geometry(650.0, 250.0, 6);
        assert_eq!(g.bit_x(6), g.right());

        for scheme in Scheme::ALL {
            let signal = encode(scheme, &bits("100110"));
            let points = plot_points(&signal, &g);
            assert_eq!(points.last().map(|p| p.x), Some(g.right()), "{}", scheme);
        }
    }

    #[test]
    fn test_nrzl_plot_points() {
        let signal = encode(Scheme::Nrzl, &bits("10"));
        let points = plot_points(&signal, &geometry(250.0, 250.0, 2));
        assert_eq!(
            summary(&points),
            vec![
                (50.0, H, false),
                (125.0, H, false),
                (125.0, L, true),
                (200.0, L, false),
            ]
        );
    }

    #[test]
    fn test_ami_jumps_follow_levels_not_boundaries() {
        let signal = encode(Scheme::Ami, &bits("00"));
        assert_eq!(signal.transitions(), vec![false, true]);

        let points = plot_points(&signal, &geometry(250.0, 250.0, 2));
        assert!(points.iter().all(|p| !p.transition));
    }

    #[test]
    fn test_pseudoternary_first_point_compares_against_zero() {
        let signal = encode(Scheme::Pseudoternary, &bits("01"));
        let points = plot_points(&signal, &geometry(250.0, 250.0, 2));
        assert_eq!(
            summary(&points),
            vec![
                (50.0, H, true),
                (125.0, H, false),
                (125.0, Z, true),
                (200.0, Z, false),
            ]
        );
    }

    #[test]
    fn test_manchester_plot_points() {
        let signal = encode(Scheme::Manchester, &bits("10"));
        let points = plot_points(&signal, &geometry(300.0, 250.0, 2));
        assert_eq!(
            summary(&points),
            vec![
                (50.0, L, false),
                (100.0, H, true),
                (150.0, H, false),
                (150.0, H, false),
                (200.0, L, true),
                (250.0, L, false),
            ]
        );
    }

    #[test]
    fn test_half_bit_first_point_never_jumps() {
        let signal = encode(Scheme::DifferentialManchester, &bits("0"));
        assert!(signal.segments[0].transition);

        let points = plot_points(&signal, &geometry(300.0, 250.0, 1));
        assert!(!points[0].transition);
    }

    #[test]
    fn test_waveform_path_is_stepped() {
        let g = geometry(250.0, 200.0, 2);
        let signal = encode(Scheme::Nrzl, &bits("10"));
        let path = waveform_path(&plot_points(&signal, &g), &g);
        assert_eq!(
            path,
            vec![
                Point::new(50.0, 50.0),
                Point::new(125.0, 50.0),
                Point::new(125.0, 150.0),
                Point::new(200.0, 150.0),
            ]
        );
    }

    #[test]
    fn test_waveform_path_has_no_diagonals() {
        let g = geometry(650.0, 250.0, 6);
        for scheme in Scheme::ALL {
            let signal = encode(scheme, &bits("100110"));
            let path = waveform_path(&plot_points(&signal, &g), &g);
            for pair in path.windows(2) {
                assert!(
                    pair[0].x == pair[1].x || pair[0].y == pair[1].y,
                    "{} has a diagonal between {:?} and {:?}",
                    scheme,
                    pair[0],
                    pair[1]
                );
            }
            assert_eq!(path.first().map(|p| p.x), Some(50.0));
            assert_eq!(path.last().map(|p| p.x), Some(600.0));
        }
    }

    #[test]
    fn test_render_draw_calls() {
        let mut surface = RecordingSurface::new(500.0, 250.0);
        let result = render_scheme(Some(&mut surface), Scheme::Nrzi, &bits("1011"), &RenderStyle::default());
        assert_eq!(result, Rendered::Drawn);

        let ops = &surface.ops;
        assert_eq!(ops[0], Op::Clear);
        assert_eq!(ops.iter().filter(|op| matches!(op, Op::Line(..))).count(), 3);
        assert_eq!(ops.iter().filter(|op| matches!(op, Op::Dashed(..))).count(), 5);
        assert_eq!(ops.iter().filter(|op| matches!(op, Op::Text(..))).count(), 3 + 4);
        assert!(matches!(ops.last(), Some(Op::Polyline(_, color)) if *color == Color::from_hex(0xfeca57)));

        let labels: Vec<_> = ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(at, text, TextAnchor::Middle) => Some((at.x, text.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec![(100.0, "1"), (200.0, "0"), (300.0, "1"), (400.0, "1")]);
    }

    #[test]
    fn test_render_recomputes_geometry_after_resize() {
        let signal = encode(Scheme::Nrzl, &bits("11"));
        let style = RenderStyle::default();
        let mut surface = RecordingSurface::new(300.0, 250.0);

        render(Some(&mut surface), &signal, &style);
        let narrow = surface.ops.clone();

        surface.size = Some(Size::new(500.0, 250.0));
        render(Some(&mut surface), &signal, &style);

        assert_ne!(narrow, surface.ops);
        assert!(matches!(
            surface.ops.last(),
            Some(Op::Polyline(path, _)) if path.last() == Some(&Point::new(450.0, 50.0))
        ));
    }

    #[test]
    fn test_missing_surface_is_noop() {
        let signal = encode(Scheme::Ami, &bits("101"));
        let result = render::<RecordingSurface>(None, &signal, &RenderStyle::default());
        assert_eq!(result, Rendered::Skipped);
    }

    #[test]
    fn test_detached_surface_is_noop() {
        let mut surface = RecordingSurface::detached();
        let result = render_scheme(Some(&mut surface), Scheme::Manchester, &bits("101"), &RenderStyle::default());
        assert_eq!(result, Rendered::Skipped);
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_unknown_selector_is_noop() {
        let mut surface = RecordingSurface::new(500.0, 250.0);
        let style = RenderStyle::default();

        assert_eq!(render_selector(Some(&mut surface), "hdb3", &bits("1"), &style), Rendered::Skipped);
        assert!(surface.ops.is_empty());

        assert_eq!(render_selector(Some(&mut surface), "pseudo", &bits("1"), &style), Rendered::Drawn);
        assert!(!surface.ops.is_empty());
    }
}
