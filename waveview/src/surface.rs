/*!
egui painter as a waveform drawing surface.
*/

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape};
use linecode::render::{Point, Size, Surface, TextAnchor};
use linecode::style::{Color, Dash, Font, FontFamily, Stroke};

/// A rectangle of an egui painter; surface coordinates are relative to its top-left
pub struct EguiSurface {
    painter: Painter,
    rect: Rect,
}

impl EguiSurface {
    pub fn new(painter: Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn to_screen(&self, point: Point) -> Pos2 {
        Pos2::new(self.rect.min.x + point.x, self.rect.min.y + point.y)
    }
}

fn color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

fn egui_stroke(stroke: &Stroke) -> egui::Stroke {
    egui::Stroke::new(stroke.width, color32(stroke.color))
}

fn font_id(font: Font) -> FontId {
    match font.family {
        FontFamily::Proportional => FontId::proportional(font.size),
        FontFamily::Monospace => FontId::monospace(font.size),
    }
}

impl Surface for EguiSurface {
    fn size(&self) -> Option<Size> {
        // An invisible painter (collapsed or scrolled-out area) is not drawable.
        if !self.painter.is_visible() || self.rect.width() <= 0.0 || self.rect.height() <= 0.0 {
            return None;
        }
        Some(Size::new(self.rect.width(), self.rect.height()))
    }

    fn clear(&mut self, background: Color) {
        self.painter.rect_filled(self.rect, 6.0, color32(background));
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.painter
            .line_segment([self.to_screen(from), self.to_screen(to)], egui_stroke(stroke));
    }

    fn dashed_line(&mut self, from: Point, to: Point, stroke: &Stroke, dash: Dash) {
        let points = [self.to_screen(from), self.to_screen(to)];
        self.painter
            .extend(Shape::dashed_line(&points, egui_stroke(stroke), dash.dash, dash.gap));
    }

    fn text(&mut self, at: Point, text: &str, font: Font, anchor: TextAnchor, color: Color) {
        let align = match anchor {
            TextAnchor::Start => Align2::LEFT_BOTTOM,
            TextAnchor::Middle => Align2::CENTER_BOTTOM,
            TextAnchor::End => Align2::RIGHT_BOTTOM,
        };
        self.painter
            .text(self.to_screen(at), align, text, font_id(font), color32(color));
    }

    fn polyline(&mut self, points: &[Point], stroke: &Stroke) {
        let points: Vec<Pos2> = points.iter().map(|p| self.to_screen(*p)).collect();
        self.painter.add(Shape::line(points, egui_stroke(stroke)));
    }
}
