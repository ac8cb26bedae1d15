/*!
In-memory SVG drawing surface.

Output is fully deterministic: coordinates are written with two decimals and
elements appear in draw order, so rendering the same signal twice yields
byte-identical documents.
*/

use crate::error::{LineCodeError, Result};
use crate::render::{Point, Size, Surface, TextAnchor};
use crate::style::{Color, Dash, Font, FontFamily, Stroke};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

/// SVG document builder implementing [`Surface`]
#[derive(Debug, Clone)]
pub struct SvgSurface {
    size: Option<Size>,
    body: String,
}

impl SvgSurface {
    /// Create a surface of the given pixel size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Some(Size::new(width, height)),
            body: String::new(),
        }
    }

    /// A surface that reports itself as not ready; nothing is ever drawn on it
    pub fn detached() -> Self {
        Self {
            size: None,
            body: String::new(),
        }
    }

    /// True when nothing has been drawn since creation
    pub fn is_blank(&self) -> bool {
        self.body.is_empty()
    }

    /// Complete SVG document
    pub fn to_document(&self) -> Result<String> {
        let size = self
            .size
            .ok_or_else(|| LineCodeError::export("surface is detached"))?;

        Ok(format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.2} {:.2}">
{}</svg>
"#,
            size.width, size.height, size.width, size.height, self.body
        ))
    }

    /// Write the document to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let document = self.to_document()?;
        std::fs::write(path.as_ref(), document)?;
        info!("Wrote {}", path.as_ref().display());
        Ok(())
    }

    fn push_line(&mut self, from: Point, to: Point, stroke: &Stroke, extra: &str) {
        // Writing to a String cannot fail.
        let _ = writeln!(
            self.body,
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}"{}/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            stroke.color.to_css(),
            stroke.width,
            extra
        );
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl Surface for SvgSurface {
    fn size(&self) -> Option<Size> {
        self.size
    }

    fn clear(&mut self, background: Color) {
        self.body.clear();
        let _ = writeln!(
            self.body,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            background.to_css()
        );
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.push_line(from, to, stroke, "");
    }

    fn dashed_line(&mut self, from: Point, to: Point, stroke: &Stroke, dash: Dash) {
        let extra = format!(r#" stroke-dasharray="{:.2} {:.2}""#, dash.dash, dash.gap);
        self.push_line(from, to, stroke, &extra);
    }

    fn text(&mut self, at: Point, text: &str, font: Font, anchor: TextAnchor, color: Color) {
        let anchor = match anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let family = match font.family {
            FontFamily::Proportional => "Arial, sans-serif",
            FontFamily::Monospace => "'Courier New', monospace",
        };
        let _ = writeln!(
            self.body,
            r#"  <text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.0}" text-anchor="{}" fill="{}">{}</text>"#,
            at.x,
            at.y,
            family,
            font.size,
            anchor,
            color.to_css(),
            escape(text)
        );
    }

    fn polyline(&mut self, points: &[Point], stroke: &Stroke) {
        let coords: Vec<String> = points
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect();
        let _ = writeln!(
            self.body,
            r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="{:.2}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            coords.join(" "),
            stroke.color.to_css(),
            stroke.width
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::BitSequence;
    use crate::encoding::{encode, Scheme};
    use crate::render::{render, render_scheme, Rendered};
    use crate::style::RenderStyle;
    use tempfile::tempdir;

    fn bits(s: &str) -> BitSequence {
        BitSequence::parse(s).unwrap()
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let style = RenderStyle::default();
        for scheme in Scheme::ALL {
            let signal = encode(scheme, &bits("10110010"));

            let mut first = SvgSurface::new(800.0, 250.0);
            render(Some(&mut first), &signal, &style);

            let mut second = SvgSurface::new(800.0, 250.0);
            render(Some(&mut second), &signal, &style);
            render(Some(&mut second), &signal, &style);

            assert_eq!(first.to_document().unwrap(), second.to_document().unwrap());
        }
    }

    #[test]
    fn test_document_content() {
        let mut surface = SvgSurface::new(500.0, 250.0);
        let result = render_scheme(Some(&mut surface), Scheme::Nrzl, &bits("10"), &RenderStyle::default());
        assert_eq!(result, Rendered::Drawn);

        let doc = surface.to_document().unwrap();
        assert!(doc.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"500\" height=\"250\""));
        assert_eq!(doc.matches("<line ").count(), 3 + 3);
        assert_eq!(doc.matches("stroke-dasharray=\"5.00 5.00\"").count(), 3);
        assert_eq!(doc.matches("<text ").count(), 3 + 2);
        assert!(doc.contains(">+V</text>"));
        assert!(doc.contains(
            r##"<polyline points="50.00,50.00 250.00,50.00 250.00,200.00 450.00,200.00" fill="none" stroke="#ff6b6b""##
        ));
    }

    #[test]
    fn test_detached_surface_stays_blank() {
        let mut surface = SvgSurface::detached();
        let result = render_scheme(Some(&mut surface), Scheme::Ami, &bits("1"), &RenderStyle::default());
        assert_eq!(result, Rendered::Skipped);
        assert!(surface.is_blank());
        assert!(surface.to_document().is_err());
    }

    #[test]
    fn test_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nrzi.svg");

        let mut surface = SvgSurface::new(400.0, 250.0);
        render_scheme(Some(&mut surface), Scheme::Nrzi, &bits("0110"), &RenderStyle::default());
        surface.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, surface.to_document().unwrap());
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&c"), "a&lt;b&gt;&amp;c");
    }
}
