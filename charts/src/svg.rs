// Minimal SVG writer. Elements are appended as text; coordinates are in pixels.
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

pub struct SvgDocument {
    buf: String,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32) -> Self {
        let mut buf = String::new();
        let _ = writeln!(
            buf,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = width,
            h = height
        );
        Self { buf }
    }

    pub fn open_group(&mut self, class: &str) {
        let _ = writeln!(self.buf, r#"<g class="{}">"#, escape(class));
    }

    pub fn close_group(&mut self) {
        self.buf.push_str("</g>\n");
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str, stroke: Option<&str>) {
        let stroke = stroke.map_or(String::new(), |s| format!(r#" stroke="{}" stroke-width="1""#, s));
        let _ = writeln!(
            self.buf,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"{}/>"#,
            x, y, w, h, fill, stroke
        );
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, width: f64) {
        let _ = writeln!(
            self.buf,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
            x1, y1, x2, y2, stroke, width
        );
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], stroke: &str, width: f64) {
        if points.is_empty() {
            return;
        }
        let pts: Vec<String> = points.iter().map(|(x, y)| format!("{:.2},{:.2}", x, y)).collect();
        let _ = writeln!(
            self.buf,
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            pts.join(" "),
            stroke,
            width
        );
    }

    pub fn polygon(&mut self, points: &[(f64, f64)], fill: &str, class: &str) {
        let pts: Vec<String> = points.iter().map(|(x, y)| format!("{:.2},{:.2}", x, y)).collect();
        let _ = writeln!(
            self.buf,
            r#"<polygon class="{}" points="{}" fill="{}"/>"#,
            escape(class),
            pts.join(" "),
            fill
        );
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, size: f64, anchor: Anchor, fill: &str) {
        let _ = writeln!(
            self.buf,
            r#"<text x="{:.2}" y="{:.2}" font-size="{}" text-anchor="{}" fill="{}">{}</text>"#,
            x,
            y,
            size,
            anchor.as_str(),
            fill,
            escape(content)
        );
    }

    /// Text rotated -90 degrees around its anchor point (y axis labels).
    pub fn vertical_text(&mut self, x: f64, y: f64, content: &str, size: f64, fill: &str) {
        let _ = writeln!(
            self.buf,
            r#"<text x="{x:.2}" y="{y:.2}" font-size="{}" text-anchor="middle" fill="{}" transform="rotate(-90 {x:.2} {y:.2})">{}</text>"#,
            size,
            fill,
            escape(content),
            x = x,
            y = y
        );
    }

    pub fn finish(mut self) -> String {
        self.buf.push_str("</svg>\n");
        self.buf
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b & "c""#), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_document_is_closed() {
        let mut doc = SvgDocument::new(100, 50);
        doc.text(1.0, 2.0, "Date", 10.0, Anchor::Middle, "#000");
        let svg = doc.finish();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(">Date</text>"));
    }

    #[test]
    fn test_empty_polyline_skipped() {
        let mut doc = SvgDocument::new(10, 10);
        doc.polyline(&[], "#000", 1.0);
        assert!(!doc.finish().contains("polyline"));
    }
}
