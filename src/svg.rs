use std::f64::consts::PI;
use std::fmt::Write;

use crate::geometry::GridGeometry;
use crate::surface::DrawingSurface;

const FULL_TURN: f64 = 2.0 * PI;

#[derive(Debug, Copy, Clone, PartialEq)]
enum Segment {
    Move(f64, f64),
    Line(f64, f64),
    Arc { x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64 },
    Close,
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Paint {
    Fill,
    Stroke,
}

/// Surface that turns the canvas-style calls into an SVG document.
///
/// Each `fill`/`stroke` of the current path becomes one element, so a path
/// that is filled and then stroked produces two.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    fill_color: String,
    stroke_color: String,
    line_width: f64,
    font: String,
    path: Vec<Segment>,
    elements: Vec<String>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        SvgSurface {
            width,
            height,
            fill_color: "#000000".to_string(),
            stroke_color: "#000000".to_string(),
            line_width: 1.0,
            font: "10px sans-serif".to_string(),
            path: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// Surface sized to the grid plus a margin of `min` on the far sides.
    pub fn for_geometry(geometry: &GridGeometry) -> Self {
        SvgSurface::new(geometry.max_x() + geometry.min, geometry.max_y() + geometry.min)
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn finish(&self) -> String {
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = num(self.width),
            h = num(self.height),
        );
        for element in &self.elements {
            svg.push_str(element);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    fn paint_attributes(&self, paint: Paint) -> String {
        match paint {
            Paint::Fill => format!("fill=\"{}\" stroke=\"none\"", escape(&self.fill_color)),
            Paint::Stroke => format!(
                "fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"",
                escape(&self.stroke_color),
                num(self.line_width)
            ),
        }
    }

    fn paint(&mut self, paint: Paint) {
        let attributes = self.paint_attributes(paint);
        let element = match self.path.as_slice() {
            [] => return,
            [Segment::Move(x1, y1), Segment::Line(x2, y2)] => {
                if paint == Paint::Fill {
                    return;
                }
                format!(
                    "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {}/>",
                    num(*x1), num(*y1), num(*x2), num(*y2), attributes
                )
            }
            [Segment::Arc { x, y, radius, start_angle, end_angle }] if end_angle - start_angle >= FULL_TURN => {
                format!("<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {}/>", num(*x), num(*y), num(*radius), attributes)
            }
            segments => format!("<path d=\"{}\" {}/>", path_data(segments), attributes),
        };
        self.elements.push(element);
    }
}

fn path_data(segments: &[Segment]) -> String {
    let mut d = String::new();
    let mut current: Option<(f64, f64)> = None;
    let mut subpath_start = (0.0, 0.0);
    for segment in segments {
        if !d.is_empty() {
            d.push(' ');
        }
        match *segment {
            Segment::Move(x, y) => {
                let _ = write!(d, "M {} {}", num(x), num(y));
                current = Some((x, y));
                subpath_start = (x, y);
            }
            Segment::Line(x, y) => {
                let command = if current.is_some() { 'L' } else { 'M' };
                let _ = write!(d, "{} {} {}", command, num(x), num(y));
                if current.is_none() {
                    subpath_start = (x, y);
                }
                current = Some((x, y));
            }
            Segment::Arc { x, y, radius, start_angle, end_angle } => {
                let start = (x + radius * start_angle.cos(), y + radius * start_angle.sin());
                let command = if current.is_some() { 'L' } else { 'M' };
                let _ = write!(d, "{} {} {}", command, num(start.0), num(start.1));
                if current.is_none() {
                    subpath_start = start;
                }
                let sweep = end_angle - start_angle;
                if sweep >= FULL_TURN {
                    let opposite = (x - radius * start_angle.cos(), y - radius * start_angle.sin());
                    let _ = write!(
                        d,
                        " A {r} {r} 0 0 1 {} {} A {r} {r} 0 0 1 {} {}",
                        num(opposite.0), num(opposite.1), num(start.0), num(start.1),
                        r = num(radius)
                    );
                    current = Some(start);
                } else {
                    let sweep = sweep.rem_euclid(FULL_TURN);
                    let end = (x + radius * (start_angle + sweep).cos(), y + radius * (start_angle + sweep).sin());
                    let large_arc = if sweep > PI { 1 } else { 0 };
                    let _ = write!(
                        d,
                        " A {r} {r} 0 {} 1 {} {}",
                        large_arc, num(end.0), num(end.1),
                        r = num(radius)
                    );
                    current = Some(end);
                }
            }
            Segment::Close => {
                d.push('Z');
                current = Some(subpath_start);
            }
        }
    }
    d
}

fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            x => escaped.push(x),
        }
    }
    escaped
}

impl DrawingSurface for SvgSurface {
    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn close_path(&mut self) {
        self.path.push(Segment::Close);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(Segment::Move(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push(Segment::Line(x, y));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.path.push(Segment::Arc { x, y, radius, start_angle, end_angle });
    }

    fn stroke(&mut self) {
        self.paint(Paint::Stroke);
    }

    fn fill(&mut self) {
        self.paint(Paint::Fill);
    }

    fn set_fill_color(&mut self, color: &str) {
        self.fill_color = color.to_string();
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.stroke_color = color.to_string();
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.elements.push(format!(
            "<text x=\"{}\" y=\"{}\" style=\"font: {}\" fill=\"{}\">{}</text>",
            num(x), num(y), escape(&self.font), escape(&self.fill_color), escape(text)
        ));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.elements.push(format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            num(x), num(y), num(width), num(height), escape(&self.fill_color)
        ));
    }
}
