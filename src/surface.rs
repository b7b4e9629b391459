/// Immediate-mode 2D drawing context, modelled on an HTML canvas.
///
/// Paths are built with `begin_path`/`move_to`/`line_to`/`arc` and painted
/// with `fill` or `stroke` using the current colors and line width.
/// Implementations never fail.
pub trait DrawingSurface {
    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Clockwise arc around `(x, y)`, angles in radians.
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn stroke(&mut self);
    fn fill(&mut self);
    fn set_fill_color(&mut self, color: &str);
    fn set_stroke_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    /// CSS font shorthand, e.g. `"25px sans-serif"`.
    fn set_font(&mut self, font: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    BeginPath,
    ClosePath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Arc { x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64 },
    Stroke,
    Fill,
    FillColor(String),
    StrokeColor(String),
    LineWidth(f64),
    Font(String),
    FillText { text: String, x: f64, y: f64 },
    FillRect { x: f64, y: f64, width: f64, height: f64 },
}

/// Surface that keeps every call it receives, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn count(&self, predicate: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| predicate(*c)).count()
    }
}

impl DrawingSurface for RecordingSurface {
    fn begin_path(&mut self) {
        self.calls.push(DrawCall::BeginPath);
    }

    fn close_path(&mut self) {
        self.calls.push(DrawCall::ClosePath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.calls.push(DrawCall::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.calls.push(DrawCall::LineTo { x, y });
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.calls.push(DrawCall::Arc { x, y, radius, start_angle, end_angle });
    }

    fn stroke(&mut self) {
        self.calls.push(DrawCall::Stroke);
    }

    fn fill(&mut self) {
        self.calls.push(DrawCall::Fill);
    }

    fn set_fill_color(&mut self, color: &str) {
        self.calls.push(DrawCall::FillColor(color.to_string()));
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.calls.push(DrawCall::StrokeColor(color.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.calls.push(DrawCall::LineWidth(width));
    }

    fn set_font(&mut self, font: &str) {
        self.calls.push(DrawCall::Font(font.to_string()));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.calls.push(DrawCall::FillText { text: text.to_string(), x, y });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::FillRect { x, y, width, height });
    }
}
