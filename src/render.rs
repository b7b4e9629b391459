use std::f64::consts::PI;

use crate::board::{Board, Color, Piece, PieceType};
use crate::geometry::GridGeometry;
use crate::glyph::{glyph, Glyph, RingStyle};
use crate::surface::DrawingSurface;

const WHITE: &str = "#ffffff";
const BLACK: &str = "#000000";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub background: String,
    pub line_color: String,
    pub line_width: f64,
    pub font_family: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        RenderStyle {
            background: WHITE.to_string(),
            line_color: BLACK.to_string(),
            line_width: 2.0,
            font_family: "sans-serif".to_string(),
        }
    }
}

/// Colors a piece is painted with. `accent` contrasts with `fill` and is used
/// for numerals written on a solid disc.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Palette {
    fill: &'static str,
    stroke: &'static str,
    accent: &'static str,
}

fn palette(color: Color) -> Option<Palette> {
    match color {
        Color::Empty => None,
        Color::White => Some(Palette { fill: WHITE, stroke: BLACK, accent: BLACK }),
        Color::Black => Some(Palette { fill: BLACK, stroke: BLACK, accent: WHITE }),
    }
}

/// Paints boards onto a drawing surface. Holds no per-pass state: every call
/// repaints from the board it is given.
#[derive(Debug, Clone, PartialEq)]
pub struct Renderer {
    geometry: GridGeometry,
    style: RenderStyle,
}

impl Renderer {
    pub fn new(geometry: GridGeometry, style: RenderStyle) -> Self {
        Renderer { geometry, style }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Grid lines, then every cell.
    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S, board: &Board) {
        self.draw_grid_lines(surface);
        self.redraw(surface, board);
    }

    pub fn draw_grid_lines<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        let g = &self.geometry;
        surface.set_stroke_color(&self.style.line_color);
        surface.set_line_width(self.style.line_width);
        for row in 0..=g.height {
            let y = g.to_pixel(row);
            draw_line(surface, g.min, y, g.max_x(), y);
        }
        for column in 0..=g.width {
            let x = g.to_pixel(column);
            draw_line(surface, x, g.min, x, g.max_y());
        }
    }

    /// Repaints every cell of the board: background square first, then the
    /// piece if there is one.
    pub fn redraw<S: DrawingSurface + ?Sized>(&self, surface: &mut S, board: &Board) {
        if (board.width(), board.height()) != (self.geometry.width, self.geometry.height) {
            log::warn!(
                "Board is {}x{} but the grid is {}x{}",
                board.width(), board.height(), self.geometry.width, self.geometry.height
            );
        }
        log::debug!("Redrawing {}x{} board with {} pieces", board.width(), board.height(), board.occupied());

        surface.set_line_width(self.style.line_width);
        surface.set_fill_color(&self.style.background);
        surface.set_stroke_color(&self.style.line_color);

        for (column, row, piece) in board.cells() {
            self.draw_space(surface, column, row, &self.style.background);
            if !piece.is_empty() {
                self.draw_piece(surface, column, row, piece);
            }
        }
    }

    /// Fills the cell, leaving one pixel free on each side for the grid line.
    pub fn draw_space<S: DrawingSurface + ?Sized>(&self, surface: &mut S, column: usize, row: usize, color: &str) {
        let (x, y) = self.geometry.cell_origin(column, row);
        let step = self.geometry.step;
        surface.set_fill_color(color);
        surface.fill_rect(x + 1.0, y + 1.0, step - 2.0, step - 2.0);
    }

    pub fn draw_piece<S: DrawingSurface + ?Sized>(&self, surface: &mut S, column: usize, row: usize, piece: &Piece) {
        let Some(palette) = palette(piece.color) else { return };
        let Some(glyph) = glyph(piece.kind) else { return };
        log::trace!("Drawing {:?} {:?} at ({}, {})", piece.color, piece.kind, column, row);

        let (x, y) = self.geometry.cell_origin(column, row);
        surface.set_stroke_color(palette.stroke);
        surface.set_fill_color(palette.fill);
        self.draw_glyph(surface, x, y, glyph);

        if let (true, PieceType::Other(n)) = (glyph.numeral, piece.kind) {
            self.draw_numeral(surface, x, y, n, palette);
        }
    }

    /// Polygon outlines and ornaments are only stroked; solid rings are filled
    /// with the piece color.
    fn draw_glyph<S: DrawingSurface + ?Sized>(&self, surface: &mut S, x: f64, y: f64, glyph: &Glyph) {
        let step = self.geometry.step;
        if let Some((&(first_x, first_y), rest)) = glyph.outline.split_first() {
            surface.begin_path();
            surface.move_to(x + first_x * step, y + first_y * step);
            for &(px, py) in rest {
                surface.line_to(x + px * step, y + py * step);
            }
            surface.close_path();
            surface.stroke();
        }
        for ring in glyph.rings {
            surface.begin_path();
            surface.arc(x + ring.center.0 * step, y + ring.center.1 * step, ring.radius * step, 0.0, 2.0 * PI);
            match ring.style {
                RingStyle::Solid => {
                    surface.fill();
                    surface.stroke();
                }
                RingStyle::Ornament => surface.stroke(),
            }
        }
    }

    fn draw_numeral<S: DrawingSurface + ?Sized>(&self, surface: &mut S, x: f64, y: f64, n: i64, palette: Palette) {
        let step = self.geometry.step;
        let size = step * 0.4;
        let text = n.to_string();
        // Roughly center the digits; glyph advance is about 0.55em.
        let text_width = text.len() as f64 * size * 0.55;
        surface.set_fill_color(palette.accent);
        surface.set_font(&format!("{}px {}", size, self.style.font_family));
        surface.fill_text(&text, x + (step - text_width) / 2.0, y + step / 2.0 + size * 0.35);
        surface.set_fill_color(palette.fill);
    }
}

fn draw_line<S: DrawingSurface + ?Sized>(surface: &mut S, start_x: f64, start_y: f64, end_x: f64, end_y: f64) {
    surface.begin_path();
    surface.move_to(start_x, start_y);
    surface.line_to(end_x, end_y);
    surface.stroke();
}
