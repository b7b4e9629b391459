use crate::error::ConfigError;

/// Relative distance from a whole cell count under which a pixel counts as
/// sitting on the cell edge. Absorbs the rounding of `cell * step + min`.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Placement of the board grid on the drawing surface.
///
/// `min` is the pixel offset of the top-left grid corner and `step` the edge
/// length of one cell, so the grid covers `[min, max_x] × [min, max_y]`.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridGeometry {
    pub min: f64,
    pub step: f64,
    pub width: usize,
    pub height: usize,
}

impl Default for GridGeometry {
    fn default() -> Self {
        GridGeometry { min: 0.0, step: 50.0, width: 10, height: 10 }
    }
}

impl GridGeometry {
    pub fn square(min: f64, step: f64, lines: usize) -> Self {
        GridGeometry { min, step, width: lines, height: lines }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(ConfigError::InvalidStep(self.step));
        }
        if !self.min.is_finite() {
            return Err(ConfigError::InvalidMin(self.min));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid { width: self.width, height: self.height });
        }
        Ok(())
    }

    pub fn max_x(&self) -> f64 {
        self.min + self.width as f64 * self.step
    }

    pub fn max_y(&self) -> f64 {
        self.min + self.height as f64 * self.step
    }

    /// Snaps a pixel coordinate down to the corner of the enclosing cell.
    pub fn snap_to_grid_corner(&self, pixel: f64) -> f64 {
        self.min + self.to_grid(pixel) as f64 * self.step
    }

    /// Cell index of the pixel coordinate. Not bounds checked: pixels left of
    /// `min` give negative cells, pixels past the far edge give cells `>= lines`.
    pub fn to_grid(&self, pixel: f64) -> i64 {
        let cells = (pixel - self.min) / self.step;
        let nearest = cells.round();
        if (cells - nearest).abs() <= EDGE_TOLERANCE * nearest.abs().max(1.0) {
            nearest as i64
        } else {
            cells.floor() as i64
        }
    }

    /// Top-left pixel coordinate of the cell.
    pub fn to_pixel(&self, cell: usize) -> f64 {
        cell as f64 * self.step + self.min
    }

    pub fn cell_origin(&self, column: usize, row: usize) -> (f64, f64) {
        (self.to_pixel(column), self.to_pixel(row))
    }

    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let inside = x >= self.min && x < self.max_x() && y >= self.min && y < self.max_y();
        if !inside {
            return None;
        }
        let column = self.to_grid(x).clamp(0, self.width as i64 - 1) as usize;
        let row = self.to_grid(y).clamp(0, self.height as i64 - 1) as usize;
        Some((column, row))
    }
}

#[cfg(test)]
mod test {
    use rand::random;

    use crate::geometry::GridGeometry;

    fn eight_by_fifty() -> GridGeometry {
        GridGeometry::square(0.0, 50.0, 8)
    }

    #[test]
    fn test_known_values() {
        let geometry = eight_by_fifty();
        assert_eq!(geometry.to_pixel(3), 150.0);
        assert_eq!(geometry.to_grid(150.0), 3);
        assert_eq!(geometry.to_grid(175.0), 3);
        assert_eq!(geometry.to_grid(199.9), 3);
        assert_eq!(geometry.to_grid(200.0), 4);
        assert_eq!(geometry.max_x(), 400.0);
    }

    #[test]
    fn test_roundtrip_every_cell() {
        let geometries = [
            eight_by_fifty(),
            GridGeometry::square(17.0, 33.0, 10),
            GridGeometry::square(0.5, 12.5, 64),
            GridGeometry::square(0.1, 0.3, 64),
            GridGeometry::square(0.0, 0.1, 64),
            GridGeometry::square(3.7, 1.1, 64),
        ];
        for geometry in geometries {
            for cell in 0..geometry.width {
                assert_eq!(geometry.to_grid(geometry.to_pixel(cell)), cell as i64, "{:?} cell {}", geometry, cell);
            }
        }
    }

    #[test]
    fn test_snapping_random_pixels() {
        let geometry = GridGeometry::square(20.0, 40.0, 10);
        for _ in 0..1_000 {
            let pixel = geometry.min + random::<f64>() * (geometry.max_x() - geometry.min);
            let snapped = geometry.snap_to_grid_corner(pixel);
            assert!(snapped <= pixel + 1e-6 && pixel - snapped < geometry.step);
            assert_eq!(geometry.to_grid(pixel), geometry.to_grid(snapped));
            let cell = geometry.to_grid(pixel);
            assert!((0..10).contains(&cell), "pixel {} gave cell {}", pixel, cell);
        }
    }

    #[test]
    fn test_offset_origin() {
        let geometry = GridGeometry::square(10.0, 50.0, 8);
        assert_eq!(geometry.snap_to_grid_corner(10.0), 10.0);
        assert_eq!(geometry.snap_to_grid_corner(59.0), 10.0);
        assert_eq!(geometry.snap_to_grid_corner(60.0), 60.0);
        assert_eq!(geometry.to_grid(59.0), 0);
        assert_eq!(geometry.to_pixel(1), 60.0);
    }

    #[test]
    fn test_fractional_step_edges() {
        let geometry = GridGeometry::square(0.1, 0.3, 8);
        assert_eq!(geometry.to_grid(geometry.to_pixel(3)), 3);
        assert_eq!(geometry.snap_to_grid_corner(geometry.to_pixel(3)), geometry.to_pixel(3));
        assert_eq!(geometry.to_grid(0.99), 2);
        assert_eq!(geometry.to_grid(1.01), 3);
        assert_eq!(geometry.cell_at(geometry.to_pixel(5), geometry.to_pixel(7)), Some((5, 7)));
    }

    #[test]
    fn test_outside_grid_floors() {
        let geometry = eight_by_fifty();
        assert_eq!(geometry.to_grid(-10.0), -1);
        assert_eq!(geometry.to_grid(-50.0), -1);
        assert_eq!(geometry.to_grid(-51.0), -2);
        assert_eq!(geometry.to_grid(400.0), 8);
    }

    #[test]
    fn test_cell_at() {
        let geometry = GridGeometry { min: 10.0, step: 20.0, width: 4, height: 3 };
        assert_eq!(geometry.cell_at(10.0, 10.0), Some((0, 0)));
        assert_eq!(geometry.cell_at(89.9, 69.9), Some((3, 2)));
        assert_eq!(geometry.cell_at(90.0, 20.0), None);
        assert_eq!(geometry.cell_at(20.0, 70.0), None);
        assert_eq!(geometry.cell_at(9.9, 20.0), None);
        assert_eq!(geometry.cell_at(f64::NAN, 20.0), None);
    }

    #[test]
    fn test_validate() {
        assert!(GridGeometry::default().validate().is_ok());
        assert!(GridGeometry::square(0.0, 0.0, 8).validate().is_err());
        assert!(GridGeometry::square(0.0, -5.0, 8).validate().is_err());
        assert!(GridGeometry::square(0.0, f64::NAN, 8).validate().is_err());
        assert!(GridGeometry::square(f64::INFINITY, 50.0, 8).validate().is_err());
        assert!(GridGeometry::square(0.0, 50.0, 0).validate().is_err());
    }
}
