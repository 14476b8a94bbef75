use macroquad::color::{hsl_to_rgb, Color};
use macroquad::texture::Image;
use serde::{Deserialize, Serialize};

use crate::grid::{CellKind, Grid};
use crate::lattice::{C, Q};

/// Flat color used for wall cells in every variant.
pub const WALL_COLOR: Color = Color::new(0.16, 0.16, 0.19, 1.0);

/// Interchangeable colorization passes over a finished generation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum RenderMode {
    Density,
    Flow,
    Energy,
}

impl RenderMode {
    pub fn next(self) -> Self {
        match self {
            RenderMode::Density => RenderMode::Flow,
            RenderMode::Flow => RenderMode::Energy,
            RenderMode::Energy => RenderMode::Density,
        }
    }
}

/// Colorize the current generation into `image`, one pixel per cell.
pub fn shade(grid: &Grid, mode: RenderMode, brightness: f32, image: &mut Image) {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let color = if grid.kind(x, y) == CellKind::Fluid {
                fluid_color(grid, x, y, mode, brightness)
            } else {
                WALL_COLOR
            };
            image.set_pixel(x as u32, y as u32, color);
        }
    }
}

fn fluid_color(grid: &Grid, x: usize, y: usize, mode: RenderMode, brightness: f32) -> Color {
    match mode {
        RenderMode::Density => {
            let rho = grid.density(x, y);
            let l = (0.5 * rho).powf(1.3) * brightness;
            hsl_to_rgb(0.58, 0.5, l.clamp(0.0, 1.0))
        }
        RenderMode::Flow => {
            let u = grid.velocity(x, y);
            let hue = u.y.atan2(u.x) / std::f32::consts::TAU + 0.5;
            let l = (4.0 * u.length()).powf(1.5) * brightness;
            hsl_to_rgb(hue, 0.85, l.clamp(0.0, 0.9))
        }
        RenderMode::Energy => {
            // second moment of the distributions
            let mut e = 0.0;
            for i in 0..Q {
                let (cx, cy) = C[i];
                e += grid.f_at(x, y, i) * ((cx * cx + cy * cy) as f32);
            }
            let l = (0.8 * e).powf(1.3) * brightness;
            hsl_to_rgb(0.08, 0.7, l.clamp(0.0, 1.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::solver;
    use macroquad::color::BLACK;

    #[test]
    fn mode_cycle_covers_all_variants() {
        let mut mode = RenderMode::Density;
        let mut seen = vec![mode];
        for _ in 0..2 {
            mode = mode.next();
            seen.push(mode);
        }
        assert_eq!(mode.next(), RenderMode::Density);
        assert!(seen.contains(&RenderMode::Flow));
        assert!(seen.contains(&RenderMode::Energy));
    }

    #[test]
    fn walls_get_the_flat_color() {
        let mut grid = Grid::new(16, 8);
        solver::init(&mut grid);
        let mut image = Image::gen_image_color(16, 8, BLACK);
        shade(&grid, RenderMode::Flow, 1.0, &mut image);

        // first column is wall, interior is moving nowhere (black-ish)
        let wall = image.get_pixel(0, 3);
        assert!((wall.r - WALL_COLOR.r).abs() < 0.01);
        assert!((wall.g - WALL_COLOR.g).abs() < 0.01);
        assert!((wall.b - WALL_COLOR.b).abs() < 0.01);
    }

    #[test]
    fn shaded_pixels_are_finite_in_every_mode() {
        let mut grid = Grid::new(16, 8);
        solver::init(&mut grid);
        let mut image = Image::gen_image_color(16, 8, BLACK);
        for mode in [RenderMode::Density, RenderMode::Flow, RenderMode::Energy] {
            shade(&grid, mode, 1.5, &mut image);
            let c = image.get_pixel(5, 4);
            assert!(c.r.is_finite() && c.g.is_finite() && c.b.is_finite());
        }
    }
}
