use macroquad::math::{vec2, Vec2};

use crate::grid::{CellKind, Grid};
use crate::lattice::{equilibrium, C, OPP, Q};

/// Relaxation factor. The collision over-relaxes by 2·BETA, so 0.99 sits
/// just below the stability limit (near-zero viscosity).
pub const BETA: f32 = 0.99;
/// Reference density at initialization.
pub const RHO0: f32 = 1.0;
/// Obstacle disk radius, in pixel/H units.
pub const OBSTACLE_RADIUS: f32 = 0.05;
/// Cursor brush radius, in pixel/H units.
pub const BRUSH_RADIUS: f32 = 0.1;
/// Scale from cursor displacement to the velocity perturbation.
pub const FORCE_STRENGTH: f32 = 2.0;

// forcing is skipped once the velocity along the push direction reaches this
const ALIGN_LIMIT: f32 = 0.5;

// alternative initial field, off unless flipped deliberately
const VORTEX_INIT: bool = false;

/// Per-invocation input from the host driver.
#[derive(Clone, Copy, Debug)]
pub struct StepConfig {
    /// Cursor position, pixel/H units.
    pub cursor: Vec2,
    /// Cursor displacement since the previous invocation.
    pub cursor_delta: Vec2,
    /// Run the initializer instead of a steady step.
    pub init: bool,
    /// Display scale, read by the render passes only.
    pub brightness: f32,
    /// Reserved. Not read by any formula yet.
    pub dissipation: f32,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            cursor: Vec2::ZERO,
            cursor_delta: Vec2::ZERO,
            init: false,
            brightness: 1.0,
            dissipation: 0.0,
        }
    }
}

/// One tick: a full (re)initialization when `cfg.init` is set, otherwise a
/// steady collide-and-stream step.
pub fn tick(grid: &mut Grid, cfg: &StepConfig) {
    if cfg.init {
        init(grid);
    } else {
        step(grid, cfg);
    }
}

/// Fill the classification and set every cell to the reference equilibrium.
///
/// Walls are the first and last column plus a disk at the grid middle.
/// Positions are normalized by the grid height only, which keeps lattice
/// spacing uniform on non-square grids.
pub fn init(grid: &mut Grid) {
    let (w, h) = (grid.w, grid.h);
    let inv_h = 1.0 / h as f32;
    let center = vec2(w as f32, h as f32) * 0.5 * inv_h;
    let cur = grid.current;

    for y in 0..h {
        for x in 0..w {
            let at = y * w + x;
            let pos = vec2(x as f32, y as f32) * inv_h;
            grid.kind[at] =
                if x == 0 || x == w - 1 || (pos - center).length() < OBSTACLE_RADIUS {
                    CellKind::Wall
                } else {
                    CellKind::Fluid
                };

            let u0 = if VORTEX_INIT {
                vortex_velocity(pos)
            } else {
                Vec2::ZERO
            };
            for i in 0..Q {
                grid.f[cur][at * Q + i] = equilibrium(i, RHO0, u0 * RHO0);
            }
        }
    }
}

// periodic vortex sheet, kept around for experiments
fn vortex_velocity(pos: Vec2) -> Vec2 {
    use std::f32::consts::TAU;
    const A: f32 = 0.2;
    vec2(
        A * (TAU * pos.x).sin() * (TAU * pos.y).cos(),
        -A * (TAU * pos.x).cos() * (TAU * pos.y).sin(),
    )
}

/// One collide-and-stream pass over the whole grid.
///
/// Reads only the current generation, writes only the other one, then flips
/// which generation is current. Wall cells are skipped entirely; their
/// storage is never written here, fluid neighbors keep reflected packets on
/// their own side of the interface.
pub fn step(grid: &mut Grid, cfg: &StepConfig) {
    let (w, h) = (grid.w, grid.h);
    let inv_h = 1.0 / h as f32;
    let push = cfg.cursor_delta * FORCE_STRENGTH;
    let push_len = push.length();

    let (src, dst, kind) = grid.split_mut();

    for y in 0..h {
        for x in 0..w {
            let at = y * w + x;
            if kind[at] != CellKind::Fluid {
                continue;
            }

            let fs = &src[at * Q..at * Q + Q];
            let mut rho = 0.0;
            let mut p = Vec2::ZERO;
            for (i, &fi) in fs.iter().enumerate() {
                rho += fi;
                p += vec2(C[i].0 as f32, C[i].1 as f32) * fi;
            }

            // cursor forcing, gated so a cell already moving with the push
            // is not driven further
            if push_len > 0.0 {
                let pos = vec2(x as f32, y as f32) * inv_h;
                if (pos - cfg.cursor).length_squared() < BRUSH_RADIUS * BRUSH_RADIUS
                    && (p / rho).dot(push) / push_len < ALIGN_LIMIT
                {
                    p += push * rho;
                }
            }

            for i in 0..Q {
                let feq = equilibrium(i, rho, p);
                let next = (fs[i] + 2.0 * BETA * (feq - fs[i])).max(0.0);

                let (cx, cy) = C[i];
                let nx = (x as i32 + cx).rem_euclid(w as i32) as usize;
                let ny = (y as i32 + cy).rem_euclid(h as i32) as usize;
                let nat = ny * w + nx;
                match kind[nat] {
                    CellKind::Fluid => dst[nat * Q + i] = next,
                    CellKind::Wall => dst[at * Q + OPP[i]] = next,
                    // reserved types swallow the packet
                    CellKind::Sink => {}
                }
            }
        }
    }

    grid.flip();
}
