use macroquad::math::Vec2;

// D2Q9 model constants
pub const Q: usize = 9;

/// Direction offsets, fixed order: center, E, N, W, S, NE, NW, SE, SW.
pub const C: [(i32, i32); Q] = [
    (0, 0),
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Quadrature weight per direction.
pub const WEIGHTS: [f32; Q] = [
    4.0 / 9.0,
    1.0 / 9.0, 1.0 / 9.0, 1.0 / 9.0, 1.0 / 9.0,
    1.0 / 36.0, 1.0 / 36.0, 1.0 / 36.0, 1.0 / 36.0,
];

/// Index of the reversed direction, used for bounce-back.
pub const OPP: [usize; Q] = [0, 3, 4, 1, 2, 8, 7, 6, 5];

/// Equilibrium occupation for direction `i` given density and momentum.
///
/// This is the closed-form product equilibrium, not the usual second-order
/// polynomial, and the two are not interchangeable: the product form is what
/// keeps the solver stable at the relaxation factor used here. Singular when
/// a velocity component reaches ±1; callers keep velocities inside the open
/// interval, nothing is checked at runtime.
pub fn equilibrium(i: usize, rho: f32, p: Vec2) -> f32 {
    let u = p / rho;
    let ax = (1.0 + 3.0 * u.x * u.x).sqrt();
    let ay = (1.0 + 3.0 * u.y * u.y).sqrt();
    let tx = (2.0 * u.x + ax) / (1.0 - u.x);
    let ty = (2.0 * u.y + ay) / (1.0 - u.y);
    let (cx, cy) = C[i];
    WEIGHTS[i] * rho * (2.0 - ax) * (2.0 - ay) * axis_pow(tx, cx) * axis_pow(ty, cy)
}

// t^c for c in {-1, 0, 1}
fn axis_pow(t: f32, c: i32) -> f32 {
    match c {
        1 => t,
        -1 => 1.0 / t,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::vec2;

    #[test]
    fn weights_sum_to_one() {
        let total: f32 = WEIGHTS.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn opposites_reverse_offsets() {
        for i in 0..Q {
            assert_eq!(OPP[OPP[i]], i);
            assert_eq!(C[OPP[i]].0, -C[i].0);
            assert_eq!(C[OPP[i]].1, -C[i].1);
        }
    }

    #[test]
    fn rest_equilibrium_matches_weights() {
        for i in 0..Q {
            let feq = equilibrium(i, 1.0, Vec2::ZERO);
            assert!((feq - WEIGHTS[i]).abs() < 1e-7);
        }
    }

    #[test]
    fn equilibrium_reproduces_density_and_momentum() {
        let rho = 1.2;
        let u = vec2(0.1, -0.05);
        let p = u * rho;

        let mut sum = 0.0;
        let mut m = Vec2::ZERO;
        for i in 0..Q {
            let feq = equilibrium(i, rho, p);
            assert!(feq > 0.0);
            sum += feq;
            m += vec2(C[i].0 as f32, C[i].1 as f32) * feq;
        }

        assert!((sum - rho).abs() < 1e-5);
        assert!((m.x - p.x).abs() < 1e-5);
        assert!((m.y - p.y).abs() < 1e-5);
    }
}
