//! Шум на целочисленной решётке и его билинейная интерполяция.

use crate::error::{Result, TerrainError};

/// Масштаб поля высот (крупные формы).
pub const ELEVATION_SCALE: f64 = 50.0;
/// Масштаб поля влажности.
pub const MOISTURE_SCALE: f64 = 30.0;

/// Хэш точки решётки в `[0, 1)`:
/// `fract(sin(x * 12.9898 + y * 78.233) * 43758.5453)`.
///
/// Единственное место с этими константами. Сид сюда не входит.
#[must_use]
pub fn lattice_hash(x: f64, y: f64) -> f64 {
    let v = (x * 12.9898 + y * 78.233).sin() * 43758.5453;
    v - v.floor()
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Гладкое поле: билинейная интерполяция [`lattice_hash`] по четырём углам ячейки.
///
/// Чем больше `scale`, тем крупнее детали. В узле решётки результат равен
/// самому хэшу узла.
pub fn sample(x: f64, y: f64, scale: f64) -> Result<f64> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(TerrainError::InvalidScale(scale));
    }

    let nx = x / scale;
    let ny = y / scale;
    let ix = nx.floor();
    let iy = ny.floor();
    let fx = nx - ix;
    let fy = ny - iy;

    let a = lattice_hash(ix, iy);
    let b = lattice_hash(ix + 1.0, iy);
    let c = lattice_hash(ix, iy + 1.0);
    let d = lattice_hash(ix + 1.0, iy + 1.0);

    let i1 = lerp(a, b, fx);
    let i2 = lerp(c, d, fx);
    Ok(lerp(i1, i2, fy))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn hash_known_values() {
        assert!(lattice_hash(0.0, 0.0).abs() < EPS);
        assert!((lattice_hash(1.0, 0.0) - 0.921_690_389_815_921_7).abs() < 1e-6);
        assert!((lattice_hash(0.0, 1.0) - 0.182_916_352_050_597_2).abs() < 1e-6);
        assert!((lattice_hash(1.0, 1.0) - 0.740_084_824_198_675).abs() < 1e-6);
    }

    #[test]
    fn hash_in_unit_interval() {
        for x in -20..20 {
            for y in -20..20 {
                let h = lattice_hash(f64::from(x), f64::from(y));
                assert!((0.0..=1.0).contains(&h), "hash({x}, {y}) = {h}");
            }
        }
    }

    #[test]
    fn corner_equals_hash() {
        for (lx, ly) in [(0, 0), (1, 0), (3, 7), (10, 2)] {
            let x = f64::from(lx) * ELEVATION_SCALE;
            let y = f64::from(ly) * ELEVATION_SCALE;
            let s = sample(x, y, ELEVATION_SCALE).unwrap();
            let h = lattice_hash(f64::from(lx), f64::from(ly));
            assert!((s - h).abs() < EPS, "corner ({lx}, {ly}): {s} vs {h}");
        }
    }

    #[test]
    fn continuous_across_cell_boundary() {
        let below = sample(50.0 - 1e-9, 10.0, 50.0).unwrap();
        let at = sample(50.0, 10.0, 50.0).unwrap();
        assert!((below - at).abs() < 1e-6);
    }

    #[test]
    fn known_samples() {
        let e = sample(1.0, 1.0, ELEVATION_SCALE).unwrap();
        let m = sample(1.0, 1.0, MOISTURE_SCALE).unwrap();
        assert!((e - 0.021_946_326_070_263_24).abs() < 1e-6);
        assert!((m - 0.036_415_200_375_919_69).abs() < 1e-6);
    }

    #[test]
    fn rejects_bad_scale() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                sample(1.0, 1.0, scale),
                Err(TerrainError::InvalidScale(_))
            ));
        }
    }
}
