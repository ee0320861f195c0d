pub mod vec2;

pub use vec2::Vec2;

/// Threshold below which a value is treated as zero in degenerate-case tests.
pub const APPROX_ZERO: f64 = 1e-12;

/// Near-zero test gating every division in the TOI solvers.
#[inline]
pub fn is_approx_zero(value: f64) -> bool {
    value.abs() < APPROX_ZERO
}
