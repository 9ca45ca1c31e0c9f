use std::f64::consts::PI;

use rand::Rng;

use crate::config::params::Interval;

/// Wrap an angle into (-π, π], keeping its sign.
pub fn wrap_angle(theta: f64) -> f64 {
    let wrapped = theta.sin().atan2(theta.cos());
    // atan2 can return exactly -π; the interval is open there.
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}

pub fn sample_interval<R: Rng + ?Sized>(rng: &mut R, interval: Interval) -> f64 {
    if interval.low == interval.high {
        interval.low
    } else {
        rng.gen_range(interval.range())
    }
}

/// Clamp into [low, high], sending NaN to `fallback`.
pub fn clamp_or(x: f64, low: f64, high: f64, fallback: f64) -> f64 {
    if x.is_nan() {
        fallback
    } else {
        x.clamp(low, high)
    }
}
