use std::f64::consts::PI;

/// Upper bound of the low-argument branch of the skin effect fit.
pub const SKIN_LOW_BRANCH_LIMIT: f64 = 2.8;
/// Upper bound of the middle branch of the skin effect fit.
pub const SKIN_MID_BRANCH_LIMIT: f64 = 3.8;

const MU_0_OVER_4PI: f64 = 1e-7;

/// Temperature-corrected DC resistance `R20 · (1 + α·(T − 20))`.
#[inline]
pub fn dc_resistance_at(dc_resistance_20: f64, temperature_coefficient: f64, temperature: f64) -> f64 {
    dc_resistance_20 * (1.0 + temperature_coefficient * (temperature - 20.0))
}

/// Argument `x = sqrt(8π·f·1e-7·k / R_dc)` shared by the skin and proximity effect fits.
#[inline]
pub fn effect_argument(frequency: f64, factor: f64, dc_resistance: f64) -> f64 {
    (8.0 * PI * frequency * MU_0_OVER_4PI * factor / dc_resistance).sqrt()
}

#[inline]
fn quartic_ratio(x: f64) -> f64 {
    let x4 = x.powi(4);
    x4 / (192.0 + 0.8 * x4)
}

/// Skin effect factor `y_s` for one argument value.
#[inline]
pub fn skin_effect_factor(xs: f64) -> f64 {
    if xs <= SKIN_LOW_BRANCH_LIMIT {
        quartic_ratio(xs)
    } else if xs <= SKIN_MID_BRANCH_LIMIT {
        -0.136 - 0.0177 * xs + 0.0563 * xs * xs
    } else {
        0.354 * xs - 0.733
    }
}

/// Proximity effect factor `y_p` for one argument value and a conductor ratio `d/s`.
#[inline]
pub fn proximity_effect_factor(xp: f64, ratio: f64) -> f64 {
    let f = quartic_ratio(xp);
    let a2 = ratio * ratio;
    f * a2 * (0.312 * a2 + 1.18 / (f + 0.27))
}
