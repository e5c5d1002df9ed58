use tracing::debug;

use crate::model::{ModelAccess, UnitKind};

/// Factors converting raw model values to metres, m² and m³.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScales {
    pub length: f64,
    pub area: f64,
    pub volume: f64,
}

impl Default for UnitScales {
    fn default() -> Self {
        Self {
            length: 1.0,
            area: 1.0,
            volume: 1.0,
        }
    }
}

/// Computes all three scales once per run. A kind the model cannot resolve
/// falls back to 1.0.
pub fn normalize_units(model: &dyn ModelAccess) -> UnitScales {
    UnitScales {
        length: scale_or_identity(model, UnitKind::Length),
        area: scale_or_identity(model, UnitKind::Area),
        volume: scale_or_identity(model, UnitKind::Volume),
    }
}

fn scale_or_identity(model: &dyn ModelAccess, kind: UnitKind) -> f64 {
    match model.unit_scale(kind) {
        Ok(scale) if scale.is_finite() && scale > 0.0 => scale,
        Ok(scale) => {
            debug!(%kind, scale, "Ignoring non-positive unit scale");
            1.0
        }
        Err(err) => {
            debug!(%kind, error = %err, "Falling back to identity unit scale");
            1.0
        }
    }
}

/// Rounds half away from zero to `decimals` places.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
