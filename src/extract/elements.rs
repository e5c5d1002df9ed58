use super::catalog_entities;
use super::flatten::{flatten, Flattened};
use super::units::{round_to, UnitScales};
use crate::error::AccessError;
use crate::model::{EntityId, ModelAccess, Opening};

pub const STRUCTURAL_TYPES: &[&str] = &[
    "IfcWall",
    "IfcWallStandardCase",
    "IfcSlab",
    "IfcColumn",
    "IfcBeam",
    "IfcRoof",
    "IfcStair",
    "IfcStairFlight",
    "IfcRamp",
    "IfcRailing",
    "IfcCovering",
    "IfcFooting",
    "IfcPile",
    "IfcCurtainWall",
    "IfcPlate",
];

pub const OPENING_TYPES: &[&str] = &["IfcDoor", "IfcWindow"];

/// Structural elements with their unrounded quantities, which the summary
/// totals are computed from.
pub fn structural_elements(model: &dyn ModelAccess) -> Result<Vec<Flattened>, AccessError> {
    Ok(catalog_entities(model, STRUCTURAL_TYPES)?
        .into_iter()
        .map(|id| flatten(model, id))
        .collect())
}

pub fn openings(model: &dyn ModelAccess, scales: UnitScales) -> Result<Vec<Opening>, AccessError> {
    Ok(catalog_entities(model, OPENING_TYPES)?
        .into_iter()
        .map(|id| Opening {
            element: flatten(model, id).element,
            overall_width: millimetres(model, id, "OverallWidth", scales.length),
            overall_height: millimetres(model, id, "OverallHeight", scales.length),
        })
        .collect())
}

/// Dimension attribute in whole millimetres; `None` when absent or unset.
fn millimetres(model: &dyn ModelAccess, id: EntityId, attribute: &str, length_scale: f64) -> Option<f64> {
    model
        .attribute(id, attribute)
        .as_f64()
        .map(|raw| round_to(raw * length_scale * 1000.0, 0))
}
