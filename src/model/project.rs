use serde::Serialize;

use super::{Element, MaterialUsage, MepElement, Opening, QuantitySummary};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHeader {
    pub schema_version: String,
    pub file_name: String,
    pub timestamp: String,
    pub author: String,
    pub organization: String,
    pub originating_system: String,
    pub preprocessor: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectInfo {
    pub guid: String,
    pub name: String,
    pub description: String,
    pub phase: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Site {
    pub guid: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Building {
    pub guid: String,
    pub name: String,
    pub description: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Storey {
    pub guid: String,
    pub name: String,
    /// Metres.
    pub elevation: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpatialStructure {
    pub sites: Vec<Site>,
    pub buildings: Vec<Building>,
    pub storeys: Vec<Storey>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub guid: String,
    pub name: String,
    pub long_name: String,
    pub storey_name: String,
    /// m²
    pub area: f64,
    /// m³
    pub volume: f64,
    /// m
    pub height: f64,
}

/// Everything extracted from one model, in output order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub file_info: FileHeader,
    /// Serialized as `null` when the model has no `IfcProject`.
    pub project: Option<ProjectInfo>,
    pub spatial_structure: SpatialStructure,
    pub spaces: Vec<Space>,
    pub structural_elements: Vec<Element>,
    pub openings: Vec<Opening>,
    pub mep_elements: Vec<MepElement>,
    pub materials: Vec<MaterialUsage>,
    pub quantity_summary: QuantitySummary,
    pub parse_time_ms: u64,
}
