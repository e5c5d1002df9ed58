use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use super::Value;

/// Identity, placement, material and flattened data of one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub entity_id: u64,
    pub guid: String,
    pub ifc_type: String,
    pub name: String,
    pub description: String,
    pub object_type: String,
    pub tag: String,
    pub type_name: String,
    pub storey_name: String,
    pub material_name: String,
    pub properties: IndexMap<String, Value>,
    pub quantities: IndexMap<String, f64>,
}

/// A door or window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    #[serde(flatten)]
    pub element: Element,
    /// Millimetres; `None` when the model does not specify it.
    pub overall_width: Option<f64>,
    pub overall_height: Option<f64>,
}

/// Functional building-service system of an MEP element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemType {
    Heating,
    Ventilation,
    Sewage,
    WaterSupply,
    FireSuppression,
    Electrical,
    Unknown,
}

impl SystemType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SystemType::Heating => "heating",
            SystemType::Ventilation => "ventilation",
            SystemType::Sewage => "sewage",
            SystemType::WaterSupply => "water_supply",
            SystemType::FireSuppression => "fire_suppression",
            SystemType::Electrical => "electrical",
            SystemType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pipe, duct, terminal, fitting or piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MepElement {
    #[serde(flatten)]
    pub element: Element,
    pub system_type: SystemType,
    pub nominal_diameter: Option<Value>,
    pub inner_diameter: Option<Value>,
    pub outer_diameter: Option<Value>,
    /// Metres.
    pub length: Option<f64>,
    pub flow_rate: Option<Value>,
    pub pressure: Option<Value>,
    pub predefined_type: String,
}
