use super::catalog_entities;
use super::classify::classify;
use super::flatten::flatten;
use super::lookup::PropertyLookup;
use super::units::{round_to, UnitScales};
use crate::error::AccessError;
use crate::model::{MepElement, ModelAccess, Value};

pub const MEP_TYPES: &[&str] = &[
    "IfcPipeSegment",
    "IfcPipeFitting",
    "IfcDuctSegment",
    "IfcDuctFitting",
    "IfcDuctSilencer",
    "IfcFlowSegment",
    "IfcFlowFitting",
    "IfcFlowTerminal",
    "IfcFlowController",
    "IfcFlowMovingDevice",
    "IfcFlowStorageDevice",
    "IfcFlowTreatmentDevice",
    "IfcEnergyConversionDevice",
    "IfcUnitaryEquipment",
    "IfcFireSuppressionTerminal",
    "IfcSanitaryTerminal",
    "IfcWasteTerminal",
    "IfcStackTerminal",
    "IfcAirTerminal",
    "IfcAirTerminalBox",
    "IfcBoiler",
    "IfcChiller",
    "IfcCoil",
    "IfcCondenser",
    "IfcEvaporator",
    "IfcHeatExchanger",
    "IfcHumidifier",
    "IfcPump",
    "IfcFan",
    "IfcCompressor",
    "IfcValve",
    "IfcDamper",
    "IfcFilter",
];

// Aliases per field, English and Estonian, in lookup order.
const NOMINAL_DIAMETER: &[&str] = &["NominalDiameter", "Nominal Diameter", "Diameter", "DN", "Size"];
const INNER_DIAMETER: &[&str] = &["InnerDiameter", "Inner Diameter", "Inside Diameter"];
const OUTER_DIAMETER: &[&str] = &["OuterDiameter", "Outer Diameter", "Outside Diameter"];
const LENGTH: &[&str] = &["Length", "Pikkus"];
const FLOW_RATE: &[&str] = &["FlowRate", "Flow Rate", "VolumetricFlowRate", "Vooluhulk"];
const PRESSURE: &[&str] = &["WorkingPressure", "Pressure", "Rõhk", "DesignPressure"];

pub fn mep_elements(model: &dyn ModelAccess, scales: UnitScales) -> Result<Vec<MepElement>, AccessError> {
    Ok(catalog_entities(model, MEP_TYPES)?
        .into_iter()
        .map(|id| {
            let element = flatten(model, id).element;
            let lookup = PropertyLookup::from_sets(&model.property_sets(id), &model.quantity_sets(id));
            let field = |aliases: &[&str]| lookup.find(aliases).cloned();

            MepElement {
                system_type: classify(&element.ifc_type, &element.object_type, &element.name, &lookup),
                nominal_diameter: field(NOMINAL_DIAMETER),
                inner_diameter: field(INNER_DIAMETER),
                outer_diameter: field(OUTER_DIAMETER),
                length: lookup
                    .find(LENGTH)
                    .and_then(Value::as_f64)
                    .map(|raw| round_to(raw * scales.length, 3)),
                flow_rate: field(FLOW_RATE),
                pressure: field(PRESSURE),
                predefined_type: model.attribute(id, "PredefinedType").text(),
                element,
            }
        })
        .collect())
}
