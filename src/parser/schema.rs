//! Entity catalog for the IFC schema versions the model layer understands.
//!
//! The whole `IfcProduct` subtree of IFC2X3 and IFC4 is listed, with the
//! other rooted entities the extractors read (project, type objects) and
//! the address entity. Where the two schemas place an entity under
//! different supertypes, `IFC2X3_SUPERTYPES` holds the IFC2X3 parent.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Schema family of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    Ifc2x3,
    Ifc4,
}

impl SchemaVersion {
    /// `IFC2X3*` selects IFC2X3, anything else (IFC4, IFC4X1, IFC4X3...) the IFC4 catalog.
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Self {
        if identifier.to_ascii_uppercase().starts_with("IFC2X3") {
            SchemaVersion::Ifc2x3
        } else {
            SchemaVersion::Ifc4
        }
    }
}

/// Schema versions an entity is defined in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Schemas {
    All,
    Ifc4,
    Ifc2x3Only,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Predefined {
    None,
    At(usize),
    Ifc4At(usize),
}

#[derive(Debug)]
pub struct EntityDef {
    pub name: &'static str,
    supertype: Option<&'static str>,
    schemas: Schemas,
    predefined: Predefined,
}

const fn def(
    name: &'static str,
    supertype: &'static str,
    schemas: Schemas,
    predefined: Predefined,
) -> EntityDef {
    EntityDef {
        name,
        supertype: Some(supertype),
        schemas,
        predefined,
    }
}

use Predefined::{At, Ifc4At, None as NoType};
use Schemas::{All, Ifc2x3Only, Ifc4};

static ENTITIES: &[EntityDef] = &[
    EntityDef { name: "IfcRoot", supertype: None, schemas: All, predefined: NoType },
    def("IfcObjectDefinition", "IfcRoot", All, NoType),
    def("IfcObject", "IfcObjectDefinition", All, NoType),
    def("IfcProject", "IfcObjectDefinition", All, NoType),
    def("IfcTypeObject", "IfcObjectDefinition", All, NoType),
    def("IfcProduct", "IfcObject", All, NoType),
    def("IfcAnnotation", "IfcProduct", All, NoType),
    def("IfcGrid", "IfcProduct", All, NoType),
    def("IfcProxy", "IfcProduct", All, NoType),
    def("IfcPort", "IfcProduct", All, NoType),
    def("IfcDistributionPort", "IfcPort", All, Ifc4At(8)),
    // Spatial structure
    def("IfcSpatialElement", "IfcProduct", Ifc4, NoType),
    def("IfcSpatialStructureElement", "IfcSpatialElement", All, NoType),
    def("IfcSite", "IfcSpatialStructureElement", All, NoType),
    def("IfcBuilding", "IfcSpatialStructureElement", All, NoType),
    def("IfcBuildingStorey", "IfcSpatialStructureElement", All, NoType),
    def("IfcSpace", "IfcSpatialStructureElement", All, Ifc4At(9)),
    def("IfcSpatialZone", "IfcSpatialElement", Ifc4, Ifc4At(8)),
    def("IfcExternalSpatialStructureElement", "IfcSpatialElement", Ifc4, NoType),
    def("IfcExternalSpatialElement", "IfcExternalSpatialStructureElement", Ifc4, Ifc4At(8)),
    // Structural analysis items
    def("IfcStructuralActivity", "IfcProduct", All, NoType),
    def("IfcStructuralAction", "IfcStructuralActivity", All, NoType),
    def("IfcStructuralPointAction", "IfcStructuralAction", All, NoType),
    def("IfcStructuralCurveAction", "IfcStructuralAction", Ifc4, Ifc4At(11)),
    def("IfcStructuralLinearAction", "IfcStructuralCurveAction", All, Ifc4At(11)),
    def("IfcStructuralLinearActionVarying", "IfcStructuralLinearAction", Ifc2x3Only, NoType),
    def("IfcStructuralSurfaceAction", "IfcStructuralAction", Ifc4, Ifc4At(11)),
    def("IfcStructuralPlanarAction", "IfcStructuralSurfaceAction", All, Ifc4At(11)),
    def("IfcStructuralPlanarActionVarying", "IfcStructuralPlanarAction", Ifc2x3Only, NoType),
    def("IfcStructuralReaction", "IfcStructuralActivity", All, NoType),
    def("IfcStructuralPointReaction", "IfcStructuralReaction", All, NoType),
    def("IfcStructuralCurveReaction", "IfcStructuralReaction", Ifc4, Ifc4At(9)),
    def("IfcStructuralSurfaceReaction", "IfcStructuralReaction", Ifc4, Ifc4At(9)),
    def("IfcStructuralItem", "IfcProduct", All, NoType),
    def("IfcStructuralConnection", "IfcStructuralItem", All, NoType),
    def("IfcStructuralPointConnection", "IfcStructuralConnection", All, NoType),
    def("IfcStructuralCurveConnection", "IfcStructuralConnection", All, NoType),
    def("IfcStructuralSurfaceConnection", "IfcStructuralConnection", All, NoType),
    def("IfcStructuralMember", "IfcStructuralItem", All, NoType),
    def("IfcStructuralCurveMember", "IfcStructuralMember", All, At(7)),
    def("IfcStructuralCurveMemberVarying", "IfcStructuralCurveMember", All, At(7)),
    def("IfcStructuralSurfaceMember", "IfcStructuralMember", All, At(7)),
    def("IfcStructuralSurfaceMemberVarying", "IfcStructuralSurfaceMember", All, At(7)),
    // Elements
    def("IfcElement", "IfcProduct", All, NoType),
    def("IfcBuildingElement", "IfcElement", All, NoType),
    def("IfcBuiltElement", "IfcElement", Ifc4, NoType),
    def("IfcWall", "IfcBuildingElement", All, Ifc4At(8)),
    def("IfcWallStandardCase", "IfcWall", All, Ifc4At(8)),
    def("IfcWallElementedCase", "IfcWall", Ifc4, Ifc4At(8)),
    def("IfcSlab", "IfcBuildingElement", All, At(8)),
    def("IfcSlabStandardCase", "IfcSlab", Ifc4, At(8)),
    def("IfcSlabElementedCase", "IfcSlab", Ifc4, At(8)),
    def("IfcColumn", "IfcBuildingElement", All, Ifc4At(8)),
    def("IfcColumnStandardCase", "IfcColumn", Ifc4, Ifc4At(8)),
    def("IfcBeam", "IfcBuildingElement", All, Ifc4At(8)),
    def("IfcBeamStandardCase", "IfcBeam", Ifc4, Ifc4At(8)),
    def("IfcMember", "IfcBuildingElement", All, Ifc4At(8)),
    def("IfcMemberStandardCase", "IfcMember", Ifc4, Ifc4At(8)),
    def("IfcPlate", "IfcBuildingElement", All, Ifc4At(8)),
    def("IfcPlateStandardCase", "IfcPlate", Ifc4, Ifc4At(8)),
    def("IfcRoof", "IfcBuildingElement", All, Ifc4At(8)),
    def("IfcStair", "IfcBuildingElement", All, Ifc4At(8)),
    def("IfcStairFlight", "IfcBuildingElement", All, Ifc4At(12)),
    def("IfcRamp", "IfcBuildingElement", All, Ifc4At(8)),
    def("IfcRampFlight", "IfcBuildingElement", All, Ifc4At(8)),
    def("IfcRailing", "IfcBuildingElement", All, At(8)),
    def("IfcCovering", "IfcBuildingElement", All, At(8)),
    def("IfcFooting", "IfcBuildingElement", All, At(8)),
    def("IfcPile", "IfcBuildingElement", All, At(8)),
    def("IfcCurtainWall", "IfcBuildingElement", All, Ifc4At(8)),
    def("IfcChimney", "IfcBuildingElement", Ifc4, Ifc4At(8)),
    def("IfcShadingDevice", "IfcBuildingElement", Ifc4, Ifc4At(8)),
    def("IfcBuildingElementProxy", "IfcBuildingElement", All, Ifc4At(8)),
    def("IfcDoor", "IfcBuildingElement", All, Ifc4At(10)),
    def("IfcDoorStandardCase", "IfcDoor", Ifc4, Ifc4At(10)),
    def("IfcWindow", "IfcBuildingElement", All, Ifc4At(10)),
    def("IfcWindowStandardCase", "IfcWindow", Ifc4, Ifc4At(10)),
    def("IfcBuildingElementComponent", "IfcBuildingElement", Ifc2x3Only, NoType),
    def("IfcCivilElement", "IfcElement", Ifc4, NoType),
    def("IfcElementComponent", "IfcElement", All, NoType),
    def("IfcBuildingElementPart", "IfcElementComponent", All, Ifc4At(8)),
    def("IfcDiscreteAccessory", "IfcElementComponent", All, Ifc4At(8)),
    def("IfcFastener", "IfcElementComponent", All, Ifc4At(8)),
    def("IfcMechanicalFastener", "IfcElementComponent", All, Ifc4At(10)),
    def("IfcVibrationIsolator", "IfcElementComponent", Ifc4, Ifc4At(8)),
    def("IfcReinforcingElement", "IfcElementComponent", All, NoType),
    def("IfcReinforcingBar", "IfcReinforcingElement", All, Ifc4At(12)),
    def("IfcReinforcingMesh", "IfcReinforcingElement", All, Ifc4At(17)),
    def("IfcTendon", "IfcReinforcingElement", All, At(9)),
    def("IfcTendonAnchor", "IfcReinforcingElement", All, Ifc4At(9)),
    def("IfcElectricalElement", "IfcElement", Ifc2x3Only, NoType),
    def("IfcEquipmentElement", "IfcElement", Ifc2x3Only, NoType),
    def("IfcFurnishingElement", "IfcElement", All, NoType),
    def("IfcFurniture", "IfcFurnishingElement", Ifc4, Ifc4At(8)),
    def("IfcSystemFurnitureElement", "IfcFurnishingElement", Ifc4, Ifc4At(8)),
    def("IfcElementAssembly", "IfcElement", All, At(9)),
    def("IfcGeographicElement", "IfcElement", Ifc4, Ifc4At(8)),
    def("IfcTransportElement", "IfcElement", All, Ifc4At(8)),
    def("IfcVirtualElement", "IfcElement", All, NoType),
    def("IfcFeatureElement", "IfcElement", All, NoType),
    def("IfcFeatureElementAddition", "IfcFeatureElement", All, NoType),
    def("IfcProjectionElement", "IfcFeatureElementAddition", All, Ifc4At(8)),
    def("IfcFeatureElementSubtraction", "IfcFeatureElement", All, NoType),
    def("IfcOpeningElement", "IfcFeatureElementSubtraction", All, Ifc4At(8)),
    def("IfcOpeningStandardCase", "IfcOpeningElement", Ifc4, Ifc4At(8)),
    def("IfcVoidingFeature", "IfcFeatureElementSubtraction", Ifc4, Ifc4At(8)),
    def("IfcEdgeFeature", "IfcFeatureElementSubtraction", Ifc2x3Only, NoType),
    def("IfcChamferEdgeFeature", "IfcEdgeFeature", Ifc2x3Only, NoType),
    def("IfcRoundedEdgeFeature", "IfcEdgeFeature", Ifc2x3Only, NoType),
    def("IfcSurfaceFeature", "IfcFeatureElement", Ifc4, Ifc4At(8)),
    // Distribution elements
    def("IfcDistributionElement", "IfcElement", All, NoType),
    def("IfcDistributionControlElement", "IfcDistributionElement", All, NoType),
    def("IfcActuator", "IfcDistributionControlElement", Ifc4, Ifc4At(8)),
    def("IfcAlarm", "IfcDistributionControlElement", Ifc4, Ifc4At(8)),
    def("IfcController", "IfcDistributionControlElement", Ifc4, Ifc4At(8)),
    def("IfcFlowInstrument", "IfcDistributionControlElement", Ifc4, Ifc4At(8)),
    def("IfcProtectiveDeviceTrippingUnit", "IfcDistributionControlElement", Ifc4, Ifc4At(8)),
    def("IfcSensor", "IfcDistributionControlElement", Ifc4, Ifc4At(8)),
    def("IfcUnitaryControlElement", "IfcDistributionControlElement", Ifc4, Ifc4At(8)),
    def("IfcDistributionFlowElement", "IfcDistributionElement", All, NoType),
    def("IfcDistributionChamberElement", "IfcDistributionFlowElement", All, Ifc4At(8)),
    def("IfcFlowSegment", "IfcDistributionFlowElement", All, NoType),
    def("IfcPipeSegment", "IfcFlowSegment", Ifc4, Ifc4At(8)),
    def("IfcDuctSegment", "IfcFlowSegment", Ifc4, Ifc4At(8)),
    def("IfcCableSegment", "IfcFlowSegment", Ifc4, Ifc4At(8)),
    def("IfcCableCarrierSegment", "IfcFlowSegment", Ifc4, Ifc4At(8)),
    def("IfcFlowFitting", "IfcDistributionFlowElement", All, NoType),
    def("IfcPipeFitting", "IfcFlowFitting", Ifc4, Ifc4At(8)),
    def("IfcDuctFitting", "IfcFlowFitting", Ifc4, Ifc4At(8)),
    def("IfcCableFitting", "IfcFlowFitting", Ifc4, Ifc4At(8)),
    def("IfcCableCarrierFitting", "IfcFlowFitting", Ifc4, Ifc4At(8)),
    def("IfcJunctionBox", "IfcFlowFitting", Ifc4, Ifc4At(8)),
    def("IfcFlowTerminal", "IfcDistributionFlowElement", All, NoType),
    def("IfcAirTerminal", "IfcFlowTerminal", Ifc4, Ifc4At(8)),
    def("IfcAudioVisualAppliance", "IfcFlowTerminal", Ifc4, Ifc4At(8)),
    def("IfcCommunicationsAppliance", "IfcFlowTerminal", Ifc4, Ifc4At(8)),
    def("IfcElectricAppliance", "IfcFlowTerminal", Ifc4, Ifc4At(8)),
    def("IfcFireSuppressionTerminal", "IfcFlowTerminal", Ifc4, Ifc4At(8)),
    def("IfcLamp", "IfcFlowTerminal", Ifc4, Ifc4At(8)),
    def("IfcLightFixture", "IfcFlowTerminal", Ifc4, Ifc4At(8)),
    def("IfcMedicalDevice", "IfcFlowTerminal", Ifc4, Ifc4At(8)),
    def("IfcOutlet", "IfcFlowTerminal", Ifc4, Ifc4At(8)),
    def("IfcSanitaryTerminal", "IfcFlowTerminal", Ifc4, Ifc4At(8)),
    def("IfcSpaceHeater", "IfcFlowTerminal", Ifc4, Ifc4At(8)),
    def("IfcStackTerminal", "IfcFlowTerminal", Ifc4, Ifc4At(8)),
    def("IfcWasteTerminal", "IfcFlowTerminal", Ifc4, Ifc4At(8)),
    def("IfcFlowController", "IfcDistributionFlowElement", All, NoType),
    def("IfcAirTerminalBox", "IfcFlowController", Ifc4, Ifc4At(8)),
    def("IfcDamper", "IfcFlowController", Ifc4, Ifc4At(8)),
    def("IfcElectricDistributionBoard", "IfcFlowController", Ifc4, Ifc4At(8)),
    def("IfcElectricDistributionPoint", "IfcFlowController", Ifc2x3Only, NoType),
    def("IfcElectricTimeControl", "IfcFlowController", Ifc4, Ifc4At(8)),
    def("IfcFlowMeter", "IfcFlowController", Ifc4, Ifc4At(8)),
    def("IfcProtectiveDevice", "IfcFlowController", Ifc4, Ifc4At(8)),
    def("IfcSwitchingDevice", "IfcFlowController", Ifc4, Ifc4At(8)),
    def("IfcValve", "IfcFlowController", Ifc4, Ifc4At(8)),
    def("IfcFlowMovingDevice", "IfcDistributionFlowElement", All, NoType),
    def("IfcCompressor", "IfcFlowMovingDevice", Ifc4, Ifc4At(8)),
    def("IfcFan", "IfcFlowMovingDevice", Ifc4, Ifc4At(8)),
    def("IfcPump", "IfcFlowMovingDevice", Ifc4, Ifc4At(8)),
    def("IfcFlowStorageDevice", "IfcDistributionFlowElement", All, NoType),
    def("IfcElectricFlowStorageDevice", "IfcFlowStorageDevice", Ifc4, Ifc4At(8)),
    def("IfcTank", "IfcFlowStorageDevice", Ifc4, Ifc4At(8)),
    def("IfcFlowTreatmentDevice", "IfcDistributionFlowElement", All, NoType),
    def("IfcDuctSilencer", "IfcFlowTreatmentDevice", Ifc4, Ifc4At(8)),
    def("IfcFilter", "IfcFlowTreatmentDevice", Ifc4, Ifc4At(8)),
    def("IfcInterceptor", "IfcFlowTreatmentDevice", Ifc4, Ifc4At(8)),
    def("IfcEnergyConversionDevice", "IfcDistributionFlowElement", All, NoType),
    def("IfcAirToAirHeatRecovery", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcBoiler", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcBurner", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcChiller", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcCoil", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcCondenser", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcCooledBeam", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcCoolingTower", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcElectricGenerator", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcElectricMotor", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcEngine", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcEvaporativeCooler", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcEvaporator", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcHeatExchanger", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcHumidifier", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcMotorConnection", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcSolarDevice", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcTransformer", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcTubeBundle", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    def("IfcUnitaryEquipment", "IfcEnergyConversionDevice", Ifc4, Ifc4At(8)),
    // Not rooted entities read through named attributes
    EntityDef { name: "IfcAddress", supertype: None, schemas: All, predefined: NoType },
    def("IfcPostalAddress", "IfcAddress", All, NoType),
];

/// IFC2X3 parents of entities that IFC4 moved in the tree.
const IFC2X3_SUPERTYPES: &[(&str, &str)] = &[
    ("IfcSpatialStructureElement", "IfcProduct"),
    ("IfcStructuralLinearAction", "IfcStructuralAction"),
    ("IfcStructuralPlanarAction", "IfcStructuralAction"),
    ("IfcBuildingElementPart", "IfcBuildingElementComponent"),
    ("IfcReinforcingElement", "IfcBuildingElementComponent"),
    ("IfcMechanicalFastener", "IfcFastener"),
];

/// Named attribute positions, declared on the entity that introduces them.
const ATTRIBUTES: &[(&str, &str, usize)] = &[
    ("IfcRoot", "GlobalId", 0),
    ("IfcRoot", "Name", 2),
    ("IfcRoot", "Description", 3),
    ("IfcObject", "ObjectType", 4),
    ("IfcProject", "ObjectType", 4),
    ("IfcProject", "LongName", 5),
    ("IfcProject", "Phase", 6),
    ("IfcProject", "UnitsInContext", 8),
    ("IfcTypeObject", "ApplicableOccurrence", 4),
    ("IfcTypeObject", "HasPropertySets", 5),
    ("IfcElement", "Tag", 7),
    ("IfcSpatialStructureElement", "LongName", 7),
    ("IfcBuilding", "BuildingAddress", 11),
    ("IfcBuildingStorey", "Elevation", 9),
    ("IfcDoor", "OverallHeight", 8),
    ("IfcDoor", "OverallWidth", 9),
    ("IfcWindow", "OverallHeight", 8),
    ("IfcWindow", "OverallWidth", 9),
    ("IfcPostalAddress", "AddressLines", 4),
    ("IfcPostalAddress", "Town", 6),
    ("IfcPostalAddress", "PostalCode", 8),
    ("IfcPostalAddress", "Country", 9),
];

static BY_UPPER_NAME: Lazy<HashMap<String, &'static EntityDef>> = Lazy::new(|| {
    ENTITIES
        .iter()
        .map(|def| (def.name.to_ascii_uppercase(), def))
        .collect()
});

/// Looks up an entity definition by name, case-insensitively.
///
/// Type objects are named `Ifc*Type` / `Ifc*Style` in both schemas and are
/// resolved as `IfcTypeObject` when not listed individually.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static EntityDef> {
    let upper = name.to_ascii_uppercase();
    if let Some(def) = BY_UPPER_NAME.get(&upper) {
        return Some(def);
    }
    let is_type_object = (upper.starts_with("IFC") && !upper.starts_with("IFCREL") && upper.ends_with("TYPE"))
        || upper == "IFCDOORSTYLE"
        || upper == "IFCWINDOWSTYLE";
    if is_type_object {
        return BY_UPPER_NAME.get("IFCTYPEOBJECT").copied();
    }
    None
}

impl EntityDef {
    #[must_use]
    pub fn exists_in(&self, schema: SchemaVersion) -> bool {
        match self.schemas {
            Schemas::All => true,
            Schemas::Ifc4 => schema == SchemaVersion::Ifc4,
            Schemas::Ifc2x3Only => schema == SchemaVersion::Ifc2x3,
        }
    }

    fn supertype_in(&self, schema: SchemaVersion) -> Option<&'static EntityDef> {
        let moved = (schema == SchemaVersion::Ifc2x3)
            .then(|| IFC2X3_SUPERTYPES.iter().find(|(name, _)| *name == self.name))
            .flatten();
        match moved {
            Some((_, parent)) => lookup(parent),
            None => self.supertype.and_then(lookup),
        }
    }

    /// Walks from this entity up to its root.
    fn ancestry(&'static self, schema: SchemaVersion) -> impl Iterator<Item = &'static EntityDef> {
        std::iter::successors(Some(self), move |def| def.supertype_in(schema))
    }

    #[must_use]
    pub fn is_subtype_of(&'static self, ancestor: &EntityDef, schema: SchemaVersion) -> bool {
        self.ancestry(schema).any(|def| def.name == ancestor.name)
    }

    /// Position of a named attribute for this entity in `schema`.
    #[must_use]
    pub fn attribute_index(&'static self, attribute: &str, schema: SchemaVersion) -> Option<usize> {
        if attribute == "PredefinedType" {
            return match self.predefined {
                Predefined::At(index) => Some(index),
                Predefined::Ifc4At(index) if schema == SchemaVersion::Ifc4 => Some(index),
                _ => None,
            };
        }
        self.ancestry(schema).find_map(|def| {
            ATTRIBUTES
                .iter()
                .find(|(owner, name, _)| *owner == def.name && *name == attribute)
                .map(|(_, _, index)| *index)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("IFCPIPESEGMENT").map(|d| d.name), Some("IfcPipeSegment"));
        assert_eq!(lookup("IfcWall").map(|d| d.name), Some("IfcWall"));
        assert!(lookup("IFCPROPERTYSET").is_none());
    }

    #[test]
    fn test_type_objects_resolve_by_naming_convention() {
        assert_eq!(lookup("IFCWALLTYPE").map(|d| d.name), Some("IfcTypeObject"));
        assert_eq!(lookup("IFCDOORSTYLE").map(|d| d.name), Some("IfcTypeObject"));
        assert!(lookup("IFCRELDEFINESBYTYPE").is_none());
        assert!(lookup("IFCSURFACESTYLE").is_none());
    }

    #[test]
    fn test_mep_subtypes_absent_in_ifc2x3() {
        let pipe = lookup("IfcPipeSegment").unwrap();
        assert!(!pipe.exists_in(SchemaVersion::Ifc2x3));
        assert!(pipe.exists_in(SchemaVersion::Ifc4));
        assert!(lookup("IfcFlowSegment").unwrap().exists_in(SchemaVersion::Ifc2x3));
    }

    #[test]
    fn test_subtype_walk() {
        let product = lookup("IfcProduct").unwrap();
        let wall_sc = lookup("IfcWallStandardCase").unwrap();
        let space = lookup("IfcSpace").unwrap();
        assert!(wall_sc.is_subtype_of(lookup("IfcWall").unwrap(), SchemaVersion::Ifc4));
        assert!(space.is_subtype_of(product, SchemaVersion::Ifc2x3));
        assert!(space.is_subtype_of(product, SchemaVersion::Ifc4));
        assert!(!lookup("IfcWallType").unwrap().is_subtype_of(product, SchemaVersion::Ifc4));
    }

    #[test]
    fn test_catalog_supertypes_cover_their_subtypes() {
        let cases = [
            ("IfcEnergyConversionDevice", "IfcCooledBeam"),
            ("IfcEnergyConversionDevice", "IfcElectricMotor"),
            ("IfcEnergyConversionDevice", "IfcElectricGenerator"),
            ("IfcEnergyConversionDevice", "IfcBurner"),
            ("IfcEnergyConversionDevice", "IfcSolarDevice"),
            ("IfcEnergyConversionDevice", "IfcTubeBundle"),
            ("IfcEnergyConversionDevice", "IfcEvaporativeCooler"),
            ("IfcFlowTerminal", "IfcCommunicationsAppliance"),
            ("IfcFlowTerminal", "IfcAudioVisualAppliance"),
            ("IfcFlowTerminal", "IfcMedicalDevice"),
            ("IfcFlowController", "IfcElectricTimeControl"),
            ("IfcFlowStorageDevice", "IfcElectricFlowStorageDevice"),
            ("IfcProduct", "IfcDiscreteAccessory"),
            ("IfcProduct", "IfcReinforcingBar"),
            ("IfcProduct", "IfcReinforcingMesh"),
            ("IfcProduct", "IfcTendon"),
            ("IfcProduct", "IfcMechanicalFastener"),
            ("IfcProduct", "IfcFastener"),
            ("IfcProduct", "IfcBuildingElementPart"),
            ("IfcProduct", "IfcVirtualElement"),
            ("IfcProduct", "IfcTransportElement"),
            ("IfcProduct", "IfcGeographicElement"),
            ("IfcProduct", "IfcStructuralCurveMember"),
        ];
        for (ancestor, name) in cases {
            let entity = lookup(name).unwrap();
            assert!(entity.exists_in(SchemaVersion::Ifc4), "{name}");
            assert!(
                entity.is_subtype_of(lookup(ancestor).unwrap(), SchemaVersion::Ifc4),
                "{name} under {ancestor}"
            );
        }
    }

    #[test]
    fn test_ifc2x3_tree_differences() {
        let component = lookup("IfcBuildingElementComponent").unwrap();
        let bar = lookup("IfcReinforcingBar").unwrap();
        assert!(bar.is_subtype_of(component, SchemaVersion::Ifc2x3));
        assert!(bar.is_subtype_of(lookup("IfcBuildingElement").unwrap(), SchemaVersion::Ifc2x3));
        assert!(bar.is_subtype_of(lookup("IfcElementComponent").unwrap(), SchemaVersion::Ifc4));
        assert!(!component.exists_in(SchemaVersion::Ifc4));

        let fastener = lookup("IfcFastener").unwrap();
        let mechanical = lookup("IfcMechanicalFastener").unwrap();
        assert!(mechanical.is_subtype_of(fastener, SchemaVersion::Ifc2x3));
        assert!(!mechanical.is_subtype_of(fastener, SchemaVersion::Ifc4));

        let point = lookup("IfcElectricDistributionPoint").unwrap();
        assert!(point.exists_in(SchemaVersion::Ifc2x3));
        assert!(!point.exists_in(SchemaVersion::Ifc4));
        assert!(point.is_subtype_of(lookup("IfcFlowController").unwrap(), SchemaVersion::Ifc2x3));
    }

    #[test]
    fn test_attribute_positions() {
        let door = lookup("IfcDoor").unwrap();
        assert_eq!(door.attribute_index("GlobalId", SchemaVersion::Ifc4), Some(0));
        assert_eq!(door.attribute_index("Tag", SchemaVersion::Ifc4), Some(7));
        assert_eq!(door.attribute_index("OverallWidth", SchemaVersion::Ifc4), Some(9));
        assert_eq!(door.attribute_index("PredefinedType", SchemaVersion::Ifc4), Some(10));
        assert_eq!(door.attribute_index("PredefinedType", SchemaVersion::Ifc2x3), None);

        let slab = lookup("IfcSlab").unwrap();
        assert_eq!(slab.attribute_index("PredefinedType", SchemaVersion::Ifc2x3), Some(8));

        let mesh = lookup("IfcReinforcingMesh").unwrap();
        assert_eq!(mesh.attribute_index("PredefinedType", SchemaVersion::Ifc4), Some(17));
        assert_eq!(mesh.attribute_index("Tag", SchemaVersion::Ifc2x3), Some(7));

        let flow_segment = lookup("IfcFlowSegment").unwrap();
        assert_eq!(flow_segment.attribute_index("PredefinedType", SchemaVersion::Ifc4), None);
        assert_eq!(flow_segment.attribute_index("OverallWidth", SchemaVersion::Ifc4), None);
    }
}
