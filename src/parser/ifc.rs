use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{AccessError, ParseError};
use crate::model::{
    Attribute, EntityId, Material, MaterialAssignment, MaterialLayerSet, MaterialProfileSet,
    ModelAccess, PropertySet, UnitKind,
};
use crate::parser::schema::{self, EntityDef, SchemaVersion};
use crate::parser::step::{StepEntity, StepFile, StepHeader, StepValue};

/// Guards the unit-conversion and aggregation walks against cyclic references.
const MAX_DEPTH: usize = 16;

/// An IFC model loaded from STEP text, with its relationships indexed.
#[derive(Debug)]
pub struct StepModel {
    file: StepFile,
    schema: SchemaVersion,
    schema_identifier: String,
    containment: HashMap<EntityId, EntityId>, // element → spatial structure
    aggregation: HashMap<EntityId, EntityId>, // part → whole
    types: HashMap<EntityId, EntityId>,       // occurrence → type object
    materials: HashMap<EntityId, EntityId>,   // object → material definition
    definitions: HashMap<EntityId, Vec<EntityId>>, // object → property definitions
}

/// Loads an IFC file from disk.
///
/// # Errors
///
/// Returns [`ParseError::FileTooLarge`] if the file exceeds `max_bytes`.
/// Returns [`ParseError::FileRead`] if the file cannot be read.
/// Returns [`ParseError::InvalidStep`] if the STEP format is malformed.
///
/// # Example
///
/// ```no_run
/// use ifc_quantities::model::ModelAccess;
/// use ifc_quantities::parser::open_model;
///
/// let model = open_model("model.ifc", None)?;
/// println!("Schema: {}", model.schema());
/// # Ok::<(), ifc_quantities::error::ParseError>(())
/// ```
pub fn open_model<P: AsRef<Path>>(path: P, max_bytes: Option<u64>) -> Result<StepModel, ParseError> {
    let path = path.as_ref();
    let read_error = |source| ParseError::FileRead {
        path: path.to_path_buf(),
        source,
    };

    if let Some(limit) = max_bytes {
        let size = std::fs::metadata(path).map_err(read_error)?.len();
        if size > limit {
            return Err(ParseError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: size.div_ceil(1024 * 1024),
                max_mb: limit / (1024 * 1024),
            });
        }
    }

    let bytes = std::fs::read(path).map_err(read_error)?;
    StepModel::from_bytes(&bytes)
}

impl StepModel {
    /// Loads a model from raw file bytes; non-UTF-8 bytes are replaced.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        Self::parse(&String::from_utf8_lossy(bytes))
    }

    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let file = StepFile::parse(content)?;
        let schema_identifier = file.header.schema.first().cloned().unwrap_or_default();
        let schema = SchemaVersion::from_identifier(&schema_identifier);

        let mut model = StepModel {
            file,
            schema,
            schema_identifier,
            containment: HashMap::new(),
            aggregation: HashMap::new(),
            types: HashMap::new(),
            materials: HashMap::new(),
            definitions: HashMap::new(),
        };
        model.index_relationships();

        debug!(
            schema = %model.schema_identifier,
            entities = model.file.entity_count(),
            contained = model.containment.len(),
            typed = model.types.len(),
            "Loaded STEP model"
        );

        Ok(model)
    }

    fn index_relationships(&mut self) {
        // Index 4 = related objects, index 5 = relating object for all of these
        // except IfcRelAggregates, where the two are swapped.
        for &rel_id in self.file.ids_of_type("IFCRELCONTAINEDINSPATIALSTRUCTURE") {
            if let Some(rel) = self.file.get_entity(rel_id) {
                if let Some(structure) = rel.reference_at(5) {
                    for element in rel.references_at(4) {
                        self.containment.insert(element, structure);
                    }
                }
            }
        }

        for &rel_id in self.file.ids_of_type("IFCRELAGGREGATES") {
            if let Some(rel) = self.file.get_entity(rel_id) {
                if let Some(whole) = rel.reference_at(4) {
                    for part in rel.references_at(5) {
                        self.aggregation.insert(part, whole);
                    }
                }
            }
        }

        for &rel_id in self.file.ids_of_type("IFCRELDEFINESBYTYPE") {
            if let Some(rel) = self.file.get_entity(rel_id) {
                if let Some(type_id) = rel.reference_at(5) {
                    for occurrence in rel.references_at(4) {
                        self.types.insert(occurrence, type_id);
                    }
                }
            }
        }

        for &rel_id in self.file.ids_of_type("IFCRELASSOCIATESMATERIAL") {
            if let Some(rel) = self.file.get_entity(rel_id) {
                if let Some(material) = rel.reference_at(5) {
                    for object in rel.references_at(4) {
                        self.materials.insert(object, material);
                    }
                }
            }
        }

        for &rel_id in self.file.ids_of_type("IFCRELDEFINESBYPROPERTIES") {
            if let Some(rel) = self.file.get_entity(rel_id) {
                if let Some(definition) = rel.reference_at(5) {
                    for object in rel.references_at(4) {
                        self.definitions.entry(object).or_default().push(definition);
                    }
                }
            }
        }
    }

    fn entity(&self, id: EntityId) -> Result<&StepEntity, AccessError> {
        self.file
            .get_entity(id)
            .ok_or(AccessError::MissingEntity { id })
    }

    fn def_of(&self, entity: &StepEntity) -> Option<&'static EntityDef> {
        schema::lookup(&entity.entity_type).filter(|def| def.exists_in(self.schema))
    }

    fn is_spatial(&self, id: EntityId) -> bool {
        let spatial = schema::lookup("IfcSpatialStructureElement");
        match (self.file.get_entity(id).and_then(|e| self.def_of(e)), spatial) {
            (Some(def), Some(spatial)) => def.is_subtype_of(spatial, self.schema),
            _ => false,
        }
    }

    /// Property definitions of an object: those of its type object first,
    /// then its own, each in file order.
    fn definitions_of(&self, id: EntityId) -> Vec<&StepEntity> {
        let mut ids = Vec::new();
        if let Some(&type_id) = self.types.get(&id) {
            if let Attribute::Value(value) = self.attribute(type_id, "HasPropertySets") {
                ids.extend(value.references());
            }
            if let Some(type_defs) = self.definitions.get(&type_id) {
                ids.extend(type_defs.iter().copied());
            }
        }
        if let Some(own) = self.definitions.get(&id) {
            ids.extend(own.iter().copied());
        }
        ids.into_iter()
            .filter_map(|def_id| self.file.get_entity(def_id))
            .collect()
    }

    fn decode_property_set(&self, pset: &StepEntity) -> PropertySet {
        // IfcPropertySet: [2]=Name, [4]=HasProperties
        let mut values = IndexMap::new();
        for prop in pset
            .references_at(4)
            .into_iter()
            .filter_map(|id| self.file.get_entity(id))
        {
            let Some(name) = prop.string_at(0) else {
                continue;
            };
            let value = match prop.entity_type.as_str() {
                // [2]=NominalValue
                "IFCPROPERTYSINGLEVALUE" => prop.get(2).cloned(),
                // [2]=EnumerationValues / ListValues
                "IFCPROPERTYENUMERATEDVALUE" | "IFCPROPERTYLISTVALUE" => prop.get(2).cloned(),
                // [2]=UpperBound, [3]=LowerBound, [5]=SetPoint (IFC4)
                "IFCPROPERTYBOUNDEDVALUE" => [5, 2, 3]
                    .iter()
                    .filter_map(|&i| prop.get(i))
                    .find(|v| !v.is_null())
                    .cloned(),
                _ => None,
            };
            if let Some(value) = value {
                values.insert(name.to_string(), value);
            }
        }

        PropertySet {
            name: pset.string_at(2).unwrap_or_default().to_string(),
            values,
        }
    }

    fn decode_quantity_set(&self, qset: &StepEntity) -> PropertySet {
        // IfcElementQuantity: [2]=Name, [5]=Quantities
        let mut values = IndexMap::new();
        for quantity in qset
            .references_at(5)
            .into_iter()
            .filter_map(|id| self.file.get_entity(id))
        {
            let is_simple_quantity = matches!(
                quantity.entity_type.as_str(),
                "IFCQUANTITYLENGTH"
                    | "IFCQUANTITYAREA"
                    | "IFCQUANTITYVOLUME"
                    | "IFCQUANTITYCOUNT"
                    | "IFCQUANTITYWEIGHT"
                    | "IFCQUANTITYTIME"
            );
            if !is_simple_quantity {
                continue;
            }
            // [0]=Name, [3]=Value for every simple quantity
            if let (Some(name), Some(value)) = (quantity.string_at(0), quantity.get(3)) {
                values.insert(name.to_string(), value.clone());
            }
        }

        PropertySet {
            name: qset.string_at(2).unwrap_or_default().to_string(),
            values,
        }
    }

    fn decode_material(&self, id: EntityId) -> Result<MaterialAssignment, AccessError> {
        let entity = self.entity(id)?;
        let assignment = match entity.entity_type.as_str() {
            "IFCMATERIAL" => MaterialAssignment::Material(self.decode_single_material(id)?),
            "IFCMATERIALLAYERSET" => MaterialAssignment::LayerSet(self.decode_layer_set(id)?),
            "IFCMATERIALLAYERSETUSAGE" => MaterialAssignment::LayerSetUsage(
                entity
                    .reference_at(0)
                    .map(|set| self.decode_layer_set(set))
                    .transpose()?,
            ),
            "IFCMATERIALLIST" => MaterialAssignment::List(
                entity
                    .references_at(0)
                    .into_iter()
                    .map(|m| self.decode_single_material(m))
                    .collect::<Result<_, _>>()?,
            ),
            // [2]=MaterialConstituents, each with [2]=Material
            "IFCMATERIALCONSTITUENTSET" => MaterialAssignment::ConstituentSet(
                self.decode_members(entity, 2, &["IFCMATERIALCONSTITUENT"], 2)?,
            ),
            "IFCMATERIALPROFILESET" => MaterialAssignment::ProfileSet(self.decode_profile_set(id)?),
            "IFCMATERIALPROFILESETUSAGE" | "IFCMATERIALPROFILESETUSAGETAPERING" => {
                MaterialAssignment::ProfileSetUsage(
                    entity
                        .reference_at(0)
                        .map(|set| self.decode_profile_set(set))
                        .transpose()?,
                )
            }
            other => {
                return Err(AccessError::UnexpectedShape {
                    id,
                    expected: "material definition",
                    found: other.to_string(),
                })
            }
        };
        Ok(assignment)
    }

    fn decode_single_material(&self, id: EntityId) -> Result<Material, AccessError> {
        let entity = self.entity(id)?;
        if entity.entity_type != "IFCMATERIAL" {
            return Err(AccessError::UnexpectedShape {
                id,
                expected: "IFCMATERIAL",
                found: entity.entity_type.clone(),
            });
        }
        Ok(Material {
            name: entity.string_at(0).map(str::to_string),
        })
    }

    fn decode_layer_set(&self, id: EntityId) -> Result<MaterialLayerSet, AccessError> {
        let entity = self.expect_type(id, "IFCMATERIALLAYERSET")?;
        // [0]=MaterialLayers, each with [0]=Material
        Ok(MaterialLayerSet {
            layers: self.decode_members(
                entity,
                0,
                &["IFCMATERIALLAYER", "IFCMATERIALLAYERWITHOFFSETS"],
                0,
            )?,
        })
    }

    fn decode_profile_set(&self, id: EntityId) -> Result<MaterialProfileSet, AccessError> {
        let entity = self.expect_type(id, "IFCMATERIALPROFILESET")?;
        // [2]=MaterialProfiles, each with [2]=Material
        Ok(MaterialProfileSet {
            profiles: self.decode_members(
                entity,
                2,
                &["IFCMATERIALPROFILE", "IFCMATERIALPROFILEWITHOFFSETS"],
                2,
            )?,
        })
    }

    /// Decodes the optional material of each member listed at `list_index`.
    fn decode_members(
        &self,
        owner: &StepEntity,
        list_index: usize,
        member_types: &[&str],
        material_index: usize,
    ) -> Result<Vec<Option<Material>>, AccessError> {
        owner
            .references_at(list_index)
            .into_iter()
            .map(|member_id| {
                let member = self.entity(member_id)?;
                if !member_types.contains(&member.entity_type.as_str()) {
                    return Err(AccessError::UnexpectedShape {
                        id: member_id,
                        expected: "material set member",
                        found: member.entity_type.clone(),
                    });
                }
                member
                    .reference_at(material_index)
                    .map(|m| self.decode_single_material(m))
                    .transpose()
            })
            .collect()
    }

    fn expect_type(&self, id: EntityId, expected: &'static str) -> Result<&StepEntity, AccessError> {
        let entity = self.entity(id)?;
        if entity.entity_type == expected {
            Ok(entity)
        } else {
            Err(AccessError::UnexpectedShape {
                id,
                expected,
                found: entity.entity_type.clone(),
            })
        }
    }

    fn unit_entity_scale(
        &self,
        unit: &StepEntity,
        kind: UnitKind,
        depth: usize,
    ) -> Result<f64, AccessError> {
        if depth > MAX_DEPTH {
            return Err(AccessError::UnexpectedShape {
                id: unit.id,
                expected: "finite unit conversion chain",
                found: unit.entity_type.clone(),
            });
        }

        match unit.entity_type.as_str() {
            // [2]=Prefix
            "IFCSIUNIT" => Ok(match unit.get(2) {
                Some(StepValue::Enum(prefix)) => get_si_prefix_multiplier(prefix).powi(kind.power()),
                _ => 1.0,
            }),
            // [3]=ConversionFactor → IfcMeasureWithUnit([0]=ValueComponent, [1]=UnitComponent)
            "IFCCONVERSIONBASEDUNIT" | "IFCCONVERSIONBASEDUNITWITHOFFSET" => {
                let factor_id = unit.reference_at(3).ok_or_else(|| AccessError::UnexpectedShape {
                    id: unit.id,
                    expected: "conversion factor reference",
                    found: unit.entity_type.clone(),
                })?;
                let factor = self.expect_type(factor_id, "IFCMEASUREWITHUNIT")?;
                let value = factor.get(0).and_then(StepValue::as_f64).ok_or_else(|| {
                    AccessError::UnexpectedShape {
                        id: factor_id,
                        expected: "numeric value component",
                        found: factor.entity_type.clone(),
                    }
                })?;
                let base = match factor.reference_at(1) {
                    Some(base_id) => self.unit_entity_scale(self.entity(base_id)?, kind, depth + 1)?,
                    None => 1.0,
                };
                Ok(value * base)
            }
            other => Err(AccessError::UnexpectedShape {
                id: unit.id,
                expected: "IFCSIUNIT or IFCCONVERSIONBASEDUNIT",
                found: other.to_string(),
            }),
        }
    }
}

impl ModelAccess for StepModel {
    fn schema(&self) -> &str {
        &self.schema_identifier
    }

    fn header(&self) -> &StepHeader {
        &self.file.header
    }

    fn entities_of_type(&self, tag: &str) -> Result<Vec<EntityId>, AccessError> {
        let requested = schema::lookup(tag)
            .filter(|def| def.exists_in(self.schema))
            .ok_or_else(|| AccessError::UnknownEntityType {
                tag: tag.to_string(),
                schema: self.schema_identifier.clone(),
            })?;

        let mut ids: Vec<EntityId> = self
            .file
            .entity_types()
            .filter(|entity_type| {
                schema::lookup(entity_type)
                    .filter(|def| def.exists_in(self.schema))
                    .is_some_and(|def| def.is_subtype_of(requested, self.schema))
            })
            .flat_map(|entity_type| self.file.ids_of_type(entity_type).iter().copied())
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn ifc_type(&self, id: EntityId) -> Option<&str> {
        let entity = self.file.get_entity(id)?;
        match schema::lookup(&entity.entity_type) {
            Some(def) if def.name != "IfcTypeObject" => Some(def.name),
            _ => Some(entity.entity_type.as_str()),
        }
    }

    fn attribute(&self, id: EntityId, name: &str) -> Attribute<'_> {
        let Some(entity) = self.file.get_entity(id) else {
            return Attribute::Absent;
        };
        let Some(index) = self
            .def_of(entity)
            .and_then(|def| def.attribute_index(name, self.schema))
        else {
            return Attribute::Absent;
        };
        match entity.get(index) {
            Some(value) if !value.is_null() => Attribute::Value(value),
            _ => Attribute::Unset,
        }
    }

    fn container(&self, id: EntityId) -> Option<EntityId> {
        let mut current = id;
        for _ in 0..MAX_DEPTH {
            if let Some(&structure) = self.containment.get(&current) {
                return Some(structure);
            }
            let whole = *self.aggregation.get(&current)?;
            if self.is_spatial(whole) {
                return Some(whole);
            }
            current = whole;
        }
        None
    }

    fn type_definition(&self, id: EntityId) -> Option<EntityId> {
        self.types.get(&id).copied()
    }

    fn material(&self, id: EntityId) -> Result<Option<MaterialAssignment>, AccessError> {
        let associated = self
            .materials
            .get(&id)
            .or_else(|| self.types.get(&id).and_then(|t| self.materials.get(t)));
        associated.map(|&m| self.decode_material(m)).transpose()
    }

    fn property_sets(&self, id: EntityId) -> Vec<PropertySet> {
        self.definitions_of(id)
            .into_iter()
            .filter(|def| def.entity_type == "IFCPROPERTYSET")
            .map(|pset| self.decode_property_set(pset))
            .collect()
    }

    fn quantity_sets(&self, id: EntityId) -> Vec<PropertySet> {
        self.definitions_of(id)
            .into_iter()
            .filter(|def| def.entity_type == "IFCELEMENTQUANTITY")
            .map(|qset| self.decode_quantity_set(qset))
            .collect()
    }

    fn unit_scale(&self, kind: UnitKind) -> Result<f64, AccessError> {
        let not_declared = AccessError::UnitNotDeclared { kind };
        let project_id = self
            .file
            .ids_of_type("IFCPROJECT")
            .first()
            .copied()
            .ok_or_else(|| not_declared.clone())?;
        let assignment_id = self
            .attribute(project_id, "UnitsInContext")
            .as_reference()
            .ok_or_else(|| not_declared.clone())?;
        let assignment = self.expect_type(assignment_id, "IFCUNITASSIGNMENT")?;

        for unit_id in assignment.references_at(0) {
            let unit = self.entity(unit_id)?;
            // [1]=UnitType for SI and conversion-based units
            let declares_kind = matches!(
                unit.get(1),
                Some(StepValue::Enum(unit_type)) if unit_type == kind.unit_type()
            );
            if declares_kind {
                return self.unit_entity_scale(unit, kind, 0);
            }
        }

        Err(not_declared)
    }
}

/// SI prefix multipliers for `IfcSIPrefix` values
#[inline]
#[must_use]
pub fn get_si_prefix_multiplier(prefix: &str) -> f64 {
    match prefix {
        "ATTO" => 1e-18,
        "FEMTO" => 1e-15,
        "PICO" => 1e-12,
        "NANO" => 1e-9,
        "MICRO" => 1e-6,
        "MILLI" => 1e-3,
        "CENTI" => 1e-2,
        "DECI" => 1e-1,
        "DECA" => 1e1,
        "HECTO" => 1e2,
        "KILO" => 1e3,
        "MEGA" => 1e6,
        "GIGA" => 1e9,
        "TERA" => 1e12,
        "PETA" => 1e15,
        "EXA" => 1e18,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = include_str!("../../tests/fixtures/sample.ifc");

    fn wrap(schema: &str, data: &str) -> String {
        format!(
            "ISO-10303-21;\nHEADER;\nFILE_SCHEMA(('{schema}'));\nENDSEC;\nDATA;\n{data}\nENDSEC;\nEND-ISO-10303-21;\n"
        )
    }

    #[test]
    fn test_subtypes_are_enumerated() {
        let model = StepModel::parse(SAMPLE).unwrap();
        assert_eq!(model.entities_of_type("IfcFlowSegment").unwrap(), vec![100, 110, 120, 130]);
        assert_eq!(model.entities_of_type("IFCPIPESEGMENT").unwrap(), vec![100, 110]);
        assert_eq!(model.entities_of_type("IfcPump").unwrap(), Vec::<u64>::new());
    }

    #[test]
    fn test_unknown_type_in_ifc2x3() {
        let model = StepModel::parse(&wrap("IFC2X3", "#1=IFCFLOWSEGMENT('g',$,'Pipe',$,$,$,$,$);")).unwrap();
        assert_eq!(
            model.entities_of_type("IfcPipeSegment"),
            Err(AccessError::UnknownEntityType {
                tag: "IfcPipeSegment".to_string(),
                schema: "IFC2X3".to_string(),
            })
        );
        assert_eq!(model.entities_of_type("IfcFlowSegment").unwrap(), vec![1]);
    }

    #[test]
    fn test_schema_specific_supertypes() {
        let data = "#1=IFCREINFORCINGBAR('a',$,'Bar',$,$,$,$,$,$,12.,$,$,$,$);
#2=IFCMECHANICALFASTENER('b',$,'Bolt',$,$,$,$,$,$,$);";
        let ifc2x3 = StepModel::parse(&wrap("IFC2X3", data)).unwrap();
        assert_eq!(ifc2x3.entities_of_type("IfcBuildingElement").unwrap(), vec![1]);
        assert_eq!(ifc2x3.entities_of_type("IfcFastener").unwrap(), vec![2]);
        assert_eq!(ifc2x3.entities_of_type("IfcProduct").unwrap(), vec![1, 2]);

        let ifc4 = StepModel::parse(&wrap("IFC4", data)).unwrap();
        assert_eq!(ifc4.entities_of_type("IfcBuildingElement").unwrap(), Vec::<u64>::new());
        assert_eq!(ifc4.entities_of_type("IfcElementComponent").unwrap(), vec![1, 2]);
        assert_eq!(ifc4.entities_of_type("IfcFastener").unwrap(), Vec::<u64>::new());
    }

    #[test]
    fn test_attribute_markers() {
        let model = StepModel::parse(SAMPLE).unwrap();
        assert_eq!(model.attribute(90, "OverallWidth").as_f64(), Some(0.9));
        assert_eq!(model.attribute(91, "OverallHeight"), Attribute::Unset);
        assert_eq!(model.attribute(40, "OverallWidth"), Attribute::Absent);
        assert_eq!(model.attribute(100, "PredefinedType").as_str(), Some("RIGIDSEGMENT"));
    }

    #[test]
    fn test_ifc_type_uses_schema_spelling() {
        let model = StepModel::parse(SAMPLE).unwrap();
        assert_eq!(model.ifc_type(100), Some("IfcPipeSegment"));
        assert_eq!(model.ifc_type(41), Some("IFCWALLTYPE"));
        assert_eq!(model.ifc_type(9999), None);
    }

    #[test]
    fn test_container_walks_aggregation() {
        let model = StepModel::parse(SAMPLE).unwrap();
        // wall: direct containment
        assert_eq!(model.container(40), Some(23));
        // space: aggregated into the storey
        assert_eq!(model.container(30), Some(23));
        // storey: aggregated into the building
        assert_eq!(model.container(23), Some(22));
        assert_eq!(model.container(1), None);
    }

    #[test]
    fn test_type_property_sets_come_first() {
        let model = StepModel::parse(SAMPLE).unwrap();
        let sets = model.property_sets(40);
        let names: Vec<_> = sets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Pset_WallCommon", "Pset_WallCommon"]);
        assert_eq!(
            sets[0].values.get("FireRating"),
            Some(&StepValue::String("REI60".to_string()))
        );
        assert_eq!(
            sets[1].values.get("FireRating"),
            Some(&StepValue::String("REI90".to_string()))
        );
    }

    #[test]
    fn test_quantity_sets() {
        let model = StepModel::parse(SAMPLE).unwrap();
        let sets = model.quantity_sets(40);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].name, "Qto_WallBaseQuantities");
        assert_eq!(sets[0].values.get("GrossSideArea"), Some(&StepValue::Real(12.5)));
    }

    #[test]
    fn test_material_variants() {
        let model = StepModel::parse(SAMPLE).unwrap();
        assert_eq!(
            model.material(40).unwrap(),
            Some(MaterialAssignment::LayerSetUsage(Some(MaterialLayerSet {
                layers: vec![
                    Some(Material::named("Betoon C30/37")),
                    Some(Material::named("Mineraalvill")),
                ],
            })))
        );
        assert_eq!(
            model.material(80).unwrap(),
            Some(MaterialAssignment::Material(Material::named("Betoon C30/37")))
        );
        assert_eq!(model.material(120).unwrap(), None);
    }

    #[test]
    fn test_material_inherited_from_type() {
        let data = "#1=IFCPIPESEGMENT('g',$,'Pipe',$,$,$,$,$,$);
#2=IFCPIPESEGMENTTYPE('t',$,'PE',$,$,$,$,$,$,.RIGIDSEGMENT.);
#3=IFCRELDEFINESBYTYPE('r1',$,$,$,(#1),#2);
#4=IFCMATERIAL('PE-X',$,$);
#5=IFCRELASSOCIATESMATERIAL('r2',$,$,$,(#2),#4);";
        let model = StepModel::parse(&wrap("IFC4", data)).unwrap();
        assert_eq!(
            model.material(1).unwrap(),
            Some(MaterialAssignment::Material(Material::named("PE-X")))
        );
    }

    #[test]
    fn test_dangling_material_reference_is_an_error() {
        let data = "#1=IFCWALL('g',$,'Wall',$,$,$,$,$,$);
#2=IFCMATERIALLIST((#3,#99));
#3=IFCMATERIAL('Brick',$,$);
#4=IFCRELASSOCIATESMATERIAL('r',$,$,$,(#1),#2);";
        let model = StepModel::parse(&wrap("IFC4", data)).unwrap();
        assert_eq!(
            model.material(1),
            Err(AccessError::MissingEntity { id: 99 })
        );
    }

    #[test]
    fn test_si_unit_scales() {
        let data = "#1=IFCPROJECT('p',$,'P',$,$,$,$,$,#2);
#2=IFCUNITASSIGNMENT((#3,#4));
#3=IFCSIUNIT(*,.LENGTHUNIT.,.MILLI.,.METRE.);
#4=IFCSIUNIT(*,.AREAUNIT.,.CENTI.,.SQUARE_METRE.);";
        let model = StepModel::parse(&wrap("IFC4", data)).unwrap();
        assert_eq!(model.unit_scale(UnitKind::Length), Ok(0.001));
        assert!((model.unit_scale(UnitKind::Area).unwrap() - 1e-4).abs() < 1e-12);
        assert_eq!(
            model.unit_scale(UnitKind::Volume),
            Err(AccessError::UnitNotDeclared { kind: UnitKind::Volume })
        );
    }

    #[test]
    fn test_conversion_based_unit_scale() {
        let data = "#1=IFCPROJECT('p',$,'P',$,$,$,$,$,#2);
#2=IFCUNITASSIGNMENT((#3));
#3=IFCCONVERSIONBASEDUNIT(#4,.LENGTHUNIT.,'FOOT',#5);
#4=IFCDIMENSIONALEXPONENTS(1,0,0,0,0,0,0);
#5=IFCMEASUREWITHUNIT(IFCLENGTHMEASURE(0.3048),#6);
#6=IFCSIUNIT(*,.LENGTHUNIT.,$,.METRE.);";
        let model = StepModel::parse(&wrap("IFC2X3", data)).unwrap();
        assert_eq!(model.unit_scale(UnitKind::Length), Ok(0.3048));
    }

    #[test]
    fn test_si_prefix_multipliers() {
        assert_eq!(get_si_prefix_multiplier("MILLI"), 0.001);
        assert_eq!(get_si_prefix_multiplier("KILO"), 1000.0);
        assert_eq!(get_si_prefix_multiplier(""), 1.0);
        assert_eq!(get_si_prefix_multiplier("UNKNOWN"), 1.0);
    }
}
