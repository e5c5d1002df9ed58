use indexmap::IndexMap;

use super::materials::material_name;
use super::units::round_to;
use crate::model::{Element, EntityId, ModelAccess, ToValue};

/// Key the property and quantity maps never carry.
const INTERNAL_ID_KEY: &str = "id";

/// A flattened element together with its unrounded, unscaled quantities.
///
/// Callers scale the quantities they understand (areas by the area scale,
/// lengths by the length scale) from `raw_quantities`.
#[derive(Debug, Clone, PartialEq)]
pub struct Flattened {
    pub element: Element,
    pub raw_quantities: IndexMap<String, f64>,
}

/// Gathers identity, placement, material, properties and quantities of one
/// entity into an [`Element`].
pub fn flatten(model: &dyn ModelAccess, id: EntityId) -> Flattened {
    let text = |name: &str| model.attribute(id, name).text();

    let type_name = model
        .type_definition(id)
        .map(|type_id| model.attribute(type_id, "Name").text())
        .unwrap_or_default();

    let mut properties = IndexMap::new();
    for set in model.property_sets(id) {
        for (key, raw) in &set.values {
            if key == INTERNAL_ID_KEY {
                continue;
            }
            let value = raw.to_value();
            if !value.is_empty() {
                properties.insert(key.clone(), value);
            }
        }
    }

    let raw_quantities = raw_quantities(model, id);

    let element = Element {
        entity_id: id,
        guid: text("GlobalId"),
        ifc_type: model.ifc_type(id).unwrap_or_default().to_string(),
        name: text("Name"),
        description: text("Description"),
        object_type: text("ObjectType"),
        tag: text("Tag"),
        type_name,
        storey_name: container_name(model, id),
        material_name: material_name(model, id),
        properties,
        quantities: raw_quantities
            .iter()
            .map(|(key, value)| (key.clone(), round_to(*value, 4)))
            .collect(),
    };

    Flattened {
        element,
        raw_quantities,
    }
}

/// Numeric quantity-set values, merged in order, unscaled.
pub fn raw_quantities(model: &dyn ModelAccess, id: EntityId) -> IndexMap<String, f64> {
    let mut quantities = IndexMap::new();
    for set in model.quantity_sets(id) {
        for (key, raw) in &set.values {
            if key == INTERNAL_ID_KEY {
                continue;
            }
            if let Some(number) = raw.as_f64() {
                quantities.insert(key.clone(), number);
            }
        }
    }
    quantities
}

/// Name of the containing spatial node, storey or not.
pub fn container_name(model: &dyn ModelAccess, id: EntityId) -> String {
    model
        .container(id)
        .map(|container| model.attribute(container, "Name").text())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;
    use crate::parser::StepModel;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = include_str!("../../tests/fixtures/sample.ifc");

    #[test]
    fn test_wall_identity_and_placement() {
        let model = StepModel::parse(SAMPLE).unwrap();
        let wall = flatten(&model, 40).element;

        assert_eq!(wall.entity_id, 40);
        assert_eq!(wall.guid, "2O2Fr$t4X7Zf8NOew3FLOH");
        assert_eq!(wall.ifc_type, "IfcWall");
        assert_eq!(wall.name, "Basic Wall:Välissein 300");
        assert_eq!(wall.description, "");
        assert_eq!(wall.tag, "312455");
        assert_eq!(wall.type_name, "Välissein 300");
        assert_eq!(wall.storey_name, "1. korrus");
        assert_eq!(wall.material_name, "Betoon C30/37, Mineraalvill");
    }

    #[test]
    fn test_occurrence_properties_override_type_properties() {
        let model = StepModel::parse(SAMPLE).unwrap();
        let wall = flatten(&model, 40).element;

        let expected: IndexMap<String, Value> = [
            ("IsExternal".to_string(), Value::Bool(true)),
            ("FireRating".to_string(), Value::Text("REI90".to_string())),
        ]
        .into_iter()
        .collect();
        assert_eq!(wall.properties, expected);
    }

    #[test]
    fn test_quantities_rounded_only_in_element() {
        let model = StepModel::parse(SAMPLE).unwrap();
        let space = flatten(&model, 30);

        assert_eq!(space.raw_quantities.get("GrossFloorArea"), Some(&54.321));
        assert_eq!(space.element.quantities.get("GrossFloorArea"), Some(&54.321));
        assert_eq!(space.element.quantities.get("Height"), Some(&3.15));
        assert!(space.element.properties.is_empty());
    }

    #[test]
    fn test_element_without_relationships() {
        let model = StepModel::parse(SAMPLE).unwrap();
        let cable = flatten(&model, 130).element;

        assert_eq!(cable.ifc_type, "IfcCableSegment");
        assert_eq!(cable.type_name, "");
        assert_eq!(cable.material_name, "");
        assert_eq!(cable.tag, "");
        assert!(cable.quantities.is_empty());
    }
}
