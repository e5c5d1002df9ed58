//! File metadata, project, spatial structure and spaces.

use indexmap::IndexMap;

use super::flatten::{container_name, raw_quantities};
use super::units::{round_to, UnitScales};
use crate::error::AccessError;
use crate::model::{
    Building, EntityId, FileHeader, ModelAccess, ProjectInfo, Site, Space, SpatialStructure, Storey,
};
use crate::parser::StepValue;

pub fn file_info(model: &dyn ModelAccess) -> FileHeader {
    let header = model.header();
    let first = |items: &[String]| items.first().cloned().unwrap_or_default();

    FileHeader {
        schema_version: model.schema().to_string(),
        file_name: header.file_name.clone(),
        timestamp: header.time_stamp.clone(),
        author: first(&header.author),
        organization: first(&header.organization),
        originating_system: header.originating_system.clone(),
        preprocessor: header.preprocessor_version.clone(),
        description: first(&header.description),
    }
}

/// The first project of the model, if any.
pub fn project_info(model: &dyn ModelAccess) -> Result<Option<ProjectInfo>, AccessError> {
    let project = model.entities_of_type("IfcProject")?.first().map(|&id| {
        let text = |name: &str| model.attribute(id, name).text();
        ProjectInfo {
            guid: text("GlobalId"),
            name: text("Name"),
            description: text("Description"),
            phase: text("Phase"),
        }
    });
    Ok(project)
}

pub fn spatial_structure(
    model: &dyn ModelAccess,
    scales: UnitScales,
) -> Result<SpatialStructure, AccessError> {
    let sites = model
        .entities_of_type("IfcSite")?
        .into_iter()
        .map(|id| Site {
            guid: model.attribute(id, "GlobalId").text(),
            name: model.attribute(id, "Name").text(),
            description: model.attribute(id, "Description").text(),
        })
        .collect();

    let buildings = model
        .entities_of_type("IfcBuilding")?
        .into_iter()
        .map(|id| Building {
            guid: model.attribute(id, "GlobalId").text(),
            name: model.attribute(id, "Name").text(),
            description: model.attribute(id, "Description").text(),
            address: building_address(model, id),
        })
        .collect();

    let storeys = model
        .entities_of_type("IfcBuildingStorey")?
        .into_iter()
        .map(|id| Storey {
            guid: model.attribute(id, "GlobalId").text(),
            name: model.attribute(id, "Name").text(),
            elevation: model
                .attribute(id, "Elevation")
                .as_f64()
                .map_or(0.0, |elevation| round_to(elevation * scales.length, 3)),
        })
        .collect();

    Ok(SpatialStructure {
        sites,
        buildings,
        storeys,
    })
}

/// Address lines, town, postal code and country joined with ", ".
fn building_address(model: &dyn ModelAccess, building: EntityId) -> String {
    let Some(address) = model.attribute(building, "BuildingAddress").as_reference() else {
        return String::new();
    };

    let mut parts: Vec<String> = model
        .attribute(address, "AddressLines")
        .value()
        .and_then(StepValue::as_list)
        .map(|lines| {
            lines
                .iter()
                .filter_map(StepValue::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    for field in ["Town", "PostalCode", "Country"] {
        parts.push(model.attribute(address, field).text());
    }

    parts.retain(|part| !part.is_empty());
    parts.join(", ")
}

pub fn spaces(model: &dyn ModelAccess, scales: UnitScales) -> Result<Vec<Space>, AccessError> {
    let spaces = model
        .entities_of_type("IfcSpace")?
        .into_iter()
        .map(|id| {
            let quantities = raw_quantities(model, id);
            let measure = |keys: &[&str], scale: f64| {
                first_present(&quantities, keys).map_or(0.0, |raw| round_to(raw * scale, 2))
            };

            Space {
                guid: model.attribute(id, "GlobalId").text(),
                name: model.attribute(id, "Name").text(),
                long_name: model.attribute(id, "LongName").text(),
                storey_name: container_name(model, id),
                area: measure(&["NetFloorArea", "GrossFloorArea"], scales.area),
                volume: measure(&["NetVolume", "GrossVolume"], scales.volume),
                height: measure(&["Height", "FinishCeilingHeight"], scales.length),
            }
        })
        .collect();
    Ok(spaces)
}

/// Value of the first key present in `quantities`, even if it is zero.
pub(crate) fn first_present(quantities: &IndexMap<String, f64>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| quantities.get(*key).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::StepModel;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = include_str!("../../tests/fixtures/sample.ifc");

    fn sample() -> StepModel {
        StepModel::parse(SAMPLE).unwrap()
    }

    #[test]
    fn test_file_info() {
        assert_eq!(
            file_info(&sample()),
            FileHeader {
                schema_version: "IFC4".to_string(),
                file_name: "sample.ifc".to_string(),
                timestamp: "2024-05-14T10:00:00".to_string(),
                author: "J. Tamm".to_string(),
                organization: "Ehitus OÜ".to_string(),
                originating_system: "Revit 2024".to_string(),
                preprocessor: "IfcOpenShell 0.7.0".to_string(),
                description: "ViewDefinition [CoordinationView]".to_string(),
            }
        );
    }

    #[test]
    fn test_project_info() {
        assert_eq!(
            project_info(&sample()).unwrap(),
            Some(ProjectInfo {
                guid: "0YvctVUKr0kugbFTf53O9L".to_string(),
                name: "Kooli maja".to_string(),
                description: "Renovation".to_string(),
                phase: "Design".to_string(),
            })
        );
    }

    #[test]
    fn test_spatial_structure() {
        let structure = spatial_structure(&sample(), UnitScales::default()).unwrap();

        assert_eq!(structure.sites.len(), 1);
        assert_eq!(structure.sites[0].name, "Krunt");
        assert_eq!(
            structure.buildings,
            vec![Building {
                guid: "1xS3BCk291UvhgP2dvNMQJ".to_string(),
                name: "Maja A".to_string(),
                description: "Main building".to_string(),
                address: "Kooli 1, Tartu, 51003, Estonia".to_string(),
            }]
        );
        let storeys: Vec<_> = structure
            .storeys
            .iter()
            .map(|s| (s.name.as_str(), s.elevation))
            .collect();
        assert_eq!(storeys, vec![("1. korrus", 0.0), ("2. korrus", 3.2)]);
    }

    #[test]
    fn test_storey_elevation_scaled() {
        let scales = UnitScales {
            length: 0.001,
            ..UnitScales::default()
        };
        let structure = spatial_structure(&sample(), scales).unwrap();
        assert_eq!(structure.storeys[1].elevation, 0.003);
    }

    #[test]
    fn test_space_quantities() {
        let spaces = spaces(&sample(), UnitScales::default()).unwrap();
        assert_eq!(
            spaces,
            vec![Space {
                guid: "0BTBFw6f90Nfh9rP1dlXr2".to_string(),
                name: "101".to_string(),
                long_name: "Klassiruum 101".to_string(),
                storey_name: "1. korrus".to_string(),
                area: 54.32,
                volume: 171.5,
                height: 3.15,
            }]
        );
    }

    #[test]
    fn test_space_area_scaled_once() {
        let scales = UnitScales {
            area: 0.5,
            ..UnitScales::default()
        };
        let spaces = spaces(&sample(), scales).unwrap();
        // 54.321 * 0.5, then rounded
        assert_eq!(spaces[0].area, 27.16);
    }

    #[test]
    fn test_first_present_keeps_zero() {
        let quantities: IndexMap<String, f64> = [
            ("NetFloorArea".to_string(), 0.0),
            ("GrossFloorArea".to_string(), 12.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(first_present(&quantities, &["NetFloorArea", "GrossFloorArea"]), Some(0.0));
        assert_eq!(first_present(&quantities, &["Height"]), None);
    }
}
