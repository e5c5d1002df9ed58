use indexmap::IndexMap;

use super::flatten::Flattened;
use super::spatial::first_present;
use super::units::{round_to, UnitScales};
use crate::model::{MepElement, Opening, QuantitySummary};

/// Running totals for one summary; consumed by [`SummaryBuilder::finish`].
#[derive(Debug, Default)]
struct SummaryBuilder {
    summary: QuantitySummary,
    pipe_length: f64,
    duct_length: f64,
    wall_area: f64,
    slab_area: f64,
    pipe_length_by_system: IndexMap<String, f64>,
    duct_length_by_system: IndexMap<String, f64>,
}

impl SummaryBuilder {
    fn add_structural(&mut self, structural: &Flattened, area_scale: f64) {
        let ifc_type = structural.element.ifc_type.as_str();
        let quantities = &structural.raw_quantities;

        if ifc_type.contains("Wall") {
            self.summary.wall_count += 1;
            self.wall_area +=
                first_present(quantities, &["NetSideArea", "GrossSideArea"]).unwrap_or(0.0) * area_scale;
        }
        if ifc_type.contains("Slab") {
            self.summary.slab_count += 1;
            self.slab_area += first_present(quantities, &["NetArea", "GrossArea"]).unwrap_or(0.0) * area_scale;
        }
        if ifc_type.contains("Column") {
            self.summary.column_count += 1;
        }
        if ifc_type.contains("Beam") {
            self.summary.beam_count += 1;
        }
        self.add_material(&structural.element.material_name);
    }

    fn add_opening(&mut self, opening: &Opening) {
        let ifc_type = opening.element.ifc_type.as_str();
        if ifc_type.contains("Door") {
            self.summary.door_count += 1;
        }
        if ifc_type.contains("Window") {
            self.summary.window_count += 1;
        }
        self.add_material(&opening.element.material_name);
    }

    fn add_mep(&mut self, mep: &MepElement) {
        let ifc_type = mep.element.ifc_type.as_str();
        let system = mep.system_type.as_str();
        let s = &mut self.summary;

        for (needle, counter) in [
            ("PipeSegment", &mut s.pipe_segment_count),
            ("PipeFitting", &mut s.pipe_fitting_count),
            ("DuctSegment", &mut s.duct_segment_count),
            ("DuctFitting", &mut s.duct_fitting_count),
            ("Terminal", &mut s.flow_terminal_count),
            ("Valve", &mut s.valve_count),
            ("Pump", &mut s.pump_count),
            ("Boiler", &mut s.boiler_count),
            ("Fan", &mut s.fan_count),
            ("Filter", &mut s.filter_count),
        ] {
            if ifc_type.contains(needle) {
                *counter += 1;
            }
        }
        *s.element_count_by_system.entry(system.to_string()).or_default() += 1;

        if ifc_type.contains("PipeSegment") {
            if let Some(length) = mep.length {
                self.pipe_length += length;
                *self.pipe_length_by_system.entry(system.to_string()).or_default() += length;
            }
        }
        if ifc_type.contains("DuctSegment") {
            if let Some(length) = mep.length {
                self.duct_length += length;
                *self.duct_length_by_system.entry(system.to_string()).or_default() += length;
            }
        }
        self.add_material(&mep.element.material_name);
    }

    fn add_material(&mut self, material_name: &str) {
        if !material_name.is_empty() {
            *self
                .summary
                .element_count_by_material
                .entry(material_name.to_string())
                .or_default() += 1;
        }
    }

    fn finish(self) -> QuantitySummary {
        let rounded = |totals: IndexMap<String, f64>| -> IndexMap<String, f64> {
            totals
                .into_iter()
                .map(|(key, total)| (key, round_to(total, 2)))
                .collect()
        };

        QuantitySummary {
            total_pipe_length: round_to(self.pipe_length, 2),
            total_duct_length: round_to(self.duct_length, 2),
            total_wall_area: round_to(self.wall_area, 2),
            total_slab_area: round_to(self.slab_area, 2),
            pipe_length_by_system: rounded(self.pipe_length_by_system),
            duct_length_by_system: rounded(self.duct_length_by_system),
            ..self.summary
        }
    }
}

/// Rolls all extracted records up into counts, totals and breakdowns.
///
/// Wall and slab areas are summed from the unrounded, unscaled quantities,
/// scaled here by the area factor and rounded once.
#[must_use]
pub fn summarize(
    structural: &[Flattened],
    openings: &[Opening],
    mep: &[MepElement],
    scales: UnitScales,
) -> QuantitySummary {
    let mut builder = SummaryBuilder::default();
    builder.summary.total_elements = structural.len() + openings.len();
    builder.summary.total_mep_elements = mep.len();

    // Material breakdown order: MEP, structural, openings.
    for element in mep {
        builder.add_mep(element);
    }
    for element in structural {
        builder.add_structural(element, scales.area);
    }
    for opening in openings {
        builder.add_opening(opening);
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, SystemType};
    use pretty_assertions::assert_eq;

    fn element(ifc_type: &str, material: &str, quantities: &[(&str, f64)]) -> Element {
        Element {
            entity_id: 0,
            guid: String::new(),
            ifc_type: ifc_type.to_string(),
            name: String::new(),
            description: String::new(),
            object_type: String::new(),
            tag: String::new(),
            type_name: String::new(),
            storey_name: String::new(),
            material_name: material.to_string(),
            properties: IndexMap::new(),
            quantities: quantities.iter().map(|(k, v)| ((*k).to_string(), *v)).collect(),
        }
    }

    fn structural(ifc_type: &str, material: &str, quantities: &[(&str, f64)]) -> Flattened {
        let element = element(ifc_type, material, quantities);
        Flattened {
            raw_quantities: element.quantities.clone(),
            element,
        }
    }

    fn mep(ifc_type: &str, system_type: SystemType, length: Option<f64>) -> MepElement {
        MepElement {
            element: element(ifc_type, "", &[]),
            system_type,
            nominal_diameter: None,
            inner_diameter: None,
            outer_diameter: None,
            length,
            flow_rate: None,
            pressure: None,
            predefined_type: String::new(),
        }
    }

    #[test]
    fn test_gross_side_area_fallback() {
        let walls = [structural("IfcWall", "", &[("GrossSideArea", 12.5)])];
        let summary = summarize(&walls, &[], &[], UnitScales::default());
        assert_eq!(summary.total_wall_area, 12.5);
        assert_eq!(summary.wall_count, 1);
    }

    #[test]
    fn test_net_area_preferred_and_scaled() {
        let elements = [
            structural("IfcWallStandardCase", "", &[("NetSideArea", 10.0), ("GrossSideArea", 12.0)]),
            structural("IfcSlab", "", &[("GrossArea", 40.0)]),
            structural("IfcSlab", "", &[]),
        ];
        let scales = UnitScales {
            area: 0.5,
            ..UnitScales::default()
        };
        let summary = summarize(&elements, &[], &[], scales);
        assert_eq!(summary.total_wall_area, 5.0);
        assert_eq!(summary.total_slab_area, 20.0);
        assert_eq!(summary.slab_count, 2);
    }

    #[test]
    fn test_areas_rounded_once() {
        // 0.000451 rounds to 0.0005 at four decimals; eleven of those would reach 0.01
        let walls: Vec<_> = (0..11)
            .map(|_| {
                let mut wall = structural("IfcWall", "", &[("NetSideArea", 0.000_451)]);
                wall.element.quantities.insert("NetSideArea".to_string(), 0.0005);
                wall
            })
            .collect();
        let summary = summarize(&walls, &[], &[], UnitScales::default());
        assert_eq!(summary.total_wall_area, 0.0);
    }

    #[test]
    fn test_counts_by_type_substring() {
        let elements = [
            structural("IfcWall", "", &[]),
            structural("IfcColumn", "", &[]),
            structural("IfcBeam", "", &[]),
            structural("IfcRoof", "", &[]),
        ];
        let openings = [Opening {
            element: element("IfcDoor", "", &[]),
            overall_width: None,
            overall_height: None,
        }];
        let mep = [
            mep("IfcPipeFitting", SystemType::Heating, None),
            mep("IfcAirTerminal", SystemType::Ventilation, None),
            mep("IfcSanitaryTerminal", SystemType::WaterSupply, None),
            mep("IfcValve", SystemType::Heating, None),
            mep("IfcFan", SystemType::Ventilation, None),
        ];
        let summary = summarize(&elements, &openings, &mep, UnitScales::default());

        assert_eq!(summary.total_elements, 5);
        assert_eq!(summary.total_mep_elements, 5);
        assert_eq!(
            (summary.wall_count, summary.column_count, summary.beam_count, summary.door_count),
            (1, 1, 1, 1)
        );
        assert_eq!(summary.flow_terminal_count, 2);
        assert_eq!(summary.pipe_fitting_count, 1);
        assert_eq!(summary.valve_count, 1);
        assert_eq!(summary.fan_count, 1);
        assert_eq!(summary.pipe_segment_count, 0);
    }

    #[test]
    fn test_lengths_by_system() {
        let mep = [
            mep("IfcPipeSegment", SystemType::Heating, Some(5.2)),
            mep("IfcPipeSegment", SystemType::Heating, Some(1.111)),
            mep("IfcPipeSegment", SystemType::Sewage, None),
            mep("IfcDuctSegment", SystemType::Ventilation, Some(3.5)),
            mep("IfcPipeFitting", SystemType::Heating, Some(0.3)),
        ];
        let summary = summarize(&[], &[], &mep, UnitScales::default());

        assert_eq!(summary.total_pipe_length, 6.31);
        assert_eq!(summary.total_duct_length, 3.5);

        let expected_counts: IndexMap<String, usize> = [
            ("heating".to_string(), 3),
            ("sewage".to_string(), 1),
            ("ventilation".to_string(), 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(summary.element_count_by_system, expected_counts);

        let expected_pipe: IndexMap<String, f64> =
            [("heating".to_string(), 6.31)].into_iter().collect();
        assert_eq!(summary.pipe_length_by_system, expected_pipe);
        assert_eq!(summary.duct_length_by_system.get("ventilation"), Some(&3.5));
    }

    #[test]
    fn test_material_breakdown() {
        let structural = [
            structural("IfcWall", "Brick", &[]),
            structural("IfcWall", "Brick", &[]),
            structural("IfcSlab", "", &[]),
        ];
        let mut pipe = mep("IfcPipeSegment", SystemType::Heating, None);
        pipe.element.material_name = "PE-X".to_string();
        let summary = summarize(&structural, &[], &[pipe], UnitScales::default());

        let expected: IndexMap<String, usize> =
            [("PE-X".to_string(), 1), ("Brick".to_string(), 2)].into_iter().collect();
        assert_eq!(summary.element_count_by_material, expected);
    }

    #[test]
    fn test_wall_count_matches_elements() {
        let structural = [
            structural("IfcWall", "", &[]),
            structural("IfcCurtainWall", "", &[]),
            structural("IfcWallStandardCase", "", &[]),
            structural("IfcPlate", "", &[]),
        ];
        let summary = summarize(&structural, &[], &[], UnitScales::default());
        let walls = structural.iter().filter(|f| f.element.ifc_type.contains("Wall")).count();
        assert_eq!(summary.wall_count, walls);
    }
}
