//! Property tests for model building.
//!
//! Run with: `cargo test --test model_properties`

use proptest::prelude::*;

use cubeviewer::model::{
    build_model, filter_hierarchies_by_type, Keyed, RawAggregate, RawCubeDimension,
    RawCubeMeasure, RawCubeModel, RawDescriptor, RawDescriptorModel, RawDimensionMapping,
    RawHierarchy,
};
use cubeviewer::DimensionType;
use serde_json::Value;

const TYPES: &[&str] = &["location", "datetime", "classification"];

fn label() -> impl Strategy<Value = String> {
    "[A-Za-z ]{0,8}"
}

/// Aggregates referencing one of five measure names; only the first
/// `measure_count` of those exist in the cube.
fn measures_cube() -> impl Strategy<Value = (usize, Vec<(String, usize)>)> {
    (0usize..=5, prop::collection::vec((label(), 0usize..5), 0..12))
}

/// Dimensions as `(label, type index)` plus hierarchies as lists of level
/// indices into the dimension list.
fn dimensions_cube() -> impl Strategy<Value = (Vec<(String, usize)>, Vec<Vec<usize>>)> {
    prop::collection::vec((label(), 0usize..TYPES.len()), 1..8).prop_flat_map(|dimensions| {
        let count = dimensions.len();
        let hierarchies = prop::collection::vec(prop::collection::vec(0..count, 0..4), 0..5);
        (Just(dimensions), hierarchies)
    })
}

fn cube_with_measures(measure_count: usize, aggregates: &[(String, usize)]) -> RawCubeModel {
    let measures = (0..measure_count)
        .map(|i| (format!("m{}", i), RawCubeMeasure::default()))
        .collect();
    let aggregates = aggregates
        .iter()
        .enumerate()
        .map(|(i, (label, measure))| {
            let aggregate = RawAggregate {
                label: Some(label.clone()),
                reference: Some(format!("m{}.sum", measure)),
                measure: Some(format!("m{}", measure)),
            };
            (format!("a{}", i), aggregate)
        })
        .collect();

    RawCubeModel {
        measures: Keyed(measures),
        aggregates: Keyed(aggregates),
        ..RawCubeModel::default()
    }
}

fn cube_with_dimensions(
    dimensions: &[(String, usize)],
    hierarchies: &[Vec<usize>],
) -> (RawDescriptor, RawCubeModel) {
    let raw_dimensions = dimensions
        .iter()
        .enumerate()
        .map(|(i, (label, _))| {
            let dimension = RawCubeDimension {
                label: Some(label.clone()),
                key_ref: Some(format!("d{}.code", i)),
                orig_dimension: Some(format!("d{}", i)),
                ..RawCubeDimension::default()
            };
            (format!("d{}", i), dimension)
        })
        .collect();
    let raw_hierarchies = hierarchies
        .iter()
        .enumerate()
        .map(|(i, levels)| {
            let hierarchy = RawHierarchy {
                label: Some(format!("h{}", i)),
                levels: levels.iter().map(|l| Value::from(format!("d{}", l))).collect(),
            };
            (format!("h{}", i), hierarchy)
        })
        .collect();
    let mappings = dimensions
        .iter()
        .enumerate()
        .map(|(i, (_, ty))| {
            let mapping = RawDimensionMapping {
                dimension_type: Some(TYPES[*ty].to_string()),
            };
            (format!("d{}", i), mapping)
        })
        .collect();

    let descriptor = RawDescriptor {
        model: Some(RawDescriptorModel {
            measures: None,
            dimensions: Some(mappings),
        }),
        ..RawDescriptor::default()
    };
    let cube = RawCubeModel {
        dimensions: Keyed(raw_dimensions),
        hierarchies: Keyed(raw_hierarchies),
        ..RawCubeModel::default()
    };
    (descriptor, cube)
}

proptest! {
    #[test]
    fn test_measures_sorted_and_backed_by_cube((measure_count, aggregates) in measures_cube()) {
        let cube = cube_with_measures(measure_count, &aggregates);
        let model = build_model("pkg", &RawDescriptor::default(), &cube);

        prop_assert!(model.measures.windows(2).all(|w| w[0].label <= w[1].label));
        for measure in &model.measures {
            prop_assert!(cube.measures.get(&measure.id).is_some(), "{} not in cube", measure.id);
        }

        let expected = aggregates.iter().filter(|(_, m)| *m < measure_count).count();
        prop_assert_eq!(model.measures.len(), expected);
    }

    #[test]
    fn test_dimension_ids_are_source_positions((dimensions, hierarchies) in dimensions_cube()) {
        let (descriptor, cube) = cube_with_dimensions(&dimensions, &hierarchies);
        let model = build_model("pkg", &descriptor, &cube);

        prop_assert_eq!(model.dimensions.len(), dimensions.len());
        for dimension in &model.dimensions {
            prop_assert_eq!(&dimension.name, &format!("d{}", dimension.id));
            prop_assert_eq!(&dimension.label, &dimensions[dimension.id].0);
        }
        prop_assert!(model.dimensions.windows(2).all(|w| w[0].label <= w[1].label));
    }

    #[test]
    fn test_type_filter_keeps_source_intact((dimensions, hierarchies) in dimensions_cube()) {
        let (descriptor, cube) = cube_with_dimensions(&dimensions, &hierarchies);
        let model = build_model("pkg", &descriptor, &cube);
        let before = model.hierarchies.clone();

        for ty in [DimensionType::Location, DimensionType::Datetime] {
            let filtered = filter_hierarchies_by_type(&model.hierarchies, &ty);

            prop_assert_eq!(&model.hierarchies, &before);
            for hierarchy in &filtered {
                prop_assert!(!hierarchy.dimensions.is_empty());
                prop_assert!(hierarchy.dimensions.iter().all(|d| d.has_type(&ty)));
            }
            let expected = before
                .iter()
                .filter(|h| h.dimensions.iter().any(|d| d.has_type(&ty)))
                .count();
            prop_assert_eq!(filtered.len(), expected);
        }

        prop_assert_eq!(
            &model.location_hierarchies,
            &filter_hierarchies_by_type(&model.hierarchies, &DimensionType::Location)
        );
    }
}
