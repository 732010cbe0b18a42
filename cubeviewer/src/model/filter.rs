//! Type-specific hierarchy views.

use super::types::{Dimension, DimensionType, Hierarchy};

/// Hierarchies narrowed to the dimensions of `dimension_type`.
///
/// Each result is a copy whose dimension list keeps only matching dimensions;
/// hierarchies left without any are dropped. `hierarchies` itself is not
/// modified.
pub fn filter_hierarchies_by_type(
    hierarchies: &[Hierarchy],
    dimension_type: &DimensionType,
) -> Vec<Hierarchy> {
    hierarchies
        .iter()
        .filter_map(|hierarchy| {
            let dimensions: Vec<Dimension> = hierarchy
                .dimensions
                .iter()
                .filter(|d| d.has_type(dimension_type))
                .cloned()
                .collect();

            if dimensions.is_empty() {
                return None;
            }

            Some(Hierarchy {
                id: hierarchy.id,
                key: hierarchy.key.clone(),
                label: hierarchy.label.clone(),
                dimensions,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimension(id: usize, dimension_type: Option<&str>) -> Dimension {
        Dimension {
            id,
            name: format!("d{}", id),
            key: format!("d{}.code", id),
            label: format!("D{}", id),
            value_ref: format!("d{}.label", id),
            hierarchy: None,
            dimension_type: dimension_type.map(DimensionType::from),
            values: Vec::new(),
        }
    }

    fn hierarchy(id: usize, dimensions: Vec<Dimension>) -> Hierarchy {
        Hierarchy {
            id,
            key: format!("h{}", id),
            label: format!("H{}", id),
            dimensions,
        }
    }

    #[test]
    fn test_keeps_only_matching_dimensions() {
        let hierarchies = vec![hierarchy(
            0,
            vec![
                dimension(0, Some("location")),
                dimension(1, None),
                dimension(2, Some("location")),
            ],
        )];

        let filtered = filter_hierarchies_by_type(&hierarchies, &DimensionType::Location);

        assert_eq!(filtered.len(), 1);
        let ids: Vec<usize> = filtered[0].dimensions.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(filtered[0].key, "h0");
    }

    #[test]
    fn test_drops_hierarchies_without_matches() {
        let hierarchies = vec![
            hierarchy(0, vec![dimension(0, Some("datetime"))]),
            hierarchy(1, vec![dimension(1, Some("classification"))]),
            hierarchy(2, Vec::new()),
        ];

        let filtered = filter_hierarchies_by_type(&hierarchies, &DimensionType::Location);
        assert!(filtered.is_empty());

        let filtered = filter_hierarchies_by_type(&hierarchies, &DimensionType::Datetime);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 0);
    }

    #[test]
    fn test_source_is_untouched() {
        let hierarchies = vec![hierarchy(
            0,
            vec![dimension(0, Some("location")), dimension(1, Some("datetime"))],
        )];
        let before = hierarchies.clone();

        let _ = filter_hierarchies_by_type(&hierarchies, &DimensionType::Location);
        let _ = filter_hierarchies_by_type(&hierarchies, &DimensionType::Datetime);

        assert_eq!(hierarchies, before);
    }

    #[test]
    fn test_other_types_can_be_filtered() {
        let hierarchies = vec![hierarchy(0, vec![dimension(0, Some("classification"))])];
        let filtered = filter_hierarchies_by_type(
            &hierarchies,
            &DimensionType::Other("classification".to_string()),
        );
        assert_eq!(filtered.len(), 1);
    }
}
