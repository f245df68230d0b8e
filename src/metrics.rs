use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::corpus::SAMPLE_ID_SEPARATOR;
use crate::dataset::Dataset;
use crate::types::{FieldName, GroupName};

/// Bounds and population of one field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
    /// Rows with a value for the field.
    pub count: usize,
}

/// Per-group share of the dataset's samples.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupShare {
    pub group: GroupName,
    pub count: usize,
    pub share: f64,
}

/// Overview of a dataset for summary panels and range controls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_samples: usize,
    pub available_fields: usize,
    pub element_count: usize,
    /// Ranges of available fields, in column order.
    pub ranges: IndexMap<FieldName, FieldRange>,
    /// Largest group first; ties by name.
    pub groups: Vec<GroupShare>,
}

impl DatasetSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let fields = dataset.available_fields();
        let ranges: IndexMap<FieldName, FieldRange> = fields
            .iter()
            .filter_map(|field| field_range(dataset, field).map(|range| (field.clone(), range)))
            .collect();
        Self {
            total_samples: dataset.len(),
            available_fields: fields.len(),
            element_count: dataset.elements().count(),
            ranges,
            groups: group_shares(dataset),
        }
    }
}

/// Min, max and count of a field; `None` when it has no values or is unknown.
pub fn field_range(dataset: &Dataset, field: &str) -> Option<FieldRange> {
    let values = dataset.column_values(field);
    let (first, rest) = values.split_first()?;
    let (min, max) = rest
        .iter()
        .fold((*first, *first), |(min, max), value| (min.min(*value), max.max(*value)));
    Some(FieldRange {
        min,
        max,
        count: values.len(),
    })
}

/// Sample counts per group, derived from the `{group}_{sample}` id.
pub fn group_shares(dataset: &Dataset) -> Vec<GroupShare> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for row in dataset.rows() {
        let group = row
            .sample_id
            .rsplit_once(SAMPLE_ID_SEPARATOR)
            .map_or(row.sample_id.as_str(), |(group, _)| group);
        *counts.entry(group).or_default() += 1;
    }
    let total = dataset.len();
    let mut shares: Vec<GroupShare> = counts
        .into_iter()
        .map(|(group, count)| GroupShare {
            group: group.to_string(),
            count,
            share: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            },
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.group.cmp(&b.group)));
    shares
}
