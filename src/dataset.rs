use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::fields::SAMPLE_ID;
use crate::data::{ScalarField, SampleRecord};
use crate::types::{ElementSymbol, FieldName, PathString, SampleId};

/// What a dataset column holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Scalar(ScalarField),
    /// Amount of one element; missing when a sample does not contain it.
    Element,
}

/// One named dataset column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: FieldName,
    pub kind: ColumnKind,
}

impl Column {
    /// True for integer-valued columns.
    pub fn is_count(&self) -> bool {
        matches!(self.kind, ColumnKind::Scalar(field) if field.is_count())
    }
}

/// One sample's fixed-width row. `values` is aligned with the dataset columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetRow {
    pub sample_id: SampleId,
    pub source_path: PathString,
    pub values: Vec<Option<f64>>,
}

/// Read-only table of samples: five scalar columns followed by one column per
/// element, in the order elements were first seen.
///
/// Missing cells are `None`, which is distinct from a recorded `0.0`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<Column>,
    #[serde(skip)]
    index: IndexMap<FieldName, usize>,
    rows: Vec<DatasetRow>,
}

impl Dataset {
    /// Materialize records into a table.
    ///
    /// The first pass collects the element union; the second writes rows of
    /// equal width. Records are not de-duplicated.
    pub fn build(records: &[SampleRecord]) -> Self {
        let mut elements: IndexSet<&ElementSymbol> = IndexSet::new();
        for record in records {
            elements.extend(record.composition.keys());
        }

        let mut columns: Vec<Column> = ScalarField::ALL
            .iter()
            .map(|field| Column {
                name: field.name().to_string(),
                kind: ColumnKind::Scalar(*field),
            })
            .collect();
        columns.extend(elements.iter().map(|element| Column {
            name: (*element).clone(),
            kind: ColumnKind::Element,
        }));

        let rows = records
            .iter()
            .map(|record| DatasetRow {
                sample_id: record.sample_id.clone(),
                source_path: record.source_path.clone(),
                values: columns
                    .iter()
                    .map(|column| match column.kind {
                        ColumnKind::Scalar(field) => record.scalar(field),
                        ColumnKind::Element => record.composition.get(&column.name).copied(),
                    })
                    .collect(),
            })
            .collect();

        Self::from_parts(columns, rows)
    }

    fn from_parts(columns: Vec<Column>, rows: Vec<DatasetRow>) -> Self {
        let index = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| (column.name.clone(), idx))
            .collect();
        Self {
            columns,
            index,
            rows,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    /// Element columns, in column order.
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|column| column.kind == ColumnKind::Element)
            .map(|column| column.name.as_str())
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, field: &str) -> Option<usize> {
        self.index.get(field).copied()
    }

    pub fn column(&self, field: &str) -> Option<&Column> {
        self.column_index(field).map(|idx| &self.columns[idx])
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.index.contains_key(field)
    }

    /// Cell value; `None` when the row, column, or value is missing.
    pub fn value(&self, row: usize, field: &str) -> Option<f64> {
        let column = self.column_index(field)?;
        self.rows.get(row)?.values.get(column).copied().flatten()
    }

    /// Row for a sample id.
    pub fn row_by_id(&self, sample_id: &str) -> Option<&DatasetRow> {
        self.rows.iter().find(|row| row.sample_id == sample_id)
    }

    /// Present values of one column, in row order.
    pub fn column_values(&self, field: &str) -> Vec<f64> {
        let Some(column) = self.column_index(field) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|row| row.values[column])
            .collect()
    }

    /// Numeric fields with at least one value, in column order.
    ///
    /// Every column is numeric, so this is the columns minus those that are
    /// entirely missing. `sample_id` is never included.
    pub fn available_fields(&self) -> Vec<FieldName> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.rows.iter().any(|row| row.values[*idx].is_some()))
            .map(|(_, column)| column.name.clone())
            .collect()
    }

    /// Full tabular dump: one object per row with `sample_id`, `source_path`
    /// and every column, `null` for missing cells.
    pub fn to_json_rows(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut object = Map::new();
                object.insert(SAMPLE_ID.to_string(), Value::from(row.sample_id.as_str()));
                object.insert(
                    "source_path".to_string(),
                    Value::from(row.source_path.as_str()),
                );
                for (column, value) in self.columns.iter().zip(&row.values) {
                    let cell = match value {
                        None => Value::Null,
                        Some(value) if column.is_count() => Value::from(*value as u64),
                        Some(value) => Value::from(*value),
                    };
                    object.insert(column.name.clone(), cell);
                }
                Value::Object(object)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, elements: &[(&str, f64)]) -> SampleRecord {
        let mut record = SampleRecord::new(id, format!("db/{id}"));
        for (element, amount) in elements {
            record.composition.insert(element.to_string(), *amount);
        }
        record
    }

    #[test]
    fn columns_are_scalars_then_elements_in_first_seen_order() {
        let records = vec![
            record("HOTG1_0001", &[("Fe", 80.0), ("B", 20.0)]),
            record("HOTG1_0002", &[("Co", 70.0), ("Fe", 5.0)]),
        ];
        let dataset = Dataset::build(&records);
        let names: Vec<&str> = dataset.column_names().collect();
        assert_eq!(
            names,
            vec![
                "primary_crystallization",
                "secondary_crystallization",
                "num_pinholes",
                "pinhole_area_percent",
                "curie_temperature",
                "Fe",
                "B",
                "Co",
            ]
        );
        assert!(dataset.rows().iter().all(|row| row.values.len() == names.len()));
        assert_eq!(dataset.elements().collect::<Vec<_>>(), vec!["Fe", "B", "Co"]);
    }

    #[test]
    fn absent_element_is_missing_not_zero() {
        let records = vec![
            record("a", &[("Fe", 0.0)]),
            record("b", &[("Co", 1.0)]),
        ];
        let dataset = Dataset::build(&records);
        assert_eq!(dataset.value(0, "Fe"), Some(0.0));
        assert_eq!(dataset.value(1, "Fe"), None);
        assert_eq!(dataset.value(0, "Zr"), None);
        assert_eq!(dataset.value(5, "Fe"), None);
    }

    #[test]
    fn available_fields_skip_all_missing_columns() {
        let mut first = record("a", &[("Fe", 2.0)]);
        first.curie_temperature = Some(410.0);
        let second = record("b", &[("Ni", 1.0)]);
        let dataset = Dataset::build(&[first, second]);
        assert_eq!(dataset.available_fields(), vec!["curie_temperature", "Fe", "Ni"]);
        assert_eq!(dataset.column_values("curie_temperature"), vec![410.0]);
    }

    #[test]
    fn empty_input_builds_scalar_only_table() {
        let dataset = Dataset::build(&[]);
        assert!(dataset.is_empty());
        assert_eq!(dataset.columns().len(), ScalarField::ALL.len());
        assert!(dataset.available_fields().is_empty());
    }

    #[test]
    fn json_rows_use_null_for_missing_and_integers_for_counts() {
        let mut first = record("HOTG1_0001", &[("Fe", 2.0)]);
        first.num_pinholes = Some(12);
        let dataset = Dataset::build(&[first, record("HOTG1_0002", &[("Co", 1.0)])]);
        let rows = dataset.to_json_rows();
        assert_eq!(rows[0]["sample_id"], "HOTG1_0001");
        assert_eq!(rows[0]["num_pinholes"], serde_json::json!(12));
        assert_eq!(rows[0]["Co"], Value::Null);
        assert_eq!(rows[1]["Co"], serde_json::json!(1.0));
        assert_eq!(
            dataset.row_by_id("HOTG1_0002").map(|row| row.source_path.as_str()),
            Some("db/HOTG1_0002")
        );
    }
}
