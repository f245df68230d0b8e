use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::query::{
    DEFAULT_COMPOSITION_ELEMENTS, NO_DATA_MSG, PREDICATE_DELIMITER, RANGE_DELIMITER,
};
use crate::dataset::{Dataset, DatasetRow};
use crate::errors::AlloyError;
use crate::types::{ElementSymbol, FieldName, SampleId};
use crate::utils::field_label;

/// A test against one dataset field. A missing value never passes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    /// Exact numeric equality.
    Equals { field: FieldName, value: f64 },
    /// Closed interval `[lo, hi]`.
    Range { field: FieldName, lo: f64, hi: f64 },
}

impl Predicate {
    pub fn equals(field: impl Into<FieldName>, value: f64) -> Self {
        Predicate::Equals {
            field: field.into(),
            value,
        }
    }

    pub fn range(field: impl Into<FieldName>, lo: f64, hi: f64) -> Self {
        Predicate::Range {
            field: field.into(),
            lo,
            hi,
        }
    }

    /// Field the predicate tests.
    pub fn field(&self) -> &str {
        match self {
            Predicate::Equals { field, .. } | Predicate::Range { field, .. } => field,
        }
    }

    /// Evaluate against one cell.
    pub fn matches(&self, value: Option<f64>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self {
            Predicate::Equals { value: expected, .. } => value == *expected,
            Predicate::Range { lo, hi, .. } => *lo <= value && value <= *hi,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Equals { field, value } => {
                write!(f, "{field}{PREDICATE_DELIMITER}{value}")
            }
            Predicate::Range { field, lo, hi } => {
                write!(f, "{field}{PREDICATE_DELIMITER}{lo}{RANGE_DELIMITER}{hi}")
            }
        }
    }
}

impl FromStr for Predicate {
    type Err = AlloyError;

    /// Parses `field=value` or `field=lo..hi`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| AlloyError::InvalidPredicate(format!("'{text}': {reason}"));
        let (field, rhs) = text
            .split_once(PREDICATE_DELIMITER)
            .ok_or_else(|| invalid("expected field=value or field=lo..hi"))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(invalid("missing field name"));
        }
        let number = |raw: &str| {
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|value| !value.is_nan())
                .ok_or_else(|| invalid("bound is not a number"))
        };
        match rhs.split_once(RANGE_DELIMITER) {
            Some((lo, hi)) => {
                let (lo, hi) = (number(lo)?, number(hi)?);
                if lo > hi {
                    return Err(invalid("lower bound exceeds upper bound"));
                }
                Ok(Predicate::range(field, lo, hi))
            }
            None => Ok(Predicate::equals(field, number(rhs)?)),
        }
    }
}

/// Row subset of a dataset, in dataset row order.
#[derive(Clone, Debug)]
pub struct DatasetView<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> DatasetView<'a> {
    /// View over every row.
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            rows: (0..dataset.len()).collect(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dataset row indices in the view.
    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a DatasetRow> + '_ {
        let all = self.dataset.rows();
        self.rows.iter().map(move |idx| &all[*idx])
    }

    pub fn sample_ids(&self) -> Vec<&'a str> {
        self.rows().map(|row| row.sample_id.as_str()).collect()
    }

    /// Values of one field for the rows in view, `None` where missing.
    pub fn values(&self, field: &str) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|idx| self.dataset.value(*idx, field))
            .collect()
    }
}

/// Keep rows passing every predicate.
///
/// Predicates naming a field the dataset does not have are skipped with a
/// warning; an empty predicate list keeps every row.
pub fn filter<'a>(dataset: &'a Dataset, predicates: &[Predicate]) -> DatasetView<'a> {
    let mut active = Vec::with_capacity(predicates.len());
    for predicate in predicates {
        match dataset.column_index(predicate.field()) {
            Some(column) => active.push((column, predicate)),
            None => warn!(field = predicate.field(), "ignoring predicate on unknown field"),
        }
    }
    let rows = dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            active
                .iter()
                .all(|(column, predicate)| predicate.matches(row.values[*column]))
        })
        .map(|(idx, _)| idx)
        .collect();
    DatasetView { dataset, rows }
}

/// One plottable sample.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub sample_id: SampleId,
    pub x: f64,
    pub y: f64,
    /// `None` when no color field was requested or the sample lacks it.
    pub color: Option<f64>,
}

/// Points plus presentation labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    /// Series name; the element symbol for composition series.
    pub name: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color_label: Option<String>,
    pub points: Vec<PlotPoint>,
}

/// Result of [`project`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "series", rename_all = "snake_case")]
pub enum Projection {
    Points(PlotSeries),
    /// No row had both axis values.
    Empty,
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        matches!(self, Projection::Empty)
    }

    pub fn points(&self) -> &[PlotPoint] {
        match self {
            Projection::Points(series) => &series.points,
            Projection::Empty => &[],
        }
    }

    /// Message a presentation layer shows for an empty projection.
    pub fn message(&self) -> Option<&'static str> {
        self.is_empty().then_some(NO_DATA_MSG)
    }
}

fn require_field(dataset: &Dataset, field: &str) -> Result<usize, AlloyError> {
    dataset
        .column_index(field)
        .ok_or_else(|| AlloyError::UnknownField(field.to_string()))
}

/// Map the rows in view to `(x, y[, color])` points.
///
/// Rows missing `x` or `y` are dropped; a missing color leaves the point
/// uncolored. Unknown field names are caller errors.
pub fn project(
    view: &DatasetView<'_>,
    x_field: &str,
    y_field: &str,
    color_field: Option<&str>,
) -> Result<Projection, AlloyError> {
    let dataset = view.dataset();
    let x_column = require_field(dataset, x_field)?;
    let y_column = require_field(dataset, y_field)?;
    let color_column = color_field
        .map(|field| require_field(dataset, field))
        .transpose()?;

    let points: Vec<PlotPoint> = view
        .rows()
        .filter_map(|row| {
            let x = row.values[x_column]?;
            let y = row.values[y_column]?;
            Some(PlotPoint {
                sample_id: row.sample_id.clone(),
                x,
                y,
                color: color_column.and_then(|column| row.values[column]),
            })
        })
        .collect();

    if points.is_empty() {
        return Ok(Projection::Empty);
    }
    let (x_label, y_label) = (field_label(x_field), field_label(y_field));
    Ok(Projection::Points(PlotSeries {
        name: y_field.to_string(),
        title: format!("{y_label} vs {x_label}"),
        x_label,
        y_label,
        color_label: color_field.map(field_label),
        points,
    }))
}

/// One series per element: x is the element amount, y the chosen property.
///
/// With no `elements`, the first few element columns are used. Series with no
/// points are omitted, so an empty result means nothing to plot.
pub fn project_composition(
    view: &DatasetView<'_>,
    y_field: &str,
    elements: Option<&[ElementSymbol]>,
) -> Result<Vec<PlotSeries>, AlloyError> {
    let dataset = view.dataset();
    require_field(dataset, y_field)?;
    let chosen: Vec<&str> = match elements {
        Some(elements) => elements.iter().map(String::as_str).collect(),
        None => dataset
            .elements()
            .take(DEFAULT_COMPOSITION_ELEMENTS)
            .collect(),
    };

    let y_label = field_label(y_field);
    let mut series = Vec::with_capacity(chosen.len());
    for element in chosen {
        let Projection::Points(mut plot) = project(view, element, y_field, None)? else {
            continue;
        };
        plot.name = element.to_string();
        plot.title = format!("{y_label} vs Element Composition");
        plot.x_label = format!("{element} Amount");
        series.push(plot);
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SampleRecord;

    fn dataset() -> Dataset {
        let mut records = Vec::new();
        for (idx, curie) in [Some(300.0), None, Some(450.0), Some(520.0)].iter().enumerate() {
            let mut record = SampleRecord::new(format!("HOTG1_000{idx}"), "db");
            record.composition.insert("Fe".to_string(), 70.0 + idx as f64);
            if idx % 2 == 0 {
                record.composition.insert("Co".to_string(), 5.0);
            }
            record.curie_temperature = *curie;
            record.num_pinholes = Some(idx as u64);
            records.push(record);
        }
        Dataset::build(&records)
    }

    #[test]
    fn range_filter_is_inclusive_and_drops_missing() {
        let dataset = dataset();
        let view = filter(&dataset, &[Predicate::range("curie_temperature", 300.0, 450.0)]);
        assert_eq!(view.sample_ids(), vec!["HOTG1_0000", "HOTG1_0002"]);
    }

    #[test]
    fn predicates_combine_with_and() {
        let dataset = dataset();
        let view = filter(
            &dataset,
            &[
                Predicate::range("curie_temperature", 0.0, 1000.0),
                Predicate::equals("Co", 5.0),
            ],
        );
        assert_eq!(view.sample_ids(), vec!["HOTG1_0000", "HOTG1_0002"]);
        assert_eq!(filter(&dataset, &[]).len(), 4);
    }

    #[test]
    fn unknown_predicate_field_is_ignored() {
        let dataset = dataset();
        let view = filter(&dataset, &[Predicate::equals("Zr", 1.0)]);
        assert_eq!(view.len(), dataset.len());
    }

    #[test]
    fn predicate_text_forms_parse() {
        assert_eq!(
            "curie_temperature=300..450".parse::<Predicate>().unwrap(),
            Predicate::range("curie_temperature", 300.0, 450.0)
        );
        assert_eq!(
            " num_pinholes = 3 ".parse::<Predicate>().unwrap(),
            Predicate::equals("num_pinholes", 3.0)
        );
        assert_eq!(
            "Fe=-1..2.5".parse::<Predicate>().unwrap(),
            Predicate::range("Fe", -1.0, 2.5)
        );
        for bad in ["curie_temperature", "=3", "Fe=abc", "Fe=5..1", "Fe=NaN"] {
            assert!(matches!(
                bad.parse::<Predicate>(),
                Err(AlloyError::InvalidPredicate(_))
            ));
        }
        let predicate = Predicate::range("Fe", 1.0, 2.5);
        assert_eq!(predicate.to_string().parse::<Predicate>().unwrap(), predicate);
    }

    #[test]
    fn projection_drops_rows_missing_an_axis_but_not_color() {
        let dataset = dataset();
        let view = DatasetView::all(&dataset);
        let projection = project(&view, "Fe", "curie_temperature", Some("Co")).unwrap();
        let points = projection.points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].sample_id, "HOTG1_0000");
        assert_eq!(points[0].color, Some(5.0));
        assert_eq!(points[2].sample_id, "HOTG1_0003");
        assert_eq!(points[2].color, None);

        let Projection::Points(series) = projection else {
            panic!("expected points");
        };
        assert_eq!(series.title, "Curie Temperature vs Fe");
        assert_eq!(series.color_label.as_deref(), Some("Co"));
    }

    #[test]
    fn empty_view_projects_to_explicit_empty_signal() {
        let dataset = dataset();
        let view = filter(&dataset, &[Predicate::range("curie_temperature", 900.0, 1000.0)]);
        let projection = project(&view, "Fe", "curie_temperature", None).unwrap();
        assert!(projection.is_empty());
        assert!(projection.points().is_empty());
        assert_eq!(projection.message(), Some(NO_DATA_MSG));
    }

    #[test]
    fn unknown_axis_is_an_error() {
        let dataset = dataset();
        let view = DatasetView::all(&dataset);
        assert!(matches!(
            project(&view, "Zr", "curie_temperature", None),
            Err(AlloyError::UnknownField(field)) if field == "Zr"
        ));
        assert!(project(&view, "Fe", "Fe", Some("hardness")).is_err());
    }

    #[test]
    fn composition_series_default_to_leading_elements() {
        let dataset = dataset();
        let view = DatasetView::all(&dataset);
        let series = project_composition(&view, "num_pinholes", None).unwrap();
        let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Fe", "Co"]);
        assert_eq!(series[1].points.len(), 2);
        assert_eq!(series[1].x_label, "Co Amount");
        assert_eq!(series[0].title, "Num Pinholes vs Element Composition");

        let elements = vec!["Co".to_string()];
        let only_co =
            project_composition(&view, "curie_temperature", Some(elements.as_slice())).unwrap();
        assert_eq!(only_co.len(), 1);
        assert_eq!(only_co[0].points.len(), 2);
    }
}
