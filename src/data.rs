use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::fields::{
    CURIE_TEMPERATURE, NUM_PINHOLES, PINHOLE_AREA_PERCENT, PRIMARY_CRYSTALLIZATION,
    SECONDARY_CRYSTALLIZATION,
};
pub use crate::types::{ElementSymbol, PathString, SampleId};

/// Element symbol to amount, in the order elements first appear in the formula.
pub type Composition = IndexMap<ElementSymbol, f64>;

/// The optional scalar measurements carried by every sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarField {
    PrimaryCrystallization,
    SecondaryCrystallization,
    NumPinholes,
    PinholeAreaPercent,
    CurieTemperature,
}

impl ScalarField {
    /// Canonical column order for scalar fields.
    pub const ALL: [ScalarField; 5] = [
        ScalarField::PrimaryCrystallization,
        ScalarField::SecondaryCrystallization,
        ScalarField::NumPinholes,
        ScalarField::PinholeAreaPercent,
        ScalarField::CurieTemperature,
    ];

    /// Column name used in partial records and datasets.
    pub const fn name(self) -> &'static str {
        match self {
            ScalarField::PrimaryCrystallization => PRIMARY_CRYSTALLIZATION,
            ScalarField::SecondaryCrystallization => SECONDARY_CRYSTALLIZATION,
            ScalarField::NumPinholes => NUM_PINHOLES,
            ScalarField::PinholeAreaPercent => PINHOLE_AREA_PERCENT,
            ScalarField::CurieTemperature => CURIE_TEMPERATURE,
        }
    }

    /// Resolve a column name back to a scalar field.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// True for integer-valued fields.
    pub const fn is_count(self) -> bool {
        matches!(self, ScalarField::NumPinholes)
    }
}

impl fmt::Display for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fields produced by one extractor run. Unset fields were not found.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<Composition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_crystallization: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_crystallization: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_pinholes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinhole_area_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curie_temperature: Option<f64>,
}

impl PartialRecord {
    /// True when the extractor found nothing.
    pub fn is_empty(&self) -> bool {
        self.composition.is_none() && ScalarField::ALL.iter().all(|f| self.scalar(*f).is_none())
    }

    /// Value of a scalar field, widened to `f64`.
    pub fn scalar(&self, field: ScalarField) -> Option<f64> {
        match field {
            ScalarField::PrimaryCrystallization => self.primary_crystallization,
            ScalarField::SecondaryCrystallization => self.secondary_crystallization,
            ScalarField::NumPinholes => self.num_pinholes.map(|count| count as f64),
            ScalarField::PinholeAreaPercent => self.pinhole_area_percent,
            ScalarField::CurieTemperature => self.curie_temperature,
        }
    }

    /// Names of the fields this partial record sets.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.composition.is_some() {
            names.push(crate::constants::fields::COMPOSITION);
        }
        for field in ScalarField::ALL {
            if self.scalar(field).is_some() {
                names.push(field.name());
            }
        }
        names
    }
}

/// One physical sample assembled from its notes directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// `"{group}_{sample}"`; unique within a dataset.
    pub sample_id: SampleId,
    /// Sample directory, for provenance only.
    pub source_path: PathString,
    /// Element amounts; an empty mapping makes the record invalid.
    pub composition: Composition,
    pub primary_crystallization: Option<f64>,
    pub secondary_crystallization: Option<f64>,
    pub num_pinholes: Option<u64>,
    pub pinhole_area_percent: Option<f64>,
    pub curie_temperature: Option<f64>,
}

impl SampleRecord {
    /// Start an empty record for a sample directory.
    pub fn new(sample_id: impl Into<SampleId>, source_path: impl Into<PathString>) -> Self {
        Self {
            sample_id: sample_id.into(),
            source_path: source_path.into(),
            composition: Composition::new(),
            primary_crystallization: None,
            secondary_crystallization: None,
            num_pinholes: None,
            pinhole_area_percent: None,
            curie_temperature: None,
        }
    }

    /// Overwrite exactly the fields `partial` sets; everything else is kept.
    pub fn merge(&mut self, partial: PartialRecord) {
        if let Some(composition) = partial.composition {
            self.composition = composition;
        }
        if let Some(value) = partial.primary_crystallization {
            self.primary_crystallization = Some(value);
        }
        if let Some(value) = partial.secondary_crystallization {
            self.secondary_crystallization = Some(value);
        }
        if let Some(value) = partial.num_pinholes {
            self.num_pinholes = Some(value);
        }
        if let Some(value) = partial.pinhole_area_percent {
            self.pinhole_area_percent = Some(value);
        }
        if let Some(value) = partial.curie_temperature {
            self.curie_temperature = Some(value);
        }
    }

    /// Value of a scalar field, widened to `f64`.
    pub fn scalar(&self, field: ScalarField) -> Option<f64> {
        match field {
            ScalarField::PrimaryCrystallization => self.primary_crystallization,
            ScalarField::SecondaryCrystallization => self.secondary_crystallization,
            ScalarField::NumPinholes => self.num_pinholes.map(|count| count as f64),
            ScalarField::PinholeAreaPercent => self.pinhole_area_percent,
            ScalarField::CurieTemperature => self.curie_temperature,
        }
    }

    /// Composition is the only mandatory field.
    pub fn is_valid(&self) -> bool {
        !self.composition.is_empty()
    }
}
