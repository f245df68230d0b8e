/// Constants describing the on-disk notes layout.
pub mod corpus {
    /// Database root used when neither an argument nor the environment names one.
    pub const DEFAULT_DATABASE_ROOT: &str = "material_database";
    /// Environment variable overriding the database root.
    pub const DATABASE_ROOT_ENV: &str = "ALLOY_NOTES_ROOT";
    /// Default per-owner directory directly under the database root.
    pub const DEFAULT_OWNER_DIR: &str = "lauren";
    /// Default prefix that marks a directory as a sample group.
    pub const DEFAULT_GROUP_PREFIX: &str = "HOTG";
    /// Extension shared by every note file.
    pub const NOTE_EXTENSION: &str = "md";
    /// Note suffix carrying the alloy composition.
    pub const SUFFIX_ALLOY: &str = "Alloy";
    /// Note suffix carrying differential scanning calorimetry results.
    pub const SUFFIX_DSC: &str = "DSC";
    /// Note suffix carrying mechanical/defect inspection results.
    pub const SUFFIX_MECHANICAL: &str = "Mechanical";
    /// Note suffix carrying vibrating sample magnetometry results.
    pub const SUFFIX_VSM: &str = "VSM";
    /// Separator between group and sample directory names in a sample id.
    pub const SAMPLE_ID_SEPARATOR: &str = "_";
}

/// Canonical field names used in partial records and dataset columns.
pub mod fields {
    /// Mapping of element symbol to amount.
    pub const COMPOSITION: &str = "composition";
    /// Primary crystallization peak temperature.
    pub const PRIMARY_CRYSTALLIZATION: &str = "primary_crystallization";
    /// Secondary crystallization peak temperature.
    pub const SECONDARY_CRYSTALLIZATION: &str = "secondary_crystallization";
    /// Integer pinhole count.
    pub const NUM_PINHOLES: &str = "num_pinholes";
    /// Pinhole area as a percentage of the inspected surface.
    pub const PINHOLE_AREA_PERCENT: &str = "pinhole_area_percent";
    /// Curie (magnetic transition) temperature.
    pub const CURIE_TEMPERATURE: &str = "curie_temperature";
    /// Row key column in tabular dumps.
    pub const SAMPLE_ID: &str = "sample_id";
}

/// Constants used by extraction heuristics.
pub mod extract {
    /// Number of lines (matching line included) searched for a thermal value.
    pub const THERMAL_CONTEXT_LINES: usize = 3;
    /// Amount recorded for an element written without a trailing number.
    pub const DEFAULT_ELEMENT_AMOUNT: f64 = 1.0;
}

/// Constants used by the query layer.
pub mod query {
    /// Separator between field name and value in predicate text.
    pub const PREDICATE_DELIMITER: &str = "=";
    /// Separator between bounds in range predicate text.
    pub const RANGE_DELIMITER: &str = "..";
    /// Element columns used by a composition series when none are requested.
    pub const DEFAULT_COMPOSITION_ELEMENTS: usize = 5;
    /// Message surfaced when a projection has no plottable rows.
    pub const NO_DATA_MSG: &str = "No data available for selected properties and filters";
}

/// Log messages shared by the assembler.
pub mod logging {
    /// Logged when a note exists but cannot be read as UTF-8 text.
    pub const SKIP_UNREADABLE_NOTE_MSG: &str = "skipping unreadable note";
    /// Logged when the owner directory is missing under the database root.
    pub const MISSING_OWNER_DIR_MSG: &str = "owner folder not found; dataset will be empty";
    /// Logged when a sample stops assembling early.
    pub const SAMPLE_FAILED_MSG: &str = "sample failed mid-assembly; keeping partial record";
    /// Logged when a sample is dropped for lacking a composition.
    pub const EMPTY_COMPOSITION_MSG: &str = "discarding sample without composition";
}
