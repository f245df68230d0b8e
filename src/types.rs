/// Row key for one assembled sample.
/// Example: `HOTG12_0457`
pub type SampleId = String;
/// Chemical element symbol as written in a formula.
/// Examples: `Fe`, `Co`, `B`
pub type ElementSymbol = String;
/// Dataset column name (scalar field or element symbol).
/// Examples: `primary_crystallization`, `curie_temperature`, `Nb`
pub type FieldName = String;
/// Directory name of a sample group.
/// Example: `HOTG12`
pub type GroupName = String;
/// Path strings kept for provenance.
/// Example: `material_database/lauren/HOTG12/0457`
pub type PathString = String;
/// Warning/log message text.
/// Examples: `skipping unreadable note`, `sample failed mid-assembly`
pub type LogMessage = String;
