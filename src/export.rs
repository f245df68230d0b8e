use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::data::SampleRecord;
use crate::dataset::Dataset;
use crate::errors::AlloyError;

/// Write the full tabular dump as a JSON array of row objects.
pub fn write_dataset_json(dataset: &Dataset, path: &Path) -> Result<(), AlloyError> {
    write_json(&dataset.to_json_rows(), path)?;
    info!(path = %path.display(), rows = dataset.len(), "wrote dataset json");
    Ok(())
}

/// Write assembled records, compositions nested, as a JSON array.
pub fn write_records_json(records: &[SampleRecord], path: &Path) -> Result<(), AlloyError> {
    write_json(records, path)?;
    info!(path = %path.display(), records = records.len(), "wrote records json");
    Ok(())
}

/// Serialize, write next to the target, then rename into place.
fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), AlloyError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    fn records() -> Vec<SampleRecord> {
        let mut record = SampleRecord::new("HOTG1_0001", "db/lauren/HOTG1/0001");
        record.composition.insert("Fe".to_string(), 80.0);
        record.composition.insert("B".to_string(), 20.0);
        record.num_pinholes = Some(3);
        vec![record]
    }

    #[test]
    fn dataset_dump_round_trips_through_disk() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("out/dataset.json");
        let dataset = Dataset::build(&records());
        write_dataset_json(&dataset, &path).unwrap();

        let parsed: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Fe"], serde_json::json!(80.0));
        assert_eq!(rows[0]["curie_temperature"], Value::Null);
        let keys: Vec<&str> = rows[0].as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(&keys[..3], &["sample_id", "source_path", "primary_crystallization"]);
    }

    #[test]
    fn records_keep_nested_composition() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("records.json");
        write_records_json(&records(), &path).unwrap();

        let back: Vec<SampleRecord> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, records());
        assert_eq!(back[0].composition.keys().collect::<Vec<_>>(), vec!["Fe", "B"]);
    }
}
