use alloy_notes::extract::{CompositionExtractor, DefectExtractor, ThermalExtractor};
use alloy_notes::{
    Dataset, DatasetView, FieldExtractor, Predicate, Projection, SampleRecord, ScalarField,
    default_extractors, field_range, filter, project, project_composition,
};

fn ten_samples() -> Vec<SampleRecord> {
    (0..10)
        .map(|idx| {
            let mut record = SampleRecord::new(format!("HOTG1_{idx:04}"), "db");
            record.composition.insert("Fe".to_string(), 60.0 + idx as f64);
            if idx % 3 == 0 {
                record.composition.insert("Nb".to_string(), 3.0);
            }
            // Rows 2, 5 and 8 have no Curie temperature.
            if idx % 3 != 2 {
                record.curie_temperature = Some(300.0 + 25.0 * idx as f64);
            }
            record
        })
        .collect()
}

#[test]
fn range_filter_never_returns_missing_or_out_of_range_rows() {
    let dataset = Dataset::build(&ten_samples());
    assert_eq!(dataset.len(), 10);

    let all = filter(&dataset, &[Predicate::range("curie_temperature", f64::MIN, f64::MAX)]);
    assert_eq!(all.len(), 7);

    let (lo, hi) = (325.0, 475.0);
    let view = filter(&dataset, &[Predicate::range("curie_temperature", lo, hi)]);
    assert!(view.len() <= 7);
    for value in view.values("curie_temperature") {
        let value = value.unwrap();
        assert!((lo..=hi).contains(&value));
    }
    assert_eq!(
        view.sample_ids(),
        vec!["HOTG1_0001", "HOTG1_0003", "HOTG1_0004", "HOTG1_0006", "HOTG1_0007"]
    );
}

#[test]
fn available_fields_cover_present_scalars_and_every_element() {
    let records = ten_samples();
    let dataset = Dataset::build(&records);
    let fields = dataset.available_fields();

    for field in ScalarField::ALL {
        let present = records.iter().any(|record| record.scalar(field).is_some());
        assert_eq!(fields.iter().any(|name| name == field.name()), present);
    }
    for record in &records {
        for element in record.composition.keys() {
            assert!(fields.contains(element));
        }
    }
    assert!(!fields.iter().any(|name| name == "sample_id"));
}

#[test]
fn element_absence_is_missing_rather_than_zero() {
    let dataset = Dataset::build(&ten_samples());
    let view = filter(&dataset, &[Predicate::equals("Nb", 0.0)]);
    assert!(view.is_empty());
    let with_nb = filter(&dataset, &[Predicate::equals("Nb", 3.0)]);
    assert_eq!(with_nb.len(), 4);
}

#[test]
fn projection_and_composition_series_drop_incomplete_rows() {
    let dataset = Dataset::build(&ten_samples());
    let view = DatasetView::all(&dataset);

    let projection = project(&view, "Fe", "curie_temperature", Some("Nb")).unwrap();
    assert_eq!(projection.points().len(), 7);
    let colored = projection.points().iter().filter(|p| p.color.is_some()).count();
    assert_eq!(colored, 4);

    let series = project_composition(&view, "curie_temperature", None).unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].name, "Fe");
    assert_eq!(series[0].points.len(), 7);
    assert_eq!(series[1].name, "Nb");
    assert_eq!(series[1].points.len(), 4);

    let out_of_range: Predicate = "curie_temperature=1000..2000".parse().unwrap();
    let empty = filter(&dataset, &[out_of_range]);
    assert_eq!(
        project(&empty, "Fe", "curie_temperature", None).unwrap(),
        Projection::Empty
    );
    assert!(project_composition(&empty, "curie_temperature", None).unwrap().is_empty());
}

#[test]
fn field_range_tracks_present_values() {
    let dataset = Dataset::build(&ten_samples());
    let range = field_range(&dataset, "curie_temperature").unwrap();
    assert_eq!(range.min, 300.0);
    assert_eq!(range.max, 525.0);
    assert_eq!(range.count, 7);
    assert!(field_range(&dataset, "num_pinholes").is_none());
}

#[test]
fn extractor_examples_produce_expected_fields() {
    let composition = CompositionExtractor
        .extract("Composition: Fe2Co1.5Nb", "HOTG1_0001")
        .composition
        .unwrap();
    let pairs: Vec<(&str, f64)> = composition
        .iter()
        .map(|(element, amount)| (element.as_str(), *amount))
        .collect();
    assert_eq!(pairs, vec![("Fe", 2.0), ("Co", 1.5), ("Nb", 1.0)]);

    let thermal = ThermalExtractor.extract(
        "Primary crystallization peak: 450C\nnotes\nSecondary crystallization peak: 380C\n",
        "HOTG1_0001",
    );
    assert_eq!(thermal.primary_crystallization, Some(450.0));
    assert_eq!(thermal.secondary_crystallization, Some(380.0));

    let defect = DefectExtractor.extract(
        "Number of pinholes: 12\nPinhole area: 3.5%\n",
        "HOTG1_0001",
    );
    assert_eq!(defect.num_pinholes, Some(12));
    assert_eq!(defect.pinhole_area_percent, Some(3.5));
}

#[test]
fn every_extractor_is_idempotent_and_tolerant() {
    let texts = [
        "",
        "Composition: Fe2Co1.5Nb\nPrimary peak 450C\nNumber of pinholes: 3\nCurie temp: 400C\n",
        "garbage ::: %%% °C K\n\u{0}\u{7f}",
    ];
    for extractor in default_extractors() {
        for text in texts {
            let first = extractor.extract(text, "HOTG1_0001");
            let second = extractor.extract(text, "HOTG1_0001");
            assert_eq!(first, second, "{} extractor", extractor.kind());
        }
        assert!(extractor.extract("", "HOTG1_0001").is_empty());
    }
}
