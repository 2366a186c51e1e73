use cotizaciones::extraction_config::ExtractionMode;
use cotizaciones::measure_extractor::MeasureExtractor;
use cotizaciones::measure_list::MeasureListMerger;
use cotizaciones::measure_model::{render, EdgeFinish, MeasureFields, MeasurementRecord};
use cotizaciones::quote_errors::QuoteError;

fn assert_contiguous(list: &MeasureListMerger) {
    let numbers: Vec<usize> = list.records().iter().map(|r| r.line_number()).collect();
    let expected: Vec<usize> = (1..=list.line_count()).collect();
    assert_eq!(numbers, expected);
}

fn assert_descriptions_consistent(list: &MeasureListMerger) {
    for record in list.records() {
        assert_eq!(record.description(), render(record));
    }
}

#[test]
fn test_contiguity_after_every_operation() {
    let extractor = MeasureExtractor::new();
    let mut list = MeasureListMerger::new();

    list.append_one(MeasureFields::dimensions("120", "60")).unwrap();
    assert_contiguous(&list);

    list.append_many(extractor.extract(
        "2 unidades de 80 por 40 y 50 x 30 cantidad 4",
        ExtractionMode::Dictation,
    ));
    assert_contiguous(&list);
    assert_eq!(list.line_count(), 3);

    list.remove_at(1).unwrap();
    assert_contiguous(&list);

    let _ = list.remove_at(9);
    assert_contiguous(&list);

    let _ = list.append_one(MeasureFields::dimensions("", "60"));
    assert_contiguous(&list);

    list.append_many(extractor.extract("120 por 60", ExtractionMode::Caption));
    assert_contiguous(&list);

    list.remove_at(list.line_count()).unwrap();
    assert_contiguous(&list);
    assert_descriptions_consistent(&list);
}

#[test]
fn test_removal_reindexing() {
    let mut list = MeasureListMerger::new();
    list.append_many(vec![
        MeasurementRecord::new(1, 100.0, 10.0).unwrap(),
        MeasurementRecord::new(1, 200.0, 20.0).unwrap(),
        MeasurementRecord::new(1, 300.0, 30.0).unwrap(),
    ]);

    list.remove_at(2).unwrap();

    assert_eq!(list.line_count(), 2);
    assert_eq!(list.get(1).unwrap().length(), 100.0);
    assert_eq!(list.get(2).unwrap().length(), 300.0);
    assert_eq!(list.get(2).unwrap().line_number(), 2);
}

#[test]
fn test_missing_field_rejection() {
    let mut list = MeasureListMerger::new();

    let result = list.append_one(MeasureFields::dimensions("", "60"));

    assert_eq!(result, Err(QuoteError::MissingRequiredField("length")));
    assert!(list.is_empty());
}

#[test]
fn test_cross_batch_duplicates_allowed() {
    let extractor = MeasureExtractor::new();
    let mut list = MeasureListMerger::new();

    for _ in 0..2 {
        list.append_many(extractor.extract("120 por 60", ExtractionMode::Dictation));
    }
    list.append_one(MeasureFields::dimensions("120", "60")).unwrap();

    assert_eq!(list.line_count(), 3);
    assert_eq!(list.total_pieces(), 3);
}

#[test]
fn test_editing_one_record_leaves_others() {
    let mut list = MeasureListMerger::new();
    list.append_many(vec![
        MeasurementRecord::new(1, 120.0, 60.0).unwrap(),
        MeasurementRecord::new(2, 80.0, 40.0).unwrap(),
    ]);
    let second_before = list.records()[1].description().to_string();

    let updated = list
        .update_at(
            1,
            MeasureFields::dimensions("120", "60")
                .with_quantity("3")
                .with_edge_finish(EdgeFinish::Hard),
        )
        .unwrap();

    assert_eq!(updated.description(), "Cant: 3, L120, A60, P-ninguna, Bordo-1 Largo, B-Duro");
    assert_eq!(list.records()[1].description(), second_before);
    assert_descriptions_consistent(&list);
}

#[test]
fn test_total_pieces_and_line_count() {
    let mut list = MeasureListMerger::new();
    list.append_one(MeasureFields::dimensions("120", "60").with_quantity("4")).unwrap();
    list.append_one(MeasureFields::dimensions("80", "40").with_quantity(" ")).unwrap();

    assert_eq!(list.line_count(), 2);
    assert_eq!(list.total_pieces(), 5);
}
