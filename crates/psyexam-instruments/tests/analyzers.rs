use psyexam_instruments::{analyzer_key, get_analyzer};

fn slots(values: &[i64]) -> Vec<Option<i64>> {
    let mut items: Vec<Option<i64>> = values.iter().copied().map(Some).collect();
    items.resize(10, None);
    items
}

#[test]
fn exam_names_normalize_to_analyzer_keys() {
    assert_eq!(analyzer_key("PHQ-9"), "phq_9");
    assert_eq!(analyzer_key(" sds "), "sds");
    assert!(get_analyzer("PHQ-9").is_some());
    assert!(get_analyzer("phq_9").is_some());
    assert!(get_analyzer("SDS").is_some());
    assert!(get_analyzer("gad-7").is_none());
}

#[test]
fn phq9_totals_and_bands_severity() {
    let analyzer = get_analyzer("phq-9").unwrap();
    let analysis = analyzer.analyze(&slots(&[3, 3, 2, 2, 2, 1, 1, 1, 0]));

    assert_eq!(analysis.total_score, 15.0);
    assert_eq!(analysis.severity.as_deref(), Some("moderately severe"));
    assert!(analysis.interpretation.contains("15"));

    let domains = &analysis.details["domain_analysis"];
    assert_eq!(domains["mood"]["score"], 6);
    assert_eq!(domains["mood"]["max_score"], 6);
    assert_eq!(domains["mood"]["severity"], "severe");
    assert_eq!(domains["somatic"]["score"], 6);
    assert_eq!(domains["somatic"]["severity"], "severe");
    assert_eq!(domains["suicidal_ideation"]["score"], 0);
    assert_eq!(domains["suicidal_ideation"]["severity"], "mild");
    assert_eq!(analysis.details["item_scores"]["item0"], 3);
}

#[test]
fn phq9_severity_boundaries() {
    let analyzer = get_analyzer("phq-9").unwrap();
    let cases = [
        (4, "minimal"),
        (5, "mild"),
        (9, "mild"),
        (10, "moderate"),
        (14, "moderate"),
        (19, "moderately severe"),
        (20, "severe"),
        (27, "severe"),
    ];
    for (total, expected) in cases {
        let mut values = vec![0; 9];
        let mut remaining = total;
        for value in values.iter_mut() {
            let take = remaining.min(3);
            *value = take;
            remaining -= take;
        }
        let analysis = analyzer.analyze(&slots(&values));
        assert_eq!(analysis.total_score, total as f64);
        assert_eq!(analysis.severity.as_deref(), Some(expected), "total {total}");
    }
}

#[test]
fn phq9_missing_items_score_zero() {
    let analyzer = get_analyzer("phq-9").unwrap();
    let analysis = analyzer.analyze(&[Some(2), None, Some(1)]);

    assert_eq!(analysis.total_score, 3.0);
    assert_eq!(analysis.details["item_scores"]["item1"], 0);
    assert_eq!(analysis.details["item_scores"]["item8"], 0);
}

#[test]
fn sds_reverses_keyed_items_and_fills_missing_with_minimum() {
    let analyzer = get_analyzer("sds").unwrap();
    // Slot 2 is reverse-keyed: a raw 1 scores 4.
    let analysis = analyzer.analyze(&slots(&[4, 4, 1, 4, 4, 4, 1, 4, 4, 4]));

    // Ten answered slots at 4 each (two reversed), ten missing at 1 each.
    assert_eq!(analysis.total_score, 50.0);
    assert_eq!(analysis.details["item_scores"]["item2"], 4);
    assert_eq!(analysis.details["item_scores"]["item6"], 4);
    assert_eq!(analysis.details["item_scores"]["item19"], 1);
    assert_eq!(analysis.details["sds_index"], 62.5);
    assert_eq!(
        analysis.severity.as_deref(),
        Some("mild to moderate depression")
    );
    assert!(analysis.interpretation.contains("62.5"));
}

#[test]
fn sds_all_missing_is_normal_range() {
    let analyzer = get_analyzer("sds").unwrap();
    let analysis = analyzer.analyze(&[]);

    assert_eq!(analysis.total_score, 20.0);
    assert_eq!(analysis.severity.as_deref(), Some("normal"));
    let domains = &analysis.details["domain_analysis"];
    assert_eq!(domains["affective"]["score"], 6);
    assert_eq!(domains["affective"]["max_score"], 24);
    assert_eq!(domains["somatic"]["score"], 8);
    assert_eq!(domains["psychological"]["severity"], "normal");
}
