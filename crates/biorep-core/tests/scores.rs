use biorep_core::models::biomarker::BiomarkerModel;
use biorep_core::models::score::{ScoreSet, format_score, key, parse_decimal};

#[test]
fn formatting_is_idempotent() {
    for raw in [0.45_f64, 1.23456, 12.0, -0.0004] {
        let once = format_score(raw);
        let twice = format_score(parse_decimal(&once).unwrap());
        assert_eq!(once, twice);
    }
}

#[test]
fn three_decimals_exactly() {
    assert_eq!(format_score(0.45), "0.450");
    assert_eq!(format_score(1.23456), "1.235");
    assert_eq!(format_score(7.0), "7.000");
}

#[test]
fn comma_and_point_parse_identically() {
    assert_eq!(parse_decimal("1,23"), parse_decimal("1.23"));
    assert_eq!(parse_decimal(" 0,5 "), Some(0.5));
    assert_eq!(parse_decimal("n/a"), None);
}

#[test]
fn missing_scores_are_unknown_not_zero() {
    let mut scores = ScoreSet::new();
    scores.insert(key::CAD, 0.2);
    assert_eq!(scores.value(key::CAD), Some(0.2));
    assert_eq!(scores.value(key::HF), None);
    assert_eq!(scores.get(key::HF), None);
}

#[test]
fn models_map_to_score_keys() {
    assert_eq!(BiomarkerModel::Oncorisk.score_key(), key::ONKORISK);
    assert_eq!("cad".parse::<BiomarkerModel>().unwrap(), BiomarkerModel::Cad);
    assert!("xyz".parse::<BiomarkerModel>().is_err());
}
