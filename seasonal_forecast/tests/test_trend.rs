use pretty_assertions::assert_eq;
use rstest::rstest;
use seasonal_forecast::Trend;

#[rstest]
#[case(16.0, 14.0, Trend::Increasing)]
#[case(14.0, 16.0, Trend::Decreasing)]
#[case(10.0, 10.0, Trend::Flat)]
#[case(0.0, -0.0, Trend::Flat)]
fn classification_is_strict(#[case] predicted: f64, #[case] baseline: f64, #[case] expected: Trend) {
    assert_eq!(Trend::classify(predicted, baseline), expected);
}

#[test]
fn no_tolerance_band() {
    // A near-miss is not Flat; equality is taken literally.
    assert_eq!(Trend::classify(10.0 + 1e-12, 10.0), Trend::Increasing);
    assert_eq!(Trend::classify(10.0 - 1e-12, 10.0), Trend::Decreasing);
}

#[test]
fn serializes_as_plain_labels() {
    assert_eq!(
        serde_json::to_string(&Trend::Increasing).unwrap(),
        "\"Increasing\""
    );
    assert_eq!(Trend::Decreasing.to_string(), "Decreasing");
    assert_eq!(Trend::Flat.to_string(), "Flat");
}
