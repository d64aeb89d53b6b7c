use approx::assert_relative_eq;

use crate::expression::Expression;
use crate::property::{Property, ValueContext};
use crate::table_test::{kerbol, JOOL_SMA, KERBIN_SMA};
use crate::ExpressionError;

#[test]
fn parses_every_form() {
    assert_eq!("1.5e9".parse::<Expression>().unwrap(), Expression::Literal(1.5e9));
    assert_eq!(
        "Ratio(Kerbin.sma, 0.5)".parse::<Expression>().unwrap(),
        Expression::ratio("Kerbin", Property::SemiMajorAxis, 0.5)
    );
    assert_eq!(
        " resonance( Jool , 2:3 ) ".parse::<Expression>().unwrap(),
        Expression::resonance("Jool", 2, 3).unwrap()
    );
    assert_eq!(
        "OFFSET(Kerbin.mnl, -30)".parse::<Expression>().unwrap(),
        Expression::offset("Kerbin", Property::MeanLongitude, -30.0)
    );
}

#[test]
fn display_parses_back() {
    for text in [
        "Ratio(Kerbin.sma, 0.5)",
        "Resonance(Jool, 2:3)",
        "Offset(Kerbin.mnl, 30)",
    ] {
        let expression: Expression = text.parse().unwrap();
        assert_eq!(expression.to_string(), text);
    }
}

#[test]
fn malformed_text_is_rejected() {
    for text in ["", "Ratio(Kerbin.sma)", "Ratio(Kerbin, 2)", "Scale(Kerbin.sma, 2)", "Ratio(Kerbin.sma, x)", "Resonance(Jool, 2/3)", "nan"] {
        assert!(
            matches!(
                text.parse::<Expression>(),
                Err(ExpressionError::MalformedExpression { .. })
            ),
            "{text} should be malformed"
        );
    }
}

#[test]
fn zero_resonance_denominator_is_invalid() {
    assert_eq!(
        "Resonance(Jool, 2:0)".parse::<Expression>(),
        Err(ExpressionError::InvalidResonance { p: 2, q: 0 })
    );
    assert!(Expression::resonance("Jool", 0, 0).is_err());
}

#[test]
fn zero_resonance_numerator_collapses_to_the_centre() {
    let table = kerbol();
    let resonance: Expression = "Resonance(Jool, 0:1)".parse().unwrap();
    assert_eq!(resonance.resolve(&table, ValueContext::Length).unwrap(), 0.0);
}

#[test]
fn unknown_property_code_fails_at_parse() {
    assert!(matches!(
        "Ratio(Kerbin.albedo, 1)".parse::<Expression>(),
        Err(ExpressionError::UnknownProperty { .. })
    ));
}

#[test]
fn ratio_scales_the_property() {
    let table = kerbol();
    let half = Expression::ratio("Kerbin", Property::SemiMajorAxis, 0.5);
    assert_eq!(half.resolve(&table, ValueContext::Length).unwrap(), KERBIN_SMA * 0.5);
}

#[test]
fn one_to_one_resonance_is_the_semimajor_axis() {
    let table = kerbol();
    let resonance = Expression::resonance("Jool", 1, 1).unwrap();
    assert_eq!(resonance.resolve(&table, ValueContext::Length).unwrap(), JOOL_SMA);
}

#[test]
fn resonance_follows_keplers_third_law() {
    let table = kerbol();
    let inner = Expression::resonance("Jool", 2, 1).unwrap();
    let a = inner.resolve(&table, ValueContext::Length).unwrap();
    // A 2:1 body has twice Jool's period
    assert_relative_eq!((a / JOOL_SMA).powf(1.5), 2.0, max_relative = 1e-12);
}

#[test]
fn resolution_is_pure() {
    let table = kerbol();
    let expression: Expression = "Offset(Jool.mnl, 45)".parse().unwrap();
    let first = expression.resolve(&table, ValueContext::Angle).unwrap();
    for _ in 0..10 {
        assert_eq!(expression.resolve(&table, ValueContext::Angle).unwrap(), first);
    }
}

#[test]
fn offset_wraps_into_a_full_turn() {
    let table = kerbol();
    // Kerbin's mean longitude at t = 0 is 180°
    let ahead = Expression::offset("Kerbin", Property::MeanLongitude, 270.0);
    assert_relative_eq!(
        ahead.resolve(&table, ValueContext::Angle).unwrap(),
        90.0,
        epsilon = 1e-9
    );
    let behind = Expression::offset("Kerbin", Property::MeanLongitude, -200.0);
    assert_relative_eq!(
        behind.resolve(&table, ValueContext::Angle).unwrap(),
        340.0,
        epsilon = 1e-9
    );
}

#[test]
fn offset_needs_an_angle_property() {
    let table = kerbol();
    let bad = Expression::offset("Kerbin", Property::SemiMajorAxis, 10.0);
    assert!(matches!(
        bad.resolve(&table, ValueContext::Any),
        Err(ExpressionError::UnknownProperty { .. })
    ));
}

#[test]
fn property_kind_must_suit_the_context() {
    let table = kerbol();
    let radius = Expression::ratio("Kerbin", Property::Radius, 1.0);
    assert!(matches!(
        radius.resolve(&table, ValueContext::Angle),
        Err(ExpressionError::UnknownProperty { .. })
    ));
    let resonance = Expression::resonance("Jool", 3, 2).unwrap();
    assert!(resonance.resolve(&table, ValueContext::Angle).is_err());
    assert!(resonance.resolve(&table, ValueContext::Any).is_ok());
}

#[test]
fn unknown_body_fails_at_resolve() {
    let table = kerbol();
    let expression = Expression::ratio("Eeloo", Property::SemiMajorAxis, 1.0);
    assert_eq!(
        expression.resolve(&table, ValueContext::Length),
        Err(ExpressionError::UnknownBody("Eeloo".to_string()))
    );
}

#[test]
fn literals_ignore_the_table() {
    let table = kerbol();
    let literal = Expression::literal(42.0);
    assert_eq!(literal.resolve(&table, ValueContext::Angle).unwrap(), 42.0);
    assert_eq!(literal.as_literal(), Some(42.0));
    assert_eq!(literal.body(), None);
}

#[derive(Debug, serde::Deserialize)]
struct Holder {
    value: Expression,
}

#[test]
fn deserializes_numbers_and_text() {
    let number: Holder = toml::from_str("value = 100").unwrap();
    assert_eq!(number.value, Expression::Literal(100.0));

    let text: Holder = toml::from_str(r#"value = "Resonance(Jool, 3:2)""#).unwrap();
    assert_eq!(text.value, Expression::resonance("Jool", 3, 2).unwrap());

    assert!(toml::from_str::<Holder>(r#"value = "Ratio(Jool)""#).is_err());
}
