//! Integration tests for the transform pipeline

mod common;

use common::{FakeFixer, FakePrettifier};
use standard_formatter::style::Style;
use standard_formatter::transform::{Pipeline, PrettierOptions, TransformError};

#[test]
fn test_no_style_short_circuits() {
    let prettifier = FakePrettifier::identity();
    let fixer = FakeFixer::semicolon_stripper();
    let pipeline = Pipeline::new(&prettifier, &fixer);

    let out = pipeline
        .transform("var a = 1;\n", Style::None, true, None)
        .expect("Transform failed");

    assert_eq!(out, "var a = 1;\n");
    assert_eq!(prettifier.call_count(), 0);
    assert_eq!(fixer.call_count(), 0);
}

#[test]
fn test_fixer_output_is_used() {
    let prettifier = FakePrettifier::identity();
    let fixer = FakeFixer::semicolon_stripper();
    let pipeline = Pipeline::new(&prettifier, &fixer);

    let out = pipeline
        .transform("var a = 1;\n", Style::Standard, false, None)
        .expect("Transform failed");

    assert_eq!(out, "var a = 1\n");
    assert_eq!(fixer.calls.borrow()[0].0, "standard");
}

#[test]
fn test_already_clean_text_is_unchanged() {
    let prettifier = FakePrettifier::identity();
    let fixer = FakeFixer::semicolon_stripper();
    let pipeline = Pipeline::new(&prettifier, &fixer);

    let input = "const a = 1\n";
    let out = pipeline
        .transform(input, Style::Standard, false, None)
        .expect("Transform failed");

    assert_eq!(out, input);
}

#[test]
fn test_missing_output_returns_prettified_text() {
    let prettifier = FakePrettifier::new(|text| Ok(text.replace('"', "'")));
    let fixer = FakeFixer::new(|_| Ok(None));
    let pipeline = Pipeline::new(&prettifier, &fixer);

    let out = pipeline
        .transform("let s = \"x\"\n", Style::Standard, true, None)
        .expect("Transform failed");

    assert_eq!(out, "let s = 'x'\n");
}

#[test]
fn test_fixer_error_is_propagated() {
    let prettifier = FakePrettifier::identity();
    let fixer = FakeFixer::failing("Parsing error: Unexpected token");
    let pipeline = Pipeline::new(&prettifier, &fixer);

    let err = pipeline
        .transform("function (\n", Style::SemiStandard, false, None)
        .expect_err("Transform should fail");

    let TransformError::Fixer { package, .. } = err;
    assert_eq!(package, "semistandard");
}

#[test]
fn test_prettier_failure_is_not_fatal() {
    let prettifier = FakePrettifier::failing();
    let fixer = FakeFixer::semicolon_stripper();
    let pipeline = Pipeline::new(&prettifier, &fixer);

    let out = pipeline
        .transform("var a = 1;\n", Style::Standard, true, None)
        .expect("Transform failed");

    assert_eq!(prettifier.call_count(), 1);
    assert_eq!(fixer.calls.borrow()[0].1, "var a = 1;\n");
    assert_eq!(out, "var a = 1\n");
}

#[test]
fn test_fixer_runs_on_prettified_text() {
    let prettifier = FakePrettifier::new(|text| Ok(text.replace("  ", " ")));
    let fixer = FakeFixer::new(|_| Ok(None));
    let pipeline = Pipeline::new(&prettifier, &fixer);

    pipeline
        .transform("var  a = 1\n", Style::Standard, true, None)
        .expect("Transform failed");

    assert_eq!(fixer.calls.borrow()[0].1, "var a = 1\n");
}

#[test]
fn test_prettier_options_follow_style() {
    let prettifier = FakePrettifier::identity();
    let fixer = FakeFixer::new(|_| Ok(None));
    let pipeline = Pipeline::new(&prettifier, &fixer);

    pipeline
        .transform("a\n", Style::Standard, true, None)
        .expect("Transform failed");
    pipeline
        .transform("a\n", Style::SemiStandard, true, None)
        .expect("Transform failed");

    let calls = prettifier.calls.borrow();
    assert_eq!(
        calls[0],
        PrettierOptions {
            parser: "babel",
            semi: false,
            single_quote: true
        }
    );
    assert!(calls[1].semi);
}

#[test]
fn test_prettier_skipped_when_disabled() {
    let prettifier = FakePrettifier::identity();
    let fixer = FakeFixer::new(|_| Ok(None));
    let pipeline = Pipeline::new(&prettifier, &fixer);

    pipeline
        .transform("a\n", Style::Standard, false, None)
        .expect("Transform failed");

    assert_eq!(prettifier.call_count(), 0);
    assert_eq!(fixer.call_count(), 1);
}
