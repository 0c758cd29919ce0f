use plinth_derive::plinth_error;
use std::borrow::Cow;

#[plinth_error]
pub enum DemoError {
    #[code("DEMO_IO_ERROR")]
    #[error("io failure{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("value missing{}", format_context(.context))]
    NotFound { context: Option<Cow<'static, str>> },

    #[error("internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[test]
fn plinth_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/plinth_error_pass.rs");
    t.compile_fail("tests/ui/plinth_error_missing_context.rs");
    t.compile_fail("tests/ui/plinth_error_tuple_variant.rs");
    t.compile_fail("tests/ui/plinth_error_bad_code.rs");
}

#[test]
fn question_mark_wraps_source_errors() {
    fn read() -> Result<String, DemoError> {
        Err(std::io::Error::other("denied"))?
    }

    let err = read().expect_err("must fail");
    assert!(matches!(err, DemoError::Io { context: None, .. }));
    assert_eq!(err.to_string(), "io failure: denied");
}

#[test]
fn context_attaches_through_the_ext_trait() {
    let result: Result<(), std::io::Error> = Err(std::io::Error::other("denied"));
    let err = result.context("reading settings file").expect_err("must fail");

    assert!(matches!(err, DemoError::Io { context: Some(_), .. }));
    assert_eq!(err.to_string(), "io failure (reading settings file): denied");
}

#[test]
fn context_also_applies_to_already_wrapped_results() {
    let result: Result<(), DemoError> = Err(DemoError::NotFound { context: None });
    let err = result.context("looking up component").expect_err("must fail");

    assert_eq!(err.to_string(), "value missing (looking up component)");
}

#[test]
fn internal_variant_converts_from_strings() {
    let err: DemoError = "unexpected state".into();
    assert_eq!(err.to_string(), "internal error: unexpected state");

    let err: DemoError = format!("bad slot {}", 7).into();
    assert_eq!(err.to_string(), "internal error: bad slot 7");
}

#[test]
fn codes_come_from_the_attribute_or_the_variant_name() {
    let io: DemoError = std::io::Error::other("x").into();
    assert_eq!(io.code(), "DEMO_IO_ERROR");
    assert_eq!(DemoError::NotFound { context: None }.code(), "NOT_FOUND");

    let internal: DemoError = "y".into();
    assert_eq!(internal.code(), "INTERNAL");
}
