//! Single-match binding.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod common;

use std::time::Duration;

use pretty_assertions::assert_eq;
use regroup::{ConvertError, DurationError, Error, ReGroup, Regroup};

use common::{
    init_tracing, secs, FloatBool, Including, IncludingPointers, IncorrectGroup, NonExtracting, Required,
    Single, EXPR,
};

fn bind<T: regroup::Bind + Default>(expr: &str, s: &str) -> Result<T, Error> {
    init_tracing();
    let re = ReGroup::compile(expr)?;
    let mut target = T::default();
    re.match_to_target(s, &mut target)?;
    Ok(target)
}

#[test]
fn single_struct() {
    let got: Single = bind(EXPR, "5s 123 foo").unwrap();
    assert_eq!(got, Single { duration: secs(5) });
}

#[test]
fn nested_struct_draws_from_same_match() {
    let got: Including = bind(EXPR, "5s 123 foo").unwrap();
    assert_eq!(
        got,
        Including {
            num: 123,
            text: "foo".to_owned(),
            single: Single { duration: secs(5) },
        }
    );
}

#[test]
fn float_and_bool() {
    let got: FloatBool = bind(r"(?P<float>\d+\.\d+)\s+(?P<bool>.*)", "5.321 true").unwrap();
    assert_eq!(got, FloatBool { f: 5.321, b: true });
}

#[test]
fn untagged_fields_are_left_alone() {
    let got: NonExtracting = bind(EXPR, "5s 123 foo").unwrap();
    assert_eq!(
        got,
        NonExtracting {
            single: Single { duration: secs(5) },
            non_extract: String::new(),
        }
    );
}

#[test]
fn empty_optional_group_keeps_default() {
    let got: Including = bind(
        r"(?P<duration>.*?)\s+(?P<num>\d+)\s*(?P<str>.*)?",
        "5s 123",
    )
    .unwrap();
    assert_eq!(
        got,
        Including {
            num: 123,
            text: String::new(),
            single: Single { duration: secs(5) },
        }
    );
}

#[test]
fn no_match() {
    let err = bind::<Single>(EXPR, "5s aa foo").unwrap_err();
    assert!(matches!(err, Error::NoMatch));
}

#[test]
fn unknown_group() {
    let err = bind::<IncorrectGroup>(EXPR, "5s 123 foo").unwrap_err();
    assert!(matches!(err, Error::UnknownGroup { group: "not_found" }));
}

#[test]
fn required_present() {
    let got: Required = bind(EXPR, "5s 123 foo").unwrap();
    assert_eq!(got.text, "foo");
}

#[test]
fn required_empty() {
    let err = bind::<Required>(EXPR, "5s 123 ").unwrap_err();
    assert!(matches!(
        err,
        Error::RequiredGroupEmpty {
            group: "str",
            field: "text"
        }
    ));
}

#[test]
fn duration_parse_error() {
    let err = bind::<Single>(EXPR, "5ls 123 foo").unwrap_err();
    match err {
        Error::Conversion {
            group: "duration",
            source: ConvertError::Duration(DurationError::UnknownUnit { unit, .. }),
        } => assert_eq!(unit, "ls"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn number_parse_error() {
    let err = bind::<Including>(
        r"(?P<duration>.*?)\s+(?P<num>\d+\.\d+)\s+(?P<str>.*)",
        "5s 123.3 foo",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Conversion {
            group: "num",
            source: ConvertError::Int(_)
        }
    ));
}

#[test]
fn bool_parse_error() {
    let err = bind::<FloatBool>(r"(?P<float>\d+\.\d+)\s+(?P<bool>.*)", "123.3 invalid_bool")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Conversion {
            group: "bool",
            source: ConvertError::Bool { .. }
        }
    ));
}

#[test]
fn float_parse_error() {
    let err = bind::<FloatBool>(r"(?P<float>\d+\.s\d+)\s+(?P<bool>.*)", "123.s3 true")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Conversion {
            group: "float",
            source: ConvertError::Float(_)
        }
    ));
}

#[test]
fn unsigned_parse_error() {
    let re = ReGroup::must_compile(r"(?P<duration>.*?)\s+(?P<num>-\d+)\s+(?P<str>.*)");
    let mut target = IncludingPointers {
        num: Some(1),
        ..IncludingPointers::default()
    };
    let err = re.match_to_target("5s -3 str", &mut target).unwrap_err();
    assert!(matches!(
        err,
        Error::Conversion {
            group: "num",
            source: ConvertError::Int(_)
        }
    ));
}

#[test]
fn compile_error() {
    let err = bind::<Single>("invlid[", "").unwrap_err();
    assert!(matches!(err, Error::Compile(_)));
}

#[test]
#[should_panic(expected = "regroup: Compile(")]
fn must_compile_panics() {
    let _ = ReGroup::must_compile("invlid[");
}

#[test]
fn unallocated_pointer_field() {
    let err = bind::<IncludingPointers>(EXPR, "5s 123 foo").unwrap_err();
    assert!(matches!(err, Error::NilOptionalField { field: "num" }));
    assert!(err.to_string().contains("can't set value to nil pointer in field"));
}

#[test]
fn allocated_pointer_fields() {
    let re = ReGroup::must_compile(EXPR);
    let mut target = IncludingPointers {
        num: Some(0),
        text: String::new(),
        single: Some(Box::default()),
    };
    re.match_to_target("5s 123 foo", &mut target).unwrap();
    assert_eq!(
        target,
        IncludingPointers {
            num: Some(123),
            text: "foo".to_owned(),
            single: Some(Box::new(Single { duration: secs(5) })),
        }
    );
}

#[test]
fn allocated_optional_target() {
    let re = ReGroup::must_compile(EXPR);
    let mut target = Some(Single::default());
    re.match_to_target("5s 123 foo", &mut target).unwrap();
    assert_eq!(target, Some(Single { duration: secs(5) }));
}

#[test]
fn parse_into_default() {
    let re = ReGroup::must_compile(EXPR);
    let got: Including = re.parse("8h 7 bar").unwrap();
    assert_eq!(got.single.duration, Duration::from_secs(8 * 3600));
    assert_eq!(got.num, 7);
    assert_eq!(got.text, "bar");
}

#[test]
fn fields_bound_before_failure_keep_values() {
    #[derive(Regroup, Debug, Default)]
    struct Partial {
        #[regroup("num")]
        num: i32,
        #[regroup("str")]
        flag: bool,
        #[regroup("duration")]
        duration: Duration,
    }

    let re = ReGroup::must_compile(EXPR);
    let mut target = Partial::default();
    let err = re.match_to_target("5s 123 foo", &mut target).unwrap_err();
    assert!(matches!(err, Error::Conversion { group: "str", .. }));
    assert_eq!(target.num, 123);
    assert!(!target.flag);
    assert_eq!(target.duration, Duration::ZERO);
}

#[test]
fn narrow_integers_reject_overflow() {
    #[derive(Regroup, Debug, Default)]
    struct Narrow {
        #[regroup("num")]
        num: i8,
    }

    let err = bind::<Narrow>(r"(?P<num>\d+)", "300").unwrap_err();
    assert!(matches!(
        err,
        Error::Conversion {
            group: "num",
            source: ConvertError::Int(_)
        }
    ));
    let got: Narrow = bind(r"(?P<num>-?\d+)", "-128").unwrap();
    assert_eq!(got.num, i8::MIN);
}
