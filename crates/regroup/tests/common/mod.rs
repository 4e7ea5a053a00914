//! Record shapes shared by the integration tests.

#![allow(dead_code, reason = "Each test binary uses a subset of the fixtures")]

use std::sync::Once;
use std::time::Duration;

use regroup::Regroup;

pub const EXPR: &str = r"(?P<duration>.*?)\s+(?P<num>\d+)\s+(?P<str>.*)";

#[derive(Regroup, Debug, Default, Clone, PartialEq)]
pub struct Single {
    #[regroup("duration")]
    pub duration: Duration,
}

#[derive(Regroup, Debug, Default, Clone, PartialEq)]
pub struct Including {
    #[regroup("num")]
    pub num: i32,
    #[regroup("str")]
    pub text: String,
    pub single: Single,
}

#[derive(Regroup, Debug, Default, Clone, PartialEq)]
pub struct IncorrectGroup {
    #[regroup("not_found")]
    pub text: String,
}

#[derive(Regroup, Debug, Default, Clone, PartialEq)]
pub struct Required {
    #[regroup("str,required")]
    pub text: String,
}

#[derive(Regroup, Debug, Default, Clone, PartialEq)]
pub struct IncludingPointers {
    #[regroup("num")]
    pub num: Option<u32>,
    #[regroup("str")]
    pub text: String,
    pub single: Option<Box<Single>>,
}

#[derive(Regroup, Debug, Default, Clone, PartialEq)]
pub struct FloatBool {
    #[regroup("float")]
    pub f: f32,
    #[regroup("bool")]
    pub b: bool,
}

#[derive(Regroup, Debug, Default, Clone, PartialEq)]
pub struct NonExtracting {
    pub single: Single,
    pub non_extract: String,
}

pub fn secs(secs: u64) -> Duration {
    Duration::from_secs(secs)
}

static TRACING_INIT: Once = Once::new();

/// Route binder events to the test output when `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer())
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
