use regroup::{ReGroup, Regroup};

#[derive(Regroup, Default)]
struct Inner {
    #[regroup("n")]
    n: i64,
}

#[derive(Regroup, Default)]
struct Outer {
    inner: Inner,
    boxed: Box<Inner>,
    maybe: Option<Inner>,
    #[regroup("n")]
    count: Option<i64>,
}

fn main() {
    let re = ReGroup::must_compile(r"(?P<n>-?\d+)");
    let mut outer = Outer {
        maybe: Some(Inner::default()),
        count: Some(0),
        ..Outer::default()
    };
    re.match_to_target("-4", &mut outer).unwrap();
    assert_eq!(outer.inner.n, -4);
    assert_eq!(outer.boxed.n, -4);
    assert_eq!(outer.maybe.map(|inner| inner.n), Some(-4));
    assert_eq!(outer.count, Some(-4));
}
