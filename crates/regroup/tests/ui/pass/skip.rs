use std::collections::HashMap;

use regroup::{ReGroup, Regroup};

#[derive(Regroup)]
struct Cached {
    #[regroup("key")]
    key: String,
    #[regroup(skip)]
    cache: HashMap<String, usize>,
    #[regroup(skip)]
    marker: Option<Box<u8>>,
}

#[derive(Regroup, Default)]
struct Opaque {
    #[regroup("key")]
    key: String,
    #[regroup(skip)]
    _raw: Option<Handle>,
}

#[derive(Default)]
struct Handle;

fn main() {
    let re = ReGroup::must_compile(r"(?P<key>\w+)");
    let prototype = Cached {
        key: String::new(),
        cache: HashMap::new(),
        marker: None,
    };
    let all = re.match_all_to_target("a b", None, &prototype).unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].cache.is_empty());
    assert!(all[1].marker.is_none());
    assert_eq!(all[1].key, "b");

    let opaque: Opaque = re.parse("c").unwrap();
    assert_eq!(opaque.key, "c");
}
