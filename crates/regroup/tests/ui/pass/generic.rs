use regroup::{ReGroup, Regroup};

#[derive(Regroup, Default)]
struct Pair<T> {
    #[regroup("left")]
    left: T,
    #[regroup("right")]
    right: T,
}

fn main() {
    let re = ReGroup::must_compile(r"(?P<left>\d+)/(?P<right>\d+)");
    let pair: Pair<u16> = re.parse("3/4").unwrap();
    assert_eq!((pair.left, pair.right), (3, 4));

    let words: Pair<String> = re.parse("10/20").unwrap();
    assert_eq!(words.left, "10");
}
