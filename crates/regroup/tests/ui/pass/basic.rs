use regroup::{ReGroup, Regroup};

#[derive(Regroup, Default)]
struct Entry {
    #[regroup("num,required")]
    num: u32,
    #[regroup("name")]
    name: String,
}

fn main() {
    let re = ReGroup::must_compile(r"(?P<num>\d+) (?P<name>\w+)");
    let entry: Entry = re.parse("7 seven").unwrap();
    assert_eq!(entry.num, 7);
    assert_eq!(entry.name, "seven");
}
