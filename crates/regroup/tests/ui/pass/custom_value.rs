use regroup::{ConvertError, ReGroup, Regroup, Registry};

#[derive(Debug, Default, PartialEq)]
struct Port(u16);

regroup::bind_value!(Port);

#[derive(Regroup, Default)]
struct Listen {
    #[regroup("host")]
    host: String,
    #[regroup("port")]
    port: Port,
}

fn parse_port(src: &str) -> Result<Port, ConvertError> {
    Ok(Port(src.parse()?))
}

fn main() {
    let mut registry = Registry::builtin();
    registry.register_scalar::<Port>(parse_port);
    let re = ReGroup::must_compile(r"(?P<host>[^:]+):(?P<port>\d+)").with_registry(registry);
    let listen: Listen = re.parse("localhost:8080").unwrap();
    assert_eq!(listen.host, "localhost");
    assert_eq!(listen.port, Port(8080));
}
