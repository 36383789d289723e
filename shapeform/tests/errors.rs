use std::collections::{BTreeMap, HashMap};

use insta::assert_snapshot;
use shapeform::{
    DecodeError, EncodeError, Marshaller, SchemaError, UnknownFieldPolicy, from_str, record,
    to_string,
};
use shapeform_testhelpers::test;

#[derive(Debug, Default, PartialEq)]
struct Point {
    x: i32,
}

record!(Point { x: i32 });

#[derive(Debug, Default, PartialEq)]
struct Shapes {
    p: Point,
    t: [u8; 3],
    ids: BTreeMap<u8, String>,
    list: Vec<u8>,
}

record!(Shapes {
    p: Point,
    t: [u8; 3],
    ids: BTreeMap<u8, String>,
    list: Vec<u8>,
});

#[derive(Debug, Default)]
struct Clash {
    first: String,
    second: String,
}

record!(Clash {
    #[form(rename = "dup")]
    first: String,
    #[form(rename = "dup")]
    second: String,
});

#[derive(Debug, Default)]
struct TwoSlots {
    a: HashMap<String, String>,
    b: HashMap<String, String>,
}

record!(TwoSlots {
    #[form(additional)]
    a: HashMap<String, String>,
    #[form(additional)]
    b: HashMap<String, String>,
});

#[derive(Debug, Default)]
struct NumericSlot {
    rest: BTreeMap<u32, String>,
}

record!(NumericSlot {
    #[form(additional)]
    rest: BTreeMap<u32, String>,
});

#[derive(Debug, Default)]
struct Callback {
    on_submit: Option<fn() -> u8>,
}

record!(Callback {
    on_submit: Option<fn() -> u8>,
});

fn decode_err(input: &str) -> DecodeError {
    Marshaller::new()
        .with_unknown_fields(UnknownFieldPolicy::Fail)
        .unmarshal::<Shapes>(input)
        .unwrap_err()
}

#[test]
fn malformed_keys() {
    assert_snapshot!(decode_err("list=1&p%5Bx=1"), @"malformed key `p[x`: unclosed `[`");
    assert_snapshot!(decode_err("p[x]y=1"), @"malformed key `p[x]y`: text after a closing bracket");
    assert_snapshot!(decode_err("[x]=1"), @"malformed key `[x]`: key starts with a bracket");
    assert_snapshot!(decode_err("=1"), @"malformed key ``: empty key");
}

#[test]
fn conflicting_keys() {
    assert_snapshot!(
        decode_err("list=1&list[0]=2"),
        @"conflicting keys at `list`: used both as a value and as a container"
    );
    assert_snapshot!(
        decode_err("ids[0]=a&ids[x]=b"),
        @"conflicting keys at `ids`: used with both indices and names"
    );
}

#[test]
fn conversion_failures_name_the_path() {
    assert_snapshot!(decode_err("list=1&list=300"), @"cannot read `300` at `list[1]` as u8");
    assert_snapshot!(decode_err("p[x]=1.5"), @"cannot read `1.5` at `p[x]` as i32");
    assert_snapshot!(decode_err("p[x][y]=1"), @"expected a single i32 at `p[x]`");
    assert_snapshot!(decode_err("ids[x]=a"), @"cannot read `x` at `ids[x]` as a u8 map key");
    assert_snapshot!(decode_err("t=1&t=2"), @"expected exactly 3 items (found 2) at `t`");
    assert_snapshot!(decode_err("list[a]=1"), @"expected a list at `list`");
    assert_snapshot!(decode_err("p=flat"), @"cannot read `flat` at `p` as a `errors::Point` record");
    assert_snapshot!(decode_err("p[0]=1"), @"expected a `errors::Point` record at `p`");
}

#[test]
fn conversion_failures_carry_the_decoded_token() {
    let err = decode_err("list=%E2%9C%93");
    let DecodeError::ValueConversion { path, token, .. } = &err else {
        panic!("expected a conversion failure, got {err:?}");
    };
    assert_eq!(path.to_string(), "list[0]");
    assert_eq!(token.as_deref(), Some("✓"));
}

#[test]
fn unknown_fields() {
    assert_snapshot!(decode_err("list=1&nope=2"), @"unknown field `nope`");
    assert_snapshot!(decode_err("p[x]=1&p[z]=2"), @"unknown field `p[z]`");
}

#[test]
fn schema_errors() {
    assert_snapshot!(
        to_string(&Clash::default()).unwrap_err(),
        @"fields `first` and `second` of `errors::Clash` both use the key `dup`"
    );
    assert_snapshot!(
        from_str::<TwoSlots>("").unwrap_err(),
        @"`errors::TwoSlots` has two additional-properties fields: `a` and `b`"
    );
    assert_snapshot!(
        Marshaller::new().schema_of::<NumericSlot>().unwrap_err(),
        @"additional-properties field `rest` of `errors::NumericSlot` must have text keys"
    );
}

#[test]
fn unsupported_shapes() {
    assert_snapshot!(
        to_string(&5u32).unwrap_err(),
        @"`u32` is not supported: a single value has no key to travel under"
    );
    let err = from_str::<Callback>("").unwrap_err();
    let DecodeError::Schema(SchemaError::UnsupportedShape { shape, .. }) = &err else {
        panic!("expected UnsupportedShape, got {err:?}");
    };
    assert!(shape.is_type::<fn() -> u8>());
}

#[test]
fn errors_expose_their_source() {
    use core::error::Error;

    let err = to_string(&Clash::default()).unwrap_err();
    assert!(matches!(err, EncodeError::Schema(_)));
    assert!(err.source().is_some());

    assert!(decode_err("nope=1").source().is_none());
}
