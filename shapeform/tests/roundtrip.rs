use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;

use indexmap::IndexMap;
use shapeform::{Formable, ListMode, Loose, Marshaller, record};
use shapeform_testhelpers::test;

#[derive(Clone, Debug, Default, PartialEq)]
struct Point {
    x: i32,
    y: i32,
    label: String,
}

record!(Point {
    x: i32,
    y: i32,
    label: String,
});

#[derive(Debug, Default, PartialEq)]
struct Everything {
    flag: bool,
    letter: char,
    small: i8,
    big: u128,
    neg: i128,
    ratio: f64,
    single: f32,
    size: usize,
    text: String,
    maybe: Option<u16>,
    absent: Option<u16>,
    boxed: Box<String>,
    shared: Arc<i32>,
    list: Vec<String>,
    deque: VecDeque<i64>,
    fixed: [u8; 3],
    nested_lists: Vec<Vec<u32>>,
    list_of_maps: Vec<BTreeMap<String, u8>>,
    map_of_lists: BTreeMap<String, Vec<bool>>,
    numeric_keys: BTreeMap<u32, String>,
    ordered: IndexMap<String, f64>,
    hashed: HashMap<String, String>,
    records: Vec<Point>,
    point: Option<Point>,
    raw: Loose,
}

record!(Everything {
    flag: bool,
    letter: char,
    small: i8,
    big: u128,
    neg: i128,
    ratio: f64,
    single: f32,
    size: usize,
    text: String,
    maybe: Option<u16>,
    absent: Option<u16>,
    boxed: Box<String>,
    shared: Arc<i32>,
    list: Vec<String>,
    deque: VecDeque<i64>,
    fixed: [u8; 3],
    nested_lists: Vec<Vec<u32>>,
    list_of_maps: Vec<BTreeMap<String, u8>>,
    map_of_lists: BTreeMap<String, Vec<bool>>,
    numeric_keys: BTreeMap<u32, String>,
    ordered: IndexMap<String, f64>,
    hashed: HashMap<String, String>,
    records: Vec<Point>,
    point: Option<Point>,
    raw: Loose,
});

fn everything() -> Everything {
    Everything {
        flag: true,
        letter: 'é',
        small: -128,
        big: u128::MAX,
        neg: i128::MIN,
        ratio: -0.1,
        single: 1.5e-7,
        size: 42,
        text: "a&b=c d+e%[x]".to_owned(),
        maybe: Some(7),
        absent: None,
        boxed: Box::new("inside a box".to_owned()),
        shared: Arc::new(-3),
        list: vec!["one".to_owned(), String::new(), "three".to_owned()],
        deque: VecDeque::from([5, -5]),
        fixed: [1, 2, 3],
        nested_lists: vec![vec![1, 2], vec![3]],
        list_of_maps: vec![
            BTreeMap::from([("a".to_owned(), 1)]),
            BTreeMap::from([("b".to_owned(), 2), ("c".to_owned(), 3)]),
        ],
        map_of_lists: BTreeMap::from([
            ("yes".to_owned(), vec![true, true]),
            ("mixed".to_owned(), vec![false, true, false]),
        ]),
        numeric_keys: BTreeMap::from([(3, "c".to_owned()), (10, "j".to_owned())]),
        ordered: IndexMap::from([("z".to_owned(), 2.5), ("a".to_owned(), -1.0)]),
        hashed: HashMap::from([("only".to_owned(), "entry".to_owned())]),
        records: vec![
            Point {
                x: 1,
                y: 2,
                label: "first".to_owned(),
            },
            Point::default(),
        ],
        point: Some(Point {
            x: -9,
            y: 9,
            label: "p q".to_owned(),
        }),
        raw: Loose::Map(IndexMap::from([
            ("a".to_owned(), Loose::from("1")),
            (
                "b".to_owned(),
                Loose::List(vec![Loose::from("x"), Loose::from("y")]),
            ),
            (
                "c".to_owned(),
                Loose::Map(IndexMap::from([("d".to_owned(), Loose::from("2"))])),
            ),
        ])),
    }
}

fn round_trip<T: Formable + PartialEq + core::fmt::Debug>(marshaller: Marshaller, value: &T) {
    let text = marshaller.marshal(value).unwrap();
    let decoded: T = marshaller.unmarshal(&text).unwrap();
    assert_eq!(&decoded, value, "decoding {text:?}");
    assert_eq!(marshaller.marshal(&decoded).unwrap(), text);
}

#[test]
fn everything_round_trips_implicitly() {
    round_trip(Marshaller::new(), &everything());
}

#[test]
fn everything_round_trips_explicitly() {
    round_trip(
        Marshaller::new().with_list_mode(ListMode::Explicit),
        &everything(),
    );
}

#[test]
fn either_list_mode_decodes_the_other() {
    let implicit = Marshaller::new();
    let explicit = Marshaller::new().with_list_mode(ListMode::Explicit);
    let value = everything();

    let from_implicit: Everything = explicit.unmarshal(&implicit.marshal(&value).unwrap()).unwrap();
    let from_explicit: Everything = implicit.unmarshal(&explicit.marshal(&value).unwrap()).unwrap();
    assert_eq!(from_implicit, value);
    assert_eq!(from_explicit, value);
}

#[test]
fn defaults_round_trip() {
    round_trip(Marshaller::new(), &Everything::default());
}

#[test]
fn container_elements_always_carry_indices() {
    let value = Everything {
        nested_lists: vec![vec![1, 2], vec![3]],
        records: vec![Point {
            x: 1,
            y: 0,
            label: String::new(),
        }],
        ..Everything::default()
    };
    let text = Marshaller::new().marshal(&value).unwrap();
    assert!(
        text.contains("nested_lists[0]=1&nested_lists[0]=2&nested_lists[1]=3"),
        "{text}"
    );
    assert!(
        text.contains("records[0][x]=1&records[0][y]=0&records[0][label]="),
        "{text}"
    );
}

#[derive(Debug, Default, PartialEq)]
struct Tree {
    name: String,
    children: Vec<Tree>,
}

record!(Tree {
    name: String,
    children: Vec<Tree>,
});

#[derive(Debug, Default, PartialEq)]
struct Chain {
    value: u8,
    next: Option<Box<Chain>>,
}

record!(Chain {
    value: u8,
    next: Option<Box<Chain>>,
});

#[test]
fn self_referential_records() {
    let tree = Tree {
        name: "root".to_owned(),
        children: vec![
            Tree {
                name: "a".to_owned(),
                children: vec![Tree {
                    name: "a1".to_owned(),
                    children: vec![],
                }],
            },
            Tree {
                name: "b".to_owned(),
                children: vec![],
            },
        ],
    };
    let text = shapeform::to_string(&tree).unwrap();
    assert_eq!(
        text,
        "name=root&children[0][name]=a&children[0][children][0][name]=a1&children[1][name]=b"
    );
    assert_eq!(shapeform::from_str::<Tree>(&text).unwrap(), tree);

    let chain = Chain {
        value: 1,
        next: Some(Box::new(Chain {
            value: 2,
            next: Some(Box::new(Chain {
                value: 3,
                next: None,
            })),
        })),
    };
    let text = shapeform::to_string(&chain).unwrap();
    assert_eq!(text, "value=1&next[value]=2&next[next][value]=3");
    round_trip(Marshaller::new(), &chain);
}

#[test]
fn deep_nesting() {
    type Deep = BTreeMap<String, Vec<BTreeMap<String, Vec<Vec<u8>>>>>;

    let deep: Deep = BTreeMap::from([(
        "top".to_owned(),
        vec![BTreeMap::from([("inner".to_owned(), vec![vec![1], vec![2, 3]])])],
    )]);
    let explicit = Marshaller::new().with_list_mode(ListMode::Explicit);
    assert_eq!(
        explicit.marshal(&deep).unwrap(),
        "top[0][inner][0][0]=1&top[0][inner][1][0]=2&top[0][inner][1][1]=3"
    );
    round_trip(explicit, &deep);
    round_trip(Marshaller::new(), &deep);
}

#[test]
fn gaps_in_indices_compact() {
    let tree: Tree = shapeform::from_str("name=r&children[7][name]=late&children[2][name]=early")
        .unwrap();
    let names: Vec<_> = tree.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["early", "late"]);
}
