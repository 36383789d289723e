/// Declares a struct as a form record.
///
/// Lists the struct's fields with their types, in the order they should be
/// written. Each field may carry `#[form(...)]` options:
///
/// - `rename = "key"`: use `key` on the wire instead of the field name
/// - `encoded`: the field's text is already wire-encoded
/// - `additional`: the field (a text-keyed map) collects unmatched keys
///
/// Every field type must implement [`Default`]: fields absent from the input
/// take their default value.
///
/// ```
/// use std::collections::HashMap;
/// use shapeform_core::{Def, Formable, record};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Login {
///     user: String,
///     remember: bool,
///     extra: HashMap<String, String>,
/// }
///
/// record!(Login {
///     #[form(rename = "u")]
///     user: String,
///     remember: bool,
///     #[form(additional)]
///     extra: HashMap<String, String>,
/// });
///
/// let Def::Record(record) = Login::SHAPE.def else { unreachable!() };
/// assert_eq!(record.fields[0].wire_key(), "u");
/// assert!(record.fields[2].is_additional());
/// ```
///
/// The listed types must match the struct's own field types:
///
/// ```compile_fail
/// use shapeform_core::record;
///
/// #[derive(Default)]
/// struct Login {
///     user: String,
/// }
///
/// record!(Login { user: u32 });
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ident { $( $(#[form($($attr:tt)*)])* $field:ident : $fty:ty ),* $(,)? }) => {
        impl $crate::Formable for $ty {
            const SHAPE: &'static $crate::Shape = &const {
                $crate::Shape::of::<$ty>($crate::Def::Record($crate::RecordDef::new(&const {[
                    $(
                        $crate::__record_field!(
                            $crate::Field::new(stringify!($field), $crate::shape_of::<$fty>);
                            $( $($attr)* ),*
                        )
                    ),*
                ]})))
            };

            fn peek(&self) -> $crate::Peek<'_> {
                $( let _: fn(&$ty) -> &$fty = |record| &record.$field; )*
                $crate::Peek::Record(self)
            }

            fn from_value(
                value: $crate::Value,
            ) -> ::core::result::Result<Self, $crate::ReflectError> {
                #[allow(unused_mut, unused_variables)]
                let mut fields = value.into_record(<Self as $crate::Formable>::SHAPE)?;
                ::core::result::Result::Ok(Self {
                    $( $field: fields.next_field()?, )*
                })
            }
        }

        impl $crate::PeekRecord for $ty {
            fn fields(&self) -> ::std::vec::Vec<$crate::Peek<'_>> {
                ::std::vec![ $( $crate::Formable::peek(&self.$field) ),* ]
            }
        }
    };
}

/// Applies `#[form(...)]` options to a field declaration.
#[doc(hidden)]
#[macro_export]
macro_rules! __record_field {
    ($field:expr;) => {
        $field
    };
    ($field:expr; , $($rest:tt)*) => {
        $crate::__record_field!($field; $($rest)*)
    };
    ($field:expr; rename = $key:literal $($rest:tt)*) => {
        $crate::__record_field!($field.rename($key); $($rest)*)
    };
    ($field:expr; encoded $($rest:tt)*) => {
        $crate::__record_field!($field.encoded(); $($rest)*)
    };
    ($field:expr; additional $($rest:tt)*) => {
        $crate::__record_field!($field.additional(); $($rest)*)
    };
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::{Def, Formable, Peek, Scalar, Value};
    use shapeform_testhelpers::test;

    #[derive(Debug, Default, PartialEq)]
    struct Ticket {
        id: u32,
        token: String,
        labels: Vec<String>,
        rest: BTreeMap<String, String>,
    }

    crate::record!(Ticket {
        #[form(rename = "ticket_id")]
        id: u32,
        #[form(rename = "tok", encoded)]
        token: String,
        labels: Vec<String>,
        #[form(additional)]
        rest: BTreeMap<String, String>,
    });

    #[derive(Debug, Default, PartialEq)]
    struct Node {
        name: String,
        children: Vec<Node>,
    }

    crate::record!(Node {
        name: String,
        children: Vec<Node>,
    });

    #[test]
    fn options_land_on_fields() {
        let Def::Record(record) = Ticket::SHAPE.def else {
            panic!("expected a record, got {:?}", Ticket::SHAPE.def);
        };
        let keys: Vec<_> = record.fields.iter().map(|f| f.wire_key()).collect();
        assert_eq!(keys, ["ticket_id", "tok", "labels", "rest"]);
        assert!(record.fields[1].is_encoded());
        assert!(!record.fields[0].is_encoded());
        assert!(record.fields[3].is_additional());
    }

    #[test]
    fn self_referential_shapes_resolve_lazily() {
        let Def::Record(record) = Node::SHAPE.def else {
            panic!("expected a record");
        };
        let Def::List(list) = record.fields[1].shape().def else {
            panic!("expected a list");
        };
        assert_eq!(list.t(), Node::SHAPE);
    }

    #[test]
    fn peek_lists_fields_in_order() {
        let ticket = Ticket {
            id: 7,
            ..Default::default()
        };
        let Peek::Record(record) = ticket.peek() else {
            panic!("expected a record view");
        };
        let fields = record.fields();
        assert_eq!(fields.len(), 4);
        assert!(matches!(fields[0], Peek::Scalar(Scalar::U64(7))));
    }

    #[test]
    fn absent_fields_take_defaults() {
        let value = Value::Record(vec![
            Some(Value::Scalar(Scalar::U64(3))),
            None,
            None,
            None,
        ]);
        let ticket = Ticket::from_value(value).unwrap();
        assert_eq!(
            ticket,
            Ticket {
                id: 3,
                ..Default::default()
            }
        );
    }
}
