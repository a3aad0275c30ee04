//! Built-in types of the language
//!
//! The catalog is a fixed table: primitives are documented on their own page
//! and every type reference to one of them links there.

/// A built-in type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Primitive {
    pub name: &'static str,
    pub description: &'static str,
}

impl Primitive {
    const fn new(name: &'static str, description: &'static str) -> Self {
        Self { name, description }
    }
}

static PRIMITIVES: [Primitive; 14] = [
    Primitive::new("boolean", "A boolean value, either true or false"),
    Primitive::new("int", "A 32-bit signed integer"),
    Primitive::new("long", "A 64-bit signed integer"),
    Primitive::new("float", "A single precision floating point number"),
    Primitive::new("double", "A double precision floating point number"),
    Primitive::new("string", "A sequence of Unicode characters"),
    Primitive::new("message", "A network message with headers and a payload"),
    Primitive::new("json", "A JSON document"),
    Primitive::new("xml", "An XML document"),
    Primitive::new("map", "A mapping from string keys to values"),
    Primitive::new("array", "An ordered, indexed list of values of one type"),
    Primitive::new("struct", "A user defined record of typed fields"),
    Primitive::new("connector", "A client for an external service, offering actions"),
    Primitive::new("exception", "An error raised and caught at runtime"),
];

/// All primitives, in catalog order
#[must_use]
pub fn list_primitives() -> &'static [Primitive] {
    &PRIMITIVES
}

/// Check whether `name` is a built-in type
#[must_use]
pub fn is_primitive(name: &str) -> bool {
    find_primitive(name).is_some()
}

/// Look up a primitive by name
#[must_use]
pub fn find_primitive(name: &str) -> Option<&'static Primitive> {
    PRIMITIVES.iter().find(|p| p.name == name)
}
