use std::any::Any;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use time::OffsetDateTime;

/// A runtime value bound to a message argument.
///
/// # Example
///
/// ```
/// use icumsg::Value;
///
/// // Integers become Value::Number
/// let count: Value = 42.into();
///
/// // Strings become Value::String
/// let name: Value = "Alice".into();
///
/// // Closures over value lists become Value::Tag
/// let bold = Value::tag(|children| children);
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// An integer.
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// A string.
    String(String),

    /// A boolean; stringifies as `true` or `false` for `select`.
    Bool(bool),

    /// A point in time for `date` and `time` elements.
    Date(OffsetDateTime),

    /// A caller-defined value passed through to the output as a part.
    Object(Opaque),

    /// A rendering function for a tag element.
    Tag(TagFn),
}

impl Value {
    /// Wraps a closure as a tag renderer.
    pub fn tag(render: impl Fn(Vec<Value>) -> Vec<Value> + Send + Sync + 'static) -> Self {
        Value::Tag(TagFn::new(render))
    }

    /// Wraps an arbitrary value as an opaque object.
    pub fn object(value: impl Any + Send + Sync) -> Self {
        Value::Object(Opaque::new(value))
    }

    /// Get this value as an integer, if it is one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a float, if it is numeric.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Number(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// True for numbers, strings, and booleans, which format as text.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Number(_) | Value::Float(_) | Value::String(_) | Value::Bool(_)
        )
    }

    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Date(_) => "date",
            Value::Object(_) => "object",
            Value::Tag(_) => "function",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::Object(o) => write!(f, "{o}"),
            Value::Tag(_) => f.write_str("[function]"),
        }
    }
}

/// Equality is structural for primitives and identity for objects and tags.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Tag(a), Value::Tag(b)) => Arc::ptr_eq(&a.0, &b.0),
            _ => false,
        }
    }
}

// From implementations for common types

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Number)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<OffsetDateTime> for Value {
    fn from(d: OffsetDateTime) -> Self {
        Value::Date(d)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Value::Object(o)
    }
}

impl From<TagFn> for Value {
    fn from(t: TagFn) -> Self {
        Value::Tag(t)
    }
}

/// A shared, type-erased value. Two opaques are equal only if they share the
/// same allocation.
#[derive(Clone)]
pub struct Opaque(Arc<dyn Any + Send + Sync>);

impl Opaque {
    pub fn new(value: impl Any + Send + Sync) -> Self {
        Opaque(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Debug for Opaque {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Opaque(..)")
    }
}

impl Display for Opaque {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("[object]")
    }
}

/// Renders a tag's children, returning the values that replace the tag.
#[derive(Clone)]
pub struct TagFn(Arc<dyn Fn(Vec<Value>) -> Vec<Value> + Send + Sync>);

impl TagFn {
    pub fn new(render: impl Fn(Vec<Value>) -> Vec<Value> + Send + Sync + 'static) -> Self {
        TagFn(Arc::new(render))
    }

    pub fn call(&self, children: Vec<Value>) -> Vec<Value> {
        (self.0)(children)
    }
}

impl Debug for TagFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("TagFn(..)")
    }
}
