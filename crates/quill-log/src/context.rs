//! Context values attached to a log call.
//!
//! A [`Context`] is an insertion-ordered map from placeholder key to a
//! [`ContextValue`]. Values are a closed set of capabilities: scalars,
//! stringables, date-times, composite objects, and raw collections. The
//! interpolator and the JSON adapter both dispatch on this set.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A value stored in a log [`Context`].
#[derive(Clone)]
pub enum ContextValue {
    /// Absent value.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Signed integer scalar.
    Int(i64),
    /// Unsigned integer scalar too large for `Int`.
    UInt(u64),
    /// Floating point scalar.
    Float(f64),
    /// String scalar.
    String(String),
    /// Any value with a string form.
    Stringable(Arc<dyn fmt::Display + Send + Sync>),
    /// Offset-aware date and time.
    DateTime(DateTime<FixedOffset>),
    /// Captured error, honoured by the `@x` key of structured output.
    Error(ErrorValue),
    /// Composite value with a runtime type name.
    Object(ObjectValue),
    /// Ordered list of values.
    List(Vec<ContextValue>),
    /// Nested key/value map.
    Map(Context),
}

impl ContextValue {
    /// Wrap any displayable value.
    pub fn stringable<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        Self::Stringable(Arc::new(value))
    }

    /// Capture an error with its source chain and a backtrace.
    pub fn error<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Self::Error(ErrorValue::capture(error))
    }

    /// Capture a serializable value as a composite object.
    ///
    /// The object remembers the short name of `T` for interpolation and its
    /// serialized fields for structured output. Values that fail to serialize
    /// keep their type name and carry `null` fields.
    pub fn object<T>(value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        let fields = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
        Self::Object(ObjectValue::new(short_type_name::<T>(), fields))
    }

    /// Whether this value is a scalar (`null`, boolean, number, or string).
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Null
                | Self::Bool(_)
                | Self::Int(_)
                | Self::UInt(_)
                | Self::Float(_)
                | Self::String(_)
        )
    }

    /// Lowercase primitive-kind name used by fallback rendering.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) | Self::Stringable(_) => "string",
            Self::DateTime(_) | Self::Error(_) | Self::Object(_) => "object",
            Self::List(_) | Self::Map(_) => "array",
        }
    }
}

impl fmt::Debug for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::String(v) => f.debug_tuple("String").field(v).finish(),
            Self::Stringable(v) => f
                .debug_tuple("Stringable")
                .field(&v.to_string())
                .finish(),
            Self::DateTime(v) => f.debug_tuple("DateTime").field(v).finish(),
            Self::Error(v) => f.debug_tuple("Error").field(v).finish(),
            Self::Object(v) => f.debug_tuple("Object").field(v).finish(),
            Self::List(v) => f.debug_tuple("List").field(v).finish(),
            Self::Map(v) => f.debug_tuple("Map").field(v).finish(),
        }
    }
}

impl Serialize for ContextValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::UInt(v) => serializer.serialize_u64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::String(v) => serializer.serialize_str(v),
            Self::Stringable(v) => serializer.collect_str(v),
            Self::DateTime(v) => serializer.serialize_str(&rfc3339(v)),
            Self::Error(v) => serializer.serialize_str(v.message()),
            Self::Object(v) => v.fields().serialize(serializer),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            },
            Self::Map(context) => context.serialize(serializer),
        }
    }
}

/// Format a date-time as RFC3339 with second precision and a numeric offset.
pub(crate) fn rfc3339<Tz>(value: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    value.to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

const NO_BACKTRACE: &str = "<backtrace unavailable>";

/// An error captured into a context.
#[derive(Debug, Clone)]
pub struct ErrorValue {
    message: String,
    sources: Vec<String>,
    backtrace: Option<String>,
}

impl ErrorValue {
    fn capture<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let mut sources = Vec::new();
        let mut next = error.source();
        while let Some(source) = next {
            sources.push(source.to_string());
            next = source.source();
        }

        let backtrace = Backtrace::force_capture();
        let backtrace = (backtrace.status() == BacktraceStatus::Captured)
            .then(|| backtrace.to_string());

        Self {
            message: error.to_string(),
            sources,
            backtrace,
        }
    }

    /// The error's display message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Display messages of the error's source chain, outermost first.
    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Trace text: the source chain followed by the captured backtrace.
    ///
    /// Never empty. Platforms without backtrace support get a placeholder line.
    #[must_use]
    pub fn trace(&self) -> String {
        let mut lines: Vec<String> = self
            .sources
            .iter()
            .enumerate()
            .map(|(depth, source)| format!("#{depth} caused by: {source}"))
            .collect();
        let backtrace = self.backtrace.as_deref().map_or(NO_BACKTRACE, str::trim_end);
        lines.push(backtrace.to_owned());
        lines.join("\n")
    }
}

/// A composite value captured into a context.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
    type_name: String,
    fields: serde_json::Value,
}

impl ObjectValue {
    /// Create an object with an explicit type name.
    pub fn new(type_name: impl Into<String>, fields: serde_json::Value) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Runtime type name reported by interpolation.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Serialized fields used by structured output.
    #[must_use]
    pub fn fields(&self) -> &serde_json::Value {
        &self.fields
    }
}

impl From<ObjectValue> for ContextValue {
    fn from(value: ObjectValue) -> Self {
        Self::Object(value)
    }
}

/// Insertion-ordered map of context values.
///
/// Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default)]
pub struct Context {
    entries: Vec<(String, ContextValue)>,
}

impl Context {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry and return the context (builder style).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an entry, returning the previous value for the key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ContextValue>,
    ) -> Option<ContextValue> {
        let key = key.into();
        let value = value.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(existing, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Get the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the context has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Context {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<String>,
    V: Into<ContextValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (key, value) in iter {
            context.insert(key, value);
        }
        context
    }
}

// -- Conversions --

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for ContextValue {
            fn from(value: $t) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for ContextValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::UInt(value), Self::Int)
    }
}

impl From<usize> for ContextValue {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or(Self::UInt(u64::MAX), Self::from)
    }
}

impl From<isize> for ContextValue {
    fn from(value: isize) -> Self {
        i64::try_from(value).map_or(Self::Null, Self::Int)
    }
}

impl From<f32> for ContextValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for ContextValue {
    fn from(value: DateTime<Tz>) -> Self {
        Self::DateTime(value.fixed_offset())
    }
}

impl<T: Into<ContextValue>> From<Option<T>> for ContextValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<ContextValue>> From<Vec<T>> for ContextValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<Context> for ContextValue {
    fn from(value: Context) -> Self {
        Self::Map(value)
    }
}

impl From<serde_json::Value> for ContextValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    n.as_f64().map_or(Self::Null, Self::Float)
                }
            },
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(map.into_iter().collect()),
        }
    }
}
