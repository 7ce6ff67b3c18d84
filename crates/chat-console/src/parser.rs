//! Type parsers: native coercion of primitives plus plugin-provided parsers
//!
//! Primitive types (integers, floats, `bool`, `char`, `String`) are converted
//! natively. Every other type needs a [`TypeParser`] registered by a plugin;
//! the registry keeps at most one parser per type and the first one wins.

use std::any::{Any, TypeId};
use std::fmt;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::ArgumentError;
use crate::param::ValueType;

type ParseFn<T> = Box<dyn Fn(usize, &str) -> Result<T, ArgumentError>>;

/// Converts a raw token into a value of type `T`
pub struct TypeParser<T> {
    parse: ParseFn<T>,
    example: String,
}

impl<T: 'static> TypeParser<T> {
    /// Create a parser from a conversion function and an example token
    ///
    /// The function receives the argument position (1-based) and the raw token.
    pub fn new<F>(parse: F, example: impl Into<String>) -> Self
    where
        F: Fn(usize, &str) -> Result<T, ArgumentError> + 'static,
    {
        Self {
            parse: Box::new(parse),
            example: example.into(),
        }
    }

    pub fn parse(&self, position: usize, raw: &str) -> Result<T, ArgumentError> {
        (self.parse)(position, raw)
    }
}

impl<T> fmt::Debug for TypeParser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeParser")
            .field("type", &std::any::type_name::<T>())
            .field("example", &self.example)
            .finish()
    }
}

/// Type-erased view of a [`TypeParser`], so parsers of different types can
/// share one registry
pub trait AnyParser {
    fn value_type(&self) -> ValueType;

    fn example(&self) -> &str;

    fn parse_any(&self, position: usize, raw: &str) -> Result<Box<dyn Any>, ArgumentError>;
}

impl<T: 'static> AnyParser for TypeParser<T> {
    fn value_type(&self) -> ValueType {
        ValueType::of::<T>()
    }

    fn example(&self) -> &str {
        &self.example
    }

    fn parse_any(&self, position: usize, raw: &str) -> Result<Box<dyn Any>, ArgumentError> {
        self.parse(position, raw).map(|value| Box::new(value) as Box<dyn Any>)
    }
}

/// A parser plus the plugin that contributed it
struct RegisteredParser {
    parser: Box<dyn AnyParser>,
    owner: Option<String>,
}

/// Listing entry for a registered parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserInfo {
    pub type_name: String,
    pub example: String,
    pub owner: Option<String>,
}

/// Registry of custom parsers keyed by value type
#[derive(Default)]
pub struct ParserRegistry {
    parsers: IndexMap<TypeId, RegisteredParser>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parser for its value type
    ///
    /// Returns `false` and keeps the existing parser if the type already has one.
    pub fn register(&mut self, parser: Box<dyn AnyParser>, owner: Option<&str>) -> bool {
        let value_type = parser.value_type();
        if let Some(existing) = self.parsers.get(&value_type.id()) {
            warn!(
                "ignoring parser for '{}' from {}: already provided by {}",
                value_type,
                owner.unwrap_or("the console"),
                existing.owner.as_deref().unwrap_or("the console"),
            );
            return false;
        }

        debug!("registered parser for '{}'", value_type);
        self.parsers.insert(
            value_type.id(),
            RegisteredParser {
                parser,
                owner: owner.map(str::to_string),
            },
        );
        true
    }

    pub fn get(&self, id: TypeId) -> Option<&dyn AnyParser> {
        self.parsers.get(&id).map(|entry| entry.parser.as_ref())
    }

    /// Find a parser by its short type name, as typed by a user
    pub fn find(&self, type_name: &str) -> Option<(&dyn AnyParser, Option<&str>)> {
        self.parsers
            .values()
            .find(|entry| entry.parser.value_type().name() == type_name)
            .map(|entry| (entry.parser.as_ref(), entry.owner.as_deref()))
    }

    /// All registered parsers in registration order
    pub fn list(&self) -> Vec<ParserInfo> {
        self.parsers
            .values()
            .map(|entry| ParserInfo {
                type_name: entry.parser.value_type().name(),
                example: entry.parser.example().to_string(),
                owner: entry.owner.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.list()).finish()
    }
}

/// Try a native textual conversion for primitive types
///
/// Returns `None` if `id` is not a primitive the console converts itself.
pub(crate) fn parse_native(id: TypeId, raw: &str) -> Option<Result<Box<dyn Any>, String>> {
    macro_rules! from_str {
        ($($ty:ty),* $(,)?) => {
            $(
                if id == TypeId::of::<$ty>() {
                    return Some(
                        raw.parse::<$ty>()
                            .map(|value| Box::new(value) as Box<dyn Any>)
                            .map_err(|e| e.to_string()),
                    );
                }
            )*
        };
    }

    if id == TypeId::of::<bool>() {
        return Some(parse_bool(raw).map(|value| Box::new(value) as Box<dyn Any>));
    }

    from_str!(
        i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, String,
    );
    None
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(format!("'{}' is not a valid boolean", raw))
    }
}
