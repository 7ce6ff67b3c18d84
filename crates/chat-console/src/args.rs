//! Binding raw tokens to parameters and reading them back as typed values
//!
//! Binding only decides which tokens belong to which parameter. Coercion
//! happens when the handler reads a value, so the handler picks the type and
//! sees conversion errors at the point of use.

use std::any::{Any, TypeId};

use crate::error::{ConsoleError, ConsoleResult, Mismatch};
use crate::message::Severity;
use crate::param::{Parameter, ValueType};
use crate::parser::{parse_native, ParserRegistry};

/// Raw token(s) captured for one parameter
#[derive(Debug, Clone, PartialEq, Eq)]
enum Raw {
    Single(String),
    Linked(Vec<String>),
}

/// One bound argument: its position, declared type and raw token(s)
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    position: usize,
    expected: ValueType,
    raw: Raw,
}

impl Argument {
    fn single(position: usize, expected: ValueType, token: &str) -> Self {
        Self {
            position,
            expected,
            raw: Raw::Single(token.to_string()),
        }
    }

    fn linked(position: usize, expected: ValueType, tokens: &[&str]) -> Self {
        Self {
            position,
            expected,
            raw: Raw::Linked(tokens.iter().map(|t| t.to_string()).collect()),
        }
    }

    /// 1-based position of the argument on the input line
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn value_type(&self) -> ValueType {
        self.expected
    }

    pub fn is_linked(&self) -> bool {
        matches!(self.raw, Raw::Linked(_))
    }

    /// The raw token of a scalar argument
    pub fn raw(&self) -> Option<&str> {
        match &self.raw {
            Raw::Single(token) => Some(token),
            Raw::Linked(_) => None,
        }
    }

    /// The raw tokens of a linked argument
    pub fn raw_values(&self) -> Option<&[String]> {
        match &self.raw {
            Raw::Single(_) => None,
            Raw::Linked(tokens) => Some(tokens),
        }
    }

    /// Coerce a scalar argument into `T`
    pub fn value<T: 'static>(&self, parsers: &ParserRegistry) -> ConsoleResult<T> {
        match &self.raw {
            Raw::Single(token) => self.coerce(self.position, token, parsers),
            Raw::Linked(_) => Err(ConsoleError::ArgumentTypeMismatch(Mismatch::Linked)),
        }
    }

    /// Coerce every token of a linked argument into `T`
    ///
    /// Element `k` is reported as position `position + k`.
    pub fn values<T: 'static>(&self, parsers: &ParserRegistry) -> ConsoleResult<Vec<T>> {
        match &self.raw {
            Raw::Single(_) => Err(ConsoleError::ArgumentTypeMismatch(Mismatch::Scalar)),
            Raw::Linked(tokens) => tokens
                .iter()
                .enumerate()
                .map(|(offset, token)| self.coerce(self.position + offset, token, parsers))
                .collect(),
        }
    }

    fn coerce<T: 'static>(&self, position: usize, token: &str, parsers: &ParserRegistry) -> ConsoleResult<T> {
        let requested = ValueType::of::<T>();
        if requested != self.expected {
            return Err(ConsoleError::ArgumentTypeMismatch(Mismatch::Type {
                position,
                declared: self.expected.name(),
                requested: requested.name(),
            }));
        }

        let boxed = match parse_native(TypeId::of::<T>(), token) {
            Some(Ok(value)) => value,
            Some(Err(reason)) => {
                return Err(ConsoleError::ArgumentParse {
                    message: format!("Error parsing argument {}: {}", position, reason),
                    severity: Severity::Error,
                })
            }
            None => match parsers.get(TypeId::of::<T>()) {
                Some(parser) => parser.parse_any(position, token)?,
                None => {
                    return Err(ConsoleError::UnknownParser {
                        type_name: requested.name(),
                    })
                }
            },
        };

        downcast(boxed).ok_or_else(|| ConsoleError::UnknownParser {
            type_name: requested.name(),
        })
    }
}

fn downcast<T: 'static>(value: Box<dyn Any>) -> Option<T> {
    value.downcast::<T>().ok().map(|value| *value)
}

/// The bound arguments of one dispatch, with access to the parser registry
#[derive(Debug)]
pub struct Arguments<'a> {
    items: Vec<Argument>,
    parsers: &'a ParserRegistry,
}

impl<'a> Arguments<'a> {
    pub fn new(items: Vec<Argument>, parsers: &'a ParserRegistry) -> Self {
        Self { items, parsers }
    }

    /// The argument bound to parameter `index` (0-based), if it was supplied
    pub fn get(&self, index: usize) -> Option<&Argument> {
        self.items.get(index)
    }

    /// Read parameter `index` as a scalar `T`; `Ok(None)` if not supplied
    pub fn value<T: 'static>(&self, index: usize) -> ConsoleResult<Option<T>> {
        self.items
            .get(index)
            .map(|arg| arg.value(self.parsers))
            .transpose()
    }

    /// Read parameter `index` as a sequence of `T`; `Ok(None)` if not supplied
    pub fn values<T: 'static>(&self, index: usize) -> ConsoleResult<Option<Vec<T>>> {
        self.items
            .get(index)
            .map(|arg| arg.values(self.parsers))
            .transpose()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Argument> {
        self.items.iter()
    }
}

/// Bind tokens to a command's parameters
///
/// Fails if fewer tokens than required parameters were given. A linked
/// parameter takes every remaining token. Parameters without a token are left
/// out, so the result may be shorter than the parameter list.
pub fn bind(parameters: Option<&[Parameter]>, tokens: &[&str]) -> ConsoleResult<Vec<Argument>> {
    let Some(parameters) = parameters else {
        return Ok(Vec::new());
    };

    let required = parameters.iter().filter(|p| !p.is_optional()).count();
    if tokens.len() < required {
        return Err(ConsoleError::ArgumentCount { required });
    }

    let mut bound = Vec::new();
    for (i, parameter) in parameters.iter().enumerate() {
        if i >= tokens.len() {
            break;
        }
        if parameter.is_linked() {
            bound.push(Argument::linked(i + 1, parameter.value_type(), &tokens[i..]));
            break;
        }
        bound.push(Argument::single(i + 1, parameter.value_type(), tokens[i]));
    }
    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArgumentError;
    use crate::parser::TypeParser;

    #[derive(Debug, PartialEq)]
    struct Vec2(f32, f32);

    fn registry_with_vec2() -> ParserRegistry {
        let mut parsers = ParserRegistry::new();
        parsers.register(
            Box::new(TypeParser::new(
                |position, raw: &str| {
                    let mut parts = raw.split(',').map(str::parse::<f32>);
                    match (parts.next(), parts.next(), parts.next()) {
                        (Some(Ok(x)), Some(Ok(y)), None) => Ok(Vec2(x, y)),
                        _ => Err(ArgumentError::warning(format!("Argument {} must look like 1,2", position))),
                    }
                },
                "1,2",
            )),
            Some("geometry"),
        );
        parsers
    }

    #[test]
    fn test_bind_without_parameters() {
        let bound = bind(None, &["ignored", "tokens"]).expect("no schema binds nothing");
        assert!(bound.is_empty());
    }

    #[test]
    fn test_bind_count_error() {
        let params = [Parameter::new::<i32>("a"), Parameter::new::<i32>("b")];
        assert_eq!(
            bind(Some(&params), &["1"]),
            Err(ConsoleError::ArgumentCount { required: 2 })
        );
    }

    #[test]
    fn test_bind_only_optional() {
        let params = [Parameter::new::<String>("command").optional()];
        let bound = bind(Some(&params), &[]).expect("optional only");
        assert!(bound.is_empty());
    }

    #[test]
    fn test_bind_linked_takes_rest() {
        let params = [
            Parameter::new::<String>("target"),
            Parameter::new::<String>("words").linked().optional(),
        ];
        let bound = bind(Some(&params), &["bob", "hello", "there"]).expect("binds");
        assert_eq!(bound.len(), 2);
        assert_eq!(bound[0].raw(), Some("bob"));
        assert_eq!(bound[0].position(), 1);
        assert_eq!(
            bound[1].raw_values(),
            Some(&["hello".to_string(), "there".to_string()][..])
        );
        assert_eq!(bound[1].position(), 2);
    }

    #[test]
    fn test_bind_extra_tokens_ignored_without_linked() {
        let params = [Parameter::new::<i32>("a")];
        let bound = bind(Some(&params), &["1", "2", "3"]).expect("binds");
        assert_eq!(bound.len(), 1);
    }

    #[test]
    fn test_value_native() {
        let parsers = ParserRegistry::new();
        let params = [Parameter::new::<i32>("n"), Parameter::new::<bool>("flag").optional()];
        let args = Arguments::new(bind(Some(&params), &["7", "FALSE"]).expect("binds"), &parsers);
        assert_eq!(args.value::<i32>(0), Ok(Some(7)));
        assert_eq!(args.value::<bool>(1), Ok(Some(false)));
        assert_eq!(args.value::<bool>(2), Ok(None));
    }

    #[test]
    fn test_value_native_parse_failure() {
        let parsers = ParserRegistry::new();
        let params = [Parameter::new::<i32>("n")];
        let args = Arguments::new(bind(Some(&params), &["seven"]).expect("binds"), &parsers);
        match args.value::<i32>(0) {
            Err(ConsoleError::ArgumentParse { message, severity }) => {
                assert!(message.starts_with("Error parsing argument 1:"));
                assert_eq!(severity, Severity::Error);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_value_custom_parser() {
        let parsers = registry_with_vec2();
        let params = [Parameter::new::<Vec2>("at")];
        let args = Arguments::new(bind(Some(&params), &["1.5,2"]).expect("binds"), &parsers);
        assert_eq!(args.value::<Vec2>(0), Ok(Some(Vec2(1.5, 2.0))));
    }

    #[test]
    fn test_value_custom_parser_error_is_verbatim() {
        let parsers = registry_with_vec2();
        let params = [Parameter::new::<Vec2>("at")];
        let args = Arguments::new(bind(Some(&params), &["oops"]).expect("binds"), &parsers);
        assert_eq!(
            args.value::<Vec2>(0),
            Err(ConsoleError::ArgumentParse {
                message: "Argument 1 must look like 1,2".into(),
                severity: Severity::Warning,
            })
        );
    }

    #[test]
    fn test_value_unknown_parser() {
        let parsers = ParserRegistry::new();
        let params = [Parameter::new::<Vec2>("at")];
        let args = Arguments::new(bind(Some(&params), &["1,2"]).expect("binds"), &parsers);
        assert_eq!(
            args.value::<Vec2>(0),
            Err(ConsoleError::UnknownParser { type_name: "Vec2".into() })
        );
    }

    #[test]
    fn test_accessor_mismatch() {
        let parsers = ParserRegistry::new();
        let params = [
            Parameter::new::<String>("first"),
            Parameter::new::<String>("rest").linked(),
        ];
        let args = Arguments::new(bind(Some(&params), &["a", "b", "c"]).expect("binds"), &parsers);
        assert_eq!(
            args.values::<String>(0),
            Err(ConsoleError::ArgumentTypeMismatch(Mismatch::Scalar))
        );
        assert_eq!(
            args.value::<String>(1),
            Err(ConsoleError::ArgumentTypeMismatch(Mismatch::Linked))
        );
        assert_eq!(
            args.values::<String>(1),
            Ok(Some(vec!["b".to_string(), "c".to_string()]))
        );
    }

    #[test]
    fn test_declared_type_mismatch() {
        let parsers = ParserRegistry::new();
        let params = [Parameter::new::<String>("name")];
        let args = Arguments::new(bind(Some(&params), &["12"]).expect("binds"), &parsers);
        assert_eq!(
            args.value::<i32>(0),
            Err(ConsoleError::ArgumentTypeMismatch(Mismatch::Type {
                position: 1,
                declared: "String".into(),
                requested: "i32".into(),
            }))
        );
    }

    #[test]
    fn test_linked_positions_advance() {
        let parsers = ParserRegistry::new();
        let params = [
            Parameter::new::<String>("op"),
            Parameter::new::<i64>("numbers").linked(),
        ];
        let args = Arguments::new(bind(Some(&params), &["sum", "1", "x"]).expect("binds"), &parsers);
        match args.values::<i64>(1) {
            Err(ConsoleError::ArgumentParse { message, .. }) => {
                assert!(message.starts_with("Error parsing argument 3:"), "{}", message);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
