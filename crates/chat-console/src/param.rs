//! Command parameters and parameter-schema validation

use std::any::TypeId;
use std::fmt;

use crate::util::{normalize_name, short_type_name};

/// The declared value type of a parameter
#[derive(Debug, Clone, Copy)]
pub struct ValueType {
    id: TypeId,
    full_name: &'static str,
}

impl ValueType {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            full_name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Type name without module paths, as shown in signatures
    pub fn name(&self) -> String {
        short_type_name(self.full_name)
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ValueType {}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One positional parameter of a command
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    description: Option<String>,
    value_type: ValueType,
    optional: bool,
    linked: bool,
}

impl Parameter {
    /// Create a required, single-token parameter of type `T`
    pub fn new<T: 'static>(name: &str) -> Self {
        Self {
            name: normalize_name(name),
            description: None,
            value_type: ValueType::of::<T>(),
            optional: false,
            linked: false,
        }
    }

    /// Mark the parameter as optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Let the parameter capture every remaining token as one sequence
    pub fn linked(mut self) -> Self {
        self.linked = true;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }
}

/// Renders the annotation syntax `?name[type](description)`, with a leading
/// `#` for linked parameters.
impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.linked {
            write!(f, "#")?;
        }
        if self.optional {
            write!(f, "?")?;
        }
        write!(f, "{}[{}]", self.name, self.value_type)?;
        if let Some(description) = &self.description {
            write!(f, "({})", description)?;
        }
        Ok(())
    }
}

/// Check that a parameter list has a usable shape
///
/// - no list at all is a zero-argument command and is valid
/// - a present but empty list is invalid
/// - at most one linked parameter, and only in the last position
/// - no required parameter may follow an optional one
pub fn validate(parameters: Option<&[Parameter]>) -> bool {
    let Some(parameters) = parameters else {
        return true;
    };
    if parameters.is_empty() {
        return false;
    }

    let linked = parameters.iter().filter(|p| p.linked).count();
    let last_linked = parameters.last().is_some_and(|p| p.linked);
    if linked >= 2 || (linked == 1 && !last_linked) {
        return false;
    }

    let mut optional_seen = false;
    for parameter in parameters {
        if parameter.optional {
            optional_seen = true;
        } else if optional_seen {
            return false;
        }
    }
    true
}

/// Join parameters into their signature string, or `None` if there are none
pub fn render_signature(parameters: Option<&[Parameter]>) -> Option<String> {
    match parameters {
        Some(parameters) if !parameters.is_empty() => Some(
            parameters
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        ),
        _ => None,
    }
}

/// Split a signature on whitespace, except inside `[]`, `()` and `{}` groups
///
/// Descriptions may contain spaces; a placeholder like
/// `?target[String](player or entity)` must stay in one piece.
pub fn split_signature(signature: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in signature.chars() {
        match c {
            '[' | '(' | '{' => {
                depth += 1;
                current.push(c);
            }
            ']' | ')' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }
    parts
}
