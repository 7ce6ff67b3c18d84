//! Name helpers shared by commands, parameters and parsers

/// Normalize a command or parameter name: spaces become underscores and the
/// whole name is lower-cased.
pub fn normalize_name(name: &str) -> String {
    name.replace(' ', "_").to_lowercase()
}

/// Turn a normalized name into a message label: `my_cmd` becomes `My Cmd`
pub fn simplify_name(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    let rest = chars.as_str().to_lowercase();
                    first.to_uppercase().chain(rest.chars()).collect()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip module paths from a type name, keeping generics readable.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::new();
    let mut segment = String::new();
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            segment.clear();
        } else if c.is_alphanumeric() || c == '_' {
            segment.push(c);
        } else {
            out.push_str(&segment);
            segment.clear();
            out.push(c);
        }
    }

    out.push_str(&segment);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Give Item"), "give_item");
        assert_eq!(normalize_name("help"), "help");
    }

    #[test]
    fn test_simplify_name() {
        assert_eq!(simplify_name("help"), "Help");
        assert_eq!(simplify_name("give_item"), "Give Item");
        assert_eq!(simplify_name("SPAWN_mob"), "Spawn Mob");
        assert_eq!(simplify_name("trailing_"), "Trailing");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("i32"), "i32");
        assert_eq!(short_type_name("alloc::string::String"), "String");
        assert_eq!(
            short_type_name("alloc::vec::Vec<alloc::string::String>"),
            "Vec<String>"
        );
        assert_eq!(short_type_name("&str"), "&str");
    }
}
