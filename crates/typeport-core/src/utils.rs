/// Convert an identifier or module path to PascalCase.
///
/// Words are split at `_`, `-`, `.`, `/` and spaces. Each word gets an
/// uppercase first letter; the rest of the word keeps its casing unless the
/// whole word is uppercase, which is normalized (`FOO` becomes `Foo`).
///
/// # Examples
/// ```
/// use typeport_core::utils::to_pascal_case;
/// assert_eq!(to_pascal_case("foo_bar"), "FooBar");
/// assert_eq!(to_pascal_case("example.com/api"), "ExampleComApi");
/// assert_eq!(to_pascal_case("idCamp"), "IdCamp");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    fn is_separator(c: char) -> bool {
        matches!(c, '_' | '-' | '.' | '/' | ' ')
    }

    let mut result = String::with_capacity(s.len());
    for word in s.split(is_separator).filter(|w| !w.is_empty()) {
        let shouting = !word.chars().any(|c| c.is_ascii_lowercase());
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.push(first.to_ascii_uppercase());
        }
        for c in chars {
            result.push(if shouting { c.to_ascii_lowercase() } else { c });
        }
    }
    result
}

/// Lowercase the leading capital (or leading acronym) of an identifier.
///
/// # Examples
/// ```
/// use typeport_core::utils::lower_first;
/// assert_eq!(lower_first("ColorRed"), "colorRed");
/// assert_eq!(lower_first("URLPath"), "urlPath");
/// assert_eq!(lower_first("ID"), "id");
/// ```
pub fn lower_first(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let run = chars.iter().take_while(|c| c.is_ascii_uppercase()).count();
    // Inside an acronym followed by a word, the last capital starts that word.
    let lower_until = if run > 1 && run < chars.len() && chars[run].is_ascii_lowercase() {
        run - 1
    } else {
        run.max(1).min(chars.len())
    };
    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i < lower_until { c.to_ascii_lowercase() } else { *c })
        .collect()
}

/// Last path segment of a module (`example.com/acme/api` gives `api`).
pub fn module_tail(module: &str) -> &str {
    module.rsplit('/').next().unwrap_or(module)
}
