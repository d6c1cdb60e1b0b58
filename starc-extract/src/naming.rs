//! Identifier construction for generated code.

use crate::conventions::SDK_MODULE;

/// Turn a rendered type string into an exported, compilable identifier.
///
/// `[]T` becomes `TSlice`, the SDK module qualifier is dropped, package
/// separators and pointer stars are replaced by letter-class runes and
/// every word start is upper-cased.
pub fn name(t: &str) -> String {
    if let Some(elem) = t.strip_prefix("[]") {
        return name(&format!("{}Slice", elem));
    }

    let t = t.replace(&format!("{}.", SDK_MODULE), "");
    let mut sanitized = String::with_capacity(t.len());
    for c in t.chars() {
        match c {
            '.' => sanitized.push('۰'),
            '*' => sanitized.push('Ꮨ'),
            '[' | ']' | '(' | ')' | ',' => sanitized.push('_'),
            '{' | '}' | ';' => {}
            c => sanitized.push(c),
        }
    }
    title(&sanitized)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Identifier for a function shim from the canonical names of its
/// parameter and result types.
pub fn func_name(ins: &[String], outs: &[String]) -> String {
    let mut name = format!("Func{}x{}", ins.len(), outs.len());
    for part in ins.iter().chain(outs) {
        name.push_str(part);
    }
    name
}

/// Final segment of a `/`-separated module path.
pub fn tail(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Upper-case the first rune of every word.
fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = is_separator(c);
    }
    out
}

fn is_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    if c.is_alphanumeric() {
        return false;
    }
    c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_basic() {
        assert_eq!(name("int"), "Int");
        assert_eq!(name("string"), "String");
        assert_eq!(name(""), "");
    }

    #[test]
    fn test_name_slices_become_suffix() {
        assert_eq!(name("[]int"), "IntSlice");
        assert_eq!(name("[][]byte"), "ByteSliceSlice");
    }

    #[test]
    fn test_name_qualified_and_pointer() {
        assert_eq!(name("typex.EventTime"), "Typex۰EventTime");
        assert_eq!(name("beam.EventTime"), "EventTime");
        assert_eq!(name("*foo.Bar"), "Ꮨfoo۰Bar");
    }

    #[test]
    fn test_name_map_and_func() {
        assert_eq!(name("map[string]int"), "Map_string_int");
        assert_eq!(name("func(int) (string)"), "Func_int__string_");
        assert_eq!(name("interface{}"), "Interface");
    }

    #[test]
    fn test_name_distinguishes_arity() {
        assert_ne!(name("func(int) ()"), name("func() (int)"));
    }

    #[test]
    fn test_func_name() {
        let ins = vec!["Int".to_string(), "EmitString".to_string()];
        let outs = vec!["Error".to_string()];
        assert_eq!(func_name(&ins, &outs), "Func2x1IntEmitStringError");
        assert_eq!(func_name(&[], &[]), "Func0x0");
    }

    #[test]
    fn test_tail() {
        assert_eq!(tail("github.com/apache/beam/sdks/v2/go/pkg/beam"), "beam");
        assert_eq!(tail("fmt"), "fmt");
        assert_eq!(tail(""), "");
    }
}
