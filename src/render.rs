//! Writes a [`Tree`] back out in the GROUP/END_GROUP text form read by [`crate::parse`].

use std::fmt::Write;

use crate::error::{MetaError, MetaResult};
use crate::literal::interpret;
use crate::value::{Tree, Value};

/// words the parser treats specially on the left of `=`
const RESERVED_KEYS: [&str; 6] = [
    "GROUP",
    "OBJECT",
    "END_GROUP",
    "END_OBJECT",
    "CLASS",
    "NUM_VAL",
];

/// Renders `tree` so that [`crate::parse`] reads back an equal tree.
///
/// Fails with [`MetaError::Unrepresentable`] for keys or values the line grammar cannot
/// carry, such as text containing `=` or a line break.
pub fn render(tree: &Tree) -> MetaResult<String> {
    let mut out = String::new();
    render_scope(&mut out, tree, 0)?;
    out.push_str("END\n");
    Ok(out)
}

fn render_scope(out: &mut String, tree: &Tree, depth: usize) -> MetaResult<()> {
    let indent = "  ".repeat(depth);
    for (key, value) in tree {
        match value {
            Value::Group(children) => {
                let name = scope_name(key)?;
                let _ = writeln!(out, "{}GROUP = {}", indent, name);
                render_scope(out, children, depth + 1)?;
                let _ = writeln!(out, "{}END_GROUP = {}", indent, name);
            }
            scalar => {
                check_key(key)?;
                let _ = writeln!(out, "{}{} = {}", indent, key, literal(key, scalar)?);
            }
        }
    }
    Ok(())
}

fn unrepresentable(key: &str, reason: &'static str) -> MetaError {
    MetaError::Unrepresentable {
        key: key.to_string(),
        reason,
    }
}

fn check_key(key: &str) -> MetaResult<()> {
    if key.is_empty() || key.trim() != key {
        return Err(unrepresentable(key, "key is empty or padded with whitespace"));
    }
    if key.contains(['=', '\n', '\r']) {
        return Err(unrepresentable(key, "key contains '=' or a line break"));
    }
    if RESERVED_KEYS.contains(&key) {
        return Err(unrepresentable(key, "key is a reserved word"));
    }
    Ok(())
}

/// scope names pass through the literal grammar, so quote the ones that would change
fn scope_name(key: &str) -> MetaResult<String> {
    if !key.is_empty() && interpret(key) == Value::Str(key.to_string()) && parse_safe(key) {
        Ok(key.to_string())
    } else {
        quote(key, key)
    }
}

fn parse_safe(text: &str) -> bool {
    !text.contains(['=', '\n', '\r'])
}

fn quote(key: &str, text: &str) -> MetaResult<String> {
    if !parse_safe(text) {
        return Err(unrepresentable(key, "text contains '=' or a line break"));
    }
    if !text.contains('"') {
        Ok(format!("\"{}\"", text))
    } else if !text.contains('\'') {
        Ok(format!("'{}'", text))
    } else {
        Err(unrepresentable(key, "text contains both quote characters"))
    }
}

/// literal text that reads back as the same value
fn literal(key: &str, value: &Value) -> MetaResult<String> {
    match value {
        Value::Int(i) => Ok(i.to_string()),
        Value::Float(x) if x.is_finite() => Ok(format!("{:?}", x)),
        Value::Float(_) => Err(unrepresentable(key, "float is not finite")),
        Value::Str(s) => quote(key, s),
        Value::List(items) => {
            let parts = items
                .iter()
                .map(|item| literal(key, item))
                .collect::<MetaResult<Vec<String>>>()?;
            Ok(match parts.len() {
                1 => format!("({},)", parts[0]),
                _ => format!("({})", parts.join(", ")),
            })
        }
        Value::Group(_) => Err(unrepresentable(key, "groups cannot be list items")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn single(key: &str, value: Value) -> Tree {
        let mut tree = Tree::new();
        tree.insert(key.to_string(), value);
        tree
    }

    #[test]
    fn rendered_tree_parses_back() {
        let mut ring = Tree::new();
        ring.insert(
            "VALUE".to_string(),
            Value::List(vec![Value::Float(-104.77), Value::Float(-129.0)]),
        );
        let mut single = Tree::new();
        single.insert("VALUE".to_string(), Value::List(vec![Value::Int(3)]));
        single.insert("EMPTY".to_string(), Value::List(vec![]));

        let mut root = Tree::new();
        root.insert("RING".to_string(), Value::Group(ring));
        root.insert("SINGLE".to_string(), Value::Group(single));
        root.insert("ORBIT".to_string(), Value::Int(71234));
        root.insert("WHOLE".to_string(), Value::Float(40.0));
        root.insert("FLAG".to_string(), Value::Str("Day".to_string()));
        root.insert("CODE".to_string(), Value::Str("007".to_string()));

        let text = render(&root).unwrap();
        assert_eq!(parse(&text).unwrap(), root);
    }

    #[test]
    fn groups_close_with_their_own_name() {
        let root = single("G", Value::Group(single("X", Value::Int(1))));
        assert_eq!(
            render(&root).unwrap(),
            "GROUP = G\n  X = 1\nEND_GROUP = G\nEND\n"
        );
    }

    #[test]
    fn double_quotes_switch_to_single_quotes() {
        let root = single("K", Value::Str("say \"hi\"".to_string()));
        let text = render(&root).unwrap();
        assert_eq!(text, "K = 'say \"hi\"'\nEND\n");
        assert_eq!(parse(&text).unwrap(), root);

        let root = single(
            "K",
            Value::List(vec![Value::Str("it's".into()), Value::Str("a, b".into())]),
        );
        assert_eq!(parse(&render(&root).unwrap()).unwrap(), root);
    }

    #[test]
    fn padded_text_keeps_its_padding() {
        let root = single("K", Value::Str("  spaced ".to_string()));
        assert_eq!(parse(&render(&root).unwrap()).unwrap(), root);
    }

    #[test]
    fn numeric_looking_scope_names_are_quoted() {
        let root = single("1.50", Value::Group(single("X", Value::Int(1))));
        let text = render(&root).unwrap();
        assert!(text.starts_with("GROUP = \"1.50\"\n"));
        assert_eq!(parse(&text).unwrap(), root);
    }

    #[test]
    fn text_the_grammar_cannot_carry_is_an_error() {
        for value in ["a=b", "two\nlines", "both \" and '"] {
            let root = single("K", Value::Str(value.to_string()));
            assert!(
                matches!(render(&root), Err(MetaError::Unrepresentable { .. })),
                "{:?} should not render",
                value
            );
        }
        let root = single("K", Value::Float(f64::NAN));
        assert!(matches!(render(&root), Err(MetaError::Unrepresentable { .. })));
    }

    #[test]
    fn keys_the_parser_would_swallow_are_an_error() {
        for key in ["CLASS", "GROUP", "A=B", " K", ""] {
            let root = single(key, Value::Int(1));
            assert!(
                matches!(render(&root), Err(MetaError::Unrepresentable { .. })),
                "{:?} should not render",
                key
            );
        }
    }
}
