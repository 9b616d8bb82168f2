//! Parser for the GROUP/OBJECT metadata text embedded in ECS granules.
//!
//! The document is line oriented. `GROUP = name` and `OBJECT = name` open a nested
//! scope which is closed by `END_GROUP = name` / `END_OBJECT = name`; every other
//! `KEY = VALUE` line assigns into the innermost open scope and a bare `END` line
//! terminates the document.

use tracing::{debug, trace, warn};

use crate::error::{MetaError, MetaResult};
use crate::literal::interpret;
use crate::value::{Tree, Value};

/// keys carrying type tags and value counts, not needed downstream
const IGNORED_KEYS: [&str; 2] = ["CLASS", "NUM_VAL"];

/// an open scope: its name and the entries collected so far
struct Frame {
    name: String,
    entries: Tree,
}

/// Parses an attribute blob into a nested [`Tree`].
///
/// Fails with [`MetaError::StructuralMismatch`] when a close line does not name the
/// innermost open scope; no partial tree is returned in that case.
pub fn parse(text: &str) -> MetaResult<Tree> {
    let mut root = Tree::new();
    let mut stack: Vec<Frame> = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        if line.trim() == "END" {
            debug!(line = line_no, "reached END sentinel");
            break;
        }

        let mut parts = line.split('=');
        let (key, raw) = match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(raw), None) => (key.trim(), raw.trim()),
            _ => {
                trace!(line = line_no, "skipping line without a single '='");
                continue;
            }
        };
        let value = interpret(raw);

        match key {
            "GROUP" | "OBJECT" => {
                let name = scope_name(&value, raw);
                debug!(line = line_no, depth = stack.len(), %name, "open {}", key);
                stack.push(Frame {
                    name,
                    entries: Tree::new(),
                });
            }
            "END_GROUP" | "END_OBJECT" => {
                let name = scope_name(&value, raw);
                let frame = match stack.pop() {
                    Some(frame) if frame.name == name => frame,
                    other => {
                        return Err(MetaError::StructuralMismatch {
                            expected: other.map(|frame| frame.name),
                            actual: name,
                            line: line_no,
                        })
                    }
                };
                debug!(line = line_no, depth = stack.len(), name = %frame.name, "close {}", key);
                attach(&mut root, &mut stack, frame);
            }
            k if IGNORED_KEYS.contains(&k) => {}
            _ => {
                current(&mut root, &mut stack).insert(key.to_string(), value);
            }
        }
    }

    if !stack.is_empty() {
        warn!(open = stack.len(), "metadata ended with unclosed scopes");
        while let Some(frame) = stack.pop() {
            attach(&mut root, &mut stack, frame);
        }
    }

    Ok(root)
}

fn scope_name(value: &Value, raw: &str) -> String {
    value.to_text().unwrap_or_else(|| raw.to_string())
}

fn current<'a>(root: &'a mut Tree, stack: &'a mut [Frame]) -> &'a mut Tree {
    match stack.last_mut() {
        Some(frame) => &mut frame.entries,
        None => root,
    }
}

fn attach(root: &mut Tree, stack: &mut [Frame], frame: Frame) {
    current(root, stack).insert(frame.name, Value::Group(frame.entries));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_scopes() {
        let text = "\
GROUP = OUTER
  OBJECT = INNER
    NUM_VAL = 1
    CLASS = \"1\"
    VALUE = 42
  END_OBJECT = INNER
  NAME = \"outer\"
END_GROUP = OUTER
TOP = 1.5
END
";
        let tree = parse(text).unwrap();
        let outer = tree["OUTER"].as_group().unwrap();
        let inner = outer["INNER"].as_group().unwrap();
        assert_eq!(inner.len(), 1);
        assert_eq!(inner["VALUE"], Value::Int(42));
        assert_eq!(outer["NAME"], Value::Str("outer".into()));
        assert_eq!(tree["TOP"], Value::Float(1.5));
    }

    #[test]
    fn mismatched_close_is_an_error() {
        let text = "GROUP = A\nOBJECT = B\nEND_OBJECT = A\nEND_GROUP = A\n";
        match parse(text) {
            Err(MetaError::StructuralMismatch {
                expected,
                actual,
                line,
            }) => {
                assert_eq!(expected.as_deref(), Some("B"));
                assert_eq!(actual, "A");
                assert_eq!(line, 3);
            }
            other => panic!("expected a mismatch, got {:?}", other),
        }
    }

    #[test]
    fn close_without_open_is_an_error() {
        let err = parse("END_GROUP = A\n").unwrap_err();
        assert!(matches!(
            err,
            MetaError::StructuralMismatch { expected: None, .. }
        ));
    }

    #[test]
    fn end_sentinel_stops_parsing() {
        let tree = parse("A = 1\n  END  \nEND_GROUP = NOPE\nB = 2\n").unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.get("B").is_none());
    }

    #[test]
    fn stray_lines_are_skipped() {
        let tree = parse("just some text\nA = 1\nB = x = y\n\n").unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree["A"], Value::Int(1));
    }

    #[test]
    fn unclosed_scopes_are_kept() {
        let tree = parse("GROUP = A\nOBJECT = B\nV = 1\n").unwrap();
        let b = tree["A"].as_group().unwrap()["B"].as_group().unwrap();
        assert_eq!(b["V"], Value::Int(1));
    }

    #[test]
    fn quoted_scope_names_match_bare_ones() {
        let tree = parse("OBJECT = \"X\"\nV = 1\nEND_OBJECT = X\n").unwrap();
        assert!(tree["X"].as_group().is_some());
    }
}
