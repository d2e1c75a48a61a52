//! Rewriting of `#` that survives parsing inside plural and select branches.
//!
//! The grammar only turns `#` into [`MessageElement::Pound`] when the branch
//! directly belongs to a plural. A `#` that ends up in a literal (quoted, or
//! in a select branch) is replaced here by `{name, number}` for the enclosing
//! element's argument. A `#` preceded by a backslash is left alone.

use std::mem;

use crate::parser::ast::{MessageElement, Position, Span};

/// Returns a normalized copy of `elements`.
pub fn normalize_hashtag_in_plural(elements: &[MessageElement]) -> Vec<MessageElement> {
    let mut normalized = elements.to_vec();
    normalize_hashtag_in_plural_mut(&mut normalized);
    normalized
}

/// Normalizes `elements` in place. Running it twice changes nothing.
pub fn normalize_hashtag_in_plural_mut(elements: &mut [MessageElement]) {
    for element in elements {
        match element {
            MessageElement::Plural { name, options, .. }
            | MessageElement::Select { name, options, .. } => {
                for option in options {
                    split_branch(&mut option.value, name);
                    normalize_hashtag_in_plural_mut(&mut option.value);
                }
            }
            MessageElement::Tag { children, .. } => normalize_hashtag_in_plural_mut(children),
            MessageElement::Literal { .. }
            | MessageElement::Argument { .. }
            | MessageElement::Number { .. }
            | MessageElement::Date { .. }
            | MessageElement::Time { .. }
            | MessageElement::Pound { .. } => {}
        }
    }
}

fn split_branch(branch: &mut Vec<MessageElement>, name: &str) {
    let mut index = 0;
    while index < branch.len() {
        let replacement = match &branch[index] {
            MessageElement::Literal { value, location } => {
                split_literal(value, name, location.as_ref())
            }
            _ => None,
        };
        match replacement {
            Some(replacement) => {
                let count = replacement.len();
                branch.splice(index..=index, replacement);
                index += count;
            }
            None => index += 1,
        }
    }
}

/// Splits a literal around each unescaped `#`, or `None` if it has none.
///
/// Pieces get their own spans when the literal's source text is its value
/// verbatim. A literal that contained quoting or `''` keeps the whole span on
/// every piece, since its characters no longer line up with the source.
fn split_literal(
    value: &str,
    name: &str,
    location: Option<&Span>,
) -> Option<Vec<MessageElement>> {
    if !value.contains('#') {
        return None;
    }
    let mut cursor = location
        .filter(|span| span.end.offset - span.start.offset == value.len())
        .map(|span| span.start);
    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut text_start = cursor;
    let mut previous = None;
    for c in value.chars() {
        let before = cursor;
        if let Some(position) = cursor.as_mut() {
            advance(position, c);
        }
        if c == '#' && previous != Some('\\') {
            if !text.is_empty() {
                pieces.push(MessageElement::Literal {
                    value: mem::take(&mut text),
                    location: piece_span(location, text_start, before),
                });
            }
            pieces.push(MessageElement::Number {
                name: name.to_string(),
                style: None,
                location: piece_span(location, before, cursor),
            });
            text_start = cursor;
        } else {
            text.push(c);
        }
        previous = Some(c);
    }
    if pieces.is_empty() {
        return None;
    }
    if !text.is_empty() {
        pieces.push(MessageElement::Literal {
            value: text,
            location: piece_span(location, text_start, cursor),
        });
    }
    Some(pieces)
}

fn advance(position: &mut Position, c: char) {
    position.offset += c.len_utf8();
    if c == '\n' {
        position.line += 1;
        position.column = 1;
    } else {
        position.column += 1;
    }
}

/// The narrowed span when positions are tracked, else the literal's span.
fn piece_span(
    whole: Option<&Span>,
    start: Option<Position>,
    end: Option<Position>,
) -> Option<Span> {
    match (start, end) {
        (Some(start), Some(end)) => Some(Span { start, end }),
        _ => whole.copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{PluralKind, SelectorOption};

    fn select_with(value: &str) -> Vec<MessageElement> {
        vec![MessageElement::Select {
            name: "g".to_string(),
            options: vec![SelectorOption {
                selector: "other".to_string(),
                value: vec![MessageElement::literal(value)],
                location: None,
            }],
            location: None,
        }]
    }

    fn branch(elements: &[MessageElement]) -> &[MessageElement] {
        match &elements[0] {
            MessageElement::Select { options, .. } | MessageElement::Plural { options, .. } => {
                &options[0].value
            }
            _ => panic!("not a branching element"),
        }
    }

    #[test]
    fn splits_every_hashtag_in_literal() {
        let normalized = normalize_hashtag_in_plural(&select_with("# and #!"));
        let value = branch(&normalized);
        assert_eq!(value.len(), 4);
        assert!(matches!(&value[0], MessageElement::Number { name, .. } if name == "g"));
        assert_eq!(value[1], MessageElement::literal(" and "));
        assert!(matches!(&value[2], MessageElement::Number { .. }));
        assert_eq!(value[3], MessageElement::literal("!"));
    }

    #[test]
    fn backslash_escapes_hashtag() {
        let normalized = normalize_hashtag_in_plural(&select_with("\\# literal"));
        assert_eq!(branch(&normalized), &[MessageElement::literal("\\# literal")]);
    }

    #[test]
    fn is_idempotent() {
        let elements = vec![MessageElement::Plural {
            name: "n".to_string(),
            kind: PluralKind::Cardinal,
            offset: 0,
            options: vec![SelectorOption {
                selector: "other".to_string(),
                value: select_with("# items"),
                location: None,
            }],
            location: None,
        }];
        let once = normalize_hashtag_in_plural(&elements);
        let twice = normalize_hashtag_in_plural(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn pieces_get_their_own_spans() {
        let at = |offset| Position {
            offset,
            line: 1,
            column: offset + 1,
        };
        let mut elements = select_with("a#bc");
        if let MessageElement::Select { options, .. } = &mut elements[0] {
            options[0].value[0] = MessageElement::Literal {
                value: "a#bc".to_string(),
                location: Some(Span {
                    start: at(20),
                    end: at(24),
                }),
            };
        }
        let normalized = normalize_hashtag_in_plural(&elements);
        let spans: Vec<(usize, usize)> = branch(&normalized)
            .iter()
            .map(|element| {
                let span = element.location().unwrap();
                (span.start.offset, span.end.offset)
            })
            .collect();
        assert_eq!(spans, [(20, 21), (21, 22), (22, 24)]);
        assert_eq!(branch(&normalized)[2].location().unwrap().start.column, 23);
    }

    #[test]
    fn quoted_literal_keeps_whole_span() {
        let whole = Span {
            start: Position {
                offset: 0,
                line: 1,
                column: 1,
            },
            end: Position {
                offset: 6,
                line: 1,
                column: 7,
            },
        };
        let pieces = split_literal("{#}", "n", Some(&whole)).unwrap();
        assert!(pieces.iter().all(|piece| piece.location() == Some(&whole)));
    }

    #[test]
    fn top_level_literals_are_untouched() {
        let elements = vec![MessageElement::literal("#1")];
        assert_eq!(normalize_hashtag_in_plural(&elements), elements);
    }
}
