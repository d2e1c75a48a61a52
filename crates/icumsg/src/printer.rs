//! Prints an AST back to message syntax.

use crate::parser::{DateTimeStyle, MessageElement, PluralKind, SelectorOption, Style};

/// Render `elements` as message text.
///
/// Literal text is escaped so that parsing the output yields the same
/// elements, minus source locations.
///
/// # Example
///
/// ```
/// use icumsg::{ParseOptions, parse, print_ast};
///
/// let ast = parse("It's {n, plural, one{# file} other{# files}}", &ParseOptions::default()).unwrap();
/// assert_eq!(print_ast(&ast), "It''s {n, plural, one{# file} other{# files}}");
/// ```
pub fn print_ast(elements: &[MessageElement]) -> String {
    let mut out = String::new();
    print_elements(&mut out, elements, false);
    out
}

fn print_elements(out: &mut String, elements: &[MessageElement], in_plural: bool) {
    for element in elements {
        print_element(out, element, in_plural);
    }
}

fn print_element(out: &mut String, element: &MessageElement, in_plural: bool) {
    match element {
        MessageElement::Literal { value, .. } => print_literal(out, value, in_plural),
        MessageElement::Argument { name, .. } => out.push_str(&format!("{{{name}}}")),
        MessageElement::Number { name, style, .. } => {
            out.push_str(&format!("{{{name}, number"));
            match style {
                Some(Style::Named(style)) => out.push_str(&format!(", {style}")),
                Some(Style::Skeleton(skeleton)) => {
                    out.push_str(", ::");
                    let tokens: Vec<String> = skeleton
                        .tokens
                        .iter()
                        .map(|token| {
                            let mut text = token.stem.clone();
                            for option in &token.options {
                                text.push('/');
                                text.push_str(option);
                            }
                            text
                        })
                        .collect();
                    out.push_str(&tokens.join(" "));
                }
                None => {}
            }
            out.push('}');
        }
        MessageElement::Date { name, style, .. } => print_date_time(out, name, "date", style.as_ref()),
        MessageElement::Time { name, style, .. } => print_date_time(out, name, "time", style.as_ref()),
        MessageElement::Plural {
            name,
            kind,
            offset,
            options,
            ..
        } => {
            let keyword = match kind {
                PluralKind::Cardinal => "plural",
                PluralKind::Ordinal => "selectordinal",
            };
            out.push_str(&format!("{{{name}, {keyword},"));
            if *offset != 0 {
                out.push_str(&format!(" offset:{offset}"));
            }
            print_options(out, options, true);
            out.push('}');
        }
        MessageElement::Select { name, options, .. } => {
            out.push_str(&format!("{{{name}, select,"));
            print_options(out, options, false);
            out.push('}');
        }
        MessageElement::Tag { name, children, .. } => {
            out.push_str(&format!("<{name}>"));
            print_elements(out, children, in_plural);
            out.push_str(&format!("</{name}>"));
        }
        MessageElement::Pound { .. } => out.push('#'),
    }
}

fn print_date_time(
    out: &mut String,
    name: &str,
    keyword: &str,
    style: Option<&DateTimeStyle>,
) {
    out.push_str(&format!("{{{name}, {keyword}"));
    match style {
        Some(Style::Named(style)) => out.push_str(&format!(", {style}")),
        Some(Style::Skeleton(skeleton)) => out.push_str(&format!(", ::{}", skeleton.pattern)),
        None => {}
    }
    out.push('}');
}

fn print_options(out: &mut String, options: &[SelectorOption], in_plural: bool) {
    for option in options {
        out.push_str(&format!(" {}{{", option.selector));
        print_elements(out, &option.value, in_plural);
        out.push('}');
    }
}

/// Doubles apostrophes and wraps everything from the first syntax character
/// to the end of the literal in one quoted run.
fn print_literal(out: &mut String, value: &str, in_plural: bool) {
    let mut quoted = false;
    for c in value.chars() {
        let special = matches!(c, '{' | '}' | '<') || (in_plural && c == '#');
        if special && !quoted {
            out.push('\'');
            quoted = true;
        }
        if c == '\'' {
            out.push_str("''");
        } else {
            out.push(c);
        }
    }
    if quoted {
        out.push('\'');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(value: &str, in_plural: bool) -> String {
        let mut out = String::new();
        print_literal(&mut out, value, in_plural);
        out
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(literal("hello world", false), "hello world");
    }

    #[test]
    fn apostrophes_are_doubled() {
        assert_eq!(literal("don't", false), "don''t");
    }

    #[test]
    fn syntax_characters_open_a_single_quoted_run() {
        assert_eq!(literal("a {b} <c>", false), "a '{b} <c>'");
        assert_eq!(literal("{'}", false), "'{''}'");
    }

    #[test]
    fn pound_is_quoted_only_in_plural() {
        assert_eq!(literal("#1", false), "#1");
        assert_eq!(literal("#1", true), "'#1'");
    }
}
