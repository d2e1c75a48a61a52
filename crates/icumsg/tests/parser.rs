//! Tests for message parsing: AST shapes, options, and syntax errors.

use icumsg::parser::{DateTimeSkeleton, NumberStyle, SelectorOption, argument_names};
use icumsg::{MessageElement, ParseError, ParseOptions, PluralKind, Style, parse};

fn parse_default(input: &str) -> Vec<MessageElement> {
    parse(input, &ParseOptions::default()).unwrap()
}

fn parse_err(input: &str) -> ParseError {
    parse(input, &ParseOptions::default()).unwrap_err()
}

// =========================================================================
// Literals and arguments
// =========================================================================

#[test]
fn literal_only_message() {
    assert_eq!(parse_default("Hello world"), vec![MessageElement::literal("Hello world")]);
}

#[test]
fn empty_message_has_no_elements() {
    assert!(parse_default("").is_empty());
}

#[test]
fn simple_argument() {
    assert_eq!(
        parse_default("Hi {name}!"),
        vec![
            MessageElement::literal("Hi "),
            MessageElement::argument("name"),
            MessageElement::literal("!"),
        ]
    );
}

#[test]
fn argument_whitespace_is_ignored() {
    assert_eq!(parse_default("{  name\t}"), vec![MessageElement::argument("name")]);
}

#[test]
fn numeric_argument_names() {
    assert_eq!(parse_default("{0}"), vec![MessageElement::argument("0")]);
    assert_eq!(parse_default("{12}"), vec![MessageElement::argument("12")]);
}

#[test]
fn leading_zero_argument_is_an_error() {
    assert!(matches!(parse_err("{007}"), ParseError::Expected { .. }));
}

#[test]
fn parsing_is_deterministic() {
    let input = "{n, plural, offset:1 =0{none} one{<b>#</b>} other{{n, number, ::percent}}}";
    assert_eq!(parse_default(input), parse_default(input));
}

// =========================================================================
// Apostrophe escaping
// =========================================================================

#[test]
fn doubled_apostrophe_is_one_apostrophe() {
    assert_eq!(parse_default("it''s"), vec![MessageElement::literal("it's")]);
}

#[test]
fn lone_apostrophe_is_literal() {
    assert_eq!(parse_default("it's"), vec![MessageElement::literal("it's")]);
}

#[test]
fn apostrophe_quotes_syntax_characters() {
    assert_eq!(
        parse_default("'{name}' is literal"),
        vec![MessageElement::literal("{name} is literal")]
    );
    assert_eq!(parse_default("a '<b>' c"), vec![MessageElement::literal("a <b> c")]);
}

#[test]
fn doubled_apostrophe_inside_quoted_run() {
    assert_eq!(parse_default("'{it''s}'"), vec![MessageElement::literal("{it's}")]);
}

#[test]
fn unterminated_quote_runs_to_end() {
    assert_eq!(parse_default("'{abc"), vec![MessageElement::literal("{abc")]);
}

#[test]
fn closing_brace_is_literal_at_top_level() {
    assert_eq!(parse_default("a}b"), vec![MessageElement::literal("a}b")]);
}

// =========================================================================
// Number, date, and time
// =========================================================================

fn number_style(element: &MessageElement) -> Option<&NumberStyle> {
    match element {
        MessageElement::Number { style, .. } => style.as_ref(),
        other => panic!("expected number element, got {other:?}"),
    }
}

#[test]
fn number_without_style() {
    let ast = parse_default("{n, number}");
    assert!(number_style(&ast[0]).is_none());
}

#[test]
fn number_with_named_style() {
    let ast = parse_default("{n, number, percent}");
    assert_eq!(number_style(&ast[0]), Some(&Style::Named("percent".to_string())));
}

#[test]
fn number_skeleton_is_parsed() {
    let ast = parse_default("{n, number, ::currency/EUR .00}");
    let Some(Style::Skeleton(skeleton)) = number_style(&ast[0]) else {
        panic!("expected skeleton");
    };
    assert_eq!(skeleton.tokens.len(), 2);
    assert_eq!(skeleton.parsed_options.currency.as_deref(), Some("EUR"));
    assert_eq!(skeleton.parsed_options.minimum_fraction_digits, Some(2));
}

#[test]
fn skeleton_resolution_can_be_disabled() {
    let options = ParseOptions::builder().should_parse_skeleton(false).build();
    let ast = parse("{n, number, ::percent}", &options).unwrap();
    let Some(Style::Skeleton(skeleton)) = number_style(&ast[0]) else {
        panic!("expected skeleton");
    };
    assert_eq!(skeleton.tokens[0].stem, "percent");
    assert_eq!(skeleton.parsed_options, Default::default());
}

#[test]
fn date_and_time_styles() {
    let ast = parse_default("{d, date, short} {d, time, ::hhmm}");
    assert!(matches!(
        &ast[0],
        MessageElement::Date { style: Some(Style::Named(name)), .. } if name == "short"
    ));
    let MessageElement::Time {
        style: Some(Style::Skeleton(DateTimeSkeleton { pattern, parsed_options, .. })),
        ..
    } = &ast[2]
    else {
        panic!("expected time skeleton");
    };
    assert_eq!(pattern, "hhmm");
    assert!(parsed_options.hour.is_some());
    assert!(parsed_options.minute.is_some());
}

#[test]
fn invalid_date_skeleton_is_an_error() {
    let err = parse_err("{d, date, ::YYYY}");
    assert!(matches!(err, ParseError::InvalidSkeleton { .. }));
    assert!(err.to_string().contains("use `y` instead"));
}

// =========================================================================
// Plural and select
// =========================================================================

#[test]
fn plural_with_offset_and_pound() {
    let ast = parse_default("{n, plural, offset:1 =0{none} other{# more}}");
    let MessageElement::Plural {
        name,
        kind,
        offset,
        options,
        ..
    } = &ast[0]
    else {
        panic!("expected plural");
    };
    assert_eq!(name, "n");
    assert_eq!(*kind, PluralKind::Cardinal);
    assert_eq!(*offset, 1);
    assert_eq!(options[0].selector, "=0");
    assert_eq!(options[0].value, vec![MessageElement::literal("none")]);
    assert_eq!(
        options[1].value,
        vec![
            MessageElement::Pound { location: None },
            MessageElement::literal(" more"),
        ]
    );
}

#[test]
fn selectordinal_kind() {
    let ast = parse_default("{n, selectordinal, one{#st} two{#nd} few{#rd} other{#th}}");
    assert!(matches!(
        &ast[0],
        MessageElement::Plural { kind: PluralKind::Ordinal, options, .. } if options.len() == 4
    ));
}

#[test]
fn select_branches() {
    let ast = parse_default("{g, select, male{he} female{she} other{they}}");
    let MessageElement::Select { options, .. } = &ast[0] else {
        panic!("expected select");
    };
    let selectors: Vec<&str> = options.iter().map(|o| o.selector.as_str()).collect();
    assert_eq!(selectors, ["male", "female", "other"]);
}

#[test]
fn nested_plural_inside_select() {
    let ast = parse_default("{g, select, other{{n, plural, other{# items}}}}");
    let MessageElement::Select { options, .. } = &ast[0] else {
        panic!("expected select");
    };
    assert!(matches!(&options[0].value[0], MessageElement::Plural { .. }));
}

#[test]
fn pound_outside_plural_is_text() {
    assert_eq!(parse_default("#1 fan"), vec![MessageElement::literal("#1 fan")]);
}

#[test]
fn hashtag_in_select_branch_becomes_number() {
    let ast = parse_default("{n, select, other{# things}}");
    let MessageElement::Select { options, .. } = &ast[0] else {
        panic!("expected select");
    };
    assert_eq!(
        options[0],
        SelectorOption {
            selector: "other".to_string(),
            value: vec![
                MessageElement::Number {
                    name: "n".to_string(),
                    style: None,
                    location: None,
                },
                MessageElement::literal(" things"),
            ],
            location: None,
        }
    );
}

// =========================================================================
// Tags
// =========================================================================

#[test]
fn tag_with_children() {
    let ast = parse_default("<b>Hello {name}</b>");
    assert_eq!(
        ast,
        vec![MessageElement::Tag {
            name: "b".to_string(),
            children: vec![MessageElement::literal("Hello "), MessageElement::argument("name")],
            location: None,
        }]
    );
}

#[test]
fn hyphenated_tag_names() {
    let ast = parse_default("<my-link>x</my-link>");
    assert!(matches!(&ast[0], MessageElement::Tag { name, .. } if name == "my-link"));
}

#[test]
fn self_closing_tag_is_literal() {
    assert_eq!(parse_default("a<br/>b"), vec![MessageElement::literal("a<br/>b")]);
}

#[test]
fn less_than_without_tag_is_text() {
    assert_eq!(parse_default("1 < 2"), vec![MessageElement::literal("1 < 2")]);
}

#[test]
fn ignore_tag_treats_markup_as_text() {
    let options = ParseOptions::builder().ignore_tag(true).build();
    assert_eq!(
        parse("<b>hi</b>", &options).unwrap(),
        vec![MessageElement::literal("<b>hi</b>")]
    );
}

// =========================================================================
// Locations
// =========================================================================

#[test]
fn locations_are_captured_on_every_element() {
    let options = ParseOptions::builder().capture_location(true).build();
    let ast = parse("ab\n{x}", &options).unwrap();
    let literal = ast[0].location().unwrap();
    assert_eq!((literal.start.offset, literal.end.offset), (0, 3));
    let argument = ast[1].location().unwrap();
    assert_eq!(argument.start.line, 2);
    assert_eq!(argument.start.column, 1);
    assert_eq!(argument.end.offset, 6);
}

#[test]
fn locations_are_absent_by_default() {
    let ast = parse_default("a {x} <b>c</b>");
    assert!(ast.iter().all(|element| element.location().is_none()));
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn duplicate_select_option() {
    let err = parse_err("{n, select, a{x} a{y} other{z}}");
    assert!(matches!(&err, ParseError::DuplicateOption { id, .. } if id == "a"));
    insta::assert_snapshot!(err, @r#"Duplicate option "a" in select element: "{n, select, a{x} a{y} other{z}}""#);
}

#[test]
fn duplicate_plural_option() {
    let err = parse_err("{n, plural, one{x} one{y} other{z}}");
    assert!(matches!(
        err,
        ParseError::DuplicateOption { kind: "plural", .. }
    ));
}

#[test]
fn mismatched_tags() {
    let err = parse_err("<b>text</i>");
    assert!(matches!(
        &err,
        ParseError::MismatchedTag { open, close, .. } if open == "b" && close == "i"
    ));
    insta::assert_snapshot!(err, @r#"Mismatched tag "b" closed by "i" at 1:1"#);
}

#[test]
fn unclosed_argument_reports_expectations() {
    let err = parse_err("{name");
    insta::assert_snapshot!(err, @r#"Expected "," or "}" but end of input found."#);
    assert_eq!(err.location().start.offset, 5);
}

#[test]
fn unknown_keyword_is_an_error() {
    let err = parse_err("{n, plurl, other{x}}");
    let ParseError::Expected { found, .. } = err else {
        panic!("expected syntax error");
    };
    assert_eq!(found, Some('p'));
}

#[test]
fn text_after_branch_inside_element_is_an_error() {
    assert!(parse("{g, select, other{a}b}", &ParseOptions::default()).is_err());
}

#[test]
fn plural_requires_options() {
    assert!(parse("{n, plural,}", &ParseOptions::default()).is_err());
}

#[test]
fn offset_out_of_range() {
    let err = parse_err("{n, plural, offset:99999999999999999999 other{x}}");
    assert!(matches!(err, ParseError::InvalidOffset { .. }));
}

// =========================================================================
// Argument names
// =========================================================================

#[test]
fn argument_names_cover_branches_and_tags() {
    let ast = parse_default(
        "{g, select, other{<link>{name}</link> has {n, plural, other{# of {total, number}}}}} {d, date}",
    );
    let names: Vec<&str> = argument_names(&ast).into_iter().collect();
    assert_eq!(names, ["d", "g", "link", "n", "name", "total"]);
}
