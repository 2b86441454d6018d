use akitree::format::{FormatStyle, TreeParser, parse_str, read_file, to_bracket_string, write_file};
use akitree::model::{DEFAULT_ROOT_LABEL, DecisionTree, ROOT_INDEX};
use akitree::parser::{ByteParser, ParsingErrorType};
use std::fs;
use tempfile::tempdir;

const ANIMALS: &str = r#"{"has wings"{"can fly"{"kea"}{"kakapo"}}{"barks"{"dog"}{"cat"}}}"#;

fn assert_same_tree(a: &DecisionTree, b: &DecisionTree) {
    assert_eq!(a.num_nodes(), b.num_nodes());
    let a_nodes: Vec<_> = a.nodes().collect();
    let b_nodes: Vec<_> = b.nodes().collect();
    assert_eq!(a_nodes, b_nodes);
}

fn parse_error(input: &str) -> ParsingErrorType {
    parse_str(input).unwrap_err().kind().clone()
}

// --- PARSING ---
#[test]
fn test_parse_nested_tree() {
    let tree = parse_str(ANIMALS).unwrap();
    assert_eq!(tree.num_nodes(), 7);
    assert_eq!(tree.num_leaves(), 4);

    let (yes, no) = tree.root().children().unwrap();
    assert_eq!(tree.label(yes), "can fly");
    assert_eq!(tree.label(no), "barks");
    let (kea, kakapo) = tree.node(yes).children().unwrap();
    assert_eq!(tree.label(kea), "kea");
    assert_eq!(tree.label(kakapo), "kakapo");
    assert_eq!(tree.node(kakapo).parent(), Some(yes));
    assert!(tree.is_valid());
}

#[test]
fn test_parse_whitespace_everywhere() {
    let input = "\n\t{ \"has wings\"\r\n  { \"bird\" }\n  {\"dog\"  }\n}\n\n";
    let tree = parse_str(input).unwrap();
    assert_eq!(tree.num_nodes(), 3);
    assert_eq!(tree.label(ROOT_INDEX), "has wings");
}

#[test]
fn test_parse_keeps_label_whitespace_and_unicode() {
    let tree = parse_str("{\" Kākāpō  {x} \"}").unwrap();
    assert_eq!(tree.label(ROOT_INDEX), " Kākāpō  {x} ");
}

#[test]
fn test_parse_empty_input_gives_default_tree() {
    for input in ["", "   \n\t "] {
        let tree = parse_str(input).unwrap();
        assert_eq!(tree.num_nodes(), 1);
        assert_eq!(tree.label(ROOT_INDEX), DEFAULT_ROOT_LABEL);
    }
}

#[test]
fn test_parse_reports_max_depth() {
    let mut parser = TreeParser::new();
    let mut byte_parser = ByteParser::for_str(ANIMALS);
    parser.parse(&mut byte_parser).unwrap();
    assert_eq!(parser.max_depth(), 2);
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse_error(r#"{"a""#), ParsingErrorType::UnexpectedEOF);
    assert_eq!(parse_error(r#"{"a"{"b"}{"c"}"#), ParsingErrorType::UnexpectedEOF);
    assert_eq!(parse_error(r#"{"a"}}"#), ParsingErrorType::UnbalancedBrackets);
    assert_eq!(parse_error(r#"{"a}"#), ParsingErrorType::OddQuoteCount);
    assert_eq!(parse_error(r#"{}"#), ParsingErrorType::ExpectedLabel);
    assert_eq!(parse_error(r#"{"a""b"}"#), ParsingErrorType::DuplicateLabel);
    assert_eq!(parse_error(r#"{"a"} x"#), ParsingErrorType::TrailingContent);
    assert_eq!(parse_error(r#"{"a"}{"b"}"#), ParsingErrorType::TrailingContent);
    assert_eq!(parse_error(r#""a""#), ParsingErrorType::UnexpectedByte('"'));
    assert_eq!(parse_error(r#"{"a"x}"#), ParsingErrorType::UnexpectedByte('x'));
    assert!(matches!(
        parse_error(r#"{"a"{"b"}}"#),
        ParsingErrorType::InvalidTreeStructure(_)
    ));
    assert!(matches!(
        parse_error(r#"{"a"{"b"}{"c"}{"d"}}"#),
        ParsingErrorType::InvalidTreeStructure(_)
    ));
}

#[test]
fn test_parse_invalid_utf8() {
    let mut byte_parser = ByteParser::for_bytes(b"{\"\xff\xfe\"}");
    let err = TreeParser::new().parse(&mut byte_parser).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::InvalidUtf8);
}

#[test]
fn test_parse_error_message_has_position() {
    let err = parse_str(r#"{"a"} x"#).unwrap_err();
    assert_eq!(err.position(), 6);
    let message = err.to_string();
    assert!(message.contains("position 6"), "{message}");
    assert!(message.contains('x'), "{message}");
}

#[test]
fn test_parse_deep_tree_without_recursion() {
    let depth = 50_000;
    let mut input = String::new();
    for _ in 0..depth {
        input.push_str(r#"{"q"{"leaf"}"#);
    }
    input.push_str(r#"{"bottom"}"#);
    for _ in 0..depth {
        input.push('}');
    }

    let tree = parse_str(&input).unwrap();
    assert_eq!(tree.num_nodes(), 2 * depth + 1);
    let bottom = tree.find_leaf_by_label("bottom").unwrap();
    assert_eq!(tree.depth(bottom), depth);

    let written = to_bracket_string(&tree, FormatStyle::Compact);
    assert_eq!(written, input);
}

// --- WRITING ---
#[test]
fn test_write_compact() {
    let tree = parse_str(ANIMALS).unwrap();
    assert_eq!(to_bracket_string(&tree, FormatStyle::Compact), ANIMALS);
    assert_eq!(tree.to_bracket_string(FormatStyle::default()), ANIMALS);
}

#[test]
fn test_write_default_tree() {
    let tree = DecisionTree::new_default();
    assert_eq!(
        to_bracket_string(&tree, FormatStyle::Compact),
        r#"{"unknown"}"#
    );
}

#[test]
fn test_write_indented() {
    let tree = parse_str(ANIMALS).unwrap();
    let expected = r#"{"has wings"
  {"can fly"
    {"kea"}
    {"kakapo"}
  }
  {"barks"
    {"dog"}
    {"cat"}
  }
}"#;
    let written = to_bracket_string(&tree, FormatStyle::Indented);
    assert_eq!(written, expected);
    assert_same_tree(&tree, &parse_str(&written).unwrap());
}

#[test]
fn test_round_trip_after_teaching() {
    let mut tree = parse_str(ANIMALS).unwrap();
    let dog = tree.find_leaf_by_label("dog").unwrap();
    tree.teach(dog, "is big", "poodle").unwrap();
    let kea = tree.find_leaf_by_label("kea").unwrap();
    tree.teach(kea, "is green", "kaka").unwrap();

    for style in [FormatStyle::Compact, FormatStyle::Indented] {
        let reparsed = parse_str(to_bracket_string(&tree, style)).unwrap();
        // Teaching appends nodes, so indices differ but pre-order does not
        let original: Vec<_> = tree.pre_order_iter().map(|i| tree.label(i)).collect();
        let parsed: Vec<_> = reparsed
            .pre_order_iter()
            .map(|i| reparsed.label(i))
            .collect();
        assert_eq!(original, parsed);
        assert_eq!(
            to_bracket_string(&reparsed, FormatStyle::Compact),
            to_bracket_string(&tree, FormatStyle::Compact)
        );
    }
}

// --- FILES ---
#[test]
fn test_read_absent_file_gives_default_tree() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.tree");

    let tree = read_file(&path).unwrap();
    assert_eq!(tree.num_nodes(), 1);
    assert_eq!(tree.label(ROOT_INDEX), DEFAULT_ROOT_LABEL);
    assert!(!path.exists());
}

#[test]
fn test_write_then_read_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("animals.tree");
    let tree = parse_str(ANIMALS).unwrap();

    write_file(&tree, &path, FormatStyle::Compact).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), format!("{ANIMALS}\n"));
    assert_same_tree(&tree, &read_file(&path).unwrap());

    // Overwrite with a different style, no scratch file left behind
    write_file(&tree, &path, FormatStyle::Indented).unwrap();
    assert_same_tree(&tree, &read_file(&path).unwrap());
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_read_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.tree");
    fs::write(&path, r#"{"has wings"{"bird"}"#).unwrap();

    let err = read_file(&path).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEOF);
}

#[test]
fn test_write_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir.tree");
    let tree = parse_str(ANIMALS).unwrap();

    assert!(write_file(&tree, &path, FormatStyle::Compact).is_err());
    // Tree is still usable
    assert_eq!(tree.num_nodes(), 7);
}
