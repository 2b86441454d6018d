use akitree::format::parse_str;
use akitree::model::{DEFAULT_ROOT_LABEL, DecisionTree, LookupError, PathStep, ROOT_INDEX, TeachError};

const BIRD_TREE: &str = r#"{"bird"{"wings"}{"dog"}}"#;

/// `{"has wings"{"can fly"{"kea"}{"kakapo"}}{"barks"{"dog"}{"cat"}}}`
fn animals() -> DecisionTree {
    parse_str(r#"{"has wings"{"can fly"{"kea"}{"kakapo"}}{"barks"{"dog"}{"cat"}}}"#).unwrap()
}

fn leaf(tree: &DecisionTree, label: &str) -> usize {
    tree.find_leaf_by_label(label)
        .unwrap_or_else(|| panic!("no leaf {label}"))
}

// ============= Tree store =============

#[test]
fn test_default_tree() {
    let tree = DecisionTree::new_default();
    assert_eq!(tree.num_nodes(), 1);
    assert_eq!(tree.label(ROOT_INDEX), DEFAULT_ROOT_LABEL);
    assert!(tree.is_leaf(ROOT_INDEX));
    assert!(tree.root().is_root());
    assert!(tree.is_valid());
}

#[test]
fn test_scenario_b_counts_and_depths() {
    let tree = parse_str(BIRD_TREE).unwrap();
    let wings = leaf(&tree, "wings");
    let dog = leaf(&tree, "dog");

    assert_eq!(tree.num_nodes(), 3);
    assert_eq!(tree.num_leaves(), 2);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.label(ROOT_INDEX), "bird");
    assert!(tree.root().is_internal());
    assert_eq!(tree.depth(ROOT_INDEX), 0);
    assert_eq!(tree.depth(wings), 1);
    assert_eq!(tree.depth(dog), 1);
    assert_eq!(tree.lowest_common_ancestor(wings, dog), ROOT_INDEX);
    assert_eq!(tree.root().children(), Some((wings, dog)));
}

#[test]
fn test_node_views() {
    let tree = parse_str(BIRD_TREE).unwrap();
    let views: Vec<_> = tree.nodes().collect();
    assert_eq!(views.len(), 3);
    assert_eq!(views[0].label, "bird");
    assert_eq!((views[0].left, views[0].right), (Some(1), Some(2)));
    assert!(!views[0].is_leaf);
    assert!(views[2].is_leaf);
    assert_eq!(views[2].left, None);
}

#[test]
fn test_pre_order_visits_yes_branch_first() {
    let tree = animals();
    let labels: Vec<_> = tree.pre_order_iter().map(|i| tree.label(i)).collect();
    assert_eq!(
        labels,
        ["has wings", "can fly", "kea", "kakapo", "barks", "dog", "cat"]
    );
}

#[test]
#[should_panic]
fn test_node_out_of_bounds() {
    let tree = DecisionTree::new_default();
    let _ = &tree[5];
}

// ============= Queries =============

#[test]
fn test_find_leaf_by_label() {
    let tree = animals();
    assert_eq!(tree.label(leaf(&tree, "kakapo")), "kakapo");
    // Internal labels are not characters
    assert_eq!(tree.find_leaf_by_label("barks"), None);
    assert_eq!(tree.find_leaf_by_label("Dog"), None);
    assert_eq!(
        tree.lookup_leaf("moa"),
        Err(LookupError::UnknownCharacter("moa".to_string()))
    );
}

#[test]
fn test_lowest_common_ancestor() {
    let tree = animals();
    let kea = leaf(&tree, "kea");
    let kakapo = leaf(&tree, "kakapo");
    let cat = leaf(&tree, "cat");
    let can_fly = tree.node(kea).parent().unwrap();

    assert_eq!(tree.lowest_common_ancestor(kea, kakapo), can_fly);
    assert_eq!(tree.lowest_common_ancestor(kea, cat), ROOT_INDEX);
    assert_eq!(tree.lowest_common_ancestor(can_fly, kakapo), can_fly);
    assert_eq!(tree.lowest_common_ancestor(cat, cat), cat);
    assert!(tree.is_ancestor(can_fly, kea));
    assert!(!tree.is_ancestor(can_fly, cat));
}

#[test]
#[should_panic]
fn test_lowest_common_ancestor_out_of_range() {
    let tree = animals();
    tree.lowest_common_ancestor(0, 42);
}

#[test]
#[should_panic]
fn test_depth_out_of_range() {
    DecisionTree::new_default().depth(1);
}

#[test]
fn test_collect_path() {
    let tree = animals();
    let kakapo = leaf(&tree, "kakapo");
    let can_fly = tree.node(kakapo).parent().unwrap();

    let path = tree.collect_path(kakapo, ROOT_INDEX);
    assert_eq!(
        path,
        [
            PathStep { question: can_fly, answer: false },
            PathStep { question: ROOT_INDEX, answer: true },
        ]
    );
    assert!(tree.collect_path(kakapo, kakapo).is_empty());
}

#[test]
#[should_panic]
fn test_collect_path_to_non_ancestor() {
    let tree = animals();
    tree.collect_path(leaf(&tree, "kea"), leaf(&tree, "cat"));
}

#[test]
fn test_compare_properties() {
    let tree = animals();
    let comparison = tree.compare_labels("kea", "kakapo").unwrap();

    assert_eq!(tree.properties_text(&comparison.common), "has wings; ");
    assert_eq!(tree.properties_text(&comparison.first_only), "can fly; ");
    assert_eq!(tree.properties_text(&comparison.second_only), "NOT can fly; ");

    let comparison = tree.compare_labels("kakapo", "cat").unwrap();
    assert_eq!(comparison.lca, ROOT_INDEX);
    assert!(comparison.common.is_empty());
    assert_eq!(
        tree.properties_text(&comparison.first_only),
        "has wings; NOT can fly; "
    );
    assert_eq!(
        tree.properties_text(&comparison.second_only),
        "NOT has wings; NOT barks; "
    );
}

#[test]
fn test_compare_unknown_character() {
    let tree = animals();
    assert_eq!(
        tree.compare_labels("kea", "moa"),
        Err(LookupError::UnknownCharacter("moa".to_string()))
    );
}

#[test]
fn test_property_text_strips_question_mark() {
    let tree = parse_str(r#"{"Does it purr?"{"cat"}{"dog"}}"#).unwrap();
    let path = tree.collect_path(leaf(&tree, "dog"), ROOT_INDEX);
    assert_eq!(tree.properties_text(&path), "NOT Does it purr; ");
}

// ============= Teach =============

#[test]
fn test_scenario_c_teach() {
    let mut tree = parse_str(BIRD_TREE).unwrap();
    let wings = leaf(&tree, "wings");
    let dog = leaf(&tree, "dog");

    let outcome = tree.teach(dog, "has fur?", "cat").unwrap();

    assert_eq!(tree.num_nodes(), 5);
    let cat = leaf(&tree, "cat");
    assert_eq!(cat, outcome.no_leaf);
    assert_eq!(leaf(&tree, "dog"), outcome.yes_leaf);
    assert_ne!(cat, dog);

    // Question took over the slot of dog
    assert_eq!(tree.root().children(), Some((wings, outcome.question)));
    assert_eq!(tree.node(outcome.question).parent(), Some(ROOT_INDEX));
    assert_eq!(tree.node(outcome.question).children(), Some((dog, cat)));
    assert_eq!(tree.label(outcome.question), "has fur?");
    assert!(tree.is_leaf(dog));
    assert!(tree.is_leaf(cat));
    assert_eq!(tree.depth(cat), 2);
    assert!(tree.is_valid());
}

#[test]
fn test_teach_leaves_unrelated_nodes_untouched() {
    let mut tree = animals();
    let before = tree.clone();
    let kea = leaf(&tree, "kea");
    let can_fly = tree.node(kea).parent().unwrap();

    tree.teach(kea, "is green", "parrot").unwrap();

    for index in 0..before.num_nodes() {
        if index == kea || index == can_fly {
            continue;
        }
        assert_eq!(tree.node(index), before.node(index), "node {index} changed");
        assert_eq!(tree.label(index), before.label(index));
    }
    assert_eq!(tree.num_nodes(), before.num_nodes() + 2);
}

#[test]
fn test_teach_root_leaf_keeps_root_at_zero() {
    let mut tree = DecisionTree::new_default();
    let outcome = tree.teach(ROOT_INDEX, "has stripes", "zebra").unwrap();

    assert_eq!(outcome.question, ROOT_INDEX);
    assert_eq!(tree.num_nodes(), 3);
    assert_eq!(tree.label(ROOT_INDEX), "has stripes");
    assert_eq!(tree.label(outcome.yes_leaf), DEFAULT_ROOT_LABEL);
    assert_eq!(tree.label(outcome.no_leaf), "zebra");
    assert_eq!(
        tree.root().children(),
        Some((outcome.yes_leaf, outcome.no_leaf))
    );
    assert!(tree.is_valid());
}

#[test]
fn test_teach_trims_text() {
    let mut tree = DecisionTree::new_default();
    let outcome = tree.teach(ROOT_INDEX, "  is tiny \t", " ant ").unwrap();
    assert_eq!(tree.label(ROOT_INDEX), "is tiny");
    assert_eq!(tree.label(outcome.no_leaf), "ant");
}

#[test]
fn test_teach_rejects_bad_text() {
    let mut tree = parse_str(BIRD_TREE).unwrap();
    let dog = leaf(&tree, "dog");

    assert_eq!(tree.teach(dog, "   ", "cat"), Err(TeachError::EmptyQuestion));
    assert_eq!(tree.teach(dog, "has fur", ""), Err(TeachError::EmptyLabel));
    assert_eq!(
        tree.teach(dog, "says \"meow\"", "cat"),
        Err(TeachError::QuoteInText("says \"meow\"".to_string()))
    );
    assert_eq!(tree.num_nodes(), 3);
}

#[test]
#[should_panic]
fn test_teach_internal_node_panics() {
    let mut tree = parse_str(BIRD_TREE).unwrap();
    let _ = tree.teach(ROOT_INDEX, "has fur", "cat");
}

#[test]
fn test_labels_survive_many_teaches() {
    let mut tree = DecisionTree::new_default();
    for i in 0..200 {
        let target = leaf(&tree, DEFAULT_ROOT_LABEL);
        tree.teach(target, &format!("question {i}"), &format!("character {i}"))
            .unwrap();
    }

    assert_eq!(tree.num_nodes(), 401);
    assert_eq!(tree.label(ROOT_INDEX), "question 0");
    assert_eq!(tree.label(leaf(&tree, "character 0")), "character 0");
    assert_eq!(tree.depth(leaf(&tree, DEFAULT_ROOT_LABEL)), 200);
    assert!(tree.is_valid());
}
