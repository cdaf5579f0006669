//! Tests for the node structure contract and the factory.

use pretty_assertions::assert_eq;

use super::{BinaryOp, Node, NodeKind, StructureError, build::*, factory};
use crate::{Vec, token::Token};

fn id(name: &str) -> Node {
    factory::leaf(NodeKind::Identifier, Token::identifier(1, name)).unwrap()
}

fn kinds(node: &Node) -> Vec<NodeKind> {
    node.children().unwrap().map(|c| c.kind()).collect()
}

#[test]
fn test_leaf_has_no_children() {
    let leaf = int(42);
    assert_eq!(leaf.num_children(), 0);
    assert!(leaf.child(0).is_none());
    assert!(leaf.is_leaf());
    assert_eq!(
        leaf.children().err(),
        Some(StructureError::NoChildren {
            kind: NodeKind::Int
        })
    );
}

#[test]
fn test_leaf_info_describes_literal() {
    assert_eq!(int(42).info(), "42");
    assert_eq!(float(2.5).info(), "2.5");
    assert_eq!(string("hi").info(), "hi");
    assert_eq!(ident("x").info(), "x");
}

#[test]
fn test_binary_children_include_operator() {
    let node = binary(ident("a"), BinaryOp::Mul, int(2));
    assert_eq!(node.num_children(), 3);
    assert_eq!(
        kinds(&node),
        [NodeKind::Identifier, NodeKind::Identifier, NodeKind::Int]
    );
    assert_eq!(node.child(1).map(|c| c.info()), Some("*".into()));
    assert!(node.child(3).is_none());
    assert_eq!(node.info(), "(a * 2)");
}

#[test]
fn test_children_iterator_restarts() {
    let node = block(vec![int(1), int(2), int(3)]);
    let mut children = node.children().unwrap();
    assert_eq!(children.len(), 3);
    assert_eq!(children.by_ref().count(), 3);
    assert!(children.next().is_none());

    children.restart();
    assert_eq!(children.next().map(|c| c.info()), Some("1".into()));
    assert_eq!(children.len(), 2);
}

#[test]
fn test_empty_list_iterates_nothing() {
    let node = block(vec![]);
    assert_eq!(node.children().unwrap().count(), 0);
    assert_eq!(node.info(), "()");
}

#[test]
fn test_if_children_depend_on_else() {
    let without = if_then(int(1), block(vec![int(2)]));
    let with = if_else(int(1), block(vec![int(2)]), block(vec![int(3)]));
    assert_eq!(without.num_children(), 2);
    assert_eq!(with.num_children(), 3);
    assert_eq!(with.info(), "(if 1 (2) else (3))");
}

#[test]
fn test_definition_info() {
    let node = def("inc", &["x"], vec![binary(ident("x"), BinaryOp::Add, int(1))]);
    assert_eq!(node.info(), "(def inc (x) ((x + 1)))");
    assert_eq!(
        kinds(&node),
        [NodeKind::Identifier, NodeKind::Params, NodeKind::Block]
    );

    let class = class("B", Some("A"), vec![assign(ident("f"), int(0))]);
    assert_eq!(class.info(), "(class B extends A ((f = 0)))");
    assert_eq!(
        kinds(&class),
        [NodeKind::Identifier, NodeKind::Identifier, NodeKind::ClassBody]
    );
}

#[test]
fn test_primary_chain_flattens() {
    let node = call(member(ident("o"), "m"), vec![int(1)]);
    assert_eq!(node.kind(), NodeKind::Primary);
    assert_eq!(
        kinds(&node),
        [NodeKind::Identifier, NodeKind::Dot, NodeKind::Arguments]
    );
    assert_eq!(node.info(), "(o .m (1))");
    assert_eq!(index(ident("a"), int(0)).info(), "(a [0])");
}

#[test]
fn test_primary_without_postfix_is_operand() {
    assert_eq!(primary(ident("x"), vec![]).kind(), NodeKind::Identifier);
}

#[test]
fn test_postfix_kinds_are_not_evaluable() {
    for kind in [NodeKind::Arguments, NodeKind::Dot, NodeKind::Index] {
        assert!(kind.is_postfix());
        assert!(!kind.is_evaluable());
    }
    assert!(!NodeKind::Params.is_evaluable());
    assert!(!NodeKind::ClassBody.is_evaluable());
    assert!(NodeKind::Lambda.is_evaluable());
}

#[test]
fn test_factory_leaf_checks_token() {
    let err = factory::leaf(NodeKind::Int, Token::identifier(3, "x")).unwrap_err();
    assert_eq!(
        err,
        StructureError::WrongToken {
            kind: NodeKind::Int,
            token: "'x' at line 3".into(),
        }
    );
    assert_eq!(
        factory::leaf(NodeKind::Block, Token::int(1, 1)).unwrap_err(),
        StructureError::NotALeaf {
            kind: NodeKind::Block
        }
    );
    let node = factory::leaf(NodeKind::Float, Token::float(1, 0.5)).unwrap();
    assert_eq!(node.kind(), NodeKind::Float);
}

#[test]
fn test_factory_prunes_single_child_primary() {
    let node = factory::list(NodeKind::Primary, vec![id("x")]).unwrap();
    assert_eq!(node.kind(), NodeKind::Identifier);

    let args = factory::list(NodeKind::Arguments, vec![int(1)]).unwrap();
    let node = factory::list(NodeKind::Primary, vec![id("f"), args]).unwrap();
    assert_eq!(node.kind(), NodeKind::Primary);
    assert_eq!(node.num_children(), 2);
}

#[test]
fn test_factory_prunes_empty_primary_to_null() {
    let node = factory::list(NodeKind::Primary, vec![]).unwrap();
    assert_eq!(node.kind(), NodeKind::Null);
}

#[test]
fn test_factory_keeps_single_child_block() {
    let node = factory::list(NodeKind::Block, vec![int(1)]).unwrap();
    assert_eq!(node.kind(), NodeKind::Block);
}

#[test]
fn test_factory_binary_operator() {
    let node = factory::list(NodeKind::Binary, vec![id("a"), id("<="), int(3)]).unwrap();
    match &node {
        Node::Binary(b) => assert_eq!(b.operator().symbol(), "<="),
        other => panic!("expected binary, got {:?}", other),
    }

    let err = factory::list(NodeKind::Binary, vec![id("a"), id("**"), int(3)]).unwrap_err();
    assert_eq!(err, StructureError::UnknownOperator("**".into()));
}

#[test]
fn test_factory_arity_and_child_kinds() {
    assert_eq!(
        factory::list(NodeKind::While, vec![int(1)]).unwrap_err(),
        StructureError::Arity {
            kind: NodeKind::While,
            expected: "exactly two",
            got: 1,
        }
    );

    let params = factory::list(NodeKind::Params, vec![id("a")]).unwrap();
    let err = factory::list(NodeKind::Def, vec![int(1), params, block(vec![])]).unwrap_err();
    assert_eq!(
        err,
        StructureError::ChildKind {
            kind: NodeKind::Def,
            index: 0,
            expected: "an identifier",
            got: NodeKind::Int,
        }
    );

    assert_eq!(
        factory::list(NodeKind::Params, vec![int(1)]).unwrap_err(),
        StructureError::ChildKind {
            kind: NodeKind::Params,
            index: 0,
            expected: "an identifier",
            got: NodeKind::Int,
        }
    );

    assert_eq!(
        factory::list(NodeKind::Int, vec![]).unwrap_err(),
        StructureError::NotAList { kind: NodeKind::Int }
    );
}

#[test]
fn test_factory_class_with_superclass() {
    let body = factory::list(NodeKind::ClassBody, vec![]).unwrap();
    let node = factory::list(NodeKind::Class, vec![id("B"), id("A"), body.clone()]).unwrap();
    assert_eq!(node.info(), "(class B extends A ())");

    let node = factory::list(NodeKind::Class, vec![id("A"), body]).unwrap();
    assert_eq!(node.info(), "(class A ())");

    let err = factory::list(NodeKind::Class, vec![id("A"), block(vec![])]).unwrap_err();
    assert_eq!(
        err,
        StructureError::ChildKind {
            kind: NodeKind::Class,
            index: 1,
            expected: "a class body",
            got: NodeKind::Block,
        }
    );
}

#[test]
fn test_factory_primary_rejects_non_postfix() {
    let err = factory::list(NodeKind::Primary, vec![id("f"), int(1)]).unwrap_err();
    assert_eq!(
        err,
        StructureError::ChildKind {
            kind: NodeKind::Primary,
            index: 1,
            expected: "a postfix operation",
            got: NodeKind::Int,
        }
    );
}
