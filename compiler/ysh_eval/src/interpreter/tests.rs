//! Tests for the tree-walking evaluator.

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use ysh_ir::{
    ArgList, AttrOp, BinaryOp, CommandSubKind, CompareOp, CompoundWord, Comprehension, Expr,
    ExprKind, NamedArg, PerlClass, PlaceExpr, PrimitiveId, Regex, RepeatOp, ShArrayLiteral, Span,
    TokenId, UnaryOp, WordPart,
};
use ysh_value::{DictKey, EvalErrorKind, FunctionValue, Place, Value};

use super::{EvalLimits, EvaluatorBuilder};
use crate::test_helpers::{
    attribute, binary, boolean, call, command_sub, compare, constant, dict, double_quoted, float,
    if_exp, implicit, int, list, null, range, regex_literal, simple_var_sub, slice, spread,
    string, subscript, tok, tuple, unary, var, Harness, OP_SPAN,
};

fn ints(ns: &[i64]) -> Value {
    Value::list(ns.iter().copied().map(Value::int).collect())
}

/// `f(...)` returns its positional arguments as a list.
fn echo_args() -> Value {
    Value::func(FunctionValue::new("echo_args", |args, _| Ok(Value::list(args))))
}

/// `f(...)` returns its named arguments as a dict.
fn echo_kwargs() -> Value {
    Value::func(FunctionValue::new("echo_kwargs", |_, kwargs| {
        Ok(Value::dict(
            kwargs
                .into_iter()
                .map(|(k, v)| (DictKey::Str(k), v))
                .collect(),
        ))
    }))
}

// Constants and variables

#[test]
fn test_constants() {
    let mut h = Harness::new();
    assert_eq!(h.eval(&int(42)).unwrap(), Value::int(42));
    assert_eq!(h.eval(&float("1.5")).unwrap(), Value::float(1.5));
    assert_eq!(h.eval(&boolean(true)).unwrap(), Value::bool(true));
    assert_eq!(h.eval(&null()).unwrap(), Value::NULL);
    assert_eq!(h.eval(&string("hi")).unwrap(), Value::string("hi"));
}

#[test]
fn test_variable_lookup() {
    let mut h = Harness::new();
    h.define("x", Value::int(7));
    assert_eq!(h.eval(&var("x")).unwrap(), Value::int(7));
}

#[test]
fn test_undefined_variable() {
    let mut h = Harness::new();
    let err = h.eval(&var("nope")).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "nope".into()
        }
    );
    assert_eq!(err.message, "Undefined variable 'nope'");
}

// Operators

#[test]
fn test_binary_and_unary() {
    let mut h = Harness::new();
    let e = binary(
        BinaryOp::Add,
        int(1),
        binary(BinaryOp::Mul, int(2), int(3)),
    );
    assert_eq!(h.eval(&e).unwrap(), Value::int(7));
    assert_eq!(
        h.eval(&unary(UnaryOp::Neg, int(4))).unwrap(),
        Value::int(-4)
    );
}

#[test]
fn test_divide_by_zero_points_at_operator() {
    let mut h = Harness::new();
    let err = h.eval(&binary(BinaryOp::Div, int(1), int(0))).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::DivideByZero { op: BinaryOp::Div });
    assert_eq!(err.span, Some(OP_SPAN));
    assert_eq!(err.status(), 1);
}

#[test]
fn test_type_mismatch_is_classified() {
    let mut h = Harness::new();
    let err = h.eval(&binary(BinaryOp::Add, string("a"), int(1))).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::ExprType { .. }));
    assert_eq!(
        err.message,
        "Type error in expression: unsupported operand type(s) for +: 'Str' and 'Int'"
    );
    assert_eq!(err.span, Some(OP_SPAN));
}

#[test]
fn test_lookup_failure_is_classified() {
    let mut h = Harness::new();
    let err = h.eval(&attribute(int(1), AttrOp::Dot, "x")).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::ExprEval { .. }));
    assert_eq!(
        err.message,
        "Expression eval error: 'Int' object has no attribute 'x'"
    );
}

#[test]
fn test_and_or_short_circuit() {
    let mut h = Harness::new();
    let boom = || binary(BinaryOp::Div, int(1), int(0));

    let e = binary(BinaryOp::And, int(0), boom());
    assert_eq!(h.eval(&e).unwrap(), Value::int(0));

    let e = binary(BinaryOp::Or, string("x"), boom());
    assert_eq!(h.eval(&e).unwrap(), Value::string("x"));

    let e = binary(BinaryOp::And, int(1), int(2));
    assert_eq!(h.eval(&e).unwrap(), Value::int(2));

    let e = binary(BinaryOp::Or, list(vec![]), null());
    assert_eq!(h.eval(&e).unwrap(), Value::NULL);
}

#[test]
fn test_if_expression() {
    let mut h = Harness::new();
    let boom = binary(BinaryOp::Div, int(1), int(0));
    let e = if_exp(boolean(true), int(1), boom);
    assert_eq!(h.eval(&e).unwrap(), Value::int(1));
    let e = if_exp(string(""), int(1), int(2));
    assert_eq!(h.eval(&e).unwrap(), Value::int(2));
}

// Comparison chains

#[test]
fn test_compare_chain_stops_at_first_false() {
    let mut h = Harness::new();
    let boom = binary(BinaryOp::Div, int(1), int(0));
    let e = compare(
        int(1),
        vec![
            (CompareOp::Lt, int(2)),
            (CompareOp::Lt, int(0)),
            (CompareOp::Lt, boom),
        ],
    );
    assert_eq!(h.eval(&e).unwrap(), Value::bool(false));

    let e = compare(int(1), vec![(CompareOp::Lt, int(2)), (CompareOp::Lt, int(3))]);
    assert_eq!(h.eval(&e).unwrap(), Value::bool(true));
}

#[test]
fn test_compare_error_carries_operator_span() {
    let mut h = Harness::new();
    let err = h
        .eval(&compare(string("a"), vec![(CompareOp::Lt, int(1))]))
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::ExprType { .. }));
    assert_eq!(err.span, Some(OP_SPAN));
}

#[test]
fn test_membership_and_identity() {
    let mut h = Harness::new();
    let e = compare(int(2), vec![(CompareOp::In, list(vec![int(1), int(2)]))]);
    assert_eq!(h.eval(&e).unwrap(), Value::bool(true));

    h.define("xs", ints(&[1]));
    let e = compare(var("xs"), vec![(CompareOp::Is, var("xs"))]);
    assert_eq!(h.eval(&e).unwrap(), Value::bool(true));
    let e = compare(var("xs"), vec![(CompareOp::Is, list(vec![int(1)]))]);
    assert_eq!(h.eval(&e).unwrap(), Value::bool(false));
}

#[test]
fn test_approx_eq() {
    let mut h = Harness::new();
    let cases = [
        (string("TRUE"), boolean(true), true),
        (string("3"), int(3), true),
        (string("  3  "), int(3), true),
        (string("yes"), boolean(true), false),
    ];
    for (left, right, expected) in cases {
        let e = compare(left, vec![(CompareOp::ApproxEq, right)]);
        assert_eq!(h.eval(&e).unwrap(), Value::bool(expected));
    }
}

#[test]
fn test_approx_eq_bad_operands() {
    let mut h = Harness::new();
    let e = compare(int(3), vec![(CompareOp::ApproxEq, int(3))]);
    let err = h.eval(&e).unwrap_err();
    assert_eq!(err.message, "~== expects a string on the left");
    assert_eq!(err.span, Some(OP_SPAN));
}

#[test]
fn test_glob_match() {
    let mut h = Harness::new();
    let e = compare(string("foo.py"), vec![(CompareOp::GlobMatch, string("*.py"))]);
    assert_eq!(h.eval(&e).unwrap(), Value::bool(true));
    let e = compare(
        string("foo.py"),
        vec![(CompareOp::NotGlobMatch, string("*.py"))],
    );
    assert_eq!(h.eval(&e).unwrap(), Value::bool(false));

    let err = h
        .eval(&compare(int(1), vec![(CompareOp::GlobMatch, string("*"))]))
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::ExprType { .. }));
}

#[test]
fn test_glob_match_on_long_text() {
    let mut h = Harness::new();
    h.define("t", Value::string("a".repeat(150_000) + "b"));
    let e = compare(var("t"), vec![(CompareOp::GlobMatch, string("*b"))]);
    assert_eq!(h.eval(&e).unwrap(), Value::bool(true));
}

// Regex matching and the match side channel

#[test]
fn test_regex_match_sets_and_clears_groups() {
    let mut h = Harness::new();
    let e = compare(
        string("ab12"),
        vec![(CompareOp::RegexMatch, string("([0-9]+)"))],
    );
    assert_eq!(h.eval(&e).unwrap(), Value::bool(true));
    assert_eq!(h.mem.match_groups(), ["12", "12"]);

    let e = compare(string("xy"), vec![(CompareOp::RegexMatch, string("[0-9]"))]);
    assert_eq!(h.eval(&e).unwrap(), Value::bool(false));
    assert!(h.mem.match_groups().is_empty());
}

#[test]
fn test_negated_regex_match_leaves_groups_alone() {
    let mut h = Harness::new();
    let e = compare(string("a1"), vec![(CompareOp::RegexMatch, string("[0-9]"))]);
    assert_eq!(h.eval(&e).unwrap(), Value::bool(true));
    assert_eq!(h.mem.match_groups(), ["1"]);

    let e = compare(
        string("xy"),
        vec![(CompareOp::NotRegexMatch, string("[0-9]"))],
    );
    assert_eq!(h.eval(&e).unwrap(), Value::bool(true));
    assert_eq!(h.mem.match_groups(), ["1"]);

    let e = compare(
        string("x1"),
        vec![(CompareOp::NotRegexMatch, string("[0-9]"))],
    );
    assert_eq!(h.eval(&e).unwrap(), Value::bool(false));
    assert_eq!(h.mem.match_groups(), ["1"]);
}

#[test]
fn test_regex_match_against_eggex() {
    let mut h = Harness::new();
    let digits = Regex::Capture {
        child: Box::new(Regex::Repeat {
            child: Box::new(Regex::PerlClass(PerlClass {
                negated: false,
                name: "d".into(),
            })),
            op: RepeatOp::Plus,
        }),
        name: None,
    };
    let e = compare(
        string("abc 42"),
        vec![(CompareOp::RegexMatch, regex_literal(digits))],
    );
    assert_eq!(h.eval(&e).unwrap(), Value::bool(true));
    assert_eq!(h.mem.match_groups(), ["42", "42"]);
}

#[test]
fn test_regex_right_operand_must_be_pattern() {
    let mut h = Harness::new();
    let err = h
        .eval(&compare(string("a"), vec![(CompareOp::RegexMatch, int(1))]))
        .unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::InvalidRegex {
            pattern: "1".into()
        }
    );
    assert_eq!(err.message, "Invalid regex 1");
    assert_eq!(err.status(), 2);
    assert_eq!(err.span, Some(OP_SPAN));
}

#[test]
fn test_regex_engine_rejection_is_fatal() {
    let mut h = Harness::new();
    let err = h
        .eval(&compare(string("a"), vec![(CompareOp::RegexMatch, string("("))]))
        .unwrap_err();
    assert_eq!(err.message, "Invalid regex '('");
    assert_eq!(err.status(), 2);
}

// Collections

#[test]
fn test_list_tuple_and_dict() {
    let mut h = Harness::new();
    assert_eq!(
        h.eval(&list(vec![int(1), int(2)])).unwrap(),
        ints(&[1, 2])
    );
    assert_eq!(
        h.eval(&tuple(vec![int(1)])).unwrap(),
        Value::tuple(vec![Value::int(1)])
    );

    let mut expected = IndexMap::new();
    expected.insert(DictKey::from("a"), Value::int(1));
    expected.insert(DictKey::Int(2), Value::string("b"));
    let e = dict(vec![(string("a"), int(1)), (int(2), string("b"))]);
    assert_eq!(h.eval(&e).unwrap(), Value::dict(expected));
}

#[test]
fn test_dict_implicit_value() {
    let mut h = Harness::new();
    h.define("name", Value::string("bob"));
    let e = dict(vec![(constant(TokenId::Name, "name"), implicit())]);

    let mut expected = IndexMap::new();
    expected.insert(DictKey::from("name"), Value::string("bob"));
    assert_eq!(h.eval(&e).unwrap(), Value::dict(expected));
}

#[test]
fn test_dict_keys_evaluate_before_values() {
    let mut h = Harness::new();
    let boom = || binary(BinaryOp::Div, int(1), int(0));
    // The bad key fails before the bad value is reached
    let e = dict(vec![(string("a"), boom()), (var("nope"), int(1))]);
    let err = h.eval(&e).unwrap_err();
    assert_eq!(err.message, "Undefined variable 'nope'");

    let e = dict(vec![(list(vec![]), int(1))]);
    let err = h.eval(&e).unwrap_err();
    assert_eq!(err.message, "Type error in expression: unhashable type: 'List'");
}

#[test]
fn test_implicit_outside_dict() {
    let mut h = Harness::new();
    let err = h.eval(&implicit()).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::Unsupported { .. }));
}

#[test]
fn test_range_and_slice() {
    let mut h = Harness::new();
    assert_eq!(h.eval(&range(int(1), int(3))).unwrap(), Value::range(1, 3));
    assert!(h.eval(&range(string("a"), int(3))).is_err());

    h.define("xs", ints(&[1, 2, 3, 4]));
    let e = subscript(var("xs"), vec![slice(Some(int(1)), None)]);
    assert_eq!(h.eval(&e).unwrap(), ints(&[2, 3, 4]));
    let e = subscript(var("xs"), vec![slice(None, Some(null()))]);
    assert_eq!(h.eval(&e).unwrap(), ints(&[1, 2, 3, 4]));

    let err = h
        .eval(&subscript(var("xs"), vec![slice(Some(string("a")), None)]))
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::ExprType { .. }));
}

#[test]
fn test_multiple_indices_form_tuple_key() {
    let mut h = Harness::new();
    let mut entries = IndexMap::new();
    entries.insert(
        DictKey::Tuple(vec![DictKey::Int(1), DictKey::Int(2)]),
        Value::string("pair"),
    );
    h.define("d", Value::dict(entries));
    let e = subscript(var("d"), vec![int(1), int(2)]);
    assert_eq!(h.eval(&e).unwrap(), Value::string("pair"));
}

#[test]
fn test_arrow_reads_string_key() {
    let mut h = Harness::new();
    let mut entries = IndexMap::new();
    entries.insert(DictKey::from("key"), Value::int(1));
    h.define("d", Value::dict(entries));

    assert_eq!(
        h.eval(&attribute(var("d"), AttrOp::RArrow, "key")).unwrap(),
        Value::int(1)
    );
    let err = h
        .eval(&attribute(var("d"), AttrOp::RArrow, "missing"))
        .unwrap_err();
    assert_eq!(err.message, "dict entry not found");
    assert_eq!(err.span, Some(OP_SPAN));
}

#[test]
fn test_static_access_is_unsupported() {
    let mut h = Harness::new();
    h.define("x", Value::int(1));
    let err = h
        .eval(&attribute(var("x"), AttrOp::DColon, "y"))
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::Unsupported { .. }));
}

// Calls

#[test]
fn test_call_with_spread_keeps_order() {
    let mut h = Harness::new();
    h.define("f", echo_args());
    let e = call(
        var("f"),
        vec![int(1), spread(list(vec![int(2), int(3)])), int(4)],
        vec![],
    );
    assert_eq!(h.eval(&e).unwrap(), ints(&[1, 2, 3, 4]));
}

#[test]
fn test_spread_of_range() {
    let mut h = Harness::new();
    h.define("f", echo_args());
    let e = call(var("f"), vec![spread(range(int(0), int(3)))], vec![]);
    assert_eq!(h.eval(&e).unwrap(), ints(&[0, 1, 2]));
}

#[test]
fn test_spread_of_scalar_fails() {
    let mut h = Harness::new();
    h.define("f", echo_args());
    let err = h
        .eval(&call(var("f"), vec![spread(int(1))], vec![]))
        .unwrap_err();
    assert_eq!(
        err.message,
        "Type error in expression: 'Int' object is not iterable"
    );
}

#[test]
fn test_double_spread_later_keys_win() {
    let mut h = Harness::new();
    h.define("f", echo_kwargs());
    let e = call(
        var("f"),
        vec![],
        vec![
            (Some("a"), int(1)),
            (None, dict(vec![(string("a"), int(2)), (string("b"), int(3))])),
        ],
    );
    let mut expected = IndexMap::new();
    expected.insert(DictKey::from("a"), Value::int(2));
    expected.insert(DictKey::from("b"), Value::int(3));
    assert_eq!(h.eval(&e).unwrap(), Value::dict(expected));
}

#[test]
fn test_eval_arg_list() {
    let mut h = Harness::new();
    h.define("xs", ints(&[2, 3]));
    let args = ArgList {
        positional: vec![int(1), spread(var("xs"))],
        named: vec![NamedArg {
            name: Some(tok(TokenId::Name, "sep")),
            value: string(","),
        }],
    };
    let (positional, named) = h.with(|ev| ev.eval_arg_list(&args)).unwrap();
    assert_eq!(positional, vec![Value::int(1), Value::int(2), Value::int(3)]);
    assert_eq!(named.get("sep"), Some(&Value::string(",")));
}

#[test]
fn test_call_non_callable() {
    let mut h = Harness::new();
    let err = h.eval(&call(int(1), vec![], vec![])).unwrap_err();
    assert_eq!(
        err.message,
        "Type error in expression: 'Int' object is not callable"
    );
}

// Reserved and unsupported syntax

#[test]
fn test_reserved_syntax_is_fatal() {
    let mut h = Harness::new();
    let comp = Comprehension {
        lhs: vec![tok(TokenId::Name, "x")],
        iter: var("xs"),
        cond: None,
    };
    let span = Span::new(3, 9);
    let e = Expr::new(
        ExprKind::ListComp {
            elt: Box::new(var("x")),
            generators: vec![comp],
        },
        span,
    );
    let err = h.eval(&e).unwrap_err();
    assert_eq!(err.message, "List comprehension reserved but not implemented");
    assert_eq!(err.status(), 2);
    assert_eq!(err.span, Some(span));

    let e = Expr::synthetic(ExprKind::Lambda {
        params: vec![],
        body: Box::new(int(1)),
    });
    assert!(matches!(
        h.eval(&e).unwrap_err().kind,
        EvalErrorKind::Reserved { .. }
    ));
}

#[test]
fn test_spread_outside_call() {
    let mut h = Harness::new();
    let err = h.eval(&spread(list(vec![]))).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::Unsupported { .. }));
}

// Words and processes

#[test]
fn test_word_forms_delegate() {
    let mut h = Harness::new();
    h.words.vars.insert("who".into(), "world".into());

    let dq = double_quoted(vec![
        WordPart::Literal(tok(TokenId::Lit, "hello ")),
        WordPart::SimpleVarSub(simple_var_sub("who")),
    ]);
    let e = Expr::synthetic(ExprKind::DoubleQuoted(dq));
    assert_eq!(h.eval(&e).unwrap(), Value::string("hello world"));

    let e = Expr::synthetic(ExprKind::SimpleVarSub(simple_var_sub("who")));
    assert_eq!(h.eval(&e).unwrap(), Value::string("world"));

    let words = vec![
        CompoundWord {
            parts: vec![WordPart::Literal(tok(TokenId::Lit, "a"))],
        },
        CompoundWord {
            parts: vec![WordPart::SimpleVarSub(simple_var_sub("who"))],
        },
    ];
    let e = Expr::synthetic(ExprKind::ShArrayLiteral(ShArrayLiteral {
        words,
        span: Span::DUMMY,
    }));
    assert_eq!(h.eval(&e).unwrap(), Value::strings(["a", "world"]));
}

#[test]
fn test_command_subs() {
    let mut h = Harness::new();
    h.shell.outputs.insert("hostname".into(), "box".into());
    h.shell.outputs.insert("ls".into(), "a b\nc\n".into());

    assert_eq!(
        h.eval(&command_sub(CommandSubKind::Dollar, "hostname")).unwrap(),
        Value::string("box")
    );
    assert_eq!(
        h.eval(&command_sub(CommandSubKind::At, "ls")).unwrap(),
        Value::strings(["a", "b", "c"])
    );
    assert_eq!(
        h.eval(&command_sub(CommandSubKind::Caret, "echo")).unwrap(),
        Value::NULL
    );
    // The block literal never runs
    assert_eq!(h.shell.ran, vec!["hostname".to_string(), "ls".to_string()]);
}

#[test]
fn test_command_sub_runs_with_errexit_scoped() {
    let mut h = Harness::new();
    assert!(!h.options.is_set(crate::ExprOptions::COMMAND_SUB_ERREXIT));

    h.eval(&command_sub(CommandSubKind::Dollar, "true")).unwrap();
    assert_eq!(h.shell.errexit_seen, vec![true]);
    assert_eq!(h.options.depth(), 0);
    assert!(!h.options.is_set(crate::ExprOptions::COMMAND_SUB_ERREXIT));
}

#[test]
fn test_options_popped_after_error() {
    let mut h = Harness::new();
    let e = list(vec![
        command_sub(CommandSubKind::Dollar, "true"),
        binary(BinaryOp::Div, int(1), int(0)),
    ]);
    assert!(h.eval(&e).is_err());
    assert_eq!(h.shell.errexit_seen, vec![true]);
    assert_eq!(h.options.depth(), 0);
}

// Eggex literals

#[test]
fn test_regex_literal_compiles() {
    let mut h = Harness::new();
    let e = Expr::synthetic(ExprKind::RegexLiteral {
        regex: Box::new(Regex::Token(tok(TokenId::Name, "dot"))),
        flags: vec![tok(TokenId::Name, "i")],
    });
    let value = h.eval(&e).unwrap();
    let eggex = value.as_regex().unwrap();
    assert_eq!(
        eggex.regex,
        Regex::Primitive {
            id: PrimitiveId::Dot,
            span: Span::DUMMY
        }
    );
    assert_eq!(eggex.flags, vec!["i".to_string()]);
}

// Places

#[test]
fn test_eval_place_expr() {
    let mut h = Harness::new();
    h.define("xs", ints(&[1, 2]));

    let place = h
        .with(|ev| ev.eval_place_expr(&PlaceExpr::Var(tok(TokenId::Name, "x"))))
        .unwrap();
    assert_eq!(place, Place::named("x"));

    let target = PlaceExpr::Subscript {
        obj: Box::new(var("xs")),
        indices: vec![int(0), int(1)],
    };
    let place = h.with(|ev| ev.eval_place_expr(&target)).unwrap();
    assert_eq!(
        place,
        Place::ObjIndex {
            obj: ints(&[1, 2]),
            index: Value::tuple(vec![Value::int(0), Value::int(1)]),
        }
    );

    let target = PlaceExpr::Attribute {
        obj: Box::new(var("xs")),
        op: AttrOp::RArrow,
        op_span: OP_SPAN,
        attr: tok(TokenId::Name, "key"),
    };
    let place = h.with(|ev| ev.eval_place_expr(&target)).unwrap();
    assert_eq!(
        place,
        Place::ObjIndex {
            obj: ints(&[1, 2]),
            index: Value::string("key"),
        }
    );

    let target = PlaceExpr::Attribute {
        obj: Box::new(var("xs")),
        op: AttrOp::Dot,
        op_span: OP_SPAN,
        attr: tok(TokenId::Name, "field"),
    };
    let place = h.with(|ev| ev.eval_place_expr(&target)).unwrap();
    assert_eq!(
        place,
        Place::ObjAttr {
            obj: ints(&[1, 2]),
            attr: "field".into(),
        }
    );
}

#[test]
fn test_unsupported_places() {
    let mut h = Harness::new();
    let target = PlaceExpr::Tuple(vec![PlaceExpr::Var(tok(TokenId::Name, "a"))]);
    let err = h.with(|ev| ev.eval_place_expr(&target)).unwrap_err();
    assert_eq!(err.message, "Tuple unpacking not implemented");

    let err = h
        .with(|ev| ev.eval_lhs(&binary(BinaryOp::Add, int(1), int(2))))
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::Unsupported { .. }));
}

#[test]
fn test_eval_lhs() {
    let mut h = Harness::new();
    let place = h.with(|ev| ev.eval_lhs(&var("x"))).unwrap();
    assert_eq!(place.name(), Some("x"));
}

#[test]
fn test_plus_equals() {
    let mut h = Harness::new();
    h.define("n", Value::int(1));
    h.define("s", Value::string("a"));
    let n = tok(TokenId::Name, "n");
    let s = tok(TokenId::Name, "s");

    assert_eq!(
        h.with(|ev| ev.eval_plus_equals(&n, Value::int(2))).unwrap(),
        Value::int(3)
    );
    assert_eq!(
        h.with(|ev| ev.eval_plus_equals(&n, Value::float(0.5)))
            .unwrap(),
        Value::float(1.5)
    );

    let err = h
        .with(|ev| ev.eval_plus_equals(&s, Value::string("b")))
        .unwrap_err();
    assert_eq!(err.message, "Object of type 'Str' doesn't support +=");

    let err = h
        .with(|ev| ev.eval_plus_equals(&n, Value::string("b")))
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::ExprType { .. }));
}

// Limits

#[test]
fn test_recursion_limit() {
    let mut h = Harness::new();
    let mut e = int(1);
    for _ in 0..5 {
        e = unary(UnaryOp::Neg, e);
    }
    let limits = EvalLimits { max_depth: Some(3) };
    let mut ev = EvaluatorBuilder::new(&mut h.mem, &mut h.words, &mut h.shell)
        .limits(limits)
        .build();
    let err = ev.eval_expr(&e).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimit { limit: 3 });
    assert_eq!(ev.limits(), limits);

    // Within the limit
    assert_eq!(ev.eval_expr(&unary(UnaryOp::Neg, int(1))).unwrap(), Value::int(-1));
}

#[test]
fn test_deep_nesting_without_limit() {
    let mut h = Harness::new();
    let mut e = int(0);
    for _ in 0..2_000 {
        e = binary(BinaryOp::Add, e, int(1));
    }
    assert_eq!(h.eval(&e).unwrap(), Value::int(2_000));
}
