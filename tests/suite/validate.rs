//! Validator behaviour end to end: text in, classified result out.

use qubit_core::{Validator, Whitelist, check, validate};
use qubit_expr::{Node, ParseError, parse};
use qubit_types::ErrorCode;

use crate::common::{code_of, token_of};

#[test]
fn blank_input_is_not_an_error() {
    for input in ["", "   ", "\t", "\n", " \t \n "] {
        assert_eq!(code_of(input), None, "{input:?}");
    }
}

#[test]
fn unsupported_node_kinds() {
    assert_eq!(code_of("[]"), Some(ErrorCode::UnsupportedNode));
    assert_eq!(token_of("[]").as_deref(), Some("[]"));
    for input in ["[1, 2]", "{a: 1}", "x = 1", "1 ? 2 : 3", "1:4", "1; 2", "v[1]"] {
        assert_eq!(code_of(input), Some(ErrorCode::UnsupportedNode), "{input:?}");
    }
}

#[test]
fn free_identifiers() {
    for input in ["x", "a", "sin(x)"] {
        assert_eq!(code_of(input), Some(ErrorCode::FreeVariable), "{input:?}");
    }
    assert_eq!(token_of("2 * theta").as_deref(), Some("theta"));
}

#[test]
fn unknown_functions() {
    for input in ["arccos(1)", "setUnion(1)", "arccos(1,2)"] {
        assert_eq!(code_of(input), Some(ErrorCode::UnknownFunction), "{input:?}");
    }
    assert_eq!(token_of("setUnion(1)").as_deref(), Some("setUnion"));
}

#[test]
fn wrong_arity() {
    for input in ["sin(1,2,3,4,5,6*1)", "acos(1,2)", "complex(1,5,6)", "sin()"] {
        assert_eq!(code_of(input), Some(ErrorCode::WrongArity), "{input:?}");
    }
    assert_eq!(token_of("acos(1,2)").as_deref(), Some("acos"));
}

#[test]
fn incomplete_expressions() {
    for input in ["cos(", "1 * ", "4^", " / 2", "1 ** 2", "(1+2", "1+2)"] {
        assert_eq!(code_of(input), Some(ErrorCode::Incomplete), "{input:?}");
    }
}

#[test]
fn accepted_expressions() {
    for input in [
        "complex(1,2)",
        "sin(-1)",
        "-2i",
        "cos(0) / sin(1)",
        "4^2",
        "1/sqrt(2)",
        "exp(i*pi/4)/sqrt(2)",
        "log(8, 2)",
        "nthRoot(8, 3)",
        "2 pi",
        "1e-3 + .5i",
    ] {
        assert_eq!(code_of(input), None, "{input:?}");
    }
}

#[test]
fn validation_is_deterministic() {
    let whitelist = Whitelist::default();
    for input in ["sin(x)", "[]", "cos(", "complex(1,2)", "arccos(1,2)"] {
        let first = validate(input, &whitelist);
        let second = validate(input, &whitelist);
        assert_eq!(first, second, "{input:?}");
    }
    assert_eq!(whitelist, Whitelist::default());
}

#[test]
fn validator_and_free_function_agree() {
    let validator: Validator = Validator::default();
    for input in ["sin(x)", "[]", "cos(", "4^2"] {
        assert_eq!(validator.validate(input), validate(input, validator.whitelist()));
    }
}

#[test]
fn check_matches_validate_for_parsed_trees() {
    let whitelist = Whitelist::default();
    for input in ["sin(x)", "[]", "4^2", "complex(1,5,6)"] {
        let tree = parse(input).unwrap();
        assert_eq!(check(&tree, &whitelist), validate(input, &whitelist));
    }
}

#[test]
fn custom_parser_failures_become_code_five() {
    let parser = |_: &str| -> Result<Node, ParseError> {
        Err(ParseError::UnexpectedChar { ch: '@', offset: 0 })
    };
    let err = Validator::with_parser(parser, Whitelist::default())
        .validate("@")
        .unwrap();
    assert_eq!(err.code(), ErrorCode::Incomplete);
    assert_eq!(err.message(), "Unfinished expression detected.");
}

#[test]
fn long_operator_chains_are_rejected_as_incomplete() {
    for (piece, count) in [("+1", 200_000), ("*2", 20_000), ("!", 20_000), (" i", 20_000)] {
        let input = format!("1{}", piece.repeat(count));
        assert_eq!(code_of(&input), Some(ErrorCode::Incomplete), "{piece:?} x {count}");
    }
    let indexed = format!("pi{}", "[1]".repeat(20_000));
    assert_eq!(code_of(&indexed), Some(ErrorCode::Incomplete));
}

#[test]
fn hundred_term_sums_are_accepted() {
    let input = vec!["sin(pi/4)"; 100].join(" + ");
    assert_eq!(code_of(&input), None);
}

#[test]
fn member_lookup_and_quoted_strings() {
    assert_eq!(code_of("a.b"), Some(ErrorCode::UnsupportedNode));
    assert_eq!(token_of("a.b").as_deref(), Some("a.b"));
    assert_eq!(code_of("'abc'"), None);
    assert_eq!(code_of("2'"), None);
}
