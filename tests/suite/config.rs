//! Config file to whitelist to validation outcome.

use qubit_config::{ConfigError, QubitConfig};
use qubit_core::validate;
use qubit_types::ErrorCode;

use crate::common::temp_config;

#[test]
fn config_extends_the_stock_whitelist() {
    let (_dir, path) = temp_config(
        r#"
[whitelist]
extra_functions = ["log10"]
extra_symbols = ["c"]
"#,
    );
    let whitelist = QubitConfig::load_from(&path).unwrap().unwrap().whitelist();

    assert_eq!(validate("log10(c)", &whitelist), None);
    assert_eq!(validate("sin(pi)", &whitelist), None);
    assert_eq!(
        validate("log10(1, 2)", &whitelist).map(|e| e.code()),
        Some(ErrorCode::WrongArity)
    );
}

#[test]
fn config_can_allow_other_node_kinds() {
    let (_dir, path) = temp_config(
        r#"
[whitelist]
node_kinds = ["group", "operator", "literal", "function_call", "identifier", "other"]
"#,
    );
    let whitelist = QubitConfig::load_from(&path).unwrap().unwrap().whitelist();
    assert_eq!(validate("[1, 2]", &whitelist), None);
}

#[test]
fn malformed_config_is_reported() {
    let (_dir, path) = temp_config("[whitelist\n");
    let err = QubitConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
