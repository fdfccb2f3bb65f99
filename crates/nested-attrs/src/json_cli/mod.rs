//! `json-cli`: logic behind the `nested-attrs` binary.
//!
//! The document is a JSON object read from stdin. One command runs against
//! it:
//! - `get <path>` prints the value at `path`
//! - `set <path> <json>` assigns `json` at `path` and prints the document
//! - `unset <path>` removes `path` and prints the document
//! - `merge <json>` deep-merges a whole JSON object and prints the document
//!
//! Change notifications are returned alongside the output so the binary can
//! report them.

use nested_attr_path::PathError;
use nested_attrs_util::json_merge::deep_merge_map;
use serde_json::Value;
use thiserror::Error;

use crate::accessor::{AttributeHost, NestedAttributes, SetOptions};
use crate::model::{Model, ModelEvent};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Path(#[from] PathError),
    #[error("Document must be a JSON object.")]
    NotAnObject,
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
    #[error("{0}")]
    Usage(String),
}

// ── Commands ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Get { path: String },
    Set { path: String, value: String },
    Unset { path: String },
    Merge { value: String },
}

impl Command {
    /// Parse positional arguments (program name already stripped).
    pub fn from_args(args: &[String]) -> Result<Self, CliError> {
        let usage = || {
            CliError::Usage(
                "usage: nested-attrs [--silent] (get <path> | set <path> <json> | unset <path> | merge <json>)"
                    .to_string(),
            )
        };
        match args {
            [cmd, path] if cmd == "get" => Ok(Command::Get { path: path.clone() }),
            [cmd, path, value] if cmd == "set" => Ok(Command::Set {
                path: path.clone(),
                value: value.clone(),
            }),
            [cmd, path] if cmd == "unset" => Ok(Command::Unset { path: path.clone() }),
            [cmd, value] if cmd == "merge" => Ok(Command::Merge {
                value: value.clone(),
            }),
            _ => Err(usage()),
        }
    }
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CliOutput {
    /// JSON text for stdout.
    pub output: String,
    /// Event names fired while running, in order.
    pub notifications: Vec<String>,
}

/// Parse a JSON object into a [`Model`].
pub fn parse_document(json: &str) -> Result<Model, CliError> {
    let value: Value = serde_json::from_str(json)?;
    Model::from_value(value).ok_or(CliError::NotAnObject)
}

/// Run `command` against the document `json`.
pub fn run(command: &Command, json: &str, options: &SetOptions) -> Result<CliOutput, CliError> {
    let mut model = parse_document(json)?;

    match command {
        Command::Get { path } => {
            let value = model
                .get(path.as_str())?
                .ok_or_else(|| CliError::NotFound(path.clone()))?;
            return Ok(CliOutput {
                output: serde_json::to_string(value)?,
                notifications: Vec::new(),
            });
        }
        Command::Set { path, value } => {
            let value: Value = serde_json::from_str(value)?;
            model.set([(path.as_str(), value)], options)?;
        }
        Command::Unset { path } => model.unset(path.as_str(), options)?,
        Command::Merge { value } => {
            let Value::Object(source) = serde_json::from_str::<Value>(value)? else {
                return Err(CliError::NotAnObject);
            };
            let mut merged = model.to_snapshot();
            deep_merge_map(&mut merged, source);
            model.reset(merged, options);
        }
    }

    let notifications = model.drain_events().iter().map(ModelEvent::name).collect();
    Ok(CliOutput {
        output: serde_json::to_string(&Value::Object(model.attributes().clone()))?,
        notifications,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn out_json(out: &CliOutput) -> Value {
        serde_json::from_str(&out.output).unwrap()
    }

    #[test]
    fn test_command_from_args() {
        assert_eq!(
            Command::from_args(&args(&["get", "a.b"])).unwrap(),
            Command::Get { path: "a.b".into() }
        );
        assert_eq!(
            Command::from_args(&args(&["set", "a", "1"])).unwrap(),
            Command::Set { path: "a".into(), value: "1".into() }
        );
        assert!(matches!(
            Command::from_args(&args(&["set", "a"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(Command::from_args(&args(&[])), Err(CliError::Usage(_))));
    }

    #[test]
    fn test_run_get() {
        let doc = r#"{"a": {"b": [1, 2]}}"#;
        let out = run(&Command::Get { path: "a.b[1]".into() }, doc, &SetOptions::default()).unwrap();
        assert_eq!(out.output, "2");

        let err = run(&Command::Get { path: "a.c".into() }, doc, &SetOptions::default()).unwrap_err();
        assert!(matches!(err, CliError::NotFound(p) if p == "a.c"));
    }

    #[test]
    fn test_run_set() {
        let out = run(
            &Command::Set { path: "a.list[]".into(), value: r#"{"x": 1}"#.into() },
            r#"{"a": {"list": []}}"#,
            &SetOptions::default(),
        )
        .unwrap();
        assert_eq!(out_json(&out), json!({"a": {"list": [{"x": 1}]}}));
        assert_eq!(
            out.notifications,
            ["change:a", "change:a.list[0]", "change:a.list", "change"]
        );
    }

    #[test]
    fn test_run_set_silent() {
        let out = run(
            &Command::Set { path: "a".into(), value: "1".into() },
            "{}",
            &SetOptions::silent(),
        )
        .unwrap();
        assert_eq!(out_json(&out), json!({"a": 1}));
        assert!(out.notifications.is_empty());
    }

    #[test]
    fn test_run_unset() {
        let out = run(&Command::Unset { path: "a.b".into() }, r#"{"a": {"b": 1, "c": 2}}"#, &SetOptions::default())
            .unwrap();
        assert_eq!(out_json(&out), json!({"a": {"c": 2}}));
        assert_eq!(out.notifications, ["change:a", "change:a.b", "change"]);
    }

    #[test]
    fn test_run_merge() {
        let out = run(
            &Command::Merge { value: r#"{"a": {"c": 2}}"#.into() },
            r#"{"a": {"b": 1}, "z": 0}"#,
            &SetOptions::default(),
        )
        .unwrap();
        assert_eq!(out_json(&out), json!({"a": {"b": 1, "c": 2}, "z": 0}));
        assert_eq!(out.notifications, ["change:a", "change"]);
    }

    #[test]
    fn test_run_rejects_non_object_document() {
        let err = run(&Command::Get { path: "a".into() }, "[1]", &SetOptions::default()).unwrap_err();
        assert!(matches!(err, CliError::NotAnObject));

        let err = run(&Command::Merge { value: "3".into() }, "{}", &SetOptions::default()).unwrap_err();
        assert!(matches!(err, CliError::NotAnObject));
    }

    #[test]
    fn test_run_set_huge_index_is_an_error() {
        let err = run(
            &Command::Set { path: "l[18446744073709551614]".into(), value: "1".into() },
            r#"{"l": []}"#,
            &SetOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Path(PathError::IndexOutOfBounds { .. })));
    }

    #[test]
    fn test_run_bad_path() {
        let err = run(&Command::Set { path: "".into(), value: "1".into() }, "{}", &SetOptions::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Path(PathError::InvalidPath(_))));
    }
}
