// ABOUTME: Runtime schema descriptions for component options and a generic validator.
// ABOUTME: Supports required/optional named fields, nested objects, arrays, string enums, and open pass-through objects.

//! Options-schema descriptions and validation.
//!
//! Component options arrive as untyped JSON from configuration records or a
//! configuration UI. Each registered component exposes a [`Schema`] value
//! describing the shape it accepts; the registry validates raw options
//! against that schema before any construction runs, so configuration
//! errors are always attributable to a specific field of a specific
//! component.
//!
//! The schema value itself is serializable, allowing external collaborators
//! to introspect it (e.g., to render a configuration form).

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Describes the accepted shape of a JSON value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schema {
    /// A JSON string.
    String,
    /// A JSON boolean.
    Bool,
    /// A JSON integer.
    Integer,
    /// A string restricted to a fixed set of literals.
    Enum { values: Vec<String> },
    /// A JSON array whose items all match the given schema.
    Array { items: Box<Schema> },
    /// A JSON object with named fields.
    Object(ObjectSchema),
    /// An open pass-through object: any JSON object is accepted verbatim.
    /// Used for opaque nested configuration such as parser options.
    OpenObject,
}

/// An object schema: named fields, each required or optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ObjectSchema {
    pub fields: BTreeMap<String, Field>,
    /// When true, keys not named in `fields` are accepted and ignored.
    pub open: bool,
}

/// A single named field of an object schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub schema: Schema,
    pub required: bool,
}

impl ObjectSchema {
    /// Creates an empty, closed object schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required field.
    pub fn required(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.insert(
            name.into(),
            Field {
                schema,
                required: true,
            },
        );
        self
    }

    /// Adds an optional field. Absent or `null` values are accepted.
    pub fn optional(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.insert(
            name.into(),
            Field {
                schema,
                required: false,
            },
        );
        self
    }

    /// Marks the object as open: unknown keys pass validation.
    pub fn open(mut self) -> Self {
        self.open = true;
        self
    }
}

/// A single validation failure, locating the offending field by path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// JSON path to the offending value, e.g. `contentExtraction[0].url`.
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Joins violations into a single human-readable diagnostic line.
pub fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Schema {
    /// Shorthand for an object schema.
    pub fn object(fields: ObjectSchema) -> Self {
        Schema::Object(fields)
    }

    /// Shorthand for an array schema.
    pub fn array(items: Schema) -> Self {
        Schema::Array {
            items: Box::new(items),
        }
    }

    /// Shorthand for a string-literal enum schema.
    pub fn string_enum<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::Enum {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Validates a JSON value against this schema.
    ///
    /// Returns every violation found rather than stopping at the first, so
    /// a configuration UI can surface all problems at once.
    pub fn validate(&self, value: &Value) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        self.check(value, "", &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    fn check(&self, value: &Value, path: &str, out: &mut Vec<Violation>) {
        match self {
            Schema::String => {
                if !value.is_string() {
                    out.push(violation(path, format!("expected string, got {}", kind_of(value))));
                }
            }
            Schema::Bool => {
                if !value.is_boolean() {
                    out.push(violation(path, format!("expected boolean, got {}", kind_of(value))));
                }
            }
            Schema::Integer => {
                if !value.is_i64() && !value.is_u64() {
                    out.push(violation(path, format!("expected integer, got {}", kind_of(value))));
                }
            }
            Schema::Enum { values } => match value.as_str() {
                Some(s) if values.iter().any(|v| v == s) => {}
                Some(s) => out.push(violation(
                    path,
                    format!("expected one of {}, got `{}`", backtick_join(values), s),
                )),
                None => out.push(violation(
                    path,
                    format!("expected one of {}, got {}", backtick_join(values), kind_of(value)),
                )),
            },
            Schema::Array { items } => match value.as_array() {
                Some(entries) => {
                    for (index, entry) in entries.iter().enumerate() {
                        items.check(entry, &format!("{path}[{index}]"), out);
                    }
                }
                None => out.push(violation(path, format!("expected array, got {}", kind_of(value)))),
            },
            Schema::Object(object) => match value.as_object() {
                Some(map) => {
                    for (name, field) in &object.fields {
                        let child_path = join_path(path, name);
                        match map.get(name) {
                            None | Some(Value::Null) => {
                                if field.required {
                                    out.push(violation(&child_path, "missing required field".to_string()));
                                }
                            }
                            Some(child) => field.schema.check(child, &child_path, out),
                        }
                    }
                    if !object.open {
                        for name in map.keys() {
                            if !object.fields.contains_key(name) {
                                out.push(violation(&join_path(path, name), "unexpected field".to_string()));
                            }
                        }
                    }
                }
                None => out.push(violation(path, format!("expected object, got {}", kind_of(value)))),
            },
            Schema::OpenObject => {
                if !value.is_object() {
                    out.push(violation(path, format!("expected object, got {}", kind_of(value))));
                }
            }
        }
    }
}

fn violation(path: &str, message: String) -> Violation {
    Violation {
        path: path.to_string(),
        message,
    }
}

fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn backtick_join(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("`{v}`"))
        .collect::<Vec<_>>()
        .join(", ")
}
