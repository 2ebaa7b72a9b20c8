//! In-memory form of a server-side computation.
//!
//! A [`Value`] is a tree: leaves are constants and argument references, inner
//! nodes are algorithm invocations, arrays, dictionaries and function
//! definitions. Nothing is evaluated locally; the tree is handed to
//! [`crate::earth_engine::encoder::encode`] and shipped to the API as one request.

use serde_json::Value as Json;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Any JSON literal, including `null`.
    Constant(Json),
    Array(Vec<Value>),
    Dictionary(BTreeMap<String, Value>),
    /// Call of a named server algorithm with keyword arguments.
    Invocation {
        function: String,
        arguments: BTreeMap<String, Value>,
    },
    /// Reference to an argument of an enclosing [`Value::Function`].
    Argument(String),
    Function {
        arguments: Vec<String>,
        body: Box<Value>,
    },
}

impl Value {
    pub fn constant(value: impl Into<Json>) -> Self {
        Value::Constant(value.into())
    }

    pub fn null() -> Self {
        Value::Constant(Json::Null)
    }

    /// Invokes `function` with the given keyword arguments.
    ///
    /// ```
    /// use water_extent::earth_engine::value::Value;
    ///
    /// let load = Value::invoke("ImageCollection.load", [("id", Value::constant("MODIS/006/MOD44W"))]);
    /// assert!(matches!(load, Value::Invocation { ref function, .. } if function == "ImageCollection.load"));
    /// ```
    pub fn invoke<'a>(function: &str, arguments: impl IntoIterator<Item = (&'a str, Value)>) -> Self {
        Value::Invocation {
            function: function.to_string(),
            arguments: arguments
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }

    /// Invokes `function` without arguments.
    pub fn call(function: &str) -> Self {
        Value::Invocation {
            function: function.to_string(),
            arguments: BTreeMap::new(),
        }
    }

    pub fn dictionary<'a>(entries: impl IntoIterator<Item = (&'a str, Value)>) -> Self {
        Value::Dictionary(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    }

    pub fn array(values: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(values.into_iter().collect())
    }

    pub fn argument(name: &str) -> Self {
        Value::Argument(name.to_string())
    }

    pub fn function(arguments: &[&str], body: Value) -> Self {
        Value::Function {
            arguments: arguments.iter().map(|a| a.to_string()).collect(),
            body: Box::new(body),
        }
    }

    /// Name of the invoked algorithm, if this is an invocation.
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Value::Invocation { function, .. } => Some(function),
            _ => None,
        }
    }

    /// Looks up a keyword argument of an invocation.
    pub fn argument_value(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Invocation { arguments, .. } => arguments.get(name),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::constant(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::constant(value)
    }
}
