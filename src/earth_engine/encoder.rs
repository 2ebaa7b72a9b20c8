//! Serialises a [`Value`] tree into the REST `Expression` message.
//!
//! The wire form is a flat table of value nodes plus the id of the result:
//!
//! ```json
//! {"result": "0", "values": {"0": {"functionInvocationValue": {...}}, "1": {...}}}
//! ```
//!
//! Nodes are inlined where the API allows it. Function bodies must be table
//! references, so they (and the root) go into the table. Identical table entries
//! are stored once.

use crate::earth_engine::value::Value;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub result: String,
    pub values: BTreeMap<String, ValueNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueNode {
    ConstantValue(Json),
    ArrayValue(ArrayValue),
    DictionaryValue(DictionaryValue),
    FunctionInvocationValue(FunctionInvocation),
    FunctionDefinitionValue(FunctionDefinition),
    ArgumentReference(String),
    ValueReference(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    pub values: Vec<ValueNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryValue {
    pub values: BTreeMap<String, ValueNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInvocation {
    pub function_name: String,
    pub arguments: BTreeMap<String, ValueNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDefinition {
    pub argument_names: Vec<String>,
    /// Id of the body in [`Expression::values`].
    pub body: String,
}

/// Encodes `value` into a self-contained [`Expression`].
///
/// The encoding is deterministic: the same tree always yields the same ids.
///
/// ```
/// use water_extent::earth_engine::encoder::{encode, ValueNode};
/// use water_extent::earth_engine::value::Value;
///
/// let expression = encode(&Value::call("Reducer.sum"));
/// assert_eq!(expression.result, "0");
/// assert!(matches!(expression.values["0"], ValueNode::FunctionInvocationValue(_)));
/// ```
pub fn encode(value: &Value) -> Expression {
    let mut encoder = Encoder::default();
    let result = encoder.store(value);
    Expression {
        result,
        values: encoder.values,
    }
}

#[derive(Default)]
struct Encoder {
    values: BTreeMap<String, ValueNode>,
    // serialized node -> table id
    index: HashMap<String, String>,
}

impl Encoder {
    /// Puts the encoded node into the table, returning its id.
    fn store(&mut self, value: &Value) -> String {
        let node = self.node(value);
        // empty key: not de-duplicated
        let key = serde_json::to_string(&node).unwrap_or_default();
        if !key.is_empty() {
            if let Some(id) = self.index.get(&key) {
                return id.clone();
            }
        }
        let id = self.values.len().to_string();
        self.values.insert(id.clone(), node);
        if !key.is_empty() {
            self.index.insert(key, id.clone());
        }
        id
    }

    fn node(&mut self, value: &Value) -> ValueNode {
        match value {
            Value::Constant(json) => ValueNode::ConstantValue(json.clone()),
            Value::Array(items) => {
                let nodes: Vec<ValueNode> = items.iter().map(|item| self.node(item)).collect();
                fold_constant_array(nodes)
            }
            Value::Dictionary(entries) => ValueNode::DictionaryValue(DictionaryValue {
                values: entries
                    .iter()
                    .map(|(key, item)| (key.clone(), self.node(item)))
                    .collect(),
            }),
            Value::Invocation {
                function,
                arguments,
            } => ValueNode::FunctionInvocationValue(FunctionInvocation {
                function_name: function.clone(),
                arguments: arguments
                    .iter()
                    .map(|(name, item)| (name.clone(), self.node(item)))
                    .collect(),
            }),
            Value::Argument(name) => ValueNode::ArgumentReference(name.clone()),
            Value::Function { arguments, body } => {
                let body = self.store(body);
                ValueNode::FunctionDefinitionValue(FunctionDefinition {
                    argument_names: arguments.clone(),
                    body,
                })
            }
        }
    }
}

fn fold_constant_array(nodes: Vec<ValueNode>) -> ValueNode {
    if nodes
        .iter()
        .all(|node| matches!(node, ValueNode::ConstantValue(_)))
    {
        let constants = nodes
            .into_iter()
            .filter_map(|node| match node {
                ValueNode::ConstantValue(json) => Some(json),
                _ => None,
            })
            .collect();
        ValueNode::ConstantValue(Json::Array(constants))
    } else {
        ValueNode::ArrayValue(ArrayValue { values: nodes })
    }
}
