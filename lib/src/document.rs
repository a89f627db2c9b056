//! Shapes the statements of a block into JSON-LD node objects, one per subject.

use crate::consts::{
    BLANK_NODE_PREFIX, ID, LANGUAGE, LANG_STRING, TYPE, TYPE_KEY, VALUE, XSD_STRING,
};
use crate::parser::StatementGraph;
use oxigraph::model::{NamedOrBlankNode, Term};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A JSON object; either an expanded JSON-LD node object or its flattened form.
pub type Document = Map<String, Value>;

/// Turns a graph of statements into documents, one per distinct subject.
pub trait GraphToDocument {
    fn documents(&self, graph: &StatementGraph) -> Vec<Document>;
}

/// Produces expanded JSON-LD the way the "RDF to JSON-LD" algorithm does with its default
/// options: `rdf:type` becomes `@type`, literals stay strings, lists are not folded.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpandedJsonLd;

impl GraphToDocument for ExpandedJsonLd {
    fn documents(&self, graph: &StatementGraph) -> Vec<Document> {
        // nodes ordered by identifier; objects referenced but never described are dropped
        let mut nodes: BTreeMap<String, Document> = BTreeMap::new();
        for triple in graph.iter() {
            let id = subject_id(&triple.subject);
            let node = nodes.entry(id.clone()).or_insert_with(|| node_object(id));

            if triple.predicate.as_ref() == TYPE {
                if let Some(type_id) = reference_id(&triple.object) {
                    push_unique(node, TYPE_KEY, Value::String(type_id));
                    continue;
                }
            }
            push_unique(node, triple.predicate.as_str(), object_value(&triple.object));
        }
        nodes.into_values().collect()
    }
}

fn node_object(id: String) -> Document {
    let mut node = Document::new();
    node.insert(ID.to_string(), Value::String(id));
    node
}

fn subject_id(subject: &NamedOrBlankNode) -> String {
    match subject {
        NamedOrBlankNode::NamedNode(n) => n.as_str().to_string(),
        NamedOrBlankNode::BlankNode(b) => format!("{}{}", BLANK_NODE_PREFIX, b.as_str()),
    }
}

fn reference_id(term: &Term) -> Option<String> {
    match term {
        Term::NamedNode(n) => Some(n.as_str().to_string()),
        Term::BlankNode(b) => Some(format!("{}{}", BLANK_NODE_PREFIX, b.as_str())),
        _ => None,
    }
}

fn object_value(term: &Term) -> Value {
    let mut wrapper = Map::new();
    match term {
        Term::Literal(literal) => {
            wrapper.insert(VALUE.to_string(), Value::String(literal.value().to_string()));
            if let Some(language) = literal.language() {
                wrapper.insert(LANGUAGE.to_string(), Value::String(language.to_string()));
            } else if literal.datatype() != XSD_STRING && literal.datatype() != LANG_STRING {
                wrapper.insert(
                    TYPE_KEY.to_string(),
                    Value::String(literal.datatype().as_str().to_string()),
                );
            }
        }
        other => match reference_id(other) {
            Some(id) => {
                wrapper.insert(ID.to_string(), Value::String(id));
            }
            // quoted triples have no JSON-LD form; keep their N-Triples text
            None => {
                wrapper.insert(VALUE.to_string(), Value::String(other.to_string()));
            }
        },
    }
    Value::Object(wrapper)
}

fn push_unique(node: &mut Document, key: &str, value: Value) {
    let entry = node
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::Array(values) = entry {
        if !values.contains(&value) {
            values.push(value);
        }
    }
}
