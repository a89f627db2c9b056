//! Defines the JSON-LD keywords and RDF vocabulary terms used while shaping documents.

use oxigraph::model::NamedNodeRef;

// JSON-LD keywords
pub const ID: &str = "@id";
pub const TYPE_KEY: &str = "@type";
pub const VALUE: &str = "@value";
pub const LANGUAGE: &str = "@language";

/// Prefix used for blank node identifiers in `@id` values.
pub const BLANK_NODE_PREFIX: &str = "_:";

// rdf
pub const TYPE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
pub const LANG_STRING: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#langString");
// xsd
pub const XSD_STRING: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#string");

/// Environment variable that overrides `RUST_LOG` for the converter.
pub const LOG_ENV: &str = "RDF2JSON_LOG";
