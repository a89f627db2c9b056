use rdf2json::parser::StatementGraph;
use rdf2json::{
    CancellationToken, Config, ConversionOptions, ConversionOutcome, Converter, Document,
    DocumentWriter, Flattener, GraphToDocument, InputFormat, OutputFormat,
};
use regex::Regex;
use serde_json::{json, Value};
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

const TEST_NTRIPLES: &str = "<s1> <http://test/p1> <o1> .
<s1> <p2> \"l1\" .
<s1> <p3> <o3> .
<s1> <p3> <o4> .
<s2> <http://test/p1> <o5> .
<s2> <p4> \"l2\" .
";

const TEST_NQUADS: &str = "<s1> <http://test/p1> <o1> <g1> .
<s1> <p2> \"l1\" <g1> .
<s1> <p3> <o3> <g1> .
<s1> <p3> <o4> <g1> .
<s2> <http://test/p1> <o5> <g2> .
<s2> <p4> \"l2\" <g2> .
";

fn create_input(content: &str, suffix: &str) -> NamedTempFile {
    let mut input = tempfile::Builder::new()
        .prefix("rdf2json-converter-input")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    input.write_all(content.as_bytes()).unwrap();
    input.flush().unwrap();
    input
}

fn output_file() -> NamedTempFile {
    tempfile::Builder::new()
        .prefix("rdf2json-converter-output")
        .tempfile()
        .unwrap()
}

fn read_json(output: &NamedTempFile) -> Vec<Value> {
    std::fs::read_to_string(output.path())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn convert_in_memory(
    input: &str,
    options: ConversionOptions,
) -> (ConversionOutcome, Vec<Value>) {
    let converter = Converter::new(
        Cursor::new(input.as_bytes().to_vec()),
        DocumentWriter::new(Vec::new()),
        options,
    );
    let (outcome, sink) = converter.convert().unwrap();
    let documents = String::from_utf8(sink)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (outcome, documents)
}

#[test]
fn test_ntriples_to_jsonld() {
    let input = create_input(TEST_NTRIPLES, ".nt");
    let output = output_file();
    let config = Config::builder()
        .input(input.path())
        .output(output.path())
        .silent(true)
        .build()
        .unwrap();
    let (outcome, _) = Converter::from_config(&config).unwrap().convert().unwrap();

    let stats = outcome.stats();
    assert!(!outcome.is_cancelled());
    assert_eq!(stats.lines, 6);
    assert_eq!(stats.statements, 6);
    assert_eq!(stats.parse_errors, 0);
    assert_eq!(stats.documents, 2);

    let lines = std::fs::read_to_string(output.path()).unwrap();
    let lines: Vec<&str> = lines.lines().collect();
    assert_eq!(
        lines[0],
        r#"{"@id":"s1","http://test/p1":[{"@id":"o1"}],"p2":[{"@value":"l1"}],"p3":[{"@id":"o3"},{"@id":"o4"}]}"#
    );
    assert_eq!(
        serde_json::from_str::<Value>(lines[1]).unwrap(),
        json!({"@id": "s2", "http://test/p1": [{"@id": "o5"}], "p4": [{"@value": "l2"}]})
    );
}

#[test]
fn test_ntriples_to_json() {
    let input = create_input(TEST_NTRIPLES, ".nt");
    let output = output_file();
    let config = Config::builder()
        .input(input.path())
        .output(output.path())
        .minimize(true)
        .silent(true)
        .build()
        .unwrap();
    Converter::from_config(&config).unwrap().convert().unwrap();

    assert_eq!(
        read_json(&output),
        vec![
            json!({"@id": "s1", "http://test/p1": ["o1"], "p2": ["l1"], "p3": ["o3", "o4"]}),
            json!({"@id": "s2", "http://test/p1": ["o5"], "p4": ["l2"]}),
        ]
    );
}

#[test]
fn test_ntriples_to_json_with_namespace() {
    let input = create_input(TEST_NTRIPLES, ".nt");
    let output = output_file();
    let config = Config::builder()
        .input(input.path())
        .output(output.path())
        .namespace("primary_key")
        .silent(true)
        .build()
        .unwrap();
    Converter::from_config(&config).unwrap().convert().unwrap();

    assert_eq!(
        read_json(&output),
        vec![
            json!({"http://test/p1": ["o1"], "p2": ["l1"], "p3": ["o3", "o4"], "primary_key": "s1"}),
            json!({"http://test/p1": ["o5"], "p4": ["l2"], "primary_key": "s2"}),
        ]
    );
}

#[test]
fn test_ntriples_to_json_with_prefix() {
    let input = create_input(TEST_NTRIPLES, ".nt");
    let output = output_file();
    let config = Config::builder()
        .input(input.path())
        .output(output.path())
        .minimize(true)
        .prefix("http://test/")
        .silent(true)
        .build()
        .unwrap();
    Converter::from_config(&config).unwrap().convert().unwrap();

    assert_eq!(
        read_json(&output),
        vec![
            json!({"@id": "s1", "p1": ["o1"], "p2": ["l1"], "p3": ["o3", "o4"]}),
            json!({"@id": "s2", "p1": ["o5"], "p4": ["l2"]}),
        ]
    );
}

#[test]
fn test_ntriples_to_json_with_namespace_and_prefix() {
    let input = create_input(TEST_NTRIPLES, ".nt");
    let output = output_file();
    let config = Config::builder()
        .input(input.path())
        .output(output.path())
        .namespace("primary_key")
        .prefix("http://test/")
        .silent(true)
        .build()
        .unwrap();
    Converter::from_config(&config).unwrap().convert().unwrap();

    assert_eq!(
        read_json(&output),
        vec![
            json!({"p1": ["o1"], "p2": ["l1"], "p3": ["o3", "o4"], "primary_key": "s1"}),
            json!({"p1": ["o5"], "p4": ["l2"], "primary_key": "s2"}),
        ]
    );
}

#[test]
fn test_prefix_without_minimize_is_ignored() {
    let input = create_input(TEST_NTRIPLES, ".nt");
    let output = output_file();
    let config = Config::builder()
        .input(input.path())
        .output(output.path())
        .prefix("http://test/")
        .silent(true)
        .build()
        .unwrap();
    Converter::from_config(&config).unwrap().convert().unwrap();

    let documents = read_json(&output);
    assert_eq!(documents[0]["http://test/p1"], json!([{"@id": "o1"}]));
}

#[test]
fn test_nquads_to_jsonld() {
    let input = create_input(TEST_NQUADS, ".nq");
    let output = output_file();
    let config = Config::builder()
        .input(input.path())
        .output(output.path())
        .silent(true)
        .build()
        .unwrap();
    assert_eq!(config.input_format, InputFormat::NQuads);
    Converter::from_config(&config).unwrap().convert().unwrap();

    assert_eq!(
        read_json(&output),
        vec![
            json!({
                "@id": "s1",
                "http://test/p1": [{"@id": "o1"}],
                "p2": [{"@value": "l1"}],
                "p3": [{"@id": "o3"}, {"@id": "o4"}]
            }),
            json!({"@id": "s2", "http://test/p1": [{"@id": "o5"}], "p4": [{"@value": "l2"}]}),
        ]
    );
}

#[test]
fn test_nquads_to_json() {
    let input = create_input(TEST_NQUADS, ".nq");
    let output = output_file();
    let config = Config::builder()
        .input(input.path())
        .output(output.path())
        .minimize(true)
        .silent(true)
        .build()
        .unwrap();
    Converter::from_config(&config).unwrap().convert().unwrap();

    assert_eq!(
        read_json(&output),
        vec![
            json!({"@id": "s1", "http://test/p1": ["o1"], "p2": ["l1"], "p3": ["o3", "o4"]}),
            json!({"@id": "s2", "http://test/p1": ["o5"], "p4": ["l2"]}),
        ]
    );
}

#[test]
fn test_output_is_appended() {
    let input = create_input(TEST_NTRIPLES, ".nt");
    let output = output_file();
    std::fs::write(output.path(), "{\"existing\":true}\n").unwrap();
    let config = Config::builder()
        .input(input.path())
        .output(output.path())
        .minimize(true)
        .silent(true)
        .build()
        .unwrap();
    Converter::from_config(&config).unwrap().convert().unwrap();
    Converter::from_config(&config).unwrap().convert().unwrap();

    let documents = read_json(&output);
    assert_eq!(documents.len(), 5);
    assert_eq!(documents[0], json!({"existing": true}));
    assert_eq!(documents[1], documents[3]);
}

#[test]
fn test_two_subjects_two_documents() {
    let input = "<s1> <p1> <o1> .\n<s1> <p2> \"l1\" .\n<s2> <p3> <o2> .\n";
    let (outcome, documents) =
        convert_in_memory(input, ConversionOptions::new(InputFormat::NTriples));
    assert_eq!(outcome.stats().documents, 2);
    assert_eq!(
        documents,
        vec![
            json!({"@id": "s1", "p1": [{"@id": "o1"}], "p2": [{"@value": "l1"}]}),
            json!({"@id": "s2", "p3": [{"@id": "o2"}]}),
        ]
    );
}

struct FixedShaper(Vec<Document>);

impl GraphToDocument for FixedShaper {
    fn documents(&self, _graph: &StatementGraph) -> Vec<Document> {
        self.0.clone()
    }
}

fn as_document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}

#[test]
fn test_namespace_and_flatten_applied_to_shaped_documents() {
    let mut options = ConversionOptions::new(InputFormat::NTriples);
    options.output_format = OutputFormat::Json;
    options.namespace = Some("id".to_string());
    let shaper = FixedShaper(vec![as_document(
        json!({"@id": "s1", "http://x/p": [{"@id": "o1"}]}),
    )]);
    let mut converter = Converter::new(
        Cursor::new(Vec::new()),
        DocumentWriter::new(Vec::new()),
        options,
    )
    .with_shaper(Box::new(shaper));

    let stats = converter.write_graph("<s1> <http://x/p> <o1> .").unwrap();
    assert_eq!(stats.documents, 1);
    let (_, sink) = converter.convert().unwrap();
    let line = String::from_utf8(sink).unwrap();
    assert_eq!(
        serde_json::from_str::<Value>(line.trim()).unwrap(),
        json!({"http://x/p": ["o1"], "id": "s1"})
    );
}

#[test]
fn test_prefix_stripping_leaves_other_keys() {
    let mut options = ConversionOptions::new(InputFormat::NTriples);
    options.output_format = OutputFormat::Json;
    options.flattener = Flattener::new(Some(Regex::new("^(?:http://x/)").unwrap()));
    let (_, documents) =
        convert_in_memory("<s1> <http://x/p> <o1> .\n<s1> <p2> \"v\" .\n", options);
    assert_eq!(documents, vec![json!({"@id": "s1", "p": ["o1"], "p2": ["v"]})]);
}

#[test]
fn test_malformed_block_is_counted_and_skipped() {
    let input = "<s1> <p1> <o1> .\n<s3> <p5> .\n<s4> <p6> \"ok\" .\n";
    let (outcome, documents) =
        convert_in_memory(input, ConversionOptions::new(InputFormat::NTriples));
    let stats = outcome.stats();
    assert_eq!(stats.lines, 3);
    assert_eq!(stats.parse_errors, 1);
    assert_eq!(stats.statements, 2);
    assert_eq!(stats.documents, 2);
    assert_eq!(documents[1], json!({"@id": "s4", "p6": [{"@value": "ok"}]}));
}

#[test]
fn test_escaping_defects_are_repaired() {
    let input = "<http://x/a b> <p> \"it\\'s\" .\n";
    let (outcome, documents) =
        convert_in_memory(input, ConversionOptions::new(InputFormat::NTriples));
    assert_eq!(outcome.stats().parse_errors, 0);
    assert_eq!(documents, vec![json!({"@id": "http://x/a%20b", "p": [{"@value": "it's"}]})]);
}

#[test]
fn test_empty_input() {
    let (outcome, documents) = convert_in_memory("", ConversionOptions::new(InputFormat::NTriples));
    assert_eq!(*outcome.stats(), Default::default());
    assert!(documents.is_empty());
}

#[test]
fn test_lines_counted_regardless_of_errors() {
    let input = "garbage\nmore garbage\n\n<s1> <p> <o> .\r\n";
    let (outcome, documents) =
        convert_in_memory(input, ConversionOptions::new(InputFormat::NTriples));
    let stats = outcome.stats();
    assert_eq!(stats.lines, 4);
    assert_eq!(stats.parse_errors, 2);
    assert_eq!(documents.len(), 1);
}

#[test]
fn test_cancelled_run_stops_cleanly() {
    let token = CancellationToken::new();
    token.cancel();
    let converter = Converter::new(
        Cursor::new(TEST_NTRIPLES.as_bytes().to_vec()),
        DocumentWriter::new(Vec::new()),
        ConversionOptions::new(InputFormat::NTriples),
    )
    .with_cancellation(token);
    let (outcome, sink) = converter.convert().unwrap();
    assert!(outcome.is_cancelled());
    assert_eq!(outcome.stats().lines, 0);
    assert!(sink.is_empty());
}

#[test]
fn test_missing_input_is_an_error() {
    let output = output_file();
    let config = Config::builder()
        .input("/nonexistent/rdf2json/input.nt")
        .output(output.path())
        .build()
        .unwrap();
    assert!(Converter::from_config(&config).is_err());
}
