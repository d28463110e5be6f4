//! RDF 1.1 / Turtle 1.1 validator.
//!
//! Validates that the serialized forms of a graph are well-formed:
//! - Turtle output parses without errors
//! - N-Triples output parses without errors and every line ends with ` .`
//! - Triple counts are consistent between the graph and both formats

use std::convert::Infallible;

use anyhow::{anyhow, Result};
use sophia_api::source::TripleSource;
use vsso_ontology::{Format, Graph};

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "ontology/rdf";

/// Serializes `graph` in both formats and parses the results back.
///
/// # Errors
///
/// Never fails on malformed output, which is reported as a failure result.
/// The `Result` is kept for parity with the other validators.
pub fn validate(graph: &Graph) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    let turtle = graph.serialize(Format::Turtle);
    validate_turtle(&turtle, graph.len(), &mut report);

    let ntriples = graph.serialize(Format::NTriples);
    validate_ntriples(&ntriples, graph.len(), &mut report);

    Ok(report)
}

/// Counts the triples in a Turtle document.
///
/// # Errors
///
/// Returns an error if the document does not parse.
pub fn count_turtle(text: &str) -> Result<usize> {
    let mut count = 0;
    sophia_turtle::parser::turtle::parse_str(text)
        .try_for_each_triple(|_| {
            count += 1;
            Ok::<_, Infallible>(())
        })
        .map_err(|e| anyhow!("failed to parse Turtle: {e}"))?;
    Ok(count)
}

/// Counts the triples in an N-Triples document.
///
/// # Errors
///
/// Returns an error if the document does not parse.
pub fn count_ntriples(text: &str) -> Result<usize> {
    let mut count = 0;
    sophia_turtle::parser::nt::parse_str(text)
        .try_for_each_triple(|_| {
            count += 1;
            Ok::<_, Infallible>(())
        })
        .map_err(|e| anyhow!("failed to parse N-Triples: {e}"))?;
    Ok(count)
}

fn validate_turtle(content: &str, expected: usize, report: &mut ConformanceReport) {
    let prefix_count = content
        .lines()
        .filter(|l| l.trim_start().starts_with("@prefix"))
        .count();
    if prefix_count == 0 && expected > 0 {
        report.push(TestResult::warn(
            VALIDATOR,
            "Turtle output has no @prefix declarations",
        ));
    }

    match count_turtle(content) {
        Ok(count) if count == expected => report.push(TestResult::pass(
            VALIDATOR,
            format!(
                "Turtle output parses to {count} triples with {prefix_count} prefixes ({} bytes)",
                content.len()
            ),
        )),
        Ok(count) => report.push(TestResult::fail(
            VALIDATOR,
            format!("Turtle output parses to {count} triples, graph has {expected}"),
        )),
        Err(e) => report.push(TestResult::fail_with_details(
            VALIDATOR,
            "Turtle output does not parse",
            vec![e.to_string()],
        )),
    }
}

fn validate_ntriples(content: &str, expected: usize, report: &mut ConformanceReport) {
    let malformed_lines: Vec<String> = content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#') && !trimmed.ends_with(" .")
        })
        .map(|(i, _)| format!("line {}: does not end with \" .\"", i + 1))
        .take(10)
        .collect();
    if !malformed_lines.is_empty() {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            "N-Triples output has malformed lines",
            malformed_lines,
        ));
        return;
    }

    match count_ntriples(content) {
        Ok(count) if count == expected => report.push(TestResult::pass(
            VALIDATOR,
            format!("N-Triples output is valid ({count} triples)"),
        )),
        Ok(count) => report.push(TestResult::fail(
            VALIDATOR,
            format!("N-Triples output parses to {count} triples, graph has {expected}"),
        )),
        Err(e) => report.push(TestResult::fail_with_details(
            VALIDATOR,
            "N-Triples output does not parse",
            vec![e.to_string()],
        )),
    }
}

#[cfg(test)]
mod tests {
    use vsso_ontology::bootstrap::bootstrap;
    use vsso_ontology::{Registry, Term};

    use super::*;

    #[test]
    fn bootstrap_graph_round_trips() -> Result<()> {
        let mut graph = Graph::new();
        bootstrap(&mut graph, &Registry::vss());
        let report = validate(&graph)?;
        assert!(report.all_passed(), "{report}");
        assert_eq!(report.results.len(), 2);
        Ok(())
    }

    #[test]
    fn awkward_literals_and_iris_survive() -> Result<()> {
        let mut graph = Graph::new();
        graph.bind("ex", "https://example.org/ns#");
        graph.add(
            "https://example.org/ns#A",
            "https://example.org/ns#note",
            Term::en("quote \" backslash \\ newline \n tab \t"),
        );
        graph.add(
            "https://example.org/ns#km/h",
            "https://example.org/ns#note",
            Term::Plain("slash".into()),
        );
        let report = validate(&graph)?;
        assert!(report.all_passed(), "{report}");
        Ok(())
    }

    #[test]
    fn garbage_does_not_parse() {
        assert!(count_turtle("this is not turtle").is_err());
        assert!(count_ntriples("<a> <b> .").is_err());
    }
}
