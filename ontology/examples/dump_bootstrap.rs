//! Prints the fixed VSSo schema in Turtle, with a short summary.
//!
//! Run with: `cargo run --example dump_bootstrap -p vsso-ontology`

use vsso_ontology::bootstrap::{bootstrap, classes, properties};
use vsso_ontology::{Format, Graph, Registry};

fn main() {
    let registry = Registry::vss();
    let mut graph = Graph::new();
    bootstrap(&mut graph, &registry);

    eprintln!("VSS ontology v{}", registry.version);
    eprintln!("  Properties:  {}", properties().len());
    eprintln!("  Classes:     {}", classes().len());
    eprintln!("  Triples:     {}", graph.len());
    eprintln!("  Datatypes:   {}", registry.datatypes().count());
    eprintln!("  Units:       {}", registry.units().count());

    println!("{}", graph.serialize(Format::Turtle));
}
