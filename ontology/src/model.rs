//! Core ontology model types.
//!
//! A [`Graph`] is an insertion-ordered set of [`Triple`]s plus the prefix
//! bindings used when rendering compact identifiers. The bootstrap schema is
//! described declaratively with [`Class`] and [`Property`] records.

use std::collections::HashSet;

use crate::serializer::{self, Format};
use crate::vocab::Concept;

/// The object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// An IRI reference.
    Iri(String),
    /// A plain string literal.
    Plain(String),
    /// A language-tagged string literal.
    LangString {
        /// Lexical form.
        value: String,
        /// BCP 47 language tag.
        lang: String,
    },
    /// A literal with an explicit datatype IRI.
    Typed {
        /// Lexical form.
        value: String,
        /// Full datatype IRI.
        datatype: String,
    },
}

impl Term {
    /// An IRI object.
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// An `@en` literal.
    pub fn en(value: impl Into<String>) -> Self {
        Term::LangString {
            value: value.into(),
            lang: "en".to_owned(),
        }
    }

    /// A typed literal.
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Typed {
            value: value.into(),
            datatype: datatype.into(),
        }
    }

    /// Returns the IRI if this term is one.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

/// A (subject, predicate, object) statement. Subjects and predicates are IRIs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject IRI.
    pub subject: String,
    /// Predicate IRI.
    pub predicate: String,
    /// Object term.
    pub object: Term,
}

/// An in-memory triple set that remembers insertion order.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
    prefixes: Vec<(String, String)>,
}

impl Graph {
    /// Creates an empty graph with no prefix bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a triple. Returns false if it was already present.
    pub fn add(
        &mut self,
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: Term,
    ) -> bool {
        let triple = Triple {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        };
        if self.seen.contains(&triple) {
            return false;
        }
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    /// Binds `prefix` to `namespace`, replacing an earlier binding of the same prefix.
    pub fn bind(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        let prefix = prefix.into();
        let namespace = namespace.into();
        match self.prefixes.iter_mut().find(|(p, _)| *p == prefix) {
            Some(binding) => binding.1 = namespace,
            None => self.prefixes.push((prefix, namespace)),
        }
    }

    /// Prefix bindings in binding order.
    #[must_use]
    pub fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }

    /// Number of distinct triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns true if the graph holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterates triples in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Triple> {
        self.triples.iter()
    }

    /// Returns true if the exact triple is present.
    #[must_use]
    pub fn contains(&self, subject: &str, predicate: &str, object: &Term) -> bool {
        self.seen.contains(&Triple {
            subject: subject.to_owned(),
            predicate: predicate.to_owned(),
            object: object.clone(),
        })
    }

    /// Objects of all triples matching `(subject, predicate, _)`.
    pub fn objects<'g, 'q>(
        &'g self,
        subject: &'q str,
        predicate: &'q str,
    ) -> impl Iterator<Item = &'g Term> + 'q
    where
        'g: 'q,
    {
        self.triples
            .iter()
            .filter(move |t| t.subject == subject && t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Subjects of all triples matching `(_, predicate, object)`.
    pub fn subjects<'g, 'q>(
        &'g self,
        predicate: &'q str,
        object: &'q Term,
    ) -> impl Iterator<Item = &'g str> + 'q
    where
        'g: 'q,
    {
        self.triples
            .iter()
            .filter(move |t| t.predicate == predicate && t.object == *object)
            .map(|t| t.subject.as_str())
    }

    /// Renders the graph in the requested textual format.
    #[must_use]
    pub fn serialize(&self, format: Format) -> String {
        match format {
            Format::Turtle => serializer::turtle::to_turtle(self),
            Format::NTriples => serializer::ntriples::to_ntriples(self),
        }
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Whether a property is a datatype or an object property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// `owl:DatatypeProperty`, relates a resource to a literal.
    Datatype,
    /// `owl:ObjectProperty`, relates two resources.
    Object,
}

/// A reference to a class or datatype used as a domain, range or superclass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ref {
    /// A term of the VSS ontology itself.
    Concept(Concept),
    /// A full IRI from a standard vocabulary.
    Iri(&'static str),
    /// A local name in the unit namespace.
    Unit(&'static str),
}

/// An OWL class declared by the bootstrap.
#[derive(Debug, Clone)]
pub struct Class {
    /// The class term.
    pub concept: Concept,
    /// Parent class (`rdfs:subClassOf`), if any.
    pub subclass_of: Option<Ref>,
}

/// An OWL property declared by the bootstrap.
#[derive(Debug, Clone)]
pub struct Property {
    /// The property term.
    pub concept: Concept,
    /// Datatype or object property.
    pub kind: PropertyKind,
    /// Domain class.
    pub domain: Ref,
    /// Range class or datatype.
    pub range: Ref,
}

/// Standard IRI constants.
pub mod iris {
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// SKOS namespace.
    pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
    /// schema.org namespace.
    pub const SCHEMA: &str = "https://schema.org/";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdfs:label`.
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    /// `rdfs:comment`.
    pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    /// `rdfs:subClassOf`.
    pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    /// `rdfs:subPropertyOf`.
    pub const RDFS_SUBPROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
    /// `rdfs:domain`.
    pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    /// `rdfs:range`.
    pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
    /// `rdfs:Datatype`.
    pub const RDFS_DATATYPE: &str = "http://www.w3.org/2000/01/rdf-schema#Datatype";
    /// `skos:altLabel`.
    pub const SKOS_ALT_LABEL: &str = "http://www.w3.org/2004/02/skos/core#altLabel";

    /// `owl:Ontology`.
    pub const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
    /// `owl:Class`.
    pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    /// `owl:ObjectProperty`.
    pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    /// `owl:DatatypeProperty`.
    pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    /// `owl:topObjectProperty`.
    pub const OWL_TOP_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#topObjectProperty";
    /// `owl:topDataProperty`.
    pub const OWL_TOP_DATA_PROPERTY: &str = "http://www.w3.org/2002/07/owl#topDataProperty";
    /// `owl:versionInfo`.
    pub const OWL_VERSION_INFO: &str = "http://www.w3.org/2002/07/owl#versionInfo";
    /// `owl:imports`.
    pub const OWL_IMPORTS: &str = "http://www.w3.org/2002/07/owl#imports";

    /// `xsd:string`.
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    /// `xsd:double`.
    pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    /// `xsd:int`.
    pub const XSD_INT: &str = "http://www.w3.org/2001/XMLSchema#int";
}
