//! Ontology document loading from the network or local storage.

use crate::error::LoadError;
use crate::ontology::Ontology;
use oxhttp::model::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use oxhttp::model::Request;
use oxhttp::Client;
use oxrdf::{Graph, NamedNode, Triple};
use oxrdfio::{RdfFormat, RdfParser};
use std::fs::File;
use std::io::{BufReader, Error, ErrorKind, Read};
use std::path::Path;
use std::time::Duration;

/// A resolvable location of the Gene Ontology in OWL format.
pub const DEFAULT_ONTOLOGY_URL: &str = "http://www.berkeleybop.org/ontologies/go.owl";

/// The conventional local copy of the Gene Ontology.
pub const DEFAULT_ONTOLOGY_PATH: &str = "data/go.owl";

const ACCEPT_RDF: &str = "application/rdf+xml, text/turtle;q=0.9, application/n-triples;q=0.8";

/// HTTP knobs of the loader. Defaults: no timeout, 5 redirections.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Global timeout applied to the fetch (`None` = unbounded).
    pub timeout: Option<Duration>,
    /// Maximum number of HTTP redirections to follow.
    pub redirection_limit: usize,
    /// The User-Agent header value sent with fetches.
    pub user_agent: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            redirection_limit: 5,
            user_agent: concat!("oxclass/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// Loads ontology documents and extracts their class-level view.
///
/// There is no ambient default source: callers pass the location explicitly,
/// typically [`DEFAULT_ONTOLOGY_URL`] or [`DEFAULT_ONTOLOGY_PATH`].
#[derive(Debug, Clone, Default)]
pub struct OntologyLoader {
    config: LoaderConfig,
}

impl OntologyLoader {
    /// Creates a loader with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader with a custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Fetches and parses an ontology document from a resolvable URL.
    ///
    /// The serialization is taken from the response Content-Type when the
    /// server declares a known one, from the URL extension otherwise, with
    /// RDF/XML as the final fallback (`.owl` documents are RDF/XML). The
    /// requested URL is recorded as the document location of the result.
    pub fn load_from_web(&self, url: &str) -> Result<Ontology, LoadError> {
        // Reject non-IRI locations before going to the network.
        NamedNode::new(url)?;

        let mut client = Client::new().with_redirection_limit(self.config.redirection_limit);
        if let Some(timeout) = self.config.timeout {
            client = client.with_global_timeout(timeout);
        }

        let request = Request::builder()
            .uri(url)
            .header(ACCEPT, ACCEPT_RDF)
            .header(USER_AGENT, self.config.user_agent.as_str())
            .body(())
            .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;
        let response = client.request(request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let format = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(RdfFormat::from_media_type)
            .or_else(|| extension_format(url))
            .unwrap_or(RdfFormat::RdfXml);

        let mut ontology = self.parse(format, response.into_body(), Some(url))?;
        ontology.set_document_location(url.to_owned());
        Ok(ontology)
    }

    /// Parses an ontology document from local storage.
    ///
    /// The serialization is taken from the file extension; an extension not
    /// naming a known RDF serialization is an error.
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Result<Ontology, LoadError> {
        let path = path.as_ref();
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|e| match e {
                "owl" | "rdf" | "xml" => Some(RdfFormat::RdfXml),
                other => RdfFormat::from_extension(other),
            })
            .ok_or_else(|| LoadError::UnsupportedFormat(path.display().to_string()))?;

        let file = BufReader::new(File::open(path)?);
        let mut ontology = self.parse(format, file, None)?;
        ontology.set_document_location(path.display().to_string());
        Ok(ontology)
    }

    /// Parses an ontology document from any reader, in the given format.
    pub fn load_from_reader(
        &self,
        format: RdfFormat,
        reader: impl Read,
    ) -> Result<Ontology, LoadError> {
        self.parse(format, reader, None)
    }

    fn parse(
        &self,
        format: RdfFormat,
        reader: impl Read,
        base_iri: Option<&str>,
    ) -> Result<Ontology, LoadError> {
        let mut parser = RdfParser::from_format(format);
        if let Some(base_iri) = base_iri {
            parser = parser.with_base_iri(base_iri)?;
        }

        let mut graph = Graph::new();
        for quad in parser.for_reader(reader) {
            let quad = quad?;
            let triple = Triple::new(quad.subject, quad.predicate, quad.object);
            graph.insert(triple.as_ref());
        }
        Ok(Ontology::from_graph(&graph))
    }
}

fn extension_format(url: &str) -> Option<RdfFormat> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.rsplit('.').next() {
        Some("owl" | "rdf" | "xml") => Some(RdfFormat::RdfXml),
        Some(extension) => RdfFormat::from_extension(extension),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::NamedNode;

    const ANIMALS_TTL: &str = r#"
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        <http://example.org/Animal> a owl:Class ; rdfs:label "Animal" .
        <http://example.org/Dog> a owl:Class ;
            rdfs:subClassOf <http://example.org/Animal> ;
            rdfs:label "Dog" .
    "#;

    const ANIMALS_RDFXML: &str = r#"<?xml version="1.0"?>
        <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                 xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
                 xmlns:owl="http://www.w3.org/2002/07/owl#">
          <owl:Ontology rdf:about="http://example.org/animals"/>
          <owl:Class rdf:about="http://example.org/Animal">
            <rdfs:label>Animal</rdfs:label>
          </owl:Class>
          <owl:Class rdf:about="http://example.org/Dog">
            <rdfs:subClassOf rdf:resource="http://example.org/Animal"/>
            <rdfs:label>Dog</rdfs:label>
          </owl:Class>
        </rdf:RDF>
    "#;

    #[test]
    fn parses_turtle() {
        let ontology = OntologyLoader::new()
            .load_from_reader(RdfFormat::Turtle, ANIMALS_TTL.as_bytes())
            .unwrap();
        assert_eq!(ontology.class_count(), 2);
        let dog = NamedNode::new("http://example.org/Dog").unwrap();
        assert_eq!(ontology.label_of(&dog), Some("Dog"));
    }

    #[test]
    fn parses_rdf_xml_with_ontology_header() {
        let ontology = OntologyLoader::new()
            .load_from_reader(RdfFormat::RdfXml, ANIMALS_RDFXML.as_bytes())
            .unwrap();
        assert_eq!(
            ontology.iri(),
            Some(&NamedNode::new("http://example.org/animals").unwrap())
        );
        assert_eq!(ontology.class_count(), 2);
    }

    #[test]
    fn malformed_document_is_a_load_error() {
        let result = OntologyLoader::new()
            .load_from_reader(RdfFormat::Turtle, &b"<unterminated"[..]);
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let result = OntologyLoader::new().load_from_file("no/such/file.owl");
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let result = OntologyLoader::new().load_from_file("go.obo");
        assert!(matches!(result, Err(LoadError::UnsupportedFormat(_))));
    }

    #[test]
    fn owl_extension_maps_to_rdf_xml() {
        assert_eq!(
            extension_format("http://www.berkeleybop.org/ontologies/go.owl"),
            Some(RdfFormat::RdfXml)
        );
        assert_eq!(extension_format("http://example.org/data.ttl"), Some(RdfFormat::Turtle));
        assert_eq!(extension_format("http://example.org/data"), None);
    }
}
