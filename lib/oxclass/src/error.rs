//! Error types for ontology loading and classification.

use oxrdfio::RdfParseError;
use std::io;

/// An error raised while fetching or parsing an ontology document.
///
/// Label resolution failures are not errors: lookups on a loaded ontology
/// return `None` or an empty collection and callers are expected to check.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// I/O error while reading the document (file not found...).
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The document is not valid RDF.
    #[error(transparent)]
    Parse(#[from] RdfParseError),
    /// The remote server did not return the document.
    #[error("HTTP status {status} returned by {url}")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// The requested URL.
        url: String,
    },
    /// No RDF serialization could be determined for the document.
    #[error("unable to determine the RDF format of {0}")]
    UnsupportedFormat(String),
    /// The document location is not a valid IRI.
    #[error(transparent)]
    InvalidIri(#[from] oxiri::IriParseError),
}

/// An error raised while classifying an ontology.
#[derive(Debug, thiserror::Error)]
pub enum ReasonerError {
    /// The hierarchy closure did not converge within the configured bound.
    #[error("hierarchy closure exceeded {0} iterations")]
    IterationLimit(usize),
}
