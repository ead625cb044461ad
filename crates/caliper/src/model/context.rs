//! JSON-LD context identifiers.

use std::fmt;

/// IRI of the Caliper 1.1 JSON-LD context.
pub const CONTEXT_V1P1: &str = "http://purl.imsglobal.org/ctx/caliper/v1p1";

/// IRI of the Caliper 1.2 JSON-LD context.
pub const CONTEXT_V1P2: &str = "http://purl.imsglobal.org/ctx/caliper/v1p2";

/// The `@context` of a document.
///
/// The core never interprets the context; it is carried through to the
/// serialized output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum JsonldContext {
    V1p1,
    #[default]
    V1p2,
    /// A negotiated context IRI.
    Custom(String),
}

impl JsonldContext {
    /// Returns the context IRI.
    pub fn iri(&self) -> &str {
        match self {
            JsonldContext::V1p1 => CONTEXT_V1P1,
            JsonldContext::V1p2 => CONTEXT_V1P2,
            JsonldContext::Custom(iri) => iri,
        }
    }

    /// Maps a context IRI to a known version, or `Custom`.
    pub fn from_iri(iri: impl Into<String>) -> Self {
        let iri = iri.into();
        match iri.as_str() {
            CONTEXT_V1P1 => JsonldContext::V1p1,
            CONTEXT_V1P2 => JsonldContext::V1p2,
            _ => JsonldContext::Custom(iri),
        }
    }
}

impl fmt::Display for JsonldContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.iri())
    }
}
