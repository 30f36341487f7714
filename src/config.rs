//! Static document configuration.
//!
//! Maps each supported document kind to its object-store key, email
//! template and content type. Built once at process start and shared
//! read-only; there is no runtime mutation path.

use std::collections::HashMap;

/// Config entry for a single document kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    /// Object-store key holding the document bytes.
    pub object_key: String,

    /// Email template used when the request is accepted.
    pub template: String,

    /// MIME type declared on the attachment (e.g. "application/pdf").
    pub content_type: String,
}

/// Immutable kind → document mapping plus workflow-wide settings.
///
/// # Examples
///
/// ```
/// use docgate::config::{DocumentConfig, DocumentEntry};
///
/// let config = DocumentConfig::new("https://docs.example.com".to_string())
///     .with_document("resume", DocumentEntry {
///         object_key: "resume.pdf".to_string(),
///         template: "document-release".to_string(),
///         content_type: "application/pdf".to_string(),
///     });
///
/// assert!(config.entry("resume").is_some());
/// assert!(config.entry("poem").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// Public base URL of this service, used to build the operator's
    /// accept/reject action links.
    pub base_url: String,

    /// Template used for rejection emails. No attachment.
    pub rejection_template: String,

    documents: HashMap<String, DocumentEntry>,
}

impl DocumentConfig {
    /// Create an empty configuration with no supported documents.
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            rejection_template: "request-rejected".to_string(),
            documents: HashMap::new(),
        }
    }

    /// Register a document kind.
    #[must_use]
    pub fn with_document(mut self, kind: impl Into<String>, entry: DocumentEntry) -> Self {
        self.documents.insert(kind.into(), entry);
        self
    }

    /// Set the rejection email template.
    #[must_use]
    pub fn with_rejection_template(mut self, template: impl Into<String>) -> Self {
        self.rejection_template = template.into();
        self
    }

    /// Look up the entry for a document kind.
    #[must_use]
    pub fn entry(&self, kind: &str) -> Option<&DocumentEntry> {
        self.documents.get(kind)
    }

    /// Whether the given kind is in the supported set.
    #[must_use]
    pub fn supports(&self, kind: &str) -> bool {
        self.documents.contains_key(kind)
    }

    /// The operator action link that accepts a request.
    #[must_use]
    pub fn accept_url(&self, request_id: &str) -> String {
        format!("{}/accept/{request_id}", self.base_url)
    }

    /// The operator action link that rejects a request.
    #[must_use]
    pub fn reject_url(&self, request_id: &str) -> String {
        format!("{}/reject/{request_id}", self.base_url)
    }
}

impl Default for DocumentConfig {
    /// A local-development configuration serving a single "resume" kind.
    fn default() -> Self {
        Self::new("http://localhost:3000".to_string()).with_document(
            "resume",
            DocumentEntry {
                object_key: "resume.pdf".to_string(),
                template: "document-release".to_string(),
                content_type: "application/pdf".to_string(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_kind() {
        let config = DocumentConfig::default();

        let entry = config.entry("resume").unwrap();
        assert_eq!(entry.object_key, "resume.pdf");
        assert_eq!(entry.content_type, "application/pdf");
        assert!(config.supports("resume"));
        assert!(!config.supports("cover-letter"));
    }

    #[test]
    fn action_urls_embed_request_id() {
        let config = DocumentConfig::new("https://docs.example.com".to_string());

        assert_eq!(
            config.accept_url("abc-123"),
            "https://docs.example.com/accept/abc-123"
        );
        assert_eq!(
            config.reject_url("abc-123"),
            "https://docs.example.com/reject/abc-123"
        );
    }
}
