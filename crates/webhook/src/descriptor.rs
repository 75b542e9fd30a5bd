//! Component descriptors
//!
//! A descriptor is an opaque URI-style string configuring one component
//! instance. The scheme selects the implementation; query parameters (and,
//! where a dispatcher targets a URL, the rest of the URI) carry
//! implementation-specific settings.
//!
//! ```text
//! github://?secret=s33kret
//! log://
//! https://example.com/hook
//! ```

use thiserror::Error;
use url::Url;

#[cfg(test)]
#[path = "descriptor_test.rs"]
mod tests;

/// Errors that can occur when parsing a descriptor
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// The descriptor string is not a valid URI
    #[error("invalid component descriptor '{descriptor}': {source}")]
    Invalid {
        /// The offending descriptor string
        descriptor: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },
}

/// Parsed component configuration descriptor
///
/// Immutable once parsed. The descriptor does not validate
/// implementation-specific parameters - that is the constructing factory's
/// job.
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    url: Url,
}

impl ComponentDescriptor {
    /// Parse a descriptor from its string form
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::Invalid`] if the string is not a URI
    /// with a scheme.
    pub fn parse(descriptor: &str) -> Result<Self, DescriptorError> {
        let url = Url::parse(descriptor).map_err(|source| DescriptorError::Invalid {
            descriptor: descriptor.to_string(),
            source,
        })?;

        Ok(Self { url })
    }

    /// The scheme identifying which implementation to build
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Look up a query parameter by name
    ///
    /// Returns the first occurrence if the parameter is repeated.
    pub fn param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// The full parsed URI
    ///
    /// Dispatchers that target a URL (e.g. `https://example.com/hook`)
    /// read their destination from here.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The descriptor in string form
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl std::fmt::Display for ComponentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.url.fmt(f)
    }
}

impl std::str::FromStr for ComponentDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
