// src/normalize/canonical.rs
// =============================================================================
// Canonical URL form.
//
// Pipeline (order matters):
// 1. Percent-decode the whole input, so an encoded '?', '=' or '&' in the
//    path becomes a real query before parsing
// 2. Parse with the `url` crate
// 3. Lowercase scheme and host
// 4. Drop the port, whatever it is
// 5. Drop the fragment
// 6. Resolve '.' and '..' path segments
// 7. Sort query pairs by key (stable, so repeated keys keep their order)
// 8. Serialize and percent-decode once more for readable output
//
// Example:
//   HTTP://Dev.Test:8080/a/../b%3Fz%3D1%26y%3D2#top -> http://dev.test/b?y=2&z=1
// =============================================================================

use thiserror::Error;
use url::Url;

use super::dots::resolve_dot_segments;

/// Why a URL could not be normalized.
///
/// Any of these means "do not crawl this URL".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("'{input}' does not percent-decode to valid UTF-8")]
    Decode { input: String },

    #[error("cannot parse '{input}': {source}")]
    Parse {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

// Normalizes a URL into its canonical string form
//
// Returns Err for anything the url crate refuses to parse (including
// relative references like "/docs" or "about.html").
pub fn normalize_url(input: &str) -> Result<String, NormalizeError> {
    let decoded = decode(input, input)?;

    let mut url = Url::parse(&decoded).map_err(|source| parse_error(input, source))?;

    // The parser already lowercases the scheme, and the host of http(s)
    // URLs. Hosts of other schemes are kept verbatim, so fold them here.
    if let Some(host) = url.host_str() {
        if host.chars().any(|c| c.is_ascii_uppercase()) {
            let lowered = host.to_ascii_lowercase();
            url.set_host(Some(lowered.as_str()))
                .map_err(|source| parse_error(input, source))?;
        }
    }

    // Only URLs that can carry a port ever have one, so clearing it holds
    if url.port().is_some() {
        url.set_port(None)
            .map_err(|()| parse_error(input, url::ParseError::InvalidPort))?;
    }

    url.set_fragment(None);

    // Opaque paths (mailto:, javascript:) have no segments to resolve
    if !url.cannot_be_a_base() {
        let resolved = resolve_dot_segments(url.path());
        url.set_path(&resolved);
    }

    if url.query().is_some() {
        let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }
    }

    decode(url.as_str(), input)
}

fn decode(text: &str, input: &str) -> Result<String, NormalizeError> {
    urlencoding::decode(text)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| NormalizeError::Decode {
            input: input.to_string(),
        })
}

fn parse_error(input: &str, source: url::ParseError) -> NormalizeError {
    NormalizeError::Parse {
        input: input.to_string(),
        source,
    }
}
