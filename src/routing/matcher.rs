//! Path classification.
//!
//! Clients such as `gh` treat the proxy as a GitHub Enterprise Server, which
//! serves REST under `/api/v3` and GraphQL at `/api/graphql`. The public API
//! host serves both at its root, so those prefixes are rewritten away.
//!
//! | Inbound path     | Upstream | Rewritten path |
//! |------------------|----------|----------------|
//! | `/api/v3`        | API      | `/`            |
//! | `/api/v3/<rest>` | API      | `/<rest>`      |
//! | `/api/graphql`   | API      | `/graphql`     |
//! | anything else    | Web      | unchanged      |

use std::borrow::Cow;

use crate::routing::upstream::Upstream;

const REST_PREFIX: &str = "/api/v3";
const GRAPHQL_PATH: &str = "/api/graphql";

/// Where a path goes and what it becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    pub upstream: Upstream,
    pub path: Cow<'a, str>,
}

/// Classify a request path (without query). First match wins.
pub fn classify(path: &str) -> Classification<'_> {
    if let Some(rest) = path.strip_prefix(REST_PREFIX) {
        if rest.is_empty() || rest.starts_with('/') {
            let path = if rest.is_empty() { "/" } else { rest };
            return Classification {
                upstream: Upstream::Api,
                path: Cow::Borrowed(path),
            };
        }
    }

    if path == GRAPHQL_PATH {
        return Classification {
            upstream: Upstream::Api,
            path: Cow::Borrowed("/graphql"),
        };
    }

    Classification {
        upstream: Upstream::Web,
        path: Cow::Borrowed(path),
    }
}
