//! Error kind enumeration for categorizing client and harness errors.

/// Categorization of errors.
///
/// This enum provides a stable interface for matching on error types. The
/// API-facing kinds mirror HTTP status classes; [`ErrorKind::Fixture`] and
/// [`ErrorKind::Configuration`] come from the test infrastructure itself.
///
/// | ErrorKind         | HTTP  | Typical cause                         |
/// |-------------------|-------|---------------------------------------|
/// | `InvalidArgument` | 400   | Bad label, overlapping subnet range   |
/// | `Unauthorized`    | 401   | Missing or expired token              |
/// | `Forbidden`       | 403   | Token lacks the VPC scope             |
/// | `NotFound`        | 404   | VPC already deleted                   |
/// | `Conflict`        | 409   | Label already in use                  |
/// | `RateLimited`     | 429   | Too many requests                     |
/// | `Internal`        | 5xx   | Server-side failure                   |
/// | `Transport`       | other | Redirects, unlisted 4xx, I/O failures |
/// | `Fixture`         | -     | No recorded interaction for a request |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Authentication failed (invalid or expired token).
    ///
    /// HTTP: 401 Unauthorized
    #[error("unauthorized")]
    Unauthorized,

    /// The token is valid but lacks the required grants.
    ///
    /// HTTP: 403 Forbidden
    #[error("forbidden")]
    Forbidden,

    /// Requested resource was not found.
    ///
    /// HTTP: 404 Not Found
    #[error("not found")]
    NotFound,

    /// Invalid request argument or payload.
    ///
    /// HTTP: 400 Bad Request
    #[error("invalid argument")]
    InvalidArgument,

    /// Conflict with existing resource state.
    ///
    /// HTTP: 409 Conflict
    #[error("conflict")]
    Conflict,

    /// Rate limit exceeded.
    ///
    /// HTTP: 429 Too Many Requests
    #[error("rate limited")]
    RateLimited,

    /// Request timed out on the client side.
    #[error("timeout")]
    Timeout,

    /// Server-side failure.
    ///
    /// HTTP: any 5xx
    #[error("internal error")]
    Internal,

    /// Connection error (DNS, TLS handshake, network unreachable).
    #[error("connection error")]
    Connection,

    /// Configuration error (invalid URL, missing token, unknown fixture mode).
    #[error("configuration error")]
    Configuration,

    /// Transport failure, or an HTTP status without a more specific kind.
    #[error("transport error")]
    Transport,

    /// Response could not be parsed or was malformed.
    #[error("invalid response")]
    InvalidResponse,

    /// A recorded fixture is missing, unreadable, or has no interaction
    /// matching the request being replayed.
    #[error("fixture error")]
    Fixture,
}

impl ErrorKind {
    /// Creates an `ErrorKind` from an HTTP status code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::InvalidArgument,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            429 => ErrorKind::RateLimited,
            500..=599 => ErrorKind::Internal,
            _ => ErrorKind::Transport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(400, ErrorKind::InvalidArgument ; "bad request")]
    #[test_case(401, ErrorKind::Unauthorized ; "unauthorized")]
    #[test_case(403, ErrorKind::Forbidden ; "forbidden")]
    #[test_case(404, ErrorKind::NotFound ; "not found")]
    #[test_case(409, ErrorKind::Conflict ; "conflict")]
    #[test_case(429, ErrorKind::RateLimited ; "rate limited")]
    #[test_case(500, ErrorKind::Internal ; "server error")]
    #[test_case(502, ErrorKind::Internal ; "bad gateway")]
    #[test_case(503, ErrorKind::Internal ; "service unavailable")]
    #[test_case(504, ErrorKind::Internal ; "gateway timeout")]
    #[test_case(418, ErrorKind::Transport ; "unlisted 4xx")]
    #[test_case(422, ErrorKind::Transport ; "unprocessable")]
    #[test_case(301, ErrorKind::Transport ; "redirect")]
    #[test_case(600, ErrorKind::Transport ; "out of range")]
    fn test_from_http_status(status: u16, expected: ErrorKind) {
        assert_eq!(ErrorKind::from_http_status(status), expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorKind::NotFound.to_string(), "not found");
        assert_eq!(ErrorKind::Fixture.to_string(), "fixture error");
        assert_eq!(ErrorKind::InvalidResponse.to_string(), "invalid response");
    }
}
