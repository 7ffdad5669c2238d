//! Skips wiremock tests where localhost sockets cannot be bound.

use std::net::TcpListener;

use wiremock::MockServer;

const STRICT_ENV: &str = "RECOMMENDARR_REQUIRE_SOCKET_TESTS";

fn strict_mode() -> bool {
    std::env::var(STRICT_ENV).is_ok_and(|value| {
        matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
    })
}

/// Starts a mock server, or returns `None` (after a note on stderr) when the
/// sandbox forbids binding. Panics instead when `RECOMMENDARR_REQUIRE_SOCKET_TESTS` is set.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    match TcpListener::bind("127.0.0.1:0") {
        Ok(probe) => {
            drop(probe);
            Some(MockServer::start().await)
        }
        Err(error) => {
            assert!(
                !strict_mode(),
                "cannot bind a localhost socket for mock services: {error}"
            );
            eprintln!(
                "[mock-services] localhost bind failed ({error}); skipping. \
                 Set {STRICT_ENV}=1 to fail instead."
            );
            None
        }
    }
}
