//! Integration tests for vpckit.
//!
//! The VPC scenarios replay the cassettes under `tests/fixtures/` and need
//! no network access.
//!
//! # Running Tests
//!
//! ```bash
//! # Replay checked-in fixtures
//! cargo test --test integration
//!
//! # Run with log output
//! RUST_LOG=vpckit=debug cargo test --test integration -- --nocapture
//!
//! # Re-record the fixtures against the live API
//! VPCKIT_FIXTURE_MODE=record VPCKIT_TOKEN=... cargo test --test integration vpc_tests
//! ```
//!
//! # Environment Variables
//!
//! - `VPCKIT_FIXTURE_MODE`: `replay` (default) or `record`
//! - `VPCKIT_FIXTURES_DIR`: cassette directory (default: `tests/fixtures`)
//! - `VPCKIT_API_URL`: API URL used when recording
//! - `VPCKIT_TOKEN`: API token used when recording

mod common;
mod fixture_tests;
mod vpc_tests;
