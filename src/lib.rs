// Library surface for headless/integration tests and reuse.
// Terminal drawing and the CLI stay in the binary.
pub mod app_dirs;
pub mod config;
pub mod corpus;
pub mod error;
pub mod keys;
pub mod logging;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod timer;
pub mod view;
