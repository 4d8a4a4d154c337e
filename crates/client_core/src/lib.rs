//! Network-resilience core of the film client: transport, response
//! classification, session state, application flow and connectivity
//! monitoring.

pub mod classifier;
pub mod config;
pub mod error;
pub mod flow;
pub mod monitor;
pub mod session;
pub mod transport;
pub mod view;

pub use classifier::{classify, interpret};
pub use config::ClientConfig;
pub use error::{ConfigError, TransportError};
pub use flow::{AppFlow, FlowError, FlowState};
pub use monitor::{ConnectivityMonitor, MonitorHandle};
pub use session::SessionState;
pub use transport::{HttpTransport, ProbeOutcome, RawResponse, Transport};
pub use view::{render_state, FilmView};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
