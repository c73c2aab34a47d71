//! Port implementations.

mod reqwest_backend;
mod system_clock;

pub use reqwest_backend::ReqwestBackend;
pub use system_clock::SystemClock;
