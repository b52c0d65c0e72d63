//! Scripted in-memory backend.
//!
//! [`FakeSession`] simulates the HR application's login screen, dashboard
//! and sidebar filter well enough to exercise every page object and the
//! authenticated fixture without a browser. Scenario tests run against it
//! hermetically; the real backend lives behind the `browser` feature.

mod app;

pub use app::FakeSession;
