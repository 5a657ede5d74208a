//! Favorite-app dashboard: the workspace crates under one name.

pub use glance_adapter_http as http;
pub use glance_application as application;
pub use glance_domain as domain;
pub use glance_ports as ports;
pub use glance_ui_presentation as presentation;

#[cfg(feature = "cli")]
pub use glance_ui_terminal as terminal;
