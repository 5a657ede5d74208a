//! Text rendering of a dashboard for the terminal.
//!
//! # Examples
//! ```rust
//! use chrono::Utc;
//! use glance_domain::Dashboard;
//! use glance_ui_presentation::{RenderOptions, render, render_notice};
//!
//! let options = RenderOptions::new(Utc::now()).with_color(false);
//! let text = render(&Dashboard::default(), &options);
//! assert!(text.contains("heroku help"));
//! assert!(render_notice(&Dashboard::default(), &options).is_some());
//! ```

mod palette;
mod render;
mod sparkline;
mod time;

pub use palette::Palette;
pub use render::{RenderOptions, render, render_notice};
pub use sparkline::sparkline;
pub use time::format_release;
