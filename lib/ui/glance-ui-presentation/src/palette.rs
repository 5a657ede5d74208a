use std::fmt::Display;

use crossterm::style::{StyledContent, Stylize};

type Style = fn(StyledContent<String>) -> StyledContent<String>;

/// Terminal colors for dashboard text. A disabled palette returns plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, text: impl Display, style: Style) -> String {
        let text = text.to_string();
        if self.enabled {
            style(text.stylize()).to_string()
        } else {
            text
        }
    }

    pub fn app(&self, text: impl Display) -> String {
        self.paint(text, |s| s.magenta().bold())
    }

    pub fn label(&self, text: impl Display) -> String {
        self.paint(text, |s| s.blue())
    }

    pub fn bold(&self, text: impl Display) -> String {
        self.paint(text, |s| s.bold())
    }

    pub fn dim(&self, text: impl Display) -> String {
        self.paint(text, |s| s.dark_grey().bold())
    }

    pub fn error(&self, text: impl Display) -> String {
        self.paint(text, |s| s.red())
    }

    pub fn command(&self, text: impl Display) -> String {
        self.paint(text, |s| s.cyan().bold())
    }

    pub fn highlight(&self, text: impl Display) -> String {
        self.paint(text, |s| s.yellow())
    }

    pub fn warning(&self, text: impl Display) -> String {
        self.paint(text, |s| s.yellow().bold())
    }
}
