//! Terminal markdown rendering for assistant replies.
//!
//! `ChatRenderer` renders complete replies through `termimad` and marks
//! degraded replies so canned text is never mistaken for model output.

use termimad::MadSkin;
use termimad::crossterm::style::Color;

/// Label printed under replies that did not come from the model.
pub const OFFLINE_TAG: &str = "offline answer";

/// Terminal markdown renderer.
pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);
        Self { skin }
    }

    /// Render a complete markdown reply.
    pub fn render(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }

    /// Print a reply with the assistant label, plus the offline tag when degraded.
    pub fn print_reply(&self, text: &str, degraded: bool) {
        println!("  {}", console::style("Coach").cyan().bold());
        let rendered = self.render(text);
        for line in rendered.trim_end().lines() {
            println!("  {line}");
        }
        if degraded {
            println!("  {}", console::style(format!("({OFFLINE_TAG})")).yellow().dim());
        }
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}
