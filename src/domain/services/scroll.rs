#[cfg(test)]
#[path = "scroll_test.rs"]
mod tests;

use ratatui::widgets::ScrollbarState;

/// Top border and bottom border of the results block.
const BORDER_ROWS: u16 = 2;

/// Vertical offset into the results panel.
#[derive(Default)]
pub struct Scroll {
    content_length: u16,
    viewport_length: u16,
    pub position: u16,
    pub scrollbar_state: ScrollbarState,
}

impl Scroll {
    fn max_position(&self) -> u16 {
        let visible_rows = self.viewport_length.saturating_sub(BORDER_ROWS);
        return self.content_length.saturating_sub(visible_rows);
    }

    fn page_length(&self) -> u16 {
        return self.viewport_length.saturating_sub(BORDER_ROWS).max(1);
    }

    fn move_to(&mut self, position: u16) {
        self.position = position.min(self.max_position());
        self.scrollbar_state = self.scrollbar_state.position(self.position);
    }

    pub fn up(&mut self) {
        self.move_to(self.position.saturating_sub(1));
    }

    pub fn up_page(&mut self) {
        self.move_to(self.position.saturating_sub(self.page_length()));
    }

    pub fn down(&mut self) {
        self.move_to(self.position.saturating_add(1));
    }

    pub fn down_page(&mut self) {
        self.move_to(self.position.saturating_add(self.page_length()));
    }

    /// Back to the top, used whenever the visible panel is replaced.
    pub fn reset(&mut self) {
        self.move_to(0);
    }

    pub fn set_state(&mut self, content_length: u16, viewport_length: u16) {
        self.content_length = content_length;
        self.viewport_length = viewport_length;
        self.scrollbar_state = self
            .scrollbar_state
            .content_length(content_length)
            .viewport_content_length(viewport_length);

        // Shrinking panels must not leave the offset past the end.
        self.move_to(self.position);
    }
}
