use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::Text,
    widgets::{Block, Clear, Paragraph, Widget},
};

/// A bordered box of text drawn centered over whatever is beneath it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Popup<'a> {
    title: String,
    text: Text<'a>,
    style: Style,
}

impl<'a> Popup<'a> {
    pub(crate) fn new(title: String, text: Text<'a>, style: Style) -> Self {
        Popup { title, text, style }
    }
}

impl Widget for Popup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(self.text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(self.text)
            .block(
                Block::bordered()
                    .title(self.title)
                    .title_alignment(Alignment::Center),
            )
            .style(self.style);
        let [popup_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [popup_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(popup_area);
        // Leave a one-column gap on either side so that the border doesn't
        // run straight into the calendar
        let outer_area = Rect {
            x: popup_area.x.saturating_sub(1),
            y: popup_area.y,
            width: popup_area.width.saturating_add(2),
            height: popup_area.height,
        }
        .intersection(area);
        Clear.render(outer_area, buf);
        Block::new().style(self.style).render(outer_area, buf);
        para.render(popup_area, buf);
    }
}
