use std::iter::once;
use tui::{
    buffer::Buffer,
    layout::Rect,
    text::{Span, Spans},
    widgets::{Block, BorderType, Borders, Widget},
};

/// A rounded bordered block that renders a key legend into its bottom
/// border, e.g. `╰╯␣ toggle╰╯s skip╰───╯`.
pub struct BlockWithLegend<'a> {
    block: Block<'a>,
    border_type: BorderType,
    legend: Vec<Spans<'a>>,
}

impl<'a> BlockWithLegend<'a> {
    pub fn title<T>(mut self, title: T) -> BlockWithLegend<'a>
    where
        T: Into<Spans<'a>>,
    {
        self.block = self.block.title(title);
        self
    }

    pub fn legend<T>(mut self, legend: Vec<T>) -> BlockWithLegend<'a>
    where
        T: Into<Spans<'a>>,
    {
        self.legend = legend.into_iter().map(|l| l.into()).collect();
        self
    }

    pub fn inner(&self, area: Rect) -> Rect {
        self.block.inner(area)
    }
}

impl<'a> Default for BlockWithLegend<'a> {
    fn default() -> BlockWithLegend<'a> {
        BlockWithLegend {
            block: Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
            border_type: BorderType::Rounded,
            legend: vec![],
        }
    }
}

impl<'a> Widget for BlockWithLegend<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 || area.width < 2 {
            return;
        }

        self.block.render(area, buf);
        let symbols = BorderType::line_symbols(self.border_type);

        let legend_y = area.y + area.height - 1;
        let mut legend_x = area.x + 1;

        for legend in self.legend.into_iter() {
            let legend: Spans = once(Span::from(symbols.bottom_right))
                .chain(legend.0.into_iter())
                .chain(once(Span::from(symbols.bottom_left)))
                .collect::<Vec<_>>()
                .into();

            let width_remaining = area.width.saturating_sub(legend_x - area.x + 1);
            let (x, _) = buf.set_spans(legend_x, legend_y, &legend, width_remaining);
            legend_x = x;
        }
    }
}
