use crate::event::InputMode;
use crate::interval::DraftField;
use crate::notification::Permission;
use crate::tui::widgets::BlockWithLegend;
use crate::tui::DisplayData;
use itertools::intersperse;
use std::io;
use tui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;

fn split_initial(str: &str) -> (&str, &str) {
    let mut graphemes = str.graphemes(true);

    let initial = graphemes.next().unwrap_or("");
    let remainder = graphemes.as_str();

    (initial, remainder)
}

fn define_block<'a>(title: &'a str, legend: Vec<&'a str>) -> BlockWithLegend<'a> {
    let (initial, remainder) = split_initial(title);

    let text_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let initials_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);

    let title = Spans::from(vec![
        Span::styled(initial, initials_style),
        Span::styled(remainder, text_style),
    ]);

    let legend = legend
        .into_iter()
        .map(|s| {
            let (initial, remainder) = split_initial(s);

            Spans::from(vec![
                Span::styled(initial, initials_style),
                Span::styled(remainder, text_style),
            ])
        })
        .collect();

    BlockWithLegend::default().title(title).legend(legend)
}

pub fn render_ui(frame: &mut Frame<CrosstermBackend<io::Stdout>>, display: &DisplayData) {
    let editing = display.mode != InputMode::Normal;

    let mut constraints = vec![Constraint::Length(7), Constraint::Min(4)];
    if editing {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.size());

    render_timer(frame, display, chunks[0]);
    render_exercises(frame, display, chunks[1]);
    if editing {
        render_editor(frame, display, chunks[2]);
    }
    render_status(frame, display, chunks[chunks.len() - 1]);
}

fn render_timer(frame: &mut Frame<CrosstermBackend<io::Stdout>>, display: &DisplayData, area: Rect) {
    let mut legend = vec!["␣ toggle"];
    if !display.is_paused {
        legend.push("s skip");
    }
    if display.permission != Permission::Granted {
        legend.push("n notifications");
    }
    legend.push("w save");
    legend.push("q quit");

    let block = define_block("timer", legend);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let current = display
        .current_exercise
        .as_deref()
        .unwrap_or("no exercise selected");

    let text = vec![
        Spans::from(Span::styled(
            current,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Spans::from(display.timer_text.as_str()),
        Spans::from(format!(
            "interval {} {}",
            display.interval_text,
            if display.is_paused { "⏵" } else { "⏸" }
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, vertically_centered(inner, 3));
}

fn render_exercises(
    frame: &mut Frame<CrosstermBackend<io::Stdout>>,
    display: &DisplayData,
    area: Rect,
) {
    let block = define_block("exercises", vec!["a add", "d delete", "↕ select", "i interval"]);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if display.exercises.is_empty() {
        let empty = Paragraph::new("no exercises added yet")
            .style(Style::default().add_modifier(Modifier::ITALIC));
        frame.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = display
        .exercises
        .iter()
        .map(|exercise| ListItem::new(exercise.as_str()))
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(display.cursor);

    frame.render_stateful_widget(list, inner, &mut state);
}

fn render_editor(frame: &mut Frame<CrosstermBackend<io::Stdout>>, display: &DisplayData, area: Rect) {
    match display.mode {
        InputMode::Adding => render_add_input(frame, display, area),
        InputMode::EditingInterval => render_interval_form(frame, display, area),
        InputMode::Normal => (),
    }
}

fn render_add_input(
    frame: &mut Frame<CrosstermBackend<io::Stdout>>,
    display: &DisplayData,
    area: Rect,
) {
    let block = define_block("new exercise", vec!["↵ add", "esc cancel"]);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = Spans::from(vec![
        Span::raw(display.input_buffer.as_str()),
        Span::styled("█", Style::default().fg(Color::Red)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_interval_form(
    frame: &mut Frame<CrosstermBackend<io::Stdout>>,
    display: &DisplayData,
    area: Rect,
) {
    let block = define_block("interval", vec!["⇥ field", "↵ apply", "esc cancel"]);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let field_span = |field: DraftField, unit: &str| {
        let buffer = display.draft.field(field);
        let text = format!(" {:>2}{} ", if buffer.is_empty() { "0" } else { buffer }, unit);
        let style = if display.focus == field {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        Span::styled(text, style)
    };

    let fields = [
        field_span(DraftField::Hours, "h"),
        field_span(DraftField::Minutes, "m"),
        field_span(DraftField::Seconds, "s"),
    ];

    let line: Spans = intersperse(fields.into_iter(), Span::raw(":"))
        .collect::<Vec<_>>()
        .into();

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), inner);
}

fn render_status(frame: &mut Frame<CrosstermBackend<io::Stdout>>, display: &DisplayData, area: Rect) {
    let mut spans = vec![Span::styled(
        format!("notifications: {}", display.permission),
        Style::default().fg(Color::DarkGray),
    )];

    if let Some(message) = &display.status_message {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Spans::from(spans)), area);
}

fn vertically_centered(area: Rect, height: u16) -> Rect {
    let top_padding = (area.height.saturating_sub(height)) / 2;

    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(top_padding), Constraint::Min(height)])
        .split(area)[1]
}
