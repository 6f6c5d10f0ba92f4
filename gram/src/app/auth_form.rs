use crossterm::event::{Event, KeyCode, KeyEvent};
use gram_core::{Fields, Form};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

/// The terminal side of a form: which field has focus and the text inputs
/// (with their cursors.) Values and errors live in the `Form` this draws.
#[derive(Debug)]
pub struct AuthForm<F> {
    /// Which field we're editing
    active: F,

    /// One input per field, indexed by `Fields::index`
    inputs: Vec<Input>,
}

/// What a keypress meant to the form
#[derive(Debug, PartialEq, Eq)]
pub enum FormEvent<F> {
    /// Focus moved to this field
    Focused(F),

    /// This field has a new value
    Changed(F, String),

    /// The user wants to submit
    Submit,

    /// Nothing the form cares about (cursor movement and so on)
    Ignored,
}

/// Everything about a form's screen that isn't fields.
pub struct Chrome<'a> {
    pub title: &'a str,
    pub submit_label: &'a str,
    pub submit_enabled: bool,

    /// Shown along the bottom border, e.g. how to get to the other screen
    pub hint: &'a str,
}

impl<F: Fields> AuthForm<F> {
    /// Set up inputs from whatever is already in the form (so prefilled
    /// values show up.)
    pub fn new(form: &Form<F>) -> Self {
        Self {
            active: F::first(),
            inputs: F::ALL
                .iter()
                .map(|field| Input::new(form.value(*field).to_owned()))
                .collect(),
        }
    }

    pub fn active(&self) -> F {
        self.active
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent<F> {
        match key.code {
            KeyCode::Tab => {
                self.active = self.active.next();
                FormEvent::Focused(self.active)
            }
            KeyCode::BackTab => {
                self.active = self.active.prev();
                FormEvent::Focused(self.active)
            }
            KeyCode::Enter => FormEvent::Submit,
            _ => {
                let input = &mut self.inputs[self.active.index()];

                match input.handle_event(&Event::Key(key)) {
                    Some(changed) if changed.value => {
                        FormEvent::Changed(self.active, input.value().to_owned())
                    }
                    _ => FormEvent::Ignored,
                }
            }
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn render(
        &self,
        form: &Form<F>,
        chrome: &Chrome<'_>,
        body_area: Rect,
        frame: &mut Frame<'_>,
    ) {
        // each field is a bordered input plus a line for its error, then the
        // submit button and a line for the server error
        let mut lengths: Vec<u16> = Vec::with_capacity(F::ALL.len() * 2 + 2);
        for _ in F::ALL {
            lengths.extend([3, 1]);
        }
        lengths.extend([3, 1]);

        let height = lengths.iter().sum::<u16>() + 2; // +2 for the border

        let popup_vert = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

        let [popup_area] = popup_vert.areas(body_area);
        let [popup_area] = popup_horiz.areas(popup_area);
        frame.render_widget(Clear, popup_area);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(chrome.title)
            .title_bottom(chrome.hint)
            .border_style(Style::default().fg(Color::Blue));
        let inner = outer.inner(popup_area);
        frame.render_widget(outer, popup_area);

        let rows = Layout::vertical(Constraint::from_lengths(lengths)).split(inner);

        for field in F::ALL {
            let input = &self.inputs[field.index()];
            let input_area = rows[field.index() * 2];
            let error_area = rows[field.index() * 2 + 1];

            let width = input_area.width.saturating_sub(2 + 1); // -2 for the border, -1 for the cursor
            let (shown, input_scroll, cursor) = visible(input, field.masked(), width as usize);

            let error = form.error(*field);
            let is_active = *field == self.active;

            let border_style = match (error, is_active) {
                (Some(_), _) => Style::default().fg(Color::Red),
                (None, true) => Style::default().fg(Color::Cyan),
                (None, false) => Style::default().fg(Color::Blue),
            };

            let input_field = Paragraph::new(shown)
                .scroll((0, input_scroll as u16))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(field.label())
                        .border_style(border_style),
                );
            frame.render_widget(input_field, input_area);

            if let Some(message) = error {
                frame.render_widget(
                    Paragraph::new(message).style(Style::default().fg(Color::Red)),
                    error_area,
                );
            }

            if is_active {
                frame.set_cursor_position((
                    input_area.x
                        + (cursor.max(input_scroll) - input_scroll) as u16 // current end of text
                        + 1, // just past the end of the text
                    input_area.y + 1, // +1 row for the border/title
                ));
            }
        }

        let button_area = rows[F::ALL.len() * 2];
        let server_area = rows[F::ALL.len() * 2 + 1];

        let button_style = if chrome.submit_enabled {
            Style::default().fg(Color::White).bg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let button = Paragraph::new(chrome.submit_label)
            .alignment(Alignment::Center)
            .style(button_style.add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(button, button_area);

        if let Some(message) = form.server_error() {
            frame.render_widget(
                Paragraph::new(message)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Red)),
                server_area,
            );
        }
    }
}

/// The text to draw for an input, plus its scroll offset and cursor column.
/// Masked inputs draw one `*` per character, so their cursor has to be
/// counted in characters rather than in the display width of the real value.
fn visible(input: &Input, masked: bool, width: usize) -> (String, usize, usize) {
    if masked {
        let cursor = input.cursor();

        (
            "*".repeat(input.value().chars().count()),
            cursor.saturating_sub(width),
            cursor,
        )
    } else {
        (
            input.value().to_owned(),
            input.visual_scroll(width),
            input.visual_cursor(),
        )
    }
}
