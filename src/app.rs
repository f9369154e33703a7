use crate::booking::{Booking, Bookings};
use crate::calendar::{Calendar, HitTarget, MonthWindow, RangeSelection, SelectionEvent};
use crate::details::BookingDetails;
use crate::help::Help;
use crate::theme::BASE_STYLE;
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::path::PathBuf;
use time::Date;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    month: MonthWindow<Bookings>,
    state: AppState,
    booked_style: Style,
    bookings_path: Option<PathBuf>,
}

impl App {
    pub(crate) fn new(month: MonthWindow<Bookings>, booked_color: Color) -> App {
        App {
            month,
            state: AppState::Calendar,
            booked_style: BASE_STYLE.fg(booked_color),
            bookings_path: None,
        }
    }

    /// Set the file that the bookings are reloaded from
    pub(crate) fn bookings_path(mut self, path: Option<PathBuf>) -> App {
        self.bookings_path = path;
        self
    }

    /// Run the event loop until the user quits, returning the final selection
    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<RangeSelection> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(self.month.selection())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        match read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if !self.handle_key_event(key) {
                    self.beep()?;
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                if !self.handle_click(column, row) {
                    self.beep()?;
                }
            }
            // Redraw on resize, and we might as well redraw on other stuff
            // too
            _ => (),
        }
        Ok(())
    }

    // Returns `false` if the key press should be rejected with a beep
    fn handle_key_event(&mut self, KeyEvent { code, modifiers, .. }: KeyEvent) -> bool {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
            self.state = AppState::Quitting;
            true
        } else if self.popup_open() || normal_modifiers.contains(modifiers) {
            self.handle_key(code)
        } else {
            false
        }
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.month.move_cursor(-1).is_ok(),
                KeyCode::Char('l') | KeyCode::Right => self.month.move_cursor(1).is_ok(),
                KeyCode::Char('k') | KeyCode::Up => self.month.move_cursor(-7).is_ok(),
                KeyCode::Char('j') | KeyCode::Down => self.month.move_cursor(7).is_ok(),
                KeyCode::Char('p' | '<') | KeyCode::PageUp => self.month.previous_month().is_ok(),
                KeyCode::Char('n' | '>') | KeyCode::PageDown => self.month.next_month().is_ok(),
                KeyCode::Char('t') | KeyCode::Home => self.month.jump_to_today().is_ok(),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let date = self.month.cursor();
                    self.click(date)
                }
                KeyCode::Char('c') | KeyCode::Backspace => {
                    self.month.clear_selection();
                    tracing::info!("cleared selection");
                    true
                }
                KeyCode::Char('r') => self.reload(),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping | AppState::Viewing(_) => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    // Returns `false` if the click didn't land on anything
    fn handle_click(&mut self, column: u16, row: u16) -> bool {
        match self.state {
            AppState::Calendar => match self.month.hit(column, row) {
                Some(HitTarget::Previous) => self.month.previous_month().is_ok(),
                Some(HitTarget::Next) => self.month.next_month().is_ok(),
                Some(HitTarget::Day(date)) => self.click(date),
                None => false,
            },
            AppState::Helping | AppState::Viewing(_) => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn click(&mut self, date: Date) -> bool {
        match self.month.click(date) {
            Some(SelectionEvent::Start(date)) => {
                tracing::info!(%date, "range start picked");
                true
            }
            Some(SelectionEvent::End(date)) => {
                tracing::info!(%date, selection = ?self.month.selection(), "range end picked");
                true
            }
            Some(SelectionEvent::Booked(date)) => match self.month.booking_at(date) {
                Some(booking) => {
                    tracing::debug!(id = booking.id, %date, "showing booking");
                    self.state = AppState::Viewing(booking.clone());
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    fn reload(&mut self) -> bool {
        let Some(path) = self.bookings_path.as_deref() else {
            return false;
        };
        match Bookings::load(path) {
            Ok(bookings) => {
                tracing::info!(count = bookings.len(), path = %path.display(), "reloaded bookings");
                self.month.set_bookings(bookings).is_ok()
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "failed to reload bookings");
                false
            }
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stderr().write_all(b"\x07")
    }

    fn popup_open(&self) -> bool {
        matches!(self.state, AppState::Helping | AppState::Viewing(_))
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        Calendar::new(self.booked_style).render(area, buf, &mut self.month);
        match &self.state {
            AppState::Helping => Help(BASE_STYLE).render(area, buf),
            AppState::Viewing(booking) => BookingDetails::new(booking, BASE_STYLE).render(area, buf),
            AppState::Calendar | AppState::Quitting => (),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Viewing(Booking),
    Quitting,
}
