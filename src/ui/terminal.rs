// Terminal presentation: ratatui drawing, crossterm input
// The fixed game field is scaled onto whatever size the terminal has

use std::collections::HashMap;
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Terminal,
};
use tracing::{debug, info};

use super::braille::BrailleCanvas;
use super::surface::{Anchor, Controls, Rgb, Surface};
use crate::game::{InputEvent, Key};

/// Raw mode + alternate screen for the lifetime of the value.
/// Dropping it restores the terminal, also on error paths.
pub struct TerminalGuard {
    raw_mode: bool,
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    pub fn enter(title: &str) -> io::Result<Self> {
        enable_raw_mode()?;
        // From here on a failed step drops the guard, undoing what was done
        let mut guard = Self {
            raw_mode: true,
            keyboard_enhanced: false,
        };
        // Release events are only reported with the kitty keyboard protocol
        let supports_release = supports_keyboard_enhancement().unwrap_or(false);
        guard.setup(&mut io::stdout(), title, supports_release)?;
        info!(keyboard_enhanced = guard.keyboard_enhanced, "terminal ready");

        Ok(guard)
    }

    fn setup(
        &mut self,
        out: &mut impl Write,
        title: &str,
        enhance_keyboard: bool,
    ) -> io::Result<()> {
        execute!(out, EnterAlternateScreen, SetTitle(title))?;
        if enhance_keyboard {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.keyboard_enhanced = true;
        }
        Ok(())
    }

    fn restore(&mut self, out: &mut impl Write) {
        if self.keyboard_enhanced {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
            self.keyboard_enhanced = false;
        }
        if self.raw_mode {
            let _ = disable_raw_mode();
            self.raw_mode = false;
        }
        let _ = execute!(out, LeaveAlternateScreen, crossterm::cursor::Show);
    }

    /// Whether key-release events will arrive
    pub fn reports_key_release(&self) -> bool {
        self.keyboard_enhanced
    }

    pub fn terminal(&self) -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.hide_cursor()?;
        Ok(terminal)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore(&mut io::stdout());
    }
}

struct TextItem {
    text: String,
    col: i32,
    row: i32,
    color: Rgb,
}

pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    field_width: f32,
    field_height: f32,
    background: Rgb,
    canvas: BrailleCanvas,
    texts: Vec<TextItem>,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>, field_width: f32, field_height: f32) -> io::Result<Self> {
        let size = terminal.size()?;
        Ok(Self {
            terminal,
            field_width,
            field_height,
            background: [0, 0, 0],
            canvas: BrailleCanvas::new(size.width as usize, size.height as usize),
            texts: Vec::new(),
        })
    }

    #[cfg(test)]
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    fn scale(&self) -> (f32, f32) {
        (
            self.canvas.pixel_width() as f32 / self.field_width,
            self.canvas.pixel_height() as f32 / self.field_height,
        )
    }

    fn to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        let col = x * self.canvas.width() as f32 / self.field_width;
        let row = y * self.canvas.height() as f32 / self.field_height;
        (col.floor() as i32, row.floor() as i32)
    }
}

fn to_pixel(v: f32) -> usize {
    v.round().max(0.0) as usize
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb[0], rgb[1], rgb[2])
}

/// One styled line per canvas row, merging runs of equal color.
fn canvas_lines(canvas: &BrailleCanvas) -> Vec<Line<'static>> {
    (0..canvas.height())
        .map(|y| {
            let mut spans = Vec::new();
            let mut run = String::new();
            let mut run_color = None;

            for x in 0..canvas.width() {
                let cell_color = canvas.color(x, y);
                if cell_color != run_color && !run.is_empty() {
                    spans.push(styled_run(std::mem::take(&mut run), run_color));
                }
                run_color = cell_color;
                run.push(canvas.to_char(x, y));
            }
            if !run.is_empty() {
                spans.push(styled_run(run, run_color));
            }
            Line::from(spans)
        })
        .collect()
}

fn styled_run(text: String, run_color: Option<Rgb>) -> Span<'static> {
    match run_color {
        Some(rgb) => Span::styled(text, Style::default().fg(color(rgb))),
        None => Span::raw(text),
    }
}

impl<B: Backend> Surface for TerminalSurface<B> {
    fn clear(&mut self, color: Rgb) {
        self.background = color;
        self.canvas.clear();
        self.texts.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        let (sx, sy) = self.scale();
        let px = to_pixel(x * sx);
        let py = to_pixel(y * sy);
        let pw = to_pixel((x + width) * sx).saturating_sub(px).max(1);
        let ph = to_pixel((y + height) * sy).saturating_sub(py).max(1);
        self.canvas.fill_rect(px, py, pw, ph, color);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb) {
        let (sx, sy) = self.scale();
        let left = to_pixel((cx - radius) * sx);
        let right = to_pixel((cx + radius) * sx);
        let top = to_pixel((cy - radius) * sy);
        let bottom = to_pixel((cy + radius) * sy);

        for py in top..=bottom {
            for px in left..=right {
                // Pixel center back in field units
                let dx = (px as f32 + 0.5) / sx - cx;
                let dy = (py as f32 + 0.5) / sy - cy;
                if dx * dx + dy * dy <= radius * radius {
                    self.canvas.set_pixel(px, py, color);
                }
            }
        }

        // Small terminals: keep the ball visible
        if cx >= 0.0 && cy >= 0.0 {
            self.canvas.set_pixel(to_pixel(cx * sx), to_pixel(cy * sy), color);
        }
    }

    // Text is one cell tall: the top line and the vertical center are the
    // same row, so the anchor never moves it
    fn draw_text(&mut self, text: &str, x: f32, y: f32, _anchor: Anchor, color: Rgb) {
        let (col, row) = self.to_cell(x, y);
        let col = col - text.chars().count() as i32 / 2;
        self.texts.push(TextItem {
            text: text.to_string(),
            col,
            row,
            color,
        });
    }

    fn present(&mut self) -> io::Result<()> {
        let background = self.background;
        let canvas = &self.canvas;
        let texts = &self.texts;

        self.terminal.draw(|frame| {
            let area = frame.area();
            let bg = Block::default().style(Style::default().bg(color(background)));
            frame.render_widget(bg, area);

            frame.render_widget(Paragraph::new(canvas_lines(canvas)), area);

            for item in texts {
                if item.row < 0 || item.col < 0 {
                    continue;
                }
                let rect = Rect {
                    x: area.x.saturating_add(item.col.min(u16::MAX as i32) as u16),
                    y: area.y.saturating_add(item.row.min(u16::MAX as i32) as u16),
                    width: item.text.chars().count() as u16,
                    height: 1,
                }
                .intersection(area);
                if rect.width == 0 || rect.height == 0 {
                    continue;
                }
                let label = Paragraph::new(item.text.clone()).style(
                    Style::default()
                        .fg(color(item.color))
                        .add_modifier(Modifier::BOLD),
                );
                frame.render_widget(label, rect);
            }
        })?;

        // Pick up terminal resizes for the next frame
        let size = self.terminal.size()?;
        if size.width as usize != self.canvas.width() || size.height as usize != self.canvas.height()
        {
            debug!(width = size.width, height = size.height, "terminal resized");
            self.canvas = BrailleCanvas::new(size.width as usize, size.height as usize);
        }

        Ok(())
    }
}

/// Tracks which keys are currently held.
///
/// With release events a key is held from press to release. Without them
/// a key counts as held for `hold_window` after its last press or repeat.
#[derive(Debug)]
pub struct KeyTracker {
    last_seen: HashMap<Key, Instant>,
    hold_window: Option<Duration>,
}

impl KeyTracker {
    pub fn new(reports_release: bool, hold_window: Duration) -> Self {
        Self {
            last_seen: HashMap::new(),
            hold_window: if reports_release { None } else { Some(hold_window) },
        }
    }

    pub fn press(&mut self, key: Key, at: Instant) {
        self.last_seen.insert(key, at);
    }

    pub fn release(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    pub fn is_held(&self, key: Key, now: Instant) -> bool {
        match (self.last_seen.get(&key), self.hold_window) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(seen), Some(window)) => now.saturating_duration_since(*seen) < window,
        }
    }
}

/// Translation of one crossterm key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyInput {
    Quit,
    Pressed(Key),
    Released(Key),
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::W),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::S),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Char(' ') => Some(Key::Space),
        _ => None,
    }
}

fn translate_key_event(key: KeyEvent) -> Option<KeyInput> {
    if key.kind == KeyEventKind::Release {
        return map_key(key.code).map(KeyInput::Released);
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(KeyInput::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(KeyInput::Quit),
        code => map_key(code).map(KeyInput::Pressed),
    }
}

pub struct TerminalControls {
    keys: KeyTracker,
}

impl TerminalControls {
    pub fn new(reports_release: bool, hold_window: Duration) -> Self {
        Self {
            keys: KeyTracker::new(reports_release, hold_window),
        }
    }
}

impl Controls for TerminalControls {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match translate_key_event(key) {
                Some(KeyInput::Quit) => events.push(InputEvent::Quit),
                Some(KeyInput::Pressed(k)) => {
                    self.keys.press(k, Instant::now());
                    if key.kind == KeyEventKind::Press {
                        events.push(InputEvent::KeyDown(k));
                    }
                }
                Some(KeyInput::Released(k)) => self.keys.release(k),
                None => {}
            }
        }

        Ok(events)
    }

    fn is_held(&self, key: Key) -> bool {
        self.keys.is_held(key, Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            translate_key_event(key(KeyCode::Char('W'), KeyEventKind::Press)),
            Some(KeyInput::Pressed(Key::W))
        );
        assert_eq!(
            translate_key_event(key(KeyCode::Down, KeyEventKind::Repeat)),
            Some(KeyInput::Pressed(Key::Down))
        );
        assert_eq!(
            translate_key_event(key(KeyCode::Up, KeyEventKind::Release)),
            Some(KeyInput::Released(Key::Up))
        );
        assert_eq!(
            translate_key_event(key(KeyCode::Esc, KeyEventKind::Press)),
            Some(KeyInput::Quit)
        );
        assert_eq!(translate_key_event(key(KeyCode::Char('x'), KeyEventKind::Press)), None);

        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'), KeyEventKind::Press)
        };
        assert_eq!(translate_key_event(ctrl_c), Some(KeyInput::Quit));
    }

    #[test]
    fn test_held_until_release_when_reported() {
        let start = Instant::now();
        let mut keys = KeyTracker::new(true, Duration::from_millis(150));

        keys.press(Key::W, start);
        assert!(keys.is_held(Key::W, start + Duration::from_secs(10)));
        assert!(!keys.is_held(Key::S, start));

        keys.release(Key::W);
        assert!(!keys.is_held(Key::W, start));
    }

    #[test]
    fn test_held_window_without_release_events() {
        let start = Instant::now();
        let mut keys = KeyTracker::new(false, Duration::from_millis(150));

        keys.press(Key::Up, start);
        assert!(keys.is_held(Key::Up, start + Duration::from_millis(100)));
        assert!(!keys.is_held(Key::Up, start + Duration::from_millis(200)));

        keys.press(Key::Up, start + Duration::from_millis(180));
        assert!(keys.is_held(Key::Up, start + Duration::from_millis(200)));
    }

    #[test]
    fn test_surface_draws_text_and_shapes() {
        let terminal = Terminal::new(TestBackend::new(70, 25)).unwrap();
        let mut surface = TerminalSurface::new(terminal, 700.0, 500.0).unwrap();

        surface.clear([0, 0, 0]);
        surface.fill_rect(10.0, 200.0, 20.0, 100.0, [255, 255, 255]);
        surface.fill_circle(350.0, 250.0, 7.0, [255, 255, 255]);
        surface.draw_text("Left Player Won!", 350.0, 250.0, Anchor::Center, [255, 255, 255]);
        surface.present().unwrap();

        let content: String = surface
            .terminal()
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(content.contains("Left Player Won!"));
        // Paddle occupies column 1 from row 10 down
        let paddle_cell = surface.terminal().backend().buffer().content[10 * 70 + 1].symbol();
        assert_ne!(paddle_cell, " ");
    }

    #[test]
    fn test_offscreen_text_is_skipped() {
        let terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        let mut surface = TerminalSurface::new(terminal, 700.0, 500.0).unwrap();

        surface.clear([0, 0, 0]);
        surface.draw_text("far away", 5000.0, 5000.0, Anchor::TopCenter, [255, 255, 255]);
        surface.draw_text("above", 10.0, -100.0, Anchor::TopCenter, [255, 255, 255]);
        assert!(surface.present().is_ok());
    }

    #[test]
    fn test_anchors_place_one_line_text_identically() {
        let terminal = Terminal::new(TestBackend::new(70, 25)).unwrap();
        let mut surface = TerminalSurface::new(terminal, 700.0, 500.0).unwrap();

        surface.clear([0, 0, 0]);
        surface.draw_text("Score", 350.0, 100.0, Anchor::TopCenter, [255, 255, 255]);
        surface.draw_text("Score", 350.0, 100.0, Anchor::Center, [255, 255, 255]);

        let (top, center) = (&surface.texts[0], &surface.texts[1]);
        assert_eq!((top.col, top.row), (center.col, center.row));
        // 350 / 700 of 70 columns, minus half of "Score"
        assert_eq!(top.col, 35 - 2);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_guard_restores_what_setup_enabled() {
        let mut guard = TerminalGuard {
            raw_mode: false,
            keyboard_enhanced: false,
        };
        let mut out = Vec::new();
        guard.setup(&mut out, "Pong", true).unwrap();
        assert!(guard.reports_key_release());

        let mut out = Vec::new();
        guard.restore(&mut out);
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[<1u"));
        assert!(written.contains("\x1b[?1049l"));
        assert!(!guard.reports_key_release());
    }

    #[test]
    fn test_failed_setup_leaves_flags_unpushed() {
        let mut guard = TerminalGuard {
            raw_mode: false,
            keyboard_enhanced: false,
        };
        assert!(guard.setup(&mut FailingWriter, "Pong", true).is_err());
        assert!(!guard.reports_key_release());

        // Restore still leaves the alternate screen but pops nothing
        let mut out = Vec::new();
        guard.restore(&mut out);
        let written = String::from_utf8(out).unwrap();
        assert!(!written.contains("\x1b[<1u"));
        assert!(written.contains("\x1b[?1049l"));
    }
}
