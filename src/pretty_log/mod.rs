use crossterm::cursor::MoveUp;
use crossterm::execute;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeColor {
    Main,
    Second,
    Success,
    Warn,
    Error,
}

impl ThemeColor {
    fn color(&self) -> Color {
        match self {
            ThemeColor::Main => Color::Cyan,
            ThemeColor::Second => Color::DarkGrey,
            ThemeColor::Success => Color::Green,
            ThemeColor::Warn => Color::Yellow,
            ThemeColor::Error => Color::Red,
        }
    }
}

pub fn colored_println<W: Write>(writer: &mut W, theme: ThemeColor, text: &str) {
    let _ = execute!(
        writer,
        SetForegroundColor(theme.color()),
        Print(text),
        Print("\n"),
        ResetColor,
    );
}

/// # clean_one_line
///
/// Move the cursor up one line and clear it, so the next print overwrites
/// the previous one.
pub fn clean_one_line<W: Write>(writer: &mut W) {
    let _ = execute!(writer, MoveUp(1), Clear(ClearType::CurrentLine));
}
