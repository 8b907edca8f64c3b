use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use unicode_width::UnicodeWidthStr;

use crate::page::{Page, Screen};

/// Widest the card box gets on large terminals.
const CARD_WIDTH: u16 = 64;
/// Rows reserved for the card box.
const CARD_HEIGHT: u16 = 12;
/// Width of the splash progress bar.
const BAR_WIDTH: u16 = 40;

/// Draw one frame of the page into `out`.
///
/// `elapsed` is total virtual time in milliseconds; the looping column and
/// twinkle animations derive their phase from it and from each particle's
/// own (delay, duration), so redrawing never resets them.
pub fn draw(out: &mut impl Write, page: &Page, size: (u16, u16), elapsed: u64) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;
    match page.screen() {
        Screen::Splash => draw_splash(out, page, size, elapsed)?,
        Screen::Card => draw_card_page(out, page, size, elapsed)?,
    }
    queue!(out, ResetColor)?;
    out.flush()
}

fn draw_splash(
    out: &mut impl Write,
    page: &Page,
    (cols, rows): (u16, u16),
    elapsed: u64,
) -> io::Result<()> {
    let t = elapsed as f64 / 1000.0;

    queue!(out, SetForegroundColor(Color::DarkGreen))?;
    for column in page.columns() {
        if t < column.delay {
            continue;
        }
        let phase = ((t - column.delay) / column.duration).fract();
        let x = scale(column.left, cols);
        let y = (phase * f64::from(rows.saturating_sub(1))) as u16;
        queue!(out, MoveTo(x, y), Print(column.glyph))?;
    }

    let mid = rows / 2;
    let label = "LOADING";
    queue!(
        out,
        SetForegroundColor(Color::DarkGrey),
        MoveTo(center_x(cols, label), mid.saturating_sub(2)),
        Print(label),
    )?;

    let bar_width = BAR_WIDTH.min(cols.saturating_sub(4));
    let filled = (u32::from(bar_width) * u32::from(page.progress_value()) / 100) as u16;
    let bar_x = cols.saturating_sub(bar_width) / 2;
    queue!(
        out,
        MoveTo(bar_x, mid),
        SetForegroundColor(Color::White),
        Print("━".repeat(usize::from(filled))),
        SetForegroundColor(Color::DarkGrey),
        Print("─".repeat(usize::from(bar_width - filled))),
    )?;

    let percent = format!("{}%", page.progress_value());
    queue!(
        out,
        SetForegroundColor(Color::Grey),
        MoveTo(center_x(cols, &percent), mid + 2),
        Print(&percent),
    )?;
    Ok(())
}

fn draw_card_page(
    out: &mut impl Write,
    page: &Page,
    (cols, rows): (u16, u16),
    elapsed: u64,
) -> io::Result<()> {
    let t = elapsed as f64 / 1000.0;

    for particle in page.background() {
        let phase = ((t + particle.delay) / particle.duration).fract();
        let color = if phase < 0.5 { Color::DarkGrey } else { Color::Grey };
        let x = scale(particle.left, cols);
        let y = scale(particle.top, rows);
        queue!(out, MoveTo(x, y), SetForegroundColor(color), Print('·'))?;
    }

    let card = page.card();
    queue!(
        out,
        SetForegroundColor(Color::White),
        MoveTo(center_x(cols, &card.title), 1),
        Print(&card.title),
    )?;

    let width = CARD_WIDTH.min(cols.saturating_sub(4)).max(20);
    let height = CARD_HEIGHT.min(rows.saturating_sub(6)).max(6);
    let left = cols.saturating_sub(width) / 2;
    let top = 3;
    let border = if page.revealed() { Color::White } else { Color::DarkGrey };
    draw_box(out, left, top, width, height, border)?;

    let inner = usize::from(width.saturating_sub(4));
    let mut lines = vec![
        card.symbol.clone(),
        String::new(),
        card.hint.clone(),
        String::new(),
    ];
    if page.revealed() {
        lines.extend(wrap(&card.content, inner));
    } else {
        lines.push("CLICK OR PRESS ENTER TO REVEAL".to_string());
    }

    let start = top + height.saturating_sub(lines.len() as u16) / 2;
    queue!(out, SetForegroundColor(Color::White))?;
    for (i, line) in lines.iter().enumerate() {
        let y = start + i as u16;
        if y >= top + height {
            break;
        }
        queue!(out, MoveTo(center_x(cols, line), y), Print(line))?;
    }

    if page.show_final() {
        let y = top + height + 1;
        queue!(
            out,
            SetForegroundColor(Color::White),
            MoveTo(center_x(cols, &card.final_title), y),
            Print(&card.final_title),
            SetForegroundColor(Color::Grey),
        )?;
        for (i, line) in wrap(&card.final_message, inner).iter().enumerate() {
            queue!(out, MoveTo(center_x(cols, line), y + 1 + i as u16), Print(line))?;
        }
    }

    queue!(out, SetForegroundColor(Color::White))?;
    for sparkle in page.sparkles() {
        let x = scale(sparkle.x, cols);
        let y = scale(sparkle.y, rows);
        queue!(out, MoveTo(x, y), Print('✦'))?;
    }

    queue!(
        out,
        SetForegroundColor(Color::DarkGrey),
        MoveTo(center_x(cols, &card.footer), rows.saturating_sub(2)),
        Print(&card.footer),
    )?;
    Ok(())
}

fn draw_box(
    out: &mut impl Write,
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    color: Color,
) -> io::Result<()> {
    let horizontal = "─".repeat(usize::from(width.saturating_sub(2)));
    queue!(
        out,
        SetForegroundColor(color),
        MoveTo(left, top),
        Print(format!("┌{horizontal}┐")),
    )?;
    for row in 1..height.saturating_sub(1) {
        queue!(
            out,
            MoveTo(left, top + row),
            Print('│'),
            MoveTo(left + width.saturating_sub(1), top + row),
            Print('│'),
        )?;
    }
    queue!(
        out,
        MoveTo(left, top + height.saturating_sub(1)),
        Print(format!("└{horizontal}┘")),
    )?;
    Ok(())
}

/// Map a percentage coordinate onto a terminal axis.
fn scale(percent: f64, cells: u16) -> u16 {
    (percent / 100.0 * f64::from(cells.saturating_sub(1))) as u16
}

/// Column at which `text` starts when centered.
fn center_x(cols: u16, text: &str) -> u16 {
    cols.saturating_sub(text.width() as u16) / 2
}

/// Greedy word wrap to at most `width` display columns. A single word wider
/// than `width` gets its own overflowing line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.width()
        } else {
            current.width() + 1 + word.width()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
