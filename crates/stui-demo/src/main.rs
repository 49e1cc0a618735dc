#![forbid(unsafe_code)]

//! Interactive demo: a bordered screen, a menu, and a text prompt.
//!
//! Keys: up/down move the menu, enter or space choose, escape or tab quit.
//!
//! Logs go to a file because stderr shares the terminal being drawn on.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `STUI_LOG` | `info` | `EnvFilter` directive |
//! | `STUI_LOG_FILE` | `stui-demo.log` | log file path |

use std::env;
use std::fs::File;
use std::io::{Stdout, Write};
use std::process::ExitCode;
use std::sync::Mutex;

use stui::core::screen;
use stui::prelude::*;
use stui::render::compositor::{draw_rectangle, draw_text_box};
use stui::{InputConfig, InputReader, Platform, SessionOptions, StopTrigger};
use tracing_subscriber::EnvFilter;

const OPTIONS: [&str; 4] = ["Say Hi", "Say Bye", "Text input", "Exit"];

fn init_logging() -> std::io::Result<()> {
    let path = env::var("STUI_LOG_FILE").unwrap_or_else(|_| "stui-demo.log".to_owned());
    let filter = EnvFilter::try_from_env("STUI_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Wait for the next key, or `None` once input has ended.
fn next_key(queue: &InputQueue, stop: &StopSignal) -> Option<KeyEvent> {
    queue
        .wait_pop(Take::Count(1), stop)
        .and_then(|keys| keys.into_iter().next())
}

fn is_quit(key: &KeyEvent) -> bool {
    key.is(KeyName::Escape) || key.is(KeyName::Tab)
}

fn status(output: &TerminalOutput<Stdout>, size: (u16, u16), text: &str) -> Result<()> {
    let row = size.1.saturating_sub(2).max(1);
    let width = size.0.saturating_sub(4).max(1);
    let area = TextArea::new(3, row, width, 1, text);
    output.with(|w| draw_text_box(w, &area, DrawOptions::overwrite()))?;
    Ok(())
}

fn prompt(
    output: &TerminalOutput<Stdout>,
    queue: &InputQueue,
    stop: &StopSignal,
    origin: (u16, u16),
    size: (u16, u16),
) -> Result<Option<String>> {
    let label = "User input: ";
    let label_area = TextArea::new(
        origin.0,
        origin.1,
        12,
        1,
        style::style(label, &[StyleName::Bold]),
    );
    output.with(|w| draw_text_box(w, &label_area, DrawOptions::default()))?;

    let mut input =
        TextInput::fit_to_screen(origin.0 + 12, origin.1, (size.0.min(60), size.1), false);
    output.with(|w| input.draw(w))?;
    while let Some(key) = next_key(queue, stop) {
        if key.is(KeyName::Tab) || key.is(KeyName::Escape) {
            return Ok(None);
        }
        if let Some(text) = output.with(|w| input.update(w, &key))? {
            return Ok(Some(text));
        }
    }
    Ok(None)
}

fn run(trigger: &StopTrigger) -> Result<()> {
    let platform = Platform::detect()?;
    let size = screen::size()?;
    tracing::info!(?platform, columns = size.0, lines = size.1, "starting demo");

    let _session = TerminalSession::new(SessionOptions {
        alternate_screen: true,
        hide_cursor: true,
        clear_on_start: true,
    })?;

    let queue = InputQueue::new();
    let stop = trigger.signal();
    let reader = InputReader::spawn_stdin(
        InputConfig {
            platform,
            ..InputConfig::default()
        },
        queue.clone(),
        trigger.clone(),
    )?;

    let output = TerminalOutput::stdout();
    output.with(|w| {
        draw_rectangle(w, 1, 1, size.0.max(2), size.1.max(2), false)?;
        let title = style::style(" stui demo ", &[StyleName::Bold, StyleName::Cyan]);
        draw_text_box(w, &TextArea::new(3, 1, 11, 1, title), DrawOptions::default())
    })?;

    let (column, row) = Menu::centered_position(size, OPTIONS);
    let mut menu = Menu::new(column, row, OPTIONS, 0).clamp_to_screen(size);
    output.with(|w| menu.draw(w))?;

    while let Some(key) = next_key(&queue, &stop) {
        if is_quit(&key) {
            break;
        }
        let Some(choice) = output.with(|w| menu.update(w, &key))? else {
            continue;
        };
        tracing::info!(%choice, "menu selection");
        match choice.as_str() {
            "Say Hi" => status(&output, size, "Hi")?,
            "Say Bye" => status(&output, size, "Bye")?,
            "Text input" => {
                let below = menu.area().row.saturating_add(menu.area().height);
                let origin = (menu.area().column, below.min(size.1.saturating_sub(3)).max(2));
                let entered = prompt(&output, &queue, &stop, origin, size)?;
                let message = match entered {
                    Some(text) => format!("You typed: {text}"),
                    None => "Input cancelled".to_owned(),
                };
                status(&output, size, &message)?;
                output.with(|w| {
                    let width = size.0.saturating_sub(origin.0).max(1);
                    let blank = TextArea::new(origin.0, origin.1, width, 1, "");
                    draw_text_box(w, &blank, DrawOptions::overwrite())?;
                    menu.draw(w)
                })?;
            }
            _ => break,
        }
    }

    reader.stop();
    output.flush()?;
    tracing::info!("demo finished");
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = init_logging() {
        eprintln!("stui-demo: cannot open log file: {err}");
        return ExitCode::FAILURE;
    }

    let (_signal, trigger) = StopSignal::new();
    let result = run(&trigger);
    trigger.stop();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "demo failed");
            let _ = writeln!(std::io::stderr(), "stui-demo: {err}");
            ExitCode::FAILURE
        }
    }
}
