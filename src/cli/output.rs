use colored::Colorize;
use once_cell::sync::Lazy;
use std::fmt;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

/// Plain output (no color codes) when set, for scripts and tests.
static PLAIN_MODE: Lazy<bool> =
    Lazy::new(|| std::env::var_os("SESSION_LEDGER_PLAIN").is_some());

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    if *PLAIN_MODE {
        return match kind {
            MessageKind::Info => format!("[i] {}", text),
            MessageKind::Success => format!("[ok] {}", text),
            MessageKind::Warning => format!("[!] {}", text),
            MessageKind::Error => format!("[x] {}", text),
            MessageKind::Section => format!("== {} ==", text),
        };
    }
    match kind {
        MessageKind::Info => text.normal().to_string(),
        MessageKind::Success => format!("{} {}", "✓".green(), text.green()),
        MessageKind::Warning => format!("{} {}", "!".yellow(), text.yellow()),
        MessageKind::Error => format!("{} {}", "✗".red(), text.red().bold()),
        MessageKind::Section => text.cyan().bold().to_string(),
    }
}

pub fn emit(kind: MessageKind, message: impl fmt::Display) {
    if kind == MessageKind::Error {
        eprintln!("{}", apply_style(kind, message));
    } else {
        println!("{}", apply_style(kind, message));
    }
}

pub fn info(message: impl fmt::Display) {
    emit(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    emit(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    emit(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    emit(MessageKind::Error, message);
}

/// Prints a section heading followed by its underline.
pub fn section(title: impl fmt::Display) {
    let text = title.to_string();
    emit(MessageKind::Section, &text);
    println!("{}", "-".repeat(text.chars().count()));
}
