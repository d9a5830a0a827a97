//! Terminal output. Reports go to the writer the command hands in; status
//! lines go to stderr.

use std::io::{self, Write};

use owo_colors::OwoColorize;

pub fn heading(out: &mut impl Write, title: &str, no_color: bool) -> io::Result<()> {
    if no_color {
        writeln!(out, "{title}")
    } else {
        writeln!(out, "{}", title.bold())
    }
}

/// One `name  detail` row under a heading.
pub fn item(out: &mut impl Write, name: &str, detail: &str, no_color: bool) -> io::Result<()> {
    if no_color {
        writeln!(out, "  {name:<24} {detail}")
    } else {
        writeln!(out, "  {:<24} {}", name.cyan(), detail.dimmed())
    }
}

pub fn success(message: &str, no_color: bool) {
    if no_color {
        eprintln!("ok {message}");
    } else {
        eprintln!("{} {}", "✓".green().bold(), message);
    }
}
