//! Terminal color control
//!
//! Honors `NO_COLOR` (https://no-color.org/), `CLICOLOR=0` and
//! `CLICOLOR_FORCE`; otherwise colors follow whether stdout is a terminal.

use colored::control;
use std::env;

/// Decide whether to emit colors from the environment and TTY status
pub fn should_color(
    no_color: Option<&str>,
    clicolor: Option<&str>,
    clicolor_force: Option<&str>,
    is_tty: bool,
) -> bool {
    if no_color.is_some() {
        return false;
    }
    if clicolor_force.is_some_and(|v| v != "0") {
        return true;
    }
    if clicolor == Some("0") {
        return false;
    }
    is_tty
}

/// Apply the color decision globally. Call once, early in `main`.
pub fn init_colors() {
    let no_color = env::var("NO_COLOR").ok();
    let clicolor = env::var("CLICOLOR").ok();
    let clicolor_force = env::var("CLICOLOR_FORCE").ok();
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stdout());

    control::set_override(should_color(
        no_color.as_deref(),
        clicolor.as_deref(),
        clicolor_force.as_deref(),
        is_tty,
    ));
}
