//! Console lines meant for the person running the tool, as opposed to logs.
//! Info and success go to stdout, warnings and errors to stderr. Colour is
//! applied only when stdout is a terminal, so piped output stays plain.

use owo_colors::OwoColorize;

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Warn,
    Error,
}

impl Tone {
    fn label(self) -> &'static str {
        match self {
            Tone::Info => "info:",
            Tone::Warn => "warn:",
            Tone::Error => "error:",
        }
    }
}

fn colour() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn labelled(tone: Tone, msg: &str) -> String {
    let label = tone.label();
    if !colour() {
        return format!("{label} {msg}");
    }
    let label = match tone {
        Tone::Info => label.cyan().bold().to_string(),
        Tone::Warn => label.yellow().bold().to_string(),
        Tone::Error => label.red().bold().to_string(),
    };
    format!("{label} {msg}")
}

pub fn print_info(msg: &str) {
    println!("{}", labelled(Tone::Info, msg));
}

pub fn print_warn(msg: &str) {
    eprintln!("{}", labelled(Tone::Warn, msg));
}

pub fn print_error(msg: &str) {
    eprintln!("{}", labelled(Tone::Error, msg));
}

/// Final success line, green on a terminal.
pub fn print_success(msg: &str) {
    if colour() {
        println!("{}", msg.green().bold());
    } else {
        println!("{msg}");
    }
}

/// Unlabelled line for primary output such as the info record, which users
/// may script against.
pub fn print_user(msg: &str) {
    println!("{msg}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_tone() {
        assert_eq!(Tone::Info.label(), "info:");
        assert_eq!(Tone::Warn.label(), "warn:");
        assert_eq!(Tone::Error.label(), "error:");
    }

    #[test]
    fn labelled_keeps_message() {
        let line = labelled(Tone::Warn, "folder-2 already exists");
        assert!(line.ends_with(" folder-2 already exists"), "got: {line}");
        assert!(line.contains("warn:"));
    }
}
