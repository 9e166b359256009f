//! POSIX signal names and numbers.

use std::str::FromStr;

pub use nix::sys::signal::Signal;

use crate::{Error, Result};

/// Parse a signal name or number.
///
/// Accepts bare names (`TERM`), prefixed names (`SIGTERM`) in any case, and
/// numbers (`15`).
pub fn parse_signal(name: &str) -> Result<Signal> {
    let trimmed = name.trim();

    if let Ok(number) = trimmed.parse::<i32>() {
        return Signal::try_from(number).map_err(|_| Error::InvalidSignal(name.to_string()));
    }

    let upper = trimmed.to_ascii_uppercase();
    let full = if upper.starts_with("SIG") {
        upper
    } else {
        format!("SIG{}", upper)
    };

    Signal::from_str(&full).map_err(|_| Error::InvalidSignal(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!(parse_signal("TERM").unwrap(), Signal::SIGTERM);
        assert_eq!(parse_signal("SIGKILL").unwrap(), Signal::SIGKILL);
        assert_eq!(parse_signal("int").unwrap(), Signal::SIGINT);
        assert_eq!(parse_signal("sigHup").unwrap(), Signal::SIGHUP);
        assert_eq!(parse_signal(" USR1 ").unwrap(), Signal::SIGUSR1);
    }

    #[test]
    fn parse_numbers() {
        assert_eq!(parse_signal("15").unwrap(), Signal::SIGTERM);
        assert_eq!(parse_signal("9").unwrap(), Signal::SIGKILL);
        assert_eq!(parse_signal("2").unwrap(), Signal::SIGINT);
    }

    #[test]
    fn parse_unknown() {
        assert!(matches!(parse_signal("FOO"), Err(Error::InvalidSignal(s)) if s == "FOO"));
        assert!(matches!(parse_signal("0"), Err(Error::InvalidSignal(_))));
        assert!(matches!(parse_signal("999"), Err(Error::InvalidSignal(_))));
        assert!(matches!(parse_signal(""), Err(Error::InvalidSignal(_))));
    }
}
