//! Terminal presentation of chat messages: highlighted code blocks and wrapped prose.

mod constants;
mod draw;
mod print;
mod syntax;

use std::io::{self, Write};

use crate::core::config::Config;
use crate::core::message::Message;

use draw::message_lines;
use print::write_lines;

/// Write a conversation to `out`, a blank line between messages.
pub fn write_messages<W: Write>(
    out: &mut W,
    messages: &[Message],
    config: &Config,
) -> io::Result<()> {
    for (idx, message) in messages.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        write_lines(out, &message_lines(message, config), config.color)?;
    }
    Ok(())
}

/// Print a conversation to stdout.
pub fn print_messages(messages: &[Message], config: &Config) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_messages(&mut out, messages, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Sender;

    #[test]
    fn write_messages_separates_with_blank_line() {
        let config = Config {
            color: false,
            ..Config::default()
        };
        let messages = [Message::new(Sender::User, "hi"), Message::new(Sender::Ai, "hello")];
        let mut buf = Vec::new();
        write_messages(&mut buf, &messages, &config).expect("write");
        assert_eq!(
            String::from_utf8(buf).expect("utf8"),
            "you:\nhi\n\nai:\nhello\n"
        );
    }
}
