//! Line-oriented command parsing for the headless reader.

use anyhow::{Context, Result, anyhow};
use flipbook_core::SessionCommand;

#[derive(Debug, Clone, PartialEq)]
pub enum ReaderInput {
    Command(SessionCommand),
    Quit,
}

pub const USAGE: &str = "commands: next | prev | jump <index> | topic <id> | contents | \
swipe <start_x> <end_x> | touchstart <x> | touchend <x> | key <name> | resize <width> | tick | finish | show | quit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ReaderInput>> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => return Ok(Some(ReaderInput::Quit)),
        "next" | "n" => SessionCommand::Advance,
        "prev" | "p" => SessionCommand::Retreat,
        "show" | "s" => SessionCommand::GetSnapshot,
        "contents" | "toc" => SessionCommand::OpenContents,
        "tick" => SessionCommand::Tick,
        "finish" => SessionCommand::FinishTransition,
        "jump" => SessionCommand::JumpTo {
            index: single_arg(verb, &args)?
                .parse()
                .context("jump expects a slot index")?,
        },
        "topic" => SessionCommand::JumpToTopic {
            topic_id: single_arg(verb, &args)?.to_string(),
        },
        "key" => SessionCommand::Key {
            key: single_arg(verb, &args)?.to_string(),
        },
        "resize" => SessionCommand::Resize {
            viewport_width: single_arg(verb, &args)?
                .parse()
                .context("resize expects a width in pixels")?,
        },
        "touchstart" => SessionCommand::TouchStart {
            x: single_arg(verb, &args)?
                .parse()
                .context("touchstart expects an x coordinate")?,
        },
        "touchend" => SessionCommand::TouchEnd {
            x: single_arg(verb, &args)?
                .parse()
                .context("touchend expects an x coordinate")?,
        },
        "swipe" => {
            let [start, end] = args.as_slice() else {
                return Err(anyhow!("swipe expects <start_x> <end_x>"));
            };
            SessionCommand::Swipe {
                start_x: start.parse().context("invalid swipe start")?,
                end_x: end.parse().context("invalid swipe end")?,
            }
        }
        other => return Err(anyhow!("unknown command '{other}'; {USAGE}")),
    };
    Ok(Some(ReaderInput::Command(command)))
}

fn single_arg<'a>(verb: &str, args: &[&'a str]) -> Result<&'a str> {
    match args {
        [arg] => Ok(*arg),
        _ => Err(anyhow!("{verb} expects exactly one argument")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> SessionCommand {
        match parse_line(line).unwrap() {
            Some(ReaderInput::Command(command)) => command,
            other => panic!("expected a command for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn parses_navigation_verbs() {
        assert_eq!(command("next"), SessionCommand::Advance);
        assert_eq!(command("  P "), SessionCommand::Retreat);
        assert_eq!(command("jump 7"), SessionCommand::JumpTo { index: 7 });
        assert_eq!(
            command("topic intro"),
            SessionCommand::JumpToTopic { topic_id: "intro".to_string() }
        );
        assert_eq!(
            command("swipe 200 140.5"),
            SessionCommand::Swipe { start_x: 200.0, end_x: 140.5 }
        );
        assert_eq!(command("resize 500"), SessionCommand::Resize { viewport_width: 500 });
    }

    #[test]
    fn parses_touch_verbs() {
        assert_eq!(command("touchstart 320"), SessionCommand::TouchStart { x: 320.0 });
        assert_eq!(command("TouchEnd 210.5"), SessionCommand::TouchEnd { x: 210.5 });
        assert!(parse_line("touchstart").is_err());
        assert!(parse_line("touchend left").is_err());
    }

    #[test]
    fn blank_and_quit_lines() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("quit").unwrap(), Some(ReaderInput::Quit));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_line("jump").is_err());
        assert!(parse_line("jump x").is_err());
        assert!(parse_line("swipe 1").is_err());
        assert!(parse_line("dance").is_err());
    }
}
