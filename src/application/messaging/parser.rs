//! Command parser - Turns raw chat text into a typed `Command`

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::domain::entities::Command;

static TICKET_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9]+-[0-9]+$").expect("ticket key pattern is valid")
});

/// Parse raw message text into a command.
///
/// Total and deterministic: every input maps to exactly one variant.
/// Keywords match case-insensitively; payloads keep their original case.
pub fn parse(raw_text: &str) -> Command {
    // Drop a leading mention such as `<@U123>`
    let text = match raw_text.find('>') {
        Some(idx) => &raw_text[idx + 1..],
        None => raw_text,
    };

    let text = text.trim();
    if text.is_empty() {
        return Command::Noop;
    }

    let lowered = text.to_lowercase();
    let (first, rest) = split_word(text);

    if first.to_lowercase() == "ai" {
        return if rest.is_empty() {
            Command::AiUsage
        } else {
            Command::AiPrompt { text: rest.to_string() }
        };
    }

    if lowered == "list members" {
        return Command::ListMembers;
    }

    if lowered == "list channels" {
        return Command::ListChannels;
    }

    if lowered.starts_with("delete message") {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        return match tokens.as_slice() {
            [_, _, id] => Command::DeleteMessage { message_id: id.to_string() },
            _ => Command::DeleteUsage,
        };
    }

    if first.to_lowercase() == "ticket" {
        return parse_ticket(rest);
    }

    if text.split_whitespace().count() >= 2 {
        Command::Unknown { raw: text.to_string() }
    } else {
        Command::Noop
    }
}

/// Parse the arguments of a `ticket ...` command
fn parse_ticket(args: &str) -> Command {
    let (sub, rest) = split_word(args);

    match sub.to_lowercase().as_str() {
        "create" => {
            let (title, description) = match rest.split_once('|') {
                Some((title, description)) => (title.trim(), description.trim()),
                None => (rest, ""),
            };
            if title.is_empty() {
                Command::TicketUsage
            } else {
                Command::CreateTicket {
                    title: title.to_string(),
                    description: description.to_string(),
                }
            }
        }
        "show" => {
            let tokens: Vec<&str> = rest.split_whitespace().collect();
            match tokens.as_slice() {
                [key] if TICKET_KEY.is_match(key) => Command::ShowTicket {
                    key: key.to_uppercase(),
                },
                _ => Command::TicketUsage,
            }
        }
        "search" if !rest.is_empty() => Command::SearchTickets {
            query: rest.to_string(),
        },
        _ => Command::TicketUsage,
    }
}

/// Split off the first whitespace-delimited word; the rest is trimmed.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(idx) => (&text[..idx], text[idx..].trim()),
        None => (text, ""),
    }
}
