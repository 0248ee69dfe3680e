//! Line-oriented event loop: each input line becomes one session event, and
//! the inventory is re-rendered whenever the session re-derives its view.

use super::render::{print_inventory, print_messages, suggestion_message};
use console::Term;
use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use tally::api::CmdMessage;
use tally::error::{Result, TallyError};
use tally::session::{Event, EventOutcome, Session};
use tally::store::ItemStore;
use tally::view::SortField;

const HELP: &str = "\
Commands:
  add NAME      Add an item (or bump its count)
  + NAME        Increment
  - NAME        Decrement (removes at zero)
  search [TEXT] Filter by name; no text shows everything
  sort FIELD    Sort by name or count; again to flip the order
  clear         Reset search and sort
  refresh       Reload from the store
  help          Show this help
  quit          Leave the shell";

#[derive(Debug, PartialEq, Eq)]
pub(super) enum ShellInput {
    Event(Event),
    Help,
    Quit,
    Empty,
}

pub(super) fn parse_line(line: &str) -> Result<ShellInput> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellInput::Empty);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let needs_name = |event: fn(String) -> Event| {
        if rest.is_empty() {
            Err(TallyError::Api(format!("{} needs an item name", command)))
        } else {
            Ok(ShellInput::Event(event(rest.to_string())))
        }
    };

    match command {
        "add" | "a" => needs_name(Event::Add),
        "+" | "inc" => needs_name(Event::Increment),
        "-" | "dec" | "rm" => needs_name(Event::Decrement),
        "search" | "s" => Ok(ShellInput::Event(Event::SearchChanged(rest.to_string()))),
        "sort" => {
            let field: SortField = rest.parse()?;
            Ok(ShellInput::Event(Event::SortClicked(field)))
        }
        "clear" => Ok(ShellInput::Event(Event::ClearFilters)),
        "refresh" | "r" => Ok(ShellInput::Event(Event::Refresh)),
        "help" | "?" => Ok(ShellInput::Help),
        "quit" | "exit" | "q" => Ok(ShellInput::Quit),
        other => Err(TallyError::Api(format!(
            "Unknown command: {} (try help)",
            other
        ))),
    }
}

pub(super) fn run<S: ItemStore>(session: &mut Session<S>) -> Result<()> {
    let interactive = Term::stdout().is_term();

    let dirty = Rc::new(Cell::new(false));
    let flag = Rc::clone(&dirty);
    session.subscribe(move |_| flag.set(true));

    if session.refresh().is_failed() {
        print_messages(&[CmdMessage::warning("Could not load the inventory")]);
    }
    print_inventory(session.state(), session.visible());
    dirty.set(false);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("tally> ");
            std::io::stdout().flush()?;
        }

        let Some(line) = lines.next() else { break };
        let input = match parse_line(&line?) {
            Ok(input) => input,
            Err(e) => {
                print_messages(&[CmdMessage::error(e.to_string())]);
                continue;
            }
        };

        let event = match input {
            ShellInput::Empty => continue,
            ShellInput::Quit => break,
            ShellInput::Help => {
                println!("{}", HELP);
                continue;
            }
            ShellInput::Event(event) => event,
        };

        let is_search = matches!(event, Event::SearchChanged(_));

        match session.dispatch(event) {
            EventOutcome::Applied(Some(result)) => print_messages(&result.messages),
            EventOutcome::Applied(None) => {
                if is_search {
                    let state = session.state();
                    let names = state.suggestions(session.snapshot());
                    if let Some(hint) = suggestion_message(&state.search_term, &names) {
                        print_messages(&[hint]);
                    }
                }
            }
            EventOutcome::Ignored => {
                print_messages(&[CmdMessage::warning("Nothing to do: empty item name")]);
            }
            EventOutcome::Failed(e) => {
                print_messages(&[CmdMessage::error(format!("Update failed: {}", e))]);
            }
        }

        if dirty.replace(false) {
            print_inventory(session.state(), session.visible());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mutations_with_multiword_names() {
        assert_eq!(
            parse_line("add  green tea ").unwrap(),
            ShellInput::Event(Event::Add("green tea".into()))
        );
        assert_eq!(
            parse_line("+ Apple").unwrap(),
            ShellInput::Event(Event::Increment("Apple".into()))
        );
        assert_eq!(
            parse_line("- apple").unwrap(),
            ShellInput::Event(Event::Decrement("apple".into()))
        );
    }

    #[test]
    fn mutations_need_a_name() {
        assert!(parse_line("add").is_err());
        assert!(parse_line("-").is_err());
    }

    #[test]
    fn parses_view_commands() {
        assert_eq!(
            parse_line("search").unwrap(),
            ShellInput::Event(Event::SearchChanged(String::new()))
        );
        assert_eq!(
            parse_line("sort Count").unwrap(),
            ShellInput::Event(Event::SortClicked(SortField::Count))
        );
        assert_eq!(parse_line("clear").unwrap(), ShellInput::Event(Event::ClearFilters));
        assert!(parse_line("sort colour").is_err());
    }

    #[test]
    fn parses_control_lines() {
        assert_eq!(parse_line("   ").unwrap(), ShellInput::Empty);
        assert_eq!(parse_line("quit").unwrap(), ShellInput::Quit);
        assert_eq!(parse_line("help").unwrap(), ShellInput::Help);
        assert!(parse_line("dance").is_err());
    }
}
