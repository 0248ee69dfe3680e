use chrono::{DateTime, Utc};
use colored::Colorize;
use tally::api::{CmdMessage, MessageLevel};
use tally::model::{display_name, Item};
use tally::view::{SortField, ViewState};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 32;
const COUNT_WIDTH: usize = 10;
const TIME_WIDTH: usize = 16;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Autocomplete hint for an active search, or nothing when there is no
/// search term or nothing matches.
pub(super) fn suggestion_message(search_term: &str, names: &[String]) -> Option<CmdMessage> {
    if search_term.is_empty() || names.is_empty() {
        return None;
    }
    let shown: Vec<String> = names.iter().map(|n| display_name(n)).collect();
    Some(CmdMessage::info(format!("Matches: {}", shown.join(", "))))
}

pub(super) fn print_inventory(state: &ViewState, items: &[Item]) {
    print!("{}", render_inventory(state, items, Utc::now()));
}

/// Renders the header row (with sort markers), then one row per item.
pub(super) fn render_inventory(state: &ViewState, items: &[Item], now: DateTime<Utc>) -> String {
    let mut out = String::new();

    if !state.search_term.is_empty() {
        out.push_str(&format!(
            "{}\n",
            format!("Search: {}", state.search_term).dimmed()
        ));
    }

    if items.is_empty() {
        out.push_str("No items found.\n");
        return out;
    }

    let name_label = state.sort.label_for(SortField::Name);
    let count_label = state.sort.label_for(SortField::Count);
    let header = format!(
        "{}{}{:>width$}",
        pad_to_width(&name_label, NAME_WIDTH),
        pad_left(&count_label, COUNT_WIDTH),
        "Updated",
        width = TIME_WIDTH
    );
    out.push_str(&format!("{}\n", header.bold()));

    for item in items {
        let name = fit_to_width(&display_name(&item.name), NAME_WIDTH - 2);
        out.push_str(&format!(
            "{}{}{}\n",
            pad_to_width(&name, NAME_WIDTH),
            pad_left(&item.quantity.to_string(), COUNT_WIDTH).cyan(),
            format_time_ago(item.updated_at, now).dimmed()
        ));
    }
    out
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn pad_left(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", " ".repeat(padding), s)
}

fn fit_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tally::view::SortDirective;

    fn no_color() {
        colored::control::set_override(false);
    }

    fn item(name: &str, quantity: u32, now: DateTime<Utc>) -> Item {
        Item {
            name: name.into(),
            quantity,
            created_at: now,
            updated_at: now - Duration::minutes(5),
        }
    }

    #[test]
    fn renders_header_and_rows() {
        no_color();
        let now = Utc::now();
        let state = ViewState::new("", SortDirective::CountDesc);
        let out = render_inventory(&state, &[item("apple", 12, now)], now);

        let lines: Vec<_> = out.lines().collect();
        assert!(lines[0].starts_with("Name "));
        assert!(lines[0].contains("Count (↑)"));
        assert!(lines[1].starts_with("Apple "));
        assert!(lines[1].contains("12"));
        assert!(lines[1].contains("5 minutes ago"));
    }

    #[test]
    fn renders_empty_view_with_search() {
        no_color();
        let state = ViewState::new("kiwi", SortDirective::None);
        let out = render_inventory(&state, &[], Utc::now());
        assert_eq!(out, "Search: kiwi\nNo items found.\n");
    }

    #[test]
    fn suggestions_only_for_active_search() {
        let names = vec!["apple".to_string(), "pineapple".to_string()];
        let message = suggestion_message("app", &names).unwrap();
        assert_eq!(message.content, "Matches: Apple, Pineapple");
        assert_eq!(message.level, MessageLevel::Info);

        assert!(suggestion_message("", &names).is_none());
        assert!(suggestion_message("kiwi", &[]).is_none());
    }

    #[test]
    fn truncates_long_names() {
        let long = "a".repeat(NAME_WIDTH * 2);
        let fitted = fit_to_width(&long, 10);
        assert_eq!(fitted.width(), 10);
        assert!(fitted.ends_with('…'));
        assert_eq!(fit_to_width("short", 10), "short");
    }
}
