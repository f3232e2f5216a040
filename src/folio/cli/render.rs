//! Terminal rendering for listings, posts and messages.
//!
//! Everything here returns a `String`; the command handlers do the printing.
//! Width math stays Unicode-aware so titles with wide glyphs line up.

use chrono::{NaiveDate, NaiveTime, Utc};
use colored::Colorize;
use folio::api::{CmdMessage, FilterButton, ListView, MessageLevel, OpenPost};
use folio::config::FolioConfig;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
const CATEGORY_WIDTH: usize = 10;
const EMPTY_STATE: &str = "No posts yet. Check back soon.";
const RULE: &str = "--------------------------------";

pub fn render_filter_bar(buttons: &[FilterButton]) -> String {
    let labels: Vec<String> = buttons
        .iter()
        .map(|b| {
            if b.active {
                format!("[{}]", b.label).bold().to_string()
            } else {
                format!(" {} ", b.label).dimmed().to_string()
            }
        })
        .collect();
    format!("{}\n", labels.join(" "))
}

pub fn render_post_list(view: &ListView) -> String {
    if view.shows_empty_state() {
        return format!("{}\n", EMPTY_STATE);
    }

    let mut output = String::new();
    for (i, entry) in view.entries().iter().enumerate() {
        let idx_str = format!("{}. ", i + 1);
        let category = format!("{:<width$}", entry.category.label(), width = CATEGORY_WIDTH);

        let fixed_width = 4 + idx_str.width() + CATEGORY_WIDTH + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title = truncate_to_width(&entry.title, available);
        let padding = " ".repeat(available.saturating_sub(title.width()));

        output.push_str(&format!(
            "    {}{}{}{}{}\n",
            idx_str.yellow(),
            title,
            padding,
            category.cyan(),
            format_time_ago(entry.date).dimmed()
        ));

        let excerpt_width = LINE_WIDTH.saturating_sub(4 + idx_str.width());
        output.push_str(&format!(
            "    {}{}\n",
            " ".repeat(idx_str.width()),
            truncate_to_width(&entry.excerpt, excerpt_width).dimmed()
        ));
    }
    output
}

pub fn render_full_post(post: &OpenPost) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", post.title.bold()));
    output.push_str(&format!(
        "{} · {}\n",
        post.category.label().cyan(),
        post.display_date.dimmed()
    ));
    output.push_str(RULE);
    output.push_str("\n\n");
    output.push_str(post.markdown.trim_end());
    output.push('\n');
    output
}

pub fn render_config(config: &FolioConfig) -> String {
    let mut output = String::new();
    for key in FolioConfig::keys() {
        if let Ok(value) = config.get(key) {
            output.push_str(&format!("{} = {}\n", key, value));
        }
    }
    output
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut output = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        output.push_str(&format!("{}\n", line));
    }
    output
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let c = if c == '\n' { ' ' } else { c };
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

/// Publication date as a right-aligned "3 weeks ago" column.
pub fn format_time_ago(date: NaiveDate) -> String {
    let published = date.and_time(NaiveTime::MIN).and_utc();
    let duration = Utc::now().signed_duration_since(published);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
