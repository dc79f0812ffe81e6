use crate::bot::knowledge::CLOCK_FORMAT;
use comrak::{ComrakOptions, markdown_to_html};
use once_cell::sync::Lazy;
use time::{OffsetDateTime, UtcOffset};

static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    // Replies are line-oriented ("- Weather information"), keep every break.
    options.render.hardbreaks = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options
});

/// Bot replies to HTML. Raw HTML in the text is escaped.
pub fn reply_to_html(text: &str) -> String {
    markdown_to_html(text, &MARKDOWN_OPTIONS)
}

pub fn format_message_timestamp(timestamp: OffsetDateTime) -> Option<String> {
    let mut datetime = timestamp;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(CLOCK_FORMAT).ok()
}
