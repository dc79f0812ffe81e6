use super::{BotError, BotResult};
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

/// A canned reply: fixed text, or a generator evaluated each time it is picked.
#[derive(Clone, Copy)]
pub enum Reply {
    Text(&'static str),
    Generated(fn() -> BotResult<String>),
}

impl Reply {
    pub fn render(&self) -> BotResult<String> {
        match self {
            Reply::Text(text) => Ok((*text).to_string()),
            Reply::Generated(generate) => generate(),
        }
    }
}

pub struct Category {
    pub name: &'static str,
    pub patterns: &'static [&'static str],
    pub replies: &'static [Reply],
}

impl Category {
    /// `lowercase_input` must already be lowercased.
    pub fn matches(&self, lowercase_input: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| lowercase_input.contains(pattern))
    }
}

pub const WELCOME: &str = "Hello! I'm your friendly chatbot. I can help with:\n- Weather information\n- Math calculations\n- Unit conversions\n- Telling jokes\n- Time information\nWhat would you like to know?";

/// Checked in order; the first category with a matching pattern answers.
pub static CATEGORIES: &[Category] = &[
    Category {
        name: "greetings",
        patterns: &[
            "hello",
            "hi",
            "hey",
            "good morning",
            "good afternoon",
            "good evening",
        ],
        replies: &[
            Reply::Text("Hello! How can I help you today?"),
            Reply::Text("Hi there! What can I assist you with?"),
            Reply::Text("Hey! Feel free to ask me any questions."),
        ],
    },
    Category {
        name: "about",
        patterns: &["who are you", "what are you", "what can you do"],
        replies: &[
            Reply::Text(
                "I'm a friendly chatbot that can help you with:\n- Weather information\n- Math calculations\n- Telling jokes\n- Unit conversions\n- Time information\n- General chat\nFeel free to ask me anything!",
            ),
            Reply::Text(
                "I'm your AI assistant! I can help with weather, math, tell jokes, convert units, and more. What would you like to know?",
            ),
        ],
    },
    Category {
        name: "time",
        patterns: &["time", "what time", "current time"],
        replies: &[Reply::Generated(current_time_reply)],
    },
    Category {
        name: "jokes",
        patterns: &["tell me a joke", "joke", "make me laugh", "funny"],
        replies: &[
            Reply::Text("Why don't programmers like nature? It has too many bugs!"),
            Reply::Text("Why did the JavaScript developer wear glasses? Because he couldn't C#!"),
            Reply::Text("What do you call a fake noodle? An impasta!"),
            Reply::Text(
                "Why did the scarecrow win an award? Because he was outstanding in his field!",
            ),
            Reply::Text("What do you call a bear with no teeth? A gummy bear!"),
        ],
    },
];

pub static FALLBACK: &[Reply] = &[
    Reply::Text("I'm not sure I understand. Could you rephrase your question?"),
    Reply::Text("I'm still learning! Could you try asking in a different way?"),
    Reply::Text(
        "I don't have information about that yet. Is there something else I can help you with?",
    ),
];

pub const CLOCK_FORMAT: &[FormatItem<'static>] = format_description!(
    "[hour repr:12 padding:none]:[minute padding:zero]:[second padding:zero] [period case:upper]"
);

pub fn local_now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    match UtcOffset::current_local_offset() {
        Ok(offset) => now.to_offset(offset),
        Err(_) => now,
    }
}

fn current_time_reply() -> BotResult<String> {
    let formatted = local_now()
        .format(CLOCK_FORMAT)
        .map_err(BotError::Clock)?;
    Ok(format!("The current time is {formatted}"))
}

pub fn find_category(lowercase_input: &str) -> Option<&'static Category> {
    CATEGORIES
        .iter()
        .find(|category| category.matches(lowercase_input))
}
