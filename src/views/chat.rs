use crate::bot::Responder;
use crate::conversation::Conversation;
use crate::types::{Feedback, Message, Sender};
use crate::views::shared::{format_message_timestamp, reply_to_html};
use dioxus::events::Key;
use dioxus::prelude::*;

const SCROLL_TO_BOTTOM_JS: &str = r#"
const list = document.getElementById("chat-list");
if (list) { list.scrollTop = list.scrollHeight; }
"#;

fn sender_class(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "user",
        Sender::Bot => "bot",
    }
}

#[component]
pub fn ChatView(conversation: Signal<Conversation>, responder: Signal<Responder>) -> Element {
    let mut input = use_signal(String::new);

    use_effect(move || {
        // re-run whenever the thread or the typing row changes
        let _ = conversation.with(|c| (c.messages().len(), c.is_typing()));
        let _ = document::eval(SCROLL_TO_BOTTOM_JS);
    });

    let mut send_message = {
        let mut conversation = conversation;
        let mut input_signal = input;
        move |text: String| {
            let Some(turn) = conversation.with_mut(|c| c.submit(&text)) else {
                return;
            };
            input_signal.set(String::new());

            let responder = responder.peek().clone();
            spawn(async move {
                let reply = responder.respond(turn.text()).await;
                // a reset while waiting makes the turn stale and the reply is dropped
                conversation.with_mut(|c| {
                    c.complete(&turn, reply);
                });
            });
        }
    };

    let snapshot = conversation();
    let typing = snapshot.is_typing();

    rsx! {
        div { id: "chat-list", class: "chat-list",
            for msg in snapshot.messages().iter() {
                MessageRow { key: "{msg.id}", message: msg.clone(), conversation }
            }
            if typing {
                div { class: "message-row bot",
                    div { class: "bubble bot typing",
                        span { class: "avatar bot", "🤖" }
                        span { class: "typing-text", "typing..." }
                    }
                }
            }
        }

        div { class: "composer",
            input {
                r#type: "text",
                placeholder: "Type your message...",
                value: "{input}",
                disabled: typing,
                autofocus: true,
                oninput: move |ev| input.set(ev.value()),
                onkeydown: move |ev| {
                    if ev.key() == Key::Enter && !ev.modifiers().shift() {
                        ev.prevent_default();
                        send_message(input());
                    }
                },
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                title: "Send",
                disabled: typing || input().trim().is_empty(),
                onclick: move |_| send_message(input()),
                "Send"
            }
        }
    }
}

#[component]
fn MessageRow(message: Message, conversation: Signal<Conversation>) -> Element {
    let class = sender_class(message.sender);
    let timestamp = format_message_timestamp(message.timestamp).unwrap_or_default();
    let avatar = if message.is_bot() { "🤖" } else { "👤" };
    let reply_html = if message.is_bot() {
        reply_to_html(&message.text)
    } else {
        String::new()
    };

    rsx! {
        div { class: "message-row {class}",
            div { class: "bubble {class}",
                div { class: "message-meta",
                    span { class: "avatar {class}", "{avatar}" }
                    span { class: "message-timestamp", "{timestamp}" }
                }
                if message.is_bot() {
                    div { class: "md", dangerous_inner_html: "{reply_html}" }
                    FeedbackButtons { id: message.id, current: message.feedback, conversation }
                } else {
                    p { class: "plain", "{message.text}" }
                }
            }
        }
    }
}

#[component]
fn FeedbackButtons(id: u64, current: Option<Feedback>, conversation: Signal<Conversation>) -> Element {
    let mut conversation = conversation;
    let state_class = |feedback: Feedback| {
        if current == Some(feedback) {
            match feedback {
                Feedback::Like => "feedback-btn liked",
                Feedback::Dislike => "feedback-btn disliked",
            }
        } else {
            "feedback-btn"
        }
    };

    rsx! {
        div { class: "feedback",
            button {
                class: state_class(Feedback::Like),
                r#type: "button",
                title: "Helpful",
                onclick: move |_| {
                    conversation.with_mut(|c| c.set_feedback(id, Feedback::Like));
                },
                "👍"
            }
            button {
                class: state_class(Feedback::Dislike),
                r#type: "button",
                title: "Not helpful",
                onclick: move |_| {
                    conversation.with_mut(|c| c.set_feedback(id, Feedback::Dislike));
                },
                "👎"
            }
        }
    }
}
