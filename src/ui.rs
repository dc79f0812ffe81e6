use crate::bot::Responder;
use crate::config::BotConfig;
use crate::conversation::Conversation;
use crate::views::ChatView;
use dioxus::prelude::*;

const CHAT_CSS: Asset = asset!("/assets/chat.css");

fn build_responder() -> Responder {
    let config = BotConfig::from_env().unwrap_or_else(|err| {
        tracing::warn!("invalid configuration, using defaults: {}", err);
        BotConfig::default()
    });
    if config.weather_api_key.is_none() {
        tracing::warn!("WEATHER_API_KEY is not set, weather lookups will fail");
    }
    Responder::from_config(&config)
}

#[component]
pub fn App() -> Element {
    let responder = use_signal(build_responder);
    let conversation = use_signal(Conversation::new);

    rsx! {
        document::Link { rel: "stylesheet", href: CHAT_CSS }
        div { class: "app-shell",
            div { class: "chat-card",
                ChatHeader { conversation }
                ChatView { conversation, responder }
            }
        }
    }
}

#[component]
fn ChatHeader(conversation: Signal<Conversation>) -> Element {
    let mut conversation = conversation;
    rsx! {
        div { class: "header",
            div { class: "header-title",
                span { class: "avatar bot", "🤖" }
                h1 { "Friendly Chatbot" }
            }
            div { class: "header-actions",
                span { class: "header-icon", title: "Weather enabled", "☁" }
                button {
                    class: "icon-btn",
                    r#type: "button",
                    title: "Reset conversation",
                    onclick: move |_| conversation.with_mut(|c| c.reset()),
                    "↻"
                }
            }
        }
    }
}
