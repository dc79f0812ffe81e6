fn main() {
    friendly_chatbot::config::load_env();

    #[cfg(not(target_arch = "wasm32"))]
    tracing_subscriber::fmt::init();

    tracing::info!("starting friendly chatbot");
    dioxus::launch(friendly_chatbot::ui::App);
}
