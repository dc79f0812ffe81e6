//! Integration tests for reply resolution and the chat thread
//!
//! Weather lookups run against a stub source or a wiremock server

use async_trait::async_trait;
use friendly_chatbot::bot::knowledge::{CATEGORIES, FALLBACK, Reply};
use friendly_chatbot::bot::{Responder, WEATHER_NEEDS_CITY, WEATHER_NOT_FOUND};
use friendly_chatbot::conversation::{Conversation, ERROR_REPLY};
use friendly_chatbot::types::{Feedback, Sender};
use friendly_chatbot::weather::{
    Condition, MainReadings, OpenWeatherClient, WeatherData, WeatherError, WeatherSource,
};
use std::sync::{Arc, Mutex};

struct StubWeather {
    data: Option<WeatherData>,
    calls: Mutex<Vec<String>>,
}

impl StubWeather {
    fn found(data: WeatherData) -> Arc<Self> {
        Arc::new(Self {
            data: Some(data),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn missing() -> Arc<Self> {
        Arc::new(Self {
            data: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherSource for StubWeather {
    async fn current(&self, city: &str) -> Result<WeatherData, WeatherError> {
        self.calls.lock().unwrap().push(city.to_string());
        self.data.clone().ok_or(WeatherError::MissingCondition)
    }
}

fn london() -> WeatherData {
    WeatherData {
        main: MainReadings {
            temp: 14.5,
            humidity: 72.0,
            feels_like: 13.2,
        },
        weather: vec![Condition {
            description: "light rain".to_string(),
            main: "Rain".to_string(),
        }],
        name: "London".to_string(),
    }
}

fn texts(replies: &[Reply]) -> Vec<&'static str> {
    replies
        .iter()
        .filter_map(|reply| match reply {
            Reply::Text(text) => Some(*text),
            Reply::Generated(_) => None,
        })
        .collect()
}

fn category_texts(name: &str) -> Vec<&'static str> {
    let category = CATEGORIES
        .iter()
        .find(|category| category.name == name)
        .unwrap();
    texts(category.replies)
}

fn offline_responder(seed: u64) -> Responder {
    Responder::seeded(StubWeather::missing(), seed)
}

mod intent_tests {
    use super::*;

    #[tokio::test]
    async fn test_greetings() {
        let responder = offline_responder(1);
        let greetings = category_texts("greetings");
        for input in ["hello", "Hi", "HEY there", "good morning!"] {
            let reply = responder.respond(input).await.unwrap();
            assert!(greetings.contains(&reply.as_str()), "{input} -> {reply}");
        }
    }

    #[tokio::test]
    async fn test_arithmetic() {
        let responder = offline_responder(1);
        assert_eq!(responder.respond("12+7").await.unwrap(), "The answer is 19");
        assert_eq!(
            responder.respond("What is 100 / 8").await.unwrap(),
            "The answer is 12.5"
        );
    }

    #[tokio::test]
    async fn test_division_by_zero_falls_through() {
        let responder = offline_responder(1);
        let reply = responder.respond("10/0").await.unwrap();
        assert!(texts(FALLBACK).contains(&reply.as_str()));
        assert!(!reply.starts_with("The answer is"));
        assert_ne!(reply, ERROR_REPLY);
    }

    #[tokio::test]
    async fn test_unit_conversion() {
        let responder = offline_responder(1);
        assert_eq!(
            responder.respond("5 km to mi").await.unwrap(),
            "5KM is equal to 3.11mi"
        );
        assert_eq!(
            responder.respond("100 c to f").await.unwrap(),
            "100C is equal to 212.00°F"
        );
    }

    #[tokio::test]
    async fn test_conversion_wins_over_arithmetic() {
        let responder = offline_responder(1);
        let reply = responder.respond("what is 1 kg in lb").await.unwrap();
        assert_eq!(reply, "1KG is equal to 2.20lb");
    }

    #[tokio::test]
    async fn test_time_reply() {
        let responder = offline_responder(1);
        let reply = responder.respond("what time is it?").await.unwrap();
        assert!(reply.starts_with("The current time is "), "{reply}");
    }

    #[tokio::test]
    async fn test_jokes_and_about() {
        let responder = offline_responder(3);
        let joke = responder.respond("tell me a joke").await.unwrap();
        assert!(category_texts("jokes").contains(&joke.as_str()));
        let about = responder.respond("who are you?").await.unwrap();
        assert!(category_texts("about").contains(&about.as_str()));
    }

    #[tokio::test]
    async fn test_fallback() {
        let responder = offline_responder(1);
        let reply = responder.respond("qwerty").await.unwrap();
        assert!(texts(FALLBACK).contains(&reply.as_str()));
    }

    #[tokio::test]
    async fn test_same_seed_same_choices() {
        let first = offline_responder(42);
        let second = offline_responder(42);
        for _ in 0..10 {
            assert_eq!(
                first.respond("make me laugh").await.unwrap(),
                second.respond("make me laugh").await.unwrap()
            );
        }
    }
}

mod weather_tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_weather_success() {
        let stub = StubWeather::found(london());
        let responder = Responder::seeded(stub.clone(), 1);
        let reply = responder.respond("weather in London").await.unwrap();
        assert_eq!(
            reply,
            "Current weather in London:\n\
             🌡️ Temperature: 15°C (feels like 13°C)\n\
             💧 Humidity: 72%\n\
             🌥️ Conditions: Light rain"
        );
        assert_eq!(stub.calls(), vec!["London".to_string()]);
    }

    #[tokio::test]
    async fn test_weather_failure_is_fixed_apology() {
        let stub = StubWeather::missing();
        let responder = Responder::seeded(stub.clone(), 1);
        let reply = responder
            .respond("how's the weather in Nowhereville")
            .await
            .unwrap();
        assert_eq!(reply, WEATHER_NOT_FOUND);
        assert_eq!(stub.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_temperature_and_forecast_look_up_city() {
        let stub = StubWeather::found(london());
        let responder = Responder::seeded(stub.clone(), 1);

        let reply = responder
            .respond("what's the temperature in Oslo")
            .await
            .unwrap();
        assert!(reply.starts_with("Current weather in "));

        let reply = responder.respond("forecast in Rome please").await.unwrap();
        assert!(reply.starts_with("Current weather in "));

        assert_eq!(stub.calls(), vec!["Oslo".to_string(), "Rome".to_string()]);
    }

    #[tokio::test]
    async fn test_weather_without_city_makes_no_request() {
        let stub = StubWeather::found(london());
        let responder = Responder::seeded(stub.clone(), 1);
        let reply = responder.respond("what's the forecast?").await.unwrap();
        assert_eq!(reply, WEATHER_NEEDS_CITY);
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_weather_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "Paris"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": {"temp": -0.5, "humidity": 93, "feels_like": -4.51},
                "weather": [{"description": "overcast clouds", "main": "Clouds"}],
                "name": "Paris"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new(server.uri(), "test-key".into());
        let responder = Responder::seeded(Arc::new(client), 1);

        let reply = responder.respond("Weather in Paris").await.unwrap();
        assert_eq!(
            reply,
            "Current weather in Paris:\n\
             🌡️ Temperature: 0°C (feels like -5°C)\n\
             💧 Humidity: 93%\n\
             🌥️ Conditions: Overcast clouds"
        );

        let missing = responder.respond("weather in Atlantis").await.unwrap();
        assert_eq!(missing, WEATHER_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unreachable_provider() {
        // nothing listens on port 9 locally
        let client = OpenWeatherClient::new("http://127.0.0.1:9/weather".into(), "k".into());
        let responder = Responder::seeded(Arc::new(client), 1);
        let reply = responder.respond("weather in Berlin").await.unwrap();
        assert_eq!(reply, WEATHER_NOT_FOUND);
    }
}

mod conversation_tests {
    use super::*;

    #[tokio::test]
    async fn test_send_appends_user_then_bot() {
        let responder = offline_responder(1);
        let mut conversation = Conversation::new();

        let reply = conversation.send(&responder, "12+7").await.unwrap();
        assert_eq!(reply.text, "The answer is 19");

        let messages = conversation.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].text, "12+7");
        assert_eq!(messages[2].sender, Sender::Bot);
        assert!(!conversation.is_typing());
    }

    #[tokio::test]
    async fn test_send_blank_is_noop() {
        let responder = offline_responder(1);
        let mut conversation = Conversation::new();
        let before = conversation.clone();
        assert!(conversation.send(&responder, "   ").await.is_none());
        assert_eq!(conversation, before);
    }

    #[tokio::test]
    async fn test_feedback_after_turns() {
        let responder = offline_responder(1);
        let mut conversation = Conversation::new();
        conversation.send(&responder, "hello").await.unwrap();
        let bot_id = conversation.send(&responder, "5 km to mi").await.unwrap().id;
        let before: Vec<_> = conversation.messages().to_vec();

        assert!(conversation.set_feedback(bot_id, Feedback::Like));
        assert!(conversation.set_feedback(bot_id, Feedback::Like));

        let after = conversation.messages();
        assert_eq!(after.len(), before.len());
        for (old, new) in before.iter().zip(after) {
            assert_eq!(old.id, new.id);
            assert_eq!(old.text, new.text);
            if new.id == bot_id {
                assert_eq!(new.feedback, Some(Feedback::Like));
            } else {
                assert_eq!(new.feedback, old.feedback);
            }
        }
    }
}
