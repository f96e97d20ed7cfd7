#[cfg(test)]
pub mod fixtures {
    /// Three well-formed sections in the grammar the prompt asks for.
    pub fn tagged_reply() -> String {
        "<Question>: What does HTTP stand for?
<Options>:
A) HyperText Transfer Protocol
B) High Transfer Text Protocol
C) Hyperlink Text Protocol
D) Host Transfer Protocol
<Answer>: A) HyperText Transfer Protocol
---
<Question>: Which port does HTTPS use by default?
<Options>:
A) Port 80
B) Port 443
C) Port 21
D) Port 8080
<Answer>: B) Port 443
---
<Question>: Which status code means the protocol is switching?
<Options>:
A) 200
B) 404
C) 101
D) 500
<Answer>: C) 101"
            .to_string()
    }

    /// The numbered layout some models fall back to.
    pub fn numbered_reply() -> String {
        "
        Question 1: What is the primary characteristic of WebSocket that differentiates it from HTTP?
        Options:
        - A) WebSocket is unidirectional.
        - B) WebSocket does not require a connection to be established.
        - C) WebSocket is a full-duplex protocol.
        - D) WebSocket uses a different transport layer protocol.
        Answer: C) WebSocket is a full-duplex protocol.

        ---

        Question 2: In which scenario is WebSocket particularly advantageous?
        Options:
        - A) Fetching old data.
        - B) Real-time web applications.
        - C) Sending large files.
        - D) Simple request-response interactions.
        Answer: B) Real-time web applications.

        ---

        Question 3: When should one avoid using WebSocket?
        Options:
        - A) When real-time data updates are needed.
        - B) When data needs to be pushed continuously.
        - C) When fetching old data that is not required frequently.
        - D) When maintaining a persistent connection is necessary.
        Answer: C) When fetching old data that is not required frequently.
        "
        .to_string()
    }

    pub fn websocket_note_html() -> String {
        "<h2><strong>WebSocket</strong></h2><p>WebSocket is bidirectional, a full-duplex protocol \
         that is used in the same scenario of client-server communication, unlike HTTP which starts \
         from&nbsp;<strong>ws://</strong>&nbsp;or&nbsp;<strong>wss://</strong>.&nbsp;</p><p><br></p>\
         <h2><strong>When can a web socket be used?</strong></h2><ul><li><strong>Real-time web \
         application:</strong>&nbsp;data is continuously pushed by the backend server.</li>\
         <li><strong>Chat application:</strong>&nbsp;the connection is established only once.</li></ul>"
            .to_string()
    }
}

#[cfg(test)]
pub mod fakes {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::services::completion_provider::{
        CompletionProvider, CompletionRequest, ProviderError,
    };

    /// Replays a fixed sequence of outcomes, one per call.
    pub struct ScriptedProvider {
        outcomes: Mutex<VecDeque<Result<String, ProviderError>>>,
        calls: AtomicUsize,
        delay: Option<Duration>,
    }

    impl ScriptedProvider {
        pub fn new(outcomes: Vec<Result<String, ProviderError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: AtomicUsize::new(0),
                delay: None,
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let outcome = self
                .outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::Unavailable("script exhausted".into())));

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            outcome
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fakes::ScriptedProvider;
    use super::fixtures::*;
    use crate::services::completion_provider::{CompletionProvider, CompletionRequest};

    #[test]
    fn fixtures_have_three_sections() {
        assert_eq!(tagged_reply().matches("---").count(), 2);
        assert_eq!(numbered_reply().matches("---").count(), 2);
        assert!(websocket_note_html().starts_with("<h2>"));
    }

    #[tokio::test]
    async fn scripted_provider_replays_in_order() {
        let provider = ScriptedProvider::new(vec![Ok("first".into()), Ok("second".into())]);
        let request = CompletionRequest {
            prompt: "p".into(),
            max_tokens: 10,
            temperature: 0.0,
            completion_count: 1,
        };

        assert_eq!(provider.complete(&request).await.unwrap(), "first");
        assert_eq!(provider.complete(&request).await.unwrap(), "second");
        assert!(provider.complete(&request).await.is_err());
        assert_eq!(provider.calls(), 3);
    }
}
