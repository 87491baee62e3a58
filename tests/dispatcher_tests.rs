//! Integration tests for the chat dispatcher
//!
//! Covers the send guard, the busy flag, success and failure appends, and the
//! HTTP backend against an in-process stub server.

use async_trait::async_trait;
use nopi::ai::{ChatBackend, ChatError, ChatResult, HttpBackend};
use nopi::config::ChatConfig;
use nopi::conversation::SEED_GREETING;
use nopi::session::{APOLOGY, ChatSession, SendOutcome};
use nopi::types::{ChatReply, ChatRequest, Role};
use reqwest::Url;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

fn session() -> ChatSession {
    ChatSession::new(&ChatConfig::default()).expect("default config is valid")
}

fn reply(text: &str) -> ChatReply {
    ChatReply {
        response: text.to_string(),
        ..ChatReply::default()
    }
}

fn transcript(session: &ChatSession) -> Vec<(Role, String)> {
    session
        .messages()
        .iter()
        .map(|m| (m.role, m.content.clone()))
        .collect()
}

/// Answers from a fixed script and records every request body it sees.
#[derive(Default)]
struct ScriptedBackend {
    script: Mutex<VecDeque<ChatResult<ChatReply>>>,
    bodies: Mutex<Vec<serde_json::Value>>,
    endpoints: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    fn with(script: Vec<ChatResult<ChatReply>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn complete(&self, endpoint: &Url, request: &ChatRequest<'_>) -> ChatResult<ChatReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies
            .lock()
            .unwrap()
            .push(serde_json::to_value(request).unwrap());
        self.endpoints.lock().unwrap().push(endpoint.path().to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ChatError::Backend("script exhausted".into())))
    }
}

/// Holds the request open until the test releases it.
struct GatedBackend {
    gate: Mutex<Option<futures::channel::oneshot::Receiver<ChatReply>>>,
}

#[async_trait]
impl ChatBackend for GatedBackend {
    async fn complete(&self, _endpoint: &Url, _request: &ChatRequest<'_>) -> ChatResult<ChatReply> {
        let rx = self.gate.lock().unwrap().take();
        match rx {
            Some(rx) => rx
                .await
                .map_err(|_| ChatError::Backend("gate dropped".into())),
            None => Err(ChatError::Backend("gate already used".into())),
        }
    }
}

mod scripted_backend_tests {
    use super::*;

    #[tokio::test]
    async fn test_blank_input_never_reaches_the_backend() {
        let backend = ScriptedBackend::default();
        let mut s = session();

        for blank in ["", "   ", "\n\t "] {
            s.set_input(blank);
            assert_eq!(s.send(&backend).await, None);
        }

        assert_eq!(backend.calls(), 0);
        assert_eq!(s.messages().len(), 1);
        assert!(!s.is_busy());
    }

    #[tokio::test]
    async fn test_successful_send_appends_user_and_reply() {
        let backend = ScriptedBackend::with(vec![Ok(reply("Hello"))]);
        let mut s = session();
        s.set_input("Hi");

        assert_eq!(s.send(&backend).await, Some(SendOutcome::Replied));

        assert_eq!(
            transcript(&s),
            vec![
                (Role::Bot, SEED_GREETING.to_string()),
                (Role::User, "Hi".to_string()),
                (Role::Bot, "Hello".to_string()),
            ]
        );
        assert!(!s.is_busy());
        assert_eq!(s.input(), "");
    }

    #[tokio::test]
    async fn test_failed_send_appends_user_and_apology() {
        let backend = ScriptedBackend::with(vec![Err(ChatError::Backend("boom".into()))]);
        let mut s = session();
        s.set_input("Hi");

        assert_eq!(s.send(&backend).await, Some(SendOutcome::Failed));

        assert_eq!(
            transcript(&s),
            vec![
                (Role::Bot, SEED_GREETING.to_string()),
                (Role::User, "Hi".to_string()),
                (Role::Bot, APOLOGY.to_string()),
            ]
        );
        assert!(!s.is_busy());
    }

    #[tokio::test]
    async fn test_conversation_stays_usable_after_failure() {
        let backend = ScriptedBackend::with(vec![
            Err(ChatError::Backend("down".into())),
            Ok(reply("back up")),
        ]);
        let mut s = session();

        s.set_input("first");
        s.send(&backend).await;
        s.set_input("second");
        assert_eq!(s.send(&backend).await, Some(SendOutcome::Replied));

        assert_eq!(s.messages().len(), 5);
        assert_eq!(s.messages()[4].content, "back up");
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_request_carries_full_history_as_role_and_content_only() {
        let mut annotated = reply("first answer");
        annotated.selected_mode = Some("thinking".into());
        annotated.complexity = Some("high".into());
        let backend = ScriptedBackend::with(vec![Ok(annotated), Ok(reply("second answer"))]);
        let mut s = session();

        s.set_input("one");
        s.send(&backend).await;
        s.set_input("two");
        s.send(&backend).await;

        let bodies = backend.bodies.lock().unwrap();
        assert_eq!(
            bodies[1],
            serde_json::json!({
                "messages": [
                    { "role": "bot", "content": SEED_GREETING },
                    { "role": "user", "content": "one" },
                    { "role": "bot", "content": "first answer" },
                    { "role": "user", "content": "two" },
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_user_text_is_stored_and_sent_as_typed() {
        let backend = ScriptedBackend::with(vec![Ok(reply("ok"))]);
        let mut s = session();
        let typed = "  line1\n  line2  ";
        s.set_input(typed);

        s.send(&backend).await;

        assert_eq!(s.messages()[1].role, Role::User);
        assert_eq!(s.messages()[1].content, typed);
        let bodies = backend.bodies.lock().unwrap();
        assert_eq!(bodies[0]["messages"][1]["content"], serde_json::json!(typed));
    }

    #[tokio::test]
    async fn test_details_toggle_switches_endpoint() {
        let backend = ScriptedBackend::with(vec![Ok(reply("a")), Ok(reply("b"))]);
        let mut s = session();

        s.set_input("plain");
        s.send(&backend).await;
        s.set_show_details(true);
        s.set_input("detailed");
        s.send(&backend).await;

        assert_eq!(
            *backend.endpoints.lock().unwrap(),
            vec!["/kenopi/chat".to_string(), "/kenopi/chat/advanced".to_string()]
        );
    }

    #[tokio::test]
    async fn test_reset_discards_history() {
        let backend = ScriptedBackend::with(vec![Ok(reply("Hello"))]);
        let mut s = session();
        s.set_input("Hi");
        s.send(&backend).await;

        s.reset();

        assert_eq!(transcript(&s), vec![(Role::Bot, SEED_GREETING.to_string())]);
    }

    #[tokio::test]
    async fn test_busy_only_while_request_is_unsettled() {
        let (tx, rx) = futures::channel::oneshot::channel();
        let backend = GatedBackend { gate: Mutex::new(Some(rx)) };
        let mut s = session();
        assert!(!s.is_busy());

        s.set_input("Hi");
        let pending = s.begin_send().expect("send accepted");

        let outcome = {
            let call = pending.dispatch(&backend);
            futures::pin_mut!(call);
            assert!(futures::poll!(&mut call).is_pending());

            assert!(s.is_busy());
            s.set_input("while busy");
            assert!(s.begin_send().is_none());
            assert_eq!(s.messages().len(), 2);

            tx.send(reply("Hello")).unwrap();
            call.await
        };

        assert!(s.is_busy());
        assert_eq!(s.finish(pending, outcome), SendOutcome::Replied);
        assert!(!s.is_busy());
        assert_eq!(s.messages().len(), 3);
        assert_eq!(s.input(), "while busy");
    }
}

mod http_backend_tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn find_header_end(buf: &[u8]) -> Option<usize> {
        buf.windows(4).position(|w| w == b"\r\n\r\n")
    }

    /// Serves one canned response and hands back the raw request it received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(end) = find_header_end(&buf) {
                    let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                    let length = headers
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|value| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if buf.len() >= end + 4 + length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            String::from_utf8_lossy(&buf).into_owned()
        });
        (format!("http://{addr}"), handle)
    }

    /// Fresh client per test so no pooled connection outlives its runtime.
    fn backend() -> HttpBackend {
        HttpBackend::with_client(reqwest::Client::new())
    }

    fn session_for(base: String) -> ChatSession {
        let config = ChatConfig {
            backend_url: base,
            ..ChatConfig::default()
        };
        ChatSession::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_hello_reply_is_appended() {
        let (base, server) = serve_once("200 OK", r#"{"response":"Hello"}"#).await;
        let mut s = session_for(base);
        s.set_input("Hi");

        assert_eq!(s.send(&backend()).await, Some(SendOutcome::Replied));
        assert_eq!(
            transcript(&s),
            vec![
                (Role::Bot, SEED_GREETING.to_string()),
                (Role::User, "Hi".to_string()),
                (Role::Bot, "Hello".to_string()),
            ]
        );

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /kenopi/chat HTTP/1.1"));
        assert!(request.contains(r#""messages":["#));
        assert!(request.contains(r#"{"role":"user","content":"Hi"}"#));
    }

    #[tokio::test]
    async fn test_annotations_flow_into_the_bot_message() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"response":"상세 답변","selected_mode":"enhanced","complexity":"high","question_type":"complaint","urgency":"medium","quality_score":9,"auto_selection":true}"#,
        )
        .await;
        let mut s = session_for(base);
        s.set_show_details(true);
        s.set_input("환불해 주세요");

        s.send(&backend()).await;
        server.await.unwrap();

        let notes = &s.messages()[2].annotations;
        assert_eq!(notes.selected_mode.as_deref(), Some("enhanced"));
        assert_eq!(notes.question_type.as_deref(), Some("complaint"));
        assert_eq!(notes.quality_score.as_deref(), Some("9"));
        assert_eq!(notes.auto_selection, Some(true));
    }

    #[tokio::test]
    async fn test_server_error_yields_apology() {
        let (base, server) = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
        let mut s = session_for(base);
        s.set_input("Hi");

        assert_eq!(s.send(&backend()).await, Some(SendOutcome::Failed));
        server.await.unwrap();

        assert_eq!(
            transcript(&s),
            vec![
                (Role::Bot, SEED_GREETING.to_string()),
                (Role::User, "Hi".to_string()),
                (Role::Bot, APOLOGY.to_string()),
            ]
        );
        assert!(!s.is_busy());
    }

    #[tokio::test]
    async fn test_malformed_body_yields_apology() {
        let (base, server) = serve_once("200 OK", "not json").await;
        let mut s = session_for(base);
        s.set_input("Hi");

        assert_eq!(s.send(&backend()).await, Some(SendOutcome::Failed));
        server.await.unwrap();
        assert_eq!(s.messages()[2].content, APOLOGY);
    }

    #[tokio::test]
    async fn test_reported_error_field_yields_apology() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"response":"","error":"채팅 처리 중 오류가 발생했습니다"}"#,
        )
        .await;
        let mut s = session_for(base);
        s.set_input("Hi");

        assert_eq!(s.send(&backend()).await, Some(SendOutcome::Failed));
        server.await.unwrap();
        assert_eq!(s.messages()[2].content, APOLOGY);
    }

    #[tokio::test]
    async fn test_unreachable_backend_yields_apology() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut s = session_for(format!("http://{addr}"));
        s.set_input("Hi");

        assert_eq!(s.send(&backend()).await, Some(SendOutcome::Failed));
        assert_eq!(s.messages().len(), 3);
        assert_eq!(s.messages()[2].content, APOLOGY);
        assert!(!s.is_busy());
    }
}
