/// Backend access for the support chat.
///
/// The panel talks to its backend through the [`ChatBackend`] trait. The
/// production implementation, [`HttpBackend`], posts the trimmed history as
/// JSON and decodes the `{ response, ... }` reply.
///
/// ```rust,no_run
/// use nopi::ai::HttpBackend;
/// use nopi::config::ChatConfig;
/// use nopi::session::ChatSession;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut session = ChatSession::new(&ChatConfig::from_env())?;
/// session.set_input("배송은 얼마나 걸리나요?");
/// session.send(&HttpBackend::new()).await;
/// # Ok(())
/// # }
/// ```
mod client;

pub use client::{ChatBackend, ChatError, ChatResult, HttpBackend, parse_reply};
