use crate::config::ChatConfig;
use crate::session::ChatSession;
use crate::theme::PANEL_CSS;
use crate::views::ChatPanel;
use dioxus::prelude::*;

#[component]
pub fn App() -> Element {
    let config = use_hook(ChatConfig::from_env);

    rsx! {
        PanelStyles {}
        {
            match ChatSession::new(&config) {
                Ok(session) => rsx! { ChatPanel { initial: session } },
                Err(err) => rsx! { ConfigProblem { message: err.to_string() } },
            }
        }
    }
}

#[component]
fn PanelStyles() -> Element {
    rsx! {
        style { dangerous_inner_html: "{PANEL_CSS}" }
    }
}

#[component]
fn ConfigProblem(message: String) -> Element {
    tracing::error!(%message, "chat panel disabled");
    rsx! {
        div { class: "main-container",
            p { class: "text-muted", "채팅 설정을 불러오지 못했습니다: {message}" }
        }
    }
}
