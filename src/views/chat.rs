use crate::ai::HttpBackend;
use crate::presentation::{AUTO_SELECTED_TEXT, BubbleView, WAITING_TEXT, enter_submits, present};
use crate::session::ChatSession;
use crate::types::Role;
use dioxus::events::Key;
use dioxus::prelude::*;

const PANEL_TITLE: &str = "⛱️ AI 고객지원 Nopi🤖";
const INPUT_PLACEHOLDER: &str = "🎯 질문을 입력하세요.";

fn role_class(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Bot => "bot",
    }
}

#[component]
pub fn ChatPanel(initial: ChatSession) -> Element {
    let mut session = use_signal(|| initial);

    let mut send_message = move || {
        let Some(pending) = session.with_mut(|s| s.begin_send()) else {
            return;
        };
        spawn(async move {
            let backend = HttpBackend::new();
            let outcome = pending.dispatch(&backend).await;
            session.with_mut(|s| s.finish(pending, outcome));
        });
    };

    let view = session.with(present);
    let input = session.with(|s| s.input().to_string());

    rsx! {
        div { class: "main-container",
            div { class: "panel-header",
                h1 { class: "panel-title", "{PANEL_TITLE}" }
                div { class: "panel-actions",
                    button {
                        class: format_args!("btn btn-ghost {}", if view.show_details { "active" } else { "" }),
                        r#type: "button",
                        onclick: move |_| session.with_mut(|s| s.toggle_details()),
                        if view.show_details { "간단히" } else { "상세히" }
                    }
                    button {
                        class: "btn btn-ghost", r#type: "button",
                        onclick: move |_| session.with_mut(|s| s.reset()),
                        "새 대화"
                    }
                }
            }

            div { id: "chat-list", class: "chat-list",
                for (i, bubble) in view.bubbles.iter().enumerate() {
                    MessageBubble { key: "{i}", bubble: bubble.clone() }
                }
                if view.waiting {
                    div { class: "message-row bot",
                        div { class: "bubble bot waiting",
                            span { class: "spinner" }
                            span { class: "shimmer-text", "{WAITING_TEXT}" }
                        }
                    }
                }
            }

            form { class: "composer no-divider",
                div { class: "composer-inner hstack",
                    input {
                        r#type: "text",
                        placeholder: INPUT_PLACEHOLDER,
                        value: "{input}",
                        oninput: move |ev| session.with_mut(|s| s.set_input(ev.value())),
                        onkeydown: move |ev| {
                            if ev.key() == Key::Enter
                                && enter_submits(ev.modifiers().shift(), ev.is_composing())
                            {
                                ev.prevent_default();
                                send_message();
                            }
                        },
                        disabled: view.input_disabled,
                        autofocus: true,
                    }
                    button {
                        class: "btn btn-primary", r#type: "button",
                        disabled: view.send_disabled,
                        onclick: move |_| send_message(),
                        if view.input_disabled { "⏳" } else { "전송" }
                    }
                }
            }
        }
    }
}

#[component]
fn MessageBubble(bubble: BubbleView) -> Element {
    let role = role_class(bubble.role);
    rsx! {
        div { class: format_args!("message-row {role}"),
            div { class: format_args!("bubble {role}"),
                if let Some(badge) = &bubble.mode_badge {
                    div { class: "mode-badge",
                        "{badge.icon} "
                        span { class: "mode-label", "{badge.label}" }
                        span { class: "mode-auto", " {AUTO_SELECTED_TEXT}" }
                    }
                }
                if !bubble.detail_badges.is_empty() {
                    div { class: "detail-badges",
                        for badge in bubble.detail_badges.iter() {
                            span { class: format_args!("badge {}", badge.class()), "{badge.text()}" }
                        }
                    }
                }
                div { class: "content", "{bubble.content}" }
                if let Some(note) = &bubble.selection_note {
                    div { class: "selection-note",
                        div { class: "selection-note-title", "🎯 자동 모드 선택 결과" }
                        div { "{note}" }
                    }
                }
                if let Some(ts) = &bubble.timestamp {
                    div { class: format_args!("message-meta {}", bubble.align.class()),
                        span { class: "message-timestamp", "{ts}" }
                    }
                }
            }
        }
    }
}
