/// Stylesheet for the chat panel. Bubble content keeps its whitespace.
pub const PANEL_CSS: &str = r#"
:root {
    --color-bg-primary: #ffffff;
    --color-bg-secondary: #f5f5f5;
    --color-text-primary: #1f2933;
    --color-text-muted: #4a4a4a;
    --color-border: #d0d7de;
    --color-accent: #2563eb;
    --color-chat-user-bg: #3b82f6;
    --color-chat-user-text: #ffffff;
    --color-chat-bot-bg: #f3f4f6;
    --color-chat-bot-text: #1f2933;
    --color-timestamp: #606060;
}
body { margin: 0; background: var(--color-bg-primary); color: var(--color-text-primary); font-family: system-ui, sans-serif; }
.main-container { display: flex; flex-direction: column; height: 100vh; max-width: 56rem; margin: 0 auto; padding: 1rem; box-sizing: border-box; }
.panel-header { display: flex; justify-content: space-between; align-items: center; border-bottom: 1px solid var(--color-border); padding-bottom: 0.75rem; }
.panel-title { font-size: 1.25rem; color: var(--color-accent); margin: 0; }
.panel-actions { display: flex; gap: 0.5rem; }
.chat-list { flex: 1; overflow-y: auto; padding: 1rem 0; display: flex; flex-direction: column; gap: 1rem; }
.message-row { display: flex; }
.message-row.user { justify-content: flex-end; }
.message-row.bot { justify-content: flex-start; }
.bubble { max-width: 80%; border-radius: 0.5rem; padding: 0.75rem; }
.bubble.user { background: var(--color-chat-user-bg); color: var(--color-chat-user-text); }
.bubble.bot { background: var(--color-chat-bot-bg); color: var(--color-chat-bot-text); }
.content { white-space: pre-wrap; }
.mode-badge { display: inline-flex; gap: 0.25rem; font-size: 0.75rem; padding: 0.25rem 0.5rem; margin-bottom: 0.5rem; border-radius: 999px; background: #dbeafe; color: #1d4ed8; }
.detail-badges { display: flex; flex-wrap: wrap; gap: 0.25rem; margin-bottom: 0.5rem; font-size: 0.75rem; }
.badge { padding: 0.25rem 0.5rem; border-radius: 999px; }
.tone-high { color: #dc2626; background: #fef2f2; }
.tone-medium { color: #ca8a04; background: #fefce8; }
.tone-low { color: #16a34a; background: #f0fdf4; }
.tone-neutral { color: #4b5563; background: #f9fafb; }
.badge-type { background: #f3e8ff; color: #7e22ce; }
.badge-urgency { background: #ffedd5; color: #c2410c; }
.badge-quality { background: #dcfce7; color: #166534; }
.selection-note { margin-top: 0.75rem; padding: 0.5rem; font-size: 0.75rem; background: #eff6ff; border-left: 4px solid #60a5fa; }
.selection-note-title { font-weight: 600; color: #1d4ed8; margin-bottom: 0.25rem; }
.message-meta { font-size: 0.75rem; opacity: 0.6; margin-top: 0.5rem; }
.message-meta.align-end { text-align: right; }
.waiting { display: flex; align-items: center; gap: 0.5rem; color: var(--color-text-muted); }
.spinner { width: 1rem; height: 1rem; border-radius: 50%; border-bottom: 2px solid var(--color-accent); animation: spin 1s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
.composer { border-top: 1px solid var(--color-border); padding-top: 1rem; }
.hstack { display: flex; gap: 0.5rem; }
.composer input { flex: 1; padding: 0.5rem; border: 1px solid var(--color-border); border-radius: 0.375rem; }
.btn { padding: 0.375rem 0.75rem; border: 1px solid var(--color-border); border-radius: 0.375rem; background: transparent; cursor: pointer; }
.btn:disabled { opacity: 0.5; cursor: default; }
.btn-primary { background: var(--color-accent); color: #ffffff; border-color: var(--color-accent); }
.btn-ghost.active { background: var(--color-bg-secondary); }
"#;
