/// `.env` is optional; the bundled config.env covers anything it leaves out.
#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() -> dotenvy::Result<()> {
    dotenvy::dotenv().map(|_| ())
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() -> dotenvy::Result<()> {
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("nopi=info")),
        )
        .init();
}

#[cfg(target_arch = "wasm32")]
fn init_tracing() {}

fn main() {
    // Load .env first so a RUST_LOG set there reaches the filter
    let dotenv = load_dotenv();
    init_tracing();
    if let Err(err) = dotenv {
        tracing::debug!(error = %err, "no .env loaded");
    }
    dioxus::launch(nopi::ui::App);
}
