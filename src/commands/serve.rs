use crate::config::Settings;
use crate::server::{self, AppState};

pub async fn run(port: u16) {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    println!("🚀 Starting Harris Trading World proxy server...");
    println!("📊 Finviz Elite screener: /api/screener");
    println!("📰 Finnhub news: /api/finnhub/news");
    println!("💹 Stock snapshots: /api/stock/{{ticker}}");
    println!("🌐 Server running on http://localhost:{}", port);
    println!("⚠️  Keep this window open!");
    println!();

    let settings = Settings::from_env(port);

    let state = match AppState::new(&settings) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to initialize clients: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::serve(state, port).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
