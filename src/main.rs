#[tokio::main]
async fn main() {
    if let Err(err) = guest_review_relay::axum().await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}
