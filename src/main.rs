use harris_proxy::cli;

#[tokio::main]
async fn main() {
    cli::run().await;
}
