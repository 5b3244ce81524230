#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wordplay_backend::run().await
}
