#[tokio::main]
async fn main() -> anyhow::Result<()> {
    glance_ui_terminal::run().await
}
