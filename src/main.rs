#[tokio::main]
async fn main() -> anyhow::Result<()> {
    forecast_panel_lib::run().await
}
