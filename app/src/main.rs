#[tokio::main]
async fn main() -> anyhow::Result<()> {
    waypoint_lib::run().await
}
