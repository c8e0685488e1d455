#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let config = todoapp_server::config::Config::from_env()?;
    todoapp_server::web::start_web_server(config).await
}
