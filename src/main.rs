use inventario::{start_server, Settings};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let settings = Settings::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let address = settings.bind_address();

    let server = start_server(settings)?;
    tracing::info!("Inventory backend listening on {}", address);

    server.await
}
