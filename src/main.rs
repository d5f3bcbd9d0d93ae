use log::error;

use flying_potato::{HttpServer, ServerConfig};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };

    let server = HttpServer::new(config);
    if let Err(e) = server.start().await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
