use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use restaurant_reviews::Config;

mod api;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_ansi(true)
        .with_file(false)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = web::Data::new(api::ApiState::new(&config)?);
    let origin = config.allowed_origin.clone();
    tracing::info!(
        "serving restaurants from {} on {}:{}",
        config
            .dataset_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| config.dataset_url.clone()),
        config.bind_addr,
        config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allowed_origin(&origin)
                    .allowed_methods(vec!["GET"]),
            )
            .app_data(state.clone())
            .service(api::index)
            .service(api::index_html)
            .service(api::restaurant_page)
            .service(api::map_script)
            .service(api::restaurants)
            .service(api::restaurant)
            .service(api::neighborhoods)
            .service(api::cuisines)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;
    Ok(())
}
