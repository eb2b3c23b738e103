use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use redis::Client as RedisClient;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use foodtruck_api::{
    config::Config, db, middleware::auth::JwtSecret, routes, services::email::EmailService,
    services::maps::MapsResolver, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let config = Arc::new(config);

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    info!("Database connected and migrations applied");

    let redis_client = RedisClient::open(config.redis_url.as_str())?;
    let redis_conn = redis_client.get_multiplexed_async_connection().await?;
    info!("Redis connected");

    let maps = Arc::new(MapsResolver::new(config.geocoding_api_key.clone()));

    let email = EmailService::new(&config).map(Arc::new);
    if email.is_some() {
        info!("SMTP email service configured");
    } else {
        info!("SMTP not configured — contact form disabled");
    }

    let state = AppState {
        db: pool,
        redis: redis_conn,
        config: config.clone(),
        maps,
        email,
    };

    // CORS: the configured site origin plus localhost for development.
    let base_url = config.app_base_url.clone();
    let cors_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let o = match origin.to_str() {
            Ok(s) => s,
            Err(_) => return false,
        };
        o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") || o == base_url
    });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_origin(cors_origin);

    let jwt_secret = JwtSecret(config.jwt_secret.clone());

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        // Auth
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/me", get(routes::auth::me))
        // Events
        .route("/events", get(routes::events::list_events).post(routes::events::create_event))
        .route(
            "/events/{id}",
            put(routes::events::update_event).delete(routes::events::delete_event),
        )
        .route("/events/{id}/calendar-link", get(routes::events::calendar_link))
        // Weekly schedule
        .route(
            "/schedule",
            get(routes::schedule::get_schedule).put(routes::schedule::replace_schedule),
        )
        // Menu
        .route("/menu", get(routes::menu::list_menu).post(routes::menu::create_menu_item))
        .route(
            "/menu/{id}",
            put(routes::menu::update_menu_item).delete(routes::menu::delete_menu_item),
        )
        // Truck location
        .route("/location", get(routes::location::current_location))
        .route("/resolve-maps-link", get(routes::maps::resolve_maps_link))
        // Contact form
        .route("/contact", post(routes::contact::submit_contact))
        // Image uploads
        .route("/uploads", post(routes::uploads::upload_image))
        .route("/uploads/{*path}", get(routes::uploads::serve_upload))
        .layer(axum::Extension(jwt_secret))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // 4 MB covers the 2 MB image cap plus multipart overhead
        .layer(DefaultBodyLimit::max(4 * 1024 * 1024))
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("{} API listening on {}", config.site_name, addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
