use crate::configuration::Settings;
use crate::connectors;
use crate::feature_matrix::{FeatureMatrixService, Resolver};
use crate::helpers::JsonResponse;
use crate::middleware;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, error, middleware as actix_middleware, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let resolver = Resolver::default().with_overrides(&settings.feature_matrix.overrides);
    let feature_matrix = web::Data::new(FeatureMatrixService::new(
        resolver,
        Duration::from_secs(settings.cache.feature_matrix_ttl_secs),
    ));

    let asset_cache = web::Data::new(routes::asset::AssetListCache::new(Duration::from_secs(
        settings.cache.asset_list_ttl_secs,
    )));

    let road_connector = connectors::init_overpass(&settings.connectors);

    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let message = match &err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "Invalid JSON at line {}, column {}: {}",
                err.line(),
                err.column(),
                err
            ),
            err => format!("Invalid JSON payload: {}", err),
        };
        JsonResponse::<()>::build().bad_request(message)
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::authentication::Manager::new())
            .wrap(actix_middleware::Compress::default())
            .wrap(Cors::permissive())
            .service(
                web::scope("/health_check")
                    .service(routes::health_check)
                    .service(routes::readiness),
            )
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/feature-matrix")
                            .service(routes::feature_matrix::features)
                            .service(routes::feature_matrix::plan_matrix)
                            .service(routes::feature_matrix::plan_feature),
                    )
                    .service(
                        web::scope("/issues")
                            .service(routes::issue::list)
                            .service(routes::issue::add)
                            .service(routes::issue::update_status),
                    )
                    .service(
                        web::scope("/plan-tracking")
                            .wrap(middleware::authorization::Guard::authenticated())
                            .service(routes::plan_tracking::summary)
                            .service(routes::plan_tracking::organization)
                            .service(routes::plan_tracking::history),
                    )
                    .service(
                        web::scope("/assets")
                            .wrap(middleware::authorization::Guard::authenticated())
                            .service(routes::asset::list)
                            .service(routes::asset::add),
                    )
                    .service(
                        web::scope("/roads")
                            .wrap(middleware::authorization::Guard::authenticated())
                            .service(routes::road::list),
                    )
                    .service(
                        web::scope("/admin")
                            .wrap(middleware::authorization::Guard::admin())
                            .service(
                                web::scope("/organizations")
                                    .service(routes::organization::list)
                                    .service(routes::organization::item)
                                    .service(routes::organization::add)
                                    .service(routes::organization::update)
                                    .service(routes::organization::change_plan)
                                    .service(routes::organization::delete),
                            )
                            .service(
                                web::scope("/users")
                                    .service(routes::user::list)
                                    .service(routes::user::item)
                                    .service(routes::user::add)
                                    .service(routes::user::update)
                                    .service(routes::user::delete),
                            )
                            .service(
                                web::scope("/transactions")
                                    .service(routes::transaction::list)
                                    .service(routes::transaction::item)
                                    .service(routes::transaction::add)
                                    .service(routes::transaction::update_status),
                            )
                            .service(
                                web::scope("/revenue-analytics")
                                    .service(routes::analytics::revenue_analytics),
                            )
                            .service(
                                web::scope("/settings")
                                    .service(routes::setting::list)
                                    .service(routes::setting::item)
                                    .service(routes::setting::upsert),
                            ),
                    ),
            )
            .app_data(json_config.clone())
            .app_data(pg_pool.clone())
            .app_data(feature_matrix.clone())
            .app_data(asset_cache.clone())
            .app_data(road_connector.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
