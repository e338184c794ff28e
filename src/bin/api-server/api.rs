use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use restaurant_reviews::{
    pages::Pages,
    view::{DetailView, ListView},
    Config, DataProvider, Error, RestaurantQuery,
};

pub(super) struct ApiState {
    provider: DataProvider,
    pages: Pages,
}

impl ApiState {
    pub(super) fn new(config: &Config) -> restaurant_reviews::Result<Self> {
        let provider = DataProvider::new(config.dataset_source());
        let pages = Pages::new(config.maps_api_key.clone())?;
        Ok(Self::with_provider(provider, pages))
    }

    pub(super) fn with_provider(provider: DataProvider, pages: Pages) -> Self {
        Self { provider, pages }
    }
}

#[derive(serde::Serialize)]
struct ErrJsonResp {
    message: String,
}

#[derive(serde::Deserialize)]
pub(super) struct FilterParams {
    cuisine: Option<String>,
    neighborhood: Option<String>,
}

impl From<FilterParams> for RestaurantQuery {
    fn from(params: FilterParams) -> Self {
        RestaurantQuery {
            cuisine: params.cuisine.into(),
            neighborhood: params.neighborhood.into(),
        }
    }
}

fn html_page(page: restaurant_reviews::Result<String>) -> HttpResponse {
    match page {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            tracing::error!("fail to render page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn json_result<T: serde::Serialize>(result: restaurant_reviews::Result<T>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(err) => {
            let status = match err {
                Error::RestaurantNotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_GATEWAY,
            };
            tracing::error!("api request failed: {err}");
            HttpResponse::build(status).json(ErrJsonResp {
                message: err.to_string(),
            })
        }
    }
}

async fn render_list(data: &ApiState, params: FilterParams) -> HttpResponse {
    let mut view = ListView::new(params.into());
    view.load(&data.provider).await;
    html_page(data.pages.render_index(&view))
}

#[actix_web::get("/")]
pub(super) async fn index(
    data: web::Data<ApiState>,
    query: web::Query<FilterParams>,
) -> HttpResponse {
    render_list(&data, query.into_inner()).await
}

#[actix_web::get("/index.html")]
pub(super) async fn index_html(
    data: web::Data<ApiState>,
    query: web::Query<FilterParams>,
) -> HttpResponse {
    render_list(&data, query.into_inner()).await
}

#[actix_web::get("/restaurant.html")]
pub(super) async fn restaurant_page(data: web::Data<ApiState>, req: HttpRequest) -> HttpResponse {
    let mut view = DetailView::new();
    view.init_map(&data.provider, &req.uri().to_string()).await;
    html_page(data.pages.render_restaurant(&view))
}

#[actix_web::get("/js/map.js")]
pub(super) async fn map_script() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript")
        .body(include_str!("../../../static/map.js"))
}

#[actix_web::get("/api/v1/restaurants")]
pub(super) async fn restaurants(
    data: web::Data<ApiState>,
    query: web::Query<FilterParams>,
) -> HttpResponse {
    let query = RestaurantQuery::from(query.into_inner());
    json_result(
        data.provider
            .fetch_restaurants_by_cuisine_and_neighborhood(&query)
            .await,
    )
}

#[actix_web::get("/api/v1/restaurants/{id}")]
pub(super) async fn restaurant(
    data: web::Data<ApiState>,
    path: web::Path<String>,
) -> HttpResponse {
    json_result(data.provider.fetch_restaurant_by_id(&path).await)
}

#[actix_web::get("/api/v1/neighborhoods")]
pub(super) async fn neighborhoods(data: web::Data<ApiState>) -> HttpResponse {
    json_result(data.provider.fetch_neighborhoods().await)
}

#[actix_web::get("/api/v1/cuisines")]
pub(super) async fn cuisines(data: web::Data<ApiState>) -> HttpResponse {
    json_result(data.provider.fetch_cuisines().await)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test, App};
    use restaurant_reviews::{data::Dataset, DatasetSource};

    use super::*;

    fn state() -> web::Data<ApiState> {
        let dataset: Dataset =
            serde_json::from_str(include_str!("../../../data/restaurants.json")).unwrap();
        let provider = DataProvider::new(DatasetSource::Memory(Arc::new(dataset.restaurants)));
        web::Data::new(ApiState::with_provider(provider, Pages::new(None).unwrap()))
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(state())
                    .service(index)
                    .service(index_html)
                    .service(restaurant_page)
                    .service(restaurants)
                    .service(restaurant)
                    .service(neighborhoods)
                    .service(cuisines),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_list_page_filters() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/?cuisine=Asian&neighborhood=all")
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Mission Chinese Food"));
        assert!(html.contains("Kang Ho Dong Baekjeong"));
        assert!(!html.contains("<h1>Emily</h1>"));
        assert!(html.contains(r#"<option value="Asian" selected="selected">Asian</option>"#));
    }

    #[actix_web::test]
    async fn test_detail_page() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/restaurant.html?id=2")
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("<title>Emily</title>"));
        assert!(html.contains("Five star food, two star atmosphere."));

        let req = test::TestRequest::get().uri("/restaurant.html").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_json_api() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/v1/neighborhoods")
            .to_request();
        let neighborhood_names: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(neighborhood_names, ["Manhattan", "Brooklyn", "Queens"]);

        let req = test::TestRequest::get()
            .uri("/api/v1/restaurants?neighborhood=Manhattan")
            .to_request();
        let found: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(found.len(), 2);

        let req = test::TestRequest::get()
            .uri("/api/v1/restaurants/404")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Restaurant does not exist");
    }
}
