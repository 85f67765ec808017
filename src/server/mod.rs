use crate::config::SearchConfig;
use crate::error::Result;
use crate::search::{RouteRequest, RouteSearch};
use crate::store::MapStore;
use crate::types::{RoadMap, Route};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::Filter;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Warp hands path segments over raw, so multi-word point and map names
/// arrive percent-encoded ("Belo%20Horizonte") and must be decoded before
/// they can match anything stored.
fn decode_path_segment(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

fn error_reply(status: StatusCode, message: impl Into<String>) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&ErrorBody {
            error: message.into(),
        }),
        status,
    )
}

fn with_store(
    store: Arc<MapStore>,
) -> impl Filter<Extract = (Arc<MapStore>,), Error = Infallible> + Clone {
    warp::any().map(move || store.clone())
}

/// All endpoints of the route service:
/// - `GET /routes/cheapest/{origin}/{destination}/{economy}/{unit_cost}`
/// - `POST /maps` with a map JSON body
/// - `DELETE /maps/{name}`
///
/// No-route outcomes and configuration/storage errors come back as 400
/// with a JSON error body; they are client-correctable conditions.
pub fn routes(
    store: Arc<MapStore>,
    config: SearchConfig,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let cheapest = warp::path!("routes" / "cheapest" / String / String / f64 / f64)
        .and(warp::get())
        .and(with_store(store.clone()))
        .and(warp::any().map(move || config.clone()))
        .and_then(handle_cheapest_route);

    let save_map = warp::path!("maps")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_store(store.clone()))
        .and_then(handle_save_map);

    let remove_map = warp::path!("maps" / String)
        .and(warp::delete())
        .and(with_store(store))
        .and_then(handle_remove_map);

    cheapest.or(save_map).or(remove_map)
}

async fn handle_cheapest_route(
    origin: String,
    destination: String,
    fuel_economy_km_per_l: f64,
    fuel_cost_per_l: f64,
    store: Arc<MapStore>,
    config: SearchConfig,
) -> std::result::Result<impl warp::Reply, warp::Rejection> {
    // The generation loop can run for the full configured time budget, so
    // it must not block the runtime's executor threads.
    let outcome = tokio::task::spawn_blocking(move || -> Result<Option<Route>> {
        let maps = store.read_all()?;
        let request = RouteRequest {
            origin: decode_path_segment(&origin),
            destination: decode_path_segment(&destination),
            fuel_economy_km_per_l,
            fuel_cost_per_l,
        };
        RouteSearch::new(&config).cheapest_route(&maps, &request)
    })
    .await;

    let reply = match outcome {
        Ok(Ok(Some(route))) => {
            warp::reply::with_status(warp::reply::json(&route), StatusCode::OK)
        }
        Ok(Ok(None)) => error_reply(
            StatusCode::BAD_REQUEST,
            "no route found for the given parameters",
        ),
        Ok(Err(err)) => {
            log::error!("route search failed: {}", err);
            error_reply(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(err) => {
            log::error!("route search task panicked: {}", err);
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, "search task failed")
        }
    };

    Ok::<_, warp::Rejection>(reply)
}

async fn handle_save_map(
    map: RoadMap,
    store: Arc<MapStore>,
) -> std::result::Result<impl warp::Reply, warp::Rejection> {
    let reply = match store.save_map(map) {
        Ok(saved) => warp::reply::with_status(warp::reply::json(&saved), StatusCode::OK),
        Err(err) => {
            log::error!("failed to save map: {}", err);
            error_reply(StatusCode::BAD_REQUEST, err.to_string())
        }
    };
    Ok::<_, warp::Rejection>(reply)
}

async fn handle_remove_map(
    name: String,
    store: Arc<MapStore>,
) -> std::result::Result<impl warp::Reply, warp::Rejection> {
    let name = decode_path_segment(&name);
    let reply = match store.remove_by_name(&name) {
        Ok(()) => warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "removed": name })),
            StatusCode::OK,
        ),
        Err(err) => {
            log::error!("failed to remove map '{}': {}", name, err);
            error_reply(StatusCode::BAD_REQUEST, err.to_string())
        }
    };
    Ok::<_, warp::Rejection>(reply)
}

/// Bind and serve until the process is stopped.
pub async fn serve(store: Arc<MapStore>, config: SearchConfig, port: u16) {
    log::info!("starting webserver on port {}", port);
    warp::serve(routes(store, config)).run(([0, 0, 0, 0], port)).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;

    fn test_store() -> (tempfile::TempDir, Arc<MapStore>) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MapStore::new(dir.path().join("db.json")));
        (dir, store)
    }

    fn test_config() -> SearchConfig {
        SearchConfig {
            max_generations: 20,
            seed: Some(7),
            ..SearchConfig::default()
        }
    }

    fn sample_map() -> RoadMap {
        let mut map = RoadMap::new("triangle");
        map.add_segment(Segment::new("A", "B", 100.0));
        map.add_segment(Segment::new("B", "C", 50.0));
        map.add_segment(Segment::new("A", "C", 400.0));
        map
    }

    #[tokio::test]
    async fn post_map_assigns_ids() {
        let (_dir, store) = test_store();
        let api = routes(store, test_config());

        let res = warp::test::request()
            .method("POST")
            .path("/maps")
            .json(&sample_map())
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let saved: RoadMap = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(saved.id, Some(1));
        assert_eq!(saved.segments[2].id, 3);
    }

    #[tokio::test]
    async fn get_cheapest_route_returns_the_route() {
        let (_dir, store) = test_store();
        store.save_map(sample_map()).unwrap();
        let api = routes(store, test_config());

        let res = warp::test::request()
            .method("GET")
            .path("/routes/cheapest/A/C/10.0/2.0")
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let route: Route = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(route.waypoints, vec!["A", "B", "C"]);
        assert!((route.total_cost - 30.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn missing_route_is_a_client_error() {
        let (_dir, store) = test_store();
        store.save_map(sample_map()).unwrap();
        let api = routes(store, test_config());

        let res = warp::test::request()
            .method("GET")
            .path("/routes/cheapest/C/A/10.0/2.0")
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bad_fuel_economy_is_a_client_error() {
        let (_dir, store) = test_store();
        store.save_map(sample_map()).unwrap();
        let api = routes(store, test_config());

        let res = warp::test::request()
            .method("GET")
            .path("/routes/cheapest/A/C/0.0/2.0")
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn percent_encoded_point_names_are_decoded() {
        let (_dir, store) = test_store();
        let mut map = RoadMap::new("brazil");
        map.add_segment(Segment::new("Belo Horizonte", "Montes Claros", 426.0));
        map.add_segment(Segment::new("Montes Claros", "Salvador", 1014.0));
        store.save_map(map).unwrap();
        let api = routes(store, test_config());

        let res = warp::test::request()
            .method("GET")
            .path("/routes/cheapest/Belo%20Horizonte/Salvador/13.5/3.2")
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let route: Route = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(
            route.waypoints,
            vec!["Belo Horizonte", "Montes Claros", "Salvador"]
        );
        assert!((route.total_cost - 341.33).abs() < 0.01);
    }

    #[tokio::test]
    async fn percent_encoded_map_names_are_decoded_on_delete() {
        let (_dir, store) = test_store();
        let mut map = RoadMap::new("minas gerais");
        map.add_segment(Segment::new("A", "B", 10.0));
        store.save_map(map).unwrap();
        let api = routes(store.clone(), test_config());

        let res = warp::test::request()
            .method("DELETE")
            .path("/maps/minas%20gerais")
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(store.read_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_map_removes_it() {
        let (_dir, store) = test_store();
        store.save_map(sample_map()).unwrap();
        let api = routes(store.clone(), test_config());

        let res = warp::test::request()
            .method("DELETE")
            .path("/maps/TRIANGLE")
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(store.read_all().unwrap().is_empty());
    }
}
