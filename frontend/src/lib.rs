use seed::{prelude::*, *};
use serde::Deserialize;
use serde_wasm_bindgen::to_value;
use shared::error::{LocationError, RouteFetchError};
use shared::osrm::{OsrmResponse, route_url};
use shared::state::{RouteQuery, TripState};
use shared::{Coordinate, RouteResult, catalog};
use wasm_bindgen::{
    JsCast,
    prelude::{JsValue, wasm_bindgen},
};

#[wasm_bindgen(module = "/map_shim.js")]
extern "C" {
    #[wasm_bindgen(js_name = requestLocation)]
    fn request_location(timeout_ms: u32, maximum_age_ms: u32);
    #[wasm_bindgen(js_name = initMap)]
    fn init_map(access_token: Option<String>, style_url: &str, center: JsValue, zoom: f64);
    #[wasm_bindgen(js_name = updateUserMarker)]
    fn update_user_marker(lon_lat: JsValue);
    #[wasm_bindgen(js_name = updateDestinationMarker)]
    fn update_destination_marker(lon_lat: JsValue);
    #[wasm_bindgen(js_name = updateRoute)]
    fn update_route_js(coordinates: JsValue);
    #[wasm_bindgen(js_name = centerCamera)]
    fn center_camera(lon_lat: JsValue, zoom: f64);
}

const CAMERA_ZOOM: f64 = 14.0;
const LOCATION_TIMEOUT_MS: u32 = 20_000;
const LOCATION_MAX_AGE_MS: u32 = 1_000;

// Browser geolocation error codes.
const PERMISSION_DENIED: u32 = 1;
const POSITION_UNAVAILABLE: u32 = 2;
const FIX_TIMEOUT: u32 = 3;

fn style_url() -> &'static str {
    option_env!("MAP_STYLE_URL")
        .unwrap_or("https://api.maptiler.com/maps/outdoor-v2/style.json?key=2W9TXvFsJ7aosPmPOFz7")
}

/// Tile-provider key, threaded into map setup explicitly instead of living
/// in provider-global state.
fn access_token() -> Option<String> {
    option_env!("MAP_ACCESS_TOKEN").map(str::to_string)
}

fn routing_root() -> String {
    if let Some(url) = option_env!("ROUTING_API_ROOT") {
        return url.trim_end_matches('/').to_string();
    }
    "https://router.project-osrm.org".to_string()
}

pub struct Model {
    trip: TripState,
    map_ready: bool,
}

#[derive(Debug)]
pub enum Msg {
    LocationFixed { lat: f64, lon: f64 },
    LocationFailed { code: u32, message: String },
    DestinationPicked(&'static str),
    Recenter,
    RouteFetched(u64, Result<RouteResult, RouteFetchError>),
}

pub fn init(_: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders.stream(streams::window_event(Ev::from("location-fix"), |event| {
        fix_event_msg(event)
    }));
    orders.stream(streams::window_event(Ev::from("location-error"), |event| {
        error_event_msg(event)
    }));

    // Triggers the permission prompt on first use.
    request_location(LOCATION_TIMEOUT_MS, LOCATION_MAX_AGE_MS);

    Model {
        trip: TripState::default(),
        map_ready: false,
    }
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::LocationFixed { lat, lon } => {
            let coord = Coordinate { lat, lon };
            model.trip.location_fixed(coord);
            if !model.map_ready {
                // The map only exists once a center is known.
                init_map(
                    access_token(),
                    style_url(),
                    lon_lat_value(coord),
                    CAMERA_ZOOM,
                );
                model.map_ready = true;
            }
            update_user_marker(lon_lat_value(coord));
        }
        Msg::LocationFailed { code, message } => {
            model.trip.location_failed(&location_error(code, message));
        }
        Msg::DestinationPicked(name) => {
            let query = model.trip.select_destination(name);
            if let Some(dest) = model.trip.destination() {
                update_destination_marker(lon_lat_value(dest.coord));
                push_route_to_map(&[]);
            }
            if let Some(query) = query {
                orders.perform_cmd(fetch_route(query));
            }
        }
        Msg::RouteFetched(generation, result) => {
            model.trip.route_resolved(generation, result);
            if let Some(route) = model.trip.route() {
                push_route_to_map(&route.path);
            }
        }
        Msg::Recenter => {
            if let Some(coord) = model.trip.recenter() {
                update_destination_marker(JsValue::NULL);
                push_route_to_map(&[]);
                center_camera(lon_lat_value(coord), CAMERA_ZOOM);
            }
        }
    }
}

async fn fetch_route(query: RouteQuery) -> Msg {
    let url = route_url(&routing_root(), query.start, query.end);
    web_sys::console::debug_1(&format!("[frontend] requesting route: {url}").into());

    let result = match Request::new(url).fetch().await {
        Err(err) => Err(RouteFetchError::Transport(format!("{err:?}"))),
        Ok(raw) => match raw.check_status() {
            Err(status_err) => Err(RouteFetchError::Transport(format!("{status_err:?}"))),
            Ok(resp) => match resp.json::<OsrmResponse>().await {
                Ok(body) => body.into_route(),
                Err(err) => Err(RouteFetchError::Decode(format!("{err:?}"))),
            },
        },
    };

    Msg::RouteFetched(query.generation, result)
}

pub fn view(model: &Model) -> Node<Msg> {
    if model.trip.user_location().is_some() {
        div![
            C!["app-container"],
            view_destinations(),
            view_recenter(),
            view_info(model),
            view_messages(model),
        ]
    } else {
        div![
            C!["loading-container"],
            p!["Fetching your location..."],
            view_messages(model),
        ]
    }
}

fn view_destinations() -> Node<Msg> {
    div![
        C!["destination-buttons"],
        catalog::names().map(|name| {
            button![
                format!("Go to {name}"),
                ev(Ev::Click, move |_| Msg::DestinationPicked(name)),
            ]
        }),
    ]
}

fn view_recenter() -> Node<Msg> {
    button![
        C!["recenter-button"],
        "Recenter",
        ev(Ev::Click, |_| Msg::Recenter),
    ]
}

fn view_info(model: &Model) -> Node<Msg> {
    if let (Some(distance), Some(duration)) =
        (model.trip.distance_label(), model.trip.duration_label())
    {
        div![
            C!["info-box"],
            p![format!("Distance: {distance}")],
            p![format!("Estimated Time: {duration}")],
        ]
    } else {
        empty![]
    }
}

fn view_messages(model: &Model) -> Node<Msg> {
    div![
        C!["messages"],
        if let Some(error) = model.trip.error() {
            p![C!["error"], error]
        } else {
            empty![]
        },
        if let Some(notice) = model.trip.notice() {
            p![C!["notice"], notice]
        } else {
            empty![]
        },
    ]
}

#[derive(Debug, Deserialize)]
struct FixPayload {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct GeoErrorPayload {
    code: u32,
    #[serde(default)]
    message: String,
}

fn fix_event_msg(event: web_sys::Event) -> Msg {
    let detail = event
        .dyn_into::<web_sys::CustomEvent>()
        .expect("location-fix event must be CustomEvent")
        .detail();
    match serde_wasm_bindgen::from_value::<FixPayload>(detail) {
        Ok(fix) => Msg::LocationFixed {
            lat: fix.lat,
            lon: fix.lon,
        },
        Err(_) => Msg::LocationFailed {
            code: POSITION_UNAVAILABLE,
            message: "malformed location payload".to_string(),
        },
    }
}

fn error_event_msg(event: web_sys::Event) -> Msg {
    let detail = event
        .dyn_into::<web_sys::CustomEvent>()
        .expect("location-error event must be CustomEvent")
        .detail();
    let payload =
        serde_wasm_bindgen::from_value::<GeoErrorPayload>(detail).unwrap_or(GeoErrorPayload {
            code: POSITION_UNAVAILABLE,
            message: "malformed geolocation error".to_string(),
        });
    Msg::LocationFailed {
        code: payload.code,
        message: payload.message,
    }
}

fn location_error(code: u32, message: String) -> LocationError {
    match code {
        PERMISSION_DENIED => LocationError::PermissionDenied,
        FIX_TIMEOUT => LocationError::Timeout,
        _ => LocationError::Unavailable(message),
    }
}

/// The map surface consumes `[lon, lat]` pairs.
fn lon_lat_pair(coord: Coordinate) -> [f64; 2] {
    [coord.lon, coord.lat]
}

fn lon_lat_value(coord: Coordinate) -> JsValue {
    to_value(&lon_lat_pair(coord)).unwrap_or(JsValue::NULL)
}

fn route_pairs(path: &[Coordinate]) -> Vec<[f64; 2]> {
    path.iter().copied().map(lon_lat_pair).collect()
}

fn push_route_to_map(path: &[Coordinate]) {
    if let Ok(value) = to_value(&route_pairs(path)) {
        update_route_js(value);
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    App::start("app", init, update, view);
}
