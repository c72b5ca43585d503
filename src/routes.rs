use log::{error, info};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use actix_web::{HttpRequest, HttpResponse, Route, http::header::ContentType, web};
use askama::Template;

use crate::error::AppError;
use crate::gpio::GpioBackend;
use crate::parser::{ButtonPress, parse_press};
use crate::relay::RelayController;

/// Number of requests handled since the process started, failed ones
/// included.
#[derive(Debug, Default)]
pub struct RequestCounter(AtomicU64);

impl RequestCounter {
    /// Returns the count including this request.
    pub fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

pub struct AppState<B: GpioBackend> {
    pub relay: Arc<RelayController<B>>,
    pub counter: Arc<RequestCounter>,
}

impl<B: GpioBackend> AppState<B> {
    pub fn new(relay: Arc<RelayController<B>>) -> Self {
        Self {
            relay,
            counter: Arc::new(RequestCounter::default()),
        }
    }

    /// Catch-all route: every path and method is treated as a button press.
    pub fn press_route(&self) -> Route {
        web::to(press_button::<B>)
    }
}

impl<B: GpioBackend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            relay: Arc::clone(&self.relay),
            counter: Arc::clone(&self.counter),
        }
    }
}

#[derive(Template)]
#[template(path = "press.html")]
struct PressPage<'a> {
    count: u64,
    host: &'a str,
    method: &'a str,
    uri: &'a str,
    page: &'a str,
    name: &'a str,
    button: u32,
}

async fn press_button<B: GpioBackend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
) -> Result<HttpResponse, AppError> {
    let uri = req.uri().to_string();
    let count = state.counter.increment();
    info!("URI is {uri}");

    let press = parse_press(&uri)?;
    let ButtonPress { page, name, button } = &press;
    info!("page {page} name {name} button {button}");

    state.relay.toggle(*button).await.inspect_err(|e| {
        if let AppError::Gpio(msg) = e {
            error!("press of button {button} failed: {msg}");
        }
    })?;

    let conn = req.connection_info();
    let body = PressPage {
        count,
        host: conn.host(),
        method: req.method().as_str(),
        uri: &uri,
        page,
        name,
        button: *button,
    }
    .render()
    .map_err(|e| AppError::Render(e.to_string()))?;

    info!("Response sent for count={count} and URI={uri}");

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}
