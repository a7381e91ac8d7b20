//! Mock request records pushed through a cold observable. Every request in
//! the fixed sequence is handled synchronously by the subscriber, the stream
//! completes, and the caller releases the subscription afterwards.
//!
//! To run this example, execute
//! `RUST_LOG=debug cargo run --example simulate_requests`; the debug level
//! also shows the teardown logging of the iterator source.

use std::collections::HashMap;
use std::error::Error;

use log::{info, warn};

use rivulet::subscribe::Subscriber;
use rivulet::{Observable, Subscribeable, Unsubscribeable};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HttpMethod {
    Post,
    Get,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HttpStatus {
    Ok = 200,
    InternalServerError = 500,
}

#[derive(Clone, Debug)]
struct User {
    name: String,
    age: u32,
    roles: Vec<String>,
    created_at: String,
    is_deleted: bool,
}

#[derive(Clone, Debug)]
struct Request {
    method: HttpMethod,
    host: String,
    path: String,
    body: Option<User>,
    params: HashMap<String, String>,
}

struct Response {
    status: HttpStatus,
}

// The fake backend: accepts anything and reports success.
fn handle_request(request: &Request) -> Response {
    if let Some(user) = &request.body {
        info!(
            "payload: {} (age {}, {} roles, created {}{})",
            user.name,
            user.age,
            user.roles.len(),
            user.created_at,
            if user.is_deleted { ", deleted" } else { "" },
        );
    }

    Response {
        status: HttpStatus::Ok,
    }
}

fn handle_error(error: &dyn Error) -> Response {
    warn!("request stream failed: {}", error);

    Response {
        status: HttpStatus::InternalServerError,
    }
}

fn main() {
    env_logger::init();

    let user_mock = User {
        name: "User Name".to_string(),
        age: 26,
        roles: vec!["user".to_string(), "admin".to_string()],
        created_at: "2024-01-01T00:00:00Z".to_string(),
        is_deleted: false,
    };

    let requests_mock = vec![
        Request {
            method: HttpMethod::Post,
            host: "service.example".to_string(),
            path: "user".to_string(),
            body: Some(user_mock),
            params: HashMap::new(),
        },
        Request {
            method: HttpMethod::Get,
            host: "service.example".to_string(),
            path: "user".to_string(),
            body: None,
            params: HashMap::from([("id".to_string(), "3f5h67s4s".to_string())]),
        },
    ];

    let mut requests = Observable::from_iter(requests_mock);

    let observer = Subscriber::new(
        |request: Request| {
            let id = request.params.get("id").map(String::as_str).unwrap_or("-");
            let response = handle_request(&request);

            println!(
                "{:?} {}/{} (id: {}) -> {}",
                request.method,
                request.host,
                request.path,
                id,
                response.status as u16,
            );
        },
        |e| {
            let response = handle_error(e.as_ref());
            println!("request failed -> {}", response.status as u16);
        },
        || println!("complete"),
    );

    let mut subscription = requests.subscribe(observer);

    // Emission already finished when subscribe returned; this just releases
    // the handle.
    subscription.unsubscribe();
}
