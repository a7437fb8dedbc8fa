//! A throwaway HTTP server standing in for the marketing API.

use std::sync::{Arc, Mutex};
use std::thread;

use tiny_http::{Header, Response, Server};

#[derive(Debug, Clone)]
pub struct Seen {
    pub url: String,
    pub authorization: Option<String>,
}

type Route = Box<dyn Fn(&str) -> (u16, String) + Send + 'static>;

pub struct MockApi {
    pub base: String,
    pub seen: Arc<Mutex<Vec<Seen>>>,
    server: Arc<Server>,
}

impl MockApi {
    /// `route` gets the request path+query and returns status and body.
    pub fn start(route: impl Fn(&str) -> (u16, String) + Send + 'static) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let base = format!("http://{}", server.server_addr());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let route: Route = Box::new(route);
        let srv = Arc::clone(&server);
        let log = Arc::clone(&seen);
        thread::spawn(move || {
            for request in srv.incoming_requests() {
                let authorization = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Authorization"))
                    .map(|h| h.value.as_str().to_string());
                let url = request.url().to_string();
                log.lock().unwrap().push(Seen {
                    url: url.clone(),
                    authorization,
                });

                let (status, body) = route(&url);
                let content_type =
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
                let _ = request.respond(
                    Response::from_string(body)
                        .with_status_code(status)
                        .with_header(content_type),
                );
            }
        });

        Self { base, seen, server }
    }

    pub fn urls(&self) -> Vec<String> {
        self.seen.lock().unwrap().iter().map(|s| s.url.clone()).collect()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.server.unblock();
    }
}
