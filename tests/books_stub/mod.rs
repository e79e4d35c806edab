use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use serde_json::Value;

pub static PIXEL_PNG: &[u8] = &[
    137, 80, 78, 71, 13, 10, 26, 10, 0, 0, 0, 13, 73, 72, 68, 82, 0, 0, 0, 1, 0, 0, 0, 1, 8, 0, 0,
    0, 0, 58, 126, 155, 85, 0, 0, 0, 10, 73, 68, 65, 84, 120, 156, 99, 248, 15, 0, 1, 1, 1, 0, 177,
    56, 246, 20, 0, 0, 0, 0, 73, 69, 78, 68, 174, 66, 96, 130,
];

/// Canned answer for one `q=` value.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
}

#[allow(dead_code)]
impl Canned {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: serde_json::to_string_pretty(&body).expect("serialize canned body"),
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_owned(),
        }
    }
}

/// Stand-in for the Books API.
///
/// - `/books/v1/volumes?q=<keyword>` answers with the canned response for `keyword`
///   (404 when none is registered).
/// - `/thumbs/<name>` serves a 1x1 PNG, except `broken.png` (200 with garbage bytes)
///   and names starting with `missing` (404).
pub struct BooksStub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

#[allow(dead_code)]
impl BooksStub {
    pub fn spawn(routes: Vec<(&str, Canned)>) -> Self {
        let routes = routes
            .into_iter()
            .map(|(keyword, canned)| (keyword.to_owned(), canned))
            .collect::<HashMap<_, _>>();

        let server = tiny_http::Server::http("127.0.0.1:0").expect("start books stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let url = request.url().to_string();
                seen.lock().expect("lock requests").push(url.clone());

                let response = if let Some(keyword) = url.strip_prefix("/books/v1/volumes?q=") {
                    match routes.get(keyword) {
                        Some(canned) => json_response(canned),
                        None => not_found(),
                    }
                } else if let Some(name) = url.strip_prefix("/thumbs/") {
                    if name == "broken.png" {
                        tiny_http::Response::from_data(b"definitely not a png".to_vec())
                            .with_status_code(200)
                    } else if name.starts_with("missing") {
                        not_found()
                    } else {
                        let header =
                            tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"image/png"[..])
                                .expect("build header");
                        tiny_http::Response::from_data(PIXEL_PNG.to_vec())
                            .with_status_code(200)
                            .with_header(header)
                    }
                } else {
                    not_found()
                };

                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            requests,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn api_base(&self) -> String {
        format!("{}/books/v1/volumes?q=", self.base_url)
    }

    pub fn thumb(&self, name: &str) -> String {
        format!("{}/thumbs/{name}", self.base_url)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("lock requests").clone()
    }
}

impl Drop for BooksStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn not_found() -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    tiny_http::Response::from_data(b"not found".to_vec()).with_status_code(404)
}

fn json_response(canned: &Canned) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let header = tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .expect("build header");
    tiny_http::Response::from_data(canned.body.clone().into_bytes())
        .with_status_code(canned.status)
        .with_header(header)
}

/// One `items[]` entry with every field the client reads.
#[allow(dead_code)]
pub fn volume(title: &str, authors: Option<&[&str]>, thumbnail_url: &str) -> Value {
    let mut info = serde_json::json!({
        "title": title,
        "description": format!("All about {title}."),
        "previewLink": format!("http://books.google.com/books?id={title}&hl=&source=gbs_api"),
        "imageLinks": {
            "smallThumbnail": thumbnail_url,
            "thumbnail": thumbnail_url,
        },
        "language": "en",
    });
    if let Some(authors) = authors {
        info["authors"] = serde_json::json!(authors);
    }
    serde_json::json!({ "kind": "books#volume", "id": title, "volumeInfo": info })
}

#[allow(dead_code)]
pub fn volumes(items: Vec<Value>) -> Value {
    serde_json::json!({
        "kind": "books#volumes",
        "totalItems": items.len(),
        "items": items,
    })
}
