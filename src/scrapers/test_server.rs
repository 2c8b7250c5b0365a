//! One-page HTTP server on a loopback port, for driving the scrapers in tests.
//!
//! Request paths decide the reply: a path containing `fail` gets an empty
//! `500`, a path containing `broken` has its connection closed without a
//! response, and anything else gets `200` with the given page.

use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Start the server and return its base URL, e.g. `http://127.0.0.1:40123`.
pub async fn serve(page: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(respond(stream, page));
        }
    });
    format!("http://{addr}")
}

/// A base URL nothing listens on, so every request fails to connect.
pub async fn refused() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Client for talking to the server; proxy settings from the environment are
/// ignored so loopback requests stay local.
pub fn client() -> Client {
    Client::builder()
        .user_agent(super::USER_AGENT)
        .no_proxy()
        .build()
        .unwrap()
}

async fn respond(mut stream: TcpStream, page: &'static str) {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let request = String::from_utf8_lossy(&request);
    let path = request.split_whitespace().nth(1).unwrap_or("/");
    if path.contains("broken") {
        return;
    }
    let (status, body) = if path.contains("fail") {
        ("500 Internal Server Error", "")
    } else {
        ("200 OK", page)
    };

    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}
