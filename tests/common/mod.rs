use std::{
    collections::HashMap,
    future::Future,
    net::SocketAddr,
    pin::Pin,
    sync::{Arc, Mutex},
};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{
    body::Incoming, server::conn::http1, service::Service, Method, Request, Response, StatusCode,
};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

/// In-process stand-in for the booking backend.
///
/// Stores submitted schedules per prestation id and serves them back wrapped in the
/// `{success, message, data}` envelope. Prestation `locked` always rejects writes.
#[derive(Clone, Default)]
pub struct StubBackend {
    schedules: Arc<Mutex<HashMap<String, String>>>,
}

impl StubBackend {
    pub fn stored(&self, prestation_id: &str) -> Option<serde_json::Value> {
        let schedules = self.schedules.lock().unwrap();
        let body = schedules.get(prestation_id)?;
        serde_json::from_str(body).ok()
    }

    /// Binds an ephemeral port and serves until the test runtime shuts down.
    pub async fn spawn(self) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let io = TokioIo::new(stream);
                let backend = self.clone();
                tokio::spawn(async move {
                    let _ = http1::Builder::new().serve_connection(io, backend).await;
                });
            }
        });
        addr
    }

    async fn handle(self, req: Request<Incoming>) -> Result<Response<Full<Bytes>>, hyper::Error> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let body = req.into_body().collect().await?.to_bytes();

        let Some(id) = path
            .strip_prefix("/prestations/")
            .and_then(|rest| rest.strip_suffix("/schedule"))
        else {
            return Ok(Self::respond(StatusCode::NOT_FOUND, String::new()));
        };

        match method {
            Method::POST if id == "locked" => Ok(Self::respond(
                StatusCode::UNPROCESSABLE_ENTITY,
                r#"{"success":false,"message":"Prestation is locked","errors":["locked"],"statusCode":422}"#
                    .to_string(),
            )),
            Method::POST => {
                let body = String::from_utf8_lossy(&body).to_string();
                self.schedules.lock().unwrap().insert(id.to_string(), body);
                Ok(Self::respond(
                    StatusCode::OK,
                    format!(r#"{{"success":true,"message":"Schedule saved","data":{{"id":"{id}"}}}}"#),
                ))
            }
            Method::GET => match self.schedules.lock().unwrap().get(id) {
                Some(stored) => Ok(Self::respond(
                    StatusCode::OK,
                    format!(r#"{{"success":true,"message":"ok","data":{stored}}}"#),
                )),
                None => Ok(Self::respond(
                    StatusCode::NOT_FOUND,
                    r#"{"success":false,"message":"No schedule","statusCode":404}"#.to_string(),
                )),
            },
            _ => Ok(Self::respond(StatusCode::NOT_FOUND, String::new())),
        }
    }

    fn respond(status: StatusCode, body: String) -> Response<Full<Bytes>> {
        Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(Full::new(Bytes::from(body)))
            .unwrap()
    }
}

impl Service<Request<Incoming>> for StubBackend {
    type Response = Response<Full<Bytes>>;
    type Error = hyper::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        Box::pin(self.clone().handle(req))
    }
}
