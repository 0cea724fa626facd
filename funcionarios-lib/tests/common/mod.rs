//! Fake HR backend served by a local hyper server.

#![allow(dead_code)]

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;

use http_body_util::BodyExt;
use http_body_util::Full;
use hyper::Method;
use hyper::Request;
use hyper::Response;
use hyper::StatusCode;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use serde_json::Value;
use serde_json::json;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::TestLogger;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use funcionarios_lib::FuncionariosClient;
use funcionarios_lib::auth::StaticTokenProvider;
use funcionarios_lib::cache::CacheConfig;

pub const TOKEN: &str = "test-token";
pub const DOCUMENT_BYTES: &[u8] = b"%PDF-1.4 fake";

/// State shared between the test and the server.
#[derive(Debug, Default)]
pub struct Backend {
    pub sanciones: Vec<Value>,
    /// `METHOD /path?query` of every request received.
    pub requests: Vec<String>,
    /// JSON bodies of every write received.
    pub bodies: Vec<Value>,
    /// Every list request answers 500.
    pub fail_lists: bool,
    /// Writes against these ids answer 500.
    pub fail_ids: Vec<i64>,
    /// Holds the next list response after its body was built.
    pub list_gate: Option<ListGate>,
}

/// Signals when a list body was built and waits for the release before
/// sending it.
#[derive(Debug)]
pub struct ListGate {
    pub arrived: oneshot::Sender<()>,
    pub release: oneshot::Receiver<()>,
}

impl Backend {
    pub fn with_sanciones() -> Self {
        Self {
            sanciones: vec![
                sancion(1, "Ana García", "multa", None),
                sancion(2, "Bruno Sosa", "suspension", None),
                sancion(3, "Carla Díaz", "multa", Some("2024-05-01 12:00:00")),
            ],
            ..Self::default()
        }
    }

    pub fn count(&self, request: &str) -> usize {
        self.requests.iter().filter(|r| r.as_str() == request).count()
    }
}

pub fn sancion(id: i64, nombre: &str, tipo: &str, deleted_at: Option<&str>) -> Value {
    json!({
        "id": id,
        "funcionario_id": 100 + id,
        "funcionario": { "id": 100 + id, "nombre_completo": nombre, "numero_documento": format!("10{id}") },
        "tipo_sancion": tipo,
        "estado": "vigente",
        "fecha_inicio": "2024-01-10",
        "fecha_fin": null,
        "activa": 1,
        "deleted_at": deleted_at,
        "created_at": "2024-01-10 08:00:00"
    })
}

pub fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

/// Starts the fake backend and returns its base URL.
pub async fn serve(backend: Arc<Mutex<Backend>>) -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let backend = backend.clone();
            tokio::spawn(async move {
                let service = service_fn(move |req| handle(backend.clone(), req));
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    format!("http://{}", addr)
}

pub fn client(url: &str, cache_config: CacheConfig) -> FuncionariosClient {
    FuncionariosClient::builder()
        .url(url)
        .token_provider(StaticTokenProvider::new(TOKEN))
        .cache_config(cache_config)
        .batch_concurrency(2)
        .build()
        .unwrap()
}

fn reply(status: StatusCode, body: Value) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

async fn handle(
    backend: Arc<Mutex<Backend>>,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or_default().to_string();
    let expected = format!("Bearer {}", TOKEN);
    let authorized = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str());
    let body = req.into_body().collect().await.unwrap().to_bytes();
    let body: Option<Value> = serde_json::from_slice(&body).ok();

    let (response, gate) = route(
        &mut backend.lock().unwrap(),
        &method,
        &path,
        &query,
        authorized,
        body,
    );

    if let Some(gate) = gate {
        let _ = gate.arrived.send(());
        let _ = gate.release.await;
    }

    Ok(response)
}

fn route(
    backend: &mut Backend,
    method: &Method,
    path: &str,
    query: &str,
    authorized: bool,
    body: Option<Value>,
) -> (Response<Full<Bytes>>, Option<ListGate>) {
    let request = if query.is_empty() {
        format!("{} {}", method, path)
    } else {
        format!("{} {}?{}", method, path, query)
    };
    backend.requests.push(request);
    if let Some(body) = &body {
        backend.bodies.push(body.clone());
    }

    if !authorized {
        return (reply(StatusCode::UNAUTHORIZED, json!({ "message": "Unauthenticated." })), None);
    }

    let segments: Vec<&str> = path.trim_start_matches("/api/").split('/').collect();
    let id = segments.get(1).and_then(|s| s.parse::<i64>().ok());
    if let Some(id) = id {
        if *method != Method::GET && backend.fail_ids.contains(&id) {
            let response = reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": format!("No se pudo procesar {}", id) }),
            );
            return (response, None);
        }
    }

    let mut gate = None;
    let response = match (method.as_str(), segments.as_slice()) {
        ("GET", ["sanciones"]) => {
            if backend.fail_lists {
                reply(StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": "Server Error" }))
            } else {
                let include_deleted = query.contains("include_deleted=1");
                let data: Vec<Value> = backend
                    .sanciones
                    .iter()
                    .filter(|s| include_deleted || s["deleted_at"].is_null())
                    .cloned()
                    .collect();
                gate = backend.list_gate.take();
                reply(StatusCode::OK, json!({ "data": data }))
            }
        }
        ("POST", ["sanciones"]) => {
            let body = body.unwrap_or_default();
            if body.get("tipo_sancion").is_none() {
                reply(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({
                        "message": "The given data was invalid.",
                        "errors": { "tipo_sancion": ["El campo tipo sancion es obligatorio."] }
                    }),
                )
            } else {
                let id = backend.sanciones.len() as i64 + 1;
                let mut record = body;
                record["id"] = json!(id);
                backend.sanciones.push(record.clone());
                reply(StatusCode::CREATED, json!({ "data": record }))
            }
        }
        ("DELETE", ["sanciones", _]) => {
            set_field(backend, id, "deleted_at", json!("2024-06-01 10:00:00"));
            Response::builder()
                .status(StatusCode::NO_CONTENT)
                .body(Full::new(Bytes::new()))
                .unwrap()
        }
        ("PATCH", ["sanciones", _, "restore"]) => {
            set_field(backend, id, "deleted_at", Value::Null);
            reply(StatusCode::OK, json!({ "message": "Restaurado" }))
        }
        ("PATCH", ["sanciones", _]) => {
            let activa = body.and_then(|b| b.get("activa").cloned()).unwrap_or_default();
            set_field(backend, id, "activa", activa);
            reply(StatusCode::OK, json!({ "message": "Actualizado" }))
        }
        ("GET", ["documentos", _, "download"]) => Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/pdf")
            .header(
                "Content-Disposition",
                "attachment; filename=\"cedula.pdf\"; filename*=UTF-8''c%C3%A9dula%20n%C2%BA%201.pdf",
            )
            .body(Full::new(Bytes::from_static(DOCUMENT_BYTES)))
            .unwrap(),
        _ => reply(StatusCode::NOT_FOUND, json!({ "message": "Not Found" })),
    };

    (response, gate)
}

fn set_field(backend: &mut Backend, id: Option<i64>, field: &str, value: Value) {
    if let Some(record) = backend
        .sanciones
        .iter_mut()
        .find(|s| s["id"].as_i64() == id)
    {
        record[field] = value;
    }
}
