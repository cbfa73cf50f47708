use std::{
    path::Path,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use inventario_api::{
    app::{build_router, cors_layer},
    config::AuthSettings,
    middleware::auth::Claims,
    state::AppState,
    store::MemoryProductStore,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "test-secret";

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn token(secret: &str, exp: u64) -> String {
    let claims = Claims {
        exp,
        sub: Some("user-1".into()),
        email: Some("admin@tienda.test".into()),
        role: Some("authenticated".into()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("encode token")
}

fn verified() -> AuthSettings {
    AuthSettings {
        jwt_secret: Some(SECRET.into()),
        ..Default::default()
    }
}

fn app_with(auth: AuthSettings, static_dir: &Path) -> Router {
    let state = AppState::new(Arc::new(MemoryProductStore::new()), auth);
    build_router(state, static_dir, cors_layer(&[]))
}

fn app() -> Router {
    app_with(verified(), Path::new("does-not-exist"))
}

fn draft(nombre: &str, categoria: &str) -> Value {
    json!({
        "nombre": nombre,
        "precioVenta": 19.99,
        "stock": 10,
        "categoria": categoria,
        "imagenUrl": "https://cdn.tienda.test/img/1.png",
        "costo": 8.5,
        "codigoProducto": 1001,
        "codigoVisible": "CAM-001",
        "marca": "Nativa",
        "talla": "M",
        "color": null,
        "genero": "Unisex"
    })
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn create_then_get_returns_the_same_fields() {
    let app = app();
    let t = token(SECRET, now() + 3600);
    let body = draft("Camiseta Básica", "Camisetas");

    let (status, created) = send(&app, Method::POST, "/api/productos", Some(&t), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_str().expect("id").to_string();

    let (status, fetched) = send(&app, Method::GET, &format!("/api/productos/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);

    let mut product = fetched["data"].clone();
    product.as_object_mut().unwrap().remove("id");
    assert_eq!(product, body);
}

#[tokio::test]
async fn writes_require_a_bearer_token() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/productos", None, Some(draft("A", "B"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["data"]["error"].as_str().unwrap().contains("Missing Authorization"));

    let (status, _) = send(&app, Method::POST, "/api/productos", Some("not-a-jwt"), Some(draft("A", "B"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let forged = token("other-secret", now() + 3600);
    let (status, _) = send(&app, Method::POST, "/api/productos", Some(&forged), Some(draft("A", "B"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_tokens_are_rejected() {
    let app = app();
    let expired = token(SECRET, now() - 60);
    let (status, _) = send(&app, Method::POST, "/api/productos", Some(&expired), Some(draft("A", "B"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn insecure_mode_checks_expiry_only() {
    let insecure = AuthSettings {
        insecure_skip_signature: true,
        ..Default::default()
    };
    let app = app_with(insecure, Path::new("does-not-exist"));

    let foreign = token("whatever-signed-it", now() + 3600);
    let (status, _) = send(&app, Method::POST, "/api/productos", Some(&foreign), Some(draft("A", "B"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let expired = token("whatever-signed-it", now() - 60);
    let (status, _) = send(&app, Method::POST, "/api/productos", Some(&expired), Some(draft("A", "B"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_secret_in_verified_mode_is_a_server_error() {
    let app = app_with(AuthSettings::default(), Path::new("does-not-exist"));
    let t = token(SECRET, now() + 3600);
    let (status, _) = send(&app, Method::POST, "/api/productos", Some(&t), Some(draft("A", "B"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn invalid_drafts_report_field_errors() {
    let app = app();
    let t = token(SECRET, now() + 3600);
    let mut body = draft("", "Camisetas");
    body["precioVenta"] = json!(-1);
    body["codigoVisible"] = json!("x".repeat(51));

    let (status, resp) = send(&app, Method::POST, "/api/productos", Some(&t), Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields = resp["data"]["fields"].as_object().expect("fields");
    assert!(fields.contains_key("nombre"));
    assert!(fields.contains_key("precioVenta"));
    assert!(fields.contains_key("codigoVisible"));
    assert!(!fields.contains_key("categoria"));

    let (_, list) = send(&app, Method::GET, "/api/productos", None, None).await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn blank_text_fields_are_rejected() {
    let app = app();
    let t = token(SECRET, now() + 3600);
    let mut body = draft("   ", "  ");
    body["codigoVisible"] = json!(" ");

    let (status, resp) = send(&app, Method::POST, "/api/productos", Some(&t), Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields = resp["data"]["fields"].as_object().expect("fields");
    for field in ["nombre", "categoria", "codigoVisible"] {
        assert!(fields.contains_key(field), "expected error on {field}");
    }
}

#[tokio::test]
async fn update_replaces_every_field() {
    let app = app();
    let t = token(SECRET, now() + 3600);
    let (_, created) = send(&app, Method::POST, "/api/productos", Some(&t), Some(draft("Camiseta", "Camisetas"))).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let replacement = json!({
        "nombre": "Camiseta Premium",
        "precioVenta": 25,
        "stock": 3,
        "categoria": "Camisetas",
        "costo": 11.25,
        "codigoProducto": 1001,
        "codigoVisible": "CAM-001P"
    });
    let (status, updated) = send(&app, Method::PUT, &format!("/api/productos/{id}"), Some(&t), Some(replacement)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["id"], json!(id));
    assert_eq!(updated["data"]["nombre"], "Camiseta Premium");
    assert_eq!(updated["data"]["precioVenta"], json!(25.0));
    // optionals missing from a PUT body are cleared
    assert_eq!(updated["data"]["marca"], Value::Null);
    assert_eq!(updated["data"]["imagenUrl"], Value::Null);

    let missing = uuid::Uuid::new_v4();
    let (status, _) = send(&app, Method::PUT, &format!("/api/productos/{missing}"), Some(&t), Some(draft("X", "Y"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = app();
    let t = token(SECRET, now() + 3600);
    let (_, created) = send(&app, Method::POST, "/api/productos", Some(&t), Some(draft("Gorra", "Accesorios"))).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/productos/{id}");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&t), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found");
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&t), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_applies_search_and_category() {
    let app = app();
    let t = token(SECRET, now() + 3600);
    for (nombre, categoria) in [
        ("Café molido", "Bebidas"),
        ("Camiseta", "Ropa"),
        ("Cafetera", "Hogar"),
    ] {
        let (status, _) = send(&app, Method::POST, "/api/productos", Some(&t), Some(draft(nombre, categoria))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, all) = send(&app, Method::GET, "/api/productos", None, None).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);
    assert_eq!(all["meta"]["total"], 3);

    let (_, cafe) = send(&app, Method::GET, "/api/productos?q=CAFE&categoria=todos", None, None).await;
    let names: Vec<&str> = cafe["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Café molido", "Cafetera"]);

    let (_, hogar) = send(&app, Method::GET, "/api/productos?q=caf&categoria=Hogar", None, None).await;
    assert_eq!(hogar["data"].as_array().unwrap().len(), 1);

    let (_, cats) = send(&app, Method::GET, "/api/productos/categorias", None, None).await;
    assert_eq!(cats["data"], json!(["Bebidas", "Hogar", "Ropa"]));
}

#[tokio::test]
async fn cart_quote_ignores_missing_products() {
    let app = app();
    let t = token(SECRET, now() + 3600);
    let (_, created) = send(&app, Method::POST, "/api/productos", Some(&t), Some(draft("Camiseta", "Ropa"))).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let gone = uuid::Uuid::new_v4().to_string();

    let body = json!({
        "items": [
            { "productoId": id, "cantidad": 2 },
            { "productoId": gone, "cantidad": 5 },
            { "productoId": id, "cantidad": 1 }
        ]
    });
    let (status, quote) = send(&app, Method::POST, "/api/carrito/cotizar", None, Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["data"]["total"], json!(59.97));
    assert_eq!(quote["data"]["cantidadTotal"], 8);
    assert_eq!(quote["data"]["faltantes"], json!([gone]));
    assert_eq!(quote["data"]["lineas"].as_array().unwrap().len(), 1);
    assert_eq!(quote["data"]["lineas"][0]["cantidad"], 3);
}

#[tokio::test]
async fn static_files_are_served_with_json_not_found_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Tienda</h1>").unwrap();
    let app = app_with(verified(), dir.path());

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"<h1>Tienda</h1>");

    let (status, body) = send(&app, Method::GET, "/nada/aqui", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["path"], "/nada/aqui");
}

#[tokio::test]
async fn permissive_cors_answers_any_origin() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://localhost:5500")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn quote_rejects_quantities_that_overflow_when_merged() {
    let app = app();
    let id = uuid::Uuid::new_v4();
    let body = json!({
        "items": [
            { "productoId": id, "cantidad": u32::MAX },
            { "productoId": id, "cantidad": 1 }
        ]
    });

    let (status, resp) = send(&app, Method::POST, "/api/carrito/cotizar", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(resp["message"].as_str().unwrap().contains(&id.to_string()));
}
