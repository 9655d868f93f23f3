use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use concesionario_api::{
    app,
    models::User,
    state::AppState,
    utils::jwt::{generate_token, JwtConfig},
};

struct TestApp {
    router: Router,
    state: AppState,
    token: String,
}

struct TestResponse {
    status: StatusCode,
    body: Value,
}

async fn create_test_app() -> TestApp {
    let jwt = JwtConfig {
        secret: "integration-secret".into(),
        expiration: 3600,
    };
    let state = AppState::in_memory(jwt.clone());

    let hash = bcrypt::hash("admin1234", 4).unwrap();
    let admin = User::new("Admin".into(), "admin@concesionario.es".into(), hash);
    let admin = state.users.create(&admin).await.unwrap();
    let token = generate_token(admin.id, &jwt).unwrap();

    TestApp {
        router: app(state.clone()),
        state,
        token,
    }
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, body: Option<Value>, auth: bool) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if auth {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse { status, body }
    }

    async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, true).await
    }

    async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body), true).await
    }

    async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body), true).await
    }

    async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None, true).await
    }
}

fn car(vin: &str, availability: &str) -> Value {
    json!({
        "vin": vin,
        "brand": "toyota",
        "model": "Yaris",
        "type": "turismo",
        "year": 2021,
        "condition": "usado",
        "km": 35000,
        "price": 13990.5,
        "buyedWhen": "2024-02-01",
        "availability": availability,
        "color": "rojo"
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;
    let response = app.send(Method::GET, "/health", None, false).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let app = create_test_app().await;
    let response = app.get("/api/v1/motos").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Route not found");
    assert_eq!(response.body["path"], "/api/v1/motos");
}

#[tokio::test]
async fn test_full_sale_flow_marks_vehicle_sold() {
    let app = create_test_app().await;

    let created = app.post("/api/v1/cars", car("V1", "disponible")).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let car_id = created.body["id"].as_str().unwrap().to_string();

    let client = app
        .post(
            "/api/v1/clients",
            json!({ "name": "Lucía", "email": "lucia@mail.com", "preferences": "híbrido" }),
        )
        .await;
    assert_eq!(client.status, StatusCode::CREATED);
    assert_eq!(client.body["id"], 1);

    let sale = app
        .post(
            "/api/v1/sales",
            json!({
                "id": 1,
                "car": car_id,
                "client": 1,
                "date": "2024-10-01",
                "payment": "efectivo",
                "delivery": "2024-10-15"
            }),
        )
        .await;
    assert_eq!(sale.status, StatusCode::CREATED);
    assert_eq!(sale.body["car"]["vin"], "V1");
    assert_eq!(sale.body["car"]["availability"], "vendido");
    assert_eq!(sale.body["client"]["email"], "lucia@mail.com");

    let vehicle = app.get("/api/v1/cars/V1").await;
    assert_eq!(vehicle.body["availability"], "vendido");

    let listed = app.get("/api/v1/sales").await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_vin_leaves_original_unchanged() {
    let app = create_test_app().await;
    app.post("/api/v1/cars", car("V1", "disponible")).await;

    let mut other = car("V1", "reservado");
    other["brand"] = json!("volvo");
    let response = app.post("/api/v1/cars", other).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "DUPLICATE_KEY");

    let original = app.get("/api/v1/cars/V1").await;
    assert_eq!(original.body["brand"], "toyota");
    assert_eq!(original.body["availability"], "disponible");
}

#[tokio::test]
async fn test_sale_with_missing_client_is_not_persisted() {
    let app = create_test_app().await;
    let created = app.post("/api/v1/cars", car("V1", "disponible")).await;
    let car_id = created.body["id"].as_str().unwrap().to_string();

    let response = app
        .post(
            "/api/v1/sales",
            json!({
                "id": 7,
                "car": car_id,
                "client": 99,
                "date": "2024-10-01",
                "payment": "financiación",
                "delivery": "2024-10-15"
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    assert_eq!(app.get("/api/v1/sales/7").await.status, StatusCode::NOT_FOUND);
    let vehicle = app.get("/api/v1/cars/V1").await;
    assert_eq!(vehicle.body["availability"], "disponible");
}

#[tokio::test]
async fn test_client_with_sales_cannot_be_deleted() {
    let app = create_test_app().await;
    let created = app.post("/api/v1/cars", car("V1", "reservado")).await;
    let car_id = created.body["id"].as_str().unwrap().to_string();
    app.post("/api/v1/clients", json!({ "name": "Ana", "email": "ana@mail.com" }))
        .await;
    app.post(
        "/api/v1/sales",
        json!({
            "id": 1,
            "car": car_id,
            "client": 1,
            "date": "2024-10-01",
            "payment": "transacción bancaria",
            "delivery": "2024-10-02"
        }),
    )
    .await;

    let blocked = app.delete("/api/v1/clients/1").await;
    assert_eq!(blocked.status, StatusCode::BAD_REQUEST);
    assert_eq!(blocked.body["code"], "REFERENCED_ENTITY");

    // Borrar la venta no devuelve el coche a disponible
    let deleted_sale = app.delete("/api/v1/sales/1").await;
    assert_eq!(deleted_sale.status, StatusCode::OK);
    assert_eq!(deleted_sale.body["car"], car_id.as_str());
    assert_eq!(app.get("/api/v1/cars/V1").await.body["availability"], "vendido");

    assert_eq!(app.delete("/api/v1/clients/1").await.status, StatusCode::OK);
    assert_eq!(app.get("/api/v1/clients/1").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vehicle_delete_ignores_sales() {
    let app = create_test_app().await;
    let created = app.post("/api/v1/cars", car("V1", "disponible")).await;
    let car_id = created.body["id"].as_str().unwrap().to_string();
    app.post("/api/v1/clients", json!({ "name": "Ana", "email": "ana@mail.com" }))
        .await;
    app.post(
        "/api/v1/sales",
        json!({
            "id": 1, "car": car_id, "client": 1,
            "date": "2024-10-01", "payment": "efectivo", "delivery": "2024-10-02"
        }),
    )
    .await;

    assert_eq!(app.delete("/api/v1/cars/V1").await.status, StatusCode::OK);

    let sale = app.get("/api/v1/sales/1").await;
    assert_eq!(sale.status, StatusCode::OK);
    assert!(sale.body["car"].is_null());
}

#[tokio::test]
async fn test_vehicle_list_is_public_and_filterable() {
    let app = create_test_app().await;
    app.post("/api/v1/cars", car("A", "disponible")).await;
    app.post("/api/v1/cars", car("B", "reservado")).await;

    let all = app.send(Method::GET, "/api/v1/cars", None, false).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body.as_array().unwrap().len(), 2);

    let reserved = app
        .send(Method::GET, "/api/v1/cars?availability=reservado", None, false)
        .await;
    let reserved = reserved.body.as_array().unwrap().clone();
    assert_eq!(reserved.len(), 1);
    assert_eq!(reserved[0]["vin"], "B");
}

#[tokio::test]
async fn test_mutations_require_token() {
    let app = create_test_app().await;

    let response = app
        .send(Method::POST, "/api/v1/cars", Some(car("V1", "disponible")), false)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Unauthorized");

    let response = app.send(Method::GET, "/api/v1/clients", None, false).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let forged = TestApp {
        router: app.router.clone(),
        state: app.state.clone(),
        token: "not-a-jwt".into(),
    };
    assert_eq!(forged.get("/api/v1/sales").await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_bodies_are_validation_errors() {
    let app = create_test_app().await;

    let mut negative = car("V1", "disponible");
    negative["km"] = json!(-5);
    let response = app.post("/api/v1/cars", negative).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION_ERROR");

    let mut unknown_brand = car("V2", "disponible");
    unknown_brand["brand"] = json!("lada");
    let response = app.post("/api/v1/cars", unknown_brand).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .post("/api/v1/clients", json!({ "name": "Sin email", "email": "no-es-email" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_params_are_validation_errors() {
    let app = create_test_app().await;

    let login = app
        .send(
            Method::POST,
            "/api/v1/users/login",
            Some(json!({ "email": "a@a.es" })),
            false,
        )
        .await;
    assert_eq!(login.status, StatusCode::BAD_REQUEST);
    assert_eq!(login.body["code"], "VALIDATION_ERROR");

    let blank = app
        .send(
            Method::POST,
            "/api/v1/users/login",
            Some(json!({ "email": "admin@concesionario.es", "password": "  " })),
            false,
        )
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.body["code"], "VALIDATION_ERROR");

    let filter = app.send(Method::GET, "/api/v1/cars?brand=lada", None, false).await;
    assert_eq!(filter.status, StatusCode::BAD_REQUEST);
    assert_eq!(filter.body["code"], "VALIDATION_ERROR");

    for uri in ["/api/v1/clients/abc", "/api/v1/sales/abc", "/api/v1/users/abc"] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(response.body["code"], "VALIDATION_ERROR", "{}", uri);
    }
}

#[tokio::test]
async fn test_sold_vehicle_can_be_made_available_again() {
    let app = create_test_app().await;
    let created = app.post("/api/v1/cars", car("V1", "disponible")).await;
    let car_id = created.body["id"].as_str().unwrap().to_string();
    app.post("/api/v1/clients", json!({ "name": "Ana", "email": "ana@mail.com" }))
        .await;
    let sale = app
        .post(
            "/api/v1/sales",
            json!({
                "id": 1, "car": car_id, "client": 1,
                "date": "2024-10-01", "payment": "efectivo", "delivery": "2024-10-02"
            }),
        )
        .await;
    assert_eq!(sale.status, StatusCode::CREATED);
    assert_eq!(sale.body["car"]["availability"], "vendido");

    let reopened = app
        .put("/api/v1/cars/V1", json!({ "availability": "disponible" }))
        .await;
    assert_eq!(reopened.status, StatusCode::OK);
    assert_eq!(reopened.body["availability"], "disponible");

    // La venta sigue registrada y ahora expande el coche disponible
    let kept = app.get("/api/v1/sales/1").await;
    assert_eq!(kept.status, StatusCode::OK);
    assert_eq!(kept.body["car"]["vin"], "V1");
    assert_eq!(kept.body["car"]["availability"], "disponible");
}

#[tokio::test]
async fn test_login_and_owner_rules() {
    let app = create_test_app().await;

    let login = app
        .send(
            Method::POST,
            "/api/v1/users/login",
            Some(json!({ "email": "admin@concesionario.es", "password": "admin1234" })),
            false,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(login.body["token"].is_string());
    assert!(login.body["user"].get("passwordHash").is_none());

    let bad = app
        .send(
            Method::POST,
            "/api/v1/users/login",
            Some(json!({ "email": "admin@concesionario.es", "password": "mala" })),
            false,
        )
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad.body["message"], "Contraseña o usuario incorrectos");

    let registered = app
        .post(
            "/api/v1/users/register",
            json!({ "name": "Pablo", "email": "pablo@concesionario.es", "password": "pablo" }),
        )
        .await;
    assert_eq!(registered.status, StatusCode::CREATED);
    let pablo_id = registered.body["id"].as_str().unwrap().to_string();

    // El admin no es dueño de la cuenta de Pablo
    let response = app
        .put(&format!("/api/v1/users/{}", pablo_id), json!({ "name": "Otro" }))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let short = app
        .post(
            "/api/v1/users/register",
            json!({ "name": "Eva", "email": "eva@concesionario.es", "password": "123" }),
        )
        .await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);

    let users = app.get("/api/v1/users").await;
    assert_eq!(users.body.as_array().unwrap().len(), 2);
}
