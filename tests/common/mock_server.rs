//! Mock backend helpers for integration tests

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Profile payload as `/usuarios/{id}` returns it
pub fn profile_json(id: i64, role: &str) -> Value {
    json!({
        "id": id,
        "nombre": "Laura",
        "apellido": "Gómez",
        "email": "laura@kinesio.test",
        "roles": [{"id": 1, "nombre": role}],
        "activo": true
    })
}

pub fn appointment_json(id: i64, fecha: &str, hora: &str, estado: &str) -> Value {
    json!({
        "id": id,
        "paciente_id": 10,
        "kinesiologo_id": 3,
        "fecha": fecha,
        "hora_inicio": hora,
        "hora_fin": null,
        "estado": estado
    })
}

/// Serve the profile for user `id` with the given role
pub async fn mount_profile(server: &MockServer, id: i64, role: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/usuarios/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(id, role)))
        .mount(server)
        .await;
}

/// Serve a successful login that issues `token`
pub async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": token, "token_type": "bearer"})),
        )
        .mount(server)
        .await;
}
