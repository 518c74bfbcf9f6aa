use actix_web::HttpResponse;

// The documentation is a checked-in artifact; these handlers only serve it.
const SWAGGER_UI_HTML: &str = include_str!("../../docs/swagger.html");
const OPENAPI_JSON: &str = include_str!("../../docs/openapi.json");

pub async fn swagger_ui() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(SWAGGER_UI_HTML)
}

pub async fn openapi_document() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(OPENAPI_JSON)
}
