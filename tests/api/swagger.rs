use crate::helpers::spawn_app;

#[actix_web::test]
async fn swagger_ui_is_served() {
    let app = spawn_app().await;

    for url in [
        format!("{}/swagger", app.address),
        format!("{}/swagger/index.html", app.address),
    ] {
        let response = app
            .api_client
            .get(url)
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(response.status().as_u16(), 200);
        let html = response.text().await.expect("Failed to read body");
        assert!(html.contains("swagger-ui"));
    }
}

#[actix_web::test]
async fn openapi_document_describes_the_subscribe_route() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(format!("{}/swagger/openapi.json", app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);
    let document: serde_json::Value = response.json().await.expect("Failed to parse body");
    assert!(document["paths"]["/subscribe"]["post"].is_object());
    assert!(document["paths"]["/health_check"]["get"].is_object());
}
