use once_cell::sync::Lazy;
use secrecy::Secret;
use wiremock::MockServer;

use mailgate::configuration::{MailchimpSettings, ServerSettings, Settings};
use mailgate::startup::Application;
use mailgate::telemetry;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber =
            telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        telemetry::init_subscriber(subscriber);
    } else {
        let subscriber =
            telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        telemetry::init_subscriber(subscriber);
    };
});

pub struct TestApp {
    pub address: String,
    pub mailchimp_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_subscribe(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/subscribe", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute Request")
    }

    pub async fn post_subscribe_raw(&self, body: String) -> reqwest::Response {
        self.api_client
            .post(format!("{}/subscribe", self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute Request")
    }
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let mailchimp_server = MockServer::start().await;

    let configuration = Settings {
        server: ServerSettings {
            address: "127.0.0.1:0".to_string(),
        },
        mailchimp: MailchimpSettings {
            api_key: Secret::new("test-api-key-us1".to_string()),
            base_url: Some(mailchimp_server.uri()),
        },
    };

    let application = Application::build(configuration).expect("Failed to build application");
    let address = format!("http://127.0.0.1:{}", application.port());

    _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        mailchimp_server,
        api_client: reqwest::Client::new(),
    }
}
