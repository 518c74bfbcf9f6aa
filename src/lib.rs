pub mod configuration;
pub mod domain;
pub mod mailchimp;
pub mod routes;
pub mod startup;
pub mod telemetry;
