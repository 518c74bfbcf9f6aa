pub mod health_check;
pub mod subscribe;
pub mod swagger;

pub use health_check::*;
pub use subscribe::*;
pub use swagger::*;

/// JSON body used for every 4xx response.
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
