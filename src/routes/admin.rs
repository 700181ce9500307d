use actix_web::{web, HttpResponse};

use crate::configuration::ApplicationSettings;
use crate::error::AppError;
use crate::middleware::FileServerHits;
use crate::store::Store;

/// GET /admin/metrics
pub async fn metrics(hits: web::Data<FileServerHits>) -> HttpResponse {
    let body = format!(
        r#"<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>"#,
        hits.get()
    );

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// POST /admin/reset
///
/// Deletes every user (their tokens and chirps go with them) and zeroes
/// the hit counter. Only available when `platform` is `"dev"`.
pub async fn reset(
    app_config: web::Data<ApplicationSettings>,
    hits: web::Data<FileServerHits>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    if !app_config.is_dev() {
        tracing::warn!(platform = %app_config.platform, "Reset refused outside dev platform");
        return Err(AppError::Forbidden(
            "Reset is only allowed in dev environment".to_string(),
        ));
    }

    let removed = store.delete_all_users().await?;
    hits.reset();

    tracing::info!(users_removed = removed, "State reset");

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Hits reset to 0 and database reset to initial state."))
}
