// chronicle_server: serves the Kolkata Chronicle public directory.
// Every response carries `Cache-Control: no-store` and no validators, so the
// browser always refetches pages, scripts, content and media.

use std::path::{Path, PathBuf};

use actix_files::{Files, NamedFile};
use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;
use actix_web::{web, HttpRequest, Result};
use clap::Parser;
use thiserror::Error;

pub const INDEX_FILE: &str = "index.html";

#[derive(Debug, Clone, Parser)]
#[command(name = "chronicle_server", about = "Serve the Kolkata Chronicle site")]
pub struct ServerArgs {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory holding index.html, scripts, data and media.
    #[arg(long, env = "PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    #[arg(long, env = "BIND", default_value = "0.0.0.0")]
    pub bind: String,
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Public directory not found: {}", .0.display())]
    MissingPublicDir(PathBuf),

    #[error("Public directory has no index.html: {}", .0.display())]
    MissingIndex(PathBuf),
}

impl ServerArgs {
    /// Public directory, checked to exist and contain the index page.
    pub fn site_root(&self) -> Result<PathBuf, ServerError> {
        validate_public_dir(&self.public_dir)
    }
}

pub fn validate_public_dir(dir: &Path) -> Result<PathBuf, ServerError> {
    if !dir.is_dir() {
        return Err(ServerError::MissingPublicDir(dir.to_path_buf()));
    }
    if !dir.join(INDEX_FILE).is_file() {
        return Err(ServerError::MissingIndex(dir.to_path_buf()));
    }
    Ok(dir.to_path_buf())
}

/// Site root shared with handlers.
#[derive(Debug, Clone)]
pub struct SiteRoot(pub PathBuf);

/// Middleware that disables browser caching.
pub fn no_store() -> DefaultHeaders {
    DefaultHeaders::new().add((header::CACHE_CONTROL, "no-store"))
}

/// Register the index route and static files under `public_dir`.
pub fn configure_site(cfg: &mut web::ServiceConfig, public_dir: &Path) {
    cfg.app_data(web::Data::new(SiteRoot(public_dir.to_path_buf())))
        .service(web::resource("/").route(web::get().to(index)))
        .service(
            Files::new("/", public_dir)
                .index_file(INDEX_FILE)
                .use_etag(false)
                .use_last_modified(false)
                .prefer_utf8(true),
        );
}

async fn index(req: HttpRequest, root: web::Data<SiteRoot>) -> Result<NamedFile> {
    log::debug!("index: {}", req.path());
    let file = NamedFile::open_async(root.0.join(INDEX_FILE))
        .await?
        .use_etag(false)
        .use_last_modified(false);
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test as actix_test, App};
    use std::fs;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(INDEX_FILE), "<h1>Kolkata Chronicle</h1>").unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(
            dir.path().join("data/history.json"),
            r#"{"kalighat":{"identity":"I","uniqueness":"U","narrative":"N"}}"#,
        )
        .unwrap();
        dir
    }

    #[actix_web::test]
    async fn root_serves_index_without_caching() {
        let dir = site();
        let root = dir.path().to_path_buf();
        let app = actix_test::init_service(
            App::new()
                .wrap(no_store())
                .configure(|cfg| configure_site(cfg, &root)),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");
        assert!(resp.headers().get(header::ETAG).is_none());
        assert!(resp.headers().get(header::LAST_MODIFIED).is_none());
        let body = actix_test::read_body(resp).await;
        assert!(body.starts_with(b"<h1>Kolkata Chronicle"));
    }

    #[actix_web::test]
    async fn content_file_is_served() {
        let dir = site();
        let root = dir.path().to_path_buf();
        let app = actix_test::init_service(
            App::new()
                .wrap(no_store())
                .configure(|cfg| configure_site(cfg, &root)),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/data/history.json").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");
        let body = actix_test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("kalighat"));
    }

    #[actix_web::test]
    async fn missing_asset_is_not_found_and_uncached() {
        let dir = site();
        let root = dir.path().to_path_buf();
        let app = actix_test::init_service(
            App::new()
                .wrap(no_store())
                .configure(|cfg| configure_site(cfg, &root)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/assets/locations/kalighat_old.jpg")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");
    }

    #[test]
    fn public_dir_must_hold_index() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            validate_public_dir(&dir.path().join("nope")),
            Err(ServerError::MissingPublicDir(_))
        ));
        assert!(matches!(
            validate_public_dir(dir.path()),
            Err(ServerError::MissingIndex(_))
        ));
        fs::write(dir.path().join(INDEX_FILE), "ok").unwrap();
        assert_eq!(validate_public_dir(dir.path()).unwrap(), dir.path());
    }

    #[test]
    fn args_parse_from_flags() {
        let args = ServerArgs::try_parse_from([
            "chronicle_server",
            "--port",
            "8080",
            "--public-dir",
            "site",
            "--bind",
            "127.0.0.1",
        ])
        .unwrap();
        assert_eq!(args.port, 8080);
        assert_eq!(args.public_dir, PathBuf::from("site"));
        assert_eq!(args.bind, "127.0.0.1");
        assert!(matches!(
            args.site_root(),
            Err(ServerError::MissingPublicDir(_))
        ));
    }
}
