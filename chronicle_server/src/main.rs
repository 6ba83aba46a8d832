use std::io;

use actix_web::{middleware, App, HttpServer};
use chronicle_server::{configure_site, no_store, ServerArgs};
use clap::Parser;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = ServerArgs::parse();
    let root = args.site_root().map_err(|e| {
        log::error!("{e}");
        io::Error::new(io::ErrorKind::NotFound, e)
    })?;

    log::info!(
        "Kolkata Chronicle running at http://{}:{} (serving {})",
        args.bind,
        args.port,
        root.display()
    );

    HttpServer::new(move || {
        let root = root.clone();
        App::new()
            .wrap(no_store())
            .wrap(middleware::Logger::default())
            .configure(move |cfg| configure_site(cfg, &root))
    })
    .bind((args.bind.as_str(), args.port))?
    .run()
    .await
}
