use astra::Server;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::db::connection::{init_db, Database};
use crate::db::roster::RosterStore;
use crate::responses::error_to_response;
use crate::router::{handle, App};

mod db;
mod domain;
mod errors;
mod responses;
mod router;
mod spreadsheets;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let db = match Database::open("mediation.sqlite3") {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("failed to open database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_db(&db, "sql/schema.sql") {
        tracing::error!("database initialization failed: {e}");
        std::process::exit(1);
    }

    let roster = RosterStore::new(db.clone());
    let app = Arc::new(App { db, roster });

    let addr: SocketAddr = "127.0.0.1:3000".parse().expect("valid listen address");
    tracing::info!("listening on http://{addr}");

    let server = Server::bind(addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        tracing::error!("server ended with error: {e}");
    }
}
