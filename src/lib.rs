#[macro_use]
extern crate rocket;

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod sheets;

use rocket::{Build, Rocket};

use crate::config::{ConfigFairing, ElectionFairing, SheetsFairing};
use crate::logging::LoggerFairing;

/// Assemble the server: routes, config, the spreadsheet backend
/// connection, and request logging.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(ConfigFairing)
        .attach(ElectionFairing)
        .attach(SheetsFairing)
        .attach(LoggerFairing)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use rocket::local::asynchronous::Client;

    use crate::config::{ConfigFairing, ElectionFairing};
    use crate::model::ballot::votes_header;
    use crate::model::election::Election;
    use crate::sheets::{MemoryTables, Tables, VOTERS_TABLE, VOTES_TABLE};

    pub const TEST_ADMIN_PASSWORD: &str = "sesame-open";

    /// In-memory tables seeded with just the header rows.
    pub fn empty_tables() -> Arc<MemoryTables> {
        Arc::new(
            MemoryTables::new()
                .with_table(VOTERS_TABLE, vec![vec!["Name".to_string()]])
                .with_table(VOTES_TABLE, vec![votes_header(Election::example().seats())]),
        )
    }

    /// Build a local client over the given in-memory backend, skipping the
    /// sheets fairing.
    pub async fn client_with_tables(backend: Arc<MemoryTables>) -> Client {
        let figment = rocket::Config::figment()
            .merge(("session_ttl", 3600))
            .merge(("jwt_secret", "unit-test-signing-key"))
            .merge(("admin_password", TEST_ADMIN_PASSWORD))
            .merge(("election", Election::example()));
        let rocket = rocket::custom(figment)
            .mount("/", crate::api::routes())
            .attach(ConfigFairing)
            .attach(ElectionFairing)
            .manage(Tables::new(backend));
        Client::tracked(rocket).await.unwrap()
    }
}
