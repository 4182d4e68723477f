use std::sync::Arc;

use chrono::Duration;
use log::{error, info};
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::model::election::Election;
use crate::sheets::{SheetsClient, SheetsConfig, Tables};

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Deserialize)]
pub struct Config {
    // non-secrets
    session_ttl: u32,
    // secrets
    jwt_secret: String,
    admin_password: String,
}

impl Config {
    /// Valid lifetime of the session cookie in seconds.
    pub fn session_ttl(&self) -> Duration {
        Duration::seconds(self.session_ttl.into())
    }

    /// Secret key used to sign session cookies.
    pub fn jwt_secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// The single shared password protecting the admin report.
    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }
}

/// A fairing that loads the application config and puts it in managed state.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// A fairing that loads the election description (authorized voters,
/// candidate sets, seat target) and puts it in managed state.
pub struct ElectionFairing;

#[rocket::async_trait]
impl Fairing for ElectionFairing {
    fn info(&self) -> Info {
        Info {
            name: "Election",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the election description.
        let election = match rocket.figment().extract_inner::<Election>("election") {
            Ok(election) => election,
            Err(e) => {
                error!("Failed to load election config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // An election nobody can vote in, or with nothing to vote for,
        // is a misconfiguration.
        if election.authorized_voters().is_empty() {
            error!("Election config has no authorized voters");
            return Err(rocket);
        }
        if election.president_candidates().is_empty() || election.seats() == 0 {
            error!("Election config has no candidates to vote for");
            return Err(rocket);
        }
        info!(
            "Loaded election config: {} authorized voters, {} president candidates, {} board candidates for {} seats",
            election.authorized_voters().len(),
            election.president_candidates().len(),
            election.board_candidates().len(),
            election.seats(),
        );

        // Manage the state.
        rocket = rocket.manage(election);
        Ok(rocket)
    }
}

/// A fairing that loads the spreadsheet connection config and places the
/// shared table backend handle into managed state.
pub struct SheetsFairing;

#[rocket::async_trait]
impl Fairing for SheetsFairing {
    fn info(&self) -> Info {
        Info {
            name: "Sheets",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract_inner::<SheetsConfig>("sheets") {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load sheets config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        let tables = Tables::new(Arc::new(SheetsClient::new(config)));
        info!("Loaded spreadsheet backend config");

        // Manage the state.
        rocket = rocket.manage(tables);
        Ok(rocket)
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl Config {
        pub fn example() -> Self {
            Self {
                session_ttl: 3600,
                jwt_secret: "unit-test-signing-key".to_string(),
                admin_password: "sesame-open".to_string(),
            }
        }
    }
}
