pub mod client;
pub mod session;

use self::{
    client::{Client, ClientBuilder},
    session::{LocalStorage, Session},
};
use crate::config::Config;
use leptos::prelude::*;
use std::sync::Arc;

pub fn initialise_context(config: Config) {
    tracing::trace!("initialising context");

    leptos_meta::provide_meta_context();
    leptos::context::provide_context(ClientBuilder::new(config.backend_addr).build());
    leptos::context::provide_context(Session::new(Arc::new(LocalStorage)));
}

/// Only valid while a component is being built, not inside spawned futures.
pub fn get_client() -> Client {
    expect_context::<Client>()
}

pub fn get_session() -> Session {
    expect_context::<Session>()
}
