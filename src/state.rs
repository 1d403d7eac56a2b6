// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{config::Config, filters::Filters, store::InMemoryStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub config: Arc<Config>,
    pub filters: Arc<Filters>,
}

impl AppState {
    pub fn new(store: InMemoryStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            config: Arc::new(Config::default()),
            filters: Arc::new(Filters::default()),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = Arc::new(filters);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(InMemoryStore::new())
    }
}
