pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::warn;

use crate::config::get_config;
use crate::error::{Error, Result};
use crate::models::asset::{Asset, AssetStatus, AssetType};
use crate::models::candidate::Candidate;
use crate::models::notification::Notification;
use crate::models::user::{User, UserRole};
use crate::services::ai_service::AiService;
use crate::services::candidate_service::SaveOutcome;
use crate::services::geocoding_service::GeocodingService;
use crate::services::{access, asset_service, candidate_service, notification_service, user_service};
use crate::store::{
    KvStore, KvStoreExt, ASSETS_KEY, CANDIDATES_KEY, CURRENT_USER_KEY, USERS_KEY,
};

/// Installs the global tracing subscriber. Called once by the embedding
/// shell; safe to call again from tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// The whole dataset: two entity lists, the operator accounts, and the active
/// session. Owned by `AppState` and handed to operations as parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AppData {
    pub candidates: Vec<Candidate>,
    pub assets: Vec<Asset>,
    pub users: Vec<User>,
    pub current_user_id: String,
}

impl AppData {
    /// Built-in operator accounts for a first run against an empty store.
    pub fn seed() -> Self {
        let users = vec![
            User {
                id: "u-1".to_string(),
                name: "System Admin".to_string(),
                email: "admin@mvm-logistics.co.uk".to_string(),
                role: UserRole::Admin,
                initials: "SA".to_string(),
            },
            User {
                id: "u-2".to_string(),
                name: "Viewer".to_string(),
                email: "view@mvm-logistics.co.uk".to_string(),
                role: UserRole::ReadOnly,
                initials: "VI".to_string(),
            },
            User {
                id: "u-3".to_string(),
                name: "STPJ Recruitment".to_string(),
                email: "contact@stpj.co.uk".to_string(),
                role: UserRole::Recruiter,
                initials: "ST".to_string(),
            },
            User {
                id: "u-4".to_string(),
                name: "TPJ Drivers".to_string(),
                email: "support@tpj.co.uk".to_string(),
                role: UserRole::Recruiter,
                initials: "TP".to_string(),
            },
        ];
        Self {
            candidates: Vec::new(),
            assets: Vec::new(),
            users,
            current_user_id: "u-1".to_string(),
        }
    }

    /// Reads every collection from its stable key. `None` means an unseeded
    /// store (no user list has ever been written).
    pub fn load(store: &dyn KvStore) -> Result<Option<Self>> {
        let Some(users) = store.get_json::<Vec<User>>(USERS_KEY)? else {
            return Ok(None);
        };
        Ok(Some(Self {
            candidates: store.get_json(CANDIDATES_KEY)?.unwrap_or_default(),
            assets: store.get_json(ASSETS_KEY)?.unwrap_or_default(),
            users,
            current_user_id: store
                .get_json(CURRENT_USER_KEY)?
                .unwrap_or_else(|| "u-1".to_string()),
        }))
    }

    pub fn save(&self, store: &dyn KvStore) -> Result<()> {
        store.put_json(CANDIDATES_KEY, &self.candidates)?;
        store.put_json(ASSETS_KEY, &self.assets)?;
        store.put_json(USERS_KEY, &self.users)?;
        store.put_json(CURRENT_USER_KEY, &self.current_user_id)?;
        Ok(())
    }
}

/// Top-level application context. Every mutation runs synchronously against
/// the in-memory data and is then persisted fire-and-forget: the in-memory
/// state stays authoritative for the session and a failed write only logs.
pub struct AppState {
    store: Arc<dyn KvStore>,
    pub data: AppData,
    pub geocoding_service: GeocodingService,
    pub ai_service: AiService,
}

impl AppState {
    pub fn new(store: Arc<dyn KvStore>) -> Result<Self> {
        let config = get_config();
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        let data = match AppData::load(store.as_ref())? {
            Some(data) => data,
            None => {
                let data = AppData::seed();
                data.save(store.as_ref())?;
                data
            }
        };

        let geocoding_service = GeocodingService::new(
            client.clone(),
            Arc::clone(&store),
            config.geocoding_base_url.clone(),
        );
        let ai_service = AiService::new(config.gemini_api_key.clone(), client);

        Ok(Self {
            store,
            data,
            geocoding_service,
            ai_service,
        })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.data
            .users
            .iter()
            .find(|u| u.id == self.data.current_user_id)
            .or_else(|| self.data.users.first())
    }

    pub fn set_current_user(&mut self, user_id: &str) -> Result<()> {
        if !self.data.users.iter().any(|u| u.id == user_id) {
            return Err(Error::NotFound(format!("No user with id {user_id}")));
        }
        self.data.current_user_id = user_id.to_string();
        self.persist();
        Ok(())
    }

    pub fn visible_candidates(&self) -> Vec<&Candidate> {
        match self.current_user() {
            Some(user) => access::visible_candidates(&self.data.candidates, user),
            None => Vec::new(),
        }
    }

    pub fn notifications(&self) -> Vec<Notification> {
        match self.current_user() {
            Some(user) => notification_service::notifications(&self.data.candidates, user),
            None => Vec::new(),
        }
    }

    pub fn outstanding_liability(&self) -> f64 {
        asset_service::outstanding_liability(&self.data.assets)
    }

    /// Creates or updates a candidate through the lifecycle operation. New
    /// records are prepended, matching the newest-first list the pages show.
    pub fn save_candidate(&mut self, next: Candidate) -> Result<SaveOutcome> {
        let acting_user = self.active_user()?;
        let previous = self
            .data
            .candidates
            .iter()
            .find(|c| c.id == next.id)
            .cloned();

        let outcome = candidate_service::save_candidate(
            previous.as_ref(),
            next,
            &acting_user,
            &mut self.data.assets,
        )?;

        match self
            .data
            .candidates
            .iter()
            .position(|c| c.id == outcome.candidate.id)
        {
            Some(index) => self.data.candidates[index] = outcome.candidate.clone(),
            None => self.data.candidates.insert(0, outcome.candidate.clone()),
        }
        self.persist();
        Ok(outcome)
    }

    pub fn delete_candidate(&mut self, candidate_id: &str) -> Result<usize> {
        let acting_user = self.active_user()?;
        let returned = candidate_service::delete_candidate(
            candidate_id,
            &acting_user,
            &mut self.data.candidates,
            &mut self.data.assets,
        )?;
        self.persist();
        Ok(returned)
    }

    pub fn allocate_asset(&mut self, candidate_id: &str, asset_id: &str) -> Result<bool> {
        let acting_user = self.active_user()?;
        let Some(candidate) = self
            .data
            .candidates
            .iter()
            .find(|c| c.id == candidate_id)
            .cloned()
        else {
            return Ok(false);
        };
        if !access::can_mutate(&acting_user, &candidate) {
            return Err(Error::Unauthorized(
                "You cannot manage this candidate's assets".to_string(),
            ));
        }
        let changed = asset_service::allocate(&candidate, asset_id, &mut self.data.assets)?;
        if changed {
            self.persist();
        }
        Ok(changed)
    }

    pub fn deallocate_asset(&mut self, asset_id: &str) -> Result<bool> {
        let acting_user = self.active_user()?;
        if acting_user.role == UserRole::ReadOnly {
            return Err(Error::Unauthorized(
                "Read-only users cannot modify assets".to_string(),
            ));
        }
        let changed =
            asset_service::deallocate(asset_id, &mut self.data.assets, &self.data.candidates);
        if changed {
            self.persist();
        }
        Ok(changed)
    }

    /// Inventory management is an admin surface; recruiters never see it.
    pub fn add_asset(
        &mut self,
        name: &str,
        kind: AssetType,
        replacement_cost: Option<f64>,
        notes: Option<String>,
    ) -> Result<String> {
        self.require_admin("Only admins can manage the asset inventory")?;
        let id = asset_service::add_asset(name, kind, replacement_cost, notes, &mut self.data.assets)?;
        self.persist();
        Ok(id)
    }

    pub fn remove_asset(&mut self, asset_id: &str) -> Result<bool> {
        self.require_admin("Only admins can manage the asset inventory")?;
        let removed = asset_service::remove_asset(asset_id, &mut self.data.assets);
        if removed {
            self.persist();
        }
        Ok(removed)
    }

    pub fn set_asset_status(&mut self, asset_id: &str, status: AssetStatus) -> Result<bool> {
        self.require_admin("Only admins can manage the asset inventory")?;
        let changed = asset_service::set_asset_status(asset_id, status, &mut self.data.assets)?;
        if changed {
            self.persist();
        }
        Ok(changed)
    }

    pub fn create_user(&mut self, name: &str, email: &str, role: UserRole) -> Result<String> {
        let acting_user = self.active_user()?;
        let id = user_service::create_user(name, email, role, &acting_user, &mut self.data.users)?;
        self.persist();
        Ok(id)
    }

    pub fn delete_user(&mut self, user_id: &str) -> Result<bool> {
        let acting_user = self.active_user()?;
        let removed = user_service::delete_user(user_id, &acting_user, &mut self.data.users)?;
        if removed {
            self.persist();
        }
        Ok(removed)
    }

    fn active_user(&self) -> Result<User> {
        self.current_user()
            .cloned()
            .ok_or_else(|| Error::NotFound("No active user".to_string()))
    }

    fn require_admin(&self, message: &str) -> Result<()> {
        let acting_user = self.active_user()?;
        if acting_user.role != UserRole::Admin {
            return Err(Error::Unauthorized(message.to_string()));
        }
        Ok(())
    }

    fn persist(&self) {
        if let Err(err) = self.data.save(self.store.as_ref()) {
            warn!(error = %err, "failed to persist state; continuing with in-memory data");
        }
    }
}
