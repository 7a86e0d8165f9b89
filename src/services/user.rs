//! User service implementation
//!
//! This service looks up user profiles (event organizers) through the
//! cache-first helper so repeated visits render immediately.

use std::sync::Arc;
use futures::future::join_all;
use tracing::{debug, warn};
use crate::models::user::User;
use crate::services::api::VolunteamApi;
use crate::services::cache::{CacheFirst, CacheService};
use crate::utils::errors::Result;

/// User service for profile lookups
#[derive(Clone)]
pub struct UserService {
    api: Arc<dyn VolunteamApi>,
    cache: CacheService,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(api: Arc<dyn VolunteamApi>, cache: CacheService) -> Self {
        Self { api, cache }
    }

    pub fn cache_key(user_id: &str) -> String {
        format!("user:{}", user_id)
    }

    /// Get user details, cached value first
    pub async fn get_user_details(&self, user_id: &str) -> Result<CacheFirst<User>> {
        debug!(user_id = %user_id, "Getting user details");

        let api = self.api.clone();
        let id = user_id.to_string();
        self.cache
            .get_cache_first(&Self::cache_key(user_id), async move { api.get_user_details(&id).await })
            .await
    }

    /// Look up every user once, waiting for any background refresh as well
    ///
    /// Returns how many lookups succeeded.
    pub async fn warm_users(&self, user_ids: &[&str]) -> usize {
        let lookups = user_ids.iter().map(|id| self.get_user_details(id));
        let results = join_all(lookups).await;

        let mut warmed = 0;
        let mut refreshes = Vec::new();
        for (id, result) in user_ids.iter().zip(results) {
            match result {
                Ok(fetched) => {
                    warmed += 1;
                    refreshes.extend(fetched.refresh);
                }
                Err(e) => warn!(user_id = %id, error = %e, "Failed to warm user"),
            }
        }

        for refresh in join_all(refreshes).await {
            if let Err(e) = refresh {
                warn!(error = %e, "User refresh task failed");
            }
        }
        warmed
    }
}
