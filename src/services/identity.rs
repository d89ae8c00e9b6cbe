use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Local;
use reqwest::Client;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    api::supabase,
    models::{Credentials, Identity},
};

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity>;
    async fn sign_out(&self, identity: &Identity) -> Result<()>;
}

/// The current identity, or none. Every transition is pushed to subscribers.
#[derive(Clone, Debug)]
pub struct IdentityContext {
    sender: Arc<watch::Sender<Option<Identity>>>,
}

impl Default for IdentityContext {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityContext {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.sender.subscribe()
    }

    pub fn set(&self, identity: Option<Identity>) {
        self.sender.send_replace(identity);
    }

    pub async fn sign_in(
        &self,
        provider: &dyn AuthProvider,
        credentials: &Credentials,
    ) -> Result<Identity> {
        let identity = provider.sign_in(credentials).await?;
        info!(user_id = %identity.user_id(), "signed in");
        self.set(Some(identity.clone()));
        Ok(identity)
    }

    /// Clears the identity even when the provider fails to end the remote session.
    pub async fn sign_out(&self, provider: &dyn AuthProvider) {
        let Some(identity) = self.current() else {
            return;
        };

        if let Err(err) = provider.sign_out(&identity).await {
            warn!(user_id = %identity.user_id(), "remote sign-out failed: {:#}", err);
        }

        self.set(None);
        info!(user_id = %identity.user_id(), "signed out");
    }
}

/// Email and password sign-in against Supabase auth.
#[derive(Clone, Debug)]
pub struct SupabaseAuth {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseAuth {
    pub fn new(client: Client, base_url: String, anon_key: String) -> Self {
        Self {
            client,
            base_url,
            anon_key,
        }
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity> {
        let password = credentials
            .password()
            .as_deref()
            .with_context(|| "Supabase sign-in requires a password")?;

        let session = supabase::sign_in_with_password(
            credentials.login(),
            password,
            &self.client,
            &self.base_url,
            &self.anon_key,
        )
        .await?;

        Ok(session.to_identity())
    }

    async fn sign_out(&self, identity: &Identity) -> Result<()> {
        match identity.access_token() {
            Some(token) => {
                supabase::sign_out(token, &self.client, &self.base_url, &self.anon_key).await
            }
            None => Ok(()),
        }
    }
}

/// Identity for the local SQLite store: the login is taken as the user id.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalAuth;

#[async_trait]
impl AuthProvider for LocalAuth {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity> {
        let user_id = credentials.login().trim();
        if user_id.is_empty() {
            anyhow::bail!("Local sign-in requires a user name");
        }

        Ok(Identity::new(user_id.to_string(), None, None, Local::now()))
    }

    async fn sign_out(&self, _identity: &Identity) -> Result<()> {
        Ok(())
    }
}
