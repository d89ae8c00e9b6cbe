use std::{future::Future, sync::Arc, time::Duration};

use anyhow::Result;
use futures::future::pending;
use tokio::{
    sync::watch,
    time::{Interval, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::{
    app::valuate,
    models::{Identity, PortfolioSummary},
    services::{IdentityContext, PriceLookup, RecordStore},
};

/// Keeps the published portfolio in step with the signed-in identity.
pub struct Dashboard {
    identity: IdentityContext,
    store: Arc<dyn RecordStore>,
    prices: Arc<dyn PriceLookup>,
    summary: watch::Sender<Option<PortfolioSummary>>,
}

impl Dashboard {
    pub fn new(
        identity: IdentityContext,
        store: Arc<dyn RecordStore>,
        prices: Arc<dyn PriceLookup>,
    ) -> Self {
        let (summary, _) = watch::channel(None);
        Self {
            identity,
            store,
            prices,
            summary,
        }
    }

    pub fn identity(&self) -> &IdentityContext {
        &self.identity
    }

    pub fn summaries(&self) -> watch::Receiver<Option<PortfolioSummary>> {
        self.summary.subscribe()
    }

    pub fn latest(&self) -> Option<PortfolioSummary> {
        self.summary.borrow().clone()
    }

    /// Loads and values the current identity's records and publishes the result.
    ///
    /// Returns `None` without touching the store when nobody is signed in, and
    /// also when the user changes before the valuation completes; in that case
    /// the stale result is dropped unpublished.
    pub async fn refresh(&self) -> Result<Option<PortfolioSummary>> {
        let mut identity_rx = self.identity.subscribe();
        let Some(identity) = identity_rx.borrow_and_update().clone() else {
            self.summary.send_if_modified(|current| current.take().is_some());
            return Ok(None);
        };

        let load = async {
            let records = self.store.fetch_records(&identity).await?;
            debug!(user_id = %identity.user_id(), records = records.len(), "records fetched");
            Ok::<_, anyhow::Error>(valuate(&records, self.prices.as_ref()).await)
        };

        tokio::select! {
            summary = load => {
                let summary = summary?;
                info!(
                    user_id = %identity.user_id(),
                    items = summary.len(),
                    unavailable = summary.unavailable_count(),
                    net_worth = %summary.net_worth(),
                    "portfolio refreshed"
                );
                self.summary.send_replace(Some(summary.clone()));
                Ok(Some(summary))
            }
            _ = identity_changed(&mut identity_rx, &identity) => {
                debug!(user_id = %identity.user_id(), "identity changed, discarding refresh");
                Ok(None)
            }
        }
    }

    /// Refreshes now, on every identity transition and on each tick of
    /// `refresh_every`, until `shutdown` resolves.
    pub async fn run<F>(&self, refresh_every: Option<Duration>, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut identity_rx = self.identity.subscribe();
        identity_rx.borrow_and_update();

        let mut ticker = refresh_every.map(|period| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });
        if let Some(interval) = ticker.as_mut() {
            interval.tick().await;
        }

        self.refresh_logged().await;

        loop {
            tokio::select! {
                _ = &mut shutdown => return,
                changed = identity_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    identity_rx.borrow_and_update();
                    self.refresh_logged().await;
                }
                _ = next_tick(&mut ticker) => self.refresh_logged().await,
            }
        }
    }

    async fn refresh_logged(&self) {
        if let Err(err) = self.refresh().await {
            error!("portfolio refresh failed: {:#}", err);
        }
    }
}

async fn identity_changed(rx: &mut watch::Receiver<Option<Identity>>, identity: &Identity) {
    loop {
        if rx.changed().await.is_err() {
            pending::<()>().await;
        }
        let same_user = rx
            .borrow_and_update()
            .as_ref()
            .is_some_and(|current| current.same_user(identity));
        if !same_user {
            return;
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => pending::<()>().await,
    }
}
