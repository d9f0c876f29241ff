//! Slug allocation and resolution.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, StoreError, with_deadline};
use crate::error::AppError;
use crate::utils::slug_generator::{DEFAULT_SLUG_LENGTH, generate_slug};
use crate::utils::url_normalizer::{normalize, with_default_scheme};

/// Tunables for [`LinkService`].
#[derive(Debug, Clone)]
pub struct LinkServiceSettings {
    /// Length of generated slugs.
    pub slug_length: usize,
    /// Upper bound on generated-slug attempts per creation.
    pub max_attempts: usize,
    /// Deadline for each individual store call.
    pub store_timeout: Duration,
}

impl Default for LinkServiceSettings {
    fn default() -> Self {
        Self {
            slug_length: DEFAULT_SLUG_LENGTH,
            max_attempts: 10,
            store_timeout: Duration::from_secs(5),
        }
    }
}

/// Builds the public short URL for a slug.
pub fn short_url(base_url: &str, slug: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), slug)
}

/// Creates and resolves short links.
///
/// Holds no slug state of its own: uniqueness rests on the store's unique
/// constraint and click counting on its relative increments. The service can
/// therefore be shared freely between concurrent requests.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    click_sender: mpsc::Sender<ClickEvent>,
    settings: LinkServiceSettings,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// Click events for resolved slugs are offered to `click_sender`; see
    /// [`crate::domain::click_worker::run_click_worker`].
    pub fn new(
        link_repository: Arc<L>,
        click_sender: mpsc::Sender<ClickEvent>,
        settings: LinkServiceSettings,
    ) -> Self {
        Self {
            link_repository,
            click_sender,
            settings,
        }
    }

    /// Creates a short link and returns its slug.
    ///
    /// A blank `slug_candidate` requests a generated slug.
    ///
    /// # Errors
    ///
    /// - Normalization errors ([`AppError::EmptyInput`], [`AppError::InvalidUrl`],
    ///   [`AppError::InvalidSlugFormat`]) unchanged
    /// - [`AppError::SlugTaken`] if the caller's slug exists, including when a
    ///   concurrent creation wins the insert race
    /// - [`AppError::AllocationExhausted`] if no free generated slug was found
    ///   within the attempt cap
    /// - [`AppError::StoreUnavailable`] on store failures or timeouts
    pub async fn create(
        &self,
        destination: &str,
        slug_candidate: Option<&str>,
        owner: Option<&str>,
    ) -> Result<String, AppError> {
        self.create_link(destination, slug_candidate, owner)
            .await
            .map(|link| link.slug)
    }

    /// Same as [`create`](Self::create), but returns the stored record
    /// including its canonical destination.
    pub async fn create_link(
        &self,
        destination: &str,
        slug_candidate: Option<&str>,
        owner: Option<&str>,
    ) -> Result<NewLink, AppError> {
        let normalized = normalize(destination, slug_candidate)?;
        let owner = owner.map(str::to_string);

        let created = match normalized.slug {
            Some(slug) => {
                self.insert_chosen(NewLink {
                    slug,
                    destination: normalized.destination,
                    owner,
                })
                .await?
            }
            None => {
                self.insert_generated(normalized.destination, owner)
                    .await?
            }
        };

        metrics::counter!("links_created_total").increment(1);
        Ok(created)
    }

    /// Resolves a slug to its destination and schedules a click increment.
    ///
    /// The increment is offered to the click queue without waiting; if the
    /// queue is full or closed the click is dropped and the resolution
    /// still succeeds.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the slug does not exist (no click is recorded)
    /// - [`AppError::StoreUnavailable`] if the lookup fails
    pub async fn resolve(&self, slug: &str) -> Result<String, AppError> {
        let destination = self
            .store(self.link_repository.get_destination(slug))
            .await?
            .ok_or_else(|| AppError::NotFound {
                slug: slug.to_string(),
            })?;

        self.record_click(slug);
        metrics::counter!("redirects_total").increment(1);

        Ok(with_default_scheme(&destination))
    }

    /// Lists links visible to `owner`, newest first.
    pub async fn list_links(
        &self,
        owner: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Link>, AppError> {
        Ok(self
            .store(self.link_repository.list(owner.map(str::to_string), limit))
            .await?)
    }

    /// Deletes a link owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the slug does not exist or belongs
    /// to someone else.
    pub async fn delete_link(&self, slug: &str, owner: Option<&str>) -> Result<(), AppError> {
        let deleted = self
            .store(
                self.link_repository
                    .delete(slug, owner.map(str::to_string)),
            )
            .await?;

        if !deleted {
            return Err(AppError::NotFound {
                slug: slug.to_string(),
            });
        }

        info!(slug, "Link deleted");
        Ok(())
    }

    /// Checks store connectivity.
    pub async fn ping(&self) -> Result<(), AppError> {
        Ok(self.store(self.link_repository.ping()).await?)
    }

    /// Reports whether the click queue still has a live consumer, and its free capacity.
    pub fn click_queue_status(&self) -> (bool, usize) {
        (!self.click_sender.is_closed(), self.click_sender.capacity())
    }

    async fn insert_chosen(&self, new_link: NewLink) -> Result<NewLink, AppError> {
        if self.store(self.link_repository.exists(&new_link.slug)).await? {
            return Err(AppError::SlugTaken {
                slug: new_link.slug,
            });
        }

        match self
            .store(self.link_repository.insert(new_link.clone()))
            .await
        {
            Ok(()) => {
                debug!(slug = %new_link.slug, "Created link with caller-chosen slug");
                Ok(new_link)
            }
            Err(StoreError::UniqueViolation) => {
                debug!(slug = %new_link.slug, "Lost insert race for caller-chosen slug");
                Err(AppError::SlugTaken {
                    slug: new_link.slug,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Generates slugs until one is inserted or the attempt cap is reached.
    ///
    /// A collision, whether seen by the existence check or by the insert,
    /// consumes one attempt.
    async fn insert_generated(
        &self,
        destination: String,
        owner: Option<String>,
    ) -> Result<NewLink, AppError> {
        let attempts = self.settings.max_attempts;

        for attempt in 1..=attempts {
            let slug = generate_slug(self.settings.slug_length);

            if self.store(self.link_repository.exists(&slug)).await? {
                metrics::counter!("slug_collisions_total").increment(1);
                debug!(slug = %slug, attempt, "Generated slug already taken");
                continue;
            }

            let new_link = NewLink {
                slug,
                destination: destination.clone(),
                owner: owner.clone(),
            };

            match self
                .store(self.link_repository.insert(new_link.clone()))
                .await
            {
                Ok(()) => {
                    debug!(slug = %new_link.slug, attempt, "Created link with generated slug");
                    return Ok(new_link);
                }
                Err(StoreError::UniqueViolation) => {
                    metrics::counter!("slug_collisions_total").increment(1);
                    debug!(slug = %new_link.slug, attempt, "Generated slug taken concurrently");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(attempts, "Slug allocation exhausted");
        Err(AppError::AllocationExhausted { attempts })
    }

    fn record_click(&self, slug: &str) {
        if let Err(e) = self.click_sender.try_send(ClickEvent::new(slug)) {
            metrics::counter!("click_events_dropped_total").increment(1);
            warn!(slug, error = %e, "Dropped click event");
        }
    }

    /// Applies the per-call store deadline.
    async fn store<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        with_deadline(self.settings.store_timeout, call).await
    }
}
