//! In-process record store.
//!
//! Used for local development (`STORAGE_BACKEND=memory`) and tests. It
//! honours the same contract as the PostgreSQL store: inserts are rejected
//! on duplicate slugs and increments are applied under the store lock, so
//! concurrent callers never lose updates. Data does not survive a restart.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{Link, MonthlyClicks, NewLink, SlugMonthlyClicks};
use crate::domain::repositories::{LinkRepository, StatsRepository, StoreError};

#[derive(Default)]
struct Records {
    links: HashMap<String, (u64, Link)>,
    next_seq: u64,
}

/// Link and statistics store backed by a mutex-guarded map.
#[derive(Default)]
pub struct MemoryLinkRepository {
    records: Mutex<Records>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of a stored link.
    pub fn get(&self, slug: &str) -> Result<Option<Link>, StoreError> {
        let records = self.lock()?;
        Ok(records.links.get(slug).map(|(_, link)| link.clone()))
    }

    /// Inserts a fully specified record, bypassing normalization.
    ///
    /// Lets tests seed legacy rows and fixed timestamps.
    pub fn seed(&self, link: Link) -> Result<(), StoreError> {
        let mut records = self.lock()?;
        if records.links.contains_key(&link.slug) {
            return Err(StoreError::UniqueViolation);
        }
        let seq = records.next_seq;
        records.next_seq += 1;
        records.links.insert(link.slug.clone(), (seq, link));
        Ok(())
    }

    /// Number of stored links.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.links.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))
    }

    fn owned_links(&self, owner: Option<&str>) -> Result<Vec<Link>, StoreError> {
        let records = self.lock()?;
        Ok(records
            .links
            .values()
            .filter(|(_, link)| link.is_owned_by(owner))
            .map(|(_, link)| link.clone())
            .collect())
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn exists(&self, slug: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.links.contains_key(slug))
    }

    async fn insert(&self, new_link: NewLink) -> Result<(), StoreError> {
        self.seed(Link::new(
            new_link.slug,
            new_link.destination,
            new_link.owner,
            0,
            Utc::now(),
        ))
    }

    async fn get_destination(&self, slug: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .lock()?
            .links
            .get(slug)
            .map(|(_, link)| link.destination.clone()))
    }

    async fn increment_clicks(&self, slug: &str) -> Result<(), StoreError> {
        if let Some((_, link)) = self.lock()?.links.get_mut(slug) {
            link.click_count += 1;
        }
        Ok(())
    }

    async fn list(
        &self,
        owner: Option<String>,
        limit: Option<i64>,
    ) -> Result<Vec<Link>, StoreError> {
        let records = self.lock()?;
        let mut matches: Vec<&(u64, Link)> = records
            .links
            .values()
            .filter(|(_, link)| link.is_owned_by(owner.as_deref()))
            .collect();

        matches.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at.cmp(&a.created_at).then(seq_b.cmp(seq_a))
        });

        let limit = limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(usize::MAX);

        Ok(matches
            .into_iter()
            .take(limit)
            .map(|(_, link)| link.clone())
            .collect())
    }

    async fn delete(&self, slug: &str, owner: Option<String>) -> Result<bool, StoreError> {
        let mut records = self.lock()?;
        let owned = records
            .links
            .get(slug)
            .is_some_and(|(_, link)| link.is_owned_by(owner.as_deref()));

        if owned {
            records.links.remove(slug);
        }
        Ok(owned)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }
}

#[async_trait]
impl StatsRepository for MemoryLinkRepository {
    async fn monthly_clicks(&self, owner: Option<String>) -> Result<Vec<MonthlyClicks>, StoreError> {
        let mut totals: BTreeMap<String, i64> = BTreeMap::new();
        for link in self.owned_links(owner.as_deref())? {
            *totals
                .entry(link.created_at.format("%Y-%m").to_string())
                .or_default() += link.click_count;
        }

        Ok(totals
            .into_iter()
            .rev()
            .map(|(month, total_clicks)| MonthlyClicks {
                month,
                total_clicks,
            })
            .collect())
    }

    async fn monthly_clicks_by_slug(
        &self,
        owner: Option<String>,
    ) -> Result<Vec<SlugMonthlyClicks>, StoreError> {
        let mut months: BTreeMap<String, BTreeMap<String, i64>> = BTreeMap::new();
        for link in self.owned_links(owner.as_deref())? {
            *months
                .entry(link.created_at.format("%Y-%m").to_string())
                .or_default()
                .entry(link.slug)
                .or_default() += link.click_count;
        }

        Ok(months
            .into_iter()
            .rev()
            .flat_map(|(month, slugs)| {
                slugs
                    .into_iter()
                    .map(move |(slug, total_clicks)| SlugMonthlyClicks {
                        month: month.clone(),
                        slug,
                        total_clicks,
                    })
            })
            .collect())
    }
}
