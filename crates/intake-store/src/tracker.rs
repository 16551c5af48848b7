//! Session facade used by presentation layers.

use chrono::NaiveDate;
use intake_core::{
    DaySummary, FoodEntry, Metric, RemovableEntries, RemovalRequest, Series, Store,
    chartable_series, series,
};

use crate::{RecordStore, StoreError};

/// One session's view of the store.
///
/// The store is loaded once on [`Tracker::open`] and every mutation is
/// saved immediately. A mutation whose save fails (for example with
/// [`StoreError::LockUnavailable`]) leaves the session state untouched, so
/// it is never written by a later save. [`Tracker::reload`] picks up changes
/// made by other processes.
#[derive(Debug)]
pub struct Tracker {
    records: RecordStore,
    store: Store,
}

impl Tracker {
    pub fn open(records: RecordStore) -> Result<Self, StoreError> {
        let store = records.load()?;
        Ok(Self { records, store })
    }

    pub const fn store(&self) -> &Store {
        &self.store
    }

    pub const fn records(&self) -> &RecordStore {
        &self.records
    }

    /// Discards in-memory state and loads the store again.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.store = self.records.load()?;
        Ok(())
    }

    pub fn summary(&self, date: NaiveDate) -> DaySummary {
        self.store.summary(date)
    }

    pub fn removable_entries(&self, date: NaiveDate) -> RemovableEntries {
        self.store.removable_entries(date)
    }

    pub fn series(&self, metric: Metric) -> Series {
        series(&self.store, metric)
    }

    pub fn chartable_series(&self) -> Vec<Series> {
        chartable_series(&self.store)
    }

    pub fn add_sleep(&mut self, date: NaiveDate, hours: f64) -> Result<DaySummary, StoreError> {
        self.commit(|next| {
            next.add_sleep(date, hours)?;
            Ok(())
        })?;
        tracing::info!(%date, hours, "logged sleep");
        Ok(self.summary(date))
    }

    pub fn add_water(&mut self, date: NaiveDate, ml: f64) -> Result<DaySummary, StoreError> {
        self.commit(|next| {
            next.add_water(date, ml)?;
            Ok(())
        })?;
        tracing::info!(%date, ml, "logged water");
        Ok(self.summary(date))
    }

    pub fn add_food_entries(
        &mut self,
        date: NaiveDate,
        entries: Vec<FoodEntry>,
    ) -> Result<DaySummary, StoreError> {
        let count = entries.len();
        self.commit(|next| {
            next.add_food_entries(date, entries)?;
            Ok(())
        })?;
        tracing::info!(%date, count, "logged food");
        Ok(self.summary(date))
    }

    /// Applies `request` and returns how many items were removed.
    ///
    /// The store is only written when something was actually removed.
    pub fn remove_entries(
        &mut self,
        date: NaiveDate,
        request: &RemovalRequest,
    ) -> Result<usize, StoreError> {
        let mut next = self.store.clone();
        let removed = next.remove_entries(date, request);
        if removed > 0 {
            self.records.save(&next)?;
            self.store = next;
            tracing::info!(%date, removed, "removed entries");
        }
        Ok(removed)
    }

    /// Applies `change` to a copy of the store, saves the copy, and only then
    /// replaces the session state with it.
    fn commit(
        &mut self,
        change: impl FnOnce(&mut Store) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        let mut next = self.store.clone();
        change(&mut next)?;
        self.records.save(&next)?;
        self.store = next;
        Ok(())
    }
}
