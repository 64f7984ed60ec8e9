// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session history and score.
//!
//! The engine exclusively owns the history of the current session. The
//! session score is always recomputed from the history, never cached, so it
//! cannot drift from what the user sees.
//!
//! At most one scan is pending at a time. A caller takes a [`ScanTicket`]
//! with [`RewardEngine::begin_scan`] before classifying and hands it back to
//! [`RewardEngine::complete_scan`] afterwards. Beginning a new scan, clearing
//! the history, or abandoning the ticket all invalidate it, and an invalid
//! ticket never records.

use std::collections::VecDeque;
use std::collections::vec_deque;

use chrono::Utc;
use ecoscan_core::types::{ClassificationResult, ImageRef, ScanId, ScannedItem};
use tracing::{debug, info};

use crate::points;
use crate::tiers::{TierProgress, TierTable};

/// Proof that a scan was started. Deliberately not `Clone`.
#[derive(Debug)]
#[must_use = "a ticket must be completed or abandoned"]
pub struct ScanTicket {
    generation: u64,
}

/// Scoring, history, and tier lookup for one session.
#[derive(Debug, Default)]
pub struct RewardEngine {
    tiers: TierTable,
    /// Most recent first.
    history: VecDeque<ScannedItem>,
    generation: u64,
    pending: Option<u64>,
}

impl RewardEngine {
    pub fn new(tiers: TierTable) -> Self {
        Self {
            tiers,
            history: VecDeque::new(),
            generation: 0,
            pending: None,
        }
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// Records a successful classification and returns the new item.
    ///
    /// Items are never deduplicated; scanning the same object twice earns
    /// points twice.
    pub fn record_scan(&mut self, result: ClassificationResult, image: ImageRef) -> ScannedItem {
        let item = ScannedItem {
            id: ScanId::generate(),
            points: points::score(result.category),
            name: result.item_name,
            category: result.category,
            description: result.description,
            image,
            captured_at: Utc::now(),
        };

        info!(
            scan_id = %item.id,
            item = %item.name,
            category = %item.category,
            points = item.points,
            "scan recorded"
        );

        self.history.push_front(item.clone());
        item
    }

    /// All items this session, most recent first.
    pub fn history(&self) -> vec_deque::Iter<'_, ScannedItem> {
        self.history.iter()
    }

    /// The `n` most recent items.
    pub fn latest(&self, n: usize) -> impl Iterator<Item = &ScannedItem> {
        self.history.iter().take(n)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Sum of points over the whole history.
    pub fn current_total(&self) -> u64 {
        self.history.iter().map(|item| u64::from(item.points)).sum()
    }

    pub fn tier_for(&self, score: u64) -> TierProgress<'_> {
        self.tiers.tier_for(score)
    }

    /// Tier progress for the current session total.
    pub fn progress(&self) -> TierProgress<'_> {
        self.tiers.tier_for(self.current_total())
    }

    /// Ends the session: empties the history and invalidates any pending scan.
    pub fn clear_history(&mut self) {
        let cleared = self.history.len();
        self.history.clear();
        self.pending = None;
        info!(cleared, "history cleared");
    }

    /// Starts a scan, superseding any scan still pending.
    pub fn begin_scan(&mut self) -> ScanTicket {
        self.generation += 1;
        if let Some(previous) = self.pending.replace(self.generation) {
            debug!(previous, current = self.generation, "pending scan superseded");
        }
        ScanTicket {
            generation: self.generation,
        }
    }

    /// Records `result` if `ticket` is still the pending scan.
    ///
    /// Returns `None`, and records nothing, for a superseded or invalidated
    /// ticket.
    pub fn complete_scan(
        &mut self,
        ticket: ScanTicket,
        result: ClassificationResult,
        image: ImageRef,
    ) -> Option<ScannedItem> {
        if self.pending != Some(ticket.generation) {
            debug!(
                ticket = ticket.generation,
                "discarding result for stale scan"
            );
            return None;
        }
        self.pending = None;
        Some(self.record_scan(result, image))
    }

    /// Releases `ticket` without recording anything.
    pub fn abandon_scan(&mut self, ticket: ScanTicket) {
        if self.pending == Some(ticket.generation) {
            self.pending = None;
            debug!(ticket = ticket.generation, "scan abandoned");
        }
    }

    /// Drops whatever scan is pending, for callers that lost their ticket
    /// (e.g. a cancelled future). Returns whether one was pending.
    pub fn cancel_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_scan_pending(&self) -> bool {
        self.pending.is_some()
    }
}
