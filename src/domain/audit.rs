// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Audit stamps embedded in every persisted record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who created/last modified a record, and when.
///
/// `created_*` is fixed at construction. `modified_*` moves forward on every
/// mutation and never goes behind `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFields {
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub created_by: String,
    pub modified_by: String,
}

impl AuditFields {
    pub fn new(actor: &str) -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            modified_at: now,
            created_by: actor.to_string(),
            modified_by: actor.to_string(),
        }
    }

    /// Record a mutation by `actor`.
    pub fn touch(&mut self, actor: &str) {
        self.modified_at = Utc::now().max(self.created_at);
        self.modified_by = actor.to_string();
    }
}
