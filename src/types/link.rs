// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Presigned external link with a parsed expiration timestamp.

use crate::types::sea::ExternalLink;
use chrono::{DateTime, Utc};

/// Safety buffer (in seconds) before link expiration.
/// Links are considered expired this many seconds before their actual expiration time.
pub const LINK_EXPIRY_BUFFER_SECS: i64 = 30;

/// Internal representation of an `EXTERNAL_LINKS` chunk location.
///
/// The expiration is informational: links are fetched in server order
/// regardless of when they expire.
#[derive(Debug, Clone, PartialEq)]
pub struct PresignedLink {
    /// Presigned URL for downloading the chunk. Carries its own credentials.
    pub url: String,
    /// When this link expires, if the server sent a parseable timestamp.
    pub expiration: Option<DateTime<Utc>>,
    /// Index of this chunk in the result set.
    pub chunk_index: Option<i64>,
}

impl PresignedLink {
    /// Convert from the SEA API response type.
    pub fn from_external_link(link: &ExternalLink) -> Self {
        let expiration = link.expiration.as_deref().and_then(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|e| {
                    tracing::debug!("Ignoring unparseable link expiration {:?}: {}", raw, e);
                })
                .ok()
        });

        Self {
            url: link.external_link.clone(),
            expiration,
            chunk_index: link.chunk_index,
        }
    }

    /// Check if the link is expired (with safety buffer).
    pub fn is_expired(&self) -> bool {
        match self.expiration {
            Some(expiration) => {
                Utc::now() + chrono::Duration::seconds(LINK_EXPIRY_BUFFER_SECS) >= expiration
            }
            None => false,
        }
    }
}
