//! Short link creation and lookup service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{ShortLinkRepository, StoreError};
use crate::error::AppError;
use crate::utils::base62::DEFAULT_CODE_LENGTH;
use crate::utils::code_generator::{derive_candidate, validate_custom_alias};
use crate::utils::hasher::hash_text;
use crate::utils::url_canonicalizer::canonicalize_url;

/// Default number of salted generation attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Tunables of short code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationPolicy {
    /// Length of generated codes, in base62 characters.
    pub code_length: usize,
    /// Number of salted attempts before giving up.
    pub max_attempts: u32,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Request to shorten a URL.
#[derive(Debug, Clone, Default)]
pub struct CreateShortLink {
    pub original_url: String,
    pub custom_alias: Option<String>,
    pub expired_at: Option<DateTime<Utc>>,
    /// Caller identity, recorded as-is.
    pub created_by: String,
}

/// Service for creating and retrieving short links.
///
/// Uniqueness is left to the repository. Generation is optimistic: a
/// [`StoreError::UniqueViolation`] on insert moves on to the next salted
/// attempt, any other store error is returned unchanged.
pub struct ShortLinkService<R: ShortLinkRepository> {
    repository: Arc<R>,
    policy: GenerationPolicy,
}

impl<R: ShortLinkRepository> ShortLinkService<R> {
    /// Creates a new service with the given generation policy.
    pub fn new(repository: Arc<R>, policy: GenerationPolicy) -> Self {
        Self { repository, policy }
    }

    /// Creates a short link, or returns the existing one for the same content.
    ///
    /// # Deduplication
    ///
    /// Without a custom alias, a URL whose canonical form was already shortened
    /// returns the existing record unchanged. Custom aliases skip this check, so
    /// one URL may carry several aliases. An empty alias counts as no alias.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if the URL or alias is malformed
    /// - [`AppError::AliasTaken`] if the alias is already a short code
    /// - [`AppError::GenerationExhausted`] if every salted attempt collided
    /// - [`AppError::Store`] on any other store failure
    pub async fn create(&self, request: CreateShortLink) -> Result<ShortLink, AppError> {
        let CreateShortLink {
            original_url,
            custom_alias,
            expired_at,
            created_by,
        } = request;

        let canonical_url = canonicalize_url(&original_url).map_err(|e| {
            AppError::invalid_input(
                "Invalid URL format",
                json!({ "url": original_url, "reason": e.to_string() }),
            )
        })?;
        let canonical_hash = hash_text(&canonical_url, None);

        let new_link = NewShortLink {
            short_code: String::new(),
            original_url,
            canonical_url,
            canonical_hash,
            created_by,
            is_custom: false,
            expired_at,
        };

        if let Some(alias) = custom_alias.filter(|alias| !alias.is_empty()) {
            return self.create_with_alias(new_link, alias).await;
        }

        if let Some(existing) = self
            .repository
            .find_by_hash(&new_link.canonical_hash)
            .await?
        {
            tracing::debug!(
                short_code = %existing.short_code,
                "Returning existing short link for canonical URL"
            );
            return Ok(existing);
        }

        self.create_generated(new_link).await
    }

    /// Retrieves a short link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get(&self, id: i64) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))
    }

    async fn create_with_alias(
        &self,
        mut new_link: NewShortLink,
        alias: String,
    ) -> Result<ShortLink, AppError> {
        validate_custom_alias(&alias)?;

        if self.repository.find_by_code(&alias).await?.is_some() {
            return Err(alias_taken(&alias));
        }

        new_link.short_code = alias;
        new_link.is_custom = true;

        match self.repository.create(new_link.clone()).await {
            Ok(link) => {
                tracing::info!(short_code = %link.short_code, id = link.id, "Created aliased short link");
                Ok(link)
            }
            // Another writer claimed the alias after the pre-check.
            Err(StoreError::UniqueViolation { .. }) => Err(alias_taken(&new_link.short_code)),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_generated(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        for attempt in 0..self.policy.max_attempts {
            let candidate =
                derive_candidate(&new_link.canonical_url, attempt, self.policy.code_length)?;

            let mut record = new_link.clone();
            record.short_code = candidate.short_code.clone();
            record.canonical_hash = candidate.hash;

            match self.repository.create(record).await {
                Ok(link) => {
                    tracing::info!(
                        short_code = %link.short_code,
                        id = link.id,
                        attempt,
                        "Created short link"
                    );
                    return Ok(link);
                }
                Err(StoreError::UniqueViolation { constraint }) => {
                    tracing::warn!(
                        attempt,
                        short_code = %candidate.short_code,
                        constraint = constraint.as_deref().unwrap_or("unknown"),
                        "Short code collision, retrying with salted input"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::generation_exhausted(
            "Failed to generate a unique short code",
            json!({
                "canonical_url": new_link.canonical_url,
                "attempts": self.policy.max_attempts,
            }),
        ))
    }
}

fn alias_taken(alias: &str) -> AppError {
    AppError::alias_taken("Custom alias already exists", json!({ "alias": alias }))
}
