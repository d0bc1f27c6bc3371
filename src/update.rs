//! The update pipeline: extract → fetch → map → merge → write

use crate::config::Config;
use crate::core::{extract_video_id, map_fields, merge, VideoId};
use crate::error::{Result, TubeMatterError};
use crate::fetch::MetadataFetcher;
use crate::io::{DocumentStore, Notice, Notifier};
use log::{debug, info, warn};
use std::path::Path;

/// Result of updating one document's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub video_id: VideoId,
    pub content: String,
    /// Whether `content` differs from the input
    pub changed: bool,
}

/// Runs updates against a metadata source with a fixed configuration
pub struct Updater<F> {
    fetcher: F,
    config: Config,
}

impl<F: MetadataFetcher> Updater<F> {
    pub fn new(fetcher: F, config: Config) -> Self {
        Self { fetcher, config }
    }

    /// Compute the updated text of a document
    ///
    /// Fails before any network call when no API key is configured or the
    /// text holds no usable link.
    pub async fn update_content(&self, content: &str) -> Result<UpdateOutcome> {
        let api_key = self
            .config
            .api_key()
            .ok_or(TubeMatterError::MissingCredential)?;
        let video_id = extract_video_id(content)?;

        let fields = self.fetcher.fetch(&video_id, api_key).await?;
        let updates = map_fields(&fields, &self.config.fields);
        debug!("applying {} fields for {}", updates.len(), video_id);

        let updated = merge::apply(content, updates);
        Ok(UpdateOutcome {
            video_id,
            changed: updated != content,
            content: updated,
        })
    }

    /// Update the document at `path` in `store` and report the outcome
    ///
    /// Every failure ends up as exactly one notice. The document is written
    /// only when the new text was fully computed and differs from the old.
    pub async fn update_document<S, N>(&self, store: &S, path: &Path, notifier: &N) -> Notice
    where
        S: DocumentStore + ?Sized,
        N: Notifier + ?Sized,
    {
        let notice = match self.try_update_document(store, path).await {
            Ok(notice) => notice,
            Err(err) => {
                warn!("{}: {}", path.display(), err);
                Notice::from(&err)
            }
        };
        notifier.notify(path, &notice);
        notice
    }

    async fn try_update_document<S>(&self, store: &S, path: &Path) -> Result<Notice>
    where
        S: DocumentStore + ?Sized,
    {
        if self.config.api_key().is_none() {
            return Err(TubeMatterError::MissingCredential);
        }

        let content = store.read(path)?;
        let outcome = self.update_content(&content).await?;
        if !outcome.changed {
            debug!("{}: already up to date", path.display());
            return Ok(Notice::Unchanged);
        }

        store.write(path, &outcome.content)?;
        info!("{}: updated details of {}", path.display(), outcome.video_id);
        Ok(Notice::Updated)
    }
}
