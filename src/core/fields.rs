//! Video metadata fields and their mapping onto front matter keys

use crate::core::front_matter::FieldValue;
use log::warn;
use serde::{Deserialize, Serialize};

pub const KEY_CHANNEL: &str = "channel";
pub const KEY_TITLE: &str = "title";
pub const KEY_THUMBNAIL_URL: &str = "thumbnail url";
pub const KEY_PUBLISHED_AT: &str = "published at";
pub const KEY_CHANNEL_ID: &str = "channelId";
pub const KEY_DEFAULT_AUDIO_LANGUAGE: &str = "defaultAudioLanguage";
pub const KEY_DESCRIPTION: &str = "description";
pub const KEY_VIDEO_TAGS: &str = "videoTags";

/// Metadata fetched for one video
///
/// The service always returns a channel name and a title; everything else
/// may be missing. Missing tags are an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    pub channel: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub published_at: Option<String>,
    pub channel_id: Option<String>,
    pub default_audio_language: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

/// Which fields to write, and how
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub include_channel: bool,
    pub include_title: bool,
    pub include_thumbnail_url: bool,
    pub include_published_at: bool,
    pub include_channel_id: bool,
    pub include_default_audio_language: bool,
    pub include_description: bool,
    /// Replace line breaks in the description with spaces
    pub format_description_to_one_line: bool,
    pub include_video_tags: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            include_channel: true,
            include_title: true,
            include_thumbnail_url: false,
            include_published_at: true,
            include_channel_id: false,
            include_default_audio_language: false,
            include_description: false,
            format_description_to_one_line: true,
            include_video_tags: false,
        }
    }
}

impl FieldConfig {
    /// Every field enabled, description on one line
    pub fn all() -> Self {
        Self {
            include_channel: true,
            include_title: true,
            include_thumbnail_url: true,
            include_published_at: true,
            include_channel_id: true,
            include_default_audio_language: true,
            include_description: true,
            format_description_to_one_line: true,
            include_video_tags: true,
        }
    }

    /// Every field disabled
    pub fn none() -> Self {
        Self {
            include_channel: false,
            include_title: false,
            include_thumbnail_url: false,
            include_published_at: false,
            include_channel_id: false,
            include_default_audio_language: false,
            include_description: false,
            format_description_to_one_line: true,
            include_video_tags: false,
        }
    }
}

/// Ordered `(key, value)` pairs to merge into front matter
pub type FieldUpdates = Vec<(String, FieldValue)>;

/// Turn fetched metadata into front matter updates
///
/// Pairs come out in a fixed order so a freshly created block always looks
/// the same. Enabled fields the service did not return are left out.
pub fn map_fields(fields: &FieldSet, config: &FieldConfig) -> FieldUpdates {
    let mut updates = FieldUpdates::new();
    let mut push_scalar = |enabled: bool, key: &str, value: Option<&str>| {
        if let (true, Some(value)) = (enabled, value) {
            updates.push((key.to_string(), FieldValue::scalar(value)));
        }
    };

    push_scalar(config.include_channel, KEY_CHANNEL, Some(fields.channel.as_str()));
    push_scalar(config.include_title, KEY_TITLE, Some(fields.title.as_str()));
    push_scalar(
        config.include_thumbnail_url,
        KEY_THUMBNAIL_URL,
        fields.thumbnail_url.as_deref(),
    );
    push_scalar(
        config.include_published_at,
        KEY_PUBLISHED_AT,
        fields.published_at.as_deref(),
    );
    push_scalar(
        config.include_channel_id,
        KEY_CHANNEL_ID,
        fields.channel_id.as_deref(),
    );
    push_scalar(
        config.include_default_audio_language,
        KEY_DEFAULT_AUDIO_LANGUAGE,
        fields.default_audio_language.as_deref(),
    );

    if config.include_description {
        if let Some(description) = &fields.description {
            let description = if config.format_description_to_one_line {
                one_line(description)
            } else {
                if description.contains(['\n', '\r']) {
                    warn!("writing a multi-line description; the front matter block may not parse back");
                }
                description.clone()
            };
            updates.push((KEY_DESCRIPTION.to_string(), FieldValue::Scalar(description)));
        }
    }

    if config.include_video_tags {
        updates.push((
            KEY_VIDEO_TAGS.to_string(),
            FieldValue::List(fields.tags.clone()),
        ));
    }

    updates
}

/// Replace each line break (`\r\n`, `\n` or `\r`) with a single space
fn one_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> FieldSet {
        FieldSet {
            channel: "Rick Astley".into(),
            title: "Never Gonna Give You Up".into(),
            thumbnail_url: Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg".into()),
            published_at: Some("2009-10-25T06:57:33Z".into()),
            channel_id: Some("UCuAXFkgsw1L7xaCfnd5JJOw".into()),
            default_audio_language: Some("en".into()),
            description: Some("line one\nline two\r\nline three".into()),
            tags: vec!["rick astley".into(), "80s".into()],
        }
    }

    fn keys(updates: &FieldUpdates) -> Vec<&str> {
        updates.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn test_all_fields_in_fixed_order() {
        let updates = map_fields(&sample(), &FieldConfig::all());
        assert_eq!(
            keys(&updates),
            vec![
                "channel",
                "title",
                "thumbnail url",
                "published at",
                "channelId",
                "defaultAudioLanguage",
                "description",
                "videoTags",
            ]
        );
        assert_eq!(
            updates[6].1,
            FieldValue::scalar("line one line two line three")
        );
        assert_eq!(updates[7].1, FieldValue::list(["rick astley", "80s"]));
    }

    #[test]
    fn test_default_config() {
        let updates = map_fields(&sample(), &FieldConfig::default());
        assert_eq!(keys(&updates), vec!["channel", "title", "published at"]);
    }

    #[test]
    fn test_disabled_fields_are_omitted() {
        assert!(map_fields(&sample(), &FieldConfig::none()).is_empty());
    }

    #[test]
    fn test_description_kept_verbatim_without_one_line() {
        let config = FieldConfig {
            include_description: true,
            format_description_to_one_line: false,
            ..FieldConfig::none()
        };
        let updates = map_fields(&sample(), &config);
        assert_eq!(
            updates,
            vec![(
                "description".to_string(),
                FieldValue::scalar("line one\nline two\r\nline three")
            )]
        );
    }

    #[test]
    fn test_empty_tags_still_written() {
        let fields = FieldSet {
            tags: vec![],
            ..sample()
        };
        let config = FieldConfig {
            include_video_tags: true,
            ..FieldConfig::none()
        };
        assert_eq!(
            map_fields(&fields, &config),
            vec![("videoTags".to_string(), FieldValue::List(vec![]))]
        );
    }

    #[test]
    fn test_missing_optional_fields_are_skipped() {
        let fields = FieldSet {
            channel: "C".into(),
            title: "T".into(),
            ..FieldSet::default()
        };
        let updates = map_fields(&fields, &FieldConfig::all());
        assert_eq!(keys(&updates), vec!["channel", "title", "videoTags"]);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: FieldConfig =
            serde_yaml::from_str("include_description: true\ninclude_channel: false\n").unwrap();
        assert!(config.include_description);
        assert!(!config.include_channel);
        assert!(config.include_title);
        assert!(config.format_description_to_one_line);
    }
}
