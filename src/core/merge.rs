//! Merging field updates into a document's front matter

use crate::core::fields::FieldUpdates;
use crate::core::front_matter::{self, FrontMatterMap};
use log::debug;

/// Merge `updates` into `content`, whose parsed front matter is `map`
///
/// With an empty map a new block holding only the updates is prepended to
/// the untouched content (nothing happens when there are no updates).
/// Otherwise updates overwrite existing keys in place, new keys are appended,
/// and the first `---` block is replaced by the re-rendered map. Bytes outside
/// that block are never touched.
pub fn merge(content: &str, mut map: FrontMatterMap, updates: FieldUpdates) -> String {
    if map.is_empty() {
        if updates.is_empty() {
            return content.to_string();
        }
        let block: FrontMatterMap = updates.into_iter().collect();
        debug!("creating front matter block with {} keys", block.len());
        return format!("{}\n{content}", block.to_block());
    }

    for (key, value) in updates {
        map.insert(key, value);
    }

    match front_matter::locate_block(content) {
        Some(region) => {
            let mut merged = String::with_capacity(content.len() + 64);
            merged.push_str(&content[..region.span.start]);
            merged.push_str(&map.to_block());
            merged.push_str(&content[region.span.end..]);
            merged
        }
        // the map did not come from this content
        None => format!("{}\n{content}", map.to_block()),
    }
}

/// Parse the front matter of `content` and merge `updates` into it
pub fn apply(content: &str, updates: FieldUpdates) -> String {
    merge(content, front_matter::parse(content), updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fields::{map_fields, FieldConfig, FieldSet};
    use crate::core::front_matter::FieldValue;
    use pretty_assertions::assert_eq;

    fn rick() -> FieldSet {
        FieldSet {
            channel: "Rick Astley".into(),
            title: "Never Gonna Give You Up".into(),
            thumbnail_url: Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg".into()),
            published_at: Some("2009-10-25T06:57:33Z".into()),
            channel_id: Some("UCuAXFkgsw1L7xaCfnd5JJOw".into()),
            default_audio_language: Some("en".into()),
            description: Some("The official video\nfor the song".into()),
            tags: vec!["rick astley".into(), "never gonna give you up".into()],
        }
    }

    fn channel_and_title() -> FieldConfig {
        FieldConfig {
            include_channel: true,
            include_title: true,
            ..FieldConfig::none()
        }
    }

    #[test]
    fn test_overwrite_in_place_and_append() {
        let content = "---\ntitle: old\n---\nhttps://youtu.be/dQw4w9WgXcQ\n";
        let updates = map_fields(&rick(), &channel_and_title());
        assert_eq!(
            apply(content, updates),
            "---\ntitle: Never Gonna Give You Up\nchannel: Rick Astley\n---\nhttps://youtu.be/dQw4w9WgXcQ\n"
        );
    }

    #[test]
    fn test_new_block_with_all_fields() {
        let content = "https://youtu.be/dQw4w9WgXcQ\n";
        let updates = map_fields(&rick(), &FieldConfig::all());
        assert_eq!(
            apply(content, updates),
            "---\n\
             channel: Rick Astley\n\
             title: Never Gonna Give You Up\n\
             thumbnail url: https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg\n\
             published at: 2009-10-25T06:57:33Z\n\
             channelId: UCuAXFkgsw1L7xaCfnd5JJOw\n\
             defaultAudioLanguage: en\n\
             description: The official video for the song\n\
             videoTags:\n  - rick astley\n  - never gonna give you up\n\
             ---\n\
             https://youtu.be/dQw4w9WgXcQ\n"
        );
    }

    #[test]
    fn test_new_block_with_empty_tag_list() {
        let fields = FieldSet {
            tags: vec![],
            ..rick()
        };
        let config = FieldConfig {
            include_video_tags: true,
            ..channel_and_title()
        };
        let out = apply("body", map_fields(&fields, &config));
        assert_eq!(
            out,
            "---\nchannel: Rick Astley\ntitle: Never Gonna Give You Up\nvideoTags:\n---\nbody"
        );
    }

    #[test]
    fn test_nothing_enabled_leaves_plain_text_alone() {
        assert_eq!(apply("plain text\n", FieldUpdates::new()), "plain text\n");
    }

    #[test]
    fn test_unrelated_keys_keep_position_and_value() {
        let content = "---\nfoo: bar\ntitle: old\naliases:\n  - a\n---\nbody\n";
        let out = apply(content, map_fields(&rick(), &channel_and_title()));
        assert_eq!(
            out,
            "---\nfoo: bar\ntitle: Never Gonna Give You Up\naliases:\n  - a\nchannel: Rick Astley\n---\nbody\n"
        );
    }

    #[test]
    fn test_content_outside_block_is_untouched() {
        let content = "preamble\n---\nfoo: bar\n---\r\n\n---\nnot: front matter\n---\n";
        let out = apply(
            content,
            vec![("title".to_string(), FieldValue::scalar("T"))],
        );
        assert_eq!(
            out,
            "preamble\n---\nfoo: bar\ntitle: T\n---\r\n\n---\nnot: front matter\n---\n"
        );
    }

    #[test]
    fn test_tags_replace_existing_list() {
        let content = "---\nvideoTags:\n  - stale\n  - tags\n---\n";
        let config = FieldConfig {
            include_video_tags: true,
            ..FieldConfig::none()
        };
        let out = apply(content, map_fields(&rick(), &config));
        assert_eq!(
            out,
            "---\nvideoTags:\n  - rick astley\n  - never gonna give you up\n---\n"
        );
    }

    #[test]
    fn test_repeated_merge_is_idempotent() {
        let config = FieldConfig::all();
        for content in [
            "https://youtu.be/dQw4w9WgXcQ\n",
            "---\nfoo: bar\ntitle: old\n---\nhttps://youtu.be/dQw4w9WgXcQ\n",
            "---\nvideoTags:\n---\nnotes",
        ] {
            let once = apply(content, map_fields(&rick(), &config));
            let twice = apply(&once, map_fields(&rick(), &config));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_dash_description_after_list_is_stable() {
        let fields = FieldSet {
            description: Some("- 00:00 intro\n- 01:00 song".into()),
            ..rick()
        };
        let config = FieldConfig {
            include_description: true,
            ..FieldConfig::none()
        };
        let note = "---\ntags:\n  - video\n---\nhttps://youtu.be/dQw4w9WgXcQ\n";

        let first = apply(note, map_fields(&fields, &config));
        assert_eq!(
            first,
            "---\ntags:\n  - video\ndescription: \"- 00:00 intro - 01:00 song\"\n---\nhttps://youtu.be/dQw4w9WgXcQ\n"
        );
        let second = apply(&first, map_fields(&fields, &config));
        let third = apply(&second, map_fields(&fields, &config));
        assert_eq!(second, first);
        assert_eq!(third, first);
        assert_eq!(
            front_matter::parse(&third).get("tags"),
            Some(&FieldValue::list(["video"]))
        );
    }

    #[test]
    fn test_map_not_from_content_is_prepended() {
        let map: FrontMatterMap = [("a", FieldValue::scalar("1"))].into_iter().collect();
        assert_eq!(merge("body", map, vec![]), "---\na: 1\n---\nbody");
    }
}
