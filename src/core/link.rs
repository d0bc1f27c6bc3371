//! Locating YouTube links in free-form text
//!
//! Only the first link in a document is considered. A link is recognized in
//! any of these shapes, with optional `http(s)://` and `www.` prefixes:
//!
//! - `youtu.be/<id>`
//! - `youtube.com/embed/<id>` and `youtube.com/v/<id>`
//! - `youtube.com/watch?v=<id>` and `youtube.com/watch?...&v=<id>`
//! - `youtube.com/playlist?list=<playlist>`
//!
//! followed by optional `list=` and `index=` fragments in either order.

use crate::error::{Result, TubeMatterError};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

const VIDEO_ID_LEN: usize = 11;

static LINK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        (?:https?://)?(?:www\.)?
        (?:youtu\.be/|youtube\.com/(?:embed/|v/|playlist\?|watch\?v=|watch\?\S*?(?:&amp;|&)v=))
        (?P<id>[A-Za-z0-9_-]{11})?
        (?:
            (?:\?|&amp;|&)?list=(?P<list>[A-Za-z0-9_-]{34})
                (?:(?:&amp;|&)index=(?P<index>\d{1,3}))?
          | (?:\?|&amp;|&)index=(?P<index_first>\d{1,3})
                (?:(?:&amp;|&)list=(?P<list_last>[A-Za-z0-9_-]{34}))?
        )?
        \S*",
    )
    .expect("link pattern is valid")
});

/// An 11-character YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Validate and wrap an identifier
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        let valid = id.len() == VIDEO_ID_LEN
            && id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        valid.then_some(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The pieces of the first link found in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoLink {
    /// The full matched link text
    pub url: String,
    pub video_id: Option<VideoId>,
    pub playlist_id: Option<String>,
    pub index: Option<u16>,
}

/// Find the first YouTube link in `text`
pub fn find_link(text: &str) -> Option<VideoLink> {
    let caps = LINK_REGEX.captures(text)?;
    let group = |name: &str| caps.name(name).map(|m| m.as_str());

    let link = VideoLink {
        url: caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default(),
        video_id: group("id").and_then(VideoId::new),
        playlist_id: group("list").or(group("list_last")).map(str::to_string),
        index: group("index")
            .or(group("index_first"))
            .and_then(|s| s.parse().ok()),
    };
    debug!("found link {:?}", link);
    Some(link)
}

/// Extract the video identifier of the first link in `text`
///
/// Returns [`TubeMatterError::NoLinkFound`] when there is no link at all and
/// [`TubeMatterError::IdentifierMissing`] when the first link does not name a
/// single video.
pub fn extract_video_id(text: &str) -> Result<VideoId> {
    find_link(text)
        .ok_or(TubeMatterError::NoLinkFound)?
        .video_id
        .ok_or(TubeMatterError::IdentifierMissing)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";
    const LIST: &str = "PLFgquLnL59alCl_2TQvOiD5Vgm1hCaGSI";

    fn id_of(text: &str) -> String {
        extract_video_id(text).unwrap().to_string()
    }

    #[test]
    fn test_supported_shapes() {
        let urls = [
            format!("https://youtu.be/{ID}"),
            format!("youtu.be/{ID}"),
            format!("https://www.youtube.com/embed/{ID}"),
            format!("http://youtube.com/v/{ID}"),
            format!("https://www.youtube.com/watch?v={ID}"),
            format!("www.youtube.com/watch?v={ID}"),
            format!("youtube.com/watch?v={ID}"),
            format!("https://www.youtube.com/watch?feature=share&v={ID}"),
        ];
        for url in &urls {
            assert_eq!(id_of(&format!("see {url} for details")), ID, "{url}");
        }
    }

    #[test]
    fn test_playlist_fragments_in_either_order() {
        let link = find_link(&format!(
            "https://www.youtube.com/watch?v={ID}&list={LIST}&index=12"
        ))
        .unwrap();
        assert_eq!(link.video_id.unwrap().as_str(), ID);
        assert_eq!(link.playlist_id.as_deref(), Some(LIST));
        assert_eq!(link.index, Some(12));

        let link = find_link(&format!(
            "https://www.youtube.com/watch?v={ID}&index=3&list={LIST}"
        ))
        .unwrap();
        assert_eq!(link.video_id.unwrap().as_str(), ID);
        assert_eq!(link.playlist_id.as_deref(), Some(LIST));
        assert_eq!(link.index, Some(3));

        let link = find_link(&format!("https://youtu.be/{ID}?list={LIST}")).unwrap();
        assert_eq!(link.playlist_id.as_deref(), Some(LIST));
        assert_eq!(link.index, None);
    }

    #[test]
    fn test_html_escaped_separator() {
        let link = find_link(&format!(
            "<a href=\"https://www.youtube.com/watch?v={ID}&amp;list={LIST}\">"
        ))
        .unwrap();
        assert_eq!(link.video_id.unwrap().as_str(), ID);
        assert_eq!(link.playlist_id.as_deref(), Some(LIST));
    }

    #[test]
    fn test_trailing_noise_is_ignored() {
        assert_eq!(id_of(&format!("https://youtu.be/{ID}?si=abcdef&t=42")), ID);
        assert_eq!(id_of(&format!("[video](https://youtu.be/{ID})")), ID);
    }

    #[test]
    fn test_no_link() {
        assert!(find_link("just some notes\nwith https://example.com/watch?v=x").is_none());
        assert!(matches!(
            extract_video_id("nothing here"),
            Err(TubeMatterError::NoLinkFound)
        ));
    }

    #[test]
    fn test_playlist_only_link_has_no_identifier() {
        let text = format!("https://www.youtube.com/playlist?list={LIST}");
        let link = find_link(&text).unwrap();
        assert_eq!(link.video_id, None);
        assert_eq!(link.playlist_id.as_deref(), Some(LIST));
        assert!(matches!(
            extract_video_id(&text),
            Err(TubeMatterError::IdentifierMissing)
        ));
    }

    #[test]
    fn test_only_first_link_counts() {
        let text = format!("first https://youtu.be/{ID} then https://youtu.be/aaaaaaaaaaa");
        assert_eq!(id_of(&text), ID);

        let text = format!("https://www.youtube.com/playlist?list={LIST} https://youtu.be/{ID}");
        assert!(matches!(
            extract_video_id(&text),
            Err(TubeMatterError::IdentifierMissing)
        ));
    }

    #[test]
    fn test_video_id_validation() {
        assert!(VideoId::new(ID).is_some());
        assert!(VideoId::new("short").is_none());
        assert!(VideoId::new("has space!!").is_none());
    }
}
