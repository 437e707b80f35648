//! Atom activity-feed loading.
//!
//! Reads the feed exported by the issue tracker's activity stream and
//! converts every `<entry>` into a [`RawEntry`] for the normalizer.

use std::path::Path;

use hours_core::error::{HoursError, Result};
use hours_core::models::{ActivityObject, RawEntry};
use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;

/// Atom syndication namespace.
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Activity Streams extension namespace.
pub const ACTIVITY_NS: &str = "http://activitystrea.ms/spec/1.0/";

// ── Public API ────────────────────────────────────────────────────────────────

/// Read and parse the feed stored at `path`.
///
/// A missing file, malformed XML, or a document that is not an Atom feed is
/// fatal for the run.
pub fn read_feed(path: &Path) -> Result<Vec<RawEntry>> {
    let content = std::fs::read_to_string(path).map_err(|source| HoursError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = parse_feed(&content)?;
    debug!("Read {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Parse feed XML held in memory.
///
/// A `<!DOCTYPE>` declaration is accepted.
pub fn parse_feed(xml: &str) -> Result<Vec<RawEntry>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;
    let root = doc.root_element();

    if !is_element(root, ATOM_NS, "feed") {
        return Err(HoursError::NotAFeed(root.tag_name().name().to_string()));
    }

    Ok(root
        .children()
        .filter(|n| is_element(*n, ATOM_NS, "entry"))
        .map(read_entry)
        .collect())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn read_entry(entry: Node<'_, '_>) -> RawEntry {
    RawEntry {
        published: child_text(entry, ATOM_NS, "published"),
        verbs: children(entry, ACTIVITY_NS, "verb")
            .map(|v| v.text().unwrap_or_default().to_string())
            .collect(),
        categories: children(entry, ATOM_NS, "category")
            .map(|c| c.attribute("term").unwrap_or_default().to_string())
            .collect(),
        targets: children(entry, ACTIVITY_NS, "target")
            .map(read_object)
            .collect(),
        objects: children(entry, ACTIVITY_NS, "object")
            .map(read_object)
            .collect(),
        title_html: child_text(entry, ATOM_NS, "title"),
    }
}

fn read_object(node: Node<'_, '_>) -> ActivityObject {
    ActivityObject {
        object_type: child_text(node, ACTIVITY_NS, "object-type"),
        title: child_text(node, ATOM_NS, "title"),
        summary: child_text(node, ATOM_NS, "summary"),
    }
}

fn is_element(node: Node<'_, '_>, ns: &str, name: &str) -> bool {
    node.is_element() && node.tag_name().namespace() == Some(ns) && node.tag_name().name() == name
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    ns: &'a str,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| is_element(*n, ns, name))
}

/// Text of the first matching child element.
///
/// `None` when the child is absent; an element with no text yields `""`.
fn child_text(node: Node<'_, '_>, ns: &str, name: &str) -> Option<String> {
    children(node, ns, name).next().map(element_text)
}

/// Concatenated text of an element and its descendants, so markup embedded
/// as real child elements still contributes its text.
fn element_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:activity="http://activitystrea.ms/spec/1.0/">
  <title>Activity Stream</title>
  <entry>
    <title type="html">&lt;a href="https://jira.example.com/browse/ABC-7"&gt;ABC-7&lt;/a&gt; commented</title>
    <published>2024-03-05T14:07:33.120Z</published>
    <category term="comment"/>
    <activity:verb>http://activitystrea.ms/schema/1.0/post</activity:verb>
    <activity:object>
      <activity:object-type>http://activitystrea.ms/schema/1.0/comment</activity:object-type>
      <title>ignored</title>
    </activity:object>
    <activity:target>
      <activity:object-type>http://streams.atlassian.com/syndication/types/issue</activity:object-type>
      <title type="text">ABC-7</title>
      <summary type="text">Fix login</summary>
    </activity:target>
  </entry>
  <entry>
    <title type="html">bare entry</title>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_feed_reads_all_entries() {
        let entries = parse_feed(FEED).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_parse_feed_reads_entry_fields() {
        let entries = parse_feed(FEED).unwrap();
        let first = &entries[0];

        assert_eq!(first.published.as_deref(), Some("2024-03-05T14:07:33.120Z"));
        assert_eq!(first.categories, vec!["comment"]);
        assert_eq!(first.verbs, vec!["http://activitystrea.ms/schema/1.0/post"]);
        assert_eq!(
            first.title_html.as_deref(),
            Some(r#"<a href="https://jira.example.com/browse/ABC-7">ABC-7</a> commented"#)
        );

        assert_eq!(first.targets.len(), 1);
        assert_eq!(first.targets[0].title.as_deref(), Some("ABC-7"));
        assert_eq!(first.targets[0].summary.as_deref(), Some("Fix login"));
        assert_eq!(first.objects.len(), 1);
        assert!(first.objects[0].summary.is_none());
    }

    #[test]
    fn test_parse_feed_tolerates_sparse_entry() {
        let entries = parse_feed(FEED).unwrap();
        let bare = &entries[1];

        assert!(bare.published.is_none());
        assert!(bare.verbs.is_empty());
        assert!(bare.categories.is_empty());
        assert!(bare.targets.is_empty());
        assert!(bare.objects.is_empty());
        assert_eq!(bare.title_html.as_deref(), Some("bare entry"));
    }

    #[test]
    fn test_category_without_term_is_empty_string() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry><category/></entry></feed>"#;
        let entries = parse_feed(xml).unwrap();
        assert_eq!(entries[0].categories, vec![String::new()]);
    }

    #[test]
    fn test_empty_element_text_is_empty_string() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry><title/></entry></feed>"#;
        let entries = parse_feed(xml).unwrap();
        assert_eq!(entries[0].title_html.as_deref(), Some(""));
    }

    #[test]
    fn test_foreign_namespace_elements_are_ignored() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:x="urn:other">
            <entry><x:title>nope</x:title></entry>
            <x:entry><title>nope</title></x:entry>
        </feed>"#;
        let entries = parse_feed(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].title_html.is_none());
    }

    #[test]
    fn test_empty_feed_has_no_entries() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"></feed>"#;
        assert!(parse_feed(xml).unwrap().is_empty());
    }

    #[test]
    fn test_doctype_declaration_is_accepted() {
        let xml = r#"<?xml version="1.0"?>
<!DOCTYPE feed>
<feed xmlns="http://www.w3.org/2005/Atom"><entry><title>ok</title></entry></feed>"#;
        let entries = parse_feed(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title_html.as_deref(), Some("ok"));
    }

    #[test]
    fn test_malformed_xml_is_fatal() {
        let err = parse_feed("<feed><entry></feed>").unwrap_err();
        assert!(matches!(err, HoursError::XmlParse(_)));
    }

    #[test]
    fn test_non_atom_root_is_fatal() {
        let err = parse_feed("<rss><channel/></rss>").unwrap_err();
        assert!(matches!(err, HoursError::NotAFeed(ref name) if name == "rss"));
    }

    #[test]
    fn test_read_feed_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("activity.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(FEED.as_bytes()).unwrap();

        let entries = read_feed(&path).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_read_feed_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = read_feed(&tmp.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, HoursError::FileRead { .. }));
    }
}
