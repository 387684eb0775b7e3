//! Catalog checks.
//!
//! Each check takes the loaded data and returns a `ValidationResult`.

use std::collections::{BTreeMap, BTreeSet};

use crate::mosaic::DirectoryImages;
use crate::types::{Catalog, EmojiRecord};

use super::diagnostic::{Diagnostic, ValidationResult};

pub fn check_empty_catalog(catalog: &Catalog) -> ValidationResult {
    let mut result = ValidationResult::new();

    if catalog.is_empty() {
        result.push(
            Diagnostic::warning("discmos::validate::empty-catalog", "The catalog has no emojis")
                .with_help("Run the scraper in Discord and save its output as emoji-data.json"),
        );
    }

    result
}

/// Emojis whose server is missing from the server list.
pub fn check_orphaned_emojis(catalog: &Catalog) -> ValidationResult {
    catalog
        .orphaned_emojis()
        .map(|emoji| {
            Diagnostic::warning(
                "discmos::validate::orphaned-emoji",
                format!("{} belongs to an unlisted server", emoji),
            )
            .with_help("Server directives cannot select it; re-run the scraper")
        })
        .collect()
}

/// Listed servers that contribute no emojis.
pub fn check_empty_servers(catalog: &Catalog) -> ValidationResult {
    let populated: BTreeSet<&str> = catalog.emojis.iter().map(|e| e.server.as_str()).collect();

    catalog
        .servers
        .iter()
        .filter(|server| !populated.contains(server.as_str()))
        .map(|server| {
            Diagnostic::warning(
                "discmos::validate::empty-server",
                format!("Server \"{}\" has no emojis", server),
            )
        })
        .collect()
}

/// Ids shared by more than one record. Images are stored by id, so the
/// records would share one image.
pub fn check_duplicate_ids(catalog: &Catalog) -> ValidationResult {
    let mut by_id: BTreeMap<u64, Vec<&EmojiRecord>> = BTreeMap::new();
    for emoji in &catalog.emojis {
        by_id.entry(emoji.id).or_default().push(emoji);
    }

    by_id
        .into_iter()
        .filter(|(_, records)| records.len() > 1)
        .map(|(id, records)| {
            let names: Vec<String> = records.iter().map(|e| e.to_string()).collect();
            Diagnostic::error(
                "discmos::validate::duplicate-id",
                format!("Emoji id {} is used by {}", id, names.join(", ")),
            )
        })
        .collect()
}

/// Names that appear more than once in the same server.
pub fn check_duplicate_names(catalog: &Catalog) -> ValidationResult {
    let mut seen: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for emoji in &catalog.emojis {
        *seen.entry((emoji.server.as_str(), emoji.name.as_str())).or_default() += 1;
    }

    seen.into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|((server, name), count)| {
            Diagnostic::warning(
                "discmos::validate::duplicate-name",
                format!("Server \"{}\" has {} emojis named :{}:", server, count, name),
            )
            .with_help("Mosaic text will show the same shortcode for each of them")
        })
        .collect()
}

/// Selected emojis without an image on disk.
pub fn check_images<'a>(
    emojis: impl IntoIterator<Item = &'a EmojiRecord>,
    images: &DirectoryImages,
) -> ValidationResult {
    emojis
        .into_iter()
        .filter(|emoji| !images.path_for(emoji).is_file())
        .map(|emoji| {
            Diagnostic::warning(
                "discmos::validate::missing-image",
                format!("{} has no image at {}", emoji, images.path_for(emoji).display()),
            )
            .with_help("Download the emoji images into the emojis directory")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn catalog(servers: &[&str], emojis: &[(u64, &str, &str)]) -> Catalog {
        Catalog::new(
            servers.iter().map(|s| s.to_string()),
            emojis
                .iter()
                .map(|&(id, name, server)| EmojiRecord::new(id, name, server)),
        )
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(check_empty_catalog(&Catalog::default()).warning_count(), 1);
        assert!(check_empty_catalog(&catalog(&["A"], &[(1, "a", "A")])).is_ok());
    }

    #[test]
    fn test_orphaned_emojis() {
        let result = check_orphaned_emojis(&catalog(&["A"], &[(1, "a", "A"), (2, "b", "B")]));

        assert_eq!(result.warning_count(), 1);
        assert!(result.iter().all(|d| d.message.contains(":b:")));
    }

    #[test]
    fn test_empty_servers() {
        let result = check_empty_servers(&catalog(&["A", "B"], &[(1, "a", "A")]));

        assert_eq!(result.warning_count(), 1);
        assert!(result.iter().all(|d| d.message.contains("\"B\"")));
    }

    #[test]
    fn test_duplicate_ids() {
        let result = check_duplicate_ids(&catalog(&["A", "B"], &[(1, "a", "A"), (1, "a", "B"), (2, "c", "A")]));

        assert_eq!(result.error_count(), 1);
        assert!(result.iter().all(|d| d.message.starts_with("Emoji id 1 ")));
    }

    #[test]
    fn test_duplicate_names() {
        let result = check_duplicate_names(&catalog(&["A", "B"], &[(1, "a", "A"), (2, "a", "A"), (3, "a", "B")]));

        assert_eq!(result.warning_count(), 1);
        assert!(result.iter().all(|d| d.message.contains("2 emojis named :a:")));
    }

    #[test]
    fn test_missing_images() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("1.png"), b"").unwrap();
        let images = DirectoryImages::new(dir.path());
        let emojis = [EmojiRecord::new(1, "a", "A"), EmojiRecord::new(2, "b", "A")];

        let result = check_images(&emojis, &images);

        assert_eq!(result.warning_count(), 1);
        assert!(result.iter().all(|d| d.message.contains("2.png")));
    }
}
