//! Naming of collected image payloads.

use crate::analysis::TaggingResult;
use crate::model::ImageAttachment;

const MAX_STEM_LEN: usize = 64;

/// File extension guessed from the payload's magic bytes.
pub fn image_extension(data: &[u8]) -> &'static str {
    match data {
        [0x89, b'P', b'N', b'G', ..] => "png",
        [0xFF, 0xD8, 0xFF, ..] => "jpg",
        [b'G', b'I', b'F', b'8', ..] => "gif",
        [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => "tiff",
        [b'B', b'M', ..] => "bmp",
        [0x00, 0x00, 0x00, 0x0C, b'j', b'P', ..] => "jp2",
        _ => "bin",
    }
}

/// Filesystem-safe stem built from heading text.
pub fn image_file_stem(text: &str) -> String {
    let mut stem = String::new();
    for word in text.split_whitespace() {
        let word: String = word
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if word.is_empty() {
            continue;
        }
        if !stem.is_empty() {
            stem.push('_');
        }
        stem.push_str(&word);
    }

    if stem.is_empty() {
        return "image".to_string();
    }
    stem.chars().take(MAX_STEM_LEN).collect()
}

/// File name for the `index`-th collected image, named after its anchor heading.
pub fn image_file_name(result: &TaggingResult, index: usize, marker: char) -> Option<String> {
    let image: &ImageAttachment = result.images.get(index)?;
    let stem = result
        .anchor_of(image)
        .map(|block| image_file_stem(&block.plain_text(marker)))
        .unwrap_or_else(|| "image".to_string());
    Some(format!(
        "{:03}-{}.{}",
        index + 1,
        stem,
        image_extension(&image.data)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StructuralTag, TaggedBlock};

    #[test]
    fn test_image_extension() {
        assert_eq!(image_extension(&[0x89, b'P', b'N', b'G', 0x0D]), "png");
        assert_eq!(image_extension(&[0xFF, 0xD8, 0xFF, 0xE0]), "jpg");
        assert_eq!(image_extension(b"GIF89a"), "gif");
        assert_eq!(image_extension(b"II*\0rest"), "tiff");
        assert_eq!(image_extension(&[1, 2, 3]), "bin");
        assert_eq!(image_extension(&[]), "bin");
    }

    #[test]
    fn test_image_file_stem() {
        assert_eq!(image_file_stem("Figure 3: Flow / overview"), "Figure_3_Flow_overview");
        assert_eq!(image_file_stem("  ***  "), "image");
        assert_eq!(image_file_stem(&"x".repeat(100)).len(), MAX_STEM_LEN);
    }

    #[test]
    fn test_image_file_name() {
        let result = TaggingResult {
            blocks: vec![TaggedBlock::new(StructuralTag::Heading(4), "Fig 1| Setup|")],
            images: vec![ImageAttachment {
                data: vec![0xFF, 0xD8, 0xFF],
                anchor: 0,
            }],
            anchors: vec![TaggedBlock::new(StructuralTag::Heading(4), "Fig 1| Setup|")],
        };
        assert_eq!(
            image_file_name(&result, 0, '|').as_deref(),
            Some("001-Fig_1_Setup.jpg")
        );
        assert_eq!(image_file_name(&result, 1, '|'), None);
    }
}
