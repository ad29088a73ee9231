use std::fs;
use std::path::Path;

use fantoccini::Locator;
use fantoccini::elements::Element;
use url::Url;

use crate::error::ScrapeError;
use crate::records::{ImageRef, ImageRole};

/// Extension used when the image src gives no usable hint
const DEFAULT_EXTENSION: &str = "png";

/// Derives the deterministic file name for one inline image
///
/// The name encodes the region, the global card index and the image's DOM
/// order, so re-runs over the same exam always produce the same names.
pub fn image_file_name(
    role: ImageRole,
    question_index: usize,
    image_index: usize,
    extension: &str,
) -> String {
    format!(
        "{}_{}_{}.{}",
        role.prefix(),
        question_index,
        image_index,
        extension
    )
}

/// Extracts a file extension from an image src URL
///
/// Query strings and fragments are ignored; anything that does not look like
/// a short alphanumeric extension falls back to [`DEFAULT_EXTENSION`].
pub fn extension_from_src(src: &str) -> String {
    let path = match Url::parse(src) {
        Ok(url) => url.path().to_string(),
        // Relative src, no base to resolve against
        Err(_) => src.split(['?', '#']).next().unwrap_or("").to_string(),
    };

    path.rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= 4 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// Whether a pixel capture is still needed for this file name
///
/// Existing files are never overwritten, so a rerun after a partial failure
/// only captures what is missing.
pub fn needs_capture(dir: &Path, file_name: &str) -> bool {
    !dir.join(file_name).exists()
}

/// Captures every inline image under `element` into the images directory
///
/// Returns the ordered list of derived file names for embedding into the
/// card fields. Images whose file already exists on disk are not captured
/// again.
pub async fn materialize(
    element: &Element,
    dir: &Path,
    question_index: usize,
    role: ImageRole,
) -> Result<Vec<ImageRef>, ScrapeError> {
    let images = element.find_all(Locator::Css("img")).await?;
    if images.is_empty() {
        return Ok(Vec::new());
    }

    fs::create_dir_all(dir)?;

    let mut refs = Vec::with_capacity(images.len());
    for (image_index, image) in images.iter().enumerate() {
        let extension = match image.attr("src").await? {
            Some(src) => extension_from_src(&src),
            None => DEFAULT_EXTENSION.to_string(),
        };
        let file_name = image_file_name(role, question_index, image_index, &extension);

        if needs_capture(dir, &file_name) {
            let pixels = image.screenshot().await?;
            fs::write(dir.join(&file_name), pixels)?;
            ::log::debug!("Captured {}", file_name);
        } else {
            ::log::debug!("Reusing existing {}", file_name);
        }

        refs.push(ImageRef {
            file_name,
            role,
            source_index: image_index,
        });
    }

    Ok(refs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_file_name_is_deterministic() {
        assert_eq!(
            image_file_name(ImageRole::Question, 0, 0, "png"),
            "question_0_0.png"
        );
        assert_eq!(
            image_file_name(ImageRole::Question, 0, 1, "png"),
            "question_0_1.png"
        );
        assert_eq!(
            image_file_name(ImageRole::Answer, 12, 3, "jpg"),
            "answer_12_3.jpg"
        );
    }

    #[test]
    fn test_extension_from_src() {
        assert_eq!(extension_from_src("https://cdn.example.com/a/b/c.PNG"), "png");
        assert_eq!(
            extension_from_src("https://cdn.example.com/img.jpeg?v=2#frag"),
            "jpeg"
        );
        assert_eq!(extension_from_src("/assets/diagram.gif"), "gif");

        // No usable extension
        assert_eq!(extension_from_src("https://cdn.example.com/render"), "png");
        assert_eq!(extension_from_src("data:image/png;base64,AAAA"), "png");
    }

    #[test]
    fn test_needs_capture_skips_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let name = image_file_name(ImageRole::Question, 0, 0, "png");

        assert!(needs_capture(dir.path(), &name));

        fs::write(dir.path().join(&name), b"pixels").unwrap();
        assert!(!needs_capture(dir.path(), &name));

        // A second run with identical inputs plans zero captures
        let names: Vec<String> = (0..2)
            .map(|i| image_file_name(ImageRole::Question, 0, i, "png"))
            .collect();
        fs::write(dir.path().join(&names[1]), b"pixels").unwrap();
        assert!(names.iter().all(|n| !needs_capture(dir.path(), n)));
    }
}
