// Photo selection: rank album photos by the pixel count of their best
// size variant and keep the top N. Pure data shuffling, no I/O, so the
// whole module is directly unit-testable.

use thiserror::Error;

use crate::vk::{AlbumResponse, PhotoSize};

/// A photo chosen for upload. `file_name` doubles as the display name
/// on Disk and encodes the photo's rank and like count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPhoto {
    pub file_name: String,
    /// Pixel count (width * height) of the chosen size variant.
    pub resolution: u64,
    /// Download URL of the chosen size variant.
    pub url: String,
}

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("VK API error: {message}")]
    Api { message: String },

    #[error("could not obtain any photos from the album")]
    NoPhotos,
}

/// Pick the `top_n` photos with the highest maximum resolution.
///
/// Photos whose best variant resolves to the same URL collapse to one
/// entry; the first occurrence keeps its place in the ordering and a
/// later duplicate overwrites the stored resolution and like count.
/// Sorting is stable, so photos with equal resolution stay in album
/// order. `top_n` of zero yields an empty list; a `top_n` larger than
/// the album yields every photo.
pub fn select_top(
    album: &AlbumResponse,
    top_n: usize,
) -> Result<Vec<SelectedPhoto>, SelectError> {
    if let Some(error) = &album.error {
        return Err(SelectError::Api {
            message: error.error_msg.clone(),
        });
    }
    let items = album
        .response
        .as_ref()
        .and_then(|r| r.items.as_ref())
        .ok_or(SelectError::NoPhotos)?;

    // (url, resolution, likes), deduplicated by url
    let mut ranked: Vec<(String, u64, u64)> = Vec::new();
    for photo in items {
        let best = match best_size(&photo.sizes) {
            Some(size) => size,
            None => continue,
        };
        let resolution = best.width * best.height;
        match ranked.iter_mut().find(|(url, _, _)| *url == best.url) {
            Some(entry) => {
                entry.1 = resolution;
                entry.2 = photo.likes.count;
            }
            None => ranked.push((best.url.clone(), resolution, photo.likes.count)),
        }
    }

    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);

    Ok(ranked
        .into_iter()
        .enumerate()
        .map(|(index, (url, resolution, likes))| SelectedPhoto {
            file_name: format!("Photo №{} Like({})", index + 1, likes),
            resolution,
            url,
        })
        .collect())
}

/// The variant with the largest pixel count; the first one wins on
/// ties.
fn best_size(sizes: &[PhotoSize]) -> Option<&PhotoSize> {
    let mut best: Option<&PhotoSize> = None;
    for size in sizes {
        if best.map_or(true, |b| size.width * size.height > b.width * b.height) {
            best = Some(size);
        }
    }
    best
}
