// UI layer: the two interactive prompts, the sequential upload loop
// with its progress bar, and the JSON summary written at the end of a
// run. The flow is linear and never loops back: prompt, ensure folder,
// fetch, select, upload each photo once, write the summary.

use anyhow::{Context, Result};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::disk::DiskClient;
use crate::select::select_top;
use crate::vk::VkClient;

/// Summary artifact, overwritten on every run.
const SUMMARY_FILE: &str = "photo_info.json";

const DEFAULT_TOP_N: usize = 5;

/// One line of the run summary: the display name a photo was uploaded
/// under and its pixel count. A record is appended for every attempted
/// upload, whether or not the upload itself succeeded.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadRecord {
    pub file_name: String,
    pub size: u64,
}

/// Cooperative cancellation flag checked between uploads. Cloning
/// shares the flag, so the holder of one clone can stop a loop driven
/// by another.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Run the whole job: prompt, ensure the destination folder, fetch and
/// select photos, upload them in rank order, write the summary. Blocks
/// until the batch is done or `cancel` is raised.
pub fn run(
    config: &Config,
    vk: &VkClient,
    disk: &DiskClient,
    cancel: &CancelToken,
) -> Result<()> {
    let folder_name: String = Input::new()
        .with_prompt("Disk folder to upload the photos into")
        .interact_text()?;
    let raw_count: String = Input::new()
        .with_prompt("Number of best-resolution photos (default 5)")
        .allow_empty(true)
        .interact_text()?;

    // Bad input aborts before any network call is made.
    let top_n = match parse_top_count(&raw_count) {
        Some(n) => n,
        None => {
            println!("Please enter a valid number.");
            return Ok(());
        }
    };

    // Print the folder outcome either way and keep going: a failed
    // creation shows up again as failed uploads, same as the lone
    // upload errors below.
    match disk.create_folder(&folder_name) {
        Ok(status) => println!("{}", status),
        Err(e) => println!("{}", e),
    }

    let album = vk
        .get_photos(config.album_id.as_deref())
        .context("Failed to fetch album photos from VK")?;
    let selected = match select_top(&album, top_n) {
        Ok(photos) => photos,
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };

    println!("Uploading photos to Yandex.Disk...");
    let bar = ProgressBar::new(selected.len() as u64);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}").unwrap());

    let mut records: Vec<UploadRecord> = Vec::new();
    for photo in &selected {
        if cancel.is_cancelled() {
            bar.abandon_with_message("cancelled");
            break;
        }
        match disk.upload_file(&photo.file_name, &photo.url, Some(&folder_name)) {
            Ok(()) => bar.println(format!("File '{}' uploaded successfully.", photo.file_name)),
            Err(e) => bar.println(format!("File '{}': {}", photo.file_name, e)),
        }
        records.push(UploadRecord {
            file_name: photo.file_name.clone(),
            size: photo.resolution,
        });
        bar.inc(1);
    }
    bar.finish();

    write_summary(Path::new(SUMMARY_FILE), &records)?;
    println!("Upload complete!");
    Ok(())
}

/// Parse the photo-count prompt: blank means the default, anything
/// non-numeric means `None` and the run aborts.
fn parse_top_count(raw: &str) -> Option<usize> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(DEFAULT_TOP_N);
    }
    trimmed.parse::<usize>().ok()
}

/// Overwrite `path` with the records as a JSON array. serde_json keeps
/// non-ASCII characters (the `№` in file names) as UTF-8 rather than
/// escaping them.
fn write_summary(path: &Path, records: &[UploadRecord]) -> Result<()> {
    let json = serde_json::to_string(records).context("Failed to serialize upload summary")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
