// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the one-shot upload job.
//
// Module responsibilities:
// - `config`: Reads tokens and album identifiers from the environment
//   into a single immutable struct shared by both clients.
// - `vk`: Encapsulates the VK `photos.get` call and the shape of its
//   JSON response.
// - `select`: Ranks album photos by maximum available resolution and
//   picks the top N.
// - `disk`: Encapsulates the Yandex.Disk REST calls (folder lookup,
//   folder creation, upload of a file fetched from a remote URL).
// - `ui`: Implements the interactive prompts, the sequential upload
//   loop with a progress bar, and the JSON summary artifact.
//
// Keeping this separation makes it easier to test the selection and
// status-mapping logic without touching the network.
pub mod config;
pub mod disk;
pub mod select;
pub mod ui;
pub mod vk;
