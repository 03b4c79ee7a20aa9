// Entrypoint for the CLI application.
// - Keeps `main` small: load configuration, build the two API clients
//   and hand them to the interactive flow.
// - Returns `anyhow::Result` so a missing token or client build error
//   prints with its context and a non-zero exit.

use vk2disk::{config::Config, disk::DiskClient, ui, vk::VkClient};

fn main() -> anyhow::Result<()> {
    // All tokens and album coordinates come from the environment; see
    // `config::Config::from_env` for the variable names.
    let config = Config::from_env()?;

    let vk = VkClient::new(&config)?;
    let disk = DiskClient::new(&config)?;

    // Runs the whole one-shot job and blocks until it finishes.
    let cancel = ui::CancelToken::new();
    ui::run(&config, &vk, &disk, &cancel)?;
    Ok(())
}
