//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::{Site, CONFIG_FILE};

/// Generate the static site
pub fn run(site: &Site) -> Result<()> {
    let start = Instant::now();

    let generator = Generator::new(site)?;
    let pages = generator.generate()?;

    tracing::info!(
        "Generated {} pages in {:.2}s",
        pages,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&site.content_dir, notify::RecursiveMode::Recursive)?;

    if site.static_dir.exists() {
        watcher.watch(&site.static_dir, notify::RecursiveMode::Recursive)?;
    }

    let about_path = site.base_dir.join(&site.config.about_file);
    if about_path.exists() {
        watcher.watch(&about_path, notify::RecursiveMode::NonRecursive)?;
    }

    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    // Editors emit bursts of events per save
    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = reload(site).and_then(|site| run(&site)) {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Re-read `_config.yml` so config edits apply without a restart
pub fn reload(site: &Site) -> Result<Site> {
    Site::new(&site.base_dir)
}
