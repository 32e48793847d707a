use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use vdb_site_generator::{GeneratedSite, generate_site};

use super::load_config;

/// Build static site for deployment
pub async fn run(config: Option<PathBuf>, output: PathBuf) -> Result<()> {
    println!("🔨 Building static site...");
    println!("   Output: {}", output.display());
    println!();

    let theme = load_config(config.as_deref())?;
    println!("✓ Theme loaded ({} content paths)", theme.content.len());

    println!("📄 Generating pages...");
    let site = generate_site(&theme);
    for class in &site.unstyled_classes {
        eprintln!("   ⚠ Warning: no style rule for class '{}'", class);
    }

    let written = write_site(&site, &output)?;
    println!(
        "   ✓ Wrote {} pages and {} assets",
        site.pages.len(),
        site.assets.len()
    );

    println!();
    println!("✅ Build complete! ({} files)", written);
    println!("   Output: {}", output.display());
    println!();
    println!("To test locally:");
    println!("   cd {} && python3 -m http.server 8000", output.display());
    println!();

    Ok(())
}

/// Write every page and asset below `output`, returning the file count
fn write_site(site: &GeneratedSite, output: &Path) -> Result<usize> {
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let files = site
        .pages
        .iter()
        .map(|(path, html)| (path, html.as_bytes()))
        .chain(site.assets.iter().map(|(path, data)| (path, data.as_slice())));

    let mut written = 0;
    for (relative, data) in files {
        let dst = output.join(relative);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&dst, data).with_context(|| format!("Failed to write {}", dst.display()))?;
        tracing::debug!(path = %dst.display(), bytes = data.len(), "wrote file");
        written += 1;
    }

    Ok(written)
}
