//! List command - print the pages that would be generated

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use progpages_core::{Config, SiteData};
use progpages_generator::{ProgramPageGenerator, SitePage, SitePages};
use serde_json::json;

use crate::site_root;

/// How to print the page plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable columns
    Table,
    /// One JSON array of page objects
    Json,
}

/// A page as it will be routed and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPage {
    /// Page URL.
    pub url: String,
    /// File the page is written to.
    pub output: PathBuf,
    /// Page title.
    pub title: String,
    /// Layout used to render it.
    pub layout: String,
}

/// Run the list command.
pub fn run(config_path: &Path, format: OutputFormat) -> Result<()> {
    tracing::info!(?config_path, ?format, "Listing program pages");

    let pages = plan(config_path)?;

    match format {
        OutputFormat::Table => print_table(&pages),
        OutputFormat::Json => {
            let value: Vec<_> = pages
                .iter()
                .map(|p| {
                    json!({
                        "url": p.url,
                        "output": p.output.display().to_string(),
                        "title": p.title,
                        "layout": p.layout,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}

/// Generate the pages for the site configured at `config_path`.
pub fn plan(config_path: &Path) -> Result<Vec<PlannedPage>> {
    let config = Config::load(config_path).wrap_err("Failed to load configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    let root = site_root(config_path);
    let data = SiteData::load(&config.data_dir(root)).wrap_err("Failed to load site data")?;

    let generator = ProgramPageGenerator::new(&config);
    let mut site = SitePages::new();
    generator
        .generate(&data, &mut site)
        .wrap_err("Failed to generate program pages")?;

    let output_dir = config.output_dir(root);
    Ok(site
        .iter()
        .map(|page| PlannedPage {
            url: page.url(generator.permalink()),
            output: generator.destination(page, &output_dir),
            title: page.title().to_string(),
            layout: page
                .context()
                .get("layout")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
        })
        .collect())
}

fn print_table(pages: &[PlannedPage]) {
    let url_width = pages.iter().map(|p| p.url.len()).max().unwrap_or(0).max(3);

    println!("{:<url_width$}  TITLE", "URL");
    for page in pages {
        println!("{:<url_width$}  {}", page.url, page.title);
    }
    println!();
    println!("{} page(s)", pages.len());
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_plan_site() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(
            dir.path().join("site.toml"),
            "[site]\ntitle = \"Test\"\n\n[programs]\nlayout = \"app\"\n",
        )
        .expect("write");
        fs::create_dir_all(dir.path().join("_data")).expect("mkdir");
        fs::write(
            dir.path().join("_data/library.json"),
            r#"[{"uid": "beta", "name": "Beta"}, {"uid": "alpha", "name": "Alpha Program"}]"#,
        )
        .expect("write");

        let pages = plan(&dir.path().join("site.toml")).expect("plan");

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].url, "/programs/beta/");
        assert_eq!(pages[1].url, "/programs/alpha/");
        assert_eq!(pages[1].title, "Alpha Program");
        assert_eq!(pages[1].layout, "app");
        assert_eq!(
            pages[1].output,
            dir.path().join("_site/programs/alpha/index.html")
        );
    }

    #[test]
    fn test_plan_without_library_fails() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("site.toml"), "[site]\ntitle = \"Test\"\n").expect("write");

        let err = plan(&dir.path().join("site.toml")).unwrap_err();
        assert!(format!("{err:?}").contains("data collection not found"));
    }
}
