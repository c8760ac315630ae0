//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, Target};
use crate::config::PaginationConfig;
use crate::error::Result;
use crate::pager::Pager;
use crate::types::{Cursor, Page, PageQuery};
use serde_json::json;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.build_config()?;

        match &self.cli.command {
            Commands::Fetch { target } => self.fetch(config, target).await,
            Commands::Paginate { target, max_pages } => {
                self.paginate(config, target, *max_pages).await
            }
            Commands::Config => self.show_config(&config),
        }
    }

    /// Config file (or defaults) with command-line overrides applied
    pub fn build_config(&self) -> Result<PaginationConfig> {
        let mut config = match &self.cli.config {
            Some(path) => PaginationConfig::load(path)?,
            None => PaginationConfig::default(),
        };

        if let Some(retries) = self.cli.max_retries {
            config.max_retries = retries;
        }
        if let Some(ms) = self.cli.retry_delay_ms {
            config.retry_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = self.cli.request_timeout_ms {
            config.request_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.cli.page_delay_ms {
            config.page_delay = Duration::from_millis(ms);
        }
        if let Some(param) = &self.cli.cursor_param {
            config.cursor_param.clone_from(param);
        }
        if let Some(field) = &self.cli.id_field {
            config.id_field.clone_from(field);
        }
        if let Some(enabled) = self.cli.zero_is_sentinel {
            config.zero_is_sentinel = enabled;
        }

        config.validate()?;
        Ok(config)
    }

    async fn fetch(&self, config: PaginationConfig, target: &Target) -> Result<()> {
        let pager = Pager::http(config)?;
        let page = pager.fetch_page(&query(target)).await?;

        let mut out = std::io::stdout().lock();
        self.write_page(&mut out, &page)?;
        Ok(())
    }

    async fn paginate(
        &self,
        config: PaginationConfig,
        target: &Target,
        max_pages: Option<u64>,
    ) -> Result<()> {
        let start = Instant::now();
        let pager = Pager::http(config)?;
        let mut stream = pager.paginate(query(target));

        while let Some(page) = stream.next().await {
            let page = page?;
            {
                let mut out = std::io::stdout().lock();
                self.write_page(&mut out, &page)?;
            }

            if max_pages.is_some_and(|max| stream.pages_yielded() >= max) {
                info!("Reached page limit of {}", stream.pages_yielded());
                break;
            }
        }

        eprintln!(
            "{}",
            json!({
                "pages": stream.pages_yielded(),
                "records": stream.records_yielded(),
                "next_cursor": stream.cursor().map(ToString::to_string),
                "elapsed_ms": start.elapsed().as_millis() as u64,
            })
        );
        Ok(())
    }

    fn show_config(&self, config: &PaginationConfig) -> Result<()> {
        let value = json!({
            "max_retries": config.max_retries,
            "retry_delay_ms": config.retry_delay.as_millis() as u64,
            "request_timeout_ms": config.request_timeout.as_millis() as u64,
            "page_delay_ms": config.page_delay.as_millis() as u64,
            "cursor_param": config.cursor_param,
            "id_field": config.id_field,
            "zero_is_sentinel": config.zero_is_sentinel,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        Ok(())
    }

    fn write_page(&self, out: &mut impl Write, page: &Page) -> Result<()> {
        for record in page.records() {
            match self.cli.format {
                OutputFormat::Json => writeln!(out, "{record}")?,
                OutputFormat::Pretty => {
                    writeln!(out, "{}", serde_json::to_string_pretty(record)?)?;
                }
            }
        }
        Ok(())
    }
}

fn query(target: &Target) -> PageQuery {
    let cursor = target
        .cursor
        .parse::<Cursor>()
        .unwrap_or_else(|never| match never {});
    PageQuery::new(target.url.clone(), cursor)
}
