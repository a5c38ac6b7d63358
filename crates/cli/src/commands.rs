use crate::di::{Repositories, Services, UseCases};
use crate::surface::HeadlessSurface;
use anyhow::Context;
use ferrous_shield_application::ports::{ContentBlockingPort, EntitlementProvider};
use ferrous_shield_domain::{
    Config, HostResourceType, NavigationRequest, SubscriptionTier, WhitelistInsert,
};
use ferrous_shield_infrastructure::content_blocking::{
    BlockRequest, MatchOutcome, RuleListMatcher,
};
use ferrous_shield_jobs::{FilterListRefreshJob, JobRunner};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use url::Url;

pub struct App<'a> {
    pub config: &'a Config,
    pub repos: &'a Repositories,
    pub services: &'a Services,
    pub use_cases: &'a UseCases,
}

impl App<'_> {
    pub async fn compile(&self, force: bool) -> anyhow::Result<()> {
        if force {
            self.services.coordinator.invalidate().await?;
        }

        let surface = HeadlessSurface::new();
        let report = self
            .services
            .coordinator
            .setup_internal_rule_lists(&surface)
            .await;

        for handle in surface.attached() {
            println!("{:<32} {} rules", handle.identifier(), handle.rule_count());
        }
        for name in &report.failed {
            println!("{:<32} failed", name);
        }

        if report.attached.is_empty() && !report.failed.is_empty() {
            anyhow::bail!("no rule list could be compiled");
        }
        Ok(())
    }

    pub async fn update(&self, force: bool) -> anyhow::Result<()> {
        let update = &self.use_cases.update_filter_lists;
        let report = if force {
            update.force_refresh().await
        } else {
            update.execute().await
        };

        if report.skipped {
            println!("Filter lists are up to date");
            return Ok(());
        }

        for name in &report.refreshed {
            println!("{:<32} refreshed", name);
        }
        for name in &report.failed {
            println!("{:<32} failed", name);
        }
        Ok(())
    }

    pub async fn whitelist_add(&self, domain: &str) -> anyhow::Result<()> {
        match self.use_cases.add_whitelist.execute(domain).await? {
            WhitelistInsert::Added => println!("Whitelisted {}", domain),
            WhitelistInsert::AlreadyPresent => println!("{} is already whitelisted", domain),
        }
        Ok(())
    }

    pub async fn whitelist_remove(&self, domain: &str) -> anyhow::Result<()> {
        if self.use_cases.remove_whitelist.execute(domain).await? {
            println!("Removed {}", domain);
        } else {
            println!("{} is not whitelisted", domain);
        }
        Ok(())
    }

    pub async fn whitelist_list(&self) -> anyhow::Result<()> {
        for (idx, domain) in self.use_cases.get_whitelist.domains().await?.iter().enumerate() {
            println!("{:>3}  {}", idx, domain);
        }
        Ok(())
    }

    pub async fn set_blocking(&self, enabled: bool) -> anyhow::Result<()> {
        self.use_cases.set_blocking_enabled.execute(enabled).await?;
        self.blocking_status().await
    }

    pub async fn blocking_status(&self) -> anyhow::Result<()> {
        let tier = self.repos.entitlements.current_tier().await?;
        let active = self.use_cases.should_block_ads.execute().await;
        println!(
            "Ad blocking {} (tier: {})",
            if active { "active" } else { "inactive" },
            tier.as_str()
        );
        Ok(())
    }

    pub async fn tier(&self, tier: Option<SubscriptionTier>) -> anyhow::Result<()> {
        if let Some(tier) = tier {
            self.repos.entitlements.set_tier(tier).await?;
        }
        let tier = self.repos.entitlements.current_tier().await?;
        println!("{}", tier.as_str());
        Ok(())
    }

    pub async fn check(
        &self,
        url: &str,
        page: Option<&str>,
        resource_type: HostResourceType,
    ) -> anyhow::Result<()> {
        let target = Url::parse(url).with_context(|| format!("invalid url: {}", url))?;
        let navigation = NavigationRequest::parse(page.unwrap_or(url))?;
        let page_url = navigation.url.clone();

        let surface = HeadlessSurface::new();
        self.services
            .coordinator
            .setup_internal_rule_lists(&surface)
            .await;

        let enabled = self
            .use_cases
            .prepare_navigation
            .execute(&surface, navigation)
            .await?;

        if !enabled {
            println!("allowed (ad blocking inactive on {})", page_url);
            return Ok(());
        }

        let request = BlockRequest::new(target, Some(&page_url), resource_type);

        for handle in surface.attached() {
            let matcher = RuleListMatcher::new(handle.rules())?;
            if matcher.evaluate(&request) == MatchOutcome::Blocked {
                println!("blocked by {}", handle.identifier());
                return Ok(());
            }
        }

        println!("allowed");
        Ok(())
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let surface = HeadlessSurface::new();
        let report = self
            .services
            .coordinator
            .setup_internal_rule_lists(&surface)
            .await;

        if !report.failed.is_empty() {
            warn!(failed = ?report.failed, "Some rule lists are unavailable");
        }

        let shutdown = CancellationToken::new();

        let refresh_job = FilterListRefreshJob::new(Arc::clone(
            &self.use_cases.update_filter_lists,
        ))
        .with_interval(self.config.refresh.check_interval_secs);

        let handles = JobRunner::new()
            .with_filter_list_refresh(refresh_job)
            .with_shutdown_token(shutdown.clone())
            .start()
            .await;

        info!(
            lists = report.attached.len(),
            "Rule lists ready, waiting for shutdown signal"
        );

        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for shutdown signal")?;

        info!("Shutdown signal received");
        shutdown.cancel();

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Background job ended abnormally");
            }
        }

        info!("Shutdown complete");
        Ok(())
    }
}
