use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::sync::RwLock;

use super::types::{DashboardSnapshot, FilterState};
use crate::domains::dataset::DatasetRepository;
use crate::domains::donation::RawDonation;
use crate::domains::donor::{self, DonorProfile};
use crate::domains::metrics::{self, DashboardMetrics};
use crate::domains::window::{self, DateRangeInput, DateWindow};
use crate::errors::{ServiceError, ServiceResult};

/// Trait defining dashboard orchestration operations
///
/// Every state transition is a full recomputation of the active window,
/// donor list, and metrics; nothing is incrementally patched. Collaborators
/// only ever observe output derived from a single window.
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Install a caller-supplied dataset as the authoritative history (the
    /// fallback path when the repository is unreachable) and fully recompute
    /// in the unfiltered state.
    async fn load_dataset(&self, records: Vec<RawDonation>) -> ServiceResult<()>;

    /// Move to `Filtered(start..end)` and recompute. Fails with a validation
    /// error on unparseable dates or `start > end`; the previous output stays
    /// published unchanged in that case.
    async fn apply_filter(&self, start_date: &str, end_date: &str) -> ServiceResult<()>;

    /// Reload the full dataset from the repository and move to `Unfiltered`.
    /// A load failure is surfaced and leaves the current state untouched.
    async fn reset_filter(&self) -> ServiceResult<()>;

    /// The donor list derived from the active window, in display order.
    async fn donors(&self) -> Vec<DonorProfile>;

    /// Metrics derived from the active window.
    async fn metrics(&self) -> DashboardMetrics;

    /// Look up a single donor by exact email.
    async fn donor_by_email(&self, email: &str) -> Option<DonorProfile>;

    /// The active window bounds; `None` while unfiltered.
    async fn active_window(&self) -> Option<DateWindow>;

    /// Donor list, metrics, and window bounds as one consistent unit.
    async fn snapshot(&self) -> DashboardSnapshot;
}

struct EngineState {
    history: Vec<RawDonation>,
    filter: FilterState,
    donors: Vec<DonorProfile>,
    metrics: DashboardMetrics,
}

/// Implementation of the dashboard orchestrator
///
/// State lives behind a single `RwLock`; the write lock is held only for the
/// publish step, so readers always see a complete donor-list/metrics pair.
/// Each recomputation takes a ticket from a monotonically increasing
/// sequence; the publish step re-checks the sequence under the write lock and
/// discards superseded results, so a newer request always wins.
pub struct DashboardServiceImpl {
    repo: Arc<dyn DatasetRepository>,
    state: RwLock<EngineState>,
    sequence: AtomicU64,
}

impl DashboardServiceImpl {
    pub fn new(repo: Arc<dyn DatasetRepository>) -> Self {
        Self {
            repo,
            state: RwLock::new(EngineState {
                history: Vec::new(),
                filter: FilterState::Unfiltered,
                donors: Vec::new(),
                metrics: DashboardMetrics::default(),
            }),
            sequence: AtomicU64::new(0),
        }
    }

    fn next_ticket(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_superseded(&self, ticket: u64) -> bool {
        self.sequence.load(Ordering::SeqCst) != ticket
    }

    /// Swap in a new history and publish the unfiltered recomputation.
    async fn install_history(&self, records: Vec<RawDonation>) -> ServiceResult<()> {
        let ticket = self.next_ticket();
        let filter = FilterState::Unfiltered;
        let (donors, metrics) = recompute(&records, &filter);

        let mut state = self.state.write().await;
        if self.is_superseded(ticket) {
            debug!("Discarding superseded dataset install (ticket {})", ticket);
            return Ok(());
        }

        info!(
            "Installed dataset: {} records, {} donors",
            records.len(),
            donors.len()
        );
        state.history = records;
        state.filter = filter;
        state.donors = donors;
        state.metrics = metrics;
        Ok(())
    }
}

/// Derive the active window, donor list, and metrics for one filter state.
fn recompute(
    history: &[RawDonation],
    filter: &FilterState,
) -> (Vec<DonorProfile>, DashboardMetrics) {
    let active: Vec<RawDonation> = match filter {
        FilterState::Unfiltered => history.to_vec(),
        FilterState::Filtered(win) => window::select_window(history, win)
            .into_iter()
            .cloned()
            .collect(),
    };

    let donors = donor::aggregate(&active);
    let metrics = metrics::compute_metrics(&active, history, filter.start());
    (donors, metrics)
}

#[async_trait]
impl DashboardService for DashboardServiceImpl {
    async fn load_dataset(&self, records: Vec<RawDonation>) -> ServiceResult<()> {
        self.install_history(records).await
    }

    async fn apply_filter(&self, start_date: &str, end_date: &str) -> ServiceResult<()> {
        let win = DateRangeInput::new(start_date, end_date)
            .to_window()
            .map_err(|e| {
                warn!(
                    "Rejected date filter [{} .. {}]: {}",
                    start_date, end_date, e
                );
                ServiceError::Domain(e)
            })?;

        let ticket = self.next_ticket();
        let history = self.state.read().await.history.clone();
        let filter = FilterState::Filtered(win);
        let (donors, metrics) = recompute(&history, &filter);

        let mut state = self.state.write().await;
        if self.is_superseded(ticket) {
            debug!("Discarding superseded filter computation (ticket {})", ticket);
            return Ok(());
        }

        info!(
            "Applied date filter {} .. {}: {} active transactions, {} donors",
            win.start,
            win.end,
            metrics.transaction_count,
            donors.len()
        );
        state.filter = filter;
        state.donors = donors;
        state.metrics = metrics;
        Ok(())
    }

    async fn reset_filter(&self) -> ServiceResult<()> {
        let records = self.repo.load().await.map_err(|e| {
            warn!("Reset failed, keeping current dataset and window: {}", e);
            ServiceError::from(e)
        })?;
        self.install_history(records).await
    }

    async fn donors(&self) -> Vec<DonorProfile> {
        self.state.read().await.donors.clone()
    }

    async fn metrics(&self) -> DashboardMetrics {
        self.state.read().await.metrics.clone()
    }

    async fn donor_by_email(&self, email: &str) -> Option<DonorProfile> {
        self.state
            .read()
            .await
            .donors
            .iter()
            .find(|donor| donor.email == email)
            .cloned()
    }

    async fn active_window(&self) -> Option<DateWindow> {
        self.state.read().await.filter.window()
    }

    async fn snapshot(&self) -> DashboardSnapshot {
        let state = self.state.read().await;
        DashboardSnapshot {
            donors: state.donors.clone(),
            metrics: state.metrics.clone(),
            window: state.filter.window(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::dataset::StaticDatasetRepository;
    use crate::errors::{DataLoadError, DataLoadResult, DomainError};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn record(email: &str, value: Decimal, entry_date: &str) -> RawDonation {
        RawDonation {
            name: Some(format!("Donor {}", email)),
            email: Some(email.to_string()),
            value,
            entry_date: Some(entry_date.to_string()),
            ..Default::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn two_record_history() -> Vec<RawDonation> {
        vec![
            record("a@x.com", dec!(50), "2024-01-01"),
            record("a@x.com", dec!(75), "2024-01-20"),
        ]
    }

    fn service_with(records: Vec<RawDonation>) -> DashboardServiceImpl {
        DashboardServiceImpl::new(Arc::new(StaticDatasetRepository::new(records)))
    }

    struct UnreachableRepository;

    #[async_trait]
    impl DatasetRepository for UnreachableRepository {
        async fn load(&self) -> DataLoadResult<Vec<RawDonation>> {
            Err(DataLoadError::Unavailable("source offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_reset_loads_and_aggregates() {
        let service = service_with(two_record_history());
        service.reset_filter().await.unwrap();

        let donors = service.donors().await;
        assert_eq!(donors.len(), 1);
        assert_eq!(donors[0].total_donated, dec!(125));
        assert_eq!(donors[0].donation_count, 2);
        assert_eq!(service.active_window().await, None);

        let metrics = service.metrics().await;
        assert_eq!(metrics.total_donated, dec!(125));
        assert_eq!(metrics.transaction_count, 2);
    }

    #[tokio::test]
    async fn test_apply_filter_selects_window_and_counts_first_timers() {
        let service = service_with(two_record_history());
        service.reset_filter().await.unwrap();

        // Window excludes the 2024-01-01 donation, which becomes the
        // baseline: a@x.com is no longer a first-time donor.
        service.apply_filter("2024-01-10", "2024-01-31").await.unwrap();

        let metrics = service.metrics().await;
        assert_eq!(metrics.transaction_count, 1);
        assert_eq!(metrics.total_donated, dec!(75));
        assert_eq!(metrics.first_time_donors.count, 0);
        assert_eq!(metrics.unique_donors, 1);

        let donors = service.donors().await;
        assert_eq!(donors.len(), 1);
        assert_eq!(donors[0].total_donated, dec!(75));
        assert_eq!(donors[0].donation_count, 1);

        let window = service.active_window().await.unwrap();
        assert_eq!(window.start, date(2024, 1, 10));
        assert_eq!(window.end, date(2024, 1, 31));
    }

    #[tokio::test]
    async fn test_first_time_donor_without_baseline_history() {
        let history = vec![record("a@x.com", dec!(75), "2024-01-20")];
        let service = service_with(history);
        service.reset_filter().await.unwrap();
        service.apply_filter("2024-01-10", "2024-01-31").await.unwrap();

        let metrics = service.metrics().await;
        assert_eq!(metrics.transaction_count, 1);
        assert_eq!(metrics.first_time_donors.count, 1);
        assert_eq!(metrics.unique_donors, 0);
    }

    #[tokio::test]
    async fn test_invalid_filter_leaves_output_unchanged() {
        let service = service_with(two_record_history());
        service.reset_filter().await.unwrap();

        let before = service.snapshot().await;

        let reversed = service.apply_filter("2024-02-01", "2024-01-01").await;
        assert!(matches!(
            reversed,
            Err(ServiceError::Domain(DomainError::Validation(_)))
        ));

        let unparseable = service.apply_filter("soon", "2024-01-31").await;
        assert!(matches!(
            unparseable,
            Err(ServiceError::Domain(DomainError::Validation(_)))
        ));

        let after = service.snapshot().await;
        assert_eq!(after.metrics, before.metrics);
        assert_eq!(after.donors.len(), before.donors.len());
        assert_eq!(after.window, before.window);
    }

    #[tokio::test]
    async fn test_reset_after_filter_restores_full_dataset() {
        let service = service_with(two_record_history());
        service.reset_filter().await.unwrap();
        service.apply_filter("2024-01-10", "2024-01-31").await.unwrap();
        assert_eq!(service.metrics().await.transaction_count, 1);

        service.reset_filter().await.unwrap();
        assert_eq!(service.metrics().await.transaction_count, 2);
        assert_eq!(service.active_window().await, None);
    }

    #[tokio::test]
    async fn test_load_failure_surfaces_and_fallback_applies() {
        let service = DashboardServiceImpl::new(Arc::new(UnreachableRepository));

        let result = service.reset_filter().await;
        assert!(matches!(
            result,
            Err(ServiceError::Domain(DomainError::DataLoad(_)))
        ));
        assert!(service.donors().await.is_empty());

        // Caller decides to continue with its own fallback dataset.
        service.load_dataset(two_record_history()).await.unwrap();
        assert_eq!(service.metrics().await.transaction_count, 2);
    }

    #[tokio::test]
    async fn test_donor_lookup_by_exact_email() {
        let service = service_with(two_record_history());
        service.reset_filter().await.unwrap();

        assert!(service.donor_by_email("a@x.com").await.is_some());
        assert!(service.donor_by_email("A@X.COM").await.is_none());
        assert!(service.donor_by_email("missing@x.com").await.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_is_internally_consistent() {
        let service = service_with(two_record_history());
        service.reset_filter().await.unwrap();
        service.apply_filter("2024-01-10", "2024-01-31").await.unwrap();

        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.metrics.transaction_count, 1);
        assert_eq!(snapshot.donors.len(), 1);
        assert_eq!(snapshot.window.unwrap().start, date(2024, 1, 10));

        let donor_sum: Decimal = snapshot.donors.iter().map(|d| d.total_donated).sum();
        assert_eq!(donor_sum, snapshot.metrics.total_donated);
    }
}
