use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use minbar_domain::filter::{DateRange, FilterState};
use minbar_domain::gateway::{ApiGateway, MethodStatRow, TypeStatRow};
use minbar_domain::pagination::paginate;
use minbar_domain::payment::PaymentRecord;
use minbar_domain::stats::sorted_newest_first;

use crate::application::dtos::{BackOfficeViewDto, PaymentDto, PaymentsPageDto};
use crate::application::queries::{build_dashboard_section, build_report_section};

/// Rows per page in the payments table.
pub const PAYMENTS_PAGE_SIZE: usize = 10;

/// Everything one fetch cycle brought back, tagged with the filter
/// generation that requested it.
#[derive(Default)]
struct FetchSnapshot {
    payments: Vec<PaymentRecord>,
    type_rows: Vec<TypeStatRow>,
    method_rows: Vec<MethodStatRow>,
    recoverable_error: bool,
    generation: u64,
}

struct CoordinatorState {
    filter: FilterState,
    /// Bumped on every filter change; a snapshot from an older generation
    /// is stale and never committed
    generation: u64,
    /// Generation currently being fetched, if any
    in_flight: Option<u64>,
    snapshot: FetchSnapshot,
}

/// Owner of the view state and the fetch/aggregate cycle.
///
/// All mutation goes through the setters here; each setter invalidates the
/// derived view and triggers exactly one fresh cycle. Concurrent
/// `refresh()` calls for the same generation coalesce into one network
/// round, and a response that arrives after the filter moved on is
/// discarded, never merged.
pub struct RefreshCoordinator {
    gateway: Arc<dyn ApiGateway>,
    state: Mutex<CoordinatorState>,
    page_size: usize,
}

impl RefreshCoordinator {
    pub fn new(gateway: Arc<dyn ApiGateway>, initial_range: DateRange) -> Self {
        Self {
            gateway,
            state: Mutex::new(CoordinatorState {
                filter: FilterState::new(initial_range),
                generation: 0,
                in_flight: None,
                snapshot: FetchSnapshot::default(),
            }),
            page_size: PAYMENTS_PAGE_SIZE,
        }
    }

    pub async fn filter(&self) -> FilterState {
        self.state.lock().await.filter.clone()
    }

    /// Replace the search query, snap back to page 1, refetch.
    pub async fn set_search_query(&self, query: &str) {
        {
            let mut state = self.state.lock().await;
            if state.filter.search_query == query {
                return;
            }
            state.filter.search_query = query.to_string();
            state.filter.current_page = 1;
            state.generation += 1;
            debug!(generation = state.generation, "Search query changed");
        }
        self.refresh().await;
    }

    /// Replace the report date range, snap back to page 1, refetch.
    pub async fn set_date_range(&self, range: DateRange) {
        {
            let mut state = self.state.lock().await;
            if state.filter.date_range == range {
                return;
            }
            state.filter.date_range = range;
            state.filter.current_page = 1;
            state.generation += 1;
            debug!(generation = state.generation, "Date range changed");
        }
        self.refresh().await;
    }

    /// Move within the already-fetched list; no network round. The page is
    /// clamped to what the current snapshot can actually show.
    pub async fn set_page(&self, page: u32) {
        let mut state = self.state.lock().await;
        let total_pages = {
            let filtered = filtered_table(&state.snapshot.payments, &state.filter.search_query);
            paginate(&filtered, 1, self.page_size).total_pages
        };
        state.filter.current_page = page.clamp(1, total_pages);
    }

    /// Run one fetch cycle for the current filter generation.
    ///
    /// Fan-out: payments and both server-side stat breakdowns go out
    /// concurrently. Fan-in: nothing is committed until all three are in,
    /// so a partially-fetched view is never observable. A failed cycle
    /// commits an empty snapshot with the recoverable-error flag instead
    /// of erroring out.
    pub async fn refresh(&self) {
        let (generation, range) = {
            let mut state = self.state.lock().await;
            if state.in_flight == Some(state.generation) {
                // someone is already fetching exactly this state
                debug!(generation = state.generation, "Refresh coalesced");
                return;
            }
            state.in_flight = Some(state.generation);
            (state.generation, state.filter.date_range)
        };

        let outcome = tokio::try_join!(
            self.gateway.payments(),
            self.gateway.payment_stats_by_type(&range),
            self.gateway.payment_stats_by_method(&range),
        );

        let snapshot = match outcome {
            Ok((payments, type_rows, method_rows)) => FetchSnapshot {
                payments,
                type_rows,
                method_rows,
                recoverable_error: false,
                generation,
            },
            Err(e) => {
                warn!(generation, "Fetch cycle failed: {}", e);
                FetchSnapshot {
                    recoverable_error: true,
                    generation,
                    ..FetchSnapshot::default()
                }
            }
        };

        let mut state = self.state.lock().await;
        if state.in_flight == Some(generation) {
            state.in_flight = None;
        }
        if state.generation != generation {
            // the filter moved on while we were fetching; whoever moved it
            // has already issued the fetch for the newer generation
            info!(
                stale = generation,
                current = state.generation,
                "Discarding stale fetch result"
            );
            return;
        }

        state.snapshot = snapshot;

        // the list may have shrunk under the current page
        let filtered = filtered_table(&state.snapshot.payments, &state.filter.search_query);
        let total_pages = paginate(&filtered, 1, self.page_size).total_pages;
        if state.filter.current_page > total_pages {
            state.filter.current_page = 1;
        }
    }

    /// Build the combined view model from the last committed snapshot.
    pub async fn view(&self) -> BackOfficeViewDto {
        self.view_at(Local::now().fixed_offset()).await
    }

    /// `view` with an explicit clock, for deterministic "today" handling.
    pub async fn view_at(&self, now: DateTime<FixedOffset>) -> BackOfficeViewDto {
        let state = self.state.lock().await;
        let snapshot = &state.snapshot;

        let table = filtered_table(&snapshot.payments, &state.filter.search_query);
        let window = paginate(&table, state.filter.current_page, self.page_size);

        BackOfficeViewDto {
            filter: state.filter.clone(),
            dashboard: build_dashboard_section(&snapshot.payments, now),
            report: build_report_section(
                &snapshot.payments,
                &snapshot.type_rows,
                &snapshot.method_rows,
                &state.filter.date_range,
            ),
            payments_page: PaymentsPageDto {
                items: window.page_items.iter().map(PaymentDto::from).collect(),
                current_page: state.filter.current_page,
                total_pages: window.total_pages,
                total_items: table.len() as u64,
                start_index: window.start_index,
                end_index: window.end_index,
            },
            recoverable_error: snapshot.recoverable_error,
            generation: snapshot.generation,
        }
    }
}

/// The payments table is the search-filtered list, newest first.
fn filtered_table(payments: &[PaymentRecord], search_query: &str) -> Vec<PaymentRecord> {
    let filtered: Vec<PaymentRecord> = payments
        .iter()
        .filter(|p| p.matches_search(search_query))
        .cloned()
        .collect();
    sorted_newest_first(&filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{
        fixed_now as now, range, test_payment as payment, ScriptedGateway,
    };
    use chrono::NaiveDate;
    use std::time::Duration;

    #[tokio::test]
    async fn test_refresh_commits_view() {
        let gateway = Arc::new(ScriptedGateway::serving(vec![
            payment(1, "Ahmed", 10.0, "2026-08-02T10:00:00Z"),
            payment(2, "Fatima", 5.0, "2026-08-03T10:00:00Z"),
        ]));
        let coordinator = RefreshCoordinator::new(gateway, range());

        coordinator.refresh().await;
        let view = coordinator.view_at(now()).await;

        assert_eq!(view.dashboard.total_payments, 2);
        assert_eq!(view.dashboard.total_amount, 15.0);
        assert!(!view.recoverable_error);
        // table is newest first
        assert_eq!(view.payments_page.items[0].id, 2);
    }

    #[tokio::test]
    async fn test_search_filters_table_but_not_dashboard() {
        let gateway = Arc::new(ScriptedGateway::serving(vec![
            payment(1, "Ahmed", 10.0, "2026-08-02T10:00:00Z"),
            payment(2, "Fatima", 5.0, "2026-08-03T10:00:00Z"),
        ]));
        let coordinator = RefreshCoordinator::new(gateway, range());

        coordinator.refresh().await;
        coordinator.set_search_query("fatima").await;
        let view = coordinator.view_at(now()).await;

        assert_eq!(view.payments_page.total_items, 1);
        assert_eq!(view.payments_page.items[0].member_name, "Fatima");
        // the dashboard keeps aggregating the full list
        assert_eq!(view.dashboard.total_payments, 2);
        assert_eq!(view.filter.current_page, 1);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        // first cycle answers slowly with Ahmed, second instantly with Fatima
        let gateway = Arc::new(ScriptedGateway::scripted(vec![
            (80, vec![payment(1, "Ahmed", 10.0, "2026-08-02T10:00:00Z")]),
            (0, vec![payment(2, "Fatima", 5.0, "2026-08-03T10:00:00Z")]),
        ]));
        let coordinator = Arc::new(RefreshCoordinator::new(gateway, range()));

        // fetch A for generation 0 starts and hangs in its sleep
        let slow = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.refresh().await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        // the filter moves on; this issues fetch B for generation 1,
        // which resolves before A
        coordinator.set_search_query("fatima").await;
        let after_b = coordinator.view_at(now()).await;
        assert_eq!(after_b.generation, 1);

        // A finally lands and must be dropped
        slow.await.unwrap();
        let final_view = coordinator.view_at(now()).await;
        assert_eq!(final_view.generation, 1);
        assert_eq!(final_view.dashboard.total_payments, 1);
        assert_eq!(final_view.payments_page.items[0].member_name, "Fatima");
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_coalesce() {
        let gateway = Arc::new(ScriptedGateway::scripted(vec![(
            50,
            vec![payment(1, "Ahmed", 10.0, "2026-08-02T10:00:00Z")],
        )]));
        let coordinator = Arc::new(RefreshCoordinator::new(gateway.clone(), range()));

        let first = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.refresh().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        // same generation, fetch already in flight: this returns without
        // touching the network
        coordinator.refresh().await;
        first.await.unwrap();

        assert_eq!(gateway.call_count(), 1);
        let view = coordinator.view_at(now()).await;
        assert_eq!(view.dashboard.total_payments, 1);
    }

    #[tokio::test]
    async fn test_failed_cycle_shows_flagged_empty_view() {
        let gateway = Arc::new(ScriptedGateway::failing());
        let coordinator = RefreshCoordinator::new(gateway, range());

        coordinator.refresh().await;
        let view = coordinator.view_at(now()).await;

        assert!(view.recoverable_error);
        assert_eq!(view.dashboard.total_payments, 0);
        assert_eq!(view.payments_page.total_items, 0);
        assert_eq!(view.payments_page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_page_clamps_and_resets_when_list_shrinks() {
        let many: Vec<PaymentRecord> = (0..25)
            .map(|i| payment(i, "Ahmed", 1.0, "2026-08-02T10:00:00Z"))
            .collect();
        let gateway = Arc::new(ScriptedGateway::scripted(vec![
            (0, many),
            (0, vec![payment(100, "Ahmed", 1.0, "2026-08-02T10:00:00Z")]),
        ]));
        let coordinator = RefreshCoordinator::new(gateway, range());

        coordinator.refresh().await;
        coordinator.set_page(3).await;
        assert_eq!(coordinator.filter().await.current_page, 3);

        // the next fetch returns one payment; page 3 no longer exists
        coordinator.set_date_range(
            DateRange::new(
                NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 8, 2).unwrap(),
            )
            .unwrap(),
        )
        .await;

        let view = coordinator.view_at(now()).await;
        assert_eq!(view.filter.current_page, 1);
        assert_eq!(view.payments_page.total_pages, 1);

        // asking for a page that does not exist clamps instead of erroring
        coordinator.set_page(99).await;
        assert_eq!(coordinator.filter().await.current_page, 1);
    }

    #[tokio::test]
    async fn test_setting_same_query_does_not_refetch() {
        let gateway = Arc::new(ScriptedGateway::serving(vec![payment(
            1,
            "Ahmed",
            10.0,
            "2026-08-02T10:00:00Z",
        )]));
        let coordinator = RefreshCoordinator::new(gateway.clone(), range());

        coordinator.refresh().await;
        let calls_after_first = gateway.call_count();

        coordinator.set_search_query("").await;
        assert_eq!(gateway.call_count(), calls_after_first);
    }
}
