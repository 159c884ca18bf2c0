use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::directory::{
    ContractorRepository, EmployeeRepository, SellerRepository, StatusRepository,
};
use crate::localization::Localizer;
use crate::messaging::{MessagesClient, NotificationManager};
use crate::metrics::OperationMetrics;

use super::{
    build_template_data, validate_template_data, DifferenceFormatter, DispatchResult,
    EntityResolver, NotificationDispatcher, OperationError, OperationResult, ReferencesOperation,
    RequestData, ReturnNotificationRequest,
};

/// Counters for the goods return operation
#[derive(Debug, Default)]
struct OperationStats {
    total: AtomicU64,
    completed: AtomicU64,
    rejected: AtomicU64,
    failed: AtomicU64,
}

/// Snapshot of operation counters
#[derive(Debug, Clone, Serialize)]
pub struct OperationStatsSnapshot {
    pub total: u64,
    pub completed: u64,
    /// Aborted by validation or entity resolution
    pub rejected: u64,
    /// Aborted by template validation
    pub failed: u64,
}

/// The goods return notification operation
pub struct GoodsReturnOperation {
    resolver: EntityResolver,
    formatter: DifferenceFormatter,
    dispatcher: NotificationDispatcher,
    stats: OperationStats,
}

impl GoodsReturnOperation {
    pub fn new(
        resolver: EntityResolver,
        formatter: DifferenceFormatter,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            resolver,
            formatter,
            dispatcher,
            stats: OperationStats::default(),
        }
    }

    /// Wire the operation from a single directory that implements every lookup
    pub fn from_parts<D>(
        directory: Arc<D>,
        localizer: Arc<dyn Localizer>,
        messages: Arc<dyn MessagesClient>,
        sms: Arc<dyn NotificationManager>,
        employee_event: impl Into<String>,
    ) -> Self
    where
        D: SellerRepository
            + ContractorRepository
            + EmployeeRepository
            + StatusRepository
            + 'static,
    {
        let resolver = EntityResolver::new(directory.clone(), directory.clone(), directory.clone());
        let formatter = DifferenceFormatter::new(localizer.clone(), directory);
        let dispatcher = NotificationDispatcher::new(messages, sms, localizer, employee_event);
        Self::new(resolver, formatter, dispatcher)
    }

    pub fn stats(&self) -> OperationStatsSnapshot {
        OperationStatsSnapshot {
            total: self.stats.total.load(Ordering::Relaxed),
            completed: self.stats.completed.load(Ordering::Relaxed),
            rejected: self.stats.rejected.load(Ordering::Relaxed),
            failed: self.stats.failed.load(Ordering::Relaxed),
        }
    }

    async fn run(&self, data: &RequestData) -> OperationResult<DispatchResult> {
        let request = ReturnNotificationRequest::from_data(data)?;
        let entities = self.resolver.resolve(&request).await?;

        let differences = self.formatter.format(&request).await;
        let template = build_template_data(&request, &entities, differences);
        validate_template_data(&template)?;

        Ok(self.dispatcher.dispatch(&request, &entities, &template).await)
    }

    fn record_outcome(&self, outcome: &OperationResult<DispatchResult>) {
        match outcome {
            Ok(_) => {
                self.stats.completed.fetch_add(1, Ordering::Relaxed);
                OperationMetrics::record_completed();
            }
            Err(e @ OperationError::EmptyTemplateField(_)) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                OperationMetrics::record_error(e.kind());
            }
            Err(e) => {
                self.stats.rejected.fetch_add(1, Ordering::Relaxed);
                OperationMetrics::record_error(e.kind());
            }
        }
    }
}

#[async_trait]
impl ReferencesOperation for GoodsReturnOperation {
    type Output = DispatchResult;

    #[tracing::instrument(
        name = "operation.goods_return",
        skip_all,
        fields(operation_id = %Uuid::new_v4())
    )]
    async fn do_operation(&self, data: RequestData) -> OperationResult<DispatchResult> {
        let started = Instant::now();
        self.stats.total.fetch_add(1, Ordering::Relaxed);

        let outcome = self.run(&data).await;
        self.record_outcome(&outcome);
        OperationMetrics::observe_latency(started.elapsed().as_secs_f64());

        if let Err(e) = &outcome {
            tracing::warn!(
                error = %e,
                kind = e.kind(),
                code = e.code(),
                "Goods return operation aborted"
            );
        }

        outcome
    }
}
