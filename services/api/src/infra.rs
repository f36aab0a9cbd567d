use job_board::applications::ApplicationService;
use job_board::config::SessionConfig;
use job_board::jobs::JobService;
use job_board::session::SessionAuthority;
use job_board::store::MemoryDocumentStore;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Services sharing one store connection for the lifetime of the process.
pub(crate) struct BoardServices {
    pub(crate) jobs: Arc<JobService<MemoryDocumentStore>>,
    pub(crate) applications: Arc<ApplicationService<MemoryDocumentStore, MemoryDocumentStore>>,
    pub(crate) sessions: Arc<SessionAuthority>,
}

pub(crate) fn board_services(
    store: Arc<MemoryDocumentStore>,
    session: &SessionConfig,
) -> BoardServices {
    BoardServices {
        jobs: Arc::new(JobService::new(store.clone())),
        applications: Arc::new(ApplicationService::new(store.clone(), store)),
        sessions: Arc::new(SessionAuthority::from_config(session)),
    }
}
