use std::sync::Arc;

use cabin_catalog::CatalogService;
use cabin_core::repository::{CatalogStore, VoucherStore};
use cabin_voucher::{AssignmentEngine, VoucherService};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub vouchers: Arc<VoucherService>,
    pub engine: Arc<AssignmentEngine>,
}

impl AppState {
    pub fn new(
        catalog_store: Arc<dyn CatalogStore>,
        voucher_store: Arc<dyn VoucherStore>,
        max_assign_attempts: u32,
    ) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(catalog_store.clone())),
            vouchers: Arc::new(VoucherService::new(voucher_store.clone())),
            engine: Arc::new(AssignmentEngine::with_max_attempts(
                catalog_store,
                voucher_store,
                max_assign_attempts,
            )),
        }
    }
}
