use std::{sync::Arc, time::Duration};

use shared::{catalog::CourseCatalog, domain::EnrollmentDraft};
use storage::EnrollmentStore;

use crate::{
    dashboard::DashboardView,
    form::{submit_draft, EnrollmentForm, SubmitOutcome},
};

/// Owns the persistence handle for one app session. The form and the
/// dashboard borrow it instead of reaching for a global slot.
pub struct EnrollmentService<S: EnrollmentStore + ?Sized> {
    catalog: Arc<CourseCatalog>,
    store: Arc<S>,
    redirect_delay: Duration,
}

impl<S: EnrollmentStore + ?Sized> EnrollmentService<S> {
    pub fn new(catalog: Arc<CourseCatalog>, store: Arc<S>, redirect_delay: Duration) -> Self {
        Self {
            catalog,
            store,
            redirect_delay,
        }
    }

    pub fn catalog(&self) -> &Arc<CourseCatalog> {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn redirect_delay(&self) -> Duration {
        self.redirect_delay
    }

    pub fn new_form(&self) -> EnrollmentForm {
        EnrollmentForm::new(Arc::clone(&self.catalog))
    }

    pub async fn submit(&self, draft: &EnrollmentDraft) -> SubmitOutcome {
        submit_draft(&self.catalog, draft, self.store.as_ref(), self.redirect_delay).await
    }

    pub async fn load_dashboard(&self) -> DashboardView {
        DashboardView::load(self.store.as_ref()).await
    }
}

impl<S: EnrollmentStore + ?Sized> Clone for EnrollmentService<S> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            store: Arc::clone(&self.store),
            redirect_delay: self.redirect_delay,
        }
    }
}
