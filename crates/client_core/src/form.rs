use std::{sync::Arc, time::Duration};

use shared::{
    catalog::CourseCatalog,
    domain::{Age, CourseId, EnrollmentDraft},
    error::EnrollmentError,
    protocol::StudentEnrollmentRecord,
};
use storage::EnrollmentStore;
use tracing::{error, info, warn};

use crate::{
    navigation::{Redirect, View},
    notice::Notice,
};

/// Form controller. Owns the draft for as long as the enrollment view is open.
#[derive(Debug, Clone)]
pub struct EnrollmentForm {
    catalog: Arc<CourseCatalog>,
    draft: EnrollmentDraft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was written.
    Rejected {
        error: EnrollmentError,
        notice: Notice,
    },
    /// The record is in the slot and the dashboard can be opened.
    Saved {
        record: StudentEnrollmentRecord,
        notice: Notice,
        redirect: Redirect,
    },
    SaveFailed {
        notice: Notice,
    },
}

impl SubmitOutcome {
    pub fn notice(&self) -> &Notice {
        match self {
            Self::Rejected { notice, .. }
            | Self::Saved { notice, .. }
            | Self::SaveFailed { notice } => notice,
        }
    }

    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            Self::Saved { redirect, .. } => Some(*redirect),
            _ => None,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

impl EnrollmentForm {
    pub fn new(catalog: Arc<CourseCatalog>) -> Self {
        Self {
            catalog,
            draft: EnrollmentDraft::default(),
        }
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    pub fn draft(&self) -> &EnrollmentDraft {
        &self.draft
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_age(&mut self, age: Age) {
        self.draft.age = Some(age);
    }

    /// Flips the selection of a catalog course. Ids the catalog does not
    /// offer are refused and the draft is left as it was.
    pub fn toggle_course(&mut self, id: &CourseId) -> Result<bool, EnrollmentError> {
        if !self.catalog.contains(id) {
            return Err(EnrollmentError::UnknownCourse(id.clone()));
        }
        Ok(self.draft.toggle(id.clone()))
    }

    pub fn is_selected(&self, id: &CourseId) -> bool {
        self.draft.is_selected(id)
    }

    pub fn reset(&mut self) {
        self.draft = EnrollmentDraft::default();
    }

    pub fn prepare_submission(&self) -> Result<StudentEnrollmentRecord, EnrollmentError> {
        StudentEnrollmentRecord::from_draft(&self.catalog, &self.draft)
    }

    pub async fn submit<S>(&self, store: &S, redirect_delay: Duration) -> SubmitOutcome
    where
        S: EnrollmentStore + ?Sized,
    {
        submit_draft(&self.catalog, &self.draft, store, redirect_delay).await
    }
}

/// Validates `draft`, writes the resulting record and reports what the user
/// should see. The write has finished by the time a redirect is returned.
pub async fn submit_draft<S>(
    catalog: &CourseCatalog,
    draft: &EnrollmentDraft,
    store: &S,
    redirect_delay: Duration,
) -> SubmitOutcome
where
    S: EnrollmentStore + ?Sized,
{
    let record = match StudentEnrollmentRecord::from_draft(catalog, draft) {
        Ok(record) => record,
        Err(error) => {
            warn!(
                field = error.field().unwrap_or("unknown"),
                "enrollment submission rejected: {error}"
            );
            return SubmitOutcome::Rejected {
                error,
                notice: Notice::missing_information(),
            };
        }
    };

    if let Err(err) = store.save(&record).await {
        error!("failed to persist enrollment: {err:#}");
        return SubmitOutcome::SaveFailed {
            notice: Notice::save_failed(&err),
        };
    }

    info!(
        student = %record.name,
        courses = record.courses.len(),
        "enrollment submitted"
    );
    SubmitOutcome::Saved {
        notice: Notice::enrolled(&record.name, record.courses.len()),
        record,
        redirect: Redirect {
            target: View::Dashboard,
            delay: redirect_delay,
        },
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
