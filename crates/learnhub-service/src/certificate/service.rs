//! Certificate issuance service.
//!
//! Issuance renders the PDF first and inserts the row second; the
//! (student, course) uniqueness constraint arbitrates concurrent
//! attempts. A loser deletes its own artifact and returns the winning
//! row, so at most one certificate ever exists per pair.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use learnhub_core::config::certificate::CertificateConfig;
use learnhub_core::error::AppError;
use learnhub_core::result::AppResult;
use learnhub_database::repositories::certificate::CertificateRepository;
use learnhub_database::repositories::course::CourseRepository;
use learnhub_database::repositories::progress::ProgressRepository;
use learnhub_database::repositories::user::UserRepository;
use learnhub_entity::certificate::{Certificate, CreateCertificate};
use learnhub_storage::artifact::ArtifactStore;
use learnhub_storage::pdf::{CertificateDocument, render_certificate};

use crate::context::RequestContext;

/// Issues and fetches completion certificates.
#[derive(Debug, Clone)]
pub struct CertificateService {
    certificate_repo: Arc<CertificateRepository>,
    course_repo: Arc<CourseRepository>,
    progress_repo: Arc<ProgressRepository>,
    user_repo: Arc<UserRepository>,
    store: Arc<ArtifactStore>,
    config: CertificateConfig,
}

/// Fetch result for a certificate query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CertificateStatus {
    /// The certificate exists (or was just generated).
    Available {
        /// The certificate row.
        certificate: Certificate,
    },
    /// The course is not completed, so no certificate can exist yet.
    NotEligible,
}

impl CertificateService {
    /// Creates a new certificate service.
    pub fn new(
        certificate_repo: Arc<CertificateRepository>,
        course_repo: Arc<CourseRepository>,
        progress_repo: Arc<ProgressRepository>,
        user_repo: Arc<UserRepository>,
        store: Arc<ArtifactStore>,
        config: CertificateConfig,
    ) -> Self {
        Self {
            certificate_repo,
            course_repo,
            progress_repo,
            user_repo,
            store,
            config,
        }
    }

    /// Generate the certificate for a completed course.
    ///
    /// Idempotent: an existing certificate is returned unchanged, never
    /// re-rendered. Fails with a precondition error when the course is
    /// not completed.
    pub async fn generate(&self, ctx: &RequestContext, course_id: Uuid) -> AppResult<Certificate> {
        let progress = self.progress_repo.find(ctx.user_id, course_id).await?;
        let completed = progress.as_ref().is_some_and(|p| p.completed);
        if !completed {
            return Err(AppError::precondition("Course is not completed yet"));
        }

        if let Some(existing) = self.certificate_repo.find(ctx.user_id, course_id).await? {
            return Ok(existing);
        }

        let course = self
            .course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;
        let student = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let instructor = self
            .user_repo
            .find_by_id(course.creator_id)
            .await?
            .ok_or_else(|| AppError::not_found("Instructor not found"))?;

        let completion_date = progress
            .and_then(|p| p.completed_at)
            .unwrap_or_else(Utc::now);

        let pdf = render_certificate(&CertificateDocument {
            student_name: student.name.clone(),
            course_title: course.title.clone(),
            instructor_name: instructor.name.clone(),
            issuer_name: self.config.issuer_name.clone(),
            completion_date,
        })?;

        let file_name = format!(
            "certificate_{}_{}_{}.pdf",
            ctx.user_id,
            course_id,
            Utc::now().timestamp_millis()
        );
        self.store.write(&file_name, Bytes::from(pdf)).await?;

        let file_url = format!(
            "{}/{file_name}",
            self.config.public_prefix.trim_end_matches('/')
        );

        match self
            .certificate_repo
            .create(&CreateCertificate {
                student_id: ctx.user_id,
                course_id,
                instructor_id: instructor.id,
                file_url,
            })
            .await?
        {
            Some(certificate) => {
                info!(certificate_id = %certificate.id, course_id = %course_id, "Certificate issued");
                Ok(certificate)
            }
            None => {
                // Lost the uniqueness race; the winner's artifact stands.
                warn!(course_id = %course_id, "Concurrent certificate generation, discarding artifact");
                self.store.delete(&file_name).await?;
                self.certificate_repo
                    .find(ctx.user_id, course_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::database("Certificate missing after conflicting insert")
                    })
            }
        }
    }

    /// Fetch the certificate for a course, generating it on first access
    /// when the course is completed. Not being eligible is a normal
    /// outcome here, not an error.
    pub async fn fetch_or_generate(
        &self,
        ctx: &RequestContext,
        course_id: Uuid,
    ) -> AppResult<CertificateStatus> {
        if let Some(certificate) = self.certificate_repo.find(ctx.user_id, course_id).await? {
            return Ok(CertificateStatus::Available { certificate });
        }

        let completed = self
            .progress_repo
            .find(ctx.user_id, course_id)
            .await?
            .is_some_and(|p| p.completed);
        if !completed {
            return Ok(CertificateStatus::NotEligible);
        }

        let certificate = self.generate(ctx, course_id).await?;
        Ok(CertificateStatus::Available { certificate })
    }
}
