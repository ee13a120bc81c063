use crate::models::{AddNoteRequest, CreateLeadRequest, Lead, Note, UpdateLeadRequest, User};
use crate::services::backend_client::CrmBackend;
use crate::services::csv_service::{self, ExportColumn};
use crate::services::filter_service::LeadFilter;
use crate::services::visibility_service;
use crate::state::{Action, Store};
use crate::utils::AppError;
use futures::stream::{self, StreamExt};
use serde::Serialize;

/// Backend timestamp format ("2025-06-16T10:30:00")
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Backend creates in flight at once during a CSV import
const IMPORT_CONCURRENCY: usize = 8;

pub const IMPORT_SUCCESS_MESSAGE: &str = "Leads imported and saved to database!";
pub const IMPORT_ERROR_MESSAGE: &str = "Error importing leads.";

fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Leads the user may see, narrowed by `filter`
pub fn list_leads(store: &Store, current_user: &User, filter: &LeadFilter) -> Vec<Lead> {
    store.read(|state| {
        let visible = visibility_service::visible_leads(current_user, &state.users, &state.leads);
        filter.apply(&visible)
    })
}

/// Looks up a lead the user is allowed to act on
pub fn find_visible_lead(store: &Store, current_user: &User, id: &str) -> Result<Lead, AppError> {
    store.read(|state| {
        let lead = state
            .find_lead(id)
            .ok_or_else(|| AppError::NotFound(format!("Lead {} not found", id)))?;
        if !visibility_service::can_see_lead(current_user, &state.users, lead) {
            return Err(AppError::Forbidden(format!("Lead {} is not assigned to your team", id)));
        }
        Ok(lead.clone())
    })
}

/// Leads may only be assigned to the user or someone below them
fn check_assignee(store: &Store, current_user: &User, assigned_to: &str) -> Result<(), AppError> {
    let allowed = store.read(|state| visibility_service::allowed_assignees(current_user, &state.users));
    match allowed {
        Some(ids) if !ids.contains(assigned_to) => Err(AppError::Forbidden(format!(
            "Cannot assign leads to {}",
            assigned_to
        ))),
        _ => Ok(()),
    }
}

/// Validation shared by single creates and CSV rows
fn prepare_create(store: &Store, current_user: &User, mut req: CreateLeadRequest) -> Result<CreateLeadRequest, AppError> {
    req.validate().map_err(AppError::InvalidRequest)?;
    if req.assigned_to.is_empty() {
        req.assigned_to = current_user.id.clone();
    }
    check_assignee(store, current_user, &req.assigned_to)?;
    Ok(req)
}

pub async fn create_lead(
    backend: &dyn CrmBackend,
    store: &Store,
    current_user: &User,
    req: CreateLeadRequest,
) -> Result<Lead, AppError> {
    let req = prepare_create(store, current_user, req)?;

    let lead = backend.create_lead(&req).await.map_err(|e| {
        log::error!("❌ Create lead failed: {}", e);
        e
    })?;

    log::info!("✅ Lead {} created by {}", lead.id, current_user.id);
    store.dispatch(Action::LeadAdded(lead.clone()));
    Ok(lead)
}

pub async fn update_lead(
    backend: &dyn CrmBackend,
    store: &Store,
    current_user: &User,
    id: &str,
    mut updates: UpdateLeadRequest,
) -> Result<Lead, AppError> {
    let current = find_visible_lead(store, current_user, id)?;
    updates.validate_against(&current).map_err(AppError::InvalidRequest)?;
    if let Some(assignee) = updates.assigned_to.as_deref() {
        if assignee != current.assigned_to {
            check_assignee(store, current_user, assignee)?;
        }
    }
    updates.updated_at = Some(now_timestamp());

    let lead = backend.update_lead(id, &updates).await.map_err(|e| {
        log::error!("❌ Update lead {} failed: {}", id, e);
        e
    })?;

    log::info!("✏️  Lead {} updated by {}", id, current_user.id);
    store.dispatch(Action::LeadUpdated(lead.clone()));
    Ok(lead)
}

pub async fn delete_lead(
    backend: &dyn CrmBackend,
    store: &Store,
    current_user: &User,
    id: &str,
) -> Result<(), AppError> {
    find_visible_lead(store, current_user, id)?;

    backend.delete_lead(id).await.map_err(|e| {
        log::error!("❌ Delete lead {} failed: {}", id, e);
        e
    })?;

    log::info!("🗑️  Lead {} deleted by {}", id, current_user.id);
    store.dispatch(Action::LeadDeleted(id.to_string()));
    Ok(())
}

/// Appends a timestamped note and optionally reschedules the follow-up
pub async fn add_note(
    backend: &dyn CrmBackend,
    store: &Store,
    current_user: &User,
    id: &str,
    req: AddNoteRequest,
) -> Result<Lead, AppError> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(AppError::InvalidRequest("Note text is required".to_string()));
    }

    let current = find_visible_lead(store, current_user, id)?;
    let now = chrono::Local::now();
    let mut notes = current.notes_list.clone();
    notes.push(Note {
        date: now.format("%-d/%-m/%Y").to_string(),
        time: now.format("%H:%M:%S").to_string(),
        text: text.to_string(),
    });

    let updates = UpdateLeadRequest {
        notes_list: Some(notes),
        follow_up_date: req.follow_up_date.filter(|d| !d.trim().is_empty()),
        ..Default::default()
    };
    update_lead(backend, store, current_user, id, updates).await
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ImportFailure {
    /// 1-based data row (header excluded)
    pub row: usize,
    pub error: String,
}

/// Aggregate outcome of a CSV import. `errors` carries the row detail
/// behind `failed` for callers that want it.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ImportReport {
    pub total: usize,
    pub created: usize,
    pub failed: usize,
    pub message: String,
    pub errors: Vec<ImportFailure>,
}

fn import_message(total: usize, created: usize, failed: usize) -> String {
    if failed == 0 {
        IMPORT_SUCCESS_MESSAGE.to_string()
    } else if created == 0 {
        IMPORT_ERROR_MESSAGE.to_string()
    } else {
        format!("Imported {} of {} leads. {} failed.", created, total, failed)
    }
}

/// Imports CSV rows as new leads. Rows are created concurrently, at most
/// `IMPORT_CONCURRENCY` at a time, and independently: a failed row does
/// not undo the rows that succeeded.
pub async fn import_leads(
    backend: &dyn CrmBackend,
    store: &Store,
    current_user: &User,
    csv_text: &str,
) -> Result<ImportReport, AppError> {
    let rows = csv_service::parse_csv(csv_text);
    if rows.is_empty() {
        return Err(AppError::InvalidRequest("CSV contains no data rows".to_string()));
    }

    let users = store.read(|state| state.users.clone());
    let requests = csv_service::rows_to_leads(&rows, &users);
    let total = requests.len();

    let mut errors: Vec<ImportFailure> = Vec::new();
    let mut pending = Vec::new();
    for (idx, req) in requests.into_iter().enumerate() {
        match prepare_create(store, current_user, req) {
            Ok(req) => pending.push((idx + 1, req)),
            Err(e) => errors.push(ImportFailure { row: idx + 1, error: e.to_string() }),
        }
    }

    let mut results: Vec<(usize, Result<Lead, AppError>)> = stream::iter(pending.iter())
        .map(|(row, req)| async move { (*row, backend.create_lead(req).await) })
        .buffer_unordered(IMPORT_CONCURRENCY)
        .collect()
        .await;
    results.sort_by_key(|(row, _)| *row);

    let mut created: Vec<Lead> = Vec::new();
    for (row, result) in results {
        match result {
            Ok(lead) => created.push(lead),
            Err(e) => errors.push(ImportFailure { row, error: e.to_string() }),
        }
    }
    errors.sort_by_key(|f| f.row);

    let report = ImportReport {
        total,
        created: created.len(),
        failed: errors.len(),
        message: import_message(total, created.len(), errors.len()),
        errors,
    };

    if report.failed > 0 {
        log::warn!("⚠️  CSV import: {} of {} rows failed", report.failed, total);
    }
    log::info!("📥 CSV import by {}: {} created", current_user.id, report.created);

    if !created.is_empty() {
        store.dispatch(Action::LeadsImported(created));
    }
    Ok(report)
}

/// CSV of the user's visible, filtered leads
pub fn export_leads(store: &Store, current_user: &User, filter: &LeadFilter, columns: &[ExportColumn]) -> String {
    let leads = list_leads(store, current_user, filter);
    store.read(|state| csv_service::export_leads(&leads, &state.users, columns))
}
