//! Allocation Orchestrator
//!
//! Coordinates the checker, the lifecycle and the ledger. One service
//! method = one transaction on the write pool: it fully applies or fully
//! rolls back. Reads go through the read pool.

use chrono::NaiveDate;
use sqlx::SqliteConnection;

use super::{AllocationError, checker, ledger};
use crate::db::DbService;
use shared::models::{
    Allocation, AllocationItem, AllocationKind, AllocationStatus, AllocationView, TableStatus,
};
use shared::util::{now_millis, snowflake_id};

const ALLOCATION_SELECT: &str = "SELECT id, kind, resource_id, window_date, reference, status, customer_name, party_size, special_instructions, total_amount, created_at, updated_at FROM allocation";

/// The resource slot an allocation holds: a table (no window) or a venue
/// on a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationTarget {
    Table { table_id: i64 },
    Venue { venue_id: i64, date: NaiveDate },
}

impl AllocationTarget {
    pub fn kind(&self) -> AllocationKind {
        match self {
            AllocationTarget::Table { .. } => AllocationKind::TableOrder,
            AllocationTarget::Venue { .. } => AllocationKind::VenueEvent,
        }
    }

    fn resource_id(&self) -> i64 {
        match self {
            AllocationTarget::Table { table_id } => *table_id,
            AllocationTarget::Venue { venue_id, .. } => *venue_id,
        }
    }

    fn window_date(&self) -> Option<String> {
        match self {
            AllocationTarget::Table { .. } => None,
            AllocationTarget::Venue { date, .. } => Some(date.to_string()),
        }
    }

    /// Orders open PENDING and are walked through the kitchen stages;
    /// bookings are confirmed the moment the slot is granted
    fn initial_status(&self) -> AllocationStatus {
        match self {
            AllocationTarget::Table { .. } => AllocationStatus::Pending,
            AllocationTarget::Venue { .. } => AllocationStatus::Confirmed,
        }
    }

    fn reference_prefix(&self) -> &'static str {
        match self {
            AllocationTarget::Table { .. } => "RO",
            AllocationTarget::Venue { .. } => "EB",
        }
    }
}

/// New line item within a create / add-item request
#[derive(Debug, Clone)]
pub struct NewItem {
    pub menu_item_id: i64,
    pub quantity: i32,
    pub special_requests: Option<String>,
}

/// Create-allocation request
#[derive(Debug, Clone)]
pub struct CreateAllocation {
    pub target: AllocationTarget,
    pub customer_name: Option<String>,
    pub party_size: Option<i32>,
    pub special_instructions: Option<String>,
    pub items: Vec<NewItem>,
}

/// The allocation engine service
#[derive(Clone)]
pub struct AllocationService {
    db: DbService,
}

impl AllocationService {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    /// Create an allocation: check the target, insert the header in its
    /// initial status, occupy the table (for orders), snapshot and insert
    /// the initial items, recompute the total. All-or-nothing.
    pub async fn create(&self, req: CreateAllocation) -> Result<AllocationView, AllocationError> {
        if let Some(size) = req.party_size {
            if size < 1 {
                return Err(AllocationError::InvalidInput(format!(
                    "Party size must be at least 1, got {size}"
                )));
            }
        }

        let mut tx = self.db.write().begin().await?;
        checker::check_target(&mut tx, &req.target, req.party_size).await?;

        let id = snowflake_id();
        let now = now_millis();
        let reference = format!("{}-{}", req.target.reference_prefix(), id);
        let status = req.target.initial_status();

        sqlx::query(
            "INSERT INTO allocation (id, kind, resource_id, window_date, reference, status, customer_name, party_size, special_instructions, total_amount, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, ?10, ?10)",
        )
        .bind(id)
        .bind(req.target.kind())
        .bind(req.target.resource_id())
        .bind(req.target.window_date())
        .bind(&reference)
        .bind(status)
        .bind(&req.customer_name)
        .bind(req.party_size)
        .bind(&req.special_instructions)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| slot_conflict(&req.target, e))?;

        if let AllocationTarget::Table { table_id } = req.target {
            set_table_status(&mut tx, table_id, TableStatus::Occupied).await?;
        }

        for item in &req.items {
            ledger::insert_item(
                &mut tx,
                id,
                item.menu_item_id,
                item.quantity,
                item.special_requests.as_deref(),
            )
            .await?;
        }
        if !req.items.is_empty() {
            ledger::recompute_total(&mut tx, id).await?;
        }

        tx.commit().await?;
        tracing::info!(allocation_id = id, reference = %reference, kind = ?req.target.kind(), "allocation created");
        self.get(id).await
    }

    /// Move an allocation along its lifecycle. Rejects anything but the
    /// declared successor or a cancel from a non-terminal state; a table
    /// order reaching a terminal state frees its table.
    pub async fn change_status(
        &self,
        id: i64,
        requested: AllocationStatus,
    ) -> Result<AllocationView, AllocationError> {
        let mut tx = self.db.write().begin().await?;
        let alloc = fetch_allocation(&mut tx, id)
            .await?
            .ok_or(AllocationError::NotFound(id))?;

        if !alloc.status.can_transition_to(requested) {
            return Err(AllocationError::IllegalTransition {
                from: alloc.status,
                to: requested,
            });
        }

        sqlx::query("UPDATE allocation SET status = ?, updated_at = ? WHERE id = ?")
            .bind(requested)
            .bind(now_millis())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if alloc.kind == AllocationKind::TableOrder && requested.is_terminal() {
            set_table_status(&mut tx, alloc.resource_id, TableStatus::Available).await?;
        }

        tx.commit().await?;
        tracing::info!(allocation_id = id, from = %alloc.status, to = %requested, "status changed");
        self.get(id).await
    }

    /// Add a line item to a live allocation and recompute its total
    pub async fn add_item(
        &self,
        allocation_id: i64,
        item: NewItem,
    ) -> Result<AllocationItem, AllocationError> {
        let mut tx = self.db.write().begin().await?;
        let alloc = fetch_allocation(&mut tx, allocation_id)
            .await?
            .ok_or(AllocationError::NotFound(allocation_id))?;
        ensure_mutable(&alloc)?;

        let created = ledger::insert_item(
            &mut tx,
            allocation_id,
            item.menu_item_id,
            item.quantity,
            item.special_requests.as_deref(),
        )
        .await?;
        ledger::recompute_total(&mut tx, allocation_id).await?;

        tx.commit().await?;
        tracing::debug!(allocation_id, item_id = created.id, "line item added");
        Ok(created)
    }

    /// Change a line item's quantity and recompute the owner's total
    pub async fn update_item_quantity(
        &self,
        item_id: i64,
        quantity: i32,
    ) -> Result<AllocationItem, AllocationError> {
        let mut tx = self.db.write().begin().await?;
        let item = ledger::find_item(&mut tx, item_id)
            .await?
            .ok_or(AllocationError::ItemNotFound(item_id))?;
        let alloc = fetch_allocation(&mut tx, item.allocation_id)
            .await?
            .ok_or(AllocationError::NotFound(item.allocation_id))?;
        ensure_mutable(&alloc)?;

        let updated = ledger::update_item_quantity(&mut tx, item_id, quantity).await?;
        ledger::recompute_total(&mut tx, item.allocation_id).await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Remove a line item and recompute the owner's total
    pub async fn remove_item(&self, item_id: i64) -> Result<(), AllocationError> {
        let mut tx = self.db.write().begin().await?;
        let item = ledger::find_item(&mut tx, item_id)
            .await?
            .ok_or(AllocationError::ItemNotFound(item_id))?;
        let alloc = fetch_allocation(&mut tx, item.allocation_id)
            .await?
            .ok_or(AllocationError::NotFound(item.allocation_id))?;
        ensure_mutable(&alloc)?;

        ledger::delete_item(&mut tx, item_id).await?;
        ledger::recompute_total(&mut tx, item.allocation_id).await?;

        tx.commit().await?;
        tracing::debug!(allocation_id = item.allocation_id, item_id, "line item removed");
        Ok(())
    }

    /// Delete an allocation and all its line items; a table still held by
    /// the allocation is freed
    pub async fn delete(&self, id: i64) -> Result<(), AllocationError> {
        let mut tx = self.db.write().begin().await?;
        let alloc = fetch_allocation(&mut tx, id)
            .await?
            .ok_or(AllocationError::NotFound(id))?;

        sqlx::query("DELETE FROM allocation_item WHERE allocation_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM allocation WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if alloc.kind == AllocationKind::TableOrder && !alloc.status.is_terminal() {
            set_table_status(&mut tx, alloc.resource_id, TableStatus::Available).await?;
        }

        tx.commit().await?;
        tracing::info!(allocation_id = id, reference = %alloc.reference, "allocation deleted");
        Ok(())
    }

    /// Fetch one allocation with its items
    pub async fn get(&self, id: i64) -> Result<AllocationView, AllocationError> {
        let mut conn = self.db.read().acquire().await?;
        let alloc = fetch_allocation(&mut conn, id)
            .await?
            .ok_or(AllocationError::NotFound(id))?;
        let items = ledger::items_for(&mut conn, id).await?;
        Ok(AllocationView {
            allocation: alloc,
            items,
        })
    }

    /// Fetch one allocation by its human reference
    pub async fn get_by_reference(&self, reference: &str) -> Result<AllocationView, AllocationError> {
        let mut conn = self.db.read().acquire().await?;
        let sql = format!("{ALLOCATION_SELECT} WHERE reference = ? LIMIT 1");
        let alloc: Option<Allocation> = sqlx::query_as(&sql)
            .bind(reference)
            .fetch_optional(&mut *conn)
            .await?;
        let alloc = alloc.ok_or_else(|| AllocationError::ReferenceNotFound(reference.to_string()))?;
        let items = ledger::items_for(&mut conn, alloc.id).await?;
        Ok(AllocationView {
            allocation: alloc,
            items,
        })
    }

    /// List allocations of one kind, optionally narrowed by status and/or
    /// resource, newest first
    pub async fn list(
        &self,
        kind: AllocationKind,
        status: Option<AllocationStatus>,
        resource_id: Option<i64>,
    ) -> Result<Vec<AllocationView>, AllocationError> {
        let mut conn = self.db.read().acquire().await?;
        let sql = format!(
            "{ALLOCATION_SELECT} WHERE kind = ?1 AND (?2 IS NULL OR status = ?2) AND (?3 IS NULL OR resource_id = ?3) ORDER BY created_at DESC"
        );
        let allocations: Vec<Allocation> = sqlx::query_as(&sql)
            .bind(kind)
            .bind(status)
            .bind(resource_id)
            .fetch_all(&mut *conn)
            .await?;

        let mut views = Vec::with_capacity(allocations.len());
        for alloc in allocations {
            let items = ledger::items_for(&mut conn, alloc.id).await?;
            views.push(AllocationView {
                allocation: alloc,
                items,
            });
        }
        Ok(views)
    }
}

async fn fetch_allocation(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Allocation>, AllocationError> {
    let sql = format!("{ALLOCATION_SELECT} WHERE id = ?");
    let alloc = sqlx::query_as::<_, Allocation>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(alloc)
}

async fn set_table_status(
    conn: &mut SqliteConnection,
    table_id: i64,
    status: TableStatus,
) -> Result<(), AllocationError> {
    sqlx::query("UPDATE dining_table SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now_millis())
        .bind(table_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

fn ensure_mutable(alloc: &Allocation) -> Result<(), AllocationError> {
    if alloc.status.is_terminal() {
        return Err(AllocationError::InvalidInput(format!(
            "Allocation {} is {} and can no longer be modified",
            alloc.reference, alloc.status
        )));
    }
    Ok(())
}

/// The partial unique index raises a constraint violation when two
/// transactions race for the same (venue, date); surface it as the same
/// conflict the checker reports.
fn slot_conflict(target: &AllocationTarget, err: sqlx::Error) -> AllocationError {
    if let AllocationTarget::Venue { venue_id, date } = target {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AllocationError::SlotAlreadyBooked {
                    venue_id: *venue_id,
                    date: date.to_string(),
                };
            }
        }
    }
    AllocationError::Storage(err)
}
