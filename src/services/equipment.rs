//! Equipment stock reconciliation and assignments
//!
//! Stock is never stored as "available": the declared per-variant quantity
//! is reconciled against active assignments on every read.

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        activity::NewActivity,
        equipment::{
            AddStock, CreateAssignment, CreateEquipmentType, EquipmentAssignment,
            EquipmentType, EquipmentTypeWithStock, SizeStock, UpdateEquipmentType,
        },
    },
    repository::Repository,
    services::{activity::ActivityService, payments::PaymentsService},
};

/// `max(0, total - assigned)`, clamped so over-assignment never yields a
/// negative availability.
pub fn available_quantity(total: i32, assigned: i64) -> i32 {
    (i64::from(total) - assigned).max(0) as i32
}

fn same_size(a: Option<&str>, b: &str) -> bool {
    a.map(|s| s.eq_ignore_ascii_case(b)).unwrap_or(false)
}

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    payments: PaymentsService,
    activity: ActivityService,
}

impl EquipmentService {
    pub fn new(repository: Repository, payments: PaymentsService, activity: ActivityService) -> Self {
        Self { repository, payments, activity }
    }

    /// List equipment types
    pub async fn list_types(&self) -> AppResult<Vec<EquipmentType>> {
        self.repository.equipment.list_types().await
    }

    /// Get one equipment type
    pub async fn get_type(&self, id: i32) -> AppResult<EquipmentType> {
        self.repository.equipment.get_type_by_id(id).await
    }

    /// Create an equipment type
    pub async fn create_type(&self, data: CreateEquipmentType) -> AppResult<EquipmentType> {
        let equipment = self.repository.equipment.create_type(&data).await?;
        self.activity.record(
            NewActivity::new("create", "equipment_type")
                .entity_id(equipment.id)
                .description(format!("Created equipment type {}", equipment.name)),
        );
        Ok(equipment)
    }

    /// Update an equipment type
    pub async fn update_type(&self, id: i32, data: UpdateEquipmentType) -> AppResult<EquipmentType> {
        self.repository.equipment.update_type(id, &data).await
    }

    /// Delete an equipment type
    pub async fn delete_type(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.delete_type(id).await?;
        self.activity.record(NewActivity::new("delete", "equipment_type").entity_id(id));
        Ok(())
    }

    /// Availability of one type, optionally restricted to one size
    pub async fn availability(&self, type_id: i32, size: Option<&str>) -> AppResult<i32> {
        let equipment = self.repository.equipment.get_type_by_id(type_id).await?;
        let assigned = self.repository.equipment.sum_assigned(type_id, size).await?;
        Ok(available_quantity(equipment.quantity, assigned))
    }

    /// Full equipment list with derived availability. Types and active
    /// assignments are fetched with two concurrent queries and joined in
    /// memory; the per-size breakdown is filled in when the optional
    /// sub-table exists.
    pub async fn list_with_stock(&self) -> AppResult<Vec<EquipmentTypeWithStock>> {
        let (types, assignments) = tokio::try_join!(
            self.repository.equipment.list_types(),
            self.repository.equipment.list_active_assignments(),
        )?;

        let mut assigned_by_type: HashMap<i32, i64> = HashMap::new();
        for a in &assignments {
            *assigned_by_type.entry(a.equipment_type_id).or_insert(0) += i64::from(a.quantity);
        }

        let mut sizes_by_type: HashMap<i32, Vec<SizeStock>> = HashMap::new();
        if let Some(lines) = self.repository.equipment.size_breakdown().await? {
            for line in lines {
                sizes_by_type.entry(line.equipment_type_id).or_default().push(line);
            }
        }

        Ok(types
            .into_iter()
            .map(|t| {
                let assigned = assigned_by_type.get(&t.id).copied().unwrap_or(0);
                EquipmentTypeWithStock {
                    available_quantity: available_quantity(t.quantity, assigned),
                    size_breakdown: sizes_by_type.remove(&t.id),
                    equipment: t,
                }
            })
            .collect())
    }

    /// Add stock to one size variant of a group. Increments the clicked row
    /// when it already carries the requested size, increments the matching
    /// sibling otherwise, and only creates a new variant row when the group
    /// has no row for that size.
    pub async fn add_stock(&self, type_id: i32, data: AddStock) -> AppResult<EquipmentType> {
        if data.quantity <= 0 {
            return Err(AppError::Validation(
                "Stock quantity must be a positive integer".to_string(),
            ));
        }
        let size = data.size.trim();
        if size.is_empty() {
            return Err(AppError::Validation("Size must not be empty".to_string()));
        }

        let clicked = self.repository.equipment.get_type_by_id(type_id).await?;
        let parent_id = clicked.group_parent_id();

        let updated = if same_size(clicked.size.as_deref(), size) {
            self.repository.equipment.increment_quantity(clicked.id, data.quantity).await?
        } else if let Some(sibling) = self.repository.equipment.find_variant(parent_id, size).await? {
            self.repository.equipment.increment_quantity(sibling.id, data.quantity).await?
        } else {
            let parent = if clicked.id == parent_id {
                clicked
            } else {
                self.repository.equipment.get_type_by_id(parent_id).await?
            };
            self.repository.equipment.insert_variant(&parent, size, data.quantity).await?
        };

        self.activity.record(
            NewActivity::new("add_stock", "equipment_type")
                .entity_id(updated.id)
                .description(format!(
                    "Added {} x size {} to {}",
                    data.quantity, size, updated.name
                )),
        );

        Ok(updated)
    }

    /// List assignments, optionally for one student
    pub async fn list_assignments(&self, student_id: Option<i32>) -> AppResult<Vec<EquipmentAssignment>> {
        self.repository.equipment.list_assignments(student_id).await
    }

    /// Assign equipment to a student, optionally charging the fee
    pub async fn assign(&self, data: CreateAssignment) -> AppResult<EquipmentAssignment> {
        let equipment = self.repository.equipment.get_type_by_id(data.equipment_type_id).await?;
        let student = self.repository.students.get_by_id(data.student_id).await?;

        let assigned = self
            .repository
            .equipment
            .sum_assigned(data.equipment_type_id, data.size.as_deref())
            .await?;
        if available_quantity(equipment.quantity, assigned) < data.quantity {
            return Err(AppError::BusinessRule(format!(
                "Insufficient stock for {}",
                equipment.name
            )));
        }

        let assignment = self.repository.equipment.create_assignment(&data).await?;

        if data.charge_fee.unwrap_or(false) {
            self.payments.create_assignment_fee(&assignment, &equipment).await?;
        }

        self.activity.record(
            NewActivity::new("assign", "equipment_assignment")
                .entity_id(assignment.id)
                .description(format!(
                    "Assigned {} x {} to {} {}",
                    assignment.quantity, equipment.name, student.name, student.surname
                )),
        );

        Ok(assignment)
    }

    /// Return an assignment and cancel its unpaid fee payment, if one can be
    /// located. Finding no payment to cancel is still a successful return.
    pub async fn return_assignment(&self, id: i32) -> AppResult<(EquipmentAssignment, Option<i32>)> {
        let assignment = self.repository.equipment.mark_returned(id).await?;
        let equipment = self
            .repository
            .equipment
            .get_type_by_id(assignment.equipment_type_id)
            .await?;

        let cancelled = self.payments.cancel_assignment_fee(&assignment, &equipment).await?;

        self.activity.record(
            NewActivity::new("return", "equipment_assignment")
                .entity_id(assignment.id)
                .description(format!("Returned {} x {}", assignment.quantity, equipment.name)),
        );

        Ok((assignment, cancelled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_quantity_clamps_at_zero() {
        assert_eq!(available_quantity(10, 12), 0);
        assert_eq!(available_quantity(0, 5), 0);
    }

    #[test]
    fn test_available_quantity_basic() {
        assert_eq!(available_quantity(10, 3), 7);
        assert_eq!(available_quantity(10, 0), 10);
        assert_eq!(available_quantity(10, 10), 0);
    }

    #[test]
    fn test_same_size_is_case_insensitive() {
        assert!(same_size(Some("M"), "m"));
        assert!(same_size(Some("xl"), "XL"));
        assert!(!same_size(Some("M"), "L"));
        assert!(!same_size(None, "M"));
    }
}
