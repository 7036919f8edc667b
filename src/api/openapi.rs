//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    activity, auth, branches, equipment, health, payments, storage, students, trainings, users,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Clubhouse API",
        version = "1.0.0",
        description = "Sports Club Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Clubhouse Team")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Students
        students::list_students,
        students::get_student,
        students::create_student,
        students::update_student,
        students::delete_student,
        students::enroll_student,
        students::recalculate_payments,
        // Branches
        branches::list_branches,
        branches::get_branch,
        branches::create_branch,
        branches::update_branch,
        branches::delete_branch,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::get_availability,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::add_stock,
        equipment::list_assignments,
        equipment::create_assignment,
        equipment::return_assignment,
        // Payments
        payments::list_payments,
        payments::get_payment,
        payments::create_payment,
        payments::update_payment,
        payments::delete_payment,
        // Trainings
        trainings::list_trainings,
        trainings::get_training,
        trainings::create_training,
        trainings::update_training,
        trainings::delete_training,
        trainings::list_attendance,
        trainings::record_attendance,
        trainings::delete_attendance,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        users::update_role,
        // Activity
        activity::list_activity,
        // Files
        storage::upload_file,
        storage::delete_file,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::SessionUser,
            // Students
            crate::models::student::Student,
            crate::models::student::CreateStudent,
            crate::models::student::UpdateStudent,
            students::EnrollmentResponse,
            students::RecalculationResponse,
            // Branches
            crate::models::branch::SportBranch,
            crate::models::branch::CreateBranch,
            crate::models::branch::UpdateBranch,
            // Equipment
            crate::models::equipment::EquipmentType,
            crate::models::equipment::EquipmentTypeWithStock,
            crate::models::equipment::SizeStock,
            crate::models::equipment::CreateEquipmentType,
            crate::models::equipment::UpdateEquipmentType,
            crate::models::equipment::AddStock,
            crate::models::equipment::AssignmentStatus,
            crate::models::equipment::EquipmentAssignment,
            crate::models::equipment::CreateAssignment,
            equipment::AvailabilityResponse,
            equipment::ReturnResponse,
            // Payments
            crate::models::payment::Payment,
            crate::models::payment::CreatePayment,
            crate::models::payment::UpdatePayment,
            // Trainings
            crate::models::training::Training,
            crate::models::training::CreateTraining,
            crate::models::training::UpdateTraining,
            crate::models::training::AttendanceRecord,
            crate::models::training::CreateAttendance,
            // Users
            crate::models::user::UserProfile,
            crate::models::user::AuthenticatedProfile,
            crate::models::user::Role,
            crate::models::user::CreateUserProfile,
            crate::models::user::UpdateUserProfile,
            users::UpdateRoleRequest,
            // Activity
            crate::models::activity::ActivityLog,
            // Files
            crate::services::storage::StoredFile,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Authentication"),
        (name = "students", description = "Student management"),
        (name = "branches", description = "Sport branches"),
        (name = "equipment", description = "Equipment and assignments"),
        (name = "payments", description = "Payments"),
        (name = "trainings", description = "Trainings and attendance"),
        (name = "users", description = "User profiles"),
        (name = "activity", description = "Audit trail"),
        (name = "files", description = "File storage"),
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
