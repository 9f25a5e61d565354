//! Tests contra PostgreSQL real. Requieren `DATABASE_URL`:
//! `cargo test --test db_tests -- --ignored`

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use sqlx::PgPool;
use uuid::Uuid;

use velocare::controllers::component_controller::ComponentController;
use velocare::controllers::invoice_controller::InvoiceController;
use velocare::controllers::issue_controller::IssueController;
use velocare::controllers::service_controller::ServiceController;
use velocare::controllers::vehicle_controller::VehicleController;
use velocare::dto::component_dto::CreateComponentRequest;
use velocare::dto::invoice_dto::CreateInvoiceRequest;
use velocare::dto::invoice_dto::UpdateInvoiceRequest;
use velocare::dto::issue_dto::{CreateIssueRequest, UpdateIssueRequest};
use velocare::dto::service_dto::{CreateServiceRequest, UpdateServiceRequest};
use velocare::dto::vehicle_dto::CreateVehicleRequest;
use velocare::middleware::auth::AuthenticatedUser;
use velocare::models::{Component, Issue, UserType, Vehicle};
use velocare::repositories::issue_repository::IssueRepository;
use velocare::repositories::user_repository::{NewUser, UserRepository};
use velocare::utils::errors::AppError;

async fn create_user(pool: &PgPool, user_type: UserType) -> AuthenticatedUser {
    let email = format!("{}@velocare.test", Uuid::new_v4());
    let user = UserRepository::new(pool.clone())
        .create(NewUser {
            email: email.clone(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            is_user: user_type == UserType::VehicleOwner,
            is_owner: user_type == UserType::ShopOwner,
        })
        .await
        .unwrap();

    AuthenticatedUser {
        user_id: user.id,
        email: user.email,
        user_type,
    }
}

async fn create_component(pool: &PgPool, shop: &AuthenticatedUser, new_price: rust_decimal::Decimal, repair_price: rust_decimal::Decimal) -> Component {
    ComponentController::new(pool.clone())
        .create(
            shop,
            CreateComponentRequest {
                name: "Brake pad".to_string(),
                description: None,
                new_price,
                repair_price,
            },
        )
        .await
        .unwrap()
}

async fn create_vehicle(pool: &PgPool, owner: &AuthenticatedUser, plate: &str) -> Vehicle {
    VehicleController::new(pool.clone())
        .create(
            owner,
            CreateVehicleRequest {
                owner_id: None,
                make: Some("Toyota".to_string()),
                license_plate: plate.to_string(),
                model: "Corolla".to_string(),
                year: Some(2018),
            },
        )
        .await
        .unwrap()
}

async fn create_issue(
    pool: &PgPool,
    user: &AuthenticatedUser,
    vehicle_id: Uuid,
    component_id: Option<Uuid>,
    is_repair: bool,
) -> Issue {
    IssueController::new(pool.clone())
        .create(
            user,
            vehicle_id,
            CreateIssueRequest {
                component_id,
                description: Some("noise when braking".to_string()),
                is_repair,
            },
        )
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_service_total_is_exact_decimal_sum(pool: PgPool) {
    let shop = create_user(&pool, UserType::ShopOwner).await;
    let owner = create_user(&pool, UserType::VehicleOwner).await;
    let vehicle = create_vehicle(&pool, &owner, "ABC-123").await;

    let pads = create_component(&pool, &shop, dec!(120.50), dec!(35.99)).await;
    let disc = create_component(&pool, &shop, dec!(89.90), dec!(40.00)).await;

    let repair = create_issue(&pool, &owner, vehicle.id, Some(pads.id), true).await;
    let replace = create_issue(&pool, &owner, vehicle.id, Some(disc.id), false).await;

    let service = ServiceController::new(pool.clone())
        .create(
            &shop,
            CreateServiceRequest {
                vehicle_id: vehicle.id,
                // Los duplicados se ignoran
                issues: vec![repair.id, replace.id, repair.id],
            },
        )
        .await
        .unwrap();

    assert_eq!(service.total_cost, dec!(125.89));
    assert_eq!(service.issues.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_service_without_issues_costs_zero(pool: PgPool) {
    let shop = create_user(&pool, UserType::ShopOwner).await;
    let vehicle = create_vehicle(&pool, &shop, "ZERO-1").await;

    let service = ServiceController::new(pool.clone())
        .create(&shop, CreateServiceRequest { vehicle_id: vehicle.id, issues: vec![] })
        .await
        .unwrap();

    assert_eq!(service.total_cost, dec!(0));
    assert!(service.issues.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_missing_component_rolls_back_service(pool: PgPool) {
    let shop = create_user(&pool, UserType::ShopOwner).await;
    let vehicle = create_vehicle(&pool, &shop, "NOCOMP-1").await;
    let issue = create_issue(&pool, &shop, vehicle.id, None, true).await;

    let result = ServiceController::new(pool.clone())
        .create(&shop, CreateServiceRequest { vehicle_id: vehicle.id, issues: vec![issue.id] })
        .await;

    assert!(matches!(result, Err(AppError::MissingComponent(id)) if id == issue.id));

    let (services,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM services")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(services, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_service_rejects_issue_from_other_vehicle(pool: PgPool) {
    let shop = create_user(&pool, UserType::ShopOwner).await;
    let first = create_vehicle(&pool, &shop, "FIRST-1").await;
    let second = create_vehicle(&pool, &shop, "SECOND-1").await;
    let component = create_component(&pool, &shop, dec!(10.00), dec!(5.00)).await;
    let foreign_issue = create_issue(&pool, &shop, second.id, Some(component.id), true).await;

    let result = ServiceController::new(pool.clone())
        .create(&shop, CreateServiceRequest { vehicle_id: first.id, issues: vec![foreign_issue.id] })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_updating_issue_set_recomputes_total(pool: PgPool) {
    let shop = create_user(&pool, UserType::ShopOwner).await;
    let vehicle = create_vehicle(&pool, &shop, "UPD-1").await;
    let component = create_component(&pool, &shop, dec!(100.00), dec!(30.00)).await;
    let repair = create_issue(&pool, &shop, vehicle.id, Some(component.id), true).await;
    let replace = create_issue(&pool, &shop, vehicle.id, Some(component.id), false).await;

    let controller = ServiceController::new(pool.clone());
    let service = controller
        .create(&shop, CreateServiceRequest { vehicle_id: vehicle.id, issues: vec![repair.id] })
        .await
        .unwrap();
    assert_eq!(service.total_cost, dec!(30.00));

    let updated = controller
        .update(&shop, service.id, UpdateServiceRequest { issues: vec![repair.id, replace.id] })
        .await
        .unwrap();
    assert_eq!(updated.total_cost, dec!(130.00));
    assert_eq!(updated.issues.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_invoice_numbers_due_date_and_conflict(pool: PgPool) {
    let shop = create_user(&pool, UserType::ShopOwner).await;
    let vehicle = create_vehicle(&pool, &shop, "INV-CAR").await;
    let services = ServiceController::new(pool.clone());
    let first = services
        .create(&shop, CreateServiceRequest { vehicle_id: vehicle.id, issues: vec![] })
        .await
        .unwrap();
    let second = services
        .create(&shop, CreateServiceRequest { vehicle_id: vehicle.id, issues: vec![] })
        .await
        .unwrap();

    let invoices = InvoiceController::new(pool.clone(), 15);
    let first_invoice = invoices
        .create(&shop, first.id, CreateInvoiceRequest::default())
        .await
        .unwrap();
    let second_invoice = invoices
        .create(&shop, second.id, CreateInvoiceRequest::default())
        .await
        .unwrap();

    assert_eq!(first_invoice.invoice_number, "INV-0001");
    assert_eq!(second_invoice.invoice_number, "INV-0002");
    assert_eq!(first_invoice.total_amount, first.total_cost);
    assert!(!first_invoice.paid);
    assert_eq!(
        first_invoice.due_date,
        first_invoice.issue_date.date_naive() + Duration::days(15)
    );

    let duplicate = invoices
        .create(&shop, first.id, CreateInvoiceRequest::default())
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_mark_as_paid_is_idempotent_and_shop_owner_only(pool: PgPool) {
    let shop = create_user(&pool, UserType::ShopOwner).await;
    let owner = create_user(&pool, UserType::VehicleOwner).await;
    let vehicle = create_vehicle(&pool, &owner, "PAID-1").await;
    let service = ServiceController::new(pool.clone())
        .create(&shop, CreateServiceRequest { vehicle_id: vehicle.id, issues: vec![] })
        .await
        .unwrap();

    let invoices = InvoiceController::new(pool.clone(), 15);
    let invoice = invoices
        .create(&shop, service.id, CreateInvoiceRequest::default())
        .await
        .unwrap();

    let denied = invoices.mark_as_paid(&owner, invoice.id).await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    assert!(invoices.mark_as_paid(&shop, invoice.id).await.unwrap().paid);
    assert!(invoices.mark_as_paid(&shop, invoice.id).await.unwrap().paid);

    // El propietario ve su factura pero no la lista de impagadas
    assert_eq!(invoices.get_by_id(&owner, invoice.id).await.unwrap().id, invoice.id);
    assert!(matches!(invoices.list_unpaid(&owner).await, Err(AppError::Forbidden(_))));
    assert!(invoices.list_unpaid(&shop).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_deleting_component_unlinks_issues(pool: PgPool) {
    let shop = create_user(&pool, UserType::ShopOwner).await;
    let vehicle = create_vehicle(&pool, &shop, "DEL-1").await;
    let component = create_component(&pool, &shop, dec!(50.00), dec!(20.00)).await;
    let issue = create_issue(&pool, &shop, vehicle.id, Some(component.id), true).await;

    ComponentController::new(pool.clone())
        .delete(&shop, component.id)
        .await
        .unwrap();

    let issue = IssueRepository::new(pool.clone())
        .find_in_vehicle(issue.id, vehicle.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(issue.component_id, None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_vehicle_owners_only_see_their_own_vehicles(pool: PgPool) {
    let shop = create_user(&pool, UserType::ShopOwner).await;
    let alice = create_user(&pool, UserType::VehicleOwner).await;
    let bob = create_user(&pool, UserType::VehicleOwner).await;

    let alice_car = create_vehicle(&pool, &alice, "ALICE-1").await;
    let bob_car = create_vehicle(&pool, &bob, "BOB-1").await;
    create_issue(&pool, &alice, alice_car.id, None, true).await;
    create_issue(&pool, &bob, bob_car.id, None, true).await;

    let vehicles = VehicleController::new(pool.clone());
    let issues = IssueController::new(pool.clone());

    let listed = vehicles.list(&alice).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, alice_car.id);
    assert_eq!(listed[0].owner_id, alice.user_id);

    assert!(matches!(vehicles.get_by_id(&alice, bob_car.id).await, Err(AppError::NotFound(_))));
    assert!(matches!(vehicles.delete(&alice, bob_car.id).await, Err(AppError::NotFound(_))));
    assert!(matches!(
        issues.list_by_vehicle(&alice, bob_car.id).await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(issues.list_all(&alice).await.unwrap().len(), 1);

    let bob_issue = issues.list_by_vehicle(&bob, bob_car.id).await.unwrap().remove(0);
    let edit = UpdateIssueRequest {
        is_repair: Some(false),
        ..UpdateIssueRequest::default()
    };
    assert!(matches!(
        issues.update(&alice, bob_car.id, bob_issue.id, edit).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        issues.delete(&alice, bob_car.id, bob_issue.id).await,
        Err(AppError::NotFound(_))
    ));
    let untouched = issues.get_by_id(&bob, bob_car.id, bob_issue.id).await.unwrap();
    assert!(untouched.is_repair);

    assert_eq!(vehicles.list(&shop).await.unwrap().len(), 2);
    assert_eq!(issues.list_all(&shop).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_vehicle_owner_cannot_manage_services(pool: PgPool) {
    let owner = create_user(&pool, UserType::VehicleOwner).await;
    let vehicle = create_vehicle(&pool, &owner, "OWN-1").await;

    let services = ServiceController::new(pool.clone());
    let result = services
        .create(&owner, CreateServiceRequest { vehicle_id: vehicle.id, issues: vec![] })
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(matches!(services.revenue_dashboard(&owner).await, Err(AppError::Forbidden(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_revenue_dashboard_sums_current_periods(pool: PgPool) {
    let shop = create_user(&pool, UserType::ShopOwner).await;
    let vehicle = create_vehicle(&pool, &shop, "REV-1").await;
    let component = create_component(&pool, &shop, dec!(200.00), dec!(75.25)).await;
    let issue = create_issue(&pool, &shop, vehicle.id, Some(component.id), true).await;

    let services = ServiceController::new(pool.clone());
    services
        .create(&shop, CreateServiceRequest { vehicle_id: vehicle.id, issues: vec![issue.id] })
        .await
        .unwrap();

    // Un servicio de hace dos años no cuenta
    let old = services
        .create(&shop, CreateServiceRequest { vehicle_id: vehicle.id, issues: vec![issue.id] })
        .await
        .unwrap();
    sqlx::query("UPDATE services SET date = $2 WHERE id = $1")
        .bind(old.id)
        .bind(Utc::now() - Duration::days(730))
        .execute(&pool)
        .await
        .unwrap();

    let summary = services.revenue_dashboard(&shop).await.unwrap();
    assert_eq!(summary.daily_revenue, dec!(75.25));
    assert_eq!(summary.monthly_revenue, dec!(75.25));
    assert_eq!(summary.yearly_revenue, dec!(75.25));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_service_total_holds_sum_of_maximum_prices(pool: PgPool) {
    let shop = create_user(&pool, UserType::ShopOwner).await;
    let vehicle = create_vehicle(&pool, &shop, "MAX-1").await;
    let component = create_component(&pool, &shop, dec!(99999999.99), dec!(99999999.99)).await;
    let repair = create_issue(&pool, &shop, vehicle.id, Some(component.id), true).await;
    let replace = create_issue(&pool, &shop, vehicle.id, Some(component.id), false).await;

    let service = ServiceController::new(pool.clone())
        .create(&shop, CreateServiceRequest { vehicle_id: vehicle.id, issues: vec![repair.id, replace.id] })
        .await
        .unwrap();
    assert_eq!(service.total_cost, dec!(199999999.98));

    let invoice = InvoiceController::new(pool.clone(), 15)
        .create(&shop, service.id, CreateInvoiceRequest::default())
        .await
        .unwrap();
    assert_eq!(invoice.total_amount, dec!(199999999.98));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_nested_invoice_actions_deny_vehicle_owners_with_forbidden(pool: PgPool) {
    let shop = create_user(&pool, UserType::ShopOwner).await;
    let alice = create_user(&pool, UserType::VehicleOwner).await;
    let bob = create_user(&pool, UserType::VehicleOwner).await;

    let services = ServiceController::new(pool.clone());
    let invoices = InvoiceController::new(pool.clone(), 15);

    let mut issued = Vec::new();
    for (owner, plate) in [(&alice, "NEST-A"), (&bob, "NEST-B")] {
        let vehicle = create_vehicle(&pool, owner, plate).await;
        let service = services
            .create(&shop, CreateServiceRequest { vehicle_id: vehicle.id, issues: vec![] })
            .await
            .unwrap();
        let invoice = invoices
            .create(&shop, service.id, CreateInvoiceRequest::default())
            .await
            .unwrap();
        issued.push((service.id, invoice.id));
    }

    // Propia o ajena, la denegación por rol es siempre 403
    for (service_id, invoice_id) in issued.iter().copied() {
        assert!(matches!(
            invoices.mark_as_paid_in_service(&alice, service_id, invoice_id).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            invoices
                .update_in_service(&alice, service_id, invoice_id, UpdateInvoiceRequest::default())
                .await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            invoices.delete_in_service(&alice, service_id, invoice_id).await,
            Err(AppError::Forbidden(_))
        ));
    }

    // El dueño de taller sigue recibiendo 404 si la factura no es de ese servicio
    let (alice_service, _) = issued[0];
    let (_, bob_invoice) = issued[1];
    assert!(matches!(
        invoices.mark_as_paid_in_service(&shop, alice_service, bob_invoice).await,
        Err(AppError::NotFound(_))
    ));
    assert!(invoices
        .mark_as_paid_in_service(&shop, issued[1].0, bob_invoice)
        .await
        .unwrap()
        .paid);
}
