use chrono::{NaiveDate, NaiveTime};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use tempfile::TempDir;

use petcare::database::{Database, DatabaseConfig};
use petcare::lifecycle::Lifecycle;
use petcare::operations::{OrderPlan, PlanBuilder};
use petcare::{
    Actor, AppointmentRequest, AppointmentStatus, Money, NewPet, NewProduct, NewUser,
    OrderRequest, OrderStatus, PetId, PoolId, ProductId, ReservationService, RoleProfile, ShopId,
    VetId,
};

const ORDER_LINE_COUNTS: &[usize] = &[1, 5, 20];

struct Fixture {
    _temp_dir: TempDir,
    service: ReservationService,
    owner: Actor,
    pet: PetId,
    vet_user: Actor,
    vet: VetId,
    manager: Actor,
    shop: ShopId,
}

fn register(service: &mut ReservationService, username: &str, profile: RoleProfile) -> Actor {
    let id = service
        .register_user(&NewUser::new(username, username, profile))
        .expect("failed to register user");
    service.actor_for(id).expect("registered user should resolve")
}

fn setup(slots: u32) -> Fixture {
    let temp_dir = TempDir::new().expect("failed to create temporary directory");
    let db_path = temp_dir.path().join("petcare.db");
    let mut service = ReservationService::open(DatabaseConfig::new(&db_path))
        .expect("failed to open temporary database");

    let owner = register(&mut service, "owner", RoleProfile::PetOwner);
    let pet = service
        .add_pet(owner, &NewPet::new("Bori", "Dog"))
        .expect("failed to add pet");
    let vet_user = register(
        &mut service,
        "vet",
        RoleProfile::Veterinarian {
            clinic_name: "Bench Clinic".into(),
            specialty: None,
            license_number: None,
            consultation_fee: Money::new(30_000),
            available_slots: slots,
        },
    );
    let vet = Database::get_veterinarian_by_user(service.database().connection(), vet_user.user_id)
        .expect("failed to read vet")
        .expect("vet profile should exist")
        .id;
    let manager = register(
        &mut service,
        "manager",
        RoleProfile::ShopManager {
            shop_name: "Bench Shop".into(),
            location: None,
            business_number: None,
            operating_hours: None,
        },
    );
    let shop = Database::get_shop_by_manager(service.database().connection(), manager.user_id)
        .expect("failed to read shop")
        .expect("shop should exist")
        .id;

    Fixture {
        _temp_dir: temp_dir,
        service,
        owner,
        pet,
        vet_user,
        vet,
        manager,
        shop,
    }
}

fn stock_products(fixture: &mut Fixture, count: usize) -> Vec<ProductId> {
    (0..count)
        .map(|i| {
            fixture
                .service
                .add_product(
                    fixture.manager,
                    &NewProduct::new(format!("item-{i}"), Money::new(1_000), 1_000_000),
                )
                .expect("failed to add product")
        })
        .collect()
}

fn appointment(fixture: &Fixture) -> AppointmentRequest {
    AppointmentRequest::new(
        fixture.pet,
        fixture.vet,
        NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date"),
        NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
    )
}

fn bench_create_appointment(c: &mut Criterion) {
    c.bench_function("create_appointment", |b| {
        let mut fixture = setup(u32::MAX);
        let request = appointment(&fixture);
        b.iter(|| {
            let id = fixture
                .service
                .create_appointment(fixture.owner, request.clone())
                .expect("slot should be available");
            black_box(id);
        });
    });
}

fn bench_cancel_appointment(c: &mut Criterion) {
    c.bench_function("cancel_appointment", |b| {
        b.iter_batched(
            || {
                let mut fixture = setup(1);
                let request = appointment(&fixture);
                let id = fixture
                    .service
                    .create_appointment(fixture.owner, request)
                    .expect("slot should be available");
                (fixture, id)
            },
            |(mut fixture, id)| {
                fixture
                    .service
                    .transition_appointment(fixture.vet_user, id, AppointmentStatus::Cancelled)
                    .expect("cancel should succeed");
                black_box(
                    fixture
                        .service
                        .capacity(PoolId::VetSlots(fixture.vet))
                        .expect("vet pool should exist"),
                );
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_place_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_order");

    for &lines in ORDER_LINE_COUNTS {
        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, &lines| {
            let mut fixture = setup(1);
            let products = stock_products(&mut fixture, lines);
            let request = products
                .iter()
                .fold(OrderRequest::new(fixture.shop, "1 Bench Rd"), |req, &p| {
                    req.with_line(p, 1)
                });
            b.iter(|| {
                let id = fixture
                    .service
                    .create_order(fixture.owner, request.clone())
                    .expect("stock should be available");
                black_box(id);
            });
        });
    }

    group.finish();
}

fn bench_plan_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_order");

    for &lines in ORDER_LINE_COUNTS {
        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, &lines| {
            let mut fixture = setup(1);
            let products = stock_products(&mut fixture, lines);
            let request = products
                .iter()
                .fold(OrderRequest::new(fixture.shop, "1 Bench Rd"), |req, &p| {
                    req.with_line(p, 1)
                });
            let planner = OrderPlan::new(fixture.owner, request);
            b.iter(|| {
                let plan = planner
                    .build_plan(fixture.service.database().connection())
                    .expect("failed to plan order");
                black_box(plan.len());
            });
        });
    }

    group.finish();
}

fn bench_transition_lookup(c: &mut Criterion) {
    c.bench_function("transition_table_lookup", |b| {
        b.iter(|| {
            for &from in OrderStatus::ALL {
                for &to in OrderStatus::ALL {
                    black_box(black_box(from).transition_to(black_box(to)));
                }
            }
        });
    });
}

criterion_group!(
    reservation_bench,
    bench_create_appointment,
    bench_cancel_appointment,
    bench_place_order,
    bench_plan_order,
    bench_transition_lookup
);
criterion_main!(reservation_bench);
