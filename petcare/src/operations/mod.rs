//! Reservation operations using the plan-execute pattern.
//!
//! Operations are split into two phases:
//! 1. **Planning**: reads the rows a request touches, checks the actor and
//!    the lifecycle table, and lists the writes to make
//! 2. **Execution**: applies those writes in order
//!
//! Both phases run inside one unit of work, so a failing write (a short
//! pool, a stale status) rolls back everything the plan already did. Dry
//! runs stop after planning.
//!
//! # Examples
//!
//! ```no_run
//! use petcare::database::{Database, DatabaseConfig};
//! use petcare::operations::{OrderPlan, PlanBuilder, PlanExecutor};
//! use petcare::{Actor, OrderRequest, ProductId, Role, ShopId, UserId};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/petcare.db")).unwrap();
//! let buyer = Actor::new(UserId::new(1), Role::PetOwner);
//! let request = OrderRequest::new(ShopId::new(1), "12 Main St").with_line(ProductId::new(1), 3);
//!
//! let result = db
//!     .unit_of_work(|tx| {
//!         let plan = OrderPlan::new(buyer, request).build_plan(tx)?;
//!         PlanExecutor::new(tx).execute(&plan)
//!     })
//!     .unwrap();
//! println!("{:?}", result.created);
//! ```

mod access;
pub mod appointment;
pub mod booking;
pub mod executor;
pub mod init;
pub mod medical;
pub mod order;
pub mod plan;
pub mod service;
pub mod transition;

pub use appointment::AppointmentPlan;
pub use booking::BookingPlan;
pub use executor::{CreatedRecord, ExecutionResult, PlanExecutor};
pub use init::{init_database, InitOptions, InitResult};
pub use medical::MedicalRecordPlan;
pub use order::OrderPlan;
pub use plan::{OperationPlan, PlanAction, PlanBuilder};
pub use service::ReservationService;
pub use transition::{TransitionPlan, TransitionTarget};
