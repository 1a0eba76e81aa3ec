#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # petcare
//!
//! Reservation and inventory consistency for a pet-care marketplace.
//!
//! Three kinds of finite resource are handed out here: a veterinarian's
//! appointment slots, a sitter's time, and a product's stock. Every create
//! and every status change runs as one atomic unit of work, so a pool's
//! counter always equals its starting capacity minus the active
//! reservations drawing on it.
//!
//! ## Core Types
//!
//! - [`ReservationService`]: the create and transition operations
//! - [`Actor`] and [`Role`]: who is asking
//! - [`AppointmentRequest`], [`SitterBookingRequest`] and [`OrderRequest`]: what is asked for
//! - [`AppointmentStatus`], [`BookingStatus`] and [`OrderStatus`]: the lifecycles
//! - [`BookingError`] and [`TransitionError`]: operation failures
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use petcare::lifecycle::Lifecycle;
//! use petcare::{AppointmentStatus, Money, OrderStatus};
//!
//! assert!(AppointmentStatus::Pending
//!     .transition_to(AppointmentStatus::Confirmed)
//!     .is_some());
//! assert!(OrderStatus::Delivered.is_terminal());
//!
//! let fee = Money::new(15_000).checked_mul(4).unwrap();
//! assert_eq!(fee, Money::new(60_000));
//! ```

pub mod config;
pub mod database;
pub mod directory;
pub mod error;
pub mod ids;
pub mod lifecycle;
pub mod logging;
pub mod money;
pub mod operations;
pub mod output;
pub mod pool;
pub mod reservation;
pub mod role;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use directory::{
    NewPet, NewProduct, NewUser, Pet, PetShop, PetSitter, Product, RoleProfile, User,
    Veterinarian,
};
pub use error::{BookingError, Error, InsufficientCapacity, Result, TransitionError};
pub use ids::{
    AppointmentId, BookingId, MedicalRecordId, OrderId, PetId, ProductId, ShopId, SitterId,
    UserId, VetId,
};
pub use lifecycle::{AppointmentStatus, BookingStatus, Lifecycle, OrderStatus, SideEffect, Variant};
pub use logging::{init_logger, LogLevel, Logger};
pub use money::Money;
pub use operations::{
    CreatedRecord, ExecutionResult, OperationPlan, PlanAction, PlanExecutor, ReservationService,
    TransitionTarget,
};
pub use pool::PoolId;
pub use reservation::{
    Appointment, AppointmentRequest, Booking, MedicalRecord, MedicalRecordRequest, Order,
    OrderItem, OrderLine, OrderRequest, RecordRef, SitterBookingRequest, ValidationError,
};
pub use role::{Actor, Role};
