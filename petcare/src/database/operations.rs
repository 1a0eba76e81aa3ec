//! Database reads and writes for directory entities and reservation records.
//!
//! Lookups are associated functions taking a `&Connection` so they work the
//! same on a plain connection and on an open unit of work. Record inserts
//! and the guarded status update are crate-private: only plan execution
//! writes reservation records.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::directory::{
    NewPet, NewProduct, NewUser, Pet, PetShop, PetSitter, Product, RoleProfile, User,
    Veterinarian,
};
use crate::error::{Error, Result};
use crate::ids::{
    AppointmentId, BookingId, MedicalRecordId, OrderId, PetId, ProductId, ShopId, SitterId,
    UserId, VetId,
};
use crate::lifecycle::{AppointmentStatus, BookingStatus, OrderStatus};
use crate::money::Money;
use crate::reservation::{
    Appointment, AppointmentRequest, Booking, MedicalRecord, MedicalRecordRequest, Order,
    OrderItem, RecordRef, SitterBookingRequest,
};

use super::connection::Database;

/// Current time as Unix epoch seconds for storage.
pub(crate) fn now_unix_secs() -> i64 {
    Utc::now().timestamp()
}

/// Reads a Unix-seconds column as a UTC timestamp.
fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let secs: i64 = row.get(idx)?;
    DateTime::from_timestamp(secs, 0).ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, secs))
}

const SELECT_USER: &str = r"
    SELECT user_id, username, full_name, email, phone, address, role, created_at
    FROM users WHERE user_id = ?1
";

const SELECT_USER_BY_USERNAME: &str = r"
    SELECT user_id, username, full_name, email, phone, address, role, created_at
    FROM users WHERE username = ?1
";

const INSERT_USER: &str = r"
    INSERT INTO users (username, full_name, email, phone, address, role, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
";

const INSERT_VETERINARIAN: &str = r"
    INSERT INTO veterinarians
    (user_id, clinic_name, specialty, license_number, consultation_fee, available_slots)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
";

const INSERT_PET_SITTER: &str = r"
    INSERT INTO pet_sitters (user_id, hourly_rate, experience_years, available_pets, service_area)
    VALUES (?1, ?2, ?3, ?4, ?5)
";

const INSERT_PET_SHOP: &str = r"
    INSERT INTO pet_shops (manager_id, shop_name, location, business_number, operating_hours)
    VALUES (?1, ?2, ?3, ?4, ?5)
";

const SELECT_PET: &str = r"
    SELECT pet_id, owner_id, name, species, breed, birth_date, weight, gender
    FROM pets WHERE pet_id = ?1
";

const INSERT_PET: &str = r"
    INSERT INTO pets (owner_id, name, species, breed, birth_date, weight, gender)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
";

const VETERINARIAN_COLUMNS: &str = r"
    SELECT vet_id, user_id, clinic_name, specialty, license_number, consultation_fee, available_slots
    FROM veterinarians
";

const SITTER_COLUMNS: &str = r"
    SELECT sitter_id, user_id, hourly_rate, experience_years, available_pets, service_area
    FROM pet_sitters
";

const SHOP_COLUMNS: &str = r"
    SELECT shop_id, manager_id, shop_name, location, business_number, operating_hours
    FROM pet_shops
";

const SELECT_PRODUCT: &str = r"
    SELECT product_id, shop_id, name, category, price, stock_quantity, description
    FROM products WHERE product_id = ?1
";

const INSERT_PRODUCT: &str = r"
    INSERT INTO products (shop_id, name, category, price, stock_quantity, description)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
";

const SELECT_APPOINTMENT: &str = r"
    SELECT appointment_id, pet_id, vet_id, appointment_date, appointment_time, reason, status, created_at
    FROM appointments WHERE appointment_id = ?1
";

const INSERT_APPOINTMENT: &str = r"
    INSERT INTO appointments
    (pet_id, vet_id, appointment_date, appointment_time, reason, status, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
";

const SELECT_BOOKING: &str = r"
    SELECT booking_id, pet_id, sitter_id, start_date, end_date, total_hours, total_fee,
           special_requests, status, created_at
    FROM bookings WHERE booking_id = ?1
";

const INSERT_BOOKING: &str = r"
    INSERT INTO bookings
    (pet_id, sitter_id, start_date, end_date, total_hours, total_fee, special_requests, status, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
";

const SELECT_ORDER: &str = r"
    SELECT order_id, user_id, shop_id, total_amount, shipping_address, status, created_at
    FROM orders WHERE order_id = ?1
";

const SELECT_ORDER_ITEMS: &str = r"
    SELECT product_id, quantity, price
    FROM order_items WHERE order_id = ?1
    ORDER BY item_id
";

const INSERT_ORDER: &str = r"
    INSERT INTO orders (user_id, shop_id, total_amount, shipping_address, status, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
";

const INSERT_ORDER_ITEM: &str = r"
    INSERT INTO order_items (order_id, product_id, quantity, price)
    VALUES (?1, ?2, ?3, ?4)
";

const SELECT_MEDICAL_RECORD: &str = r"
    SELECT record_id, appointment_id, pet_id, vet_id, diagnosis, treatment, prescription, notes, created_at
    FROM medical_records WHERE record_id = ?1
";

const INSERT_MEDICAL_RECORD: &str = r"
    INSERT INTO medical_records
    (appointment_id, pet_id, vet_id, diagnosis, treatment, prescription, notes, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
";

// Guarded status writes: the WHERE clause repeats the expected from-state.
const UPDATE_APPOINTMENT_STATUS: &str =
    "UPDATE appointments SET status = ?1 WHERE appointment_id = ?2 AND status = ?3";
const UPDATE_BOOKING_STATUS: &str =
    "UPDATE bookings SET status = ?1 WHERE booking_id = ?2 AND status = ?3";
const UPDATE_ORDER_STATUS: &str =
    "UPDATE orders SET status = ?1 WHERE order_id = ?2 AND status = ?3";

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        full_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        address: row.get(5)?,
        role: row.get(6)?,
        created_at: timestamp_column(row, 7)?,
    })
}

fn row_to_pet(row: &Row<'_>) -> rusqlite::Result<Pet> {
    Ok(Pet {
        id: row.get(0)?,
        owner: row.get(1)?,
        name: row.get(2)?,
        species: row.get(3)?,
        breed: row.get(4)?,
        birth_date: row.get(5)?,
        weight_kg: row.get(6)?,
        gender: row.get(7)?,
    })
}

fn row_to_veterinarian(row: &Row<'_>) -> rusqlite::Result<Veterinarian> {
    Ok(Veterinarian {
        id: row.get(0)?,
        user: row.get(1)?,
        clinic_name: row.get(2)?,
        specialty: row.get(3)?,
        license_number: row.get(4)?,
        consultation_fee: row.get(5)?,
        available_slots: row.get(6)?,
    })
}

fn row_to_sitter(row: &Row<'_>) -> rusqlite::Result<PetSitter> {
    Ok(PetSitter {
        id: row.get(0)?,
        user: row.get(1)?,
        hourly_rate: row.get(2)?,
        experience_years: row.get(3)?,
        available_pets: row.get(4)?,
        service_area: row.get(5)?,
    })
}

fn row_to_shop(row: &Row<'_>) -> rusqlite::Result<PetShop> {
    Ok(PetShop {
        id: row.get(0)?,
        manager: row.get(1)?,
        shop_name: row.get(2)?,
        location: row.get(3)?,
        business_number: row.get(4)?,
        operating_hours: row.get(5)?,
    })
}

fn row_to_product(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        shop: row.get(1)?,
        name: row.get(2)?,
        category: row.get(3)?,
        price: row.get(4)?,
        stock_quantity: row.get(5)?,
        description: row.get(6)?,
    })
}

fn row_to_appointment(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        pet: row.get(1)?,
        vet: row.get(2)?,
        date: row.get(3)?,
        time: row.get(4)?,
        reason: row.get(5)?,
        status: row.get(6)?,
        created_at: timestamp_column(row, 7)?,
    })
}

fn row_to_booking(row: &Row<'_>) -> rusqlite::Result<Booking> {
    Ok(Booking {
        id: row.get(0)?,
        pet: row.get(1)?,
        sitter: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        total_hours: row.get(5)?,
        total_fee: row.get(6)?,
        special_requests: row.get(7)?,
        status: row.get(8)?,
        created_at: timestamp_column(row, 9)?,
    })
}

fn row_to_order_item(row: &Row<'_>) -> rusqlite::Result<OrderItem> {
    Ok(OrderItem {
        product: row.get(0)?,
        quantity: row.get(1)?,
        unit_price: row.get(2)?,
    })
}

fn row_to_medical_record(row: &Row<'_>) -> rusqlite::Result<MedicalRecord> {
    Ok(MedicalRecord {
        id: row.get(0)?,
        appointment: row.get(1)?,
        pet: row.get(2)?,
        vet: row.get(3)?,
        diagnosis: row.get(4)?,
        treatment: row.get(5)?,
        prescription: row.get(6)?,
        notes: row.get(7)?,
        created_at: timestamp_column(row, 8)?,
    })
}

impl Database {
    /// Registers a user and their role profile in one unit of work.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input or a taken username, or a
    /// database error.
    pub fn create_user(&mut self, user: &NewUser) -> Result<UserId> {
        user.validate()?;
        self.unit_of_work(|tx| {
            if Self::get_user_by_username(tx, &user.username)?.is_some() {
                return Err(Error::Validation {
                    field: "username".into(),
                    message: format!("'{}' is already taken", user.username),
                });
            }

            tx.execute(
                INSERT_USER,
                params![
                    user.username,
                    user.full_name,
                    user.email,
                    user.phone,
                    user.address,
                    user.profile.role(),
                    now_unix_secs(),
                ],
            )?;
            let user_id = UserId::new(tx.last_insert_rowid());

            match &user.profile {
                RoleProfile::PetOwner => {}
                RoleProfile::Veterinarian {
                    clinic_name,
                    specialty,
                    license_number,
                    consultation_fee,
                    available_slots,
                } => {
                    tx.execute(
                        INSERT_VETERINARIAN,
                        params![
                            user_id,
                            clinic_name,
                            specialty,
                            license_number,
                            consultation_fee,
                            available_slots
                        ],
                    )?;
                }
                RoleProfile::PetSitter {
                    hourly_rate,
                    experience_years,
                    available_pets,
                    service_area,
                } => {
                    tx.execute(
                        INSERT_PET_SITTER,
                        params![
                            user_id,
                            hourly_rate,
                            experience_years,
                            available_pets,
                            service_area
                        ],
                    )?;
                }
                RoleProfile::ShopManager {
                    shop_name,
                    location,
                    business_number,
                    operating_hours,
                } => {
                    tx.execute(
                        INSERT_PET_SHOP,
                        params![
                            user_id,
                            shop_name,
                            location,
                            business_number,
                            operating_hours
                        ],
                    )?;
                }
            }

            Ok(user_id)
        })
    }

    /// Inserts a pet for `owner`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input, or a database error
    /// (including a foreign-key failure for an unknown owner).
    pub fn create_pet(conn: &Connection, owner: UserId, pet: &NewPet) -> Result<PetId> {
        pet.validate()?;
        conn.execute(
            INSERT_PET,
            params![
                owner,
                pet.name,
                pet.species,
                pet.breed,
                pet.birth_date,
                pet.weight_kg,
                pet.gender
            ],
        )?;
        Ok(PetId::new(conn.last_insert_rowid()))
    }

    /// Inserts a product into `shop` with its initial stock.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input, or a database error.
    pub fn create_product(conn: &Connection, shop: ShopId, product: &NewProduct) -> Result<ProductId> {
        product.validate()?;
        conn.execute(
            INSERT_PRODUCT,
            params![
                shop,
                product.name,
                product.category,
                product.price,
                product.stock_quantity,
                product.description
            ],
        )?;
        Ok(ProductId::new(conn.last_insert_rowid()))
    }

    /// Gets a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(conn: &Connection, id: UserId) -> Result<Option<User>> {
        Ok(conn.query_row(SELECT_USER, [id], row_to_user).optional()?)
    }

    /// Gets a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
        Ok(conn
            .query_row(SELECT_USER_BY_USERNAME, [username], row_to_user)
            .optional()?)
    }

    /// Gets a pet by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_pet(conn: &Connection, id: PetId) -> Result<Option<Pet>> {
        Ok(conn.query_row(SELECT_PET, [id], row_to_pet).optional()?)
    }

    /// Gets a veterinarian by profile id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_veterinarian(conn: &Connection, id: VetId) -> Result<Option<Veterinarian>> {
        let sql = format!("{VETERINARIAN_COLUMNS} WHERE vet_id = ?1");
        Ok(conn.query_row(&sql, [id], row_to_veterinarian).optional()?)
    }

    /// Gets the veterinarian profile of a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_veterinarian_by_user(conn: &Connection, user: UserId) -> Result<Option<Veterinarian>> {
        let sql = format!("{VETERINARIAN_COLUMNS} WHERE user_id = ?1");
        Ok(conn.query_row(&sql, [user], row_to_veterinarian).optional()?)
    }

    /// Gets a sitter by profile id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_sitter(conn: &Connection, id: SitterId) -> Result<Option<PetSitter>> {
        let sql = format!("{SITTER_COLUMNS} WHERE sitter_id = ?1");
        Ok(conn.query_row(&sql, [id], row_to_sitter).optional()?)
    }

    /// Gets the sitter profile of a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_sitter_by_user(conn: &Connection, user: UserId) -> Result<Option<PetSitter>> {
        let sql = format!("{SITTER_COLUMNS} WHERE user_id = ?1");
        Ok(conn.query_row(&sql, [user], row_to_sitter).optional()?)
    }

    /// Gets a shop by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_shop(conn: &Connection, id: ShopId) -> Result<Option<PetShop>> {
        let sql = format!("{SHOP_COLUMNS} WHERE shop_id = ?1");
        Ok(conn.query_row(&sql, [id], row_to_shop).optional()?)
    }

    /// Gets the shop a user manages.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_shop_by_manager(conn: &Connection, manager: UserId) -> Result<Option<PetShop>> {
        let sql = format!("{SHOP_COLUMNS} WHERE manager_id = ?1");
        Ok(conn.query_row(&sql, [manager], row_to_shop).optional()?)
    }

    /// Gets a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_product(conn: &Connection, id: ProductId) -> Result<Option<Product>> {
        Ok(conn.query_row(SELECT_PRODUCT, [id], row_to_product).optional()?)
    }

    /// Gets an appointment by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_appointment(conn: &Connection, id: AppointmentId) -> Result<Option<Appointment>> {
        Ok(conn
            .query_row(SELECT_APPOINTMENT, [id], row_to_appointment)
            .optional()?)
    }

    /// Gets a sitter booking by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_booking(conn: &Connection, id: BookingId) -> Result<Option<Booking>> {
        Ok(conn.query_row(SELECT_BOOKING, [id], row_to_booking).optional()?)
    }

    /// Gets an order and its lines by id.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn get_order(conn: &Connection, id: OrderId) -> Result<Option<Order>> {
        let order = conn
            .query_row(SELECT_ORDER, [id], |row| {
                Ok(Order {
                    id: row.get(0)?,
                    buyer: row.get(1)?,
                    shop: row.get(2)?,
                    total_amount: row.get(3)?,
                    shipping_address: row.get(4)?,
                    status: row.get(5)?,
                    items: Vec::new(),
                    created_at: timestamp_column(row, 6)?,
                })
            })
            .optional()?;

        match order {
            Some(mut order) => {
                order.items = Self::list_order_items(conn, id)?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// Lists the lines of an order in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_order_items(conn: &Connection, order: OrderId) -> Result<Vec<OrderItem>> {
        let mut stmt = conn.prepare(SELECT_ORDER_ITEMS)?;
        let items = stmt
            .query_map([order], row_to_order_item)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    /// Gets a medical record by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_medical_record(conn: &Connection, id: MedicalRecordId) -> Result<Option<MedicalRecord>> {
        Ok(conn
            .query_row(SELECT_MEDICAL_RECORD, [id], row_to_medical_record)
            .optional()?)
    }

    pub(crate) fn insert_appointment(
        conn: &Connection,
        request: &AppointmentRequest,
    ) -> Result<AppointmentId> {
        conn.execute(
            INSERT_APPOINTMENT,
            params![
                request.pet,
                request.vet,
                request.date,
                request.time,
                request.reason,
                AppointmentStatus::Pending,
                now_unix_secs(),
            ],
        )?;
        Ok(AppointmentId::new(conn.last_insert_rowid()))
    }

    pub(crate) fn insert_booking(
        conn: &Connection,
        request: &SitterBookingRequest,
        total_fee: Money,
    ) -> Result<BookingId> {
        conn.execute(
            INSERT_BOOKING,
            params![
                request.pet,
                request.sitter,
                request.start_date,
                request.end_date,
                request.hours,
                total_fee,
                request.special_requests,
                BookingStatus::Pending,
                now_unix_secs(),
            ],
        )?;
        Ok(BookingId::new(conn.last_insert_rowid()))
    }

    pub(crate) fn insert_order(
        conn: &Connection,
        buyer: UserId,
        shop: ShopId,
        total_amount: Money,
        shipping_address: &str,
        items: &[OrderItem],
    ) -> Result<OrderId> {
        conn.execute(
            INSERT_ORDER,
            params![
                buyer,
                shop,
                total_amount,
                shipping_address,
                OrderStatus::Processing,
                now_unix_secs(),
            ],
        )?;
        let order = OrderId::new(conn.last_insert_rowid());

        let mut stmt = conn.prepare(INSERT_ORDER_ITEM)?;
        for item in items {
            stmt.execute(params![order, item.product, item.quantity, item.unit_price])?;
        }

        Ok(order)
    }

    pub(crate) fn insert_medical_record(
        conn: &Connection,
        request: &MedicalRecordRequest,
        pet: PetId,
        vet: VetId,
    ) -> Result<MedicalRecordId> {
        conn.execute(
            INSERT_MEDICAL_RECORD,
            params![
                request.appointment,
                pet,
                vet,
                request.diagnosis,
                request.treatment,
                request.prescription,
                request.notes,
                now_unix_secs(),
            ],
        )?;
        Ok(MedicalRecordId::new(conn.last_insert_rowid()))
    }

    /// Moves `record` from `from` to `to` only if it still holds `from`.
    ///
    /// Returns `false` when the row did not match, i.e. the status changed
    /// since it was read.
    pub(crate) fn update_status(
        conn: &Connection,
        record: RecordRef,
        from: &str,
        to: &str,
    ) -> Result<bool> {
        let sql = match record {
            RecordRef::Appointment(_) => UPDATE_APPOINTMENT_STATUS,
            RecordRef::Booking(_) => UPDATE_BOOKING_STATUS,
            RecordRef::Order(_) => UPDATE_ORDER_STATUS,
        };
        let changed = conn.execute(sql, params![to, record.raw_id(), from])?;
        Ok(changed == 1)
    }
}
