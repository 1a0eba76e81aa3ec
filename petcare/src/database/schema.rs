//! Database schema definitions and SQL constants.
//!
//! Pool columns carry a `CHECK (... >= 0)` floor and status columns a
//! `CHECK (status IN (...))` over the closed status sets, so a bug that
//! bypasses the pool functions or the lifecycle table still cannot commit.

/// Current schema version for the database.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key-value metadata, holding the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Registered users of every role.
pub const CREATE_USERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        user_id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        full_name TEXT NOT NULL,
        email TEXT,
        phone TEXT,
        address TEXT,
        role TEXT NOT NULL
            CHECK (role IN ('Pet Owner', 'Veterinarian', 'Pet Sitter', 'Pet Shop Manager')),
        created_at INTEGER NOT NULL
    )";

/// Pets, each owned by one user.
pub const CREATE_PETS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS pets (
        pet_id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id INTEGER NOT NULL REFERENCES users(user_id),
        name TEXT NOT NULL,
        species TEXT NOT NULL,
        breed TEXT,
        birth_date TEXT,
        weight REAL,
        gender TEXT
    )";

/// Veterinarian profiles; `available_slots` is the slot pool.
pub const CREATE_VETERINARIANS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS veterinarians (
        vet_id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL UNIQUE REFERENCES users(user_id),
        clinic_name TEXT NOT NULL,
        specialty TEXT,
        license_number TEXT,
        consultation_fee INTEGER NOT NULL CHECK (consultation_fee >= 0),
        available_slots INTEGER NOT NULL CHECK (available_slots >= 0)
    )";

/// Pet sitter profiles.
pub const CREATE_PET_SITTERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS pet_sitters (
        sitter_id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL UNIQUE REFERENCES users(user_id),
        hourly_rate INTEGER NOT NULL CHECK (hourly_rate >= 0),
        experience_years INTEGER NOT NULL DEFAULT 0,
        available_pets TEXT,
        service_area TEXT
    )";

/// Pet shops, each with one managing user.
pub const CREATE_PET_SHOPS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS pet_shops (
        shop_id INTEGER PRIMARY KEY AUTOINCREMENT,
        manager_id INTEGER NOT NULL UNIQUE REFERENCES users(user_id),
        shop_name TEXT NOT NULL,
        location TEXT,
        business_number TEXT,
        operating_hours TEXT
    )";

/// Products; `stock_quantity` is the stock pool.
pub const CREATE_PRODUCTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS products (
        product_id INTEGER PRIMARY KEY AUTOINCREMENT,
        shop_id INTEGER NOT NULL REFERENCES pet_shops(shop_id),
        name TEXT NOT NULL,
        category TEXT,
        price INTEGER NOT NULL CHECK (price >= 0),
        stock_quantity INTEGER NOT NULL CHECK (stock_quantity >= 0),
        description TEXT
    )";

/// Veterinary appointments.
pub const CREATE_APPOINTMENTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS appointments (
        appointment_id INTEGER PRIMARY KEY AUTOINCREMENT,
        pet_id INTEGER NOT NULL REFERENCES pets(pet_id),
        vet_id INTEGER NOT NULL REFERENCES veterinarians(vet_id),
        appointment_date TEXT NOT NULL,
        appointment_time TEXT NOT NULL,
        reason TEXT,
        status TEXT NOT NULL
            CHECK (status IN ('Pending', 'Confirmed', 'Completed', 'Cancelled')),
        created_at INTEGER NOT NULL
    )";

/// Sitter bookings.
pub const CREATE_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS bookings (
        booking_id INTEGER PRIMARY KEY AUTOINCREMENT,
        pet_id INTEGER NOT NULL REFERENCES pets(pet_id),
        sitter_id INTEGER NOT NULL REFERENCES pet_sitters(sitter_id),
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        total_hours INTEGER NOT NULL CHECK (total_hours > 0),
        total_fee INTEGER NOT NULL CHECK (total_fee >= 0),
        special_requests TEXT,
        status TEXT NOT NULL
            CHECK (status IN ('Pending', 'Confirmed', 'Completed', 'Cancelled')),
        created_at INTEGER NOT NULL
    )";

/// Product orders.
pub const CREATE_ORDERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS orders (
        order_id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(user_id),
        shop_id INTEGER NOT NULL REFERENCES pet_shops(shop_id),
        total_amount INTEGER NOT NULL CHECK (total_amount >= 0),
        shipping_address TEXT NOT NULL,
        status TEXT NOT NULL
            CHECK (status IN ('Processing', 'Shipped', 'Delivered', 'Cancelled')),
        created_at INTEGER NOT NULL
    )";

/// Order lines with the unit price frozen at order time.
pub const CREATE_ORDER_ITEMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS order_items (
        item_id INTEGER PRIMARY KEY AUTOINCREMENT,
        order_id INTEGER NOT NULL REFERENCES orders(order_id),
        product_id INTEGER NOT NULL REFERENCES products(product_id),
        quantity INTEGER NOT NULL CHECK (quantity > 0),
        price INTEGER NOT NULL CHECK (price >= 0)
    )";

/// Clinical notes attached to appointments.
pub const CREATE_MEDICAL_RECORDS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS medical_records (
        record_id INTEGER PRIMARY KEY AUTOINCREMENT,
        appointment_id INTEGER NOT NULL REFERENCES appointments(appointment_id),
        pet_id INTEGER NOT NULL REFERENCES pets(pet_id),
        vet_id INTEGER NOT NULL REFERENCES veterinarians(vet_id),
        diagnosis TEXT NOT NULL,
        treatment TEXT,
        prescription TEXT,
        notes TEXT,
        created_at INTEGER NOT NULL
    )";

/// Every table, in creation order (parents before children).
pub const CREATE_TABLES: &[&str] = &[
    CREATE_USERS_TABLE,
    CREATE_PETS_TABLE,
    CREATE_VETERINARIANS_TABLE,
    CREATE_PET_SITTERS_TABLE,
    CREATE_PET_SHOPS_TABLE,
    CREATE_PRODUCTS_TABLE,
    CREATE_APPOINTMENTS_TABLE,
    CREATE_BOOKINGS_TABLE,
    CREATE_ORDERS_TABLE,
    CREATE_ORDER_ITEMS_TABLE,
    CREATE_MEDICAL_RECORDS_TABLE,
];

/// Indices on foreign keys used by lookups.
pub const CREATE_INDICES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_pets_owner ON pets(owner_id)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_vet ON appointments(vet_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_sitter ON bookings(sitter_id)",
    "CREATE INDEX IF NOT EXISTS idx_orders_shop ON orders(shop_id)",
    "CREATE INDEX IF NOT EXISTS idx_order_items_order ON order_items(order_id)",
    "CREATE INDEX IF NOT EXISTS idx_products_shop ON products(shop_id)",
];

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
