//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Managed rental units. Root of every other row.
    properties (id) {
        id -> Uuid,
        name -> Text,
        /// Insertion time; defines dashboard ordering.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Messaging groups attached to a property.
    whatsapp_groups (id) {
        id -> Uuid,
        /// Owning property (cascade on delete).
        property_id -> Uuid,
        name -> Text,
        template -> Text,
        /// Nullable: older writes may have left it unset.
        links -> Nullable<Array<Text>>,
        external_ref -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// The eleven numbered door codes of each property.
    door_codes (id) {
        id -> Uuid,
        /// Owning property (cascade on delete).
        property_id -> Uuid,
        /// Slot number, `0..=10`, unique per property.
        code_number -> Int4,
        description -> Text,
        updated_at -> Timestamptz,
        last_used_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(whatsapp_groups -> properties (property_id));
diesel::joinable!(door_codes -> properties (property_id));

diesel::allow_tables_to_appear_in_same_query!(properties, whatsapp_groups, door_codes);
