//! Diesel table definitions, one module per store partition.
//!
//! The two partitions live in separate SQLite databases and are never joined
//! with SQL; `allow_tables_to_appear_in_same_query!` is therefore only
//! declared inside each partition.

pub mod operational {
    diesel::table! {
        clients (id) {
            id -> Integer,
            client_type -> Text,
            first_name -> Nullable<Text>,
            last_name -> Nullable<Text>,
            company_name -> Nullable<Text>,
            email -> Nullable<Text>,
            phone -> Nullable<Text>,
            address -> Nullable<Text>,
            city -> Nullable<Text>,
            postal_code -> Nullable<Text>,
            notes -> Nullable<Text>,
            created_at -> Timestamp,
        }
    }

    diesel::table! {
        interventions (id) {
            id -> Integer,
            client_id -> Integer,
            reference -> Text,
            scheduled_date -> Timestamp,
            status -> Text,
            description -> Nullable<Text>,
            labor_hours -> Nullable<Text>,
            labor_rate -> Nullable<Text>,
            travel_fee -> Text,
            total_ttc -> Text,
            gcal_event_id -> Nullable<Text>,
            signed_by -> Nullable<Text>,
            completed_at -> Nullable<Timestamp>,
            created_at -> Timestamp,
        }
    }

    diesel::table! {
        intervention_types (id) {
            id -> Integer,
            intervention_id -> Integer,
            tag -> Text,
        }
    }

    diesel::joinable!(interventions -> clients (client_id));
    diesel::joinable!(intervention_types -> interventions (intervention_id));

    diesel::allow_tables_to_appear_in_same_query!(clients, interventions, intervention_types,);
}

pub mod billing {
    diesel::table! {
        invoices (id) {
            id -> Integer,
            intervention_id -> Integer,
            invoice_number -> Text,
            invoice_type -> Text,
            status -> Text,
            invoice_date -> Timestamp,
            due_date -> Nullable<Timestamp>,
            total_ht -> Text,
            total_ttc -> Text,
            amount_paid -> Text,
        }
    }
}
