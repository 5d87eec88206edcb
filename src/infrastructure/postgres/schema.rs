// Hand-maintained; mirrors the table owned by the main application.

diesel::table! {
    premium_plans (id) {
        id -> Int8,
        name -> Varchar,
        display_name -> Varchar,
        description -> Nullable<Text>,
        duration_months -> Nullable<Int4>,
        price -> Numeric,
        currency -> Varchar,
        plan_type -> Varchar,
        student_discount_percent -> Int4,
        features -> Nullable<Text>,
        is_active -> Bool,
        max_subscribers -> Nullable<Int4>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}
