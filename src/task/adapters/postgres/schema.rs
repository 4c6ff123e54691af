//! Diesel schema for task persistence.

diesel::table! {
    /// Task records. `owner_user_id` names a user in another service's store
    /// and carries no foreign key.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Task title.
        title -> Text,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp, never updated.
        created_at -> Timestamptz,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Referenced owner identifier.
        owner_user_id -> Int8,
    }
}
