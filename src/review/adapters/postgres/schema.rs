//! Diesel schema for pull request and audit event persistence.

diesel::table! {
    /// Pull request records.
    pull_requests (id) {
        /// Externally assigned pull request identifier.
        #[max_length = 255]
        id -> Varchar,
        /// Pull request name.
        #[max_length = 255]
        name -> Varchar,
        /// Author user identifier.
        #[max_length = 255]
        author_id -> Varchar,
        /// Lifecycle status (`OPEN` or `MERGED`).
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Merge timestamp, set only once merged.
        merged_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Reviewer links owned by a pull request.
    pr_reviewers (pr_id, user_id) {
        /// Owning pull request identifier.
        #[max_length = 255]
        pr_id -> Varchar,
        /// Reviewer user identifier.
        #[max_length = 255]
        user_id -> Varchar,
        /// Slot index within the reviewer list.
        position -> Int4,
    }
}

diesel::table! {
    /// Append-only audit log.
    events (id) {
        /// Sequential event identifier.
        id -> Int8,
        /// Event kind in `snake_case`.
        #[max_length = 50]
        event_type -> Varchar,
        /// Associated pull request identifier.
        #[max_length = 255]
        pr_id -> Varchar,
        /// Subject user identifier.
        #[max_length = 255]
        user_id -> Varchar,
        /// Kind-specific JSON payload.
        additional_data -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(pr_reviewers -> pull_requests (pr_id));
diesel::allow_tables_to_appear_in_same_query!(pull_requests, pr_reviewers);
